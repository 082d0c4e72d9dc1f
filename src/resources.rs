//! Localized form resources
//!
//! Form Builder stores labels, hints and alerts in the
//! `fr-form-resources` instance, one `resource` per locale:
//!
//! ```xml
//! <resources>
//!   <resource xml:lang="en">
//!     <input><label>Input Field</label><hint>Standard input field</hint></input>
//!   </resource>
//! </resources>
//! ```
//!
//! and the body points at them with `ref="$form-resources/input/label"`.

use roxmltree::{Document, Node};

use crate::config::FormConfig;
use crate::xml;

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
const FORM_RESOURCES_PREFIX: &str = "$form-resources/";

/// The `resource` element selected for the Builder's locale
#[derive(Debug, Clone, Copy)]
pub struct FormResources<'a, 'input> {
    resource: Option<Node<'a, 'input>>,
}

impl<'a, 'input> FormResources<'a, 'input> {
    /// Pick the resource for `config.lang`, falling back to the first one
    pub fn locate(doc: &'a Document<'input>, config: &FormConfig) -> Self {
        let resources: Vec<_> = xml::find_by_id(doc.root(), &config.resources_id)
            .into_iter()
            .flat_map(|instance| instance.descendants())
            .filter(|n| xml::is_element_named(*n, "resource"))
            .collect();

        let resource = resources
            .iter()
            .find(|r| r.attribute((XML_NS, "lang")) == Some(config.lang.as_str()))
            .or_else(|| resources.first())
            .copied();

        if resource.is_none() {
            tracing::debug!(resources_id = %config.resources_id, "no form resources found");
        }
        Self { resource }
    }

    /// Resolve a `$form-resources/a/b` reference
    pub fn lookup(&self, reference: &str) -> Option<String> {
        let path = reference.strip_prefix(FORM_RESOURCES_PREFIX)?;
        let mut node = self.resource?;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = xml::child_named(node, segment)?;
        }
        non_blank(node.text())
    }

    /// Text of a label/hint/alert element, inline or through its `ref`
    pub fn text_of(&self, element: Node) -> Option<String> {
        match element.attribute("ref") {
            Some(reference) => self.lookup(reference),
            None => non_blank(element.text()),
        }
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
