//! Instance paths
//!
//! Where a control's value lives in instance data:
//! - `//form/<parent-bind-name>/<control-name>` for nested controls
//! - nothing for controls whose bind has no parent
//!
//! Only one level of nesting is looked up. Composite controls (one bind
//! whose value spans several child elements, e.g. an address) resolve to
//! their wrapper element and are not handled specially.

use std::fmt;

use roxmltree::Node;

use crate::binding::bind::Bind;
use crate::binding::control::Control;
use crate::xml;

/// A `//a/b/c` location: first segment matched anywhere, the rest as
/// direct children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePath {
    segments: Vec<String>,
}

impl InstancePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Path of a control's value, `None` for controls without a parent bind
    pub fn for_control(control: &Control, form_element: &str) -> Option<Self> {
        Self::for_bind(control.bind(), form_element)
    }

    pub fn for_bind(bind: &Bind, form_element: &str) -> Option<Self> {
        let parent = bind.parent.as_deref()?;
        Some(Self::new([form_element, parent.name.as_str(), bind.name.as_str()]))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First matching element in document order under `scope` (self included)
    pub fn find<'a, 'input>(&self, scope: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
        let (first, rest) = self.segments.split_first()?;
        scope
            .descendants()
            .filter(|n| xml::is_element_named(*n, first))
            .find_map(|n| descend(n, rest))
    }
}

fn descend<'a, 'input>(node: Node<'a, 'input>, rest: &[String]) -> Option<Node<'a, 'input>> {
    let Some((next, rest)) = rest.split_first() else {
        return Some(node);
    };
    node.children()
        .filter(|c| xml::is_element_named(*c, next))
        .find_map(|c| descend(c, rest))
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            let sep = if i == 0 { "//" } else { "/" };
            write!(f, "{}{}", sep, segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTANCE: &str = r#"<form>
        <other><value>wrong</value></other>
        <section>
            <value>first</value>
            <value>second</value>
        </section>
        <section><value>third</value></section>
    </form>"#;

    #[test]
    fn display_is_xpath_like() {
        let path = InstancePath::new(["form", "section", "value"]);
        assert_eq!(path.to_string(), "//form/section/value");
    }

    #[test]
    fn finds_first_match_in_document_order() {
        let doc = xml::parse(INSTANCE.as_bytes()).unwrap();
        let path = InstancePath::new(["form", "section", "value"]);
        let found = path.find(doc.root()).unwrap();
        assert_eq!(found.text(), Some("first"));
    }

    #[test]
    fn form_element_may_be_nested() {
        let doc = xml::parse(b"<envelope><form><s><v>x</v></s></form></envelope>").unwrap();
        let path = InstancePath::new(["form", "s", "v"]);
        assert_eq!(path.find(doc.root()).and_then(|n| n.text()), Some("x"));
    }

    #[test]
    fn parentless_bind_has_no_path() {
        let section = Bind {
            id: "section-bind".into(),
            name: "section".into(),
            declared_type: "xf:string".into(),
            parent: None,
        };
        assert!(InstancePath::for_bind(&section, "form").is_none());

        let field = Bind {
            id: "value-bind".into(),
            name: "value".into(),
            declared_type: "xf:string".into(),
            parent: Some(Box::new(section)),
        };
        let path = InstancePath::for_bind(&field, "form").unwrap();
        assert_eq!(path.segments(), ["form", "section", "value"]);
    }

    #[test]
    fn missing_segments_resolve_to_none() {
        let doc = xml::parse(INSTANCE.as_bytes()).unwrap();
        assert!(InstancePath::new(["form", "section", "nope"]).find(doc.root()).is_none());
        assert!(InstancePath::new(["data", "section", "value"]).find(doc.root()).is_none());
        assert!(InstancePath::new(Vec::<String>::new()).find(doc.root()).is_none());
    }
}
