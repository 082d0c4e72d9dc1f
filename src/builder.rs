//! Form definition builder
//!
//! Parses a Form Builder definition once and keeps what runners need:
//! - bind table: bind id → Bind
//! - controls: control name → Control (one per bound body element)
//! - sanitized names: identifier-friendly key → control name
//!
//! The definition tree is not retained; controls carry owned snapshots of
//! their labels and defaults, so a Builder can be shared across threads.

use rustc_hash::FxHashMap;
use roxmltree::{Document, Node};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument, warn};

use crate::binding::{Bind, Control, ControlElement, InstancePath};
use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::resources::FormResources;
use crate::xml::{self, FORM_RUNNER_NS, XFORMS_NS};

#[derive(Debug, Clone)]
pub struct Builder {
    config: FormConfig,
    binds: FxHashMap<String, Bind>,
    /// `bind` attribute of every bound body element, in document order
    body_bind_ids: Vec<String>,
    controls: FxHashMap<String, Control>,
    sanitized_control_names: FxHashMap<String, String>,
}

impl Builder {
    /// Parse a definition with the default configuration for `lang`
    pub fn new(xml: &[u8], lang: &str) -> Result<Self> {
        Self::with_config(xml, FormConfig::with_lang(lang))
    }

    #[instrument(skip_all, fields(lang = %config.lang))]
    pub fn with_config(xml: &[u8], config: FormConfig) -> Result<Self> {
        let doc = xml::parse(xml)?;

        let mut builder = Self {
            config,
            binds: FxHashMap::default(),
            body_bind_ids: Vec::new(),
            controls: FxHashMap::default(),
            sanitized_control_names: FxHashMap::default(),
        };

        builder.set_binds(&doc);
        let body_elements = builder.set_fr_body_elements(&doc);
        builder.set_controls(&doc, &body_elements)?;
        builder.set_sanitized_control_names();

        debug!(
            binds = builder.binds.len(),
            body_elements = body_elements.len(),
            controls = builder.controls.len(),
            "form definition parsed"
        );
        Ok(builder)
    }

    fn set_binds(&mut self, doc: &Document) {
        let Some(container) = xml::find_by_id(doc.root(), &self.config.binds_id) else {
            debug!(binds_id = %self.config.binds_id, "no binds container");
            return;
        };

        for element in container
            .descendants()
            .skip(1)
            .filter(|n| xml::is_element_ns(*n, XFORMS_NS, "bind"))
        {
            let bind = Bind::parse(element, &self.config.binds_id);
            self.binds.insert(bind.id.clone(), bind);
        }
    }

    fn set_fr_body_elements<'a, 'input>(&mut self, doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
        let elements: Vec<_> = doc
            .descendants()
            .filter(|n| xml::is_element_ns(*n, FORM_RUNNER_NS, "body"))
            .flat_map(|body| body.descendants().skip(1))
            .filter(|n| n.is_element() && n.has_attribute("bind"))
            .collect();

        self.body_bind_ids = elements
            .iter()
            .filter_map(|n| n.attribute("bind"))
            .map(str::to_string)
            .collect();
        elements
    }

    fn set_controls(&mut self, doc: &Document, body_elements: &[Node]) -> Result<()> {
        let resources = FormResources::locate(doc, &self.config);
        let defaults = xml::find_by_id(doc.root(), &self.config.instance_id);

        for element in body_elements {
            let bind_id = element.attribute("bind").unwrap_or_default();
            let bind = self.binds.get(bind_id).ok_or_else(|| FormError::UnknownBind {
                bind_id: bind_id.to_string(),
            })?;

            if bind.name.is_empty() {
                warn!(bind_id, "bind has no name, control skipped");
                continue;
            }

            let snapshot = control_element(*element, &resources);
            let default_raw_value = default_literal(*element, bind, defaults, &self.config.form_element);

            match bind.control_for(snapshot, default_raw_value) {
                Some(control) => {
                    let name = bind.name.clone();
                    if self.controls.insert(name.clone(), control).is_some() {
                        debug!(control = %name, "control redefined, keeping the last one");
                    }
                }
                None => {
                    debug!(
                        control = %bind.name,
                        declared_type = %bind.declared_type,
                        "no control kind for declared type, skipped"
                    );
                }
            }
        }
        Ok(())
    }

    fn set_sanitized_control_names(&mut self) {
        for name in self.controls.keys() {
            self.sanitized_control_names
                .insert(sanitize_name(name), name.clone());
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn lang(&self) -> &str {
        &self.config.lang
    }

    pub fn binds(&self) -> &FxHashMap<String, Bind> {
        &self.binds
    }

    pub fn bind(&self, id: &str) -> Option<&Bind> {
        self.binds.get(id)
    }

    /// Bind ids referenced from the form body, in document order
    pub fn body_bind_ids(&self) -> &[String] {
        &self.body_bind_ids
    }

    pub fn controls(&self) -> &FxHashMap<String, Control> {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.get(name)
    }

    pub fn sanitized_control_names(&self) -> &FxHashMap<String, String> {
        &self.sanitized_control_names
    }

    /// Control name for a sanitized or canonical key
    pub fn resolve_name(&self, key: &str) -> Option<&str> {
        self.sanitized_control_names
            .get(key)
            .map(String::as_str)
            .or_else(|| self.controls.get_key_value(key).map(|(k, _)| k.as_str()))
    }

    /// Control presenting the parent bind of `name` (e.g. its section)
    pub fn parent_control(&self, name: &str) -> Option<&Control> {
        let parent = self.controls.get(name)?.parent()?;
        self.controls
            .get(&parent.name)
            .filter(|c| c.bind().id == parent.id)
    }

    /// Where `name`'s value lives in instance data
    ///
    /// `Ok(None)` for controls without a parent bind.
    pub fn instance_path(&self, name: &str) -> Result<Option<InstancePath>> {
        let control = self.controls.get(name).ok_or_else(|| FormError::ControlNotFound {
            name: name.to_string(),
        })?;
        Ok(control.instance_path(&self.config.form_element))
    }

    /// JSON description of the control catalog, keyed by control name
    pub fn to_value(&self) -> Value {
        let controls: Map<String, Value> = self
            .controls
            .iter()
            .map(|(name, control)| {
                let summary = json!({
                    "bind": control.bind().id,
                    "type": control.bind().declared_type,
                    "kind": control.kind().as_str(),
                    "parent": control.parent().map(|p| p.name.as_str()),
                    "label": control.label(),
                    "hint": control.hint(),
                    "alert": control.alert(),
                    "default": control.default_raw_value(),
                });
                (name.clone(), summary)
            })
            .collect();
        Value::Object(controls)
    }
}

/// Identifier-friendly form of a control name: `-` removed, `.` → `_`
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-')
        .map(|c| if c == '.' { '_' } else { c })
        .collect()
}

fn control_element(element: Node, resources: &FormResources) -> ControlElement {
    let text = |name: &str| xml::child_named(element, name).and_then(|n| resources.text_of(n));
    ControlElement {
        tag: xml::local_name(element).to_string(),
        label: text("label"),
        hint: text("hint"),
        alert: text("alert"),
    }
}

/// Default literal: a `default` child of the body element, else the
/// value stored in the definition's own form instance
fn default_literal(
    element: Node,
    bind: &Bind,
    defaults: Option<Node>,
    form_element: &str,
) -> Option<String> {
    if let Some(default) = xml::child_named(element, "default") {
        return default.text().map(str::to_string);
    }
    let path = InstancePath::for_bind(bind, form_element)?;
    path.find(defaults?)
        .and_then(|n| n.text())
        .map(str::to_string)
}
