//! `xf:bind` nodes
//!
//! A Bind is read straight off its element's attributes. Its parent is
//! the enclosing `bind` element, unless that element is the binds
//! container itself. Parents are rebuilt for each Bind rather than
//! shared: Binds are plain values and never compared by identity.

use roxmltree::Node;

use crate::binding::control::{Control, ControlElement, ControlKind};
use crate::registry;
use crate::xml;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bind {
    pub id: String,
    pub name: String,
    /// `type` attribute, `xf:string` when absent
    pub declared_type: String,
    pub parent: Option<Box<Bind>>,
}

impl Bind {
    /// Read a bind and its chain of parent binds from the definition tree
    pub fn parse(element: Node, binds_id: &str) -> Self {
        let parent = element
            .parent_element()
            .filter(|p| xml::local_name(*p) == "bind" && p.attribute("id") != Some(binds_id))
            .map(|p| Box::new(Bind::parse(p, binds_id)));

        Self {
            id: element.attribute("id").unwrap_or_default().to_string(),
            name: element.attribute("name").unwrap_or_default().to_string(),
            declared_type: element
                .attribute("type")
                .unwrap_or(registry::DEFAULT_TYPE)
                .to_string(),
            parent,
        }
    }

    /// Kind of control presenting this bind through a body element tag
    ///
    /// `select1` and `select` tags win over the declared type; any other
    /// tag goes through the registry. `None` for unregistered types.
    pub fn control_kind(&self, body_tag: &str) -> Option<ControlKind> {
        match body_tag {
            "select1" => Some(ControlKind::Select1),
            "select" => Some(ControlKind::Select),
            _ => registry::lookup(&self.declared_type),
        }
    }

    /// Build the control presenting this bind, if its type is known
    pub fn control_for(&self, element: ControlElement, default_raw_value: Option<String>) -> Option<Control> {
        let kind = self.control_kind(&element.tag)?;
        Some(Control::new(kind, self.clone(), element, default_raw_value))
    }

    /// Number of bind levels above this one
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent.as_deref(), |b| b.parent.as_deref()).count()
    }
}
