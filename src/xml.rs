//! Small helpers over `roxmltree` nodes
//!
//! Orbeon documents mix several prefixes for the same namespace
//! (`xf:` and `xforms:`), so elements are matched on their expanded name
//! rather than on the prefix spelled in the source.

use roxmltree::{Document, Node};

use crate::error::Result;

pub const XFORMS_NS: &str = "http://www.w3.org/2002/xforms";
pub const FORM_RUNNER_NS: &str = "http://orbeon.org/oxf/xml/form-runner";

/// Parse a UTF-8 buffer into a read-only tree
pub fn parse(bytes: &[u8]) -> Result<Document<'_>> {
    let text = std::str::from_utf8(bytes)?;
    Ok(Document::parse(text)?)
}

/// Local part of an element name (`select1` for `xf:select1`)
#[inline]
pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Element with the given namespace and local name
pub fn is_element_ns(node: Node, ns: &str, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(ns)
}

/// Element with the given local name, whatever its namespace
pub fn is_element_named(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// First child element with the given local name
pub fn child_named<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is_element_named(*c, name))
}

/// First element (document order, self included) with the given `id`
pub fn find_by_id<'a, 'input>(node: Node<'a, 'input>, id: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && n.attribute("id") == Some(id))
}
