//! [`SourceNode`] for html5ever's `markup5ever_rcdom` tree.
//!
//! Field mapping:
//! - Document: empty data.
//! - Doctype: data is the doctype name; a non-empty public or system
//!   identifier is exposed as a `public` / `system` attribute.
//! - Element: data is the local name. The HTML namespace is reported as
//!   `""`, SVG as `"svg"`, MathML as `"math"`, anything else by its URI.
//!   Attribute namespaces are the attribute prefix (`xlink`, `xml`,
//!   `xmlns`) or empty. The contents of a `<template>` are its children.
//! - Processing instructions have no [`NodeKind`] and convert as unknown.

use htmljson_dom::{Attribute, NodeKind};
use markup5ever_rcdom::{Handle, NodeData};

use crate::source::SourceNode;

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";
const SVG_NS: &str = "http://www.w3.org/2000/svg";
const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";

impl SourceNode for Handle {
    fn kind(&self) -> Option<NodeKind> {
        match self.data {
            NodeData::Document => Some(NodeKind::Document),
            NodeData::Doctype { .. } => Some(NodeKind::Doctype),
            NodeData::Text { .. } => Some(NodeKind::Text),
            NodeData::Comment { .. } => Some(NodeKind::Comment),
            NodeData::Element { .. } => Some(NodeKind::Element),
            NodeData::ProcessingInstruction { .. } => None,
        }
    }

    fn data(&self) -> String {
        match &self.data {
            NodeData::Document => String::new(),
            NodeData::Doctype { name, .. } => String::from(&**name),
            NodeData::Text { contents } => String::from(&**contents.borrow()),
            NodeData::Comment { contents } => String::from(&**contents),
            NodeData::Element { name, .. } => String::from(&*name.local),
            NodeData::ProcessingInstruction { target, .. } => String::from(&**target),
        }
    }

    fn namespace(&self) -> String {
        let NodeData::Element { name, .. } = &self.data else {
            return String::new();
        };
        let short = match &*name.ns {
            HTML_NS => "",
            SVG_NS => "svg",
            MATHML_NS => "math",
            other => other,
        };
        short.to_owned()
    }

    fn attributes(&self) -> Vec<Attribute> {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .map(|attr| Attribute {
                    namespace: attr.name.prefix.as_deref().unwrap_or_default().to_owned(),
                    key: String::from(&*attr.name.local),
                    val: String::from(&*attr.value),
                })
                .collect(),
            NodeData::Doctype {
                public_id,
                system_id,
                ..
            } => [("public", public_id), ("system", system_id)]
                .into_iter()
                .filter(|(_, id)| !id.is_empty())
                .map(|(key, id)| Attribute::new(key, &**id))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn children(&self) -> Vec<Self> {
        let mut children = self.children.borrow().clone();
        if let NodeData::Element {
            template_contents, ..
        } = &self.data
            && let Some(contents) = template_contents.borrow().as_ref()
        {
            children.extend(contents.children.borrow().iter().cloned());
        }
        children
    }
}
