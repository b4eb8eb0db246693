// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graph extraction from draw.io / mxGraph XML.
//!
//! Nodes come from `object` children of the diagram root, plain edges from `mxCell`
//! children flagged `edge="1"`, and internal links from `object`s wrapping an edge cell.
//! The three views are filtered independently over the same root.

use std::io::Read;

use base64::Engine as _;
use flate2::read::DeflateDecoder;
use roxmltree::{Document, Node as XmlNode};

use super::label::clean_label;
use crate::model::{Edge, Geometry, Graph, InternalLink, LinkKind, Node, NodeKind};

const OBJECT_TAGS: [&str; 2] = ["object", "UserObject"];
const RESERVED_OBJECT_ATTRIBUTES: [&str; 4] = ["id", "type", "label", "value"];

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("diagram source is empty")]
    EmptyInput,
    #[error("malformed diagram XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("cannot decode compressed diagram payload: {0}")]
    CompressedDiagram(String),
}

/// Parses diagram XML into a [`Graph`].
///
/// A document without a diagram root yields an empty graph.
pub fn extract_graph(xml: &str) -> Result<Graph, ExtractError> {
    if xml.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let doc = Document::parse(xml)?;
    match locate_root(&doc) {
        Located::Root(root) => Ok(extract_from_root(root)),
        Located::Compressed(payload) => {
            let inflated = inflate_diagram_payload(&payload)?;
            let inner = Document::parse(&inflated)?;
            match locate_root(&inner) {
                Located::Root(root) => Ok(extract_from_root(root)),
                Located::Compressed(_) | Located::Missing => Ok(Graph::default()),
            }
        }
        Located::Missing => {
            tracing::debug!("diagram root not found; returning empty graph");
            Ok(Graph::default())
        }
    }
}

enum Located<'a, 'input> {
    Root(XmlNode<'a, 'input>),
    Compressed(String),
    Missing,
}

fn locate_root<'a, 'input>(doc: &'a Document<'input>) -> Located<'a, 'input> {
    let root = doc.descendants().find(|node| {
        node.has_tag_name("root")
            && node
                .parent_element()
                .is_some_and(|parent| parent.has_tag_name("mxGraphModel"))
    });
    if let Some(root) = root {
        return Located::Root(root);
    }

    let payload = doc
        .descendants()
        .filter(|node| node.has_tag_name("diagram"))
        .filter_map(|node| node.text())
        .map(str::trim)
        .find(|text| !text.is_empty());
    match payload {
        Some(payload) => Located::Compressed(payload.to_owned()),
        None => Located::Missing,
    }
}

/// Decodes draw.io's compressed `<diagram>` body: base64, raw DEFLATE, then
/// percent-encoding.
fn inflate_diagram_payload(payload: &str) -> Result<String, ExtractError> {
    let compact: String = payload.chars().filter(|ch| !ch.is_whitespace()).collect();
    let compressed = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| ExtractError::CompressedDiagram(err.to_string()))?;

    let mut inflated = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|err| ExtractError::CompressedDiagram(err.to_string()))?;

    let encoded = String::from_utf8(inflated)
        .map_err(|err| ExtractError::CompressedDiagram(err.to_string()))?;
    urlencoding::decode(&encoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| ExtractError::CompressedDiagram(err.to_string()))
}

fn extract_from_root(root: XmlNode<'_, '_>) -> Graph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for child in root.children().filter(XmlNode::is_element) {
        let tag = child.tag_name().name();
        if OBJECT_TAGS.contains(&tag) {
            match object_cell(child) {
                Some(cell) if is_edge_cell(cell) => {
                    // Link objects of a known kind belong to the internal-link view only.
                    if link_kind_of(child).is_none() {
                        if let Some(edge) = object_edge(child, cell) {
                            edges.push(edge);
                        }
                    }
                }
                cell => match object_node(child, cell) {
                    Some(node) => nodes.push(node),
                    None => tracing::debug!("dropping object without id"),
                },
            }
        } else if tag == "mxCell" && is_edge_cell(child) {
            match cell_edge(child) {
                Some(edge) => edges.push(edge),
                None => tracing::debug!(
                    id = child.attribute("id").unwrap_or_default(),
                    "dropping edge without source/target"
                ),
            }
        }
    }

    let internal_links = extract_internal_links(root);
    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        internal_links = internal_links.len(),
        "extracted diagram graph"
    );
    Graph::new(nodes, edges, internal_links)
}

/// Collects `object`s of a link type that wrap an edge cell with both endpoints.
pub(crate) fn extract_internal_links(root: XmlNode<'_, '_>) -> Vec<InternalLink> {
    let mut links = Vec::new();
    for object in root
        .children()
        .filter(|node| OBJECT_TAGS.iter().any(|tag| node.has_tag_name(*tag)))
    {
        let Some(kind) = link_kind_of(object) else {
            continue;
        };
        let Some(cell) = object_cell(object).filter(|cell| is_edge_cell(*cell)) else {
            continue;
        };
        let (Some(source), Some(target)) = (non_empty(cell, "source"), non_empty(cell, "target"))
        else {
            tracing::debug!(?kind, "dropping internal link without source/target");
            continue;
        };
        links.push(InternalLink {
            kind,
            source: source.to_owned(),
            target: target.to_owned(),
            value: object_value(object),
        });
    }
    links
}

fn link_kind_of(object: XmlNode<'_, '_>) -> Option<LinkKind> {
    let link_type = object.attribute("type")?;
    LinkKind::parse(link_type, &object_value(object))
}

fn object_value(object: XmlNode<'_, '_>) -> String {
    let raw = non_empty(object, "value")
        .or_else(|| non_empty(object, "label"))
        .unwrap_or_default();
    clean_label(raw)
}

fn object_cell<'a, 'input>(object: XmlNode<'a, 'input>) -> Option<XmlNode<'a, 'input>> {
    object.children().find(|node| node.has_tag_name("mxCell"))
}

fn is_edge_cell(cell: XmlNode<'_, '_>) -> bool {
    cell.attribute("edge") == Some("1")
}

fn non_empty<'a>(node: XmlNode<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|value| !value.trim().is_empty())
}

fn object_node(object: XmlNode<'_, '_>, cell: Option<XmlNode<'_, '_>>) -> Option<Node> {
    let id = non_empty(object, "id")?;
    let kind = NodeKind::parse(object.attribute("type").unwrap_or_default());
    let label = object_value(object);

    let mut node = Node::new(id, kind, label)?
        .with_style(cell.and_then(|cell| cell.attribute("style")))
        .with_parent(cell.and_then(|cell| non_empty(cell, "parent")))
        .with_geometry(cell.and_then(cell_geometry));

    for attribute in object.attributes() {
        if !RESERVED_OBJECT_ATTRIBUTES.contains(&attribute.name()) {
            node.insert_attribute(attribute.name(), attribute.value());
        }
    }
    Some(node)
}

fn cell_geometry(cell: XmlNode<'_, '_>) -> Option<Geometry> {
    let geometry = cell
        .children()
        .find(|node| node.has_tag_name("mxGeometry"))?;
    let number = |name: &str| {
        geometry
            .attribute(name)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    Some(Geometry {
        x: number("x"),
        y: number("y"),
        width: number("width"),
        height: number("height"),
    })
}

fn cell_edge(cell: XmlNode<'_, '_>) -> Option<Edge> {
    let edge = Edge::new(non_empty(cell, "source")?, non_empty(cell, "target")?)?;
    Some(
        edge.with_id(non_empty(cell, "id"))
            .with_label(cell.attribute("value").map(clean_label))
            .with_style(cell.attribute("style")),
    )
}

fn object_edge(object: XmlNode<'_, '_>, cell: XmlNode<'_, '_>) -> Option<Edge> {
    let edge = Edge::new(non_empty(cell, "source")?, non_empty(cell, "target")?)?;
    Some(
        edge.with_id(non_empty(object, "id"))
            .with_label(Some(object_value(object)))
            .with_style(cell.attribute("style")),
    )
}
