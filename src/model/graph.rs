// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed node/edge graph extracted from an i* diagram.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The i* element type carried by a node's `type` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum NodeKind {
    Actor,
    Agent,
    Role,
    Goal,
    Softgoal,
    Task,
    Resource,
    Boundary,
    Limit,
    Constraint,
    Other(String),
}

impl NodeKind {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "actor" => Self::Actor,
            "agent" => Self::Agent,
            "role" => Self::Role,
            "goal" => Self::Goal,
            "softgoal" => Self::Softgoal,
            "task" => Self::Task,
            "resource" => Self::Resource,
            "boundary" => Self::Boundary,
            "limit" => Self::Limit,
            "constraint" => Self::Constraint,
            _ => Self::Other(value.trim().to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Actor => "actor",
            Self::Agent => "agent",
            Self::Role => "role",
            Self::Goal => "goal",
            Self::Softgoal => "softgoal",
            Self::Task => "task",
            Self::Resource => "resource",
            Self::Boundary => "boundary",
            Self::Limit => "limit",
            Self::Constraint => "constraint",
            Self::Other(other) => other,
        }
    }

    /// Actor-class kinds own goals and tasks through their boundary.
    pub fn is_actor_class(&self) -> bool {
        matches!(self, Self::Actor | Self::Agent | Self::Role)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<NodeKind> for String {
    fn from(value: NodeKind) -> Self {
        value.as_str().to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    kind: NodeKind,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
}

impl Node {
    /// Returns `None` for an empty id; such nodes are not part of any graph.
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return None;
        }
        Some(Self {
            id,
            kind,
            label: label.into(),
            style: None,
            parent: None,
            geometry: None,
            attributes: BTreeMap::new(),
        })
    }

    pub fn with_style<T: Into<String>>(mut self, style: Option<T>) -> Self {
        self.style = style.map(Into::into);
        self
    }

    pub fn with_parent<T: Into<String>>(mut self, parent: Option<T>) -> Self {
        self.parent = parent.map(Into::into);
        self
    }

    pub fn with_geometry(mut self, geometry: Option<Geometry>) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn insert_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    source: String,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
}

impl Edge {
    /// Returns `None` when either endpoint is empty.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Option<Self> {
        let source = source.into();
        let target = target.into();
        if source.trim().is_empty() || target.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: None,
            source,
            target,
            label: None,
            style: None,
        })
    }

    pub fn with_id<T: Into<String>>(mut self, id: Option<T>) -> Self {
        self.id = id.map(Into::into);
        self
    }

    pub fn with_label<T: Into<String>>(mut self, label: Option<T>) -> Self {
        self.label = label.map(Into::into).filter(|label: &String| !label.is_empty());
        self
    }

    pub fn with_style<T: Into<String>>(mut self, style: Option<T>) -> Self {
        self.style = style.map(Into::into);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementKind {
    And,
    Or,
}

/// Kind of an intra-actor link wrapped in an `object` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    NeededBy,
    QualificationLink,
    Contribution,
    Refinement(RefinementKind),
}

impl LinkKind {
    /// Resolves the `type` attribute of a link object. Refinements take their
    /// AND/OR flavour from the type itself or from the link's value.
    pub fn parse(link_type: &str, value: &str) -> Option<Self> {
        let refinement_from_value = || match value.trim().to_ascii_lowercase().as_str() {
            "and" => Some(Self::Refinement(RefinementKind::And)),
            "or" => Some(Self::Refinement(RefinementKind::Or)),
            _ => None,
        };
        match link_type.trim().to_ascii_lowercase().as_str() {
            "needed-by" => Some(Self::NeededBy),
            "qualification-link" => Some(Self::QualificationLink),
            "contribution" => Some(Self::Contribution),
            "and-refinement" => Some(Self::Refinement(RefinementKind::And)),
            "or-refinement" => Some(Self::Refinement(RefinementKind::Or)),
            "refinement" => refinement_from_value(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    pub kind: LinkKind,
    pub source: String,
    pub target: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialDependency {
    pub source: String,
    pub target: String,
}

/// Nodes, plain edges and the two link views consumed by the CIM→PIM rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    internal_links: Vec<InternalLink>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, internal_links: Vec<InternalLink>) -> Self {
        Self {
            nodes,
            edges,
            internal_links,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn internal_links(&self) -> &[InternalLink] {
        &self.internal_links
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.internal_links.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn nodes_of_kind<'a>(&'a self, kind: &'a NodeKind) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |node| node.kind() == kind)
    }

    /// Plain edge cells whose endpoints both resolve to extracted nodes.
    ///
    /// Reversed and repeated edges are reported individually.
    pub fn social_dependencies(&self) -> Vec<SocialDependency> {
        self.edges
            .iter()
            .filter(|edge| self.node(edge.source()).is_some() && self.node(edge.target()).is_some())
            .map(|edge| SocialDependency {
                source: edge.source().to_owned(),
                target: edge.target().to_owned(),
            })
            .collect()
    }
}
