// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::feature::{Attributes, FeatureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Primary,
    Quality,
}

impl Section {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "primary" => Some(Self::Primary),
            "quality" => Some(Self::Quality),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Quality => "quality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Or,
    Alternative,
    Optional,
    Mandatory,
}

impl GroupKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "or" => Some(Self::Or),
            "alternative" => Some(Self::Alternative),
            "optional" => Some(Self::Optional),
            "mandatory" => Some(Self::Mandatory),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::Alternative => "alternative",
            Self::Optional => "optional",
            Self::Mandatory => "mandatory",
        }
    }
}

/// A feature as read back from the text format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    /// Group block this node was declared in, relative to its parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FeatureKind>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    /// Written as `{ref}`: names a group member declared elsewhere, or not a feature at all.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reference: bool,
    pub children: Vec<FeatureNode>,
}

impl FeatureNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section: None,
            group: None,
            kind: None,
            attributes: Attributes::default(),
            comments: Vec::new(),
            reference: false,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl Drop for FeatureNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Depth-first, pre-order walk over a forest without recursion.
pub fn walk_forest(forest: &[FeatureNode]) -> impl Iterator<Item = &FeatureNode> {
    let mut stack: Vec<&FeatureNode> = forest.iter().rev().collect();
    std::iter::from_fn(move || {
        let node = stack.pop()?;
        stack.extend(node.children.iter().rev());
        Some(node)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintRelation {
    Requires,
    Excludes,
}

impl ConstraintRelation {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("requires") {
            Some(Self::Requires)
        } else if value.eq_ignore_ascii_case("excludes") {
            Some(Self::Excludes)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requires => "requires",
            Self::Excludes => "excludes",
        }
    }

    /// Capitalised form used as a diagram edge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Requires => "Requires",
            Self::Excludes => "Excludes",
        }
    }
}

impl fmt::Display for ConstraintRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    pub source: String,
    #[serde(rename = "type")]
    pub relation: ConstraintRelation,
    pub target: String,
}

impl Constraint {
    pub fn new(
        source: impl Into<String>,
        relation: ConstraintRelation,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            relation,
            target: target.into(),
        }
    }
}
