// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Data model for the three abstraction levels.
//!
//! Graphs (CIM), feature models and parsed feature trees (PIM), and UML class models (PSM).

pub mod feature;
pub mod feature_tree;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod uml;

pub use feature::{
    Attributes, Category, Feature, FeatureKind, FeatureModel, Implication, ParseImplicationError,
};
pub use feature_tree::{
    walk_forest, Constraint, ConstraintRelation, FeatureNode, GroupKind, Section,
};
pub use graph::{
    Edge, Geometry, Graph, InternalLink, LinkKind, Node, NodeKind, RefinementKind,
    SocialDependency,
};
pub use uml::{
    Stereotype, UmlAttribute, UmlClass, UmlDependency, UmlMethod, UmlModel, UmlParameter,
    DEFAULT_ATTRIBUTE_TYPE, DEFAULT_RETURN_TYPE,
};
