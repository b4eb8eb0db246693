// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural counts per pipeline stage.
//!
//! Read-only aggregations; ratios built from them live in [`crate::report`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{
    walk_forest, Constraint, FeatureKind, FeatureModel, FeatureNode, Graph, LinkKind, NodeKind,
    RefinementKind, Section, UmlModel,
};
use crate::transform::pim_to_psm::REQUIRES_STEREOTYPE;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub actors: usize,
    pub goals: usize,
    pub softgoals: usize,
    pub tasks: usize,
    pub resources: usize,
    pub internal_links: usize,
    pub social_dependencies: usize,
    pub contributions: usize,
    pub and_refinements: usize,
    pub or_refinements: usize,
}

impl GraphStats {
    pub fn of(graph: &Graph) -> Self {
        let mut stats = Self {
            nodes: graph.nodes().len(),
            edges: graph.edges().len(),
            internal_links: graph.internal_links().len(),
            social_dependencies: graph.social_dependencies().len(),
            ..Self::default()
        };
        for node in graph.nodes() {
            match node.kind() {
                NodeKind::Goal => stats.goals += 1,
                NodeKind::Softgoal => stats.softgoals += 1,
                NodeKind::Task => stats.tasks += 1,
                NodeKind::Resource => stats.resources += 1,
                kind if kind.is_actor_class() => stats.actors += 1,
                _ => {}
            }
        }
        for link in graph.internal_links() {
            match link.kind {
                LinkKind::Contribution => stats.contributions += 1,
                LinkKind::Refinement(RefinementKind::And) => stats.and_refinements += 1,
                LinkKind::Refinement(RefinementKind::Or) => stats.or_refinements += 1,
                LinkKind::NeededBy | LinkKind::QualificationLink => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureModelStats {
    pub features: usize,
    pub features_by_category: BTreeMap<String, usize>,
    pub goals: usize,
    pub tasks: usize,
    pub attributes: usize,
    pub comments: usize,
    pub constraints: usize,
    pub valid_constraints: usize,
    pub or_groups: usize,
    pub contributions: usize,
}

impl FeatureModelStats {
    pub fn of(model: &FeatureModel) -> Self {
        let mut stats = Self {
            features: model.features().len(),
            constraints: model.constraints().len(),
            valid_constraints: model.valid_constraints().count(),
            or_groups: model.or_groups().len(),
            contributions: model.contributions().len(),
            ..Self::default()
        };
        for feature in model.features() {
            *stats
                .features_by_category
                .entry(feature.category.as_str().to_owned())
                .or_default() += 1;
            match feature.kind {
                Some(FeatureKind::Goal) => stats.goals += 1,
                Some(FeatureKind::Task) => stats.tasks += 1,
                _ => {}
            }
            stats.attributes += feature.attributes.len();
            stats.comments += feature.comments.len();
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureTreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub quality_nodes: usize,
    /// `{ref}` members; not counted in `nodes`.
    pub references: usize,
    pub max_depth: usize,
    pub constraints: usize,
}

impl FeatureTreeStats {
    pub fn of(forest: &[FeatureNode], constraints: &[Constraint]) -> Self {
        let mut stats = Self {
            constraints: constraints.len(),
            ..Self::default()
        };
        for node in walk_forest(forest) {
            if node.reference {
                stats.references += 1;
                continue;
            }
            stats.nodes += 1;
            if node.is_leaf() {
                stats.leaves += 1;
            }
            if node.section == Some(Section::Quality) {
                stats.quality_nodes += 1;
            }
        }

        let mut stack: Vec<(&FeatureNode, usize)> = forest.iter().map(|node| (node, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UmlStats {
    pub classes: usize,
    pub classes_by_stereotype: BTreeMap<String, usize>,
    pub attributes: usize,
    pub methods: usize,
    pub tagged_values: usize,
    pub comments: usize,
    pub dependencies: usize,
    pub requires_dependencies: usize,
}

impl UmlStats {
    pub fn of(model: &UmlModel) -> Self {
        let mut stats = Self {
            classes: model.classes().len(),
            dependencies: model.dependencies().len(),
            requires_dependencies: model
                .dependencies()
                .iter()
                .filter(|dependency| dependency.stereotype.as_deref() == Some(REQUIRES_STEREOTYPE))
                .count(),
            ..Self::default()
        };
        for class in model.classes().values() {
            for stereotype in class.stereotypes() {
                *stats
                    .classes_by_stereotype
                    .entry(stereotype.as_str().to_owned())
                    .or_default() += 1;
            }
            stats.attributes += class.attributes().len();
            stats.methods += class.methods().len();
            stats.tagged_values += class.tagged_values().len();
            stats.comments += class.comments().len();
        }
        stats
    }
}
