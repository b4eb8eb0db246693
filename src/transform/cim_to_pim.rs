// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! CIM→PIM: i* graph to feature model.
//!
//! Rules run in a fixed order (R1..R5); later rules read the side tables filled by
//! earlier ones. Elements missing an endpoint or label are skipped, never fatal.

use std::collections::HashMap;

use super::keywords::KeywordTable;
use crate::format::label::feature_name;
use crate::model::{
    Category, Feature, FeatureKind, FeatureModel, Graph, Implication, LinkKind, Node, NodeKind,
    RefinementKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContributionStrength {
    Make,
    Help,
    Hurt,
    Break,
}

impl ContributionStrength {
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "++" => return Some(Self::Make),
            "+" => return Some(Self::Help),
            "--" => return Some(Self::Break),
            "-" => return Some(Self::Hurt),
            _ => {}
        }
        [
            ("make", Self::Make),
            ("help", Self::Help),
            ("hurt", Self::Hurt),
            ("break", Self::Break),
        ]
        .into_iter()
        .find(|(word, _)| value.contains(word))
        .map(|(_, strength)| strength)
    }

    fn is_positive(self) -> bool {
        matches!(self, Self::Make | Self::Help)
    }
}

/// Stateless CIM→PIM transformer; every call builds a fresh [`FeatureModel`].
#[derive(Debug, Clone, Copy)]
pub struct CimToPim<'a> {
    keywords: &'a KeywordTable,
}

impl<'a> CimToPim<'a> {
    pub fn new(keywords: &'a KeywordTable) -> Self {
        Self { keywords }
    }

    pub fn transform(&self, graph: &Graph, namespace: &str) -> FeatureModel {
        let mut run = RuleRun::new(graph, self.keywords, FeatureModel::new(namespace));
        run.apply_r1_actor_metadata();
        run.apply_r2_goal_task_features();
        run.apply_r3_softgoal_attributes();
        run.apply_r4_social_dependencies();
        run.apply_r5_internal_links();

        tracing::info!(
            features = run.model.features().len(),
            constraints = run.model.constraints().len(),
            or_groups = run.model.or_groups().len(),
            "cim→pim transformation complete"
        );
        run.model
    }
}

struct RuleRun<'g> {
    graph: &'g Graph,
    keywords: &'g KeywordTable,
    model: FeatureModel,
    nodes_by_id: HashMap<&'g str, &'g Node>,
    actor_labels: HashMap<&'g str, &'g str>,
    node_features: HashMap<&'g str, (String, Category)>,
}

impl<'g> RuleRun<'g> {
    fn new(graph: &'g Graph, keywords: &'g KeywordTable, mut model: FeatureModel) -> Self {
        model.clear();
        let nodes_by_id = graph.nodes().iter().map(|node| (node.id(), node)).collect();
        Self {
            graph,
            keywords,
            model,
            nodes_by_id,
            actor_labels: HashMap::new(),
            node_features: HashMap::new(),
        }
    }

    /// R1: actor-class nodes feed the id→label lookup; actors and resources are recorded
    /// as model metadata.
    fn apply_r1_actor_metadata(&mut self) {
        for node in self.graph.nodes() {
            if node.label().is_empty() {
                continue;
            }
            if node.kind().is_actor_class() {
                self.actor_labels.insert(node.id(), node.label());
                self.model
                    .add_metadata(format!("actor: {} ({})", node.label(), node.kind()));
            } else if *node.kind() == NodeKind::Resource {
                self.model.add_metadata(format!("resource: {}", node.label()));
            }
        }
    }

    /// R2: labeled goals and tasks become features, categorised by keyword.
    fn apply_r2_goal_task_features(&mut self) {
        for node in self.graph.nodes() {
            let kind = match node.kind() {
                NodeKind::Goal => FeatureKind::Goal,
                NodeKind::Task => FeatureKind::Task,
                _ => continue,
            };
            let name = feature_name(node.label());
            if name.is_empty() {
                tracing::debug!(id = node.id(), "skipping goal/task without usable label");
                continue;
            }

            let category = self.keywords.classify(node.label());
            let mut feature = Feature::new(name.clone(), category).with_kind(kind);
            if let Some(actor) = self.owning_actor(node) {
                feature.add_comment(format!("actor: {actor}"));
            }
            self.model.add_feature(feature);
            self.node_features.insert(node.id(), (name, category));
        }
    }

    /// R3: a qualification link from a softgoal marks the qualified feature with a
    /// boolean attribute named after the softgoal.
    fn apply_r3_softgoal_attributes(&mut self) {
        for link in self.graph.internal_links() {
            if link.kind != LinkKind::QualificationLink {
                continue;
            }
            let (Some(source), Some(target)) = (self.node(&link.source), self.node(&link.target))
            else {
                continue;
            };
            let (softgoal, qualified) = match (
                *source.kind() == NodeKind::Softgoal,
                *target.kind() == NodeKind::Softgoal,
            ) {
                (true, false) => (source, target),
                (false, true) => (target, source),
                _ => continue,
            };

            let attribute = feature_name(softgoal.label());
            if attribute.is_empty() {
                continue;
            }
            let Some((name, category)) = self.node_features.get(qualified.id()) else {
                continue;
            };
            if let Some(feature) = self.model.feature_mut(name, *category) {
                feature.attributes.insert(attribute, "true");
            }
        }
    }

    /// R4: every social dependency adds `source => target`.
    fn apply_r4_social_dependencies(&mut self) {
        for dependency in self.graph.social_dependencies() {
            let (Some(source), Some(target)) = (
                self.node_name(&dependency.source),
                self.node_name(&dependency.target),
            ) else {
                continue;
            };
            self.model.add_constraint(Implication::new(source, target));
        }
    }

    /// R5: needed-by/qualification, contribution and refinement links.
    fn apply_r5_internal_links(&mut self) {
        for link in self.graph.internal_links() {
            let (Some(source), Some(target)) =
                (self.node_name(&link.source), self.node_name(&link.target))
            else {
                continue;
            };

            match link.kind {
                LinkKind::NeededBy | LinkKind::QualificationLink => {
                    self.model.add_constraint(Implication::new(target, source));
                }
                LinkKind::Contribution => {
                    if !link.value.is_empty() {
                        self.model
                            .add_contribution(format!("{source} {} {target}", link.value));
                    }
                    match ContributionStrength::parse(&link.value) {
                        Some(strength) if strength.is_positive() => {
                            self.model.add_constraint(Implication::new(source, target));
                        }
                        Some(_) => {
                            self.model.add_constraint(Implication::negated(source, target));
                        }
                        None => {}
                    }
                }
                LinkKind::Refinement(RefinementKind::And) => {
                    self.model.add_constraint(Implication::new(source, target));
                }
                LinkKind::Refinement(RefinementKind::Or) => {
                    self.model.add_or_child(target, source);
                }
            }
        }
    }

    fn node(&self, id: &str) -> Option<&'g Node> {
        self.nodes_by_id.get(id).copied()
    }

    fn node_name(&self, id: &str) -> Option<String> {
        let name = feature_name(self.node(id)?.label());
        (!name.is_empty()).then_some(name)
    }

    /// Walks the container chain up to the first actor-class node.
    fn owning_actor(&self, node: &Node) -> Option<&'g str> {
        let mut current = node.parent();
        for _ in 0..self.nodes_by_id.len() {
            let parent_id = current?;
            if let Some(label) = self.actor_labels.get(parent_id) {
                return Some(*label);
            }
            current = self.node(parent_id)?.parent();
        }
        None
    }
}
