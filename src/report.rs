// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Coverage ratios and semantic-loss estimates built from [`crate::metrics`] counts.

use serde::{Deserialize, Serialize};

use crate::metrics::{FeatureModelStats, GraphStats, UmlStats};

/// `numerator / denominator` as a percentage capped at 100; `None` without a positive
/// denominator.
pub fn percentage(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some((numerator as f64 / denominator as f64 * 100.0).min(100.0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CimToPimReport {
    pub transformation_time_ms: f64,
    pub graph: GraphStats,
    pub feature_model: FeatureModelStats,
    pub goals_converted_percent: Option<f64>,
    pub semantic_loss_percent: Option<f64>,
}

impl CimToPimReport {
    pub fn new(graph: GraphStats, feature_model: FeatureModelStats, transformation_time_ms: f64) -> Self {
        let goals_converted_percent =
            percentage(feature_model.features, graph.goals + graph.softgoals);
        let source_elements = graph.goals + graph.softgoals + graph.tasks + graph.resources;
        let semantic_loss_percent = percentage(
            feature_model.features + feature_model.valid_constraints,
            source_elements,
        )
        .map(|coverage| (100.0 - coverage).max(0.0));

        Self {
            transformation_time_ms,
            graph,
            feature_model,
            goals_converted_percent,
            semantic_loss_percent,
        }
    }

    /// Counts a later PIM→PSM run can be measured against.
    pub fn context(&self) -> ContextMetrics {
        ContextMetrics {
            features_count: Some(self.feature_model.features),
            tasks_count: Some(self.graph.tasks),
            resources_count: Some(self.graph.resources),
        }
    }
}

/// Counts carried over from the CIM→PIM stage, e.g. by an HTTP client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextMetrics {
    #[serde(alias = "features_count")]
    pub features_count: Option<usize>,
    #[serde(alias = "tasks_count")]
    pub tasks_count: Option<usize>,
    #[serde(alias = "resources_count")]
    pub resources_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureReport {
    pub transformation_time_ms: f64,
    pub uml: UmlStats,
    pub features_to_classes_percent: Option<f64>,
    pub tasks_to_methods_percent: Option<f64>,
    pub resources_to_attributes_percent: Option<f64>,
    pub semantic_loss_percent: Option<f64>,
}

impl ArchitectureReport {
    /// `features` is the PIM feature count, used when `context` does not provide one.
    pub fn new(
        uml: UmlStats,
        features: usize,
        context: ContextMetrics,
        transformation_time_ms: f64,
    ) -> Self {
        let features_to_classes_percent =
            percentage(uml.classes, context.features_count.unwrap_or(features));
        let tasks_to_methods_percent = context
            .tasks_count
            .and_then(|tasks| percentage(uml.methods, tasks));
        let resources_to_attributes_percent = context
            .resources_count
            .and_then(|resources| percentage(uml.attributes, resources));

        let coverages: Vec<f64> = [
            features_to_classes_percent,
            tasks_to_methods_percent,
            resources_to_attributes_percent,
        ]
        .into_iter()
        .flatten()
        .collect();
        let semantic_loss_percent = (!coverages.is_empty()).then(|| {
            let average = coverages.iter().sum::<f64>() / coverages.len() as f64;
            (100.0 - average).max(0.0)
        });

        Self {
            transformation_time_ms,
            uml,
            features_to_classes_percent,
            tasks_to_methods_percent,
            resources_to_attributes_percent,
            semantic_loss_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{percentage, ArchitectureReport, CimToPimReport, ContextMetrics};
    use crate::metrics::{FeatureModelStats, GraphStats, UmlStats};

    #[rstest]
    #[case(1, 4, Some(25.0))]
    #[case(9, 3, Some(100.0))]
    #[case(0, 5, Some(0.0))]
    #[case(3, 0, None)]
    fn percentage_is_capped_and_needs_a_denominator(
        #[case] numerator: usize,
        #[case] denominator: usize,
        #[case] expected: Option<f64>,
    ) {
        assert_eq!(percentage(numerator, denominator), expected);
    }

    #[test]
    fn cim_to_pim_report_measures_goal_conversion_and_loss() {
        let graph = GraphStats {
            goals: 3,
            softgoals: 1,
            tasks: 4,
            resources: 2,
            ..GraphStats::default()
        };
        let model = FeatureModelStats {
            features: 5,
            valid_constraints: 2,
            ..FeatureModelStats::default()
        };
        let report = CimToPimReport::new(graph, model, 1.5);
        assert_eq!(report.goals_converted_percent, Some(100.0));
        assert_eq!(report.semantic_loss_percent, Some(30.0));
        assert_eq!(report.context().tasks_count, Some(4));
    }

    #[test]
    fn empty_graph_has_no_ratios() {
        let report =
            CimToPimReport::new(GraphStats::default(), FeatureModelStats::default(), 0.0);
        assert_eq!(report.goals_converted_percent, None);
        assert_eq!(report.semantic_loss_percent, None);
    }

    #[test]
    fn architecture_loss_averages_available_coverages() {
        let uml = UmlStats {
            classes: 2,
            methods: 1,
            ..UmlStats::default()
        };
        let context = ContextMetrics {
            features_count: Some(4),
            tasks_count: Some(2),
            resources_count: None,
        };
        let report = ArchitectureReport::new(uml.clone(), 10, context, 2.0);
        assert_eq!(report.features_to_classes_percent, Some(50.0));
        assert_eq!(report.tasks_to_methods_percent, Some(50.0));
        assert_eq!(report.resources_to_attributes_percent, None);
        assert_eq!(report.semantic_loss_percent, Some(50.0));

        let fallback = ArchitectureReport::new(uml, 8, ContextMetrics::default(), 2.0);
        assert_eq!(fallback.features_to_classes_percent, Some(25.0));
        assert_eq!(fallback.semantic_loss_percent, Some(75.0));
    }

    #[test]
    fn context_accepts_snake_and_camel_case() {
        let snake: ContextMetrics = serde_json::from_str(r#"{"features_count": 3}"#).unwrap();
        let camel: ContextMetrics = serde_json::from_str(r#"{"tasksCount": 2}"#).unwrap();
        assert_eq!(snake.features_count, Some(3));
        assert_eq!(camel.tasks_count, Some(2));
    }
}
