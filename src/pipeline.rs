// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end orchestration of the transformation stages.
//!
//! A [`Pipeline`] holds only configuration; every call builds fresh models, so one
//! pipeline can serve concurrent requests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::format::mxgraph::{extract_graph, ExtractError};
use crate::format::uvl::{
    parse_constraints, parse_feature_tree, parse_namespace, serialize_feature_model,
    FeatureTextError,
};
use crate::metrics::{FeatureModelStats, FeatureTreeStats, GraphStats, UmlStats};
use crate::model::{ConstraintRelation, FeatureModel, Graph, UmlModel};
use crate::render::{
    encode_diagram, render_feature_tree, render_uml_model, viewer_url, EncodeError,
};
use crate::report::{ArchitectureReport, CimToPimReport, ContextMetrics};
use crate::store::{read_source, write_artifact, StoreError, WriteDurability};
use crate::transform::{CimToPim, KeywordTable, PimToPsm};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("extract stage rejected the diagram: {0}")]
    Extract(#[from] ExtractError),
    #[error("feature model stage rejected the text: {0}")]
    FeatureText(#[from] FeatureTextError),
    #[error("encode stage failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("store stage failed: {0}")]
    Store(#[from] StoreError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Extract(_) => "extract",
            Self::FeatureText(_) => "feature-model",
            Self::Encode(_) => "encode",
            Self::Store(_) => "store",
        }
    }
}

/// Which diagram the PIM→PSM stage renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramView {
    /// UML classes produced by the PIM→PSM rules.
    #[default]
    Architecture,
    /// The parsed feature tree drawn directly.
    FeatureTree,
}

impl DiagramView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::FeatureTree => "feature-tree",
        }
    }
}

impl fmt::Display for DiagramView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagram view `{0}` (expected architecture or feature-tree)")]
pub struct ParseDiagramViewError(String);

impl FromStr for DiagramView {
    type Err = ParseDiagramViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "architecture" | "uml" => Ok(Self::Architecture),
            "feature-tree" | "features" => Ok(Self::FeatureTree),
            _ => Err(ParseDiagramViewError(value.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CimToPimOutput {
    pub graph: Graph,
    pub feature_model: FeatureModel,
    pub text: String,
    pub report: CimToPimReport,
}

#[derive(Debug, Clone)]
pub struct PimToPsmOutput {
    pub view: DiagramView,
    /// Present for [`DiagramView::Architecture`].
    pub uml: Option<UmlModel>,
    pub diagram: String,
    pub encoded_diagram: String,
    pub diagram_url: String,
    pub report: ArchitectureReport,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub cim_to_pim: CimToPimOutput,
    pub pim_to_psm: PimToPsmOutput,
}

/// Paths written by [`Pipeline::run_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    pub feature_model: PathBuf,
    pub diagram: PathBuf,
    pub url: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    keywords: KeywordTable,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let keywords = config.keyword_table();
        Self { config, keywords }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extracts the normalized graph from draw.io XML.
    pub fn extract(&self, xml: &str) -> Result<Graph, PipelineError> {
        let graph = extract_graph(xml)?;
        tracing::debug!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            links = graph.internal_links().len(),
            "graph extracted"
        );
        Ok(graph)
    }

    /// Extracts the graph, applies the CIM→PIM rules and serializes the feature model.
    #[tracing::instrument(skip_all, fields(bytes = xml.len()))]
    pub fn cim_to_pim(&self, xml: &str) -> Result<CimToPimOutput, PipelineError> {
        let started = Instant::now();
        let graph = self.extract(xml)?;
        let feature_model =
            CimToPim::new(&self.keywords).transform(&graph, &self.config.namespace);
        let text = serialize_feature_model(&feature_model);
        let report = CimToPimReport::new(
            GraphStats::of(&graph),
            FeatureModelStats::of(&feature_model),
            elapsed_ms(started),
        );
        Ok(CimToPimOutput {
            graph,
            feature_model,
            text,
            report,
        })
    }

    /// Parses feature-model text and renders the requested diagram plus its viewer URL.
    #[tracing::instrument(skip_all, fields(bytes = text.len(), view = %view))]
    pub fn pim_to_psm(
        &self,
        text: &str,
        view: DiagramView,
        context: ContextMetrics,
    ) -> Result<PimToPsmOutput, PipelineError> {
        let started = Instant::now();
        let forest = parse_feature_tree(text)?;
        let constraints = parse_constraints(text)?;
        let namespace = parse_namespace(text).unwrap_or_else(|| self.config.namespace.clone());
        let feature_model = FeatureModel::from_feature_tree(&namespace, &forest, &constraints);

        let options = self.config.render_options();
        let (uml, diagram, stats) = match view {
            DiagramView::Architecture => {
                let uml = PimToPsm::new().transform(&feature_model);
                let diagram = render_uml_model(&uml, &options);
                let stats = UmlStats::of(&uml);
                (Some(uml), diagram, stats)
            }
            DiagramView::FeatureTree => {
                let diagram = render_feature_tree(&forest, &constraints, &options);
                let tree = FeatureTreeStats::of(&forest, &constraints);
                let stats = UmlStats {
                    classes: tree.nodes,
                    dependencies: tree.constraints,
                    requires_dependencies: constraints
                        .iter()
                        .filter(|constraint| constraint.relation == ConstraintRelation::Requires)
                        .count(),
                    ..UmlStats::default()
                };
                (None, diagram, stats)
            }
        };

        let encoded_diagram = encode_diagram(&diagram)?;
        let url = viewer_url(
            &self.config.renderer_base_url,
            self.config.output_format,
            &encoded_diagram,
        );
        let report = ArchitectureReport::new(
            stats,
            feature_model.features().len(),
            context,
            elapsed_ms(started),
        );
        tracing::info!(
            view = %view,
            classes = report.uml.classes,
            encoded_len = encoded_diagram.len(),
            "diagram rendered"
        );

        Ok(PimToPsmOutput {
            view,
            uml,
            diagram,
            encoded_diagram,
            diagram_url: url,
            report,
        })
    }

    /// Runs both stages; the feature model crosses the text boundary in between.
    pub fn run(&self, xml: &str, view: DiagramView) -> Result<RunOutput, PipelineError> {
        let cim_to_pim = self.cim_to_pim(xml)?;
        let pim_to_psm = self.pim_to_psm(&cim_to_pim.text, view, cim_to_pim.report.context())?;
        Ok(RunOutput {
            cim_to_pim,
            pim_to_psm,
        })
    }

    /// Runs the pipeline on `input` and writes `<stem>.uvl`, `<stem>.puml` and
    /// `<stem>.url` into `output_dir`.
    pub fn run_file(
        &self,
        input: &Path,
        output_dir: &Path,
        view: DiagramView,
        durability: WriteDurability,
    ) -> Result<RunArtifacts, PipelineError> {
        let xml = read_source(input)?;
        let output = self.run(&xml, view)?;

        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "diagram".to_owned());
        let artifacts = RunArtifacts {
            feature_model: output_dir.join(format!("{stem}.uvl")),
            diagram: output_dir.join(format!("{stem}.puml")),
            url: output_dir.join(format!("{stem}.url")),
        };
        write_artifact(&artifacts.feature_model, &output.cim_to_pim.text, durability)?;
        write_artifact(&artifacts.diagram, &output.pim_to_psm.diagram, durability)?;
        write_artifact(
            &artifacts.url,
            &format!("{}\n", output.pim_to_psm.diagram_url),
            durability,
        )?;
        tracing::info!(input = %input.display(), "artifacts written");
        Ok(artifacts)
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DiagramView, Pipeline, PipelineError};
    use crate::config::PipelineConfig;
    use crate::model::fixtures::QUANTUM_SCHEDULER_XML;
    use crate::report::ContextMetrics;
    use crate::store::WriteDurability;

    #[test]
    fn run_produces_feature_text_diagram_and_url() {
        let pipeline = Pipeline::default();
        let output = pipeline
            .run(QUANTUM_SCHEDULER_XML, DiagramView::Architecture)
            .unwrap();

        assert!(output.cim_to_pim.text.starts_with("namespace HQC_MDD\n"));
        let diagram = &output.pim_to_psm.diagram;
        assert!(diagram.starts_with("@startuml\n"));
        assert!(diagram.contains("class Run_Grover_search <<Algorithm>> {"));
        assert!(diagram.contains("class Integrate_hybrid_backend <<QuantumDriver>> {"));
        assert!(diagram.contains("  Respect_coherence_time = true"));
        assert!(diagram.contains("Write_Qiskit_program --> Run_Grover_search : requires"));
        assert_eq!(
            output.pim_to_psm.diagram_url,
            format!(
                "https://www.plantuml.com/plantuml/svg/{}",
                output.pim_to_psm.encoded_diagram
            )
        );
        assert_eq!(output.pim_to_psm.report.tasks_to_methods_percent, Some(50.0));
    }

    #[test]
    fn feature_tree_view_draws_the_parsed_forest() {
        let pipeline = Pipeline::default();
        let output = pipeline
            .run(QUANTUM_SCHEDULER_XML, DiagramView::FeatureTree)
            .unwrap();

        let diagram = &output.pim_to_psm.diagram;
        assert!(output.pim_to_psm.uml.is_none());
        assert!(diagram.contains("title Quantum-UML Architecture"));
        assert!(diagram.contains(
            "class \"Respect_coherence_time\" as RespectCoherenceTime <<QualityAttribute>>"
        ));
        assert!(diagram.contains("ScheduleJobs *-- QueueJobFast"));
        assert!(diagram.contains("IntegrateHybridBackend ..> RespectCoherenceTime : Excludes"));
    }

    #[rstest]
    #[case("")]
    #[case("  \n ")]
    fn empty_feature_text_is_rejected_by_the_feature_model_stage(#[case] text: &str) {
        let err = Pipeline::default()
            .pim_to_psm(text, DiagramView::Architecture, ContextMetrics::default())
            .unwrap_err();
        assert_eq!(err.stage(), "feature-model");
        assert!(err.to_string().starts_with("feature model stage"));
    }

    #[test]
    fn malformed_xml_is_rejected_by_the_extract_stage() {
        let err = Pipeline::default().cim_to_pim("<mxfile><diagram>").unwrap_err();
        assert!(matches!(err, PipelineError::Extract(_)));
        assert_eq!(err.stage(), "extract");
    }

    #[test]
    fn configured_namespace_and_format_are_used() {
        let config = PipelineConfig {
            namespace: "Lab".to_owned(),
            output_format: "png".parse().unwrap(),
            renderer_base_url: "http://localhost:8080/plantuml/".to_owned(),
            ..PipelineConfig::default()
        };
        let output = Pipeline::new(config)
            .run(QUANTUM_SCHEDULER_XML, DiagramView::Architecture)
            .unwrap();
        assert!(output.cim_to_pim.text.starts_with("namespace Lab\n"));
        assert!(output.pim_to_psm.diagram.contains("title Lab\n"));
        assert!(output
            .pim_to_psm
            .diagram_url
            .starts_with("http://localhost:8080/plantuml/png/"));
    }

    #[test]
    fn run_file_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scheduler.drawio");
        std::fs::write(&input, QUANTUM_SCHEDULER_XML).unwrap();

        let artifacts = Pipeline::default()
            .run_file(
                &input,
                &dir.path().join("out"),
                DiagramView::Architecture,
                WriteDurability::BestEffort,
            )
            .unwrap();

        let uvl = std::fs::read_to_string(&artifacts.feature_model).unwrap();
        assert!(uvl.contains("Run_Grover_search requires Integrate_hybrid_backend"));
        assert!(artifacts.diagram.ends_with("scheduler.puml"));
        assert!(std::fs::read_to_string(&artifacts.url)
            .unwrap()
            .starts_with("https://"));
    }

    #[rstest]
    #[case("architecture", DiagramView::Architecture)]
    #[case("Feature-Tree", DiagramView::FeatureTree)]
    fn diagram_view_parses(#[case] value: &str, #[case] expected: DiagramView) {
        assert_eq!(value.parse::<DiagramView>().unwrap(), expected);
    }
}
