// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use base64::Engine;
use hqc_mdd::format::mxgraph::extract_graph;
use hqc_mdd::format::uvl::{parse_constraints, parse_feature_tree, serialize_feature_model};
use hqc_mdd::model::{Category, FeatureModel, Stereotype};
use hqc_mdd::render::encode::PLANTUML_ENGINE;
use hqc_mdd::store::WriteDurability;
use hqc_mdd::transform::{CimToPim, KeywordTable, PimToPsm};
use hqc_mdd::{DiagramView, Pipeline, PipelineConfig};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn decode_viewer_payload(encoded: &str) -> String {
    let compressed = PLANTUML_ENGINE
        .decode(encoded)
        .expect("payload uses the viewer alphabet");
    let mut text = String::new();
    flate2::read::DeflateDecoder::new(compressed.as_slice())
        .read_to_string(&mut text)
        .expect("payload is raw deflate");
    text
}

#[test]
fn scheduler_diagram_runs_end_to_end() {
    let output = Pipeline::default()
        .run(&read_fixture("quantum_scheduler.drawio"), DiagramView::Architecture)
        .expect("pipeline run");

    let text = &output.cim_to_pim.text;
    assert!(text.contains("// actor: Researcher (actor)"));
    assert!(text.contains("    primary {"));
    assert!(text.contains("    quality {"));
    assert!(text.contains("Integrate_hybrid_backend excludes Respect_coherence_time"));
    assert!(text.contains("// contribution: Queue_job_batch help High_performance"));

    let psm = &output.pim_to_psm;
    let uml = psm.uml.as_ref().expect("architecture view keeps the UML model");
    let scheduler = uml.class("Schedule_jobs").expect("functionality class");
    assert!(scheduler.stereotypes().is_empty());
    assert!(uml
        .class("Run_Grover_search")
        .expect("algorithm class")
        .stereotypes()
        .contains(&Stereotype::Algorithm));
    assert_eq!(decode_viewer_payload(&psm.encoded_diagram), psm.diagram);
}

#[test]
fn compressed_payload_is_extracted_like_plain_xml() {
    let xml = read_fixture("compressed_chemistry.drawio");
    let graph = extract_graph(&xml).expect("compressed diagram decodes");
    assert_eq!(graph.nodes().len(), 4);
    assert_eq!(graph.internal_links().len(), 2);

    let output = Pipeline::default()
        .run(&xml, DiagramView::Architecture)
        .expect("pipeline run");
    let text = &output.cim_to_pim.text;
    assert!(text.contains("// actor: Chemist (role)"));
    assert!(text.contains("Transpile_circuit requires Simulate_molecule"));
    assert!(text.contains("Transpile_circuit requires Minimize_qubit_count"));

    let diagram = &output.pim_to_psm.diagram;
    assert!(diagram.contains("class Simulate_molecule <<Algorithm>> {"));
    assert!(diagram.contains("  Minimize_qubit_count = true"));
    assert!(diagram.contains("Transpile_circuit --> Simulate_molecule : requires"));
}

#[test]
fn bare_graph_model_root_is_accepted() {
    let output = Pipeline::default()
        .run(&read_fixture("bare_model.xml"), DiagramView::Architecture)
        .expect("pipeline run");
    let model = &output.cim_to_pim.feature_model;
    assert_eq!(model.features().len(), 2);
    assert!(model.feature("Send_reminder", Category::Functionality).is_some());
    assert_eq!(
        model.constraints()[0].to_string(),
        "Book_appointment => Send_reminder"
    );
    assert!(output
        .pim_to_psm
        .diagram
        .contains("Book_appointment --> Send_reminder : requires"));
}

#[test]
fn feature_text_survives_a_parse_and_rewrite() {
    let keywords = KeywordTable::builtin();
    let graph = extract_graph(&read_fixture("quantum_scheduler.drawio")).expect("extract");
    let model = CimToPim::new(&keywords).transform(&graph, "Sched");
    let text = serialize_feature_model(&model);

    let forest = parse_feature_tree(&text).expect("parse");
    let constraints = parse_constraints(&text).expect("constraints");
    let lifted = FeatureModel::from_feature_tree("Sched", &forest, &constraints);

    let mut names: Vec<&str> = model.features().iter().map(|f| f.name.as_str()).collect();
    let mut lifted_names: Vec<&str> = lifted.features().iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();
    lifted_names.sort_unstable();
    assert_eq!(names, lifted_names);
    assert_eq!(lifted.or_groups(), model.or_groups());
    assert_eq!(
        lifted.constraints().len(),
        model.valid_constraints().count()
    );

    let uml = PimToPsm::new().transform(&lifted);
    assert!(uml.class("Queue_job_fast").is_some());
}

#[test]
fn run_file_persists_artifacts_per_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = Pipeline::new(PipelineConfig {
        namespace: "Batch".to_owned(),
        ..PipelineConfig::default()
    });

    for name in ["quantum_scheduler.drawio", "bare_model.xml"] {
        let artifacts = pipeline
            .run_file(
                &fixtures_dir().join(name),
                dir.path(),
                DiagramView::FeatureTree,
                WriteDurability::Durable,
            )
            .expect("run_file");
        let uvl = fs::read_to_string(&artifacts.feature_model).expect("uvl written");
        assert!(uvl.starts_with("namespace Batch\n"));
        let puml = fs::read_to_string(&artifacts.diagram).expect("puml written");
        assert!(puml.ends_with("@enduml"));
    }
}

#[test]
fn missing_input_is_a_store_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Pipeline::default()
        .run_file(
            &dir.path().join("absent.drawio"),
            dir.path(),
            DiagramView::Architecture,
            WriteDurability::BestEffort,
        )
        .unwrap_err();
    assert_eq!(err.stage(), "store");
}
