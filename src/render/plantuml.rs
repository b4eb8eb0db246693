// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PlantUML class-diagram text for UML models and parsed feature trees.

use std::collections::HashMap;

use super::RenderOptions;
use crate::model::{Constraint, FeatureNode, Section, Stereotype, UmlClass, UmlModel};

const PREAMBLE: [&str; 5] = [
    "!pragma layout smetana",
    "skinparam backgroundColor #FFFFFF",
    "skinparam classBackgroundColor #FFFFFF",
    "skinparam classBorderColor #4B6CC1",
    "skinparam classAttributeIconSize 0",
];

pub const DEFAULT_FEATURE_TREE_TITLE: &str = "Quantum-UML Architecture";

struct Lines(Vec<String>);

impl Lines {
    fn start(title: &str) -> Self {
        let mut lines = vec!["@startuml".to_owned()];
        lines.extend(PREAMBLE.iter().map(|line| (*line).to_owned()));
        if !title.is_empty() {
            lines.push(format!("title {title}"));
        }
        Self(lines)
    }

    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn finish(mut self) -> String {
        self.0.push("@enduml".to_owned());
        self.0.join("\n")
    }
}

/// Renders a UML model: one block per class, notes for class comments, one arrow per
/// dependency.
pub fn render_uml_model(model: &UmlModel, options: &RenderOptions) -> String {
    let title = options.title.as_deref().unwrap_or(model.name());
    let mut lines = Lines::start(title);
    for comment in model.comments() {
        lines.push(format!("' {comment}"));
    }

    for class in model.classes().values() {
        push_class(&mut lines, class, options);
    }

    if !model.dependencies().is_empty() {
        lines.push("");
    }
    for dependency in model.dependencies() {
        let arrow = format!(
            "{} --> {}",
            class_ref(&dependency.source),
            class_ref(&dependency.target)
        );
        let line = match (&dependency.stereotype, &dependency.label) {
            (Some(stereotype), Some(label)) => format!("{arrow} : <<{stereotype}>> {label}"),
            (Some(text), None) | (None, Some(text)) => format!("{arrow} : {text}"),
            (None, None) => arrow,
        };
        lines.push(line);
    }
    lines.finish()
}

fn push_class(lines: &mut Lines, class: &UmlClass, options: &RenderOptions) {
    let mut header = format!("class {}", class_ref(class.name()));
    for stereotype in class.stereotypes() {
        header.push_str(&format!(" <<{}>>", stereotype.as_str()));
    }
    lines.push(format!("{header} {{"));

    for attribute in class.attributes() {
        lines.push(format!("  {} : {}", attribute.name, attribute.ty));
    }
    for method in class.methods() {
        let parameters: Vec<String> = method
            .parameters
            .iter()
            .map(|parameter| format!("{}: {}", parameter.name, parameter.ty))
            .collect();
        lines.push(format!(
            "  {}({}) : {}",
            method.name,
            parameters.join(", "),
            method.return_type
        ));
    }
    if options.show_tagged_values && !class.tagged_values().is_empty() {
        lines.push("  .. tagged values ..");
        for (key, value) in class.tagged_values() {
            lines.push(format!("  {key} = {value}"));
        }
    }
    lines.push("}");

    if options.show_notes {
        for comment in class.comments() {
            lines.push(format!("note right of {}", class_ref(class.name())));
            lines.push(format!("  {comment}"));
            lines.push("end note");
        }
    }
}

/// Class names that are not plain identifiers are quoted.
fn class_ref(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.');
    if plain {
        name.to_owned()
    } else {
        format!("\"{}\"", name.replace('"', "'"))
    }
}

/// Generates unique class aliases and resolves constraint endpoints back to them.
#[derive(Default)]
struct AliasRegistry {
    used: HashMap<String, usize>,
    by_name: HashMap<String, String>,
    by_key: HashMap<String, String>,
}

impl AliasRegistry {
    fn register(&mut self, name: &str) -> String {
        let base = alias_base(name);
        let counter = self.used.entry(base.clone()).or_insert(0);
        *counter += 1;
        // Bases never contain `_`, so suffixed aliases cannot collide with them.
        let alias = if *counter == 1 {
            base
        } else {
            format!("{base}_{counter}")
        };

        self.by_name
            .entry(name.to_owned())
            .or_insert_with(|| alias.clone());
        self.by_key
            .entry(name_key(name))
            .or_insert_with(|| alias.clone());
        alias
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .or_else(|| self.by_key.get(&name_key(name)))
            .map(String::as_str)
    }
}

/// Title-cased alphanumeric runs, concatenated; `Feature` if none remain.
///
/// A letter is upper-cased when it follows a non-letter and lower-cased otherwise, so
/// `qAOA--solver` becomes `QaoaSolver` and `a1b` becomes `A1B`.
fn alias_base(name: &str) -> String {
    let mut alias = String::with_capacity(name.len());
    let mut after_letter = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            alias.push(if after_letter {
                ch.to_ascii_lowercase()
            } else {
                ch.to_ascii_uppercase()
            });
        }
        after_letter = ch.is_ascii_alphabetic();
    }
    if alias.is_empty() {
        "Feature".to_owned()
    } else {
        alias
    }
}

fn name_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Renders a parsed feature forest directly: every node is a class stereotyped by its
/// section, containment is composition, and constraints are labelled dependencies.
/// Constraints naming unknown features are dropped.
pub fn render_feature_tree(
    forest: &[FeatureNode],
    constraints: &[Constraint],
    options: &RenderOptions,
) -> String {
    let title = options
        .title
        .as_deref()
        .unwrap_or(DEFAULT_FEATURE_TREE_TITLE);
    let mut lines = Lines::start(title);
    let mut relations: Vec<String> = Vec::new();
    let mut aliases = AliasRegistry::default();

    let mut references: Vec<(&FeatureNode, Option<String>)> = Vec::new();
    let mut stack: Vec<(&FeatureNode, Option<String>)> =
        forest.iter().rev().map(|node| (node, None)).collect();
    while let Some((node, parent_alias)) = stack.pop() {
        if node.reference {
            references.push((node, parent_alias));
            continue;
        }
        let alias = push_tree_class(&mut lines, &mut aliases, node);
        if let Some(parent_alias) = parent_alias {
            relations.push(format!("{parent_alias} *-- {alias}"));
        }
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (child, Some(alias.clone()))),
        );
    }

    // References point at a class declared elsewhere; unknown names get their own class.
    for (node, parent_alias) in references {
        let alias = match aliases.resolve(&node.name).map(str::to_owned) {
            Some(alias) => alias,
            None => push_tree_class(&mut lines, &mut aliases, node),
        };
        if let Some(parent_alias) = parent_alias {
            relations.push(format!("{parent_alias} *-- {alias}"));
        }
    }

    for constraint in constraints {
        let (Some(source), Some(target)) = (
            aliases.resolve(&constraint.source),
            aliases.resolve(&constraint.target),
        ) else {
            tracing::debug!(
                source = %constraint.source,
                target = %constraint.target,
                "constraint references an unknown feature"
            );
            continue;
        };
        relations.push(format!(
            "{source} ..> {target} : {}",
            constraint.relation.label()
        ));
    }

    if !relations.is_empty() {
        lines.push("");
        for relation in relations {
            lines.push(relation);
        }
    }
    lines.finish()
}

fn push_tree_class(lines: &mut Lines, aliases: &mut AliasRegistry, node: &FeatureNode) -> String {
    let alias = aliases.register(&node.name);
    let stereotype = match node.section {
        Some(Section::Quality) => Stereotype::QualityAttribute,
        _ => Stereotype::Feature,
    };
    lines.push(format!(
        "class \"{}\" as {alias} <<{}>>",
        node.name.replace('"', "'"),
        stereotype.as_str()
    ));
    alias
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{alias_base, name_key, render_feature_tree, render_uml_model, AliasRegistry};
    use crate::model::{
        Constraint, ConstraintRelation, FeatureNode, GroupKind, Section, Stereotype,
        UmlAttribute, UmlDependency, UmlMethod, UmlModel,
    };
    use crate::render::RenderOptions;

    fn sample_uml() -> UmlModel {
        let mut model = UmlModel::new("Scheduler");
        let class = model.get_or_create_class("Run_Grover");
        class.add_stereotype(Stereotype::Algorithm);
        class.add_attribute(UmlAttribute::new("Depth"));
        class.add_method(UmlMethod::new("execute"));
        class.add_tagged_value("Coherence_Time", "true");
        class.add_comment("actor: Researcher");
        model.add_dependency(UmlDependency {
            source: "Run_Grover".to_owned(),
            target: "Hybrid backend".to_owned(),
            stereotype: Some("requires".to_owned()),
            label: None,
        });
        model
    }

    #[test]
    fn renders_classes_notes_and_dependencies() {
        let text = render_uml_model(&sample_uml(), &RenderOptions::default());
        assert_eq!(
            text,
            "@startuml\n\
             !pragma layout smetana\n\
             skinparam backgroundColor #FFFFFF\n\
             skinparam classBackgroundColor #FFFFFF\n\
             skinparam classBorderColor #4B6CC1\n\
             skinparam classAttributeIconSize 0\n\
             title Scheduler\n\
             class \"Hybrid backend\" {\n\
             }\n\
             class Run_Grover <<Algorithm>> {\n\
             \x20 Depth : String\n\
             \x20 execute() : void\n\
             \x20 .. tagged values ..\n\
             \x20 Coherence_Time = true\n\
             }\n\
             note right of Run_Grover\n\
             \x20 actor: Researcher\n\
             end note\n\
             \n\
             Run_Grover --> \"Hybrid backend\" : requires\n\
             @enduml"
        );
    }

    #[test]
    fn options_hide_tagged_values_and_notes() {
        let options = RenderOptions {
            title: Some("Custom".to_owned()),
            show_tagged_values: false,
            show_notes: false,
        };
        let text = render_uml_model(&sample_uml(), &options);
        assert!(text.contains("title Custom\n"));
        assert!(!text.contains("tagged values"));
        assert!(!text.contains("note right of"));
    }

    #[test]
    fn feature_tree_uses_composition_and_section_stereotypes() {
        let mut root = FeatureNode::new("Functionality");
        root.section = Some(Section::Primary);
        let mut child = FeatureNode::new("Schedule jobs");
        child.section = Some(Section::Primary);
        root.children.push(child);
        let mut quality = FeatureNode::new("Coherence_Time");
        quality.section = Some(Section::Quality);

        let constraints = vec![
            Constraint::new("schedule_jobs", ConstraintRelation::Requires, "Coherence_Time"),
            Constraint::new("Ghost", ConstraintRelation::Excludes, "Coherence_Time"),
        ];
        let text = render_feature_tree(&[root, quality], &constraints, &RenderOptions::default());

        assert!(text.contains("title Quantum-UML Architecture\n"));
        assert!(text.contains("class \"Functionality\" as Functionality <<Feature>>\n"));
        assert!(text.contains("class \"Schedule jobs\" as ScheduleJobs <<Feature>>\n"));
        assert!(text.contains("class \"Coherence_Time\" as CoherenceTime <<QualityAttribute>>\n"));
        assert!(text.contains("\nFunctionality *-- ScheduleJobs\n"));
        assert!(text.contains("\nScheduleJobs ..> CoherenceTime : Requires\n"));
        assert!(!text.contains("Excludes"));
        assert!(text.ends_with("@enduml"));
    }

    #[test]
    fn colliding_aliases_resolve_to_the_right_feature() {
        let nodes = vec![FeatureNode::new("A-1"), FeatureNode::new("A_1"), FeatureNode::new("A12")];
        let constraints = vec![Constraint::new("A_1", ConstraintRelation::Requires, "A-1")];
        let text = render_feature_tree(&nodes, &constraints, &RenderOptions::default());

        assert!(text.contains("class \"A-1\" as A1 <<Feature>>\n"));
        assert!(text.contains("class \"A_1\" as A1_2 <<Feature>>\n"));
        assert!(text.contains("class \"A12\" as A12 <<Feature>>\n"));
        assert!(text.contains("A1_2 ..> A1 : Requires"));
    }

    #[test]
    fn references_link_to_the_declared_class() {
        let mut schedule = FeatureNode::new("Schedule_jobs");
        for name in ["Run_Grover", "Job_database"] {
            let mut member = FeatureNode::new(name);
            member.group = Some(GroupKind::Or);
            member.reference = true;
            schedule.children.push(member);
        }
        let forest = vec![schedule, FeatureNode::new("Run_Grover")];
        let text = render_feature_tree(&forest, &[], &RenderOptions::default());

        assert_eq!(text.matches("as RunGrover ").count(), 1);
        assert!(text.contains("class \"Job_database\" as JobDatabase <<Feature>>\n"));
        assert!(text.contains("ScheduleJobs *-- RunGrover\n"));
        assert!(text.contains("ScheduleJobs *-- JobDatabase\n"));
    }

    #[test]
    fn registry_numbers_repeated_bases() {
        let mut registry = AliasRegistry::default();
        assert_eq!(registry.register("Node"), "Node");
        assert_eq!(registry.register("node"), "Node_2");
        assert_eq!(registry.register("node "), "Node_3");
        assert_eq!(registry.register("Node2"), "Node2");
        assert_eq!(registry.resolve("node"), Some("Node_2"));
        assert_eq!(registry.resolve("NODE"), Some("Node"));
        assert_eq!(registry.resolve("missing"), None);
    }

    #[rstest]
    #[case("schedule jobs", "ScheduleJobs")]
    #[case("Run_Grover_search", "RunGroverSearch")]
    #[case("qAOA--solver", "QaoaSolver")]
    #[case("Quantum_HW_constraint", "QuantumHwConstraint")]
    #[case("a1b", "A1B")]
    #[case("¿?", "Feature")]
    fn alias_base_title_cases_alphanumeric_runs(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(alias_base(name), expected);
    }

    #[test]
    fn name_key_ignores_case_and_punctuation() {
        assert_eq!(name_key("A-1"), name_key("a_1"));
        assert_eq!(name_key("Schedule jobs"), "schedulejobs");
    }
}
