// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};

use crate::format::label::title_case_words;
use crate::model::{Category, Feature, FeatureModel, Section};

const INDENT: &str = "    ";

const KEYWORDS: [&str; 9] = [
    "namespace",
    "features",
    "constraints",
    "primary",
    "quality",
    "or",
    "alternative",
    "optional",
    "mandatory",
];

/// Serializes `model` to the feature-model text format.
///
/// Categories are grouped into `primary`/`quality` sections in fixed order; empty
/// categories are omitted. Only constraints whose endpoints are known, distinct features
/// are written.
pub fn serialize_feature_model(model: &FeatureModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("namespace {}\n", model.namespace()));
    for line in model.metadata() {
        out.push_str(&format!("// {line}\n"));
    }

    out.push_str("features {\n");
    for section in [Section::Primary, Section::Quality] {
        let categories: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|category| category.section() == section)
            .filter(|category| model.features_in(*category).next().is_some())
            .collect();
        if categories.is_empty() {
            continue;
        }
        push_line(&mut out, 1, &format!("{} {{", section.as_str()));
        for category in categories {
            push_line(&mut out, 2, &format!("{} {{", category.as_str()));
            write_category(&mut out, model, category, 3);
            push_line(&mut out, 2, "}");
        }
        push_line(&mut out, 1, "}");
    }
    out.push_str("}\n");

    out.push_str("constraints {\n");
    let mut written = 0usize;
    for constraint in model.valid_constraints() {
        written += 1;
        let relation = if constraint.negated {
            "excludes"
        } else {
            "requires"
        };
        push_line(
            &mut out,
            1,
            &format!(
                "{} {relation} {}",
                constraint.antecedent, constraint.consequent
            ),
        );
    }
    out.push_str("}\n");
    let dropped = model.constraints().len() - written;
    if dropped > 0 {
        tracing::debug!(dropped, "skipping self-implying or dangling constraints");
    }

    for annotation in model.contributions() {
        out.push_str(&format!("// contribution: {annotation}\n"));
    }
    out
}

enum Emit<'a> {
    Feature(&'a Feature, usize),
    Bare(&'a str, usize),
    Close(usize),
}

fn write_category(out: &mut String, model: &FeatureModel, category: Category, depth: usize) {
    let features: Vec<&Feature> = model.features_in(category).collect();
    let by_name: HashMap<&str, &Feature> = features
        .iter()
        .map(|feature| (feature.name.as_str(), *feature))
        .collect();

    // OR children whose parent is emitted in this category are written inside the
    // parent's `or` block instead of at the top level.
    let nested: HashSet<&str> = model
        .or_groups()
        .iter()
        .filter(|(parent, _)| by_name.contains_key(parent.as_str()))
        .flat_map(|(parent, children)| {
            children
                .iter()
                .map(String::as_str)
                .filter(move |child| *child != parent.as_str())
        })
        .filter(|child| by_name.contains_key(child))
        .collect();

    let mut emitted: HashSet<&str> = HashSet::new();
    for &feature in &features {
        if !nested.contains(feature.name.as_str()) {
            write_feature(out, model, &by_name, &mut emitted, feature, depth);
        }
    }
    // Cyclic OR groups can suppress every member; those still get written once.
    for &feature in &features {
        if !emitted.contains(feature.name.as_str()) {
            write_feature(out, model, &by_name, &mut emitted, feature, depth);
        }
    }
}

fn write_feature<'a>(
    out: &mut String,
    model: &'a FeatureModel,
    by_name: &HashMap<&'a str, &'a Feature>,
    emitted: &mut HashSet<&'a str>,
    root: &'a Feature,
    depth: usize,
) {
    let mut stack = vec![Emit::Feature(root, depth)];
    while let Some(step) = stack.pop() {
        match step {
            Emit::Feature(feature, depth) => {
                if !emitted.insert(feature.name.as_str()) {
                    continue;
                }
                let header = feature_header(feature);
                let children = model
                    .or_groups()
                    .get(&feature.name)
                    .filter(|children| !children.is_empty());
                let Some(children) = children else {
                    push_line(out, depth, &header);
                    continue;
                };

                push_line(out, depth, &format!("{header} {{"));
                push_line(out, depth + 1, "or {");
                stack.push(Emit::Close(depth));
                stack.push(Emit::Close(depth + 1));
                for child in children.iter().rev() {
                    match by_name.get(child.as_str()) {
                        Some(&child_feature) => {
                            if !emitted.contains(child.as_str()) {
                                stack.push(Emit::Feature(child_feature, depth + 2));
                            }
                        }
                        None => stack.push(Emit::Bare(child, depth + 2)),
                    }
                }
            }
            Emit::Bare(name, depth) => {
                push_line(out, depth, &format!("{} {{ref}}", name_token(name)))
            }
            Emit::Close(depth) => push_line(out, depth, "}"),
        }
    }
}

fn feature_header(feature: &Feature) -> String {
    let mut header = name_token(&feature.name);

    let mut meta: Vec<String> = Vec::new();
    if let Some(kind) = &feature.kind {
        meta.push(format!("kind {}", quote(kind.as_str())));
    }
    meta.extend(
        feature
            .comments
            .iter()
            .map(|comment| format!("comment {}", quote(comment))),
    );
    if !meta.is_empty() {
        header.push_str(&format!(" {{{}}}", meta.join(", ")));
    }

    if !feature.attributes.is_empty() {
        let attributes: Vec<String> = feature
            .attributes
            .iter()
            .map(|(key, value)| format!("{}: {}", title_case_words(key), attribute_value(value)))
            .collect();
        header.push_str(&format!(" {{{}}}", attributes.join(", ")));
    }
    header
}

/// Keywords and names that would not read back as one token are quoted.
fn name_token(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    let reserved = KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(name));
    if plain && !reserved {
        name.to_owned()
    } else {
        quote(name)
    }
}

fn attribute_value(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return trimmed.to_ascii_lowercase();
    }
    if is_number(trimmed) {
        return trimmed.to_owned();
    }
    quote(value)
}

fn is_number(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

pub(super) fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}
