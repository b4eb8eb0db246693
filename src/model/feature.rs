// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory feature model built by the CIM→PIM rules.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::feature_tree::Section;

/// The closed set of feature categories, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Functionality,
    Algorithm,
    Programming,
    #[serde(rename = "Integration_model")]
    IntegrationModel,
    #[serde(rename = "Quantum_HW_constraint")]
    QuantumHwConstraint,
}

impl Category {
    /// Order of the `features` block.
    pub const ALL: [Category; 5] = [
        Category::Functionality,
        Category::Algorithm,
        Category::Programming,
        Category::IntegrationModel,
        Category::QuantumHwConstraint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Functionality => "Functionality",
            Self::Algorithm => "Algorithm",
            Self::Programming => "Programming",
            Self::IntegrationModel => "Integration_model",
            Self::QuantumHwConstraint => "Quantum_HW_constraint",
        }
    }

    /// Case-insensitive lookup; a leading `@` is accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('@');
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
    }

    /// Hardware constraints are quality attributes; everything else is primary.
    pub fn section(self) -> Section {
        match self {
            Self::QuantumHwConstraint => Section::Quality,
            _ => Section::Primary,
        }
    }

    /// Unknown categories coerce to `Functionality`.
    pub fn coerce(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Functionality)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FeatureKind {
    Goal,
    Task,
    Other(String),
}

impl FeatureKind {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "goal" => Self::Goal,
            "task" => Self::Task,
            _ => Self::Other(value.trim().to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Goal => "goal",
            Self::Task => "task",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for FeatureKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FeatureKind> for String {
    fn from(value: FeatureKind) -> Self {
        value.as_str().to_owned()
    }
}

/// Insertion-ordered string map; re-inserting a key overwrites its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: &Attributes) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FeatureKind>,
    pub attributes: Attributes,
    pub comments: Vec<String>,
}

impl Feature {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            kind: None,
            attributes: Attributes::new(),
            comments: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: FeatureKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        let comment = comment.into();
        if !comment.is_empty() && !self.comments.contains(&comment) {
            self.comments.push(comment);
        }
    }
}

/// `antecedent => consequent`, or `antecedent => !consequent` when negated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Implication {
    pub antecedent: String,
    pub consequent: String,
    pub negated: bool,
}

impl Implication {
    pub fn new(antecedent: impl Into<String>, consequent: impl Into<String>) -> Self {
        Self {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
            negated: false,
        }
    }

    pub fn negated(antecedent: impl Into<String>, consequent: impl Into<String>) -> Self {
        Self {
            negated: true,
            ..Self::new(antecedent, consequent)
        }
    }

    pub fn is_self_implication(&self) -> bool {
        self.antecedent.eq_ignore_ascii_case(&self.consequent)
    }
}

impl fmt::Display for Implication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.negated { "!" } else { "" };
        write!(f, "{} => {bang}{}", self.antecedent, self.consequent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseImplicationError;

impl fmt::Display for ParseImplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected '<feature> => <feature>'")
    }
}

impl std::error::Error for ParseImplicationError {}

impl FromStr for Implication {
    type Err = ParseImplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s.split_once("=>").ok_or(ParseImplicationError)?;
        let antecedent = left.trim();
        let right = right.trim();
        let (negated, consequent) = match right.strip_prefix('!') {
            Some(rest) => (true, rest.trim()),
            None => (false, right),
        };
        if antecedent.is_empty() || consequent.is_empty() || consequent.contains("=>") {
            return Err(ParseImplicationError);
        }
        Ok(Self {
            antecedent: antecedent.to_owned(),
            consequent: consequent.to_owned(),
            negated,
        })
    }
}

/// Feature model under construction for a single transformation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureModel {
    namespace: String,
    features: Vec<Feature>,
    constraints: Vec<Implication>,
    or_groups: BTreeMap<String, Vec<String>>,
    contributions: Vec<String>,
    metadata: Vec<String>,
}

impl FeatureModel {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn constraints(&self) -> &[Implication] {
        &self.constraints
    }

    pub fn or_groups(&self) -> &BTreeMap<String, Vec<String>> {
        &self.or_groups
    }

    pub fn contributions(&self) -> &[String] {
        &self.contributions
    }

    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    /// Starts a new transformation run.
    pub fn clear(&mut self) {
        self.features.clear();
        self.constraints.clear();
        self.or_groups.clear();
        self.contributions.clear();
        self.metadata.clear();
    }

    /// Adds `feature`, or merges its comments and attributes into the feature that
    /// already has the same `(name, category)` key. Returns the stored feature.
    pub fn add_feature(&mut self, feature: Feature) -> &mut Feature {
        let index = match self.position(&feature.name, feature.category) {
            Some(index) => {
                let existing = &mut self.features[index];
                for comment in feature.comments {
                    existing.add_comment(comment);
                }
                existing.attributes.extend(&feature.attributes);
                if existing.kind.is_none() {
                    existing.kind = feature.kind;
                }
                index
            }
            None => {
                self.features.push(feature);
                self.features.len() - 1
            }
        };
        &mut self.features[index]
    }

    pub fn feature(&self, name: &str, category: Category) -> Option<&Feature> {
        self.position(name, category).map(|index| &self.features[index])
    }

    pub fn feature_mut(&mut self, name: &str, category: Category) -> Option<&mut Feature> {
        self.position(name, category)
            .map(move |index| &mut self.features[index])
    }

    /// Any feature with this name, compared case-insensitively.
    pub fn has_feature_named(&self, name: &str) -> bool {
        self.features
            .iter()
            .any(|feature| feature.name.eq_ignore_ascii_case(name))
    }

    pub fn add_constraint(&mut self, constraint: Implication) {
        self.constraints.push(constraint);
    }

    /// Parses an `"A => B"` expression; unparseable text is dropped.
    pub fn add_constraint_expr(&mut self, expr: &str) -> bool {
        match expr.parse::<Implication>() {
            Ok(constraint) => {
                self.add_constraint(constraint);
                true
            }
            Err(_) => {
                tracing::debug!(expr, "dropping unparseable constraint expression");
                false
            }
        }
    }

    /// Registers `child` under `parent`'s OR group; duplicates are ignored.
    pub fn add_or_child(&mut self, parent: impl Into<String>, child: impl Into<String>) {
        let child = child.into();
        let children = self.or_groups.entry(parent.into()).or_default();
        if !children.contains(&child) {
            children.push(child);
        }
    }

    pub fn add_contribution(&mut self, annotation: impl Into<String>) {
        let annotation = annotation.into();
        if !annotation.is_empty() {
            self.contributions.push(annotation);
        }
    }

    pub fn add_metadata(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.is_empty() && !self.metadata.contains(&line) {
            self.metadata.push(line);
        }
    }

    /// Constraints that survive serialization: both endpoints name a known feature and
    /// the two sides differ, all compared case-insensitively.
    pub fn valid_constraints(&self) -> impl Iterator<Item = &Implication> {
        self.constraints.iter().filter(move |constraint| {
            !constraint.is_self_implication()
                && self.has_feature_named(&constraint.antecedent)
                && self.has_feature_named(&constraint.consequent)
        })
    }

    pub fn features_in(&self, category: Category) -> impl Iterator<Item = &Feature> {
        self.features
            .iter()
            .filter(move |feature| feature.category == category)
    }

    fn position(&self, name: &str, category: Category) -> Option<usize> {
        self.features
            .iter()
            .position(|feature| feature.name == name && feature.category == category)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Attributes, Category, Feature, FeatureKind, FeatureModel, Implication};

    #[rstest]
    #[case("Algorithm", Category::Algorithm)]
    #[case("@Integration_model", Category::IntegrationModel)]
    #[case("quantum_hw_constraint", Category::QuantumHwConstraint)]
    #[case("Marketing", Category::Functionality)]
    fn category_coerces_unknown_names(#[case] name: &str, #[case] expected: Category) {
        assert_eq!(Category::coerce(name), expected);
    }

    #[test]
    fn attributes_keep_insertion_order_and_overwrite_in_place() {
        let mut attributes = Attributes::new();
        attributes.insert("b", "1");
        attributes.insert("a", "2");
        attributes.insert("b", "3");

        let pairs: Vec<_> = attributes.iter().collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn re_adding_a_feature_extends_instead_of_duplicating() {
        let mut model = FeatureModel::new("Ns");
        let mut first = Feature::new("Run", Category::Functionality).with_kind(FeatureKind::Goal);
        first.add_comment("actor: Alice");
        model.add_feature(first);

        let mut second = Feature::new("Run", Category::Functionality);
        second.add_comment("actor: Bob");
        second.attributes.insert("Fast", "true");
        model.add_feature(second);

        model.add_feature(Feature::new("Run", Category::Algorithm));

        assert_eq!(model.features().len(), 2);
        let merged = model.feature("Run", Category::Functionality).unwrap();
        assert_eq!(merged.comments, vec!["actor: Alice", "actor: Bob"]);
        assert_eq!(merged.attributes.get("Fast"), Some("true"));
        assert_eq!(merged.kind, Some(FeatureKind::Goal));
    }

    #[test]
    fn or_groups_ignore_duplicate_children() {
        let mut model = FeatureModel::new("Ns");
        model.add_or_child("Parent", "A");
        model.add_or_child("Parent", "B");
        model.add_or_child("Parent", "A");
        assert_eq!(model.or_groups()["Parent"], vec!["A", "B"]);
    }

    #[test]
    fn clear_resets_every_collection() {
        let mut model = FeatureModel::new("Ns");
        model.add_feature(Feature::new("A", Category::Functionality));
        model.add_constraint(Implication::new("A", "B"));
        model.add_or_child("A", "B");
        model.add_contribution("A help B");
        model.add_metadata("actor: X (actor)");

        model.clear();

        assert!(model.features().is_empty());
        assert!(model.constraints().is_empty());
        assert!(model.or_groups().is_empty());
        assert!(model.contributions().is_empty());
        assert!(model.metadata().is_empty());
        assert_eq!(model.namespace(), "Ns");
    }

    #[rstest]
    #[case("A => B", Implication::new("A", "B"))]
    #[case("  Run_job=>!Stop ", Implication::negated("Run_job", "Stop"))]
    fn implication_parses_from_text(#[case] text: &str, #[case] expected: Implication) {
        assert_eq!(text.parse::<Implication>(), Ok(expected));
    }

    #[rstest]
    #[case("A")]
    #[case("=> B")]
    #[case("A => ")]
    #[case("A => B => C")]
    fn implication_rejects_malformed_text(#[case] text: &str) {
        assert!(text.parse::<Implication>().is_err());
    }

    #[test]
    fn valid_constraints_drop_self_and_unknown_references() {
        let mut model = FeatureModel::new("Ns");
        model.add_feature(Feature::new("A", Category::Functionality));
        model.add_feature(Feature::new("B", Category::Algorithm));
        model.add_constraint(Implication::new("A", "b"));
        model.add_constraint(Implication::new("A", "a"));
        model.add_constraint(Implication::new("A", "Ghost"));
        model.add_constraint(Implication::negated("B", "A"));

        let valid: Vec<String> = model.valid_constraints().map(ToString::to_string).collect();
        assert_eq!(valid, vec!["A => b", "B => !A"]);
    }
}
