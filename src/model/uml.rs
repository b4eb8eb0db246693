// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! UML-like class model produced by the PIM→PSM rules.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ATTRIBUTE_TYPE: &str = "String";
pub const DEFAULT_RETURN_TYPE: &str = "void";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Stereotype {
    Algorithm,
    QuantumDriver,
    Feature,
    QualityAttribute,
    Other(String),
}

impl Stereotype {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Algorithm => "Algorithm",
            Self::QuantumDriver => "QuantumDriver",
            Self::Feature => "Feature",
            Self::QualityAttribute => "QualityAttribute",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for Stereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Stereotype {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Algorithm" => Self::Algorithm,
            "QuantumDriver" => Self::QuantumDriver,
            "Feature" => Self::Feature,
            "QualityAttribute" => Self::QualityAttribute,
            _ => Self::Other(value),
        }
    }
}

impl From<Stereotype> for String {
    fn from(value: Stereotype) -> Self {
        value.as_str().to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl UmlAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: DEFAULT_ATTRIBUTE_TYPE.to_owned(),
            default: None,
        }
    }

    pub fn with_default<T: Into<String>>(mut self, default: Option<T>) -> Self {
        self.default = default.map(Into::into);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlMethod {
    pub name: String,
    pub parameters: Vec<UmlParameter>,
    pub return_type: String,
}

impl UmlMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: DEFAULT_RETURN_TYPE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UmlClass {
    name: String,
    stereotypes: Vec<Stereotype>,
    attributes: Vec<UmlAttribute>,
    methods: Vec<UmlMethod>,
    tagged_values: BTreeMap<String, String>,
    comments: Vec<String>,
}

impl UmlClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stereotypes(&self) -> &[Stereotype] {
        &self.stereotypes
    }

    pub fn attributes(&self) -> &[UmlAttribute] {
        &self.attributes
    }

    pub fn methods(&self) -> &[UmlMethod] {
        &self.methods
    }

    pub fn tagged_values(&self) -> &BTreeMap<String, String> {
        &self.tagged_values
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn has_stereotype(&self, stereotype: &Stereotype) -> bool {
        self.stereotypes.contains(stereotype)
    }

    pub fn add_stereotype(&mut self, stereotype: Stereotype) {
        if !self.has_stereotype(&stereotype) {
            self.stereotypes.push(stereotype);
        }
    }

    pub fn add_attribute(&mut self, attribute: UmlAttribute) {
        self.attributes.push(attribute);
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|method| method.name == name)
    }

    pub fn add_method(&mut self, method: UmlMethod) {
        self.methods.push(method);
    }

    /// Last write wins; empty keys or values are ignored.
    pub fn add_tagged_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if !key.is_empty() && !value.is_empty() {
            self.tagged_values.insert(key, value);
        }
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        let comment = comment.into();
        if !comment.is_empty() {
            self.comments.push(comment);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlDependency {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stereotype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UmlModel {
    name: String,
    classes: BTreeMap<String, UmlClass>,
    dependencies: Vec<UmlDependency>,
    comments: Vec<String>,
}

impl UmlModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &BTreeMap<String, UmlClass> {
        &self.classes
    }

    pub fn class(&self, name: &str) -> Option<&UmlClass> {
        self.classes.get(name)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut UmlClass> {
        self.classes.get_mut(name)
    }

    pub fn get_or_create_class(&mut self, name: &str) -> &mut UmlClass {
        self.classes
            .entry(name.to_owned())
            .or_insert_with(|| UmlClass::new(name))
    }

    pub fn classes_mut(&mut self) -> impl Iterator<Item = &mut UmlClass> {
        self.classes.values_mut()
    }

    pub fn dependencies(&self) -> &[UmlDependency] {
        &self.dependencies
    }

    /// Appends `dependency`, creating classes for both endpoints on demand.
    pub fn add_dependency(&mut self, dependency: UmlDependency) {
        self.get_or_create_class(&dependency.source);
        self.get_or_create_class(&dependency.target);
        self.dependencies.push(dependency);
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        let comment = comment.into();
        if !comment.is_empty() {
            self.comments.push(comment);
        }
    }
}
