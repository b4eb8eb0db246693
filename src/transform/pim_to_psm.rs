// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PIM→PSM: feature model to UML class model.

use crate::model::{
    Attributes, Category, Constraint, ConstraintRelation, Feature, FeatureKind, FeatureModel,
    FeatureNode, GroupKind, Implication, Section, Stereotype, UmlAttribute, UmlDependency,
    UmlMethod, UmlModel,
};

pub const REQUIRES_STEREOTYPE: &str = "requires";
pub const EXCLUDES_STEREOTYPE: &str = "excludes";

/// Stateless PIM→PSM transformer. Rules run in the order Q2, Q3, Q4, Q7, Q1, Q6, Q5
/// because later rules read the classes created by earlier ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct PimToPsm;

impl PimToPsm {
    pub fn new() -> Self {
        Self
    }

    pub fn transform(&self, model: &FeatureModel) -> UmlModel {
        let mut uml = UmlModel::new(model.namespace());
        apply_q2_functionality_classes(model, &mut uml);
        apply_q3_q4_stereotypes(model, &mut uml);
        apply_q7_attributes(model, &mut uml);
        apply_q1_comments(model, &mut uml);
        apply_q6_dependencies(model, &mut uml);
        apply_q5_hardware_tags(model, &mut uml);
        for annotation in model.contributions() {
            uml.add_comment(annotation.as_str());
        }

        tracing::info!(
            classes = uml.classes().len(),
            dependencies = uml.dependencies().len(),
            "pim→psm transformation complete"
        );
        uml
    }
}

/// Q2: one class per Functionality feature; tasks also contribute a same-named method.
fn apply_q2_functionality_classes(model: &FeatureModel, uml: &mut UmlModel) {
    for feature in model.features_in(Category::Functionality) {
        let class = uml.get_or_create_class(&feature.name);
        if feature.kind == Some(FeatureKind::Task) && !class.has_method(&feature.name) {
            class.add_method(UmlMethod::new(feature.name.as_str()));
        }
    }
}

/// Q3/Q4: Algorithm and Integration_model features are stereotyped.
fn apply_q3_q4_stereotypes(model: &FeatureModel, uml: &mut UmlModel) {
    for (category, stereotype) in [
        (Category::Algorithm, Stereotype::Algorithm),
        (Category::IntegrationModel, Stereotype::QuantumDriver),
    ] {
        for feature in model.features_in(category) {
            uml.get_or_create_class(&feature.name)
                .add_stereotype(stereotype.clone());
        }
    }
}

/// Q7: attributes become typed UML attributes mirrored as tagged values. Features
/// without a class are skipped.
fn apply_q7_attributes(model: &FeatureModel, uml: &mut UmlModel) {
    for feature in model.features() {
        let Some(class) = uml.class_mut(&feature.name) else {
            continue;
        };
        for (key, value) in feature.attributes.iter() {
            class.add_attribute(UmlAttribute::new(key).with_default(Some(value)));
            class.add_tagged_value(key, value);
        }
    }
}

/// Q1: comments follow their feature onto its class, if it has one.
fn apply_q1_comments(model: &FeatureModel, uml: &mut UmlModel) {
    for feature in model.features() {
        let Some(class) = uml.class_mut(&feature.name) else {
            continue;
        };
        for comment in &feature.comments {
            class.add_comment(comment.as_str());
        }
    }
}

/// Q6: implications become dependencies; missing endpoint classes are created.
fn apply_q6_dependencies(model: &FeatureModel, uml: &mut UmlModel) {
    for constraint in model.constraints() {
        if constraint.is_self_implication() {
            continue;
        }
        let stereotype = if constraint.negated {
            EXCLUDES_STEREOTYPE
        } else {
            REQUIRES_STEREOTYPE
        };
        uml.add_dependency(UmlDependency {
            source: constraint.antecedent.clone(),
            target: constraint.consequent.clone(),
            stereotype: Some(stereotype.to_owned()),
            label: None,
        });
    }
}

/// Q5: every hardware constraint is broadcast as tagged values onto all Algorithm and
/// QuantumDriver classes.
fn apply_q5_hardware_tags(model: &FeatureModel, uml: &mut UmlModel) {
    let mut merged = Attributes::new();
    for feature in model.features_in(Category::QuantumHwConstraint) {
        if feature.attributes.is_empty() {
            merged.insert(feature.name.as_str(), "true");
        } else {
            merged.extend(&feature.attributes);
        }
    }
    if merged.is_empty() {
        return;
    }

    for class in uml.classes_mut() {
        if class.has_stereotype(&Stereotype::Algorithm)
            || class.has_stereotype(&Stereotype::QuantumDriver)
        {
            for (key, value) in merged.iter() {
                class.add_tagged_value(key, value);
            }
        }
    }
}

impl FeatureModel {
    /// Lifts a parsed forest back into a feature model.
    ///
    /// Top-level nodes named after a category are containers for that category. Other
    /// top-level nodes are features themselves: quality-section nodes become hardware
    /// constraints, everything else Functionality. Children declared in an `or` block
    /// join their parent feature's OR group. `{ref}` nodes only record that membership and
    /// never create or recategorise a feature.
    pub fn from_feature_tree(
        namespace: &str,
        forest: &[FeatureNode],
        constraints: &[Constraint],
    ) -> Self {
        let mut model = FeatureModel::new(namespace);
        let mut stack: Vec<(&FeatureNode, Category, Option<&str>)> = Vec::new();

        for root in forest.iter().rev() {
            match Category::from_name(&root.name) {
                Some(category) => {
                    stack.extend(root.children.iter().rev().map(|child| (child, category, None)))
                }
                None => {
                    let category = match root.section {
                        Some(Section::Quality) => Category::QuantumHwConstraint,
                        _ => Category::Functionality,
                    };
                    stack.push((root, category, None));
                }
            }
        }

        while let Some((node, category, parent)) = stack.pop() {
            if node.reference {
                match (parent, node.group) {
                    (Some(parent), Some(GroupKind::Or)) => {
                        model.add_or_child(parent, node.name.as_str())
                    }
                    _ => tracing::debug!(name = %node.name, "reference outside an or group"),
                }
                continue;
            }

            let mut feature = Feature::new(node.name.as_str(), category);
            feature.kind = node.kind.clone();
            feature.attributes = node.attributes.clone();
            for comment in &node.comments {
                feature.add_comment(comment.as_str());
            }
            model.add_feature(feature);

            if let (Some(parent), Some(GroupKind::Or)) = (parent, node.group) {
                model.add_or_child(parent, node.name.as_str());
            }
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|child| (child, category, Some(node.name.as_str()))),
            );
        }

        for constraint in constraints {
            model.add_constraint(match constraint.relation {
                ConstraintRelation::Requires => {
                    Implication::new(constraint.source.as_str(), constraint.target.as_str())
                }
                ConstraintRelation::Excludes => {
                    Implication::negated(constraint.source.as_str(), constraint.target.as_str())
                }
            });
        }
        model
    }
}
