// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Feature-model text format.
//!
//! [`serialize_feature_model`] writes a [`crate::model::FeatureModel`]; the parser reads the
//! text back as a [`crate::model::FeatureNode`] forest plus typed constraints. Contribution
//! annotations and metadata are written as comments and not read back.

mod parser;
mod writer;

pub use parser::{parse_constraints, parse_feature_tree, parse_namespace};
pub use writer::serialize_feature_model;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureTextError {
    #[error("feature model text is empty")]
    Empty,
}
