// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PlantUML text and the viewer-URL transport encoding.

pub mod encode;
pub mod plantuml;

pub use encode::{
    diagram_url, encode_diagram, viewer_url, EncodeError, OutputFormat,
    DEFAULT_RENDERER_BASE_URL,
};
pub use plantuml::{render_feature_tree, render_uml_model};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: Option<String>,
    /// Adds a `.. tagged values ..` compartment to classes that carry tagged values.
    pub show_tagged_values: bool,
    pub show_notes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            show_tagged_values: true,
            show_notes: true,
        }
    }
}
