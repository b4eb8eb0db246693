// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HQC-MDD: model-driven transformations for hybrid quantum-classical systems.
//!
//! i* diagrams (draw.io XML) are lifted into feature models, feature models into
//! Quantum-UML class models, and class models into PlantUML text plus a viewer URL.

pub mod config;
pub mod format;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod server;
pub mod store;
pub mod transform;

pub use config::PipelineConfig;
pub use pipeline::{DiagramView, Pipeline, PipelineError};
