// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Source and intermediate text formats.
//!
//! draw.io XML for the CIM, the feature-model text format for the PIM, and the shared
//! label-cleaning routines.

pub mod label;
pub mod mxgraph;
pub mod uvl;
