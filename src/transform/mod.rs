// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model-to-model transformations: CIM→PIM and PIM→PSM rule engines.

pub mod cim_to_pim;
pub mod keywords;
pub mod pim_to_psm;

pub use cim_to_pim::CimToPim;
pub use keywords::{KeywordTable, CATEGORY_PRIORITY};
pub use pim_to_psm::PimToPsm;
