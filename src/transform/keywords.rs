// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Category keyword table used to classify goal/task labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Categories in the order their keywords are tried; the first match wins.
pub const CATEGORY_PRIORITY: [Category; 5] = [
    Category::Algorithm,
    Category::Programming,
    Category::IntegrationModel,
    Category::QuantumHwConstraint,
    Category::Functionality,
];

const BUILTIN_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Algorithm,
        &[
            "algorithm", "grover", "shor", "qaoa", "vqe", "search", "optimi", "simulat",
            "fourier", "qft", "annealing", "factoriz", "amplitude", "variational",
        ],
    ),
    (
        Category::Programming,
        &[
            "program", "code", "qiskit", "cirq", "q#", "sdk", "compil", "transpil", "language",
            "library", "circuit",
        ],
    ),
    (
        Category::IntegrationModel,
        &[
            "integrat", "hybrid", "backend", "driver", "interface", "service", "cloud",
            "classical", "orchestrat", "communicat",
        ],
    ),
    (
        Category::QuantumHwConstraint,
        &[
            "qubit", "coherence", "decoherence", "noise", "fidelity", "error rate", "hardware",
            "topology", "connectivity", "temperature", "gate time", "processor",
        ],
    ),
    (Category::Functionality, &[]),
];

/// Lower-cased keyword lists per category, consulted in [`CATEGORY_PRIORITY`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Category, Vec<String>>", into = "BTreeMap<Category, Vec<String>>")]
pub struct KeywordTable {
    keywords: BTreeMap<Category, Vec<String>>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordTable {
    pub fn builtin() -> Self {
        let keywords = BUILTIN_KEYWORDS
            .iter()
            .map(|(category, words)| {
                (*category, words.iter().map(|word| (*word).to_owned()).collect())
            })
            .collect();
        Self { keywords }
    }

    /// Replaces the keyword list of every category present in `overrides`.
    pub fn with_overrides(mut self, overrides: BTreeMap<Category, Vec<String>>) -> Self {
        for (category, words) in overrides {
            let words = words
                .into_iter()
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect();
            self.keywords.insert(category, words);
        }
        self
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        self.keywords.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Case-insensitive substring match; `Functionality` when nothing matches.
    pub fn classify(&self, label: &str) -> Category {
        let lower = label.to_lowercase();
        CATEGORY_PRIORITY
            .into_iter()
            .find(|category| {
                self.keywords(*category)
                    .iter()
                    .any(|word| lower.contains(word.as_str()))
            })
            .unwrap_or(Category::Functionality)
    }
}

impl From<BTreeMap<Category, Vec<String>>> for KeywordTable {
    fn from(overrides: BTreeMap<Category, Vec<String>>) -> Self {
        Self::builtin().with_overrides(overrides)
    }
}

impl From<KeywordTable> for BTreeMap<Category, Vec<String>> {
    fn from(table: KeywordTable) -> Self {
        table.keywords
    }
}
