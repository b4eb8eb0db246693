// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Label cleaning shared by every reader of diagram labels.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Unescapes HTML entities, replaces markup tags with spaces and collapses whitespace.
///
/// The result is a fixed point: `clean_label(clean_label(x)) == clean_label(x)`.
pub fn clean_label(raw: &str) -> String {
    let mut current: Cow<'_, str> = Cow::Borrowed(raw);
    // Double-escaped labels (`&amp;lt;b&amp;gt;`) unwrap one layer per pass.
    loop {
        let unescaped = html_escape::decode_html_entities(current.as_ref()).into_owned();
        let stripped = tag_pattern().replace_all(&unescaped, " ").into_owned();
        if stripped == current.as_ref() {
            break;
        }
        current = Cow::Owned(stripped);
    }
    whitespace_pattern()
        .replace_all(current.trim(), " ")
        .into_owned()
}

/// Derives a feature identifier from a (cleaned) label.
///
/// Runs of non-alphanumeric characters become `_`, anything outside `[A-Za-z0-9_]` is
/// dropped, and leading/trailing underscores are trimmed.
pub fn feature_name(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_separator = false;
    for ch in label.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            if ch.is_ascii_alphanumeric() {
                out.push(ch);
            }
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Title-cases each `_`/space separated word, keeping the rest of the word as written.
pub fn title_case_words(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch == '_' || ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
            continue;
        }
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = false;
    }
    out
}
