// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{
    Constraint, ConstraintRelation, FeatureKind, FeatureNode, GroupKind, Section,
};

use super::FeatureTextError;

enum Frame {
    Block,
    Section(Section),
    Group(GroupKind),
    Feature(FeatureNode),
}

/// Parses the `features` block into a forest of [`FeatureNode`]s.
///
/// Single forward scan over comment-stripped lines with an explicit frame stack, so
/// nesting depth is bounded by the heap rather than the call stack. Parsing stops at the
/// `constraints` block; a feature of that name nested inside a section does not end it.
pub fn parse_feature_tree(text: &str) -> Result<Vec<FeatureNode>, FeatureTextError> {
    ensure_not_empty(text)?;

    let mut roots: Vec<FeatureNode> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut inside_features = false;

    for line in significant_lines(text) {
        if !inside_features {
            if first_word_is(line, "features") {
                inside_features = true;
                stack.push(Frame::Block);
            } else if first_word_is(line, "constraints") {
                break;
            }
            continue;
        }
        if matches!(stack.as_slice(), [Frame::Block]) && first_word_is(line, "constraints") {
            break;
        }

        if line == "}" {
            if let Some(Frame::Feature(node)) = stack.pop() {
                attach(node, &mut stack, &mut roots);
            }
            if stack.is_empty() {
                inside_features = false;
            }
            continue;
        }

        if let Some(head) = line.strip_suffix('{') {
            let head = head.trim_end();
            if let Some(section) = Section::from_keyword(head) {
                stack.push(Frame::Section(section));
            } else if let Some(group) = GroupKind::from_keyword(head) {
                stack.push(Frame::Group(group));
            } else {
                let node = new_node(head, &stack);
                stack.push(Frame::Feature(node));
            }
            continue;
        }

        if let Some(section) = Section::from_keyword(line) {
            stack.push(Frame::Section(section));
            continue;
        }
        let node = new_node(line, &stack);
        attach(node, &mut stack, &mut roots);
    }

    while let Some(frame) = stack.pop() {
        if let Frame::Feature(node) = frame {
            attach(node, &mut stack, &mut roots);
        }
    }
    Ok(roots)
}

/// Parses `A requires B` / `A excludes B` lines from the `constraints` block.
///
/// Lines that are not exactly three tokens with a known relation are ignored.
pub fn parse_constraints(text: &str) -> Result<Vec<Constraint>, FeatureTextError> {
    ensure_not_empty(text)?;

    let mut constraints = Vec::new();
    let mut inside_constraints = false;
    let mut depth = 0usize;
    for line in significant_lines(text) {
        if !inside_constraints {
            inside_constraints = depth == 0 && first_word_is(line, "constraints");
            depth = track_depth(depth, line);
            continue;
        }
        if line == "}" {
            break;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [source, relation, target] = tokens.as_slice() else {
            continue;
        };
        match ConstraintRelation::parse(relation) {
            Some(relation) => constraints.push(Constraint::new(*source, relation, *target)),
            None => tracing::debug!(line, "ignoring constraint with unknown relation"),
        }
    }
    Ok(constraints)
}

/// Reads the `namespace` header, if any.
pub fn parse_namespace(text: &str) -> Option<String> {
    significant_lines(text)
        .take_while(|line| !first_word_is(line, "features"))
        .find_map(|line| line.strip_prefix("namespace"))
        .map(str::trim)
        .filter(|namespace| !namespace.is_empty())
        .map(str::to_owned)
}

fn ensure_not_empty(text: &str) -> Result<(), FeatureTextError> {
    if text.trim().is_empty() {
        Err(FeatureTextError::Empty)
    } else {
        Ok(())
    }
}

fn significant_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| strip_line_comment(line).trim())
        .filter(|line| !line.is_empty())
}

/// Cuts a `//` comment, ignoring `//` inside double-quoted strings.
fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_quotes = false;
    let mut escaped = false;
    for (index, &byte) in bytes.iter().enumerate() {
        if in_quotes {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_quotes = true,
            b'/' if bytes.get(index + 1) == Some(&b'/') => return &line[..index],
            _ => {}
        }
    }
    line
}

/// Brace depth after `line`, ignoring braces inside quotes; stray `}` never go below zero.
fn track_depth(mut depth: usize, line: &str) -> usize {
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in line.chars() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '{' if !in_quotes => depth += 1,
            '}' if !in_quotes => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

fn first_word_is(line: &str, keyword: &str) -> bool {
    line.split(|ch: char| ch.is_whitespace() || ch == '{')
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case(keyword))
}

fn new_node(header: &str, stack: &[Frame]) -> FeatureNode {
    let mut node = parse_header(header);
    node.section = stack.iter().rev().find_map(|frame| match frame {
        Frame::Section(section) => Some(*section),
        _ => None,
    });
    node.group = match stack.last() {
        Some(Frame::Group(group)) => Some(*group),
        _ => None,
    };
    node
}

fn attach(node: FeatureNode, stack: &mut [Frame], roots: &mut Vec<FeatureNode>) {
    let parent = stack.iter_mut().rev().find_map(|frame| match frame {
        Frame::Feature(parent) => Some(parent),
        _ => None,
    });
    match parent {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// `Name {kind "goal", comment "..."} {Key: value, ...}`
fn parse_header(header: &str) -> FeatureNode {
    let (name, mut rest) = split_name(header);
    let mut node = FeatureNode::new(name);

    while let Some((group, remainder)) = next_brace_group(rest) {
        rest = remainder;
        for entry in split_entries(group) {
            apply_entry(&mut node, entry);
        }
    }
    node
}

/// Names colliding with a keyword are written quoted: `"Constraints" {kind "goal"}`.
fn split_name(header: &str) -> (String, &str) {
    let header = header.trim_start();
    if header.starts_with('"') {
        let mut escaped = false;
        for (index, ch) in header.char_indices().skip(1) {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => return (unquote(&header[..=index]), &header[index + 1..]),
                _ => {}
            }
        }
    }
    match header.find('{') {
        Some(index) => (header[..index].trim().to_owned(), &header[index..]),
        None => (header.trim().to_owned(), ""),
    }
}

/// Returns the contents of the next `{...}` group and the text after it.
fn next_brace_group(text: &str) -> Option<(&str, &str)> {
    let start = text.find('{')?;
    let body = &text[start + 1..];
    let mut in_quotes = false;
    let mut escaped = false;
    for (index, ch) in body.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '}' if !in_quotes => return Some((&body[..index], &body[index + 1..])),
            _ => {}
        }
    }
    Some((body, ""))
}

fn split_entries(group: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;
    for (index, ch) in group.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                entries.push(group[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    entries.push(group[start..].trim());
    entries.retain(|entry| !entry.is_empty());
    entries
}

fn apply_entry(node: &mut FeatureNode, entry: &str) {
    if let Some((key, value)) = split_attribute(entry) {
        node.attributes.insert(key, unquote(value));
        return;
    }
    let (keyword, value) = entry
        .split_once(char::is_whitespace)
        .unwrap_or((entry, ""));
    match keyword.to_ascii_lowercase().as_str() {
        "kind" => node.kind = Some(FeatureKind::parse(&unquote(value))),
        "comment" => node.comments.push(unquote(value)),
        "ref" => node.reference = true,
        _ => tracing::debug!(entry, "ignoring unknown feature entry"),
    }
}

fn split_attribute(entry: &str) -> Option<(&str, &str)> {
    if entry.starts_with('"') {
        return None;
    }
    let colon = entry.find(':')?;
    if entry[..colon].contains('"') {
        return None;
    }
    let key = entry[..colon].trim();
    (!key.is_empty()).then(|| (key, entry[colon + 1..].trim()))
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
    else {
        return value.to_owned();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
