// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Characters that carry meaning in message, note and declaration syntax.
const RESERVED: &[char] = &[':', ',', '[', ']', '(', ')', '*', '"', '<', '>', ';'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasError {
    Empty,
    ContainsWhitespace,
    StartsWithMarker { ch: char },
    ReservedChar { ch: char },
}

impl fmt::Display for AliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("must not be empty"),
            Self::ContainsWhitespace => f.write_str("must not contain whitespace"),
            Self::StartsWithMarker { ch } => write!(f, "must not start with '{ch}'"),
            Self::ReservedChar { ch } => write!(f, "contains reserved character: '{ch}'"),
        }
    }
}

impl std::error::Error for AliasError {}

/// Checks that `alias` can be written unquoted as a message endpoint.
pub fn validate_alias(alias: &str) -> Result<(), AliasError> {
    let Some(first) = alias.chars().next() else {
        return Err(AliasError::Empty);
    };
    if alias.chars().any(char::is_whitespace) {
        return Err(AliasError::ContainsWhitespace);
    }
    if matches!(first, '#' | '-' | '=') {
        return Err(AliasError::StartsWithMarker { ch: first });
    }
    if let Some(ch) = alias.chars().find(|c| RESERVED.contains(c)) {
        return Err(AliasError::ReservedChar { ch });
    }
    Ok(())
}

pub(super) fn is_valid_alias(alias: &str) -> bool {
    validate_alias(alias).is_ok()
}

/// Splits off the first whitespace-delimited token.
pub(super) fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(idx) => Some((&input[..idx], input[idx..].trim_start())),
        None => Some((input, "")),
    }
}

/// Returns the text after `keyword` when `line` starts with it as a whole token.
pub(super) fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let (token, rest) = next_token(line)?;
    (token == keyword).then_some(rest)
}
