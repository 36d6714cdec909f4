// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Style micro-grammars shared by declarations, fragments, notes, dividers and messages.
//!
//! Box spec (participants, fragments, notes, dividers, definitions):
//! - `##name`: named style reference
//! - `#color`: fill, or border when a fill was already given
//! - `#color;[width][;style]`: border color with optional width and line style
//! - `;width[;style]`: border width/style without a color
//!
//! Line spec (messages, lifelines): `##name` and `#color[;width][;style]` or `;width[;style]`,
//! where the color is the line (border) color.

use std::sync::OnceLock;

use regex::Regex;

use super::ident::next_token;
use crate::model::style::{BorderStyle, Style};

fn color_regex() -> &'static Regex {
    static COLOR: OnceLock<Regex> = OnceLock::new();
    COLOR.get_or_init(|| Regex::new(r"^#[A-Za-z0-9]+$").expect("valid color regex"))
}

fn style_name_regex() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid style name regex"))
}

pub(super) fn is_color(token: &str) -> bool {
    color_regex().is_match(token)
}

pub(super) fn is_style_name(name: &str) -> bool {
    style_name_regex().is_match(name)
}

/// Cheap shape test used to decide where a style run ends; full validation happens on parse.
pub(super) fn looks_like_style_token(token: &str) -> bool {
    if let Some(name) = token.strip_prefix("##") {
        return is_style_name(name);
    }
    if token.starts_with(';') {
        return true;
    }
    let color = token.split(';').next().unwrap_or_default();
    is_color(color)
}

/// Splits leading style tokens off `input`. Returns the tokens and the remaining text.
pub(super) fn split_leading_style(input: &str) -> (Vec<&str>, &str) {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();
    while let Some((token, after)) = next_token(rest) {
        if !looks_like_style_token(token) {
            break;
        }
        tokens.push(token);
        rest = after;
    }
    (tokens, rest)
}

/// Splits trailing style tokens off `input`. Returns the remaining text and the tokens.
pub(super) fn split_trailing_style(input: &str) -> (&str, Vec<&str>) {
    let mut head = input.trim_end();
    let mut tokens = Vec::new();
    loop {
        let Some((idx, ws)) = head.char_indices().rev().find(|(_, ch)| ch.is_whitespace()) else {
            if looks_like_style_token(head) {
                tokens.push(head);
                head = "";
            }
            break;
        };
        let token = &head[idx + ws.len_utf8()..];
        if token.is_empty() || !looks_like_style_token(token) {
            break;
        }
        tokens.push(token);
        head = head[..idx].trim_end();
    }
    tokens.reverse();
    (head, tokens)
}

#[derive(Debug, Default)]
struct BorderPart {
    color: Option<String>,
    width: Option<u32>,
    style: Option<BorderStyle>,
}

/// Parses `#color;width;style`, `#color;`, `;width;style` and similar.
fn parse_border(token: &str) -> Option<BorderPart> {
    let mut parts = token.split(';');
    let color = parts.next().unwrap_or_default();
    let width = parts.next();
    let line_style = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let mut border = BorderPart::default();
    if !color.is_empty() {
        if !is_color(color) {
            return None;
        }
        border.color = Some(color.to_owned());
    }
    match width {
        Some("") | None => {}
        Some(raw) => border.width = Some(raw.parse::<u32>().ok()?),
    }
    if let Some(raw) = line_style {
        border.style = Some(BorderStyle::from_keyword(raw)?);
    }
    if border.color.is_none() && border.width.is_none() && border.style.is_none() {
        return None;
    }
    Some(border)
}

fn apply_border(style: &mut Style, border: BorderPart) -> Option<()> {
    if style.has_border() {
        return None;
    }
    style.border = border.color;
    style.border_width = border.width;
    style.border_style = border.style;
    Some(())
}

fn apply_name(style: &mut Style, token: &str) -> Option<bool> {
    let Some(name) = token.strip_prefix("##") else {
        return Some(false);
    };
    if style.style_name.is_some() || !is_style_name(name) {
        return None;
    }
    style.style_name = Some(name.to_owned());
    Some(true)
}

/// Parses box-spec tokens. `None` when any token is malformed or repeated.
pub(super) fn parse_box_style(tokens: &[&str]) -> Option<Style> {
    let mut style = Style::default();
    for &token in tokens {
        if apply_name(&mut style, token)? {
            continue;
        }
        if token.contains(';') {
            apply_border(&mut style, parse_border(token)?)?;
        } else if is_color(token) {
            if style.fill.is_none() {
                style.fill = Some(token.to_owned());
            } else if style.border.is_none() {
                style.border = Some(token.to_owned());
            } else {
                return None;
            }
        } else {
            return None;
        }
    }
    Some(style)
}

/// Parses line-spec tokens (message inline styles, lifeline styles).
pub(super) fn parse_line_style(tokens: &[&str]) -> Option<Style> {
    let mut style = Style::default();
    for &token in tokens {
        if apply_name(&mut style, token)? {
            continue;
        }
        let border = if token.contains(';') {
            parse_border(token)?
        } else if is_color(token) {
            BorderPart { color: Some(token.to_owned()), ..BorderPart::default() }
        } else {
            return None;
        };
        apply_border(&mut style, border)?;
    }
    Some(style)
}

/// Parses a style definition payload: `[shapeSpec][,textMarkup]`.
pub(super) fn parse_definition(payload: &str) -> Option<Style> {
    let (shape, markup) = match memchr::memchr(b',', payload.as_bytes()) {
        Some(idx) => (&payload[..idx], Some(payload[idx + 1..].trim())),
        None => (payload, None),
    };
    let tokens = shape.split_whitespace().collect::<Vec<_>>();
    let mut style = parse_box_style(&tokens)?;
    if let Some(markup) = markup.filter(|m| !m.is_empty()) {
        style.text_markup = Some(markup.to_owned());
    }
    style.non_empty()
}

fn write_border_tail(out: &mut String, style: &Style) {
    let mut buf = itoa::Buffer::new();
    if let Some(width) = style.border_width {
        out.push(';');
        out.push_str(buf.format(width));
    }
    if let Some(line_style) = style.border_style {
        if style.border_width.is_none() {
            out.push(';');
        }
        out.push(';');
        out.push_str(line_style.as_keyword());
    }
}

fn push_token(out: &mut String, token: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(token);
}

/// Canonical box spec: `##name #fill #border;width;style`.
pub(super) fn format_box_style(style: &Style) -> String {
    let mut out = String::new();
    if let Some(name) = &style.style_name {
        push_token(&mut out, &format!("##{name}"));
    }
    if let Some(fill) = &style.fill {
        push_token(&mut out, fill);
    }
    if style.has_border() {
        let mut border = style.border.clone().unwrap_or_default();
        write_border_tail(&mut border, style);
        if style.fill.is_none() && style.border_width.is_none() && style.border_style.is_none() {
            // A lone bare color would read back as a fill.
            border.push(';');
        }
        push_token(&mut out, &border);
    }
    out
}

/// Canonical line spec: `##name #color;width;style`.
pub(super) fn format_line_style(style: &Style) -> String {
    let mut out = String::new();
    if let Some(name) = &style.style_name {
        push_token(&mut out, &format!("##{name}"));
    }
    if style.has_border() {
        let mut border = style.border.clone().unwrap_or_default();
        write_border_tail(&mut border, style);
        push_token(&mut out, &border);
    }
    out
}

pub(super) fn format_definition(style: &Style) -> String {
    let mut out = format_box_style(style);
    if let Some(markup) = &style.text_markup {
        out.push(',');
        out.push_str(markup);
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        format_box_style, format_definition, format_line_style, parse_box_style,
        parse_definition, parse_line_style, split_leading_style, split_trailing_style,
    };
    use crate::model::style::{BorderStyle, Style};

    fn tokens(spec: &str) -> Vec<&str> {
        spec.split_whitespace().collect()
    }

    #[rstest]
    #[case("#red", Some("#red"), None, None, None)]
    #[case("#red #blue", Some("#red"), Some("#blue"), None, None)]
    #[case("#red #blue;2", Some("#red"), Some("#blue"), Some(2), None)]
    #[case("#red #blue;2;dashed", Some("#red"), Some("#blue"), Some(2), Some(BorderStyle::Dashed))]
    #[case("#blue;", None, Some("#blue"), None, None)]
    #[case(";3", None, None, Some(3), None)]
    #[case(";3;dotted", None, None, Some(3), Some(BorderStyle::Dotted))]
    #[case("#fill ;;dashed", Some("#fill"), None, None, Some(BorderStyle::Dashed))]
    fn box_spec_partial_forms(
        #[case] spec: &str,
        #[case] fill: Option<&str>,
        #[case] border: Option<&str>,
        #[case] width: Option<u32>,
        #[case] line: Option<BorderStyle>,
    ) {
        let style = parse_box_style(&tokens(spec)).expect("valid spec");
        assert_eq!(style.fill.as_deref(), fill);
        assert_eq!(style.border.as_deref(), border);
        assert_eq!(style.border_width, width);
        assert_eq!(style.border_style, line);
        assert_eq!(format_box_style(&style), spec);
    }

    #[rstest]
    #[case("#red #blue #green")]
    #[case("#red;x")]
    #[case("#red;2;wavy")]
    #[case(";")]
    #[case("#red;1 ;2")]
    #[case("##a ##b")]
    #[case("red")]
    fn box_spec_rejects_malformed_tokens(#[case] spec: &str) {
        assert_eq!(parse_box_style(&tokens(spec)), None);
    }

    #[test]
    fn line_spec_reads_bare_color_as_line_color() {
        let style = parse_line_style(&["#red;3"]).expect("valid");
        assert_eq!(style.border.as_deref(), Some("#red"));
        assert_eq!(style.border_width, Some(3));
        assert_eq!(format_line_style(&style), "#red;3");

        let named = parse_line_style(&["##warn", "#red"]).expect("valid");
        assert_eq!(named.style_name.as_deref(), Some("warn"));
        assert_eq!(format_line_style(&named), "##warn #red");
    }

    #[test]
    fn definitions_carry_text_markup() {
        let style = parse_definition("#yellow #red;2, <color:#red>**").expect("valid");
        assert_eq!(style.fill.as_deref(), Some("#yellow"));
        assert_eq!(style.text_markup.as_deref(), Some("<color:#red>**"));
        assert_eq!(format_definition(&style), "#yellow #red;2,<color:#red>**");

        let markup_only = parse_definition(",//").expect("valid");
        assert_eq!(markup_only, Style { text_markup: Some("//".to_owned()), ..Style::default() });
        assert_eq!(parse_definition(""), None);
    }

    #[test]
    fn leading_and_trailing_runs_stop_at_plain_words() {
        assert_eq!(split_leading_style("#red #blue;2 user is admin"), (vec!["#red", "#blue;2"], "user is admin"));
        assert_eq!(split_leading_style("no style"), (vec![], "no style"));
        assert_eq!(split_trailing_style("over A,B #yellow"), ("over A,B", vec!["#yellow"]));
        assert_eq!(split_trailing_style("#red"), ("", vec!["#red"]));
    }
}
