// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `From<arrow>[(delay)][*]To[:label]`, with an optional inline style spliced into the arrow:
//! `A-[#red;3]->B:msg`.

use super::ident::is_valid_alias;
use super::style_spec::{format_line_style, parse_line_style};
use crate::model::arrow::ArrowType;
use crate::model::node::Message;

const CREATE_MARKER: &str = "<<create>>";

/// Longest tokens first so ties at the same index prefer the longer arrow.
const ARROW_TOKENS: [&str; 11] =
    ["<-->>", "<->>", "-->>", "<->", "<--", "-->", "->>", "--x", "->", "<-", "-x"];

/// Every `(index, token)` where an arrow token occurs, earliest first and longest first at the
/// same index.
fn arrow_candidates(haystack: &str) -> Vec<(usize, &'static str)> {
    let mut found = ARROW_TOKENS
        .iter()
        .flat_map(|&token| haystack.match_indices(token).map(move |(idx, _)| (idx, token)))
        .collect::<Vec<_>>();
    found.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));
    found
}

struct Endpoints<'a> {
    from: &'a str,
    delay: Option<u32>,
    star: bool,
    to: &'a str,
}

/// Reads `[(delay)][*]To` after the arrow and checks both aliases.
fn split_endpoints<'a>(from_raw: &'a str, rest: &'a str) -> Option<Endpoints<'a>> {
    let (delay, rest) = strip_delay(rest.trim_start())?;
    let (star, to_raw) = match rest.strip_prefix('*') {
        Some(after) => (true, after),
        None => (false, rest),
    };
    let from = from_raw.trim();
    let to = to_raw.trim();
    (is_valid_alias(from) && is_valid_alias(to)).then_some(Endpoints { from, delay, star, to })
}

/// Removes `-[spec]` from the arrow, returning the plain line and the spec text.
fn extract_inline_style(head: &str) -> Option<(String, Option<&str>)> {
    let Some(open) = head.find("-[") else {
        return Some((head.to_owned(), None));
    };
    let close = open + head[open..].find(']')?;
    let spec = &head[open + 2..close];
    let mut plain = String::with_capacity(head.len());
    plain.push_str(&head[..open]);
    plain.push_str(&head[close + 1..]);
    Some((plain, Some(spec)))
}

fn strip_delay(rest: &str) -> Option<(Option<u32>, &str)> {
    let Some(inner) = rest.strip_prefix('(') else {
        return Some((None, rest));
    };
    let close = inner.find(')')?;
    let delay = inner[..close].trim().parse::<u32>().ok()?;
    Some((Some(delay), inner[close + 1..].trim_start()))
}

/// Parses one message line; `None` when the line is not a message.
pub(super) fn parse_message(line: &str) -> Option<Message> {
    let (head, label) = match memchr::memchr(b':', line.as_bytes()) {
        Some(idx) => (&line[..idx], line[idx + 1..].trim()),
        None => (line, ""),
    };

    let (plain, spec) = extract_inline_style(head)?;
    // Aliases may contain `-x`, so a lost-arrow token inside a name must not win.
    let (arrow, endpoints) = arrow_candidates(&plain).into_iter().find_map(|(idx, token)| {
        let endpoints = split_endpoints(&plain[..idx], &plain[idx + token.len()..])?;
        Some((ArrowType::from_token(token)?, endpoints))
    })?;
    let Endpoints { from, delay, star, to } = endpoints;

    let style = match spec {
        Some(spec) => {
            let tokens = spec.split_whitespace().collect::<Vec<_>>();
            parse_line_style(&tokens)?.non_empty()
        }
        None => None,
    };

    Some(Message {
        from: from.into(),
        to: to.into(),
        arrow,
        delay,
        is_create: star || label.contains(CREATE_MARKER),
        style,
        label: label.to_owned(),
    })
}

/// Writes the canonical form of `message`.
pub(super) fn format_message(message: &Message) -> String {
    let mut out = String::with_capacity(message.from.len() + message.to.len() + message.label.len() + 8);
    out.push_str(&message.from);

    let spec = message.style.as_ref().map(format_line_style).filter(|spec| !spec.is_empty());
    match spec {
        Some(spec) => {
            out.push_str(message.arrow.styled_prefix());
            out.push('[');
            out.push_str(&spec);
            out.push(']');
            out.push_str(&message.arrow.styled_suffix());
        }
        None => out.push_str(message.arrow.token()),
    }

    if let Some(delay) = message.delay {
        let mut buf = itoa::Buffer::new();
        out.push('(');
        out.push_str(buf.format(delay));
        out.push(')');
    }
    if message.is_create && !message.label.contains(CREATE_MARKER) {
        out.push('*');
    }
    out.push_str(&message.to);
    if !message.label.is_empty() {
        out.push(':');
        out.push_str(&message.label);
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{format_message, parse_message};
    use crate::model::arrow::ArrowType;

    #[rstest]
    #[case("->", ArrowType::Sync)]
    #[case("->>", ArrowType::Async)]
    #[case("-->", ArrowType::Dashed)]
    #[case("-->>", ArrowType::DashedAsync)]
    #[case("<-", ArrowType::Reversed)]
    #[case("<--", ArrowType::DashedReversed)]
    #[case("<->", ArrowType::Bidirectional)]
    #[case("<->>", ArrowType::BidirectionalAsync)]
    #[case("<-->>", ArrowType::DashedBidirectionalAsync)]
    #[case("-x", ArrowType::Lost)]
    #[case("--x", ArrowType::DashedLost)]
    fn arrow_catalogue_decomposes_and_reassembles(#[case] token: &str, #[case] arrow: ArrowType) {
        let line = format!("A{token}B:msg");
        let message = parse_message(&line).expect("message");
        assert_eq!(message.from, "A");
        assert_eq!(message.to, "B");
        assert_eq!(message.arrow, arrow);
        assert_eq!(message.label, "msg");
        assert_eq!(format_message(&message), line);
    }

    #[rstest]
    #[case("A-[#red;3]->B:msg", "#red", 3)]
    #[case("A<-[#blue;1]--B:back", "#blue", 1)]
    #[case("A-[#green;2]--x B:lost", "#green", 2)]
    fn inline_style_splits_the_dash_run(#[case] line: &str, #[case] color: &str, #[case] width: u32) {
        let message = parse_message(line).expect("message");
        let style = message.style.as_ref().expect("style");
        assert_eq!(style.border.as_deref(), Some(color));
        assert_eq!(style.border_width, Some(width));

        let reparsed = parse_message(&format_message(&message)).expect("reparse");
        assert_eq!(reparsed, message);
    }

    #[test]
    fn styled_arrow_serializes_with_reinserted_dash() {
        let message = parse_message("A-[#red;3]->B:msg").expect("message");
        assert_eq!(message.arrow, ArrowType::Sync);
        assert_eq!(format_message(&message), "A-[#red;3]->B:msg");
    }

    #[test]
    fn empty_inline_style_collapses_to_bare_arrow() {
        let message = parse_message("A-[]->B:x").expect("message");
        assert_eq!(message.style, None);
        assert_eq!(format_message(&message), "A->B:x");
    }

    #[test]
    fn named_style_reference_is_kept() {
        let message = parse_message("A-[##warn]->>B:x").expect("message");
        assert_eq!(message.style.as_ref().and_then(|s| s.style_name.as_deref()), Some("warn"));
        assert_eq!(format_message(&message), "A-[##warn]->>B:x");
    }

    #[test]
    fn delay_and_create_markers() {
        let message = parse_message("A->(3)*B: spawn").expect("message");
        assert_eq!(message.delay, Some(3));
        assert!(message.is_create);
        assert_eq!(message.label, "spawn");
        assert_eq!(format_message(&message), "A->(3)*B:spawn");

        let labelled = parse_message("A->B:<<create>> worker").expect("message");
        assert!(labelled.is_create);
        assert_eq!(format_message(&labelled), "A->B:<<create>> worker");
    }

    #[test]
    fn label_is_optional_and_may_contain_colons() {
        let bare = parse_message("A -> B").expect("message");
        assert_eq!(bare.label, "");
        assert_eq!(format_message(&bare), "A->B");

        let colons = parse_message("A->B:time: 10:30").expect("message");
        assert_eq!(colons.label, "time: 10:30");
    }

    #[rstest]
    #[case("just some words")]
    #[case("->B:no sender")]
    #[case("A->:no receiver")]
    #[case("A->(x)B:bad delay")]
    #[case("A-[#red->B:unclosed")]
    #[case("A-[#red;q]->B:bad spec")]
    #[case("A B->C:space in alias")]
    fn rejects_non_messages(#[case] line: &str) {
        assert_eq!(parse_message(line), None);
    }

    #[rstest]
    #[case("web-xapi->B:x", "web-xapi", ArrowType::Sync, "B")]
    #[case("auth-xyz-->>B:y", "auth-xyz", ArrowType::DashedAsync, "B")]
    #[case("A->svc--xb:z", "A", ArrowType::Sync, "svc--xb")]
    #[case("db-x-xB:lost", "db-x", ArrowType::Lost, "B")]
    #[case("web-xapi-[#red]->(2)B:styled", "web-xapi", ArrowType::Sync, "B")]
    fn lost_arrow_text_inside_aliases_is_skipped(
        #[case] line: &str,
        #[case] from: &str,
        #[case] arrow: ArrowType,
        #[case] to: &str,
    ) {
        let message = parse_message(line).expect("message");
        assert_eq!((message.from.as_str(), message.arrow, message.to.as_str()), (from, arrow, to));
        assert_eq!(format_message(&message), line);
    }
}
