// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use rstest::rstest;
use seqline::format::dsl::validate_alias;
use seqline::model::{ArrowType, FragmentType, NodeKind, ParseErrorKind, SequenceDocument};
use seqline::{parse, serialize};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn canonical(text: &str) -> String {
    serialize(&parse(text))
}

fn fragments(document: &SequenceDocument) -> Vec<&seqline::model::Fragment> {
    document
        .nodes()
        .iter()
        .filter_map(|node| match node.kind() {
            NodeKind::Fragment(fragment) => Some(fragment),
            _ => None,
        })
        .collect()
}

#[test]
fn canonical_fixture_is_reproduced_byte_for_byte() {
    let src = read_fixture("checkout.sqd");
    let document = parse(&src);
    assert!(!document.has_errors(), "unexpected errors: {:?}", document.errors().collect::<Vec<_>>());
    assert_eq!(serialize(&document), src);
}

#[rstest]
#[case("checkout.sqd")]
#[case("messy.sqd")]
#[case("broken.sqd")]
#[case("activations.sqd")]
fn canonicalization_is_idempotent(#[case] name: &str) {
    let once = canonical(&read_fixture(name));
    assert_eq!(canonical(&once), once, "{name} is not a fixpoint");
}

#[rstest]
#[case("checkout.sqd")]
#[case("messy.sqd")]
#[case("activations.sqd")]
fn round_trip_keeps_semantics(#[case] name: &str) {
    let original = parse(&read_fixture(name));
    assert!(!original.has_errors(), "{name} should parse cleanly");
    let reparsed = parse(&serialize(&original));
    assert_eq!(reparsed.semantic_view(), original.semantic_view());
    assert!(reparsed.validate().is_ok());
}

#[test]
fn messy_input_is_rewritten() {
    let src = read_fixture("messy.sqd");
    let formatted = canonical(&src);
    assert_ne!(formatted, src);
    assert!(formatted.starts_with("// legacy hash comment\nautonumber\nspace\nlinear\n"));
    assert!(formatted.contains("participant Client #white #blue;2\n"));
    assert!(formatted.contains("loop every minute\n  Client->(2)Api:poll\n  opt changed\n"));
}

#[test]
fn broken_fixture_degrades_to_error_nodes() {
    let document = parse(&read_fixture("broken.sqd"));
    let kinds = document
        .errors()
        .filter_map(|node| match node.kind() {
            NodeKind::Error(error) => Some(error.kind),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(kinds.len(), 4);
    assert_eq!(kinds.iter().filter(|kind| **kind == ParseErrorKind::UnterminatedBlock).count(), 2);
    assert_eq!(fragments(&document).len(), 2);
    assert!(document.validate().is_ok());
}

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
fn arrows_decompose_and_reassemble(#[case] token: &str, #[case] expected: ArrowType) {
    let src = format!("A{token}B:msg");
    let document = parse(&src);
    let NodeKind::Message(message) = document.nodes()[0].kind() else {
        panic!("expected a message for {src}");
    };
    assert_eq!((message.from.as_str(), message.to.as_str()), ("A", "B"));
    assert_eq!(message.arrow, expected);
    assert_eq!(message.label, "msg");
    assert_eq!(serialize(&document), format!("{src}\n"));
}

#[rstest]
#[case("web-xapi")]
#[case("auth-xyz")]
#[case("db-x")]
fn declared_hyphenated_aliases_can_send_messages(#[case] alias: &str) {
    assert_eq!(validate_alias(alias), Ok(()));
    let src = format!("participant {alias}\n{alias}->B:x\nB-->>{alias}:y\n{alias}->>(2)B:later\n");
    let document = parse(&src);
    assert!(!document.has_errors(), "unexpected errors in {src}");
    for node in &document.nodes()[1..] {
        let NodeKind::Message(message) = node.kind() else {
            panic!("expected a message, got {:?}", node.kind());
        };
        assert!(message.from == alias || message.to == alias);
    }
    assert_eq!(serialize(&document), src);
}

#[test]
fn nested_fragments_keep_their_ownership() {
    let document = parse("alt outer\n  loop inner\n    A->B:x\n  end\nelse o\n  A->B:y\nend");
    let found = fragments(&document);
    assert_eq!(found.len(), 2);
    let (outer, inner) = (found[0], found[1]);
    assert_eq!((outer.fragment_type, inner.fragment_type), (FragmentType::Alt, FragmentType::Loop));
    let inner_id = document
        .nodes()
        .iter()
        .find(|node| matches!(node.kind(), NodeKind::Fragment(f) if f.fragment_type == FragmentType::Loop))
        .map(|node| node.id())
        .expect("inner fragment");
    assert!(outer.entries.contains(&inner_id));
    assert_eq!(outer.else_clauses.len(), 1);
    assert_eq!(outer.else_clauses[0].entries.len(), 1);
}

#[test]
fn unterminated_block_keeps_the_fragment() {
    let document = parse("alt cond\nA->B:x");
    assert_eq!(fragments(&document).len(), 1);
    let errors = document.errors().collect::<Vec<_>>();
    assert_eq!(errors.len(), 1);
    let NodeKind::Error(error) = errors[0].kind() else {
        unreachable!("errors() yields error nodes");
    };
    assert_eq!(error.kind, ParseErrorKind::UnterminatedBlock);
    assert!(error.message.contains("end"));
}

fn alias() -> impl Strategy<Value = String> {
    "[A-Z][a-z0-9]{0,5}"
}

fn text() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,10}"
}

fn arrow() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["->", "->>", "-->", "-->>", "<-", "<--", "<->", "<->>", "<-->>", "-x", "--x"])
}

fn leaf_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (alias(), arrow(), alias(), text()).prop_map(|(a, arrow, b, label)| format!("{a}{arrow}{b}:{label}")),
        1 => (alias(), 1u32..5, alias(), text()).prop_map(|(a, delay, b, label)| format!("{a}->({delay}){b}:{label}")),
        1 => (alias(), text()).prop_map(|(a, t)| format!("note over {a}:{t}")),
        1 => (alias(), alias(), text()).prop_map(|(a, b, t)| format!("note right of {a},{b}:{t}")),
        1 => text().prop_map(|t| format!("=={t}==")),
        1 => text().prop_map(|t| format!("//{t}")),
        1 => Just(String::new()),
        1 => alias().prop_map(|a| format!("participant {a}")),
        1 => (alias(), text()).prop_map(|(a, name)| format!("actor \"{name}\" as {a}")),
        2 => prop::sample::select(vec![
            "autonumber", "autonumber 3", "autonumber off", "linear", "linear off", "parallel",
            "parallel off", "space", "space 4", "entryspacing 2", "autoactivation on",
            "bottomparticipants", "title Overview",
        ])
        .prop_map(str::to_owned),
        1 => alias().prop_map(|a| format!("activate {a}")),
        1 => alias().prop_map(|a| format!("deactivate {a}")),
    ]
}

#[derive(Debug, Clone)]
enum Event {
    Line(String),
    Open(&'static str, String),
    Else(String),
    Close,
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        6 => leaf_line().prop_map(Event::Line),
        1 => (prop::sample::select(vec!["alt", "loop", "opt", "par", "break", "critical", "group"]), text())
            .prop_map(|(kw, cond)| Event::Open(kw, cond)),
        1 => text().prop_map(Event::Else),
        1 => Just(Event::Close),
    ]
}

/// Renders events as a well-formed document: `else` and `end` only appear inside a block and
/// every block is closed.
fn render(events: &[Event]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for event in events {
        match event {
            Event::Line(line) => out.push_str(line),
            Event::Open(keyword, condition) => {
                out.push_str(&format!("{keyword} {condition}"));
                depth += 1;
            }
            Event::Else(condition) if depth > 0 => out.push_str(&format!("else {condition}")),
            Event::Close if depth > 0 => {
                out.push_str("end");
                depth -= 1;
            }
            Event::Else(_) | Event::Close => continue,
        }
        out.push('\n');
    }
    for _ in 0..depth {
        out.push_str("end\n");
    }
    out
}

proptest! {
    #[test]
    fn generated_documents_round_trip(events in prop::collection::vec(event(), 0..40)) {
        let src = render(&events);
        let document = parse(&src);
        prop_assert!(!document.has_errors(), "unexpected errors in:\n{}", src);

        let once = serialize(&document);
        let reparsed = parse(&once);
        prop_assert_eq!(serialize(&reparsed), once.clone());
        prop_assert_eq!(reparsed.semantic_view(), document.semantic_view());
    }

    #[test]
    fn arbitrary_text_never_panics(lines in prop::collection::vec(".{0,40}", 0..20)) {
        let src = lines.join("\n");
        let document = parse(&src);
        prop_assert!(document.validate().is_ok());
        let line_count = src.lines().count();
        for node in document.nodes() {
            prop_assert!(node.line_start() >= 1 && node.line_end() <= line_count.max(1));
        }
        let _ = serialize(&document);
    }
}
