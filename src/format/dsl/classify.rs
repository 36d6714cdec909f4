// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ordered, first-match-wins line classification.
//!
//! The order matters for ambiguous prefixes: directives are tried before fragments, notes
//! before fragments (so `ref over A:x` is a note and `ref login` a fragment), and fragments
//! before participant groups, declarations and messages.

use super::declaration::{
    parse_divider, parse_fragment_head, parse_group_head, parse_note, parse_participant,
};
use super::directive::parse_directive;
use super::message::parse_message;
use crate::model::node::{
    Directive, Divider, Fragment, Message, Note, Participant, ParticipantGroup,
};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum LineClass {
    Blank,
    Comment(String),
    Directive(Directive),
    Divider(Divider),
    Note(Note),
    FragmentStart(Fragment),
    GroupStart(ParticipantGroup),
    Participant(Participant),
    Message(Message),
    Unrecognized,
}

type Rule = fn(&str) -> Option<LineClass>;

const RULES: [(&str, Rule); 9] = [
    ("blank", blank),
    ("comment", comment),
    ("directive", directive),
    ("divider", divider),
    ("note", note),
    ("fragment", fragment),
    ("participantgroup", group),
    ("participant", participant),
    ("message", message),
];

fn blank(line: &str) -> Option<LineClass> {
    line.is_empty().then_some(LineClass::Blank)
}

fn comment(line: &str) -> Option<LineClass> {
    let text = line.strip_prefix("//").or_else(|| line.strip_prefix('#'))?;
    Some(LineClass::Comment(text.to_owned()))
}

fn directive(line: &str) -> Option<LineClass> {
    parse_directive(line).map(LineClass::Directive)
}

fn divider(line: &str) -> Option<LineClass> {
    parse_divider(line).map(LineClass::Divider)
}

fn note(line: &str) -> Option<LineClass> {
    parse_note(line).map(LineClass::Note)
}

fn fragment(line: &str) -> Option<LineClass> {
    parse_fragment_head(line).map(LineClass::FragmentStart)
}

fn group(line: &str) -> Option<LineClass> {
    parse_group_head(line).map(LineClass::GroupStart)
}

fn participant(line: &str) -> Option<LineClass> {
    parse_participant(line).map(LineClass::Participant)
}

fn message(line: &str) -> Option<LineClass> {
    parse_message(line).map(LineClass::Message)
}

/// Classifies one trimmed line.
pub(super) fn classify(line: &str) -> LineClass {
    for (name, rule) in RULES {
        if let Some(class) = rule(line) {
            tracing::trace!(rule = name, line, "classified");
            return class;
        }
    }
    LineClass::Unrecognized
}
