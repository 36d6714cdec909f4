// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-line grammars for declarations and block heads: participants, notes, dividers,
//! fragment and `else` headers, participant groups.

use smol_str::SmolStr;

use super::ident::{is_valid_alias, next_token, strip_keyword};
use super::style_spec::{
    format_box_style, is_color, looks_like_style_token, parse_box_style, split_leading_style,
    split_trailing_style,
};
use crate::model::node::{
    Divider, ElseClause, Fragment, FragmentType, IconSet, Note, NoteKind, NotePosition,
    Participant, ParticipantGroup, ParticipantType,
};
use crate::model::style::Style;

fn push_part(out: &mut String, part: &str) {
    if part.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(part);
}

fn box_style_from(tokens: &[&str]) -> Option<Option<Style>> {
    Some(parse_box_style(tokens)?.non_empty())
}

fn style_text(style: Option<&Style>) -> String {
    style.map(format_box_style).unwrap_or_default()
}

fn parse_participant_type(line: &str) -> Option<(ParticipantType, &str)> {
    let (keyword, rest) = next_token(line)?;
    if let Some(simple) = ParticipantType::from_simple_keyword(keyword) {
        return Some((simple, rest));
    }
    if let Some(set) = IconSet::from_keyword(keyword) {
        let (code, rest) = next_token(rest)?;
        return Some((ParticipantType::Icon { set, code: code.to_owned() }, rest));
    }
    if keyword == "image" {
        let (data, rest) = next_token(rest)?;
        return Some((ParticipantType::Image { data: data.to_owned() }, rest));
    }
    None
}

/// Reads a bare or `"quoted"` name. Returns the name, whether it was quoted, and the rest.
fn parse_display_name(input: &str) -> Option<(&str, bool, &str)> {
    if let Some(inner) = input.strip_prefix('"') {
        let close = inner.find('"')?;
        let name = &inner[..close];
        if name.trim().is_empty() {
            return None;
        }
        return Some((name, true, inner[close + 1..].trim_start()));
    }
    let (name, rest) = next_token(input)?;
    if name.contains('"') {
        return None;
    }
    Some((name, false, rest))
}

/// `<type> [iconArg] <name|"quoted"> [as <alias>] [boxSpec]`
pub(super) fn parse_participant(line: &str) -> Option<Participant> {
    let (participant_type, rest) = parse_participant_type(line)?;
    let (display_name, quoted, rest) = parse_display_name(rest)?;

    let (alias, rest) = match strip_keyword(rest, "as") {
        Some(after) => {
            let (alias, rest) = next_token(after)?;
            if !is_valid_alias(alias) {
                return None;
            }
            (alias, rest)
        }
        None => {
            if !quoted && !is_valid_alias(display_name) {
                return None;
            }
            (display_name, rest)
        }
    };

    let tokens = rest.split_whitespace().collect::<Vec<_>>();
    if !tokens.iter().all(|token| looks_like_style_token(token)) {
        return None;
    }
    let style = box_style_from(&tokens)?;

    Some(Participant {
        participant_type,
        alias: SmolStr::from(alias),
        display_name: display_name.to_owned(),
        style,
    })
}

pub(super) fn format_participant(participant: &Participant) -> String {
    let mut out = match &participant.participant_type {
        ParticipantType::Icon { set, code } => format!("{} {code}", set.keyword()),
        ParticipantType::Image { data } => format!("image {data}"),
        simple => simple.simple_keyword().unwrap_or("participant").to_owned(),
    };

    let name = &participant.display_name;
    if is_valid_alias(name) {
        push_part(&mut out, name);
    } else {
        push_part(&mut out, &format!("\"{name}\""));
    }
    if participant.alias != name.as_str() {
        push_part(&mut out, "as");
        push_part(&mut out, &participant.alias);
    }
    push_part(&mut out, &style_text(participant.style.as_ref()));
    out
}

fn parse_note_position(input: &str) -> Option<(NotePosition, &str)> {
    if let Some(rest) = strip_keyword(input, "over") {
        return Some((NotePosition::Over, rest));
    }
    let (side, rest) = next_token(input)?;
    let position = match side {
        "left" => NotePosition::LeftOf,
        "right" => NotePosition::RightOf,
        _ => return None,
    };
    Some((position, strip_keyword(rest, "of")?))
}

/// `<kind> <position> <p1>[,<p2>..] [boxSpec][:text]`. Without `:` the note opens a block whose
/// text follows on the next lines; the caller collects it.
pub(super) fn parse_note(line: &str) -> Option<Note> {
    let (keyword, rest) = next_token(line)?;
    let kind = NoteKind::from_keyword(keyword)?;
    let (position, rest) = parse_note_position(rest)?;

    let (head, text) = match memchr::memchr(b':', rest.as_bytes()) {
        Some(idx) => (&rest[..idx], Some(rest[idx + 1..].trim())),
        None => (rest, None),
    };
    let (targets, tokens) = split_trailing_style(head);
    let style = box_style_from(&tokens)?;

    let participants = targets
        .split(',')
        .map(str::trim)
        .map(|alias| is_valid_alias(alias).then(|| SmolStr::from(alias)))
        .collect::<Option<Vec<_>>>()?;
    if participants.is_empty() {
        return None;
    }

    Some(Note {
        kind,
        position,
        participants,
        style,
        text: text.unwrap_or_default().to_owned(),
        block: text.is_none(),
    })
}

/// Header line of a note; block notes get no `:` and no text.
pub(super) fn format_note_head(note: &Note) -> String {
    let mut out = format!("{} {}", note.kind.keyword(), note.position.keyword());
    push_part(&mut out, &note.participants.join(","));
    push_part(&mut out, &style_text(note.style.as_ref()));
    if !note.block {
        out.push(':');
        out.push_str(&note.text);
    }
    out
}

/// Terminator of a block note: `end <kind>`.
pub(super) fn note_terminator(kind: NoteKind) -> String {
    format!("end {}", kind.keyword())
}

/// `==text==` with an optional trailing box spec.
pub(super) fn parse_divider(line: &str) -> Option<Divider> {
    let (head, tokens) = split_trailing_style(line);
    let text = head.strip_prefix("==")?.strip_suffix("==")?;
    if head.len() < 4 {
        return None;
    }
    let style = box_style_from(&tokens)?;
    Some(Divider { text: text.to_owned(), style })
}

pub(super) fn format_divider(divider: &Divider) -> String {
    let mut out = format!("=={}==", divider.text);
    push_part(&mut out, &style_text(divider.style.as_ref()));
    out
}

/// Splits `opt#red` / `expandable-` into keyword, collapse marker and operator color.
fn parse_fragment_keyword(token: &str) -> Option<(FragmentType, Option<bool>, Option<String>)> {
    let (fragment_type, tail) = FragmentType::ALL
        .into_iter()
        .filter_map(|kind| token.strip_prefix(kind.keyword()).map(|tail| (kind, tail)))
        .min_by_key(|(_, tail)| tail.len())?;

    let (marker, tail) = match tail.as_bytes().first() {
        Some(b'+') => (Some(false), &tail[1..]),
        Some(b'-') => (Some(true), &tail[1..]),
        _ => (None, tail),
    };
    let collapsed = match fragment_type {
        FragmentType::Expandable => Some(marker.unwrap_or(false)),
        _ if marker.is_some() => return None,
        _ => None,
    };

    let operator_color = match tail {
        "" => None,
        color if is_color(color) => Some(color.to_owned()),
        _ => return None,
    };
    Some((fragment_type, collapsed, operator_color))
}

/// Leading box spec followed by free condition text.
fn parse_styled_condition(rest: &str) -> Option<(Option<Style>, String)> {
    let (tokens, condition) = split_leading_style(rest);
    let style = parse_box_style(&tokens)?;
    Some((style.non_empty(), condition.to_owned()))
}

/// `<kw>[+|-][#operatorColor] [boxSpec] [condition]`; entries are filled by the parser.
pub(super) fn parse_fragment_head(line: &str) -> Option<Fragment> {
    let (token, rest) = next_token(line)?;
    let (fragment_type, collapsed, operator_color) = parse_fragment_keyword(token)?;
    let (style, condition) = parse_styled_condition(rest)?;

    let style = match operator_color {
        Some(color) => {
            let mut style = style.unwrap_or_default();
            style.operator_color = Some(color);
            Some(style)
        }
        None => style,
    };

    Some(Fragment {
        fragment_type,
        condition,
        style,
        entries: Vec::new(),
        else_clauses: Vec::new(),
        collapsed,
    })
}

pub(super) fn format_fragment_head(fragment: &Fragment) -> String {
    let mut out = fragment.fragment_type.keyword().to_owned();
    if fragment.fragment_type == FragmentType::Expandable && fragment.is_collapsed() {
        out.push('-');
    }
    if let Some(color) = fragment.style.as_ref().and_then(|s| s.operator_color.as_deref()) {
        out.push_str(color);
    }
    push_part(&mut out, &style_text(fragment.style.as_ref()));
    push_part(&mut out, &fragment.condition);
    out
}

/// `else [boxSpec] [condition]`
pub(super) fn parse_else_head(line: &str) -> Option<ElseClause> {
    let rest = strip_keyword(line, "else")?;
    let (style, condition) = parse_styled_condition(rest)?;
    Some(ElseClause { condition, style, entries: Vec::new() })
}

pub(super) fn format_else_head(clause: &ElseClause) -> String {
    let mut out = "else".to_owned();
    push_part(&mut out, &style_text(clause.style.as_ref()));
    push_part(&mut out, &clause.condition);
    out
}

/// `participantgroup [#color] [label]`
pub(super) fn parse_group_head(line: &str) -> Option<ParticipantGroup> {
    let rest = strip_keyword(line, "participantgroup")?;
    let (color, label) = match next_token(rest) {
        Some((first, after)) if is_color(first) => (Some(first.to_owned()), after),
        _ => (None, rest),
    };
    Some(ParticipantGroup {
        color,
        label: label.to_owned(),
        participants: Vec::new(),
        nested_groups: Vec::new(),
    })
}

pub(super) fn format_group_head(group: &ParticipantGroup) -> String {
    let mut out = "participantgroup".to_owned();
    push_part(&mut out, group.color.as_deref().unwrap_or_default());
    push_part(&mut out, &group.label);
    out
}
