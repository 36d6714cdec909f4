// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::declaration::{
    format_divider, format_else_head, format_fragment_head, format_group_head, format_note_head,
    format_participant, note_terminator,
};
use super::directive::format_directive;
use super::message::format_message;
use crate::model::document::{OwnershipIndex, SequenceDocument};
use crate::model::ids::NodeId;
use crate::model::node::{Fragment, Node, NodeKind, Note, ParticipantGroup};

const INDENT: &str = "  ";

enum GroupMember<'a> {
    Declared(&'a Node),
    Alias(&'a str),
    Nested(&'a Node),
}

struct Writer<'a> {
    document: &'a SequenceDocument,
    ownership: OwnershipIndex,
    declarations: HashMap<&'a str, &'a Node>,
    out: String,
}

impl<'a> Writer<'a> {
    fn new(document: &'a SequenceDocument) -> Self {
        let mut declarations = HashMap::new();
        for node in document.nodes() {
            if let NodeKind::Participant(participant) = node.kind() {
                declarations.entry(participant.alias.as_str()).or_insert(node);
            }
        }
        Self { document, ownership: document.ownership(), declarations, out: String::new() }
    }

    fn line(&mut self, depth: usize, text: &str) {
        if !text.is_empty() {
            for _ in 0..depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn write_node(&mut self, node: &'a Node, depth: usize) {
        match node.kind() {
            NodeKind::Participant(participant) => self.line(depth, &format_participant(participant)),
            NodeKind::Message(message) => self.line(depth, &format_message(message)),
            NodeKind::Fragment(fragment) => self.write_fragment(fragment, depth),
            NodeKind::ParticipantGroup(group) => self.write_group(group, depth),
            NodeKind::Note(note) => self.write_note(note, depth),
            NodeKind::Divider(divider) => self.line(depth, &format_divider(divider)),
            NodeKind::Comment(comment) => self.line(depth, &format!("//{}", comment.text)),
            NodeKind::Blankline => self.line(depth, ""),
            NodeKind::Directive(directive) => self.line(depth, &format_directive(directive)),
            NodeKind::Error(error) if error.text.is_empty() => {
                self.line(depth, &format!("// {}", error.message));
            }
            NodeKind::Error(error) => self.line(depth, &format!("//{}", error.text)),
        }
    }

    fn write_entries(&mut self, ids: &[NodeId], depth: usize) {
        let document = self.document;
        for &id in ids {
            let Some(child) = document.get(id) else {
                tracing::trace!(%id, "skipping dangling entry");
                continue;
            };
            if self.ownership.skips_alias(child) {
                continue;
            }
            self.write_node(child, depth);
        }
    }

    fn write_fragment(&mut self, fragment: &'a Fragment, depth: usize) {
        self.line(depth, &format_fragment_head(fragment));
        self.write_entries(&fragment.entries, depth + 1);
        for clause in &fragment.else_clauses {
            self.line(depth, &format_else_head(clause));
            self.write_entries(&clause.entries, depth + 1);
        }
        self.line(depth, "end");
    }

    fn write_note(&mut self, note: &Note, depth: usize) {
        self.line(depth, &format_note_head(note));
        if note.block {
            if !note.text.is_empty() {
                for text in note.text.split('\n') {
                    self.line(depth + 1, text.trim());
                }
            }
            self.line(depth, &note_terminator(note.kind));
        }
    }

    /// Members are written in source order: declarations and nested groups interleave.
    fn write_group(&mut self, group: &'a ParticipantGroup, depth: usize) {
        let document = self.document;
        let mut members = Vec::with_capacity(group.participants.len() + group.nested_groups.len());
        for alias in &group.participants {
            match self.declarations.get(alias.as_str()) {
                Some(&node) => members.push((node.line_start(), GroupMember::Declared(node))),
                None => members.push((usize::MAX, GroupMember::Alias(alias.as_str()))),
            }
        }
        for id in &group.nested_groups {
            if let Some(node) = document.get(*id) {
                members.push((node.line_start(), GroupMember::Nested(node)));
            }
        }
        members.sort_by_key(|(line, _)| *line);

        self.line(depth, &format_group_head(group));
        for (_, member) in members {
            match member {
                GroupMember::Declared(node) | GroupMember::Nested(node) => {
                    self.write_node(node, depth + 1);
                }
                GroupMember::Alias(alias) => self.line(depth + 1, &format!("participant {alias}")),
            }
        }
        self.line(depth, "end");
    }
}

/// Writes the canonical text of `document`.
///
/// Container-owned nodes are emitted by their owner; nesting is indented two spaces per level
/// regardless of the original indentation. Error nodes become comments.
pub fn serialize(document: &SequenceDocument) -> String {
    let mut writer = Writer::new(document);
    for node in document.nodes() {
        if !writer.ownership.skips(node) {
            writer.write_node(node, 0);
        }
    }
    writer.out
}
