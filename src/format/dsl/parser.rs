// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::iter::Enumerate;
use std::str::Lines;

use super::classify::{classify, LineClass};
use super::declaration::{note_terminator, parse_else_head};
use super::ident::strip_keyword;
use crate::model::document::SequenceDocument;
use crate::model::ids::{NodeId, NodeIdGenerator};
use crate::model::node::{
    Comment, Fragment, Node, NodeKind, Note, ParseErrorKind, ParseErrorNode, ParticipantGroup,
};

#[derive(Debug)]
enum Container {
    Fragment(Fragment),
    Group(ParticipantGroup),
}

#[derive(Debug)]
struct OpenBlock {
    id: NodeId,
    /// Arena slot reserved when the block opened, so the container precedes its children.
    slot: usize,
    opened_on_line_no: usize,
    container: Container,
}

impl OpenBlock {
    fn keyword(&self) -> &'static str {
        match &self.container {
            Container::Fragment(fragment) => fragment.fragment_type.keyword(),
            Container::Group(_) => "participantgroup",
        }
    }

    fn into_node(self, line_end: usize) -> Node {
        let kind = match self.container {
            Container::Fragment(fragment) => NodeKind::Fragment(fragment),
            Container::Group(group) => NodeKind::ParticipantGroup(group),
        };
        Node::new(self.id, self.opened_on_line_no, line_end, kind)
    }
}

struct Parser<'t, 'g> {
    lines: Enumerate<Lines<'t>>,
    ids: &'g mut NodeIdGenerator,
    slots: Vec<Option<Node>>,
    open_blocks: Vec<OpenBlock>,
    last_line_no: usize,
}

impl<'t, 'g> Parser<'t, 'g> {
    fn new(text: &'t str, ids: &'g mut NodeIdGenerator) -> Self {
        Self {
            lines: text.lines().enumerate(),
            ids,
            slots: Vec::new(),
            open_blocks: Vec::new(),
            last_line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'t str)> {
        let (idx, raw) = self.lines.next()?;
        self.last_line_no = idx + 1;
        Some((idx + 1, raw.trim()))
    }

    fn in_group(&self) -> bool {
        matches!(self.open_blocks.last(), Some(OpenBlock { container: Container::Group(_), .. }))
    }

    fn current_fragment_mut(&mut self) -> Option<&mut Fragment> {
        match self.open_blocks.last_mut() {
            Some(OpenBlock { container: Container::Fragment(fragment), .. }) => Some(fragment),
            _ => None,
        }
    }

    /// Appends a node to the arena without attaching it to any container.
    fn emit(&mut self, line_start: usize, line_end: usize, kind: NodeKind) -> NodeId {
        let id = self.ids.next_id();
        self.slots.push(Some(Node::new(id, line_start, line_end, kind)));
        id
    }

    /// Innermost open fragment, looking through any participant groups opened inside it.
    fn enclosing_fragment_mut(&mut self) -> Option<&mut Fragment> {
        self.open_blocks.iter_mut().rev().find_map(|block| match &mut block.container {
            Container::Fragment(fragment) => Some(fragment),
            Container::Group(_) => None,
        })
    }

    /// Appends a node and records it in the enclosing fragment's current section, if any.
    fn emit_entry(&mut self, line_start: usize, line_end: usize, kind: NodeKind) -> NodeId {
        let id = self.emit(line_start, line_end, kind);
        self.attach(id);
        id
    }

    fn attach(&mut self, id: NodeId) {
        if let Some(fragment) = self.enclosing_fragment_mut() {
            match fragment.else_clauses.last_mut() {
                Some(clause) => clause.entries.push(id),
                None => fragment.entries.push(id),
            }
        }
    }

    fn error_node(kind: ParseErrorKind, text: &str, message: String) -> NodeKind {
        NodeKind::Error(ParseErrorNode { kind, text: text.to_owned(), message })
    }

    fn open_block(&mut self, line_no: usize, container: Container) {
        let id = self.ids.next_id();
        let slot = self.slots.len();
        self.slots.push(None);

        match (self.open_blocks.last_mut(), &container) {
            (Some(OpenBlock { container: Container::Group(parent), .. }), Container::Group(_)) => {
                parent.nested_groups.push(id);
            }
            _ => self.attach(id),
        }
        self.open_blocks.push(OpenBlock { id, slot, opened_on_line_no: line_no, container });
    }

    fn close_block(&mut self, line_end: usize) {
        let Some(block) = self.open_blocks.pop() else {
            return;
        };
        let (slot, keyword, opened) = (block.slot, block.keyword(), block.opened_on_line_no);
        self.slots[slot] = Some(block.into_node(line_end));
        tracing::trace!(keyword, opened, line_end, "closed block");
    }

    fn parse_entry_line(&mut self, line_no: usize, line: &'t str) {
        if line == "end" {
            if self.open_blocks.is_empty() {
                let node = Self::error_node(
                    ParseErrorKind::UnrecognizedSyntax,
                    line,
                    "`end` without an open block".to_owned(),
                );
                self.emit(line_no, line_no, node);
            } else {
                self.close_block(line_no);
            }
            return;
        }

        if strip_keyword(line, "else").is_some() {
            self.parse_else_line(line_no, line);
            return;
        }

        match classify(line) {
            LineClass::Blank => {
                self.emit_entry(line_no, line_no, NodeKind::Blankline);
            }
            LineClass::Comment(text) => {
                self.emit_entry(line_no, line_no, NodeKind::Comment(Comment { text }));
            }
            LineClass::Directive(directive) => {
                self.emit_entry(line_no, line_no, NodeKind::Directive(directive));
            }
            LineClass::Divider(divider) => {
                self.emit_entry(line_no, line_no, NodeKind::Divider(divider));
            }
            LineClass::Note(note) if note.block => self.parse_block_note(line_no, note),
            LineClass::Note(note) => {
                self.emit_entry(line_no, line_no, NodeKind::Note(note));
            }
            LineClass::FragmentStart(fragment) => {
                self.open_block(line_no, Container::Fragment(fragment));
            }
            LineClass::GroupStart(group) => self.open_block(line_no, Container::Group(group)),
            LineClass::Participant(participant) => {
                self.emit_entry(line_no, line_no, NodeKind::Participant(participant));
            }
            LineClass::Message(message) => {
                self.emit_entry(line_no, line_no, NodeKind::Message(message));
            }
            LineClass::Unrecognized => {
                tracing::debug!(line_no, line, "unrecognized line");
                let node = Self::error_node(
                    ParseErrorKind::UnrecognizedSyntax,
                    line,
                    "expected a directive, declaration, note, fragment or message".to_owned(),
                );
                self.emit_entry(line_no, line_no, node);
            }
        }
    }

    fn parse_else_line(&mut self, line_no: usize, line: &'t str) {
        let clause = parse_else_head(line);
        let message = match (self.current_fragment_mut(), clause) {
            (Some(fragment), Some(clause)) => {
                fragment.else_clauses.push(clause);
                return;
            }
            (Some(_), None) => "malformed `else` header",
            (None, _) => "`else` outside of a fragment",
        };
        tracing::debug!(line_no, line, message, "rejected else");
        let node = Self::error_node(ParseErrorKind::UnrecognizedSyntax, line, message.to_owned());
        self.emit_entry(line_no, line_no, node);
    }

    /// Collects the text lines of a block note up to `end <kind>`.
    fn parse_block_note(&mut self, line_no: usize, mut note: Note) {
        let terminator = note_terminator(note.kind);
        let mut text = Vec::new();
        let mut terminated = false;
        let mut line_end = line_no;
        while let Some((next_no, next)) = self.next_line() {
            line_end = next_no;
            if next == terminator {
                terminated = true;
                break;
            }
            text.push(next);
        }
        note.text = text.join("\n");
        self.emit_entry(line_no, line_end, NodeKind::Note(note));

        if !terminated {
            tracing::debug!(line_no, terminator, "unterminated block note");
            let node = Self::error_node(
                ParseErrorKind::UnterminatedBlock,
                "",
                format!("unterminated note opened on line {line_no}: missing `{terminator}`"),
            );
            self.emit_entry(line_end, line_end, node);
        }
    }

    fn parse_group_line(&mut self, line_no: usize, line: &'t str) {
        if line == "end" {
            self.close_block(line_no);
            return;
        }
        match classify(line) {
            LineClass::Blank | LineClass::Comment(_) => {
                tracing::trace!(line_no, "dropped blank/comment inside participant group");
            }
            LineClass::GroupStart(group) => self.open_block(line_no, Container::Group(group)),
            LineClass::Participant(participant) => {
                if let Some(OpenBlock { container: Container::Group(group), .. }) =
                    self.open_blocks.last_mut()
                {
                    group.participants.push(participant.alias.clone());
                }
                self.emit(line_no, line_no, NodeKind::Participant(participant));
            }
            _ => {
                tracing::debug!(line_no, line, "statement inside participant group");
                let node = Self::error_node(
                    ParseErrorKind::UnrecognizedSyntax,
                    line,
                    "only participant declarations and nested groups may appear in a participant group"
                        .to_owned(),
                );
                self.emit_entry(line_no, line_no, node);
            }
        }
    }

    fn close_unterminated(&mut self) {
        let line_end = self.last_line_no;
        while let Some(block) = self.open_blocks.last() {
            let (keyword, opened) = (block.keyword(), block.opened_on_line_no);
            self.close_block(line_end);
            tracing::debug!(keyword, opened, "unterminated block");
            let node = Self::error_node(
                ParseErrorKind::UnterminatedBlock,
                "",
                format!("unterminated {keyword} block opened on line {opened}: missing `end`"),
            );
            self.emit_entry(line_end, line_end, node);
        }
    }

    fn run(mut self) -> Vec<Node> {
        while let Some((line_no, line)) = self.next_line() {
            if self.in_group() {
                self.parse_group_line(line_no, line);
            } else {
                self.parse_entry_line(line_no, line);
            }
        }
        self.close_unterminated();
        self.slots.into_iter().flatten().collect()
    }
}

/// Parses `text` into a document using a fresh id generator.
///
/// Never fails: lines that match no grammar, and blocks missing their terminator, become
/// [`NodeKind::Error`] nodes while the rest of the document is still parsed.
pub fn parse(text: &str) -> SequenceDocument {
    let mut ids = NodeIdGenerator::new();
    parse_with_ids(text, &mut ids)
}

/// Like [`parse`], drawing node ids from `ids`.
pub fn parse_with_ids(text: &str, ids: &mut NodeIdGenerator) -> SequenceDocument {
    let nodes = Parser::new(text, ids).run();
    let document = SequenceDocument::from_nodes(nodes);
    tracing::debug!(
        nodes = document.len(),
        errors = document.errors().count(),
        "parsed sequence document"
    );
    document
}
