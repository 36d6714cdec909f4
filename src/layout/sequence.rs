// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use smol_str::SmolStr;

use super::activation::ActivationTracker;
use super::columns::{place_columns, text_lines, text_width, Columns};
use super::config::LayoutConfig;
use super::geometry::{
    ActivationBar, FragmentGeometry, Geometry, Lifeline, LifelineEnd, MessageGeometry, Rect,
};
use super::packing::{LevelPacker, Placement, Span};
use crate::model::document::SequenceDocument;
use crate::model::ids::NodeId;
use crate::model::node::{
    Directive, Fragment, Message, Node, NodeKind, Note, NotePosition, ParticipantGroup,
};

/// Coordinates for one document.
///
/// `layout` holds a geometry for every node that is drawn; comments, most directives and the
/// children of collapsed fragments have none.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SequenceLayout {
    layout: BTreeMap<NodeId, Geometry>,
    participant_layout: BTreeMap<SmolStr, Rect>,
    participant_order: Vec<SmolStr>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    footer_layout: BTreeMap<SmolStr, Rect>,
    activations: Vec<ActivationBar>,
    lifelines: Vec<Lifeline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame: Option<Rect>,
    total_height: f64,
    total_width: f64,
}

impl SequenceLayout {
    pub fn layout(&self) -> &BTreeMap<NodeId, Geometry> {
        &self.layout
    }

    pub fn get(&self, id: NodeId) -> Option<&Geometry> {
        self.layout.get(&id)
    }

    /// Header box of each participant, keyed by alias.
    pub fn participant_layout(&self) -> &BTreeMap<SmolStr, Rect> {
        &self.participant_layout
    }

    pub fn participant(&self, alias: &str) -> Option<&Rect> {
        self.participant_layout.get(alias)
    }

    /// Aliases from left to right.
    pub fn participant_order(&self) -> &[SmolStr] {
        &self.participant_order
    }

    /// Repeated participant boxes below the lifelines (`bottomparticipants`).
    pub fn footer_layout(&self) -> &BTreeMap<SmolStr, Rect> {
        &self.footer_layout
    }

    pub fn activations(&self) -> &[ActivationBar] {
        &self.activations
    }

    pub fn activations_of<'a>(&'a self, alias: &'a str) -> impl Iterator<Item = &'a ActivationBar> + 'a {
        self.activations.iter().filter(move |bar| bar.participant == alias)
    }

    pub fn lifelines(&self) -> &[Lifeline] {
        &self.lifelines
    }

    pub fn lifeline(&self, alias: &str) -> Option<&Lifeline> {
        self.lifelines.iter().find(|lifeline| lifeline.participant == alias)
    }

    pub fn frame(&self) -> Option<&Rect> {
        self.frame.as_ref()
    }

    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    pub fn total_width(&self) -> f64 {
        self.total_width
    }
}

/// Lays out `document` with the default [`LayoutConfig`].
pub fn calculate_layout(document: &SequenceDocument) -> SequenceLayout {
    calculate_layout_with(document, &LayoutConfig::default())
}

/// Single forward pass over the top-level nodes; containers lay out their own children.
pub fn calculate_layout_with(document: &SequenceDocument, config: &LayoutConfig) -> SequenceLayout {
    let title = document.nodes().iter().rev().find_map(|node| match node.kind() {
        NodeKind::Directive(Directive::Title(text)) => Some((node.id(), text.as_str())),
        _ => None,
    });
    let row_top = config.margin + if title.is_some() { config.title_height } else { 0.0 };
    let columns = place_columns(document, config, row_top);

    let mut pass = LayoutPass::new(document, config, columns, row_top);
    if let Some((id, text)) = title {
        let rect = pass.title_rect(text);
        pass.layout.insert(id, Geometry::Box(rect));
    }
    for node in document.top_level() {
        pass.place(node);
    }
    let layout = pass.finish(row_top);
    tracing::debug!(
        nodes = layout.layout.len(),
        height = layout.total_height,
        width = layout.total_width,
        "computed sequence layout"
    );
    layout
}

struct LayoutPass<'d> {
    document: &'d SequenceDocument,
    config: &'d LayoutConfig,
    columns: Columns,
    body_top: f64,
    cursor: f64,
    /// Lowest cursor position reached; `space` with a negative amount moves back up.
    deepest: f64,
    entry_spacing: f64,
    counter: Option<u32>,
    linear: bool,
    parallel: bool,
    packer: LevelPacker,
    activations: ActivationTracker,
    layout: BTreeMap<NodeId, Geometry>,
    visited: HashSet<NodeId>,
    created: HashMap<SmolStr, Rect>,
    ends: HashMap<SmolStr, (f64, LifelineEnd)>,
    destroy_after: HashSet<SmolStr>,
    frames: Vec<NodeId>,
    bottom_participants: bool,
}

impl<'d> LayoutPass<'d> {
    fn new(
        document: &'d SequenceDocument,
        config: &'d LayoutConfig,
        columns: Columns,
        row_top: f64,
    ) -> Self {
        let body_top = row_top + config.participant_height + config.lifeline_top_gap;
        Self {
            document,
            config,
            columns,
            body_top,
            cursor: body_top,
            deepest: body_top,
            entry_spacing: 1.0,
            counter: None,
            linear: false,
            parallel: false,
            packer: LevelPacker::new(),
            activations: ActivationTracker::new(),
            layout: BTreeMap::new(),
            visited: HashSet::new(),
            created: HashMap::new(),
            ends: HashMap::new(),
            destroy_after: HashSet::new(),
            frames: Vec::new(),
            bottom_participants: false,
        }
    }

    fn title_rect(&self, text: &str) -> Rect {
        let config = self.config;
        let x = if self.columns.is_empty() { config.margin } else { self.columns.left() };
        let width = (self.columns.right() - x)
            .max(text_width(text, config) + 2.0 * config.participant_padding);
        Rect::new(x, config.margin, width, config.title_height)
    }

    /// `(x, width)` of a band spanning every column.
    fn full_width(&self) -> (f64, f64) {
        let config = self.config;
        if self.columns.is_empty() {
            return (config.margin, config.participant_min_width);
        }
        let left = self.columns.left() - config.fragment_margin;
        (left, self.columns.right() + config.fragment_margin - left)
    }

    fn packing(&self) -> bool {
        self.linear || self.parallel
    }

    /// Reserves `height` below everything placed so far.
    fn stack(&mut self, height: f64) -> f64 {
        self.packer.close();
        let top = self.cursor;
        self.cursor += height;
        top
    }

    /// Reserves a message slot, sharing the open level when packing allows it.
    fn reserve(&mut self, span: Span, height: f64) -> f64 {
        if !self.packing() {
            return self.stack(height);
        }
        let top = match self.packer.place(span) {
            Placement::Joined { top } => top,
            Placement::Opened => self.cursor,
        };
        self.packer.claim(span, top, top + height);
        if let Some(bottom) = self.packer.bottom() {
            self.cursor = self.cursor.max(bottom);
        }
        top
    }

    fn place(&mut self, node: &'d Node) {
        if !self.visited.insert(node.id()) {
            return;
        }
        let config = self.config;
        match node.kind() {
            NodeKind::Message(message) => self.place_message(node.id(), message),
            NodeKind::Fragment(fragment) => self.place_fragment(node.id(), fragment),
            NodeKind::Note(note) => self.place_note(node.id(), note),
            NodeKind::Divider(_) => self.place_band(node.id(), config.divider_height),
            NodeKind::Blankline => self.place_band(node.id(), config.blank_height),
            NodeKind::Error(_) => self.place_band(node.id(), config.error_height),
            NodeKind::Directive(directive) => self.apply_directive(node.id(), directive),
            NodeKind::Participant(_) | NodeKind::ParticipantGroup(_) | NodeKind::Comment(_) => {}
        }
    }

    fn place_band(&mut self, id: NodeId, height: f64) {
        let top = self.stack(height);
        let (x, width) = self.full_width();
        self.layout.insert(id, Geometry::Box(Rect::new(x, top, width, height)));
    }

    fn place_message(&mut self, id: NodeId, message: &Message) {
        let (Some(from_x), Some(to_x)) =
            (self.columns.center(&message.from), self.columns.center(&message.to))
        else {
            tracing::trace!(%id, "message endpoint has no column");
            return;
        };
        let config = self.config;
        let spacing = self.entry_spacing;
        let extra_lines = text_lines(&message.label).count().saturating_sub(1) as f64;
        let lead = config.message_height * spacing + extra_lines * config.note_line_height;
        let delay = f64::from(message.delay.unwrap_or(0)) * config.delay_unit;
        let (span, drop) = if message.is_self() {
            let drop = (config.self_message_height - config.message_height).max(0.0) * spacing;
            (Span::new(from_x, from_x + config.self_message_width), drop)
        } else {
            (Span::new(from_x, to_x), 0.0)
        };

        let top = self.reserve(span, lead + delay + drop);
        let y = top + lead;
        let end_y = y + delay + drop;
        let number = self.counter;
        if let Some(current) = number {
            self.counter = Some(current.saturating_add(1));
        }

        let mut geometry = MessageGeometry { y, end_y, from_x, to_x, height: end_y - top, number };
        let (sender, receiver) = message.flow();
        if message.is_create && sender != receiver {
            if let Some(edge) = self.create_participant(receiver, sender, end_y) {
                if receiver == message.to.as_str() {
                    geometry.to_x = edge;
                } else {
                    geometry.from_x = edge;
                }
            }
        }
        self.activations.on_message(sender, receiver, y, end_y);
        for alias in [&message.from, &message.to] {
            if self.destroy_after.remove(alias.as_str()) {
                self.end_lifeline(alias, end_y, LifelineEnd::Destroyed);
            }
        }
        self.layout.insert(id, Geometry::Message(geometry));
    }

    /// Moves a created participant's box down to the creating arrow and returns the x where the
    /// arrow meets it. Only the first creation moves the box.
    fn create_participant(&mut self, alias: &str, sender: &str, y: f64) -> Option<f64> {
        let rect = match self.created.get(alias) {
            Some(rect) => *rect,
            None => {
                let column = self.columns.rect(alias)?;
                let rect = Rect::new(column.x, y - column.height / 2.0, column.width, column.height);
                self.created.insert(SmolStr::from(alias), rect);
                rect
            }
        };
        let sender_x = self.columns.center(sender)?;
        Some(if sender_x < rect.center_x() { rect.x } else { rect.right() })
    }

    fn end_lifeline(&mut self, alias: &str, y: f64, end: LifelineEnd) {
        self.activations.deactivate_all(alias, y);
        self.ends.entry(SmolStr::from(alias)).or_insert((y, end));
    }

    fn apply_directive(&mut self, id: NodeId, directive: &Directive) {
        match directive {
            Directive::EntrySpacing(spacing) => self.entry_spacing = *spacing,
            Directive::Autonumber(start) => self.counter = *start,
            Directive::Space(steps) => {
                self.packer.close();
                self.deepest = self.deepest.max(self.cursor);
                let moved = self.cursor + f64::from(*steps) * self.config.space_unit;
                self.cursor = moved.max(self.body_top);
            }
            Directive::Linear(on) => {
                self.linear = *on;
                self.packer.close();
            }
            Directive::Parallel(on) => {
                self.parallel = *on;
                self.packer.close();
            }
            Directive::BottomParticipants => self.bottom_participants = true,
            Directive::Frame { .. } => self.frames.push(id),
            Directive::Activate { participant, color } => {
                self.activations.activate(participant, self.cursor, color.as_deref());
            }
            Directive::Deactivate(participant) | Directive::DeactivateAfter(participant) => {
                self.activations.deactivate(participant, self.cursor);
            }
            Directive::Destroy(participant) => {
                self.packer.close();
                let y = self.cursor;
                self.end_lifeline(participant, y, LifelineEnd::Destroyed);
                self.cursor += self.config.destroy_height;
            }
            Directive::DestroySilent(participant) => {
                let y = self.cursor;
                self.end_lifeline(participant, y, LifelineEnd::Silent);
            }
            Directive::DestroyAfter(participant) => {
                self.destroy_after.insert(participant.clone());
            }
            Directive::AutoActivation(on) => self.activations.set_auto_activation(*on),
            Directive::ActiveColor(color) => self.activations.set_active_color(color),
            Directive::Title(_)
            | Directive::ParticipantSpacing(_)
            | Directive::LifelineStyle { .. }
            | Directive::FontFamily(_)
            | Directive::NamedStyle { .. }
            | Directive::TypeStyle { .. } => {}
        }
    }

    fn place_note(&mut self, id: NodeId, note: &Note) {
        let config = self.config;
        let lines = text_lines(&note.text).count().max(1) as f64;
        let height = config
            .note_min_height
            .max(lines * config.note_line_height + 2.0 * config.fragment_padding);
        let mut width =
            config.note_width.max(text_width(&note.text, config) + 2.0 * config.participant_padding);
        let centers = note
            .participants
            .iter()
            .filter_map(|alias| self.columns.center(alias))
            .collect::<Vec<_>>();

        let Some(&anchor) = centers.first() else {
            self.place_band(id, height);
            return;
        };
        let top = self.stack(height);
        let x = match note.position {
            NotePosition::Over => {
                let left = centers.iter().copied().fold(anchor, f64::min);
                let right = centers.iter().copied().fold(anchor, f64::max);
                width = width.max(right - left + 2.0 * config.note_gap);
                (left + right) / 2.0 - width / 2.0
            }
            NotePosition::LeftOf => anchor - config.note_gap - width,
            NotePosition::RightOf => anchor + config.note_gap,
        };
        self.layout.insert(id, Geometry::Box(Rect::new(x, top, width, height)));
    }

    fn place_fragment(&mut self, id: NodeId, fragment: &'d Fragment) {
        let config = self.config;
        self.packer.close();
        let top = self.cursor;
        let mut else_ys = Vec::with_capacity(fragment.else_clauses.len());

        if fragment.is_collapsed() {
            self.cursor += config.fragment_header;
        } else {
            self.cursor += config.fragment_header + config.fragment_padding;
            self.place_section(&fragment.entries);
            for clause in &fragment.else_clauses {
                else_ys.push(self.cursor);
                self.cursor += config.fragment_else_header + config.fragment_padding;
                self.place_section(&clause.entries);
            }
            self.cursor += config.fragment_padding;
        }

        let (left, right) = self.fragment_bounds(fragment);
        let label_chars =
            fragment.fragment_type.keyword().chars().count() + 1 + fragment.condition.chars().count();
        let label_width = label_chars as f64 * config.char_width + 2.0 * config.participant_padding;
        let rect = Rect::new(left, top, (right - left).max(label_width), self.cursor - top);
        self.layout.insert(id, Geometry::Fragment(FragmentGeometry { rect, else_ys }));
    }

    /// Lays out one fragment section. Packing modes switched inside do not leak out.
    fn place_section(&mut self, ids: &[NodeId]) {
        let document = self.document;
        let modes = (self.linear, self.parallel);
        for id in ids {
            if let Some(child) = document.get(*id) {
                self.place(child);
            }
        }
        self.packer.close();
        (self.linear, self.parallel) = modes;
    }

    /// Horizontal extent of the participants that messages inside `fragment` touch, widened by
    /// one margin per nesting level so nested frames stay inside their parents. Without any
    /// such participant the frame spans every column.
    fn fragment_bounds(&self, fragment: &Fragment) -> (f64, f64) {
        let mut extent = None;
        let depth = self.fragment_extent(fragment, &mut extent, &mut HashSet::new());
        let margin = self.config.fragment_margin * (depth + 1) as f64;
        match extent {
            Some((left, right)) => (left - margin, right + margin),
            None if !self.columns.is_empty() => {
                (self.columns.left() - margin, self.columns.right() + margin)
            }
            None => (self.config.margin, self.config.margin + self.config.participant_min_width),
        }
    }

    fn fragment_extent(
        &self,
        fragment: &Fragment,
        extent: &mut Option<(f64, f64)>,
        seen: &mut HashSet<NodeId>,
    ) -> usize {
        let mut depth = 0;
        for id in fragment.all_entries() {
            if !seen.insert(id) {
                continue;
            }
            let Some(node) = self.document.get(id) else {
                continue;
            };
            match node.kind() {
                NodeKind::Message(message) => {
                    for alias in [&message.from, &message.to] {
                        let Some(rect) = self.columns.rect(alias) else {
                            continue;
                        };
                        let mut right = rect.right();
                        if message.is_self() {
                            right = right.max(rect.center_x() + self.config.self_message_width);
                        }
                        widen(extent, rect.x, right);
                    }
                }
                NodeKind::Fragment(inner) => {
                    depth = depth.max(1 + self.fragment_extent(inner, extent, seen));
                }
                _ => {}
            }
        }
        depth
    }

    fn finish(mut self, row_top: f64) -> SequenceLayout {
        let config = self.config;
        self.packer.close();
        let lifeline_bottom = self.cursor.max(self.deepest) + config.lifeline_top_gap;

        let mut participant_layout = BTreeMap::new();
        let mut footer_layout = BTreeMap::new();
        let mut lifelines = Vec::with_capacity(self.columns.order().len());
        for alias in self.columns.order() {
            let Some(column) = self.columns.rect(alias) else {
                continue;
            };
            let rect = self.created.get(alias).copied().unwrap_or(column);
            let (end_y, end) =
                self.ends.get(alias).copied().unwrap_or((lifeline_bottom, LifelineEnd::Bottom));
            lifelines.push(Lifeline {
                participant: alias.clone(),
                x: rect.center_x(),
                start_y: rect.bottom(),
                end_y: end_y.max(rect.bottom()),
                end,
            });
            if self.bottom_participants && end == LifelineEnd::Bottom {
                footer_layout
                    .insert(alias.clone(), Rect::new(rect.x, lifeline_bottom, rect.width, rect.height));
            }
            participant_layout.insert(alias.clone(), rect);
        }
        let content_bottom = if footer_layout.is_empty() {
            lifeline_bottom
        } else {
            lifeline_bottom + config.participant_height
        };

        let mut activations = self
            .activations
            .finish(lifeline_bottom)
            .into_iter()
            .filter_map(|interval| {
                let center = participant_layout.get(&interval.participant)?.center_x();
                let offset = interval.depth as f64 * config.activation_width / 2.0;
                Some(ActivationBar {
                    x: center - config.activation_width / 2.0 + offset,
                    width: config.activation_width,
                    participant: interval.participant,
                    start_y: interval.start_y,
                    end_y: interval.end_y,
                    depth: interval.depth,
                    color: interval.color,
                })
            })
            .collect::<Vec<_>>();

        let mut groups = Vec::new();
        for node in self.document.nodes() {
            match node.kind() {
                NodeKind::Participant(participant) => {
                    if let Some(rect) = participant_layout.get(&participant.alias) {
                        self.layout.insert(node.id(), Geometry::Box(*rect));
                    }
                }
                NodeKind::ParticipantGroup(group) => {
                    let mut extent = None;
                    let depth =
                        group_extent(self.document, group, &participant_layout, &mut extent, &mut HashSet::new());
                    if let Some((left, right)) = extent {
                        let pad = config.fragment_padding * (depth + 1) as f64;
                        let top = row_top - pad;
                        groups.push((
                            node.id(),
                            Rect::new(left - pad, top, right - left + 2.0 * pad, content_bottom + pad - top),
                        ));
                    }
                }
                _ => {}
            }
        }
        for (id, rect) in groups {
            self.layout.insert(id, Geometry::Box(rect));
        }

        let min_x = self
            .layout
            .values()
            .map(Geometry::min_x)
            .chain(participant_layout.values().map(|rect| rect.x))
            .fold(f64::INFINITY, f64::min);
        if min_x.is_finite() && min_x < config.margin {
            let dx = config.margin - min_x;
            tracing::trace!(dx, "shifting layout right");
            self.layout.values_mut().for_each(|geometry| geometry.shift_x(dx));
            for rect in participant_layout.values_mut().chain(footer_layout.values_mut()) {
                *rect = rect.shifted_x(dx);
            }
            lifelines.iter_mut().for_each(|lifeline| lifeline.x += dx);
            activations.iter_mut().for_each(|bar| bar.x += dx);
        }

        let max_x = self
            .layout
            .values()
            .map(|geometry| match geometry {
                Geometry::Message(message) if message.from_x == message.to_x => {
                    message.to_x + config.self_message_width
                }
                other => other.max_x(),
            })
            .chain(participant_layout.values().map(Rect::right))
            .fold(config.margin, f64::max);
        let total_width = max_x + config.margin;
        let total_height = content_bottom + config.margin;

        let frame = (!self.frames.is_empty()).then(|| {
            let inset = config.margin / 2.0;
            Rect::new(inset, inset, total_width - config.margin, total_height - config.margin)
        });
        if let Some(frame) = frame {
            for id in &self.frames {
                self.layout.insert(*id, Geometry::Box(frame));
            }
        }

        SequenceLayout {
            layout: self.layout,
            participant_layout,
            participant_order: self.columns.order().to_vec(),
            footer_layout,
            activations,
            lifelines,
            frame,
            total_height,
            total_width,
        }
    }
}

fn widen(extent: &mut Option<(f64, f64)>, left: f64, right: f64) {
    *extent = Some(match *extent {
        Some((lo, hi)) => (lo.min(left), hi.max(right)),
        None => (left, right),
    });
}

/// Union of the member boxes of `group` and its nested groups; returns the nesting depth.
fn group_extent(
    document: &SequenceDocument,
    group: &ParticipantGroup,
    participants: &BTreeMap<SmolStr, Rect>,
    extent: &mut Option<(f64, f64)>,
    seen: &mut HashSet<NodeId>,
) -> usize {
    for alias in &group.participants {
        if let Some(rect) = participants.get(alias) {
            widen(extent, rect.x, rect.right());
        }
    }
    let mut depth = 0;
    for id in &group.nested_groups {
        if !seen.insert(*id) {
            continue;
        }
        if let Some(NodeKind::ParticipantGroup(inner)) = document.get(*id).map(Node::kind) {
            depth = depth.max(1 + group_extent(document, inner, participants, extent, seen));
        }
    }
    depth
}
