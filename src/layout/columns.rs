// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Horizontal placement of participant columns.

use std::collections::HashMap;

use smol_str::SmolStr;

use super::config::LayoutConfig;
use super::geometry::Rect;
use crate::model::document::SequenceDocument;
use crate::model::node::{Directive, NodeKind, ParticipantSpacing};

/// Splits label text on real newlines and on the literal `\n` markup escape.
pub(crate) fn text_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split('\n').flat_map(|line| line.split("\\n"))
}

pub(crate) fn text_width(text: &str, config: &LayoutConfig) -> f64 {
    let widest = text_lines(text).map(|line| line.chars().count()).max().unwrap_or(0);
    widest as f64 * config.char_width
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Columns {
    order: Vec<SmolStr>,
    index: HashMap<SmolStr, usize>,
    rects: Vec<Rect>,
}

impl Columns {
    pub(crate) fn order(&self) -> &[SmolStr] {
        &self.order
    }

    pub(crate) fn index_of(&self, alias: &str) -> Option<usize> {
        self.index.get(alias).copied()
    }

    pub(crate) fn rect(&self, alias: &str) -> Option<Rect> {
        self.index_of(alias).map(|idx| self.rects[idx])
    }

    pub(crate) fn center(&self, alias: &str) -> Option<f64> {
        self.rect(alias).map(|rect| rect.center_x())
    }

    pub(crate) fn left(&self) -> f64 {
        self.rects.first().map_or(0.0, |rect| rect.x)
    }

    pub(crate) fn right(&self) -> f64 {
        self.rects.last().map_or(0.0, Rect::right)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Default)]
struct Roster {
    order: Vec<SmolStr>,
    index: HashMap<SmolStr, usize>,
    display: HashMap<SmolStr, String>,
}

impl Roster {
    fn mention(&mut self, alias: &str) -> usize {
        if let Some(&idx) = self.index.get(alias) {
            return idx;
        }
        let idx = self.order.len();
        self.order.push(SmolStr::from(alias));
        self.index.insert(SmolStr::from(alias), idx);
        idx
    }
}

/// Participants in order of first appearance, declared or referenced.
fn collect_roster(document: &SequenceDocument) -> Roster {
    let mut roster = Roster::default();
    for node in document.nodes() {
        match node.kind() {
            NodeKind::Participant(participant) => {
                roster.mention(&participant.alias);
                roster
                    .display
                    .entry(participant.alias.clone())
                    .or_insert_with(|| participant.display_name.clone());
            }
            NodeKind::Message(message) => {
                roster.mention(&message.from);
                roster.mention(&message.to);
            }
            NodeKind::Note(note) => {
                for alias in &note.participants {
                    roster.mention(alias);
                }
            }
            NodeKind::Directive(directive) => match directive {
                Directive::Activate { participant, .. }
                | Directive::Deactivate(participant)
                | Directive::DeactivateAfter(participant)
                | Directive::Destroy(participant)
                | Directive::DestroyAfter(participant)
                | Directive::DestroySilent(participant)
                | Directive::LifelineStyle { participant: Some(participant), .. } => {
                    roster.mention(participant);
                }
                _ => {}
            },
            _ => {}
        }
    }
    roster
}

fn last_spacing(document: &SequenceDocument) -> Option<ParticipantSpacing> {
    document.nodes().iter().rev().find_map(|node| match node.kind() {
        NodeKind::Directive(Directive::ParticipantSpacing(spacing)) => Some(*spacing),
        _ => None,
    })
}

/// Places every participant box on the row starting at `top`.
///
/// Center distances start at `gap + half widths` and widen so that message labels fit between
/// the columns they connect; a label spanning several columns spreads its deficit evenly.
pub(crate) fn place_columns(document: &SequenceDocument, config: &LayoutConfig, top: f64) -> Columns {
    let roster = collect_roster(document);
    let count = roster.order.len();
    if count == 0 {
        return Columns::default();
    }

    let spacing = last_spacing(document);
    let mut widths = roster
        .order
        .iter()
        .map(|alias| {
            let name = roster.display.get(alias).map_or(alias.as_str(), String::as_str);
            (text_width(name, config) + 2.0 * config.participant_padding)
                .max(config.participant_min_width)
        })
        .collect::<Vec<_>>();
    if spacing == Some(ParticipantSpacing::Equal) {
        let widest = widths.iter().copied().fold(0.0, f64::max);
        widths.iter_mut().for_each(|width| *width = widest);
    }
    let gap = match spacing {
        Some(ParticipantSpacing::Gap(gap)) => gap,
        _ => config.participant_gap,
    };

    let mut distances = (0..count.saturating_sub(1))
        .map(|idx| widths[idx] / 2.0 + gap + widths[idx + 1] / 2.0)
        .collect::<Vec<_>>();

    for node in document.nodes() {
        let NodeKind::Message(message) = node.kind() else {
            continue;
        };
        let (Some(&from), Some(&to)) =
            (roster.index.get(message.from.as_str()), roster.index.get(message.to.as_str()))
        else {
            continue;
        };
        let label = text_width(&message.label, config) + 2.0 * config.participant_padding;
        if from == to {
            if let Some(distance) = distances.get_mut(from) {
                *distance = distance.max(config.self_message_width + label);
            }
            continue;
        }
        let (lo, hi) = (from.min(to), from.max(to));
        let current: f64 = distances[lo..hi].iter().sum();
        if current < label {
            let extra = (label - current) / (hi - lo) as f64;
            distances[lo..hi].iter_mut().for_each(|distance| *distance += extra);
        }
    }

    let mut rects = Vec::with_capacity(count);
    let mut center = config.margin + widths[0] / 2.0;
    for idx in 0..count {
        if idx > 0 {
            center += distances[idx - 1];
        }
        let width = widths[idx];
        rects.push(Rect::new(center - width / 2.0, top, width, config.participant_height));
    }

    Columns { order: roster.order, index: roster.index, rects }
}
