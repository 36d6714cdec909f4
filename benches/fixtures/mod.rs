// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark documents (no RNG).

use std::fmt::Write as _;

use seqline::layout::{Geometry, SequenceLayout};
use seqline::model::{NodeKind, SequenceDocument};

const ARROWS: [&str; 11] = ["->", "->>", "-->", "-->>", "<-", "<--", "<->", "<->>", "<-->>", "-x", "--x"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub participants: usize,
    pub messages: usize,
    pub long_text: bool,
    /// Every `fragment_every` messages a fragment opens; 0 disables fragments.
    pub fragment_every: usize,
}

impl Params {
    pub const fn new(participants: usize, messages: usize, long_text: bool, fragment_every: usize) -> Self {
        Self { participants, messages, long_text, fragment_every }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    MediumNested,
    LargeLongText,
}

impl Case {
    pub const ALL: [Case; 4] = [Self::Small, Self::Medium, Self::MediumNested, Self::LargeLongText];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::MediumNested => "medium_nested",
            Self::LargeLongText => "large_long_text",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Small => Params::new(6, 40, false, 0),
            Self::Medium => Params::new(16, 400, false, 20),
            Self::MediumNested => Params::new(16, 400, false, 4),
            Self::LargeLongText => Params::new(40, 2_000, true, 25),
        }
    }
}

fn participant(idx: usize) -> String {
    format!("P{idx:03}")
}

fn label(idx: usize, long_text: bool) -> String {
    if long_text {
        let mut out = format!("request_{idx:06} ");
        while out.len() < 120 {
            out.push_str("payload ");
        }
        out
    } else {
        format!("m{idx:04}")
    }
}

/// Builds the text of a document exercising messages, fragments, notes, activations and
/// linear sections. Fragments nest up to three deep before closing.
pub fn document(params: Params) -> String {
    assert!(params.participants >= 2, "participants must be >= 2");

    let mut out = String::new();
    out.push_str("title Benchmark\nautonumber\nautoactivation on\n");
    for idx in 0..params.participants {
        let _ = writeln!(out, "participant {}", participant(idx));
    }

    let mut depth = 0usize;
    for idx in 0..params.messages {
        if params.fragment_every > 0 && idx % params.fragment_every == 0 && idx > 0 {
            if depth < 3 {
                let keyword = ["alt", "loop", "opt"][depth];
                let _ = writeln!(out, "{keyword} case {idx}");
                depth += 1;
            } else {
                out.push_str("else otherwise\n");
            }
        }
        let from = participant(idx % params.participants);
        let to = participant((idx * 7 + 1) % params.participants);
        let arrow = ARROWS[idx % ARROWS.len()];
        let _ = writeln!(out, "{from}{arrow}{to}:{}", label(idx, params.long_text));

        match idx % 17 {
            3 => {
                let _ = writeln!(out, "note over {from},{to}:checkpoint {idx}");
            }
            7 => {
                let _ = writeln!(out, "activate {to}");
            }
            11 => {
                let _ = writeln!(out, "deactivate {to}");
            }
            13 => out.push_str("linear\n"),
            16 => out.push_str("linear off\n"),
            _ => {}
        }
        if params.fragment_every > 0 && idx % (params.fragment_every * 5) == params.fragment_every * 5 - 1 {
            while depth > 0 {
                out.push_str("end\n");
                depth -= 1;
            }
        }
    }
    while depth > 0 {
        out.push_str("end\n");
        depth -= 1;
    }
    out
}

pub fn fixture(case: Case) -> String {
    document(case.params())
}

pub fn checksum_document(document: &SequenceDocument) -> u64 {
    let mut acc = 0u64;
    for node in document.nodes() {
        acc = acc.wrapping_mul(131).wrapping_add(u64::from(node.id().as_u32()));
        acc = acc.wrapping_mul(131).wrapping_add(node.line_start() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.type_name().len() as u64);
        acc = match node.kind() {
            NodeKind::Message(message) => acc
                .wrapping_mul(131)
                .wrapping_add((message.from.len() + message.to.len() + message.label.len()) as u64),
            NodeKind::Fragment(fragment) => {
                acc.wrapping_mul(131).wrapping_add(fragment.all_entries().count() as u64)
            }
            _ => acc,
        };
    }
    acc
}

pub fn checksum_layout(layout: &SequenceLayout) -> u64 {
    let mut acc = 0u64;
    for (id, geometry) in layout.layout() {
        acc = acc.wrapping_mul(131).wrapping_add(u64::from(id.as_u32()));
        let y = match geometry {
            Geometry::Message(message) => message.y,
            other => other.as_rect().map_or(0.0, |rect| rect.y),
        };
        acc = acc.wrapping_mul(131).wrapping_add(y.to_bits());
    }
    acc = acc.wrapping_mul(131).wrapping_add(layout.activations().len() as u64);
    acc.wrapping_mul(131).wrapping_add(layout.total_height().to_bits())
}
