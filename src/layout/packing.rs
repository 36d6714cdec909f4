// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Greedy level packing for `linear` / `parallel` regions.
//!
//! Messages arrive in source order. Each one either joins the open level, when its horizontal
//! span overlaps none of the spans already claimed there, or opens a new level below. Spans
//! that merely touch (`[a, b]` and `[b, c]`) do not overlap.

use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(a: f64, b: f64) -> Self {
        Self { start: a.min(b), end: a.max(b) }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Shares the open level whose slot starts at `top`.
    Joined { top: f64 },
    /// Starts a new level; the caller places it at the cursor.
    Opened,
}

#[derive(Debug, Clone, Default)]
struct Level {
    top: f64,
    bottom: f64,
    claimed: SmallVec<[Span; 8]>,
}

#[derive(Debug, Clone, Default)]
pub struct LevelPacker {
    open: Option<Level>,
}

impl LevelPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides where a message spanning `span` goes. Does not claim it; see [`Self::claim`].
    pub fn place(&self, span: Span) -> Placement {
        match &self.open {
            Some(level) if !level.claimed.iter().any(|claimed| claimed.overlaps(&span)) => {
                Placement::Joined { top: level.top }
            }
            _ => Placement::Opened,
        }
    }

    /// Records `span` on the level starting at `top`, opening it when needed. `bottom` is where
    /// the message's slot ends.
    pub fn claim(&mut self, span: Span, top: f64, bottom: f64) {
        if let Some(level) = self.open.as_mut().filter(|level| level.top == top) {
            level.claimed.push(span);
            level.bottom = level.bottom.max(bottom);
            return;
        }
        tracing::trace!(top, "opened packing level");
        let mut claimed = SmallVec::new();
        claimed.push(span);
        self.open = Some(Level { top, bottom, claimed });
    }

    /// Bottom of the open level's tallest slot.
    pub fn bottom(&self) -> Option<f64> {
        self.open.as_ref().map(|level| level.bottom)
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{LevelPacker, Placement, Span};

    #[test]
    fn touching_spans_share_a_level() {
        let mut packer = LevelPacker::new();
        assert_eq!(packer.place(Span::new(0.0, 100.0)), Placement::Opened);
        packer.claim(Span::new(0.0, 100.0), 10.0, 40.0);

        assert_eq!(packer.place(Span::new(100.0, 200.0)), Placement::Joined { top: 10.0 });
        packer.claim(Span::new(100.0, 200.0), 10.0, 50.0);
        assert_eq!(packer.bottom(), Some(50.0));

        assert_eq!(packer.place(Span::new(0.0, 200.0)), Placement::Opened);
    }

    #[test]
    fn ties_follow_arrival_order() {
        let mut packer = LevelPacker::new();
        packer.claim(Span::new(0.0, 300.0), 0.0, 10.0);
        assert_eq!(packer.place(Span::new(50.0, 60.0)), Placement::Opened);
        packer.claim(Span::new(50.0, 60.0), 10.0, 20.0);
        assert_eq!(packer.place(Span::new(200.0, 100.0)), Placement::Joined { top: 10.0 });
    }

    #[test]
    fn closing_forgets_claims() {
        let mut packer = LevelPacker::new();
        packer.claim(Span::new(0.0, 10.0), 0.0, 5.0);
        packer.close();
        assert!(!packer.is_open());
        assert_eq!(packer.place(Span::new(20.0, 30.0)), Placement::Opened);
    }

    #[test]
    fn span_normalizes_direction() {
        let span = Span::new(80.0, 20.0);
        assert_eq!((span.start, span.end), (20.0, 80.0));
        assert!(span.overlaps(&Span::new(30.0, 40.0)));
        assert!(!span.overlaps(&Span::new(80.0, 90.0)));
    }
}
