// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-participant activation stacks.

use std::collections::HashMap;

use smallvec::SmallVec;
use smol_str::SmolStr;

#[derive(Debug, Clone)]
struct OpenActivation {
    start_y: f64,
    color: Option<String>,
}

/// A closed activation, before it is given an x position.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationInterval {
    pub participant: SmolStr,
    pub start_y: f64,
    pub end_y: f64,
    pub depth: usize,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ActivationTracker {
    stacks: HashMap<SmolStr, SmallVec<[OpenActivation; 4]>>,
    auto_activation: bool,
    /// `(caller, callee)` for activations opened by `autoactivation`, most recent last.
    implicit: Vec<(SmolStr, SmolStr)>,
    active_color: Option<String>,
    finished: Vec<ActivationInterval>,
}

impl ActivationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_auto_activation(&mut self, on: bool) {
        self.auto_activation = on;
    }

    /// Default color for activations that do not name one.
    pub fn set_active_color(&mut self, color: &str) {
        self.active_color = Some(color.to_owned());
    }

    pub fn depth(&self, participant: &str) -> usize {
        self.stacks.get(participant).map_or(0, SmallVec::len)
    }

    pub fn activate(&mut self, participant: &str, y: f64, color: Option<&str>) {
        let color = color.map(str::to_owned).or_else(|| self.active_color.clone());
        self.stacks
            .entry(SmolStr::from(participant))
            .or_default()
            .push(OpenActivation { start_y: y, color });
    }

    /// Pops the innermost activation of `participant`. Returns `false` when none is open.
    pub fn deactivate(&mut self, participant: &str, y: f64) -> bool {
        let Some(stack) = self.stacks.get_mut(participant) else {
            tracing::trace!(participant, "deactivate without open activation");
            return false;
        };
        let Some(open) = stack.pop() else {
            tracing::trace!(participant, "deactivate without open activation");
            return false;
        };
        let depth = stack.len();
        self.finished.push(ActivationInterval {
            participant: SmolStr::from(participant),
            start_y: open.start_y,
            end_y: y.max(open.start_y),
            depth,
            color: open.color,
        });
        true
    }

    /// Closes every open activation of `participant`, innermost first.
    pub fn deactivate_all(&mut self, participant: &str, y: f64) {
        while self.deactivate(participant, y) {}
        self.implicit.retain(|(caller, callee)| caller != participant && callee != participant);
    }

    /// Applies `autoactivation` to a message from `sender` to `receiver`.
    ///
    /// A message answering an implicit activation (callee back to caller) closes it at `send_y`.
    /// Otherwise, with auto-activation on, a receiver with nothing open is activated at
    /// `arrive_y`.
    pub fn on_message(&mut self, sender: &str, receiver: &str, send_y: f64, arrive_y: f64) {
        if let Some(pos) = self
            .implicit
            .iter()
            .rposition(|(caller, callee)| callee == sender && caller == receiver)
        {
            self.implicit.remove(pos);
            self.deactivate(sender, send_y);
            return;
        }
        if self.auto_activation && sender != receiver && self.depth(receiver) == 0 {
            self.activate(receiver, arrive_y, None);
            self.implicit.push((SmolStr::from(sender), SmolStr::from(receiver)));
        }
    }

    /// Closes whatever is still open at `end_y` and returns every interval, ordered by
    /// participant, start and depth.
    pub fn finish(mut self, end_y: f64) -> Vec<ActivationInterval> {
        let open = self.stacks.keys().cloned().collect::<Vec<_>>();
        for participant in open {
            while self.deactivate(&participant, end_y) {}
        }
        let mut finished = self.finished;
        finished.sort_by(|a, b| {
            a.participant
                .cmp(&b.participant)
                .then(a.start_y.total_cmp(&b.start_y))
                .then(a.depth.cmp(&b.depth))
        });
        finished
    }
}
