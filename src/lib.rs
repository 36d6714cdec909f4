// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seqline: a line-oriented sequence diagram language.
//!
//! - [`format::parse`] turns text into a [`model::SequenceDocument`], never failing; malformed
//!   lines and unclosed blocks become error nodes.
//! - [`format::serialize`] writes the one canonical text form back out.
//! - [`layout::calculate_layout`] assigns coordinates to everything that is drawn.

pub mod format;
pub mod layout;
pub mod model;

pub use format::{parse, parse_with_ids, serialize};
pub use layout::{calculate_layout, calculate_layout_with, LayoutConfig, SequenceLayout};
pub use model::{NodeId, NodeIdGenerator, SequenceDocument};

#[cfg(test)]
mod tests {
    use super::{calculate_layout, parse, serialize};

    #[test]
    fn pipeline_runs_end_to_end() {
        let text = "title Login\nUser->Server:credentials\nServer-->User:token";
        let document = parse(text);
        assert!(!document.has_errors());
        assert_eq!(serialize(&document), format!("{text}\n"));
        let layout = calculate_layout(&document);
        assert_eq!(layout.participant_order().len(), 2);
    }
}
