// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Opaque identifier for a node in a [`SequenceDocument`](super::SequenceDocument) arena.
///
/// IDs are only meaningful within the document that produced them; two independent parses may
/// hand out the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeIdError {
    MissingPrefix,
    InvalidNumber,
}

impl fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix => f.write_str("node id must start with 'n'"),
            Self::InvalidNumber => f.write_str("node id must be 'n' followed by a number"),
        }
    }
}

impl std::error::Error for NodeIdError {}

impl FromStr for NodeId {
    type Err = NodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('n').ok_or(NodeIdError::MissingPrefix)?;
        digits.parse::<u32>().map(Self).map_err(|_| NodeIdError::InvalidNumber)
    }
}

/// Hands out fresh [`NodeId`]s. Owned by a parser instance, never shared globally.
#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    next: u32,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts numbering at `first`; useful when appending to an existing document.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    pub fn issued(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeId, NodeIdError, NodeIdGenerator};

    #[test]
    fn generator_never_repeats_within_a_run() {
        let mut ids = NodeIdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn node_id_display_round_trips() {
        let mut ids = NodeIdGenerator::starting_at(41);
        let id = ids.next_id();
        assert_eq!(id.to_string(), "n41");
        assert_eq!("n41".parse::<NodeId>(), Ok(id));
    }

    #[test]
    fn node_id_rejects_malformed_text() {
        assert_eq!("41".parse::<NodeId>(), Err(NodeIdError::MissingPrefix));
        assert_eq!("nx".parse::<NodeId>(), Err(NodeIdError::InvalidNumber));
    }
}
