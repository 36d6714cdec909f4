// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Forward,
    Reversed,
    Bidirectional,
    Lost,
}

/// The closed catalogue of message arrows.
///
/// Every arrow decomposes into `left head`, a run of one or two dashes and a `right head`. The
/// inline-style form inserts `[spec]` after the first dash, so `->` becomes `-[spec]->`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowType {
    /// `->`
    Sync,
    /// `->>`
    Async,
    /// `-->`
    Dashed,
    /// `-->>`
    DashedAsync,
    /// `<-`
    Reversed,
    /// `<--`
    DashedReversed,
    /// `<->`
    Bidirectional,
    /// `<->>`
    BidirectionalAsync,
    /// `<-->>`
    DashedBidirectionalAsync,
    /// `-x`
    Lost,
    /// `--x`
    DashedLost,
}

impl ArrowType {
    pub const ALL: [ArrowType; 11] = [
        Self::Sync,
        Self::Async,
        Self::Dashed,
        Self::DashedAsync,
        Self::Reversed,
        Self::DashedReversed,
        Self::Bidirectional,
        Self::BidirectionalAsync,
        Self::DashedBidirectionalAsync,
        Self::Lost,
        Self::DashedLost,
    ];

    fn parts(self) -> (&'static str, usize, &'static str) {
        match self {
            Self::Sync => ("", 1, ">"),
            Self::Async => ("", 1, ">>"),
            Self::Dashed => ("", 2, ">"),
            Self::DashedAsync => ("", 2, ">>"),
            Self::Reversed => ("<", 1, ""),
            Self::DashedReversed => ("<", 2, ""),
            Self::Bidirectional => ("<", 1, ">"),
            Self::BidirectionalAsync => ("<", 1, ">>"),
            Self::DashedBidirectionalAsync => ("<", 2, ">>"),
            Self::Lost => ("", 1, "x"),
            Self::DashedLost => ("", 2, "x"),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Sync => "->",
            Self::Async => "->>",
            Self::Dashed => "-->",
            Self::DashedAsync => "-->>",
            Self::Reversed => "<-",
            Self::DashedReversed => "<--",
            Self::Bidirectional => "<->",
            Self::BidirectionalAsync => "<->>",
            Self::DashedBidirectionalAsync => "<-->>",
            Self::Lost => "-x",
            Self::DashedLost => "--x",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|arrow| arrow.token() == token)
    }

    /// Text written before `[spec]` in the styled form.
    pub fn styled_prefix(self) -> &'static str {
        match self.parts().0 {
            "<" => "<-",
            _ => "-",
        }
    }

    /// Text written after `[spec]` in the styled form.
    pub fn styled_suffix(self) -> String {
        let (_, dashes, right) = self.parts();
        let mut out = "-".repeat(dashes);
        out.push_str(right);
        out
    }

    pub fn is_dashed(self) -> bool {
        self.parts().1 == 2
    }

    pub fn is_async(self) -> bool {
        self.parts().2 == ">>"
    }

    pub fn direction(self) -> ArrowDirection {
        match self.parts() {
            (_, _, "x") => ArrowDirection::Lost,
            ("<", _, "") => ArrowDirection::Reversed,
            ("<", _, _) => ArrowDirection::Bidirectional,
            _ => ArrowDirection::Forward,
        }
    }
}
