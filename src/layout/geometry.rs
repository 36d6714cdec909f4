// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn shifted_x(self, dx: f64) -> Self {
        Self { x: self.x + dx, ..self }
    }
}

/// A message arrow. `y` is where it leaves the sender, `end_y` where it reaches the receiver;
/// the two differ only for delayed messages and self loops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MessageGeometry {
    pub y: f64,
    pub end_y: f64,
    pub from_x: f64,
    pub to_x: f64,
    /// Vertical slot the message occupies, label included.
    pub height: f64,
    /// Autonumber prefix, when numbering is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl MessageGeometry {
    /// Horizontal span `[min, max]` of the arrow.
    pub fn span(&self) -> (f64, f64) {
        (self.from_x.min(self.to_x), self.from_x.max(self.to_x))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentGeometry {
    #[serde(flatten)]
    pub rect: Rect,
    /// Y of each `else` separator, in clause order.
    pub else_ys: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    Box(Rect),
    Message(MessageGeometry),
    Fragment(FragmentGeometry),
}

impl Geometry {
    pub fn as_rect(&self) -> Option<&Rect> {
        match self {
            Self::Box(rect) => Some(rect),
            Self::Fragment(fragment) => Some(&fragment.rect),
            Self::Message(_) => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageGeometry> {
        match self {
            Self::Message(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&FragmentGeometry> {
        match self {
            Self::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }

    /// Leftmost x covered by this geometry.
    pub(crate) fn min_x(&self) -> f64 {
        match self {
            Self::Box(rect) => rect.x,
            Self::Fragment(fragment) => fragment.rect.x,
            Self::Message(message) => message.span().0,
        }
    }

    pub(crate) fn max_x(&self) -> f64 {
        match self {
            Self::Box(rect) => rect.right(),
            Self::Fragment(fragment) => fragment.rect.right(),
            Self::Message(message) => message.span().1,
        }
    }

    pub(crate) fn shift_x(&mut self, dx: f64) {
        match self {
            Self::Box(rect) => *rect = rect.shifted_x(dx),
            Self::Fragment(fragment) => fragment.rect = fragment.rect.shifted_x(dx),
            Self::Message(message) => {
                message.from_x += dx;
                message.to_x += dx;
            }
        }
    }
}

/// A finished activation interval on one participant's lifeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationBar {
    pub participant: SmolStr,
    pub start_y: f64,
    pub end_y: f64,
    /// Nesting level on the participant's stack; 0 is the outermost bar.
    pub depth: usize,
    pub x: f64,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ActivationBar {
    /// True when `inner` lies within `self` in time.
    pub fn contains(&self, inner: &ActivationBar) -> bool {
        self.start_y <= inner.start_y && inner.end_y <= self.end_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifelineEnd {
    /// Runs to the bottom of the diagram.
    Bottom,
    /// Ends in a destroy marker.
    Destroyed,
    /// Ends without a marker (`destroysilent`).
    Silent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lifeline {
    pub participant: SmolStr,
    pub x: f64,
    pub start_y: f64,
    pub end_y: f64,
    pub end: LifelineEnd,
}
