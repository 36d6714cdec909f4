// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout for sequence documents.
//!
//! Assigns coordinates to participants, messages, notes, fragments and activation bars in one
//! forward pass over the document.

pub mod activation;
mod columns;
pub mod config;
pub mod geometry;
pub mod packing;
pub mod sequence;

pub use config::{ConfigError, LayoutConfig};
pub use geometry::{
    ActivationBar, FragmentGeometry, Geometry, Lifeline, LifelineEnd, MessageGeometry, Rect,
};
pub use sequence::{calculate_layout, calculate_layout_with, SequenceLayout};
