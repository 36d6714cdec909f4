// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: the flat node arena, node payloads and style values.

pub mod arrow;
pub mod document;
pub mod ids;
pub mod node;
pub mod resolve;
pub mod style;

pub use arrow::{ArrowDirection, ArrowType};
pub use document::{DocumentError, OwnershipIndex, SemanticMember, SemanticNode, SequenceDocument};
pub use ids::{NodeId, NodeIdError, NodeIdGenerator};
pub use node::{
    Comment, Directive, Divider, ElseClause, Fragment, FragmentType, IconSet, Message, Node,
    NodeKind, Note, NoteKind, NotePosition, ParseErrorKind, ParseErrorNode, Participant,
    ParticipantGroup, ParticipantSpacing, ParticipantType,
};
pub use resolve::StyleSheet;
pub use style::{BorderStyle, Style, StyleTarget};
