// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The sequence DSL: a line-oriented grammar with `end`-terminated blocks.

mod classify;
mod declaration;
mod directive;
mod ident;
mod message;
mod parser;
mod serializer;
mod style_spec;

pub use ident::{validate_alias, AliasError};
pub use parser::{parse, parse_with_ids};
pub use serializer::serialize;
