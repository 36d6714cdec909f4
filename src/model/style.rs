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
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            "dotted" => Some(Self::Dotted),
            _ => None,
        }
    }

    pub fn as_keyword(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

/// Style attributes as written in the source.
///
/// Every field is optional and `None` means "never specified". The cascade in
/// [`StyleSheet`](super::resolve::StyleSheet) relies on that distinction, so parsing never fills
/// in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn has_border(&self) -> bool {
        self.border.is_some() || self.border_width.is_some() || self.border_style.is_some()
    }

    /// Fields set on `self` win; unset fields are taken from `base`.
    pub fn merged_over(&self, base: &Style) -> Style {
        Style {
            fill: self.fill.clone().or_else(|| base.fill.clone()),
            border: self.border.clone().or_else(|| base.border.clone()),
            border_width: self.border_width.or(base.border_width),
            border_style: self.border_style.or(base.border_style),
            operator_color: self.operator_color.clone().or_else(|| base.operator_color.clone()),
            text_markup: self.text_markup.clone().or_else(|| base.text_markup.clone()),
            style_name: self.style_name.clone().or_else(|| base.style_name.clone()),
        }
    }

    /// Wraps `self` in `Some` unless nothing was specified.
    pub fn non_empty(self) -> Option<Style> {
        (!self.is_empty()).then_some(self)
    }
}

/// Node kinds that can carry a document-wide default style (`<target>style ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTarget {
    Participant,
    Message,
    Note,
    Box,
    Abox,
    Rbox,
    Ref,
    State,
    Divider,
    Fragment,
    ParticipantGroup,
}

impl StyleTarget {
    pub const ALL: [StyleTarget; 11] = [
        Self::Participant,
        Self::Message,
        Self::Note,
        Self::Box,
        Self::Abox,
        Self::Rbox,
        Self::Ref,
        Self::State,
        Self::Divider,
        Self::Fragment,
        Self::ParticipantGroup,
    ];

    /// The directive keyword defining this target's type style.
    pub fn directive_keyword(self) -> &'static str {
        match self {
            Self::Participant => "participantstyle",
            Self::Message => "messagestyle",
            Self::Note => "notestyle",
            Self::Box => "boxstyle",
            Self::Abox => "aboxstyle",
            Self::Rbox => "rboxstyle",
            Self::Ref => "refstyle",
            Self::State => "statestyle",
            Self::Divider => "dividerstyle",
            Self::Fragment => "fragmentstyle",
            Self::ParticipantGroup => "participantgroupstyle",
        }
    }

    pub fn from_directive_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.directive_keyword() == keyword)
    }
}
