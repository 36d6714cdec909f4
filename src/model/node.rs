// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use smol_str::SmolStr;

use super::arrow::{ArrowDirection, ArrowType};
use super::ids::NodeId;
use super::style::{Style, StyleTarget};

/// One entry of a [`SequenceDocument`](super::SequenceDocument).
///
/// Nodes are value data: the parser builds them once and later edits produce new nodes through
/// [`Node::with_kind`] instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: NodeId,
    line_start: usize,
    line_end: usize,
    #[serde(flatten)]
    kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, line_start: usize, line_end: usize, kind: NodeKind) -> Self {
        Self { id, line_start, line_end, kind }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// First source line (1-based, inclusive).
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Last source line (1-based, inclusive).
    pub fn line_end(&self) -> usize {
        self.line_end
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NodeKind::Error(_))
    }

    /// Structural copy with a new payload; identity and source range are kept.
    pub fn with_kind(&self, kind: NodeKind) -> Node {
        Node { id: self.id, line_start: self.line_start, line_end: self.line_end, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NodeKind {
    Participant(Participant),
    Message(Message),
    Fragment(Fragment),
    ParticipantGroup(ParticipantGroup),
    Note(Note),
    Divider(Divider),
    Comment(Comment),
    Blankline,
    Directive(Directive),
    Error(ParseErrorNode),
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Participant(_) => "participant",
            Self::Message(_) => "message",
            Self::Fragment(_) => "fragment",
            Self::ParticipantGroup(_) => "participantgroup",
            Self::Note(_) => "note",
            Self::Divider(_) => "divider",
            Self::Comment(_) => "comment",
            Self::Blankline => "blankline",
            Self::Directive(_) => "directive",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSet {
    MaterialDesignIcons,
    FontAwesome5Solid,
    FontAwesome5Regular,
    FontAwesome5Brands,
    FontAwesome6Solid,
    FontAwesome6Regular,
    FontAwesome6Brands,
}

impl IconSet {
    pub const ALL: [IconSet; 7] = [
        Self::MaterialDesignIcons,
        Self::FontAwesome5Solid,
        Self::FontAwesome5Regular,
        Self::FontAwesome5Brands,
        Self::FontAwesome6Solid,
        Self::FontAwesome6Regular,
        Self::FontAwesome6Brands,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::MaterialDesignIcons => "materialdesignicons",
            Self::FontAwesome5Solid => "fontawesome5solid",
            Self::FontAwesome5Regular => "fontawesome5regular",
            Self::FontAwesome5Brands => "fontawesome5brands",
            Self::FontAwesome6Solid => "fontawesome6solid",
            Self::FontAwesome6Regular => "fontawesome6regular",
            Self::FontAwesome6Brands => "fontawesome6brands",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.keyword() == keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParticipantType {
    Participant,
    Actor,
    Database,
    Boundary,
    Control,
    Entity,
    Icon { set: IconSet, code: String },
    Image { data: String },
}

impl ParticipantType {
    /// Keyword for the kinds that take no extra argument.
    pub fn simple_keyword(&self) -> Option<&'static str> {
        match self {
            Self::Participant => Some("participant"),
            Self::Actor => Some("actor"),
            Self::Database => Some("database"),
            Self::Boundary => Some("boundary"),
            Self::Control => Some("control"),
            Self::Entity => Some("entity"),
            Self::Icon { .. } | Self::Image { .. } => None,
        }
    }

    pub fn from_simple_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "participant" => Some(Self::Participant),
            "actor" => Some(Self::Actor),
            "database" => Some(Self::Database),
            "boundary" => Some(Self::Boundary),
            "control" => Some(Self::Control),
            "entity" => Some(Self::Entity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub participant_type: ParticipantType,
    /// Key used by messages, notes and directives.
    pub alias: SmolStr,
    pub display_name: String,
    pub style: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub from: SmolStr,
    pub to: SmolStr,
    pub arrow: ArrowType,
    /// Vertical slope in delay units; `Some(0)` draws flat.
    pub delay: Option<u32>,
    pub is_create: bool,
    pub style: Option<Style>,
    pub label: String,
}

impl Message {
    pub fn is_self(&self) -> bool {
        self.from == self.to
    }

    /// `(sender, receiver)` after taking the arrow direction into account.
    pub fn flow(&self) -> (&str, &str) {
        match self.arrow.direction() {
            ArrowDirection::Reversed => (self.to.as_str(), self.from.as_str()),
            _ => (self.from.as_str(), self.to.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentType {
    Alt,
    Loop,
    Opt,
    Par,
    Break,
    Critical,
    Ref,
    Seq,
    Strict,
    Neg,
    Ignore,
    Consider,
    Assert,
    Region,
    Group,
    Expandable,
}

impl FragmentType {
    pub const ALL: [FragmentType; 16] = [
        Self::Alt,
        Self::Loop,
        Self::Opt,
        Self::Par,
        Self::Break,
        Self::Critical,
        Self::Ref,
        Self::Seq,
        Self::Strict,
        Self::Neg,
        Self::Ignore,
        Self::Consider,
        Self::Assert,
        Self::Region,
        Self::Group,
        Self::Expandable,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Alt => "alt",
            Self::Loop => "loop",
            Self::Opt => "opt",
            Self::Par => "par",
            Self::Break => "break",
            Self::Critical => "critical",
            Self::Ref => "ref",
            Self::Seq => "seq",
            Self::Strict => "strict",
            Self::Neg => "neg",
            Self::Ignore => "ignore",
            Self::Consider => "consider",
            Self::Assert => "assert",
            Self::Region => "region",
            Self::Group => "group",
            Self::Expandable => "expandable",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseClause {
    pub condition: String,
    pub style: Option<Style>,
    pub entries: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub fragment_type: FragmentType,
    pub condition: String,
    pub style: Option<Style>,
    pub entries: Vec<NodeId>,
    pub else_clauses: Vec<ElseClause>,
    /// Only set for `expandable` fragments.
    pub collapsed: Option<bool>,
}

impl Fragment {
    pub fn is_collapsed(&self) -> bool {
        self.collapsed == Some(true)
    }

    /// Every child id, main entries first, then each else clause in order.
    pub fn all_entries(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries
            .iter()
            .copied()
            .chain(self.else_clauses.iter().flat_map(|clause| clause.entries.iter().copied()))
    }

    /// Copy with `collapsed` toggled; non-expandable fragments are returned unchanged.
    pub fn with_collapsed(&self, collapsed: bool) -> Fragment {
        let mut copy = self.clone();
        if copy.fragment_type == FragmentType::Expandable {
            copy.collapsed = Some(collapsed);
        }
        copy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantGroup {
    pub color: Option<String>,
    pub label: String,
    pub participants: Vec<SmolStr>,
    pub nested_groups: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Note,
    Box,
    Abox,
    Rbox,
    Ref,
    State,
}

impl NoteKind {
    pub const ALL: [NoteKind; 6] =
        [Self::Note, Self::Box, Self::Abox, Self::Rbox, Self::Ref, Self::State];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Box => "box",
            Self::Abox => "abox",
            Self::Rbox => "rbox",
            Self::Ref => "ref",
            Self::State => "state",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    pub fn style_target(self) -> StyleTarget {
        match self {
            Self::Note => StyleTarget::Note,
            Self::Box => StyleTarget::Box,
            Self::Abox => StyleTarget::Abox,
            Self::Rbox => StyleTarget::Rbox,
            Self::Ref => StyleTarget::Ref,
            Self::State => StyleTarget::State,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotePosition {
    Over,
    LeftOf,
    RightOf,
}

impl NotePosition {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::LeftOf => "left of",
            Self::RightOf => "right of",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub kind: NoteKind,
    pub position: NotePosition,
    pub participants: Vec<SmolStr>,
    pub style: Option<Style>,
    pub text: String,
    /// Written as a multi-line block terminated by `end <kind>`.
    pub block: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Divider {
    pub text: String,
    pub style: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum ParticipantSpacing {
    Equal,
    Gap(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "directive", content = "value", rename_all = "snake_case")]
pub enum Directive {
    Title(String),
    EntrySpacing(f64),
    /// `Some(n)` starts numbering at `n`; `None` is `autonumber off`.
    Autonumber(Option<u32>),
    Space(i32),
    ParticipantSpacing(ParticipantSpacing),
    LifelineStyle { participant: Option<SmolStr>, style: Style },
    Linear(bool),
    Parallel(bool),
    BottomParticipants,
    FontFamily(String),
    Frame { label: String, style: Option<Style> },
    Destroy(SmolStr),
    DestroyAfter(SmolStr),
    DestroySilent(SmolStr),
    Activate { participant: SmolStr, color: Option<String> },
    Deactivate(SmolStr),
    DeactivateAfter(SmolStr),
    AutoActivation(bool),
    ActiveColor(String),
    NamedStyle { name: String, style: Style },
    TypeStyle { target: StyleTarget, style: Style },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    UnrecognizedSyntax,
    UnterminatedBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseErrorNode {
    pub kind: ParseErrorKind,
    /// Offending source text; empty for synthetic errors.
    pub text: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::{Fragment, FragmentType, Message, Node, NodeKind, NoteKind};
    use crate::model::arrow::ArrowType;
    use crate::model::ids::NodeIdGenerator;

    #[test]
    fn collapsing_copies_instead_of_mutating() {
        let mut ids = NodeIdGenerator::new();
        let fragment = Fragment {
            fragment_type: FragmentType::Expandable,
            condition: "details".to_owned(),
            style: None,
            entries: vec![ids.next_id()],
            else_clauses: Vec::new(),
            collapsed: Some(false),
        };
        let node = Node::new(ids.next_id(), 1, 3, NodeKind::Fragment(fragment.clone()));
        let toggled = node.with_kind(NodeKind::Fragment(fragment.with_collapsed(true)));

        assert_eq!(toggled.id(), node.id());
        assert!(matches!(node.kind(), NodeKind::Fragment(f) if !f.is_collapsed()));
        assert!(matches!(toggled.kind(), NodeKind::Fragment(f) if f.is_collapsed()));
    }

    #[test]
    fn collapse_is_ignored_for_other_fragment_types() {
        let fragment = Fragment {
            fragment_type: FragmentType::Loop,
            condition: String::new(),
            style: None,
            entries: Vec::new(),
            else_clauses: Vec::new(),
            collapsed: None,
        };
        assert_eq!(fragment.with_collapsed(true).collapsed, None);
    }

    #[test]
    fn reversed_arrow_flows_from_target_to_source() {
        let message = Message {
            from: "A".into(),
            to: "B".into(),
            arrow: ArrowType::Reversed,
            delay: None,
            is_create: false,
            style: None,
            label: String::new(),
        };
        assert_eq!(message.flow(), ("B", "A"));
    }

    #[test]
    fn keyword_tables_round_trip() {
        for kind in FragmentType::ALL {
            assert_eq!(FragmentType::from_keyword(kind.keyword()), Some(kind));
        }
        for kind in NoteKind::ALL {
            assert_eq!(NoteKind::from_keyword(kind.keyword()), Some(kind));
        }
    }
}
