// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use super::ids::NodeId;
use super::node::{Fragment, Node, NodeKind, Participant, ParticipantGroup};

/// A parsed document: the flat node arena in source order plus an id index.
///
/// Containers (fragments, participant groups) refer to their children by [`NodeId`]; the
/// children live in the same arena.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SequenceDocument {
    nodes: Vec<Node>,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

impl SequenceDocument {
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let index = nodes.iter().enumerate().map(|(idx, node)| (node.id(), idx)).collect();
        Self { nodes, index }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn errors(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// First participant declaration with the given alias, anywhere in the arena.
    pub fn participant(&self, alias: &str) -> Option<&Participant> {
        self.nodes.iter().find_map(|node| match node.kind() {
            NodeKind::Participant(participant) if participant.alias == alias => Some(participant),
            _ => None,
        })
    }

    pub fn ownership(&self) -> OwnershipIndex {
        OwnershipIndex::build(self)
    }

    /// Nodes emitted at document level: everything not owned by a container.
    pub fn top_level(&self) -> Vec<&Node> {
        let ownership = self.ownership();
        self.nodes.iter().filter(|node| !ownership.skips(node)).collect()
    }

    /// Returns a copy of the document with `node` replacing the arena entry sharing its id.
    pub fn with_node(&self, node: Node) -> Result<SequenceDocument, DocumentError> {
        let idx = *self.index.get(&node.id()).ok_or(DocumentError::MissingNode { id: node.id() })?;
        let mut nodes = self.nodes.clone();
        nodes[idx] = node;
        Ok(Self { nodes, index: self.index.clone() })
    }

    /// Checks the arena invariants: every referenced id exists and has exactly one owner.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut owner_of = HashMap::<NodeId, NodeId>::new();
        for node in &self.nodes {
            let children: Vec<NodeId> = match node.kind() {
                NodeKind::Fragment(fragment) => fragment.all_entries().collect(),
                NodeKind::ParticipantGroup(group) => group.nested_groups.clone(),
                _ => continue,
            };
            for child in children {
                if !self.index.contains_key(&child) {
                    return Err(DocumentError::DanglingReference { owner: node.id(), child });
                }
                if child == node.id() {
                    return Err(DocumentError::SelfReference { id: child });
                }
                if let Some(previous) = owner_of.insert(child, node.id()) {
                    return Err(DocumentError::MultipleOwners {
                        child,
                        first: previous,
                        second: node.id(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Id-free view used to compare documents structurally; error nodes are left out.
    pub fn semantic_view(&self) -> Vec<SemanticNode> {
        let ownership = self.ownership();
        self.nodes
            .iter()
            .filter(|node| !ownership.skips(node))
            .filter_map(|node| self.semantic_node(node, &ownership))
            .collect()
    }

    fn semantic_children(&self, ids: &[NodeId], ownership: &OwnershipIndex) -> Vec<SemanticNode> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .filter(|node| !ownership.skips_alias(node))
            .filter_map(|node| self.semantic_node(node, ownership))
            .collect()
    }

    fn semantic_node(&self, node: &Node, ownership: &OwnershipIndex) -> Option<SemanticNode> {
        match node.kind() {
            NodeKind::Error(_) => None,
            NodeKind::Fragment(fragment) => {
                let entries = self.semantic_children(&fragment.entries, ownership);
                let else_entries = fragment
                    .else_clauses
                    .iter()
                    .map(|clause| self.semantic_children(&clause.entries, ownership))
                    .collect();
                let mut header = fragment.clone();
                header.entries.clear();
                for clause in &mut header.else_clauses {
                    clause.entries.clear();
                }
                Some(SemanticNode::Fragment { header, entries, else_entries })
            }
            NodeKind::ParticipantGroup(group) => {
                let members = group
                    .participants
                    .iter()
                    .map(|alias| {
                        self.participant(alias).cloned().map(SemanticMember::Declared).unwrap_or_else(
                            || SemanticMember::Alias(alias.clone()),
                        )
                    })
                    .collect();
                let nested = group
                    .nested_groups
                    .iter()
                    .filter_map(|id| self.get(*id))
                    .filter_map(|child| self.semantic_node(child, ownership))
                    .collect();
                let mut header = group.clone();
                header.participants.clear();
                header.nested_groups.clear();
                Some(SemanticNode::Group { header, members, nested })
            }
            other => Some(SemanticNode::Leaf(other.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SemanticMember {
    Declared(Participant),
    Alias(SmolStr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SemanticNode {
    Leaf(NodeKind),
    Fragment { header: Fragment, entries: Vec<SemanticNode>, else_entries: Vec<Vec<SemanticNode>> },
    Group { header: ParticipantGroup, members: Vec<SemanticMember>, nested: Vec<SemanticNode> },
}

/// Which nodes are emitted by a container rather than at the level they appear in the arena.
#[derive(Debug, Clone, Default)]
pub struct OwnershipIndex {
    owned: HashSet<NodeId>,
    grouped_aliases: HashSet<SmolStr>,
}

impl OwnershipIndex {
    fn build(document: &SequenceDocument) -> Self {
        let mut index = Self::default();
        for node in document.nodes() {
            match node.kind() {
                NodeKind::Fragment(fragment) => index.owned.extend(fragment.all_entries()),
                NodeKind::ParticipantGroup(group) => {
                    index.owned.extend(group.nested_groups.iter().copied());
                    index.grouped_aliases.extend(group.participants.iter().cloned());
                }
                _ => {}
            }
        }
        index
    }

    pub fn is_owned(&self, id: NodeId) -> bool {
        self.owned.contains(&id)
    }

    pub fn is_grouped(&self, alias: &str) -> bool {
        self.grouped_aliases.contains(alias)
    }

    /// Participant declarations whose alias belongs to a group are emitted by the group.
    pub fn skips_alias(&self, node: &Node) -> bool {
        matches!(node.kind(), NodeKind::Participant(p) if self.is_grouped(&p.alias))
    }

    pub fn skips(&self, node: &Node) -> bool {
        self.is_owned(node.id()) || self.skips_alias(node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    MissingNode { id: NodeId },
    DanglingReference { owner: NodeId, child: NodeId },
    SelfReference { id: NodeId },
    MultipleOwners { child: NodeId, first: NodeId, second: NodeId },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { id } => write!(f, "no node with id {id} in document"),
            Self::DanglingReference { owner, child } => {
                write!(f, "container {owner} references missing node {child}")
            }
            Self::SelfReference { id } => write!(f, "container {id} references itself"),
            Self::MultipleOwners { child, first, second } => {
                write!(f, "node {child} is owned by both {first} and {second}")
            }
        }
    }
}

impl std::error::Error for DocumentError {}
