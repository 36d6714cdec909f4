// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Style cascade.
//!
//! Precedence, highest first: attributes written inline on the node, the named style the node
//! references with `##name`, the document's type style for the node kind, and finally whatever
//! hard defaults the renderer applies to fields still unset. A reference to an undefined named
//! style is not an error; it simply contributes nothing.

use std::collections::BTreeMap;

use super::document::SequenceDocument;
use super::node::{Directive, NodeKind};
use super::style::{Style, StyleTarget};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleSheet {
    named: BTreeMap<String, Style>,
    typed: BTreeMap<StyleTarget, Style>,
}

impl StyleSheet {
    /// Collects every named and type style definition. Later definitions replace earlier ones.
    pub fn from_document(document: &SequenceDocument) -> Self {
        let mut sheet = Self::default();
        for node in document.nodes() {
            let NodeKind::Directive(directive) = node.kind() else {
                continue;
            };
            match directive {
                Directive::NamedStyle { name, style } => {
                    sheet.named.insert(name.clone(), style.clone());
                }
                Directive::TypeStyle { target, style } => {
                    sheet.typed.insert(*target, style.clone());
                }
                _ => {}
            }
        }
        sheet
    }

    pub fn named(&self, name: &str) -> Option<&Style> {
        self.named.get(name)
    }

    pub fn typed(&self, target: StyleTarget) -> Option<&Style> {
        self.typed.get(&target)
    }

    /// Merges `inline` over the referenced named style and the type style for `target`.
    ///
    /// Fields left `None` in the result are for the renderer's defaults.
    pub fn resolve(&self, target: StyleTarget, inline: Option<&Style>) -> Style {
        let base = self.typed(target).cloned().unwrap_or_default();
        let Some(inline) = inline else {
            return base;
        };

        let named = inline.style_name.as_deref().and_then(|name| self.named(name));
        if named.is_none() {
            if let Some(name) = inline.style_name.as_deref() {
                tracing::trace!(name, "named style not defined; falling back to type style");
            }
        }

        let with_named = match named {
            Some(named) => named.merged_over(&base),
            None => base,
        };
        inline.merged_over(&with_named)
    }

    /// Resolves the style of a drawn node. `None` for kinds that carry no style.
    ///
    /// Notes resolve against their own kind (`boxstyle` for `box`, `notestyle` for `note`, ...);
    /// a participant group's color acts as an inline fill.
    pub fn resolve_node(&self, kind: &NodeKind) -> Option<Style> {
        let resolved = match kind {
            NodeKind::Participant(participant) => {
                self.resolve(StyleTarget::Participant, participant.style.as_ref())
            }
            NodeKind::Message(message) => self.resolve(StyleTarget::Message, message.style.as_ref()),
            NodeKind::Note(note) => self.resolve(note.kind.style_target(), note.style.as_ref()),
            NodeKind::Divider(divider) => self.resolve(StyleTarget::Divider, divider.style.as_ref()),
            NodeKind::Fragment(fragment) => {
                self.resolve(StyleTarget::Fragment, fragment.style.as_ref())
            }
            NodeKind::ParticipantGroup(group) => {
                let inline = Style { fill: group.color.clone(), ..Style::default() };
                self.resolve(StyleTarget::ParticipantGroup, Some(&inline))
            }
            _ => return None,
        };
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::StyleSheet;
    use crate::format::dsl::parse;
    use crate::model::style::{BorderStyle, Style, StyleTarget};

    fn sheet(src: &str) -> StyleSheet {
        StyleSheet::from_document(&parse(src))
    }

    #[test]
    fn inline_beats_named_beats_type() {
        let sheet = sheet("participantstyle #gray #black;1\nstyle hot #red #darkred;3;dashed\n");
        let inline = Style {
            fill: Some("#white".to_owned()),
            style_name: Some("hot".to_owned()),
            ..Style::default()
        };

        let resolved = sheet.resolve(StyleTarget::Participant, Some(&inline));
        assert_eq!(resolved.fill.as_deref(), Some("#white"));
        assert_eq!(resolved.border.as_deref(), Some("#darkred"));
        assert_eq!(resolved.border_width, Some(3));
        assert_eq!(resolved.border_style, Some(BorderStyle::Dashed));
    }

    #[test]
    fn missing_named_style_falls_back_to_type_style() {
        let sheet = sheet("notestyle #lightyellow\n");
        let inline = Style { style_name: Some("nope".to_owned()), ..Style::default() };

        let resolved = sheet.resolve(StyleTarget::Note, Some(&inline));
        assert_eq!(resolved.fill.as_deref(), Some("#lightyellow"));
        assert_eq!(resolved.style_name.as_deref(), Some("nope"));
    }

    #[test]
    fn unstyled_nodes_get_type_style_or_nothing() {
        let sheet = sheet("messagestyle #blue;2\n");
        assert_eq!(sheet.resolve(StyleTarget::Message, None).border.as_deref(), Some("#blue"));
        assert!(sheet.resolve(StyleTarget::Divider, None).is_empty());
    }

    #[test]
    fn nodes_resolve_against_their_own_kind() {
        let document = parse("notestyle #yellow\nboxstyle #gray\nbox over A:x\nnote over A:y\nA->B:z\n");
        let sheet = StyleSheet::from_document(&document);
        let fills = document
            .nodes()
            .iter()
            .filter_map(|node| sheet.resolve_node(node.kind()))
            .map(|style| style.fill)
            .collect::<Vec<_>>();
        assert_eq!(fills, [Some("#gray".to_owned()), Some("#yellow".to_owned()), None]);
    }

    #[test]
    fn group_color_is_an_inline_fill() {
        let document = parse("participantgroupstyle #white #black\nparticipantgroup #eee G\nparticipant A\nend\n");
        let sheet = StyleSheet::from_document(&document);
        let style = sheet.resolve_node(document.nodes()[1].kind()).expect("group style");
        assert_eq!(style.fill.as_deref(), Some("#eee"));
        assert_eq!(style.border.as_deref(), Some("#black"));
        assert_eq!(sheet.resolve_node(document.nodes()[0].kind()), None);
    }

    #[test]
    fn later_definitions_win() {
        let sheet = sheet("style a #red\nstyle a #green\n");
        assert_eq!(sheet.named("a").and_then(|s| s.fill.as_deref()), Some("#green"));
    }
}
