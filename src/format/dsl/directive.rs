// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use super::ident::{is_valid_alias, next_token};
use super::style_spec::{
    format_box_style, format_definition, format_line_style, is_color, is_style_name,
    parse_box_style, parse_definition, parse_line_style, split_leading_style,
};
use crate::model::node::{Directive, ParticipantSpacing};
use crate::model::style::StyleTarget;

fn parse_on_off(rest: &str) -> Option<bool> {
    match rest {
        "" | "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn parse_positive_number(raw: &str) -> Option<f64> {
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

fn single_alias(rest: &str) -> Option<SmolStr> {
    let (alias, tail) = next_token(rest)?;
    (tail.is_empty() && is_valid_alias(alias)).then(|| alias.into())
}

fn parse_activate(rest: &str) -> Option<Directive> {
    let (alias, tail) = next_token(rest)?;
    if !is_valid_alias(alias) {
        return None;
    }
    let color = match tail {
        "" => None,
        color if is_color(color) => Some(color.to_owned()),
        _ => return None,
    };
    Some(Directive::Activate { participant: alias.into(), color })
}

fn parse_lifeline_style(rest: &str) -> Option<Directive> {
    let (first, tail) = next_token(rest)?;
    let (participant, spec) = if first.starts_with('#') || first.starts_with(';') {
        (None, rest)
    } else if is_valid_alias(first) {
        (Some(SmolStr::from(first)), tail)
    } else {
        return None;
    };
    let tokens = spec.split_whitespace().collect::<Vec<_>>();
    let style = parse_line_style(&tokens)?.non_empty()?;
    Some(Directive::LifelineStyle { participant, style })
}

fn parse_frame(rest: &str) -> Option<Directive> {
    let (tokens, label) = split_leading_style(rest);
    let style = parse_box_style(&tokens)?.non_empty();
    Some(Directive::Frame { label: label.to_owned(), style })
}

fn parse_named_style(rest: &str) -> Option<Directive> {
    let (name, payload) = next_token(rest)?;
    if !is_style_name(name) {
        return None;
    }
    let style = parse_definition(payload)?;
    Some(Directive::NamedStyle { name: name.to_owned(), style })
}

/// Parses a directive line. `None` when the keyword is unknown or its payload is malformed.
pub(super) fn parse_directive(line: &str) -> Option<Directive> {
    let (keyword, rest) = next_token(line)?;
    let directive = match keyword {
        "title" if !rest.is_empty() => Directive::Title(rest.to_owned()),
        "entryspacing" => match rest {
            "" => Directive::EntrySpacing(1.0),
            raw => Directive::EntrySpacing(parse_positive_number(raw)?),
        },
        "autonumber" => match rest {
            "" => Directive::Autonumber(Some(1)),
            "off" => Directive::Autonumber(None),
            raw => Directive::Autonumber(Some(raw.parse::<u32>().ok()?)),
        },
        "space" => match rest {
            "" => Directive::Space(1),
            raw => Directive::Space(raw.parse::<i32>().ok()?),
        },
        "participantspacing" => match rest {
            "equal" => Directive::ParticipantSpacing(ParticipantSpacing::Equal),
            raw => Directive::ParticipantSpacing(ParticipantSpacing::Gap(parse_positive_number(raw)?)),
        },
        "lifelinestyle" => parse_lifeline_style(rest)?,
        "linear" => Directive::Linear(parse_on_off(rest)?),
        "parallel" => Directive::Parallel(parse_on_off(rest)?),
        "bottomparticipants" if rest.is_empty() => Directive::BottomParticipants,
        "fontfamily" if !rest.is_empty() => Directive::FontFamily(rest.to_owned()),
        "frame" => parse_frame(rest)?,
        "destroy" => Directive::Destroy(single_alias(rest)?),
        "destroyafter" => Directive::DestroyAfter(single_alias(rest)?),
        "destroysilent" => Directive::DestroySilent(single_alias(rest)?),
        "activate" => parse_activate(rest)?,
        "deactivate" => Directive::Deactivate(single_alias(rest)?),
        "deactivateafter" => Directive::DeactivateAfter(single_alias(rest)?),
        "autoactivation" => match rest {
            "on" => Directive::AutoActivation(true),
            "off" => Directive::AutoActivation(false),
            _ => return None,
        },
        "activecolor" if is_color(rest) => Directive::ActiveColor(rest.to_owned()),
        "style" => parse_named_style(rest)?,
        other => {
            let target = StyleTarget::from_directive_keyword(other)?;
            Directive::TypeStyle { target, style: parse_definition(rest)? }
        }
    };
    Some(directive)
}

fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Canonical text of `directive`; default payloads use the short form.
pub(super) fn format_directive(directive: &Directive) -> String {
    let mut buf = itoa::Buffer::new();
    match directive {
        Directive::Title(text) => format!("title {text}"),
        Directive::EntrySpacing(value) if *value == 1.0 => "entryspacing".to_owned(),
        Directive::EntrySpacing(value) => format!("entryspacing {}", format_number(*value)),
        Directive::Autonumber(Some(1)) => "autonumber".to_owned(),
        Directive::Autonumber(Some(start)) => format!("autonumber {}", buf.format(*start)),
        Directive::Autonumber(None) => "autonumber off".to_owned(),
        Directive::Space(1) => "space".to_owned(),
        Directive::Space(amount) => format!("space {}", buf.format(*amount)),
        Directive::ParticipantSpacing(ParticipantSpacing::Equal) => {
            "participantspacing equal".to_owned()
        }
        Directive::ParticipantSpacing(ParticipantSpacing::Gap(gap)) => {
            format!("participantspacing {}", format_number(*gap))
        }
        Directive::LifelineStyle { participant, style } => match participant {
            Some(alias) => format!("lifelinestyle {alias} {}", format_line_style(style)),
            None => format!("lifelinestyle {}", format_line_style(style)),
        },
        Directive::Linear(true) => "linear".to_owned(),
        Directive::Linear(false) => "linear off".to_owned(),
        Directive::Parallel(true) => "parallel".to_owned(),
        Directive::Parallel(false) => "parallel off".to_owned(),
        Directive::BottomParticipants => "bottomparticipants".to_owned(),
        Directive::FontFamily(family) => format!("fontfamily {family}"),
        Directive::Frame { label, style } => {
            let mut out = "frame".to_owned();
            for part in [style.as_ref().map(format_box_style).unwrap_or_default(), label.clone()] {
                if !part.is_empty() {
                    out.push(' ');
                    out.push_str(&part);
                }
            }
            out
        }
        Directive::Destroy(alias) => format!("destroy {alias}"),
        Directive::DestroyAfter(alias) => format!("destroyafter {alias}"),
        Directive::DestroySilent(alias) => format!("destroysilent {alias}"),
        Directive::Activate { participant, color: Some(color) } => {
            format!("activate {participant} {color}")
        }
        Directive::Activate { participant, color: None } => format!("activate {participant}"),
        Directive::Deactivate(alias) => format!("deactivate {alias}"),
        Directive::DeactivateAfter(alias) => format!("deactivateafter {alias}"),
        Directive::AutoActivation(true) => "autoactivation on".to_owned(),
        Directive::AutoActivation(false) => "autoactivation off".to_owned(),
        Directive::ActiveColor(color) => format!("activecolor {color}"),
        Directive::NamedStyle { name, style } => format!("style {name} {}", format_definition(style)),
        Directive::TypeStyle { target, style } => {
            format!("{} {}", target.directive_keyword(), format_definition(style))
        }
    }
}
