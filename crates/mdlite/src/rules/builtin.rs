//! Built-in inline rules, in the order they must run.
//!
//! Every pattern runs on HTML-escaped text, so a quoted title arrives as
//! `&quot;title&quot;` and is emitted without further escaping. Image and
//! anchor tags are protected as soon as they are built, so the emphasis rules
//! never see their attribute values.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Rule;
use crate::options::LinkTarget;

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)(?:\s+&quot;(.*?)&quot;)?\)").unwrap()
});

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)\s]+)(?:\s+&quot;(.*?)&quot;)?\)").unwrap()
});

static STRONG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").unwrap());

static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").unwrap());

static STRIKETHROUGH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.*?)~~").unwrap());

/// Create all built-in rules
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        image_rule(),
        link_rule(),
        strong_rule(),
        emphasis_rule(),
        strikethrough_rule(),
    ]
}

fn title_attribute(caps: &Captures<'_>, group: usize) -> String {
    caps.get(group)
        .map(|m| m.as_str())
        .filter(|t| !t.is_empty())
        .map(|t| format!(" title=\"{}\"", t))
        .unwrap_or_default()
}

/// Content of whichever alternative of a two-delimiter pattern matched
fn either_group<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or("")
}

fn image_rule() -> Rule {
    Rule::new(IMAGE_RE.clone(), |caps, ctx| {
        ctx.protect(format!(
            "<img src=\"{}\" alt=\"{}\"{}>",
            &caps[2],
            &caps[1],
            title_attribute(caps, 3)
        ))
    })
}

fn link_rule() -> Rule {
    Rule::new(LINK_RE.clone(), |caps, ctx| {
        let target = match ctx.options().link_target {
            LinkTarget::Blank => " target=\"_blank\" rel=\"noopener\"",
            LinkTarget::SameWindow => "",
        };
        let open = ctx.protect(format!(
            "<a href=\"{}\"{}{}>",
            &caps[2],
            target,
            title_attribute(caps, 3)
        ));
        format!("{}{}</a>", open, &caps[1])
    })
}

fn strong_rule() -> Rule {
    Rule::new(STRONG_RE.clone(), |caps, _| {
        format!("<strong>{}</strong>", either_group(caps))
    })
}

fn emphasis_rule() -> Rule {
    Rule::new(EMPHASIS_RE.clone(), |caps, _| {
        format!("<em>{}</em>", either_group(caps))
    })
}

fn strikethrough_rule() -> Rule {
    Rule::new(STRIKETHROUGH_RE.clone(), |caps, _| {
        format!("<del>{}</del>", &caps[1])
    })
}
