//! Window groups: class/name matchers with a bundle of options.
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::context::BuildContext;
use crate::dispatch::{invalid_tag, required_text};
use crate::tree::{TagKind, TagNode};

/// Boolean group options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOption {
    /// `sticky`: shown on every desktop.
    Sticky,
    /// `nolist`: left out of the task list.
    NoList,
    /// `border`
    Border,
    /// `noborder`
    NoBorder,
    /// `title`
    Title,
    /// `notitle`
    NoTitle,
    /// `pignore`: program position hints are ignored.
    PIgnore,
    /// `maximized`
    Maximized,
    /// `minimized`
    Minimized,
    /// `shaded`
    Shaded,
}

/// Group options that carry a value (`layer:3`, `desktop:2`, `icon:x.png`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupValueKind {
    /// `layer:N`
    Layer,
    /// `desktop:N`
    Desktop,
    /// `icon:FILE`
    Icon,
}

const FLAG_OPTIONS: &[(&str, GroupOption)] = &[
    ("sticky", GroupOption::Sticky),
    ("nolist", GroupOption::NoList),
    ("border", GroupOption::Border),
    ("noborder", GroupOption::NoBorder),
    ("title", GroupOption::Title),
    ("notitle", GroupOption::NoTitle),
    ("pignore", GroupOption::PIgnore),
    ("maximized", GroupOption::Maximized),
    ("minimized", GroupOption::Minimized),
    ("shaded", GroupOption::Shaded),
];

const VALUE_OPTIONS: &[(&str, GroupValueKind)] = &[
    ("layer:", GroupValueKind::Layer),
    ("desktop:", GroupValueKind::Desktop),
    ("icon:", GroupValueKind::Icon),
];

/// One `<Group>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Window classes matched by `<Class>`.
    pub classes: Vec<String>,
    /// Window names matched by `<Name>`.
    pub names: Vec<String>,
    /// Boolean options set for the group.
    pub options: BTreeSet<GroupOption>,
    /// Valued options. A later value of the same kind wins.
    pub values: BTreeMap<GroupValueKind, String>,
}

/// A parsed `<Option>` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOption<'a> {
    /// A boolean option.
    Flag(GroupOption),
    /// A valued option and the text after its prefix.
    Value(GroupValueKind, &'a str),
}

/// Parse the text of an `<Option>`.
#[must_use]
pub fn parse_option(option: &str) -> Option<ParsedOption<'_>> {
    if let Some((_, flag)) = FLAG_OPTIONS.iter().find(|(name, _)| *name == option) {
        return Some(ParsedOption::Flag(*flag));
    }
    VALUE_OPTIONS.iter().find_map(|(prefix, kind)| {
        option
            .strip_prefix(prefix)
            .map(|value| ParsedOption::Value(*kind, value))
    })
}

/// Build a `<Group>` and add it to the configuration.
pub fn parse_group(ctx: &mut BuildContext, node: &TagNode) {
    let mut group = Group::default();

    for child in &node.children {
        match child.kind {
            TagKind::Class => {
                if let Some(class) = required_text(ctx, child) {
                    group.classes.push(class.to_string());
                }
            }
            TagKind::Name => {
                if let Some(name) = required_text(ctx, child) {
                    group.names.push(name.to_string());
                }
            }
            TagKind::Option => {
                let Some(text) = required_text(ctx, child) else {
                    continue;
                };
                match parse_option(text) {
                    Some(ParsedOption::Flag(flag)) => {
                        group.options.insert(flag);
                    }
                    Some(ParsedOption::Value(kind, value)) => {
                        group.values.insert(kind, value.to_string());
                    }
                    None => ctx.warn(child, format!("invalid Group Option: {text}")),
                }
            }
            _ => invalid_tag(ctx, child, &node.kind),
        }
    }

    ctx.config.add_group(group);
}
