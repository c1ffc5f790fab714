//! Tag dispatch: routing each node to its builder.
//!
//! Every context (the `<JWM>` root here, and menus, trays, groups and style
//! blocks in their own modules) follows the same protocol: for each child,
//! match on its [`TagKind`]; a recognized kind goes to exactly one handler,
//! anything else is reported through [`invalid_tag`] and skipped. A single
//! bad tag never stops the walk. Only [`LoadError`] propagates.
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::context::BuildContext;
use crate::error::{IncludeError, LoadError};
use crate::include::{self, IncludeSource};
use crate::tree::{TagKind, TagNode};
use crate::{feel, group, keys, menu, style, tray};

/// Report a tag that is not valid inside `parent`.
pub fn invalid_tag(ctx: &mut BuildContext, node: &TagNode, parent: &TagKind) {
    ctx.warn(node, format!("invalid tag in {parent}: {}", node.name()));
}

/// Text content of `node`, or a diagnostic when there is none.
pub fn required_text<'a>(ctx: &mut BuildContext, node: &'a TagNode) -> Option<&'a str> {
    let text = node.text();
    if text.is_none() {
        ctx.warn(node, format!("no value specified for {}", node.name()));
    }
    text
}

/// Parse `value` as a number within `range`.
///
/// Reports `invalid <what>: "<value>"` and returns `None` when the value is
/// not a number or falls outside the range.
pub fn parse_ranged<T>(
    ctx: &mut BuildContext,
    node: &TagNode,
    what: &str,
    value: &str,
    range: RangeInclusive<T>,
) -> Option<T>
where
    T: FromStr + PartialOrd,
{
    match value.trim().parse::<T>() {
        Ok(n) if range.contains(&n) => Some(n),
        _ => {
            ctx.warn(node, format!("invalid {what}: \"{value}\""));
            None
        }
    }
}

/// Parse an optional numeric attribute, falling back to `default`.
pub fn ranged_attribute<T>(
    ctx: &mut BuildContext,
    node: &TagNode,
    name: &str,
    range: RangeInclusive<T>,
    default: T,
) -> T
where
    T: FromStr + PartialOrd,
{
    node.attribute(name)
        .and_then(|value| {
            parse_ranged(ctx, node, &format!("{} {name}", node.name()), value, range)
        })
        .unwrap_or(default)
}

/// Walk the top-level elements of one document at include depth `depth`.
///
/// Each element must be `<JWM>`; anything else is reported.
///
/// # Errors
///
/// Returns a [`LoadError`] if a nested include exceeds the depth ceiling.
pub fn parse_document(
    ctx: &mut BuildContext,
    roots: &[TagNode],
    depth: u32,
) -> Result<(), LoadError> {
    for root in roots {
        if root.kind == TagKind::Jwm {
            parse_root(ctx, root, depth)?;
        } else {
            ctx.warn(root, format!("invalid start tag: {}", root.name()));
        }
    }
    Ok(())
}

/// Dispatch every child of a `<JWM>` element.
///
/// # Errors
///
/// Returns a [`LoadError`] if a nested include exceeds the depth ceiling.
pub fn parse_root(ctx: &mut BuildContext, node: &TagNode, depth: u32) -> Result<(), LoadError> {
    for child in &node.children {
        match &child.kind {
            TagKind::BorderStyle
            | TagKind::ClockStyle
            | TagKind::MenuStyle
            | TagKind::PagerStyle
            | TagKind::PopupStyle
            | TagKind::TaskListStyle
            | TagKind::TrayButtonStyle
            | TagKind::TrayStyle => style::parse_style(ctx, child),
            TagKind::Desktops => feel::parse_desktops(ctx, child),
            TagKind::DoubleClickSpeed => feel::parse_double_click_speed(ctx, child),
            TagKind::DoubleClickDelta => feel::parse_double_click_delta(ctx, child),
            TagKind::FocusModel => feel::parse_focus_model(ctx, child),
            TagKind::SnapMode => feel::parse_snap_mode(ctx, child),
            TagKind::MoveMode => feel::parse_move_mode(ctx, child),
            TagKind::ResizeMode => feel::parse_resize_mode(ctx, child),
            TagKind::Group => group::parse_group(ctx, child),
            TagKind::Key => keys::parse_key(ctx, child),
            TagKind::Mouse => {}
            TagKind::RootMenu => menu::parse_root_menu(ctx, child, depth)?,
            TagKind::Tray => tray::parse_tray(ctx, child),
            TagKind::Include => parse_include(ctx, child, depth)?,
            TagKind::IconPath => {
                if let Some(path) = expanded_path(ctx, child) {
                    ctx.config.add_icon_path(path);
                }
            }
            TagKind::ThemePath => {
                if let Some(path) = expanded_path(ctx, child) {
                    ctx.config.add_theme_path(path);
                }
            }
            TagKind::Theme => {
                if let Some(theme) = required_text(ctx, child) {
                    ctx.config.set_theme(theme);
                }
            }
            TagKind::StartupCommand => {
                if let Some(command) = required_text(ctx, child) {
                    ctx.config.commands.startup.push(command.to_string());
                }
            }
            TagKind::RestartCommand => {
                if let Some(command) = required_text(ctx, child) {
                    ctx.config.commands.restart.push(command.to_string());
                }
            }
            TagKind::ShutdownCommand => {
                if let Some(command) = required_text(ctx, child) {
                    ctx.config.commands.shutdown.push(command.to_string());
                }
            }
            _ => invalid_tag(ctx, child, &node.kind),
        }
    }
    Ok(())
}

fn expanded_path(ctx: &mut BuildContext, node: &TagNode) -> Option<String> {
    let text = required_text(ctx, node)?;
    match include::expand_path(text) {
        Ok(path) => Some(path.display().to_string()),
        Err(e) => {
            ctx.warn(node, e.to_string());
            None
        }
    }
}

/// Process a top-level `<Include>`: parse another `<JWM>` document in place.
fn parse_include(ctx: &mut BuildContext, node: &TagNode, depth: u32) -> Result<(), LoadError> {
    let Some(reference) = required_text(ctx, node) else {
        return Ok(());
    };
    let next = include::enter(depth, ctx.options.max_include_depth)?;
    let source = match IncludeSource::file(reference) {
        Ok(source) => source,
        Err(e) => {
            ctx.warn(node, e.to_string());
            return Ok(());
        }
    };

    tracing::debug!("including {} at depth {next}", source.label());
    let resolved = include::resolve(&source, ctx.executor(), &ctx.options.shell);
    match resolved {
        Ok(roots) => parse_document(ctx, &roots, next),
        Err(IncludeError::Tokenize(e)) => {
            ctx.diagnostics.report(e.into());
            Ok(())
        }
        Err(_) => {
            ctx.warn(
                node,
                format!("could not open included file {}", source.label()),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::context::test_helpers::{context, messages, parse};

    #[test]
    fn unknown_root_tag_is_reported_and_siblings_still_run() {
        let mut ctx = context();
        let root = parse(
            "<JWM><IconPath>/a</IconPath><BorderStyel/><Theme>dark</Theme></JWM>",
        );
        parse_root(&mut ctx, &root, 0).unwrap();
        assert_eq!(messages(&ctx), vec!["invalid tag in JWM: BorderStyel"]);
        assert_eq!(ctx.config.icon_paths, vec!["/a"]);
        assert_eq!(ctx.config.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn misplaced_known_tag_is_invalid_in_root() {
        let mut ctx = context();
        let root = parse("<JWM><Program>xterm</Program></JWM>");
        parse_root(&mut ctx, &root, 0).unwrap();
        assert_eq!(messages(&ctx), vec!["invalid tag in JWM: Program"]);
    }

    #[test]
    fn wrong_document_element_is_invalid_start_tag() {
        let mut ctx = context();
        let roots = crate::lexer::tokenize("<Menu/>", "test.jwmrc").unwrap();
        parse_document(&mut ctx, &roots, 0).unwrap();
        assert_eq!(messages(&ctx), vec!["invalid start tag: Menu"]);
    }

    #[test]
    fn lifecycle_commands_keep_order() {
        let mut ctx = context();
        let root = parse(
            "<JWM><StartupCommand>a</StartupCommand><StartupCommand>b</StartupCommand>\
             <RestartCommand>r</RestartCommand><ShutdownCommand>s</ShutdownCommand></JWM>",
        );
        parse_root(&mut ctx, &root, 0).unwrap();
        assert_eq!(ctx.config.commands.startup, vec!["a", "b"]);
        assert_eq!(ctx.config.commands.restart, vec!["r"]);
        assert_eq!(ctx.config.commands.shutdown, vec!["s"]);
    }

    #[test]
    fn mouse_is_accepted_silently() {
        let mut ctx = context();
        let root = parse("<JWM><Mouse context=\"root\" button=\"1\">window</Mouse></JWM>");
        parse_root(&mut ctx, &root, 0).unwrap();
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn empty_theme_is_reported() {
        let mut ctx = context();
        let root = parse("<JWM><Theme/></JWM>");
        parse_root(&mut ctx, &root, 0).unwrap();
        assert_eq!(messages(&ctx), vec!["no value specified for Theme"]);
    }

    #[test]
    fn missing_include_file_is_reported_not_fatal() {
        let mut ctx = context();
        let root = parse("<JWM><Include>/nonexistent/jwmrc-test.xml</Include><Theme>t</Theme></JWM>");
        parse_root(&mut ctx, &root, 0).unwrap();
        assert_eq!(
            messages(&ctx),
            vec!["could not open included file /nonexistent/jwmrc-test.xml"]
        );
        assert_eq!(ctx.config.theme.as_deref(), Some("t"));
    }

    #[test]
    fn include_at_max_depth_is_fatal() {
        let mut ctx = context();
        let max = ctx.options.max_include_depth;
        let root = parse("<JWM><Include>/whatever.xml</Include></JWM>");
        let err = parse_root(&mut ctx, &root, max).unwrap_err();
        assert!(matches!(err, LoadError::IncludeDepthExceeded { .. }));
    }

    #[test]
    fn included_file_is_parsed_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let inc = dir.path().join("inc.xml");
        std::fs::write(&inc, "<JWM><IconPath>/b</IconPath></JWM>").unwrap();
        let mut ctx = context();
        let root = parse(&format!(
            "<JWM><IconPath>/a</IconPath><Include>{}</Include><IconPath>/c</IconPath></JWM>",
            inc.display()
        ));
        parse_root(&mut ctx, &root, 0).unwrap();
        assert_eq!(ctx.config.icon_paths, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn parse_ranged_rejects_out_of_range() {
        let mut ctx = context();
        let root = parse("<JWM/>");
        assert_eq!(parse_ranged(&mut ctx, &root, "count", "3", 1..=8_u32), Some(3));
        assert_eq!(parse_ranged(&mut ctx, &root, "count", "9", 1..=8_u32), None);
        assert_eq!(parse_ranged(&mut ctx, &root, "count", "x", 1..=8_u32), None);
        assert_eq!(
            messages(&ctx),
            vec!["invalid count: \"9\"", "invalid count: \"x\""]
        );
    }
}
