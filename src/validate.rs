//! Finalization passes run once the whole document has been walked.
//!
//! Root menu references can only be checked at the end, since a binding may
//! name a `<RootMenu>` declared further down (or in a later include).
use crate::context::BuildContext;
use crate::diagnostics::Diagnostic;
use crate::keys::{KeyAction, KeyBinding, ROOT_PREFIX};
use crate::menu::RootMenus;

/// Characters allowed in a key binding's `mask`.
pub const MODIFIER_CHARS: &str = "ACS12345";

/// Check every key binding.
///
/// Bindings with neither a key nor a keycode, or with a non-numeric keycode,
/// are removed. Unknown modifiers and undefined root menus only warn.
pub fn validate_keys(ctx: &mut BuildContext) {
    let bindings = std::mem::take(&mut ctx.config.keys);
    let mut kept = Vec::with_capacity(bindings.len());

    for binding in bindings {
        if let Some(message) = fatal_key_problem(&binding) {
            ctx.diagnostics
                .report(Diagnostic::with_origin(Some(&binding.origin), message));
            continue;
        }
        if let Some(mask) = &binding.mask {
            for c in mask.chars().filter(|c| !MODIFIER_CHARS.contains(*c)) {
                ctx.diagnostics.report(Diagnostic::with_origin(
                    Some(&binding.origin),
                    format!("invalid modifier: \"{c}\""),
                ));
            }
        }
        if binding.action == KeyAction::Root {
            let slots = binding.command.as_deref().unwrap_or_default();
            if let Some(message) = undefined_root_menu(&ctx.config.root_menus, slots) {
                ctx.diagnostics.report(Diagnostic::with_origin(
                    Some(&binding.origin),
                    format!("key binding: {message}"),
                ));
            }
        }
        kept.push(binding);
    }

    ctx.config.keys = kept;
}

fn fatal_key_problem(binding: &KeyBinding) -> Option<String> {
    match (&binding.key, &binding.keycode) {
        (None, None) => Some("no key or keycode specified for binding".to_string()),
        (_, Some(code)) if code.trim().parse::<u32>().is_err() => {
            Some(format!("invalid keycode: \"{code}\""))
        }
        _ => None,
    }
}

/// Describe the first slot in `slots` that has no root menu.
fn undefined_root_menu(menus: &RootMenus, slots: &str) -> Option<String> {
    if slots.is_empty() {
        return Some("no root menu specified".to_string());
    }
    slots.chars().find_map(|c| {
        let defined = c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .is_some_and(|slot| menus.is_defined(slot));
        (!defined).then(|| format!("root menu {c} not defined"))
    })
}

/// Check that every `root:` tray button names a defined root menu.
pub fn validate_tray_buttons(ctx: &mut BuildContext) {
    let mut problems = Vec::new();
    for button in ctx.config.trays.iter().flat_map(|tray| tray.buttons()) {
        let Some(slots) = button
            .action
            .as_deref()
            .and_then(|action| action.strip_prefix(ROOT_PREFIX))
        else {
            continue;
        };
        if let Some(message) = undefined_root_menu(&ctx.config.root_menus, slots) {
            problems.push(Diagnostic::with_origin(
                Some(&button.origin),
                format!("tray button: {message}"),
            ));
        }
    }
    for problem in problems {
        ctx.diagnostics.report(problem);
    }
}
