//! Key bindings: action resolution and the `<Key>` builder.
use serde::Serialize;

use crate::context::BuildContext;
use crate::diagnostics::Origin;
use crate::include::EXEC_PREFIX;
use crate::tree::TagNode;

/// Prefix naming a root menu slot in a key action.
pub const ROOT_PREFIX: &str = "root:";

/// What a key binding does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Menu navigation up.
    Up,
    /// Menu navigation down.
    Down,
    /// Menu navigation right.
    Right,
    /// Menu navigation left.
    Left,
    /// Leave the current menu or operation.
    Escape,
    /// Activate the selected entry.
    Select,
    /// Focus the next window.
    Next,
    /// Focus the next window in stacking order.
    NextStacked,
    /// Close the active window.
    Close,
    /// Minimize the active window.
    Minimize,
    /// Toggle maximization of the active window.
    Maximize,
    /// Toggle shading of the active window.
    Shade,
    /// Start an interactive move.
    Move,
    /// Start an interactive resize.
    Resize,
    /// Open the window menu.
    Window,
    /// Restart the window manager.
    Restart,
    /// Exit the window manager.
    Exit,
    /// Switch desktop. `None` takes the desktop number from the key itself.
    Desktop(Option<u32>),
    /// Run the binding's command.
    Exec,
    /// Show the root menu named by the binding's command.
    Root,
}

/// Built-in action names, matched exactly.
const KEY_ACTIONS: &[(&str, KeyAction)] = &[
    ("up", KeyAction::Up),
    ("down", KeyAction::Down),
    ("right", KeyAction::Right),
    ("left", KeyAction::Left),
    ("escape", KeyAction::Escape),
    ("select", KeyAction::Select),
    ("next", KeyAction::Next),
    ("nextstacked", KeyAction::NextStacked),
    ("close", KeyAction::Close),
    ("minimize", KeyAction::Minimize),
    ("maximize", KeyAction::Maximize),
    ("shade", KeyAction::Shade),
    ("move", KeyAction::Move),
    ("resize", KeyAction::Resize),
    ("window", KeyAction::Window),
    ("restart", KeyAction::Restart),
    ("exit", KeyAction::Exit),
    ("desktop", KeyAction::Desktop(None)),
    ("desktop#", KeyAction::Desktop(None)),
];

/// A compiled key binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyBinding {
    /// What the binding does.
    pub action: KeyAction,
    /// Modifier letters from the `mask` attribute.
    pub mask: Option<String>,
    /// Key symbol name.
    pub key: Option<String>,
    /// Numeric keycode, kept as written until validation.
    pub keycode: Option<String>,
    /// Command for [`KeyAction::Exec`], slot list for [`KeyAction::Root`].
    pub command: Option<String>,
    /// Where the `<Key>` tag was declared.
    pub origin: Origin,
}

/// Resolve action text into an action and its optional command.
///
/// `exec:` and `root:` prefixes are checked first, then the built-in names,
/// then the `desktop#N` family.
#[must_use]
pub fn resolve_action(text: &str) -> Option<(KeyAction, Option<&str>)> {
    if let Some(command) = text.strip_prefix(EXEC_PREFIX) {
        return Some((KeyAction::Exec, Some(command)));
    }
    if let Some(slots) = text.strip_prefix(ROOT_PREFIX) {
        return Some((KeyAction::Root, Some(slots)));
    }
    if let Some((_, action)) = KEY_ACTIONS.iter().find(|(name, _)| *name == text) {
        return Some((*action, None));
    }
    text.strip_prefix("desktop#")
        .and_then(|n| n.parse::<u32>().ok())
        .map(|n| (KeyAction::Desktop(Some(n)), None))
}

/// Compile one `<Key>` element into the binding table.
pub fn parse_key(ctx: &mut BuildContext, node: &TagNode) {
    let Some(text) = node.text() else {
        ctx.warn(node, "no action specified for Key");
        return;
    };
    let Some((action, command)) = resolve_action(text) else {
        ctx.warn(node, format!("invalid Key action: \"{text}\""));
        return;
    };
    ctx.config.insert_key_binding(KeyBinding {
        action,
        mask: node.attribute("mask").map(str::to_string),
        key: node.attribute("key").map(str::to_string),
        keycode: node.attribute("keycode").map(str::to_string),
        command: command.map(str::to_string),
        origin: node.origin(),
    });
}
