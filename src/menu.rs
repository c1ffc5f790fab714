//! Menus: model and builder.
//!
//! A [`Menu`] owns its items in document order and every submenu is owned by
//! exactly one [`MenuItem`], so a built menu is always a tree. Root menus are
//! kept in [`RootMenus`], keyed by the digit slots named in `onroot`.
use serde::Serialize;

use crate::config::DEFAULT_TITLE;
use crate::context::BuildContext;
use crate::dispatch::{invalid_tag, ranged_attribute, required_text};
use crate::error::{IncludeError, LoadError};
use crate::include::{self, IncludeSource};
use crate::tree::{TagKind, TagNode};

/// Root menu slots used when `onroot` is absent.
pub const DEFAULT_ROOT_SLOTS: &str = "123";

/// Deepest chain of nested submenus accepted under one root menu, counted
/// across menu includes. Deeper `<Menu>` tags are reported and skipped.
pub const MAX_MENU_DEPTH: u32 = 64;

/// What kind of entry a [`MenuItem`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemKind {
    /// An entry with an action.
    Normal,
    /// An entry that opens a nested menu.
    Submenu,
    /// A divider line.
    Separator,
}

/// What activating a menu item does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MenuAction {
    /// Nothing; used by separators and submenu entries.
    None,
    /// Run a shell command.
    Execute(String),
    /// Leave the window manager, optionally running a command first.
    Exit(Option<String>),
    /// Restart the window manager.
    Restart,
    /// Desktop selection submenu.
    Desktop,
    /// Toggle sticky on the target window.
    Stick,
    /// Toggle maximized.
    Maximize,
    /// Minimize.
    Minimize,
    /// Toggle shaded.
    Shade,
    /// Start an interactive move.
    Move,
    /// Start an interactive resize.
    Resize,
    /// Kill the client.
    Kill,
    /// Ask the client to close.
    Close,
}

/// One entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Entry kind.
    pub kind: MenuItemKind,
    /// Text shown for the entry.
    pub name: Option<String>,
    /// Icon file.
    pub icon: Option<String>,
    /// What activating the entry does.
    pub action: MenuAction,
    /// Present exactly when `kind` is [`MenuItemKind::Submenu`].
    pub submenu: Option<Box<Menu>>,
}

impl MenuItem {
    fn normal(name: Option<&str>, icon: Option<&str>, action: MenuAction) -> Self {
        Self {
            kind: MenuItemKind::Normal,
            name: name.map(str::to_string),
            icon: icon.map(str::to_string),
            action,
            submenu: None,
        }
    }

    const fn separator() -> Self {
        Self {
            kind: MenuItemKind::Separator,
            name: None,
            icon: None,
            action: MenuAction::None,
            submenu: None,
        }
    }
}

/// An ordered list of menu items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Menu {
    /// Title shown at the top, for labeled menus.
    pub label: Option<String>,
    /// Item height in pixels; 0 means the default.
    pub item_height: u32,
    /// Entries in document order.
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// An empty menu.
    #[must_use]
    pub const fn new(label: Option<String>, item_height: u32) -> Self {
        Self {
            label,
            item_height,
            items: Vec::new(),
        }
    }
}

impl Drop for Menu {
    // Detach submenus onto a work list so teardown never recurses per level.
    fn drop(&mut self) {
        let mut pending: Vec<Box<Self>> = self
            .items
            .iter_mut()
            .filter_map(|item| item.submenu.take())
            .collect();
        while let Some(mut menu) = pending.pop() {
            pending.extend(menu.items.iter_mut().filter_map(|item| item.submenu.take()));
        }
    }
}

/// A root menu and the slots it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootMenuEntry {
    /// Digits `0..=9`.
    pub slots: Vec<u8>,
    /// The menu itself.
    pub menu: Menu,
}

/// Root menus by slot. Binding a slot again replaces the earlier binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootMenus {
    entries: Vec<RootMenuEntry>,
}

impl RootMenus {
    /// Bind `menu` to every slot in `slots`.
    ///
    /// Menus left with no slots are dropped.
    pub fn set(&mut self, slots: &[u8], menu: Menu) {
        for entry in &mut self.entries {
            entry.slots.retain(|slot| !slots.contains(slot));
        }
        self.entries.retain(|entry| !entry.slots.is_empty());
        self.entries.push(RootMenuEntry {
            slots: slots.to_vec(),
            menu,
        });
    }

    /// Menu bound to `slot`.
    #[must_use]
    pub fn get(&self, slot: u8) -> Option<&Menu> {
        self.entries
            .iter()
            .find(|entry| entry.slots.contains(&slot))
            .map(|entry| &entry.menu)
    }

    /// `true` if a menu is bound to `slot`.
    #[must_use]
    pub fn is_defined(&self, slot: u8) -> bool {
        self.get(slot).is_some()
    }

    /// Every bound menu, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[RootMenuEntry] {
        &self.entries
    }
}

/// Build a `<RootMenu>` and bind it to its `onroot` slots.
///
/// # Errors
///
/// Returns a [`LoadError`] if a menu include exceeds the depth ceiling.
pub fn parse_root_menu(
    ctx: &mut BuildContext,
    node: &TagNode,
    depth: u32,
) -> Result<(), LoadError> {
    let item_height = ranged_attribute(ctx, node, "height", 0..=u32::MAX, 0);
    let label = if node.attribute("labeled") == Some("true") {
        Some(node.attribute("label").unwrap_or(DEFAULT_TITLE).to_string())
    } else {
        None
    };

    let mut menu = Menu::new(label, item_height);
    parse_menu_items(ctx, &node.children, &mut menu, depth, 0)?;

    let spec = node.attribute("onroot").unwrap_or(DEFAULT_ROOT_SLOTS);
    let mut slots = Vec::new();
    for c in spec.chars() {
        match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
            Some(slot) if !slots.contains(&slot) => slots.push(slot),
            Some(_) => {}
            None => ctx.warn(node, format!("invalid root menu specified: \"{c}\"")),
        }
    }
    if slots.is_empty() {
        ctx.warn(node, format!("no root menu slots in \"{spec}\""));
    } else {
        ctx.config.root_menus.set(&slots, menu);
    }
    Ok(())
}

/// Append one item per child of `nodes` to `menu`, in document order.
///
/// `depth` is the include depth and `level` the submenu nesting of `menu`.
/// Both carry over into included menus.
///
/// # Errors
///
/// Returns a [`LoadError`] if a menu include exceeds the depth ceiling.
pub fn parse_menu_items(
    ctx: &mut BuildContext,
    nodes: &[TagNode],
    menu: &mut Menu,
    depth: u32,
    level: u32,
) -> Result<(), LoadError> {
    for node in nodes {
        let label = node.attribute("label");
        let icon = node.attribute("icon");
        match &node.kind {
            TagKind::Include => parse_menu_include(ctx, node, menu, depth, level)?,
            TagKind::Menu if level >= MAX_MENU_DEPTH => {
                ctx.warn(
                    node,
                    format!("menus nested deeper than {MAX_MENU_DEPTH} levels"),
                );
            }
            TagKind::Menu => {
                let item_height =
                    ranged_attribute(ctx, node, "height", 0..=u32::MAX, menu.item_height);
                let title = (node.attribute("labeled") == Some("true"))
                    .then(|| label.unwrap_or(DEFAULT_TITLE).to_string());
                let mut submenu = Menu::new(title, item_height);
                parse_menu_items(ctx, &node.children, &mut submenu, depth, level + 1)?;
                menu.items.push(MenuItem {
                    kind: MenuItemKind::Submenu,
                    name: label.map(str::to_string),
                    icon: icon.map(str::to_string),
                    action: MenuAction::None,
                    submenu: Some(Box::new(submenu)),
                });
            }
            TagKind::Program => {
                // A missing command is kept as an empty one.
                let command = node.text();
                let name = label.or(command);
                let action = MenuAction::Execute(command.unwrap_or_default().to_string());
                menu.items.push(MenuItem::normal(name, icon, action));
            }
            TagKind::Separator => menu.items.push(MenuItem::separator()),
            TagKind::Exit => {
                let confirm = node.attribute("confirm") != Some("false");
                ctx.config.set_show_exit_confirmation(confirm);
                let action = MenuAction::Exit(node.text().map(str::to_string));
                let name = label.unwrap_or_else(|| node.name());
                menu.items.push(MenuItem::normal(Some(name), icon, action));
            }
            TagKind::Restart => {
                let name = label.unwrap_or_else(|| node.name());
                menu.items
                    .push(MenuItem::normal(Some(name), icon, MenuAction::Restart));
            }
            kind => match window_action(kind) {
                Some(action) => {
                    let name = label.unwrap_or_else(|| node.name());
                    menu.items.push(MenuItem::normal(Some(name), icon, action));
                }
                None => invalid_tag(ctx, node, &TagKind::Menu),
            },
        }
    }
    Ok(())
}

/// Menu action for the window-operation tags.
const fn window_action(kind: &TagKind) -> Option<MenuAction> {
    match kind {
        TagKind::Desktops => Some(MenuAction::Desktop),
        TagKind::Stick => Some(MenuAction::Stick),
        TagKind::Maximize => Some(MenuAction::Maximize),
        TagKind::Minimize => Some(MenuAction::Minimize),
        TagKind::Shade => Some(MenuAction::Shade),
        TagKind::Move => Some(MenuAction::Move),
        TagKind::Resize => Some(MenuAction::Resize),
        TagKind::Kill => Some(MenuAction::Kill),
        TagKind::Close => Some(MenuAction::Close),
        _ => None,
    }
}

/// Splice the items of an included `<Menu>` document into `menu`.
fn parse_menu_include(
    ctx: &mut BuildContext,
    node: &TagNode,
    menu: &mut Menu,
    depth: u32,
    level: u32,
) -> Result<(), LoadError> {
    let Some(reference) = required_text(ctx, node) else {
        return Ok(());
    };
    let next = include::enter(depth, ctx.options.max_include_depth)?;
    let source = match IncludeSource::menu(reference) {
        Ok(source) => source,
        Err(e) => {
            ctx.warn(node, e.to_string());
            return Ok(());
        }
    };

    tracing::debug!("including menu {} at depth {next}", source.label());
    let resolved = include::resolve(&source, ctx.executor(), &ctx.options.shell);
    let roots = match resolved {
        Ok(roots) => roots,
        Err(IncludeError::Tokenize(e)) => {
            ctx.diagnostics.report(e.into());
            ctx.warn(node, format!("invalid included menu: {reference}"));
            return Ok(());
        }
        Err(e) => {
            ctx.warn(node, e.to_string());
            return Ok(());
        }
    };

    match roots.first() {
        Some(root) if root.kind == TagKind::Menu => {
            parse_menu_items(ctx, &root.children, menu, next, level)
        }
        _ => {
            ctx.warn(node, format!("invalid included menu: {reference}"));
            Ok(())
        }
    }
}
