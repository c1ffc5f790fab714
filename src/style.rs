//! Style blocks: fonts, colors and frame geometry.
//!
//! Each `*Style` element owns a small table mapping child tags to a single
//! [`Setting`]. The walker is shared; only the tables differ.
use serde::Serialize;

use crate::context::BuildContext;
use crate::dispatch::{invalid_tag, parse_ranged, required_text};
use crate::tree::{TagKind, TagNode};

/// Which part of the interface a font applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// `<BorderStyle>` title text.
    Border,
    /// `<MenuStyle>`.
    Menu,
    /// `<TaskListStyle>`.
    Task,
    /// `<TrayStyle>`.
    Tray,
    /// `<PopupStyle>`.
    Popup,
    /// `<ClockStyle>`.
    Clock,
    /// `<TrayButtonStyle>`.
    TrayButton,
}

/// Which part of the interface a color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Inactive border title text.
    BorderForeground,
    /// Inactive border.
    BorderBackground,
    /// Active border title text.
    BorderActiveForeground,
    /// Active border.
    BorderActiveBackground,
    /// Task list text.
    TaskForeground,
    /// Task list background.
    TaskBackground,
    /// Active task list text.
    TaskActiveForeground,
    /// Active task list background.
    TaskActiveBackground,
    /// Tray text.
    TrayForeground,
    /// Tray background.
    TrayBackground,
    /// Outline drawn around windows in the pager.
    PagerOutline,
    /// Pager text.
    PagerForeground,
    /// Pager background.
    PagerBackground,
    /// Active pager text.
    PagerActiveForeground,
    /// Active pager background.
    PagerActiveBackground,
    /// Menu text.
    MenuForeground,
    /// Menu background.
    MenuBackground,
    /// Highlighted menu item text.
    MenuActiveForeground,
    /// Highlighted menu item.
    MenuActiveBackground,
    /// Popup outline.
    PopupOutline,
    /// Popup text.
    PopupForeground,
    /// Popup background.
    PopupBackground,
    /// Clock text.
    ClockForeground,
    /// Clock background.
    ClockBackground,
    /// Tray button text.
    TrayButtonForeground,
    /// Tray button background.
    TrayButtonBackground,
}

/// Where new task list entries go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMode {
    /// Prepend.
    Left,
    /// Append.
    Right,
}

/// Effect of one child of a style block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    Font(FontRole),
    Color(ColorRole),
    BorderWidth,
    TitleHeight,
}

type StyleTable = &'static [(TagKind, Setting)];

const BORDER_STYLE: StyleTable = &[
    (TagKind::Font, Setting::Font(FontRole::Border)),
    (TagKind::Width, Setting::BorderWidth),
    (TagKind::Height, Setting::TitleHeight),
    (TagKind::Foreground, Setting::Color(ColorRole::BorderForeground)),
    (TagKind::Background, Setting::Color(ColorRole::BorderBackground)),
    (TagKind::ActiveForeground, Setting::Color(ColorRole::BorderActiveForeground)),
    (TagKind::ActiveBackground, Setting::Color(ColorRole::BorderActiveBackground)),
];

const TASK_LIST_STYLE: StyleTable = &[
    (TagKind::Font, Setting::Font(FontRole::Task)),
    (TagKind::Foreground, Setting::Color(ColorRole::TaskForeground)),
    (TagKind::Background, Setting::Color(ColorRole::TaskBackground)),
    (TagKind::ActiveForeground, Setting::Color(ColorRole::TaskActiveForeground)),
    (TagKind::ActiveBackground, Setting::Color(ColorRole::TaskActiveBackground)),
];

const TRAY_STYLE: StyleTable = &[
    (TagKind::Font, Setting::Font(FontRole::Tray)),
    (TagKind::Foreground, Setting::Color(ColorRole::TrayForeground)),
    (TagKind::Background, Setting::Color(ColorRole::TrayBackground)),
];

const PAGER_STYLE: StyleTable = &[
    (TagKind::Outline, Setting::Color(ColorRole::PagerOutline)),
    (TagKind::Foreground, Setting::Color(ColorRole::PagerForeground)),
    (TagKind::Background, Setting::Color(ColorRole::PagerBackground)),
    (TagKind::ActiveForeground, Setting::Color(ColorRole::PagerActiveForeground)),
    (TagKind::ActiveBackground, Setting::Color(ColorRole::PagerActiveBackground)),
];

const MENU_STYLE: StyleTable = &[
    (TagKind::Font, Setting::Font(FontRole::Menu)),
    (TagKind::Foreground, Setting::Color(ColorRole::MenuForeground)),
    (TagKind::Background, Setting::Color(ColorRole::MenuBackground)),
    (TagKind::ActiveForeground, Setting::Color(ColorRole::MenuActiveForeground)),
    (TagKind::ActiveBackground, Setting::Color(ColorRole::MenuActiveBackground)),
];

const POPUP_STYLE: StyleTable = &[
    (TagKind::Font, Setting::Font(FontRole::Popup)),
    (TagKind::Outline, Setting::Color(ColorRole::PopupOutline)),
    (TagKind::Foreground, Setting::Color(ColorRole::PopupForeground)),
    (TagKind::Background, Setting::Color(ColorRole::PopupBackground)),
];

const CLOCK_STYLE: StyleTable = &[
    (TagKind::Font, Setting::Font(FontRole::Clock)),
    (TagKind::Foreground, Setting::Color(ColorRole::ClockForeground)),
    (TagKind::Background, Setting::Color(ColorRole::ClockBackground)),
];

const TRAY_BUTTON_STYLE: StyleTable = &[
    (TagKind::Font, Setting::Font(FontRole::TrayButton)),
    (TagKind::Foreground, Setting::Color(ColorRole::TrayButtonForeground)),
    (TagKind::Background, Setting::Color(ColorRole::TrayButtonBackground)),
];

const fn table_for(kind: &TagKind) -> Option<StyleTable> {
    match kind {
        TagKind::BorderStyle => Some(BORDER_STYLE),
        TagKind::TaskListStyle => Some(TASK_LIST_STYLE),
        TagKind::TrayStyle => Some(TRAY_STYLE),
        TagKind::PagerStyle => Some(PAGER_STYLE),
        TagKind::MenuStyle => Some(MENU_STYLE),
        TagKind::PopupStyle => Some(POPUP_STYLE),
        TagKind::ClockStyle => Some(CLOCK_STYLE),
        TagKind::TrayButtonStyle => Some(TRAY_BUTTON_STYLE),
        _ => None,
    }
}

/// Apply any of the `*Style` blocks.
pub fn parse_style(ctx: &mut BuildContext, node: &TagNode) {
    let Some(table) = table_for(&node.kind) else {
        return;
    };

    match node.kind {
        TagKind::TaskListStyle => parse_task_list_attributes(ctx, node),
        TagKind::PopupStyle => parse_popup_attributes(ctx, node),
        _ => {}
    }

    for child in &node.children {
        match table.iter().find(|(kind, _)| *kind == child.kind) {
            Some((_, setting)) => apply(ctx, child, *setting),
            None => invalid_tag(ctx, child, &node.kind),
        }
    }
}

fn apply(ctx: &mut BuildContext, node: &TagNode, setting: Setting) {
    let Some(value) = required_text(ctx, node) else {
        return;
    };
    match setting {
        Setting::Font(role) => ctx.config.set_font(role, value),
        Setting::Color(role) => ctx.config.set_color(role, value),
        Setting::BorderWidth => {
            if let Some(width) = parse_ranged(ctx, node, "border width", value, 1..=32) {
                ctx.config.border.width = width;
            }
        }
        Setting::TitleHeight => {
            if let Some(height) = parse_ranged(ctx, node, "title height", value, 2..=64) {
                ctx.config.border.title_height = height;
            }
        }
    }
}

fn parse_task_list_attributes(ctx: &mut BuildContext, node: &TagNode) {
    match node.attribute("insert") {
        None => {}
        Some("left") => ctx.config.task_insert = InsertMode::Left,
        Some("right") => ctx.config.task_insert = InsertMode::Right,
        Some(other) => ctx.warn(node, format!("invalid insert mode: \"{other}\"")),
    }
}

fn parse_popup_attributes(ctx: &mut BuildContext, node: &TagNode) {
    match node.attribute("enabled") {
        None => {}
        Some("true") => ctx.config.popup.enabled = true,
        Some("false") => ctx.config.popup.enabled = false,
        Some(other) => ctx.warn(node, format!("invalid enabled value: \"{other}\"")),
    }
    if let Some(delay) = node.attribute("delay")
        && let Some(delay) = parse_ranged(ctx, node, "popup delay", delay, 0..=u32::MAX)
    {
        ctx.config.popup.delay = delay;
    }
}
