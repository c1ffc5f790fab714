//! Trays: panel geometry and the components they host.
use serde::Serialize;

use crate::context::BuildContext;
use crate::diagnostics::Origin;
use crate::dispatch::{invalid_tag, parse_ranged, ranged_attribute};
use crate::tree::{TagKind, TagNode};

/// Vertical placement of a tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    /// Top edge of the screen.
    Top,
    /// Vertically centered.
    Center,
    /// Bottom edge of the screen.
    Bottom,
    /// At the configured `y`.
    Fixed,
}

/// Horizontal placement of a tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    /// Left edge of the screen.
    Left,
    /// Horizontally centered.
    Center,
    /// Right edge of the screen.
    Right,
    /// At the configured `x`.
    Fixed,
}

/// Direction components are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrayLayout {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// A `<TrayButton>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayButton {
    /// Icon file.
    pub icon: Option<String>,
    /// Text shown on the button.
    pub label: Option<String>,
    /// Action text, e.g. `exec:xterm` or `root:1`.
    pub action: Option<String>,
    /// Tooltip text.
    pub popup: Option<String>,
    /// Requested width; 0 means natural size.
    pub width: u32,
    /// Requested height; 0 means natural size.
    pub height: u32,
    /// Where the `<TrayButton>` tag was declared.
    pub origin: Origin,
}

/// One component of a tray, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrayComponent {
    /// Desktop pager.
    Pager,
    /// Buttons for open windows.
    TaskList {
        /// 0 means unlimited.
        max_item_width: u32,
    },
    /// A client window embedded into the tray.
    Swallow {
        /// Window name to capture.
        name: String,
        /// Command that starts the client.
        command: Option<String>,
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A clickable button.
    Button(TrayButton),
    /// A clock.
    Clock {
        /// `strftime` format.
        format: Option<String>,
        /// Command run when clicked.
        command: Option<String>,
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// System tray dock.
    Dock,
}

/// A `<Tray>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayConfig {
    /// Hide the tray until the pointer reaches it.
    pub autohide: bool,
    /// Horizontal position for [`HorizontalAlignment::Fixed`].
    pub x: i32,
    /// Vertical position for [`VerticalAlignment::Fixed`]. Negative counts
    /// from the bottom edge.
    pub y: i32,
    /// 0 means fit to the screen.
    pub width: u32,
    /// 0 means fit to the contents.
    pub height: u32,
    /// Vertical placement.
    pub valign: VerticalAlignment,
    /// Horizontal placement.
    pub halign: HorizontalAlignment,
    /// Component direction.
    pub layout: TrayLayout,
    /// Stacking layer.
    pub layer: u32,
    /// Border width in pixels.
    pub border: u32,
    /// Components in declaration order.
    pub components: Vec<TrayComponent>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            autohide: false,
            x: 0,
            y: -1,
            width: 0,
            height: 0,
            valign: VerticalAlignment::Fixed,
            halign: HorizontalAlignment::Fixed,
            layout: TrayLayout::Horizontal,
            layer: 8,
            border: 1,
            components: Vec::new(),
        }
    }
}

impl TrayConfig {
    /// Tray buttons in this tray.
    pub fn buttons(&self) -> impl Iterator<Item = &TrayButton> {
        self.components.iter().filter_map(|c| match c {
            TrayComponent::Button(button) => Some(button),
            _ => None,
        })
    }
}

/// Build a `<Tray>` and add it to the configuration.
pub fn parse_tray(ctx: &mut BuildContext, node: &TagNode) {
    let mut tray = TrayConfig {
        autohide: node.attribute("autohide") == Some("true"),
        ..TrayConfig::default()
    };

    tray.x = ranged_attribute(ctx, node, "x", i32::MIN..=i32::MAX, tray.x);
    tray.y = ranged_attribute(ctx, node, "y", i32::MIN..=i32::MAX, tray.y);
    tray.width = ranged_attribute(ctx, node, "width", 0..=u32::MAX, tray.width);
    tray.height = ranged_attribute(ctx, node, "height", 0..=u32::MAX, tray.height);
    tray.layer = ranged_attribute(ctx, node, "layer", 0..=12, tray.layer);
    tray.border = ranged_attribute(ctx, node, "border", 0..=32, tray.border);

    tray.valign = match node.attribute("valign") {
        None | Some("fixed") => VerticalAlignment::Fixed,
        Some("top") => VerticalAlignment::Top,
        Some("center") => VerticalAlignment::Center,
        Some("bottom") => VerticalAlignment::Bottom,
        Some(other) => {
            ctx.warn(node, format!("invalid tray valign: \"{other}\""));
            VerticalAlignment::Fixed
        }
    };
    tray.halign = match node.attribute("halign") {
        None | Some("fixed") => HorizontalAlignment::Fixed,
        Some("left") => HorizontalAlignment::Left,
        Some("center") => HorizontalAlignment::Center,
        Some("right") => HorizontalAlignment::Right,
        Some(other) => {
            ctx.warn(node, format!("invalid tray halign: \"{other}\""));
            HorizontalAlignment::Fixed
        }
    };
    tray.layout = match node.attribute("layout") {
        None | Some("horizontal") => TrayLayout::Horizontal,
        Some("vertical") => TrayLayout::Vertical,
        Some(other) => {
            ctx.warn(node, format!("invalid tray layout: \"{other}\""));
            TrayLayout::Horizontal
        }
    };

    for child in &node.children {
        let component = match child.kind {
            TagKind::Pager => Some(TrayComponent::Pager),
            TagKind::TaskList => Some(task_list(ctx, child)),
            TagKind::Swallow => swallow(ctx, child, &tray),
            TagKind::TrayButton => tray_button(ctx, child),
            TagKind::Clock => Some(clock(ctx, child)),
            TagKind::Dock => dock(ctx, child, &tray),
            _ => {
                invalid_tag(ctx, child, &node.kind);
                None
            }
        };
        tray.components.extend(component);
    }

    ctx.config.add_tray(tray);
}

fn size(ctx: &mut BuildContext, node: &TagNode) -> (u32, u32) {
    (
        ranged_attribute(ctx, node, "width", 0..=u32::MAX, 0),
        ranged_attribute(ctx, node, "height", 0..=u32::MAX, 0),
    )
}

fn task_list(ctx: &mut BuildContext, node: &TagNode) -> TrayComponent {
    let max_item_width = node
        .attribute("maxwidth")
        .and_then(|value| parse_ranged(ctx, node, "maxwidth for TaskList", value, 0..=u32::MAX))
        .unwrap_or(0);
    TrayComponent::TaskList { max_item_width }
}

fn swallow(ctx: &mut BuildContext, node: &TagNode, tray: &TrayConfig) -> Option<TrayComponent> {
    let Some(name) = node.attribute("name").or_else(|| node.text()) else {
        ctx.warn(node, "cannot swallow a client with no name");
        return None;
    };

    let taken = ctx
        .config
        .trays
        .iter()
        .chain(std::iter::once(tray))
        .flat_map(|t| &t.components)
        .any(|c| matches!(c, TrayComponent::Swallow { name: other, .. } if other == name));
    if taken {
        ctx.warn(
            node,
            format!("cannot swallow the same client multiple times: {name}"),
        );
        return None;
    }

    let (width, height) = size(ctx, node);
    Some(TrayComponent::Swallow {
        name: name.to_string(),
        command: node.text().map(str::to_string),
        width,
        height,
    })
}

fn tray_button(ctx: &mut BuildContext, node: &TagNode) -> Option<TrayComponent> {
    let icon = node.attribute("icon");
    let label = node.attribute("label");
    if icon.is_none() && label.is_none() {
        ctx.warn(node, "no icon or label for TrayButton");
        return None;
    }

    let (width, height) = size(ctx, node);
    Some(TrayComponent::Button(TrayButton {
        icon: icon.map(str::to_string),
        label: label.map(str::to_string),
        action: node.text().map(str::to_string),
        popup: node.attribute("popup").map(str::to_string),
        width,
        height,
        origin: node.origin(),
    }))
}

fn clock(ctx: &mut BuildContext, node: &TagNode) -> TrayComponent {
    let (width, height) = size(ctx, node);
    TrayComponent::Clock {
        format: node.attribute("format").map(str::to_string),
        command: node.text().map(str::to_string),
        width,
        height,
    }
}

fn dock(ctx: &mut BuildContext, node: &TagNode, tray: &TrayConfig) -> Option<TrayComponent> {
    let exists = ctx
        .config
        .trays
        .iter()
        .chain(std::iter::once(tray))
        .flat_map(|t| &t.components)
        .any(|c| matches!(c, TrayComponent::Dock));
    if exists {
        ctx.warn(node, "only one Dock allowed");
        return None;
    }
    Some(TrayComponent::Dock)
}
