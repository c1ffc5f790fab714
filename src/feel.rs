//! Behavioral settings: desktops, focus, snapping, move/resize modes and
//! double-click thresholds.
use serde::Serialize;

use crate::config::{DEFAULT_DESKTOP_COUNT, DEFAULT_SNAP_DISTANCE};
use crate::context::BuildContext;
use crate::dispatch::{invalid_tag, parse_ranged, ranged_attribute, required_text};
use crate::tree::{TagKind, TagNode};

/// How windows receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusModel {
    /// Focus follows the pointer.
    Sloppy,
    /// Focus changes on click.
    Click,
}

/// What windows snap to while moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// No snapping.
    None,
    /// Snap to screen edges.
    Screen,
    /// Snap to screen edges and other windows.
    Border,
}

/// Whether moves and resizes redraw the window or an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowOpMode {
    /// Draw an outline only.
    Outline,
    /// Redraw the window itself.
    Opaque,
}

/// Where the coordinate popup is shown during a move or resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateDisplay {
    /// Not shown.
    Off,
    /// Centered on the screen.
    Screen,
    /// Centered on the window.
    Window,
    /// Top-left corner of the screen.
    Corner,
}

impl CoordinateDisplay {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(Self::Off),
            "screen" => Some(Self::Screen),
            "window" => Some(Self::Window),
            "corner" => Some(Self::Corner),
            _ => None,
        }
    }
}

/// `<Desktops count="N"><Name>..</Name>..</Desktops>`
///
/// Only the first `count` children are examined; an invalid child still
/// takes up a desktop index.
pub fn parse_desktops(ctx: &mut BuildContext, node: &TagNode) {
    let count = ranged_attribute(ctx, node, "count", 1..=8, DEFAULT_DESKTOP_COUNT);
    ctx.config.set_desktop_count(count);

    for (index, child) in (0..count).zip(&node.children) {
        match child.kind {
            TagKind::Name => {
                if let Some(name) = required_text(ctx, child) {
                    ctx.config.set_desktop_name(index, name);
                }
            }
            _ => invalid_tag(ctx, child, &node.kind),
        }
    }
}

/// `<FocusModel>sloppy|click</FocusModel>`
pub fn parse_focus_model(ctx: &mut BuildContext, node: &TagNode) {
    match node.text() {
        Some("sloppy") => ctx.config.focus_model = FocusModel::Sloppy,
        Some("click") => ctx.config.focus_model = FocusModel::Click,
        Some(other) => ctx.warn(node, format!("invalid focus model: \"{other}\"")),
        None => ctx.warn(node, "focus model not specified"),
    }
}

/// `<SnapMode distance="N">none|screen|border</SnapMode>`
///
/// The distance is applied even when the mode is invalid.
pub fn parse_snap_mode(ctx: &mut BuildContext, node: &TagNode) {
    let distance = ranged_attribute(ctx, node, "distance", 1..=32, DEFAULT_SNAP_DISTANCE);
    ctx.config.snap.distance = distance;

    match node.text() {
        Some("none") => ctx.config.snap.mode = SnapMode::None,
        Some("screen") => ctx.config.snap.mode = SnapMode::Screen,
        Some("border") => ctx.config.snap.mode = SnapMode::Border,
        Some(other) => ctx.warn(node, format!("invalid snap mode: {other}")),
        None => ctx.warn(node, "snap mode not specified"),
    }
}

/// `<MoveMode coordinates="..">outline|opaque</MoveMode>`
pub fn parse_move_mode(ctx: &mut BuildContext, node: &TagNode) {
    if let Some(coordinates) = coordinates(ctx, node) {
        ctx.config.move_mode.coordinates = coordinates;
    }
    if let Some(mode) = window_op_mode(ctx, node, "move") {
        ctx.config.move_mode.mode = mode;
    }
}

/// `<ResizeMode coordinates="..">outline|opaque</ResizeMode>`
pub fn parse_resize_mode(ctx: &mut BuildContext, node: &TagNode) {
    if let Some(coordinates) = coordinates(ctx, node) {
        ctx.config.resize_mode.coordinates = coordinates;
    }
    if let Some(mode) = window_op_mode(ctx, node, "resize") {
        ctx.config.resize_mode.mode = mode;
    }
}

/// `coordinates` attribute; absent means `screen`.
fn coordinates(ctx: &mut BuildContext, node: &TagNode) -> Option<CoordinateDisplay> {
    let Some(value) = node.attribute("coordinates") else {
        return Some(CoordinateDisplay::Screen);
    };
    let parsed = CoordinateDisplay::from_name(value);
    if parsed.is_none() {
        ctx.warn(node, format!("invalid coordinates: \"{value}\""));
    }
    parsed
}

fn window_op_mode(ctx: &mut BuildContext, node: &TagNode, what: &str) -> Option<WindowOpMode> {
    match node.text() {
        Some("outline") => Some(WindowOpMode::Outline),
        Some("opaque") => Some(WindowOpMode::Opaque),
        Some(other) => {
            ctx.warn(node, format!("invalid {what} mode: {other}"));
            None
        }
        None => {
            ctx.warn(node, format!("{what} mode not specified"));
            None
        }
    }
}

/// Milliseconds, `1..=2000`.
pub fn parse_double_click_speed(ctx: &mut BuildContext, node: &TagNode) {
    if let Some(value) = required_text(ctx, node)
        && let Some(speed) = parse_ranged(ctx, node, "double click speed", value, 1..=2000)
    {
        ctx.config.double_click.speed = speed;
    }
}

/// Pixels, `0..=32`.
pub fn parse_double_click_delta(ctx: &mut BuildContext, node: &TagNode) {
    if let Some(value) = required_text(ctx, node)
        && let Some(delta) = parse_ranged(ctx, node, "double click delta", value, 0..=32)
    {
        ctx.config.double_click.delta = delta;
    }
}
