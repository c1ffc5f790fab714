//! The configuration state produced by a load.
//!
//! [`WmConfig`] is the single value every builder writes into. It replaces a
//! set of process-wide variables with one owned struct: builders call the
//! setter methods below (or push onto the collections directly) and the
//! loader hands the finished value to the caller.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::feel::{CoordinateDisplay, FocusModel, SnapMode, WindowOpMode};
use crate::group::Group;
use crate::keys::KeyBinding;
use crate::menu::RootMenus;
use crate::style::{ColorRole, FontRole, InsertMode};
use crate::tray::TrayConfig;

/// Title used for labeled menus that carry no label of their own.
pub const DEFAULT_TITLE: &str = "JWM";

/// Desktop count when `<Desktops>` has no `count` attribute.
pub const DEFAULT_DESKTOP_COUNT: u32 = 4;

/// Snap distance when `<SnapMode>` has no `distance` attribute.
pub const DEFAULT_SNAP_DISTANCE: u32 = 5;

/// Frame geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorderSettings {
    /// Border width in pixels.
    pub width: u32,
    /// Title bar height in pixels.
    pub title_height: u32,
}

/// Virtual desktops and their names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesktopSettings {
    /// Number of virtual desktops.
    pub count: u32,
    /// Names keyed by zero-based desktop index.
    pub names: BTreeMap<u32, String>,
}

/// Window snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapSettings {
    /// What windows snap to.
    pub mode: SnapMode,
    /// Snap distance in pixels.
    pub distance: u32,
}

/// Interactive move or resize behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowOpSettings {
    /// Outline or opaque.
    pub mode: WindowOpMode,
    /// Where the geometry popup is shown.
    pub coordinates: CoordinateDisplay,
}

/// Double-click detection thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoubleClickSettings {
    /// Maximum milliseconds between clicks.
    pub speed: u32,
    /// Maximum pointer travel in pixels between clicks.
    pub delta: u32,
}

/// Tooltip popups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopupSettings {
    /// Whether popups are shown at all.
    pub enabled: bool,
    /// Milliseconds before a popup appears.
    pub delay: u32,
}

/// Commands run at window manager lifecycle points, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LifecycleCommands {
    /// Run once when the window manager starts.
    pub startup: Vec<String>,
    /// Run after a restart.
    pub restart: Vec<String>,
    /// Run on exit.
    pub shutdown: Vec<String>,
}

/// Everything a configuration document can set.
#[derive(Debug, Clone, Serialize)]
pub struct WmConfig {
    /// Font per display role.
    pub fonts: BTreeMap<FontRole, String>,
    /// Color per display role.
    pub colors: BTreeMap<ColorRole, String>,
    /// Frame geometry.
    pub border: BorderSettings,
    /// Virtual desktops.
    pub desktops: DesktopSettings,
    /// How windows receive focus.
    pub focus_model: FocusModel,
    /// Window snapping.
    pub snap: SnapSettings,
    /// Interactive move behavior.
    pub move_mode: WindowOpSettings,
    /// Interactive resize behavior.
    pub resize_mode: WindowOpSettings,
    /// Double-click thresholds.
    pub double_click: DoubleClickSettings,
    /// Tooltip popups.
    pub popup: PopupSettings,
    /// Where new task list entries go.
    pub task_insert: InsertMode,
    /// Icon search directories, in declaration order.
    pub icon_paths: Vec<String>,
    /// Theme search directories, in declaration order.
    pub theme_paths: Vec<String>,
    /// Selected theme name.
    pub theme: Option<String>,
    /// Lifecycle commands.
    pub commands: LifecycleCommands,
    /// Root menus by slot.
    pub root_menus: RootMenus,
    /// Key bindings, in declaration order.
    pub keys: Vec<KeyBinding>,
    /// Window groups, in declaration order.
    pub groups: Vec<Group>,
    /// Trays, in declaration order.
    pub trays: Vec<TrayConfig>,
    /// Whether exiting asks for confirmation. Set by the last `<Exit>` seen.
    pub show_exit_confirmation: bool,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            fonts: BTreeMap::new(),
            colors: BTreeMap::new(),
            border: BorderSettings {
                width: 4,
                title_height: 20,
            },
            desktops: DesktopSettings {
                count: DEFAULT_DESKTOP_COUNT,
                names: BTreeMap::new(),
            },
            focus_model: FocusModel::Sloppy,
            snap: SnapSettings {
                mode: SnapMode::Border,
                distance: DEFAULT_SNAP_DISTANCE,
            },
            move_mode: WindowOpSettings {
                mode: WindowOpMode::Opaque,
                coordinates: CoordinateDisplay::Screen,
            },
            resize_mode: WindowOpSettings {
                mode: WindowOpMode::Opaque,
                coordinates: CoordinateDisplay::Screen,
            },
            double_click: DoubleClickSettings {
                speed: 400,
                delta: 2,
            },
            popup: PopupSettings {
                enabled: true,
                delay: 600,
            },
            task_insert: InsertMode::Right,
            icon_paths: Vec::new(),
            theme_paths: Vec::new(),
            theme: None,
            commands: LifecycleCommands::default(),
            root_menus: RootMenus::default(),
            keys: Vec::new(),
            groups: Vec::new(),
            trays: Vec::new(),
            show_exit_confirmation: true,
        }
    }
}

impl WmConfig {
    /// Create a configuration holding the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font for `role`. Later calls win.
    pub fn set_font(&mut self, role: FontRole, value: &str) {
        self.fonts.insert(role, value.to_string());
    }

    /// Set the color for `role`. Later calls win.
    pub fn set_color(&mut self, role: ColorRole, value: &str) {
        self.colors.insert(role, value.to_string());
    }

    /// Font configured for `role`, if any.
    #[must_use]
    pub fn font(&self, role: FontRole) -> Option<&str> {
        self.fonts.get(&role).map(String::as_str)
    }

    /// Color configured for `role`, if any.
    #[must_use]
    pub fn color(&self, role: ColorRole) -> Option<&str> {
        self.colors.get(&role).map(String::as_str)
    }

    /// Set the desktop count, forgetting names of desktops that no longer
    /// exist.
    pub fn set_desktop_count(&mut self, count: u32) {
        self.desktops.count = count;
        self.desktops.names.retain(|&index, _| index < count);
    }

    /// Name the desktop at zero-based `index`.
    pub fn set_desktop_name(&mut self, index: u32, name: &str) {
        self.desktops.names.insert(index, name.to_string());
    }

    /// Append an icon search directory.
    pub fn add_icon_path(&mut self, path: String) {
        self.icon_paths.push(path);
    }

    /// Append a theme search directory.
    pub fn add_theme_path(&mut self, path: String) {
        self.theme_paths.push(path);
    }

    /// Select the theme by name.
    pub fn set_theme(&mut self, theme: &str) {
        self.theme = Some(theme.to_string());
    }

    /// Append a key binding. Bindings are checked after the load.
    pub fn insert_key_binding(&mut self, binding: KeyBinding) {
        self.keys.push(binding);
    }

    /// Append a window group.
    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Append a tray.
    pub fn add_tray(&mut self, tray: TrayConfig) {
        self.trays.push(tray);
    }

    /// Record the confirmation setting of the latest `<Exit>`.
    pub const fn set_show_exit_confirmation(&mut self, show: bool) {
        self.show_exit_confirmation = show;
    }
}
