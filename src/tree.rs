//! Tag tree: the tokenized form of a configuration document.
//!
//! The tree is produced by the [`lexer`](crate::lexer) and only ever read by
//! the builders. Every node records the file and line it came from so that
//! diagnostics can point back at the offending markup.
use std::fmt;
use std::rc::Rc;

use crate::diagnostics::Origin;

/// Declare [`TagKind`] together with its name table.
///
/// Each entry maps a variant to the exact element name used in the markup.
/// Matching is case-sensitive.
macro_rules! define_tags {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Identity of a tag in the configuration markup.
        ///
        /// The set is closed: any element name not in the table becomes
        /// [`TagKind::Invalid`] carrying the original name, so every context
        /// can report it with an exhaustive `match`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum TagKind {
            $(
                #[doc = concat!("`<", $name, ">`")]
                $variant,
            )+
            /// An element name with no recognized meaning.
            Invalid(String),
        }

        impl TagKind {
            /// Look up the kind for an element name.
            #[must_use]
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($name => Self::$variant,)+
                    other => Self::Invalid(other.to_string()),
                }
            }

            /// The element name as it appears in the markup.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::Invalid(name) => name,
                }
            }
        }
    };
}

define_tags! {
    Jwm => "JWM",
    ActiveBackground => "ActiveBackground",
    ActiveForeground => "ActiveForeground",
    Background => "Background",
    BorderStyle => "BorderStyle",
    Class => "Class",
    Clock => "Clock",
    ClockStyle => "ClockStyle",
    Close => "Close",
    Desktops => "Desktops",
    Dock => "Dock",
    DoubleClickDelta => "DoubleClickDelta",
    DoubleClickSpeed => "DoubleClickSpeed",
    Exit => "Exit",
    FocusModel => "FocusModel",
    Font => "Font",
    Foreground => "Foreground",
    Group => "Group",
    Height => "Height",
    IconPath => "IconPath",
    Include => "Include",
    Key => "Key",
    Kill => "Kill",
    Maximize => "Maximize",
    Menu => "Menu",
    MenuStyle => "MenuStyle",
    Minimize => "Minimize",
    Mouse => "Mouse",
    Move => "Move",
    MoveMode => "MoveMode",
    Name => "Name",
    Option => "Option",
    Outline => "Outline",
    Pager => "Pager",
    PagerStyle => "PagerStyle",
    PopupStyle => "PopupStyle",
    Program => "Program",
    Resize => "Resize",
    ResizeMode => "ResizeMode",
    Restart => "Restart",
    RestartCommand => "RestartCommand",
    RootMenu => "RootMenu",
    Separator => "Separator",
    Shade => "Shade",
    ShutdownCommand => "ShutdownCommand",
    SnapMode => "SnapMode",
    StartupCommand => "StartupCommand",
    Stick => "Stick",
    Swallow => "Swallow",
    TaskList => "TaskList",
    TaskListStyle => "TaskListStyle",
    Theme => "Theme",
    ThemePath => "ThemePath",
    Tray => "Tray",
    TrayButton => "TrayButton",
    TrayButtonStyle => "TrayButtonStyle",
    TrayStyle => "TrayStyle",
    Width => "Width",
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single `name="value"` pair on a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Unescaped attribute value.
    pub value: String,
}

/// One element of the configuration markup.
#[derive(Debug, Clone)]
pub struct TagNode {
    /// Which tag this is.
    pub kind: TagKind,
    /// Trimmed text content, `None` when empty.
    pub text: Option<String>,
    /// Attributes in document order. Names may repeat.
    pub attributes: Vec<Attribute>,
    /// Child elements in document order.
    pub children: Vec<Self>,
    /// File the node was read from (or the generator command for `exec:` includes).
    pub file: Rc<str>,
    /// 1-based line of the opening tag.
    pub line: u32,
}

impl TagNode {
    /// Create an empty node.
    #[must_use]
    pub fn new(kind: TagKind, file: Rc<str>, line: u32) -> Self {
        Self {
            kind,
            text: None,
            attributes: Vec::new(),
            children: Vec::new(),
            file,
            line,
        }
    }

    /// Element name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Value of the first attribute called `name`.
    ///
    /// Later attributes with the same name are shadowed:
    /// `<Tray x="1" x="2">` yields `Some("1")` for `x`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Source location of this node.
    #[must_use]
    pub fn origin(&self) -> Origin {
        Origin {
            file: self.file.to_string(),
            line: self.line,
        }
    }

    /// Append an attribute (builder style).
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Append a child (builder style).
    #[cfg(test)]
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

impl Drop for TagNode {
    // Release descendants with an explicit work list so deeply nested
    // documents do not recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
