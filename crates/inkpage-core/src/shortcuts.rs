//! Keyboard shortcut registry and dispatch.

use crate::input::Modifiers;
use crate::tools::Tool;

/// An action a shortcut triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectTool(Tool),
    Undo,
    Redo,
    /// Zero-based color slot.
    ColorSlot(usize),
    PreviousWidth,
    NextWidth,
    ClearSelection,
    ZoomIn,
    ZoomOut,
    ResetView,
}

/// A key press as reported by the host, e.g. `key: "z"` with Ctrl held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press triggers this shortcut.
    ///
    /// Shift is only significant for chorded shortcuts, so `+` typed as
    /// Shift+`=` still zooms in.
    pub fn matches(&self, input: &KeyInput) -> bool {
        if !self.key.eq_ignore_ascii_case(&input.key) {
            return false;
        }
        if self.ctrl != input.modifiers.command() || input.modifiers.alt {
            return false;
        }
        !self.ctrl || self.shift == input.modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("P", false, false, Command::SelectTool(Tool::Pen), "Pen"),
            Shortcut::new("E", false, false, Command::SelectTool(Tool::Eraser), "Eraser"),
            Shortcut::new("H", false, false, Command::SelectTool(Tool::Highlighter), "Highlighter"),
            Shortcut::new("L", false, false, Command::SelectTool(Tool::Lasso), "Lasso"),
            Shortcut::new("Z", true, false, Command::Undo, "Undo"),
            Shortcut::new("Z", true, true, Command::Redo, "Redo"),
            Shortcut::new("Y", true, false, Command::Redo, "Redo"),
            Shortcut::new("1", false, false, Command::ColorSlot(0), "First color"),
            Shortcut::new("2", false, false, Command::ColorSlot(1), "Second color"),
            Shortcut::new("3", false, false, Command::ColorSlot(2), "Third color"),
            Shortcut::new("[", false, false, Command::PreviousWidth, "Thinner ink"),
            Shortcut::new("]", false, false, Command::NextWidth, "Thicker ink"),
            Shortcut::new("Escape", false, false, Command::ClearSelection, "Clear selection"),
            Shortcut::new("+", false, false, Command::ZoomIn, "Zoom in"),
            Shortcut::new("=", false, false, Command::ZoomIn, "Zoom in"),
            Shortcut::new("-", false, false, Command::ZoomOut, "Zoom out"),
            Shortcut::new("0", false, false, Command::ResetView, "Reset view"),
        ]
    }

    /// Find the shortcut bound to a key press.
    pub fn shortcut_for(input: &KeyInput) -> Option<Shortcut> {
        Self::all().into_iter().find(|shortcut| shortcut.matches(input))
    }

    /// Find the command bound to a key press.
    pub fn command_for(input: &KeyInput) -> Option<Command> {
        Self::shortcut_for(input).map(|shortcut| shortcut.command)
    }
}
