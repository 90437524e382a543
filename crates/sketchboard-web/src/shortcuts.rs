//! Keyboard shortcut registry.

use sketchboard_core::tools::ToolKind;

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    Tool(ToolKind),
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
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

    /// Format the shortcut for display (e.g., "Ctrl+Z").
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

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, Command::Undo, "Undo"),
            Shortcut::new("Z", true, true, Command::Redo, "Redo"),
            Shortcut::new("Y", true, false, Command::Redo, "Redo"),
            Shortcut::new("V", false, false, Command::Tool(ToolKind::Select), "Select tool"),
            Shortcut::new("L", false, false, Command::Tool(ToolKind::Line), "Line tool"),
            Shortcut::new("R", false, false, Command::Tool(ToolKind::Rectangle), "Rectangle tool"),
            Shortcut::new("C", false, false, Command::Tool(ToolKind::Circle), "Circle tool"),
        ]
    }

    /// Find the command bound to a key press. `ctrl` should also be set for
    /// the platform command key.
    pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.command)
    }

    /// Log all shortcuts.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("{:12} {}", shortcut.format(), shortcut.description);
        }
    }
}
