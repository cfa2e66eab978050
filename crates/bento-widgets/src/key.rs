//! Key bindings, and a [`KeyMap`] trait for rendering one-line help.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// One or more key combinations bound to an action, with help text.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Short key label for help, e.g. `"space"` or `"↑/k"`.
    pub label: String,
    /// What the binding does, e.g. `"select"`.
    pub description: String,
    /// Disabled bindings never match and are left out of help.
    pub enabled: bool,
}

/// A key code plus the modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key.
    pub code: KeyCode,
    /// Required modifiers.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Bind several combinations under one help entry.
    pub fn new(
        keys: Vec<KeyCombination>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            label: label.into(),
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` triggers this binding.
    ///
    /// Modifiers must match exactly, except that Shift is ignored for
    /// character keys since terminals disagree on reporting it.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled && self.keys.iter().any(|k| k.matches(event))
    }

    /// Builder for enabling or disabling the binding.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl KeyCombination {
    /// A bare key.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// The key with Ctrl held.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }
        let mut held = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            held.remove(KeyModifiers::SHIFT);
        }
        held == self.modifiers
    }
}

/// Types that expose their bindings for help rendering.
pub trait KeyMap {
    /// The bindings worth showing in a one-line hint.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Render bindings as `key desc  key desc ...`, skipping disabled ones.
pub fn help_line(bindings: &[&Binding], key_style: Style, desc_style: Style) -> Line<'static> {
    let mut spans = Vec::new();
    for binding in bindings.iter().filter(|b| b.enabled) {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(binding.label.clone(), key_style));
        spans.push(Span::styled(format!(" {}", binding.description), desc_style));
    }
    Line::from(spans)
}
