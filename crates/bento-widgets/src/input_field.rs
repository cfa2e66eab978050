//! Labeled single-line input with helper/error footer, clear and
//! password-reveal actions, and a loading spinner.
//!
//! The field owns its value and reports every edit as
//! [`Message::Changed`]. Validation is the parent's business: it decides
//! when to call [`InputField::set_invalid`] and what error message to show.

use crate::chrome::{FOCUS_COLOR, IDLE_COLOR};
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::spinner::{self, Spinner};
use bento_core::command::Command;
use bento_core::component::Component;
use bento_core::subscription::Subscription;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

const MASK: char = '•';
const CLEAR_GLYPH: &str = "✖";

/// What kind of value the field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    /// Plain text.
    #[default]
    Text,
    /// Masked unless revealed.
    Password,
    /// Rendered like text; lets the parent know to validate an address.
    Email,
}

/// Box appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Shaded background, no border.
    Filled,
    /// Rounded border all round.
    #[default]
    Outlined,
    /// Bottom rule only.
    Ghost,
}

/// Padding inside the box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Size {
    /// No padding.
    Sm,
    /// One column each side.
    #[default]
    Md,
    /// Two columns each side and a blank row above and below.
    Lg,
}

impl Size {
    fn padding(self) -> Padding {
        match self {
            Size::Sm => Padding::ZERO,
            Size::Md => Padding::horizontal(1),
            Size::Lg => Padding::new(2, 2, 1, 1),
        }
    }
}

/// Style configuration for the input field.
#[derive(Debug, Clone)]
pub struct InputFieldStyle {
    /// Label above the box.
    pub label: Style,
    /// Entered text.
    pub text: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// The cursor cell.
    pub cursor: Style,
    /// Helper footer.
    pub helper: Style,
    /// Error footer and invalid accent.
    pub error: Style,
    /// Background of the filled variant.
    pub filled: Style,
    /// Text and icons while disabled or loading.
    pub disabled: Style,
    /// Clear and reveal icons.
    pub icon: Style,
}

impl Default for InputFieldStyle {
    fn default() -> Self {
        Self {
            label: Style::default().add_modifier(Modifier::BOLD),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            helper: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            filled: Style::default().bg(Color::Indexed(236)),
            disabled: Style::default().fg(Color::DarkGray),
            icon: Style::default().fg(Color::Gray),
        }
    }
}

/// Messages for the input field.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard event to process.
    KeyPress(KeyEvent),
    /// Insert text at the cursor.
    Paste(String),
    /// Empty the field, as the clear icon does.
    Clear,
    /// Show or hide a password.
    ToggleVisibility,
    /// Spinner animation tick.
    Spinner(spinner::Message),
    /// Emitted when the value changes.
    Changed(String),
    /// Emitted when Enter is pressed.
    Submit(String),
}

/// Key bindings for field-level actions. Editing keys are fixed.
#[derive(Debug, Clone)]
pub struct InputFieldKeyBindings {
    /// Clear the value. Default: Ctrl+L
    pub clear: Binding,
    /// Show/hide a password. Default: Ctrl+R
    pub reveal: Binding,
}

impl Default for InputFieldKeyBindings {
    fn default() -> Self {
        Self {
            clear: Binding::new(vec![KeyCombination::ctrl(KeyCode::Char('l'))], "^l", "clear"),
            reveal: Binding::new(vec![KeyCombination::ctrl(KeyCode::Char('r'))], "^r", "show/hide"),
        }
    }
}

/// A labeled single-line text input.
///
/// ```ignore
/// let mut email = InputField::new()
///     .with_label("Email")
///     .with_placeholder("you@example.com")
///     .with_kind(InputKind::Email)
///     .with_variant(Variant::Filled)
///     .with_error_message("Please enter a valid email")
///     .clearable(true);
/// email.focus();
/// ```
pub struct InputField {
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    label: String,
    placeholder: String,
    helper_text: String,
    error_message: String,
    disabled: bool,
    invalid: bool,
    loading: bool,
    kind: InputKind,
    variant: Variant,
    size: Size,
    clearable: bool,
    revealed: bool,
    char_limit: Option<usize>,
    spinner: Spinner,
    style: InputFieldStyle,
    key_bindings: InputFieldKeyBindings,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl InputField {
    /// An empty, enabled, outlined, medium text field.
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            focus: false,
            label: String::new(),
            placeholder: String::new(),
            helper_text: String::new(),
            error_message: String::new(),
            disabled: false,
            invalid: false,
            loading: false,
            kind: InputKind::default(),
            variant: Variant::default(),
            size: Size::default(),
            clearable: false,
            revealed: false,
            char_limit: None,
            spinner: Spinner::new("input-field").with_frames(spinner::frames::LINE),
            style: InputFieldStyle::default(),
            key_bindings: InputFieldKeyBindings::default(),
        }
    }

    /// Label drawn above the box. Also keys the spinner timer, so loading
    /// fields with different labels animate independently.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self.rekey_spinner(format!("input-field/{}", self.label));
        self
    }

    /// Text shown while the value is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Footer hint shown unless an error is showing.
    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = text.into();
        self
    }

    /// Footer error shown while invalid.
    pub fn with_error_message(mut self, text: impl Into<String>) -> Self {
        self.error_message = text.into();
        self
    }

    /// Builder: value kind.
    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder: box appearance.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Builder: padding size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Builder: show a clear action while the field has a value.
    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Builder: disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: loading.
    pub fn loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Builder: initial value, cursor at the end.
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Builder: maximum number of characters.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    /// Builder: explicit timer key for the loading spinner.
    pub fn with_spinner_key(mut self, key: impl Into<String>) -> Self {
        self.rekey_spinner(key.into());
        self
    }

    /// Builder: styles.
    pub fn with_style(mut self, style: InputFieldStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: key bindings.
    pub fn with_key_bindings(mut self, bindings: InputFieldKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    fn rekey_spinner(&mut self, key: String) {
        self.spinner = Spinner::new(key).with_frames(spinner::frames::LINE);
        self.spinner.set_active(self.loading);
    }

    /// Take keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Drop keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the value, cursor at the end. Emits nothing.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        if let Some(limit) = self.char_limit {
            self.value.truncate(limit);
        }
        self.cursor = self.value.len();
    }

    /// Cursor position in characters.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Whether the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Mark the value invalid or valid.
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Whether the field is marked invalid.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Enable or disable the field.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether the field is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enter or leave the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.spinner.set_active(loading);
    }

    /// Whether the field is loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The value kind.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Whether a password is currently shown in clear text.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Disabled or loading; either way, no input is accepted.
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }

    /// Whether the clear action is currently offered.
    pub fn can_clear(&self) -> bool {
        self.clearable && !self.value.is_empty() && !self.is_inert()
    }

    /// Whether the show/hide action is currently offered.
    pub fn can_reveal(&self) -> bool {
        self.kind == InputKind::Password && !self.is_inert()
    }

    /// The footer line, if any: the error while invalid, else the helper.
    pub fn footer(&self) -> Option<(&str, Style)> {
        if self.invalid && !self.error_message.is_empty() {
            Some((self.error_message.as_str(), self.style.error))
        } else if !self.helper_text.is_empty() {
            Some((self.helper_text.as_str(), self.style.helper))
        } else {
            None
        }
    }

    /// Rows needed to draw the field at its current settings.
    pub fn height(&self) -> u16 {
        let label = u16::from(!self.label.is_empty());
        let footer = u16::from(self.footer().is_some());
        label + self.box_height() + footer
    }

    fn box_height(&self) -> u16 {
        let padding = self.size.padding();
        let border = match self.variant {
            Variant::Outlined => 2,
            Variant::Ghost => 1,
            Variant::Filled => 0,
        };
        1 + padding.top + padding.bottom + border
    }

    fn clear(&mut self) -> Command<Message> {
        if !self.can_clear() {
            return Command::none();
        }
        self.value.clear();
        self.cursor = 0;
        self.changed()
    }

    fn toggle_visibility(&mut self) {
        if self.can_reveal() {
            self.revealed = !self.revealed;
        }
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.value()))
    }

    fn insert_char(&mut self, c: char) -> Command<Message> {
        if self.char_limit.is_some_and(|limit| self.value.len() >= limit) {
            return Command::none();
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
        self.changed()
    }

    fn insert_paste(&mut self, text: &str) -> Command<Message> {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        let room = self
            .char_limit
            .map_or(chars.len(), |limit| limit.saturating_sub(self.value.len()));
        let take = room.min(chars.len());
        if take == 0 {
            return Command::none();
        }
        for &c in &chars[..take] {
            self.value.insert(self.cursor, c);
            self.cursor += 1;
        }
        self.changed()
    }

    fn delete_char_backward(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        self.changed()
    }

    fn delete_char_forward(&mut self) -> Command<Message> {
        if self.cursor >= self.value.len() {
            return Command::none();
        }
        self.value.remove(self.cursor);
        self.changed()
    }

    fn delete_word_backward(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        let mut start = self.cursor;
        while start > 0 && self.value[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && self.value[start - 1] != ' ' {
            start -= 1;
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
        self.changed()
    }

    fn delete_to_start(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        self.value.drain(..self.cursor);
        self.cursor = 0;
        self.changed()
    }

    fn delete_to_end(&mut self) -> Command<Message> {
        if self.cursor >= self.value.len() {
            return Command::none();
        }
        self.value.truncate(self.cursor);
        self.changed()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if self.key_bindings.clear.matches(&key) {
            return self.clear();
        }
        if self.key_bindings.reveal.matches(&key) {
            self.toggle_visibility();
            return Command::none();
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.value.len(),
            KeyCode::Char('u') if ctrl => return self.delete_to_start(),
            KeyCode::Char('k') if ctrl => return self.delete_to_end(),
            KeyCode::Char('w') if ctrl => return self.delete_word_backward(),
            KeyCode::Backspace if key.modifiers.contains(KeyModifiers::ALT) => {
                return self.delete_word_backward()
            }
            KeyCode::Char(c)
                if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                return self.insert_char(c)
            }
            KeyCode::Backspace => return self.delete_char_backward(),
            KeyCode::Delete => return self.delete_char_forward(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            KeyCode::Enter => return Command::message(Message::Submit(self.value())),
            _ => {}
        }
        Command::none()
    }

    fn shown_chars(&self) -> Vec<char> {
        if self.kind == InputKind::Password && !self.revealed {
            vec![MASK; self.value.len()]
        } else {
            self.value.clone()
        }
    }

    /// First visible character so the cursor cell fits in `width` columns.
    fn scroll_start(&self, shown: &[char], width: usize) -> usize {
        if !self.focus {
            return 0;
        }
        let cursor = self.cursor.min(shown.len());
        let mut start = cursor;
        let mut used = 1;
        while start > 0 {
            let w = shown[start - 1].width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            start -= 1;
        }
        start
    }

    /// Reveal toggle then clear glyph, separated by a space.
    fn trailing_icons(&self) -> Line<'static> {
        if self.loading {
            return Line::default();
        }
        let mut spans = Vec::new();
        if self.can_reveal() {
            let text = if self.revealed { "hide" } else { "show" };
            spans.push(Span::styled(text, self.style.icon));
        }
        if self.can_clear() {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(CLEAR_GLYPH, self.style.icon));
        }
        Line::from(spans)
    }

    fn border_color(&self) -> Color {
        if self.invalid {
            self.style.error.fg.unwrap_or(Color::Red)
        } else if self.focus && !self.is_inert() {
            FOCUS_COLOR
        } else {
            IDLE_COLOR
        }
    }

    fn box_block(&self) -> Block<'static> {
        let border = Style::default().fg(self.border_color());
        let block = match self.variant {
            Variant::Outlined => Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
            Variant::Ghost => Block::new().borders(Borders::BOTTOM).border_style(border),
            Variant::Filled => Block::new().style(self.style.filled),
        };
        block.padding(self.size.padding())
    }

    fn text_line(&self, width: u16) -> Line<'_> {
        let text_style = if self.is_inert() {
            self.style.disabled
        } else if self.invalid && self.variant == Variant::Filled {
            self.style.error
        } else {
            self.style.text
        };
        let editing = self.focus && !self.is_inert();

        if self.value.is_empty() {
            let mut spans = Vec::new();
            if editing {
                spans.push(Span::styled(" ", self.style.cursor));
            }
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
            return Line::from(spans);
        }

        let shown = self.shown_chars();
        let start = self.scroll_start(&shown, usize::from(width));
        if !editing {
            let visible: String = shown[start..].iter().collect();
            return Line::from(Span::styled(visible, text_style));
        }

        let cursor = self.cursor.min(shown.len());
        let before: String = shown[start..cursor].iter().collect();
        let mut spans = vec![Span::styled(before, text_style)];
        match shown.get(cursor) {
            Some(c) => {
                spans.push(Span::styled(c.to_string(), self.style.cursor));
                let after: String = shown[cursor + 1..].iter().collect();
                spans.push(Span::styled(after, text_style));
            }
            None => spans.push(Span::styled(" ", self.style.cursor)),
        }
        Line::from(spans)
    }
}

impl KeyMap for InputField {
    fn short_help(&self) -> Vec<&Binding> {
        let mut bindings = Vec::new();
        if self.can_clear() {
            bindings.push(&self.key_bindings.clear);
        }
        if self.can_reveal() {
            bindings.push(&self.key_bindings.reveal);
        }
        bindings
    }
}

impl Component for InputField {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Spinner(m) => self.spinner.update(m).map(Message::Spinner),
            Message::Clear => self.clear(),
            Message::ToggleVisibility => {
                self.toggle_visibility();
                Command::none()
            }
            Message::KeyPress(key) if self.focus && !self.is_inert() => self.handle_key(key),
            Message::Paste(text) if self.focus && !self.is_inert() => self.insert_paste(&text),
            Message::KeyPress(_) | Message::Paste(_) => Command::none(),
            Message::Changed(_) | Message::Submit(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let label_h = u16::from(!self.label.is_empty());
        let footer = self.footer();
        let [label_area, box_area, footer_area] = Layout::vertical([
            Constraint::Length(label_h),
            Constraint::Length(self.box_height()),
            Constraint::Length(u16::from(footer.is_some())),
        ])
        .areas(area);

        if label_h > 0 {
            let style = if self.is_inert() {
                self.style.disabled
            } else {
                self.style.label
            };
            frame.render_widget(Paragraph::new(self.label.as_str()).style(style), label_area);
        }

        let block = self.box_block();
        let inner = block.inner(box_area);
        frame.render_widget(block, box_area);

        let icons = self.trailing_icons();
        let icon_width = if self.loading {
            self.spinner.width()
        } else {
            u16::try_from(icons.width()).unwrap_or(u16::MAX)
        };
        let gap = u16::from(icon_width > 0);
        let [text_area, _, icon_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(gap),
            Constraint::Length(icon_width),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(self.text_line(text_area.width)), text_area);
        if self.loading {
            self.spinner.view(frame, icon_area);
        } else if icon_width > 0 {
            frame.render_widget(Paragraph::new(icons), icon_area);
        }

        if let Some((text, style)) = footer {
            frame.render_widget(Paragraph::new(text).style(style), footer_area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        self.spinner
            .subscriptions()
            .into_iter()
            .map(|sub| sub.map(Message::Spinner))
            .collect()
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_core::testing::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Message {
        Message::KeyPress(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn focused(field: InputField) -> InputField {
        let mut field = field;
        field.focus();
        field
    }

    fn type_str(field: &mut InputField, text: &str) {
        for c in text.chars() {
            field.update(key(KeyCode::Char(c)));
        }
    }

    fn changed(cmd: Command<Message>) -> Option<String> {
        match cmd.into_message() {
            Some(Message::Changed(v)) => Some(v),
            _ => None,
        }
    }

    fn render(field: &InputField, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, field.height())).unwrap();
        terminal.draw(|f| field.view(f, f.area())).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn typing_emits_changed() {
        let mut f = focused(InputField::new());
        assert_eq!(changed(f.update(key(KeyCode::Char('h')))), Some("h".into()));
        assert_eq!(changed(f.update(key(KeyCode::Char('i')))), Some("hi".into()));
        assert_eq!(f.cursor_position(), 2);
    }

    #[test]
    fn unfocused_disabled_and_loading_ignore_input() {
        let mut f = InputField::new();
        assert!(f.update(key(KeyCode::Char('x'))).is_none());

        let mut f = focused(InputField::new().disabled(true));
        assert!(f.update(key(KeyCode::Char('x'))).is_none());
        assert!(f.update(Message::Paste("abc".into())).is_none());

        let mut f = focused(InputField::new().loading(true));
        assert!(f.update(key(KeyCode::Char('x'))).is_none());
        assert!(f.is_empty());
    }

    #[test]
    fn editing_keys() {
        let mut f = focused(InputField::new());
        type_str(&mut f, "hello world");
        f.update(ctrl('w'));
        assert_eq!(f.value(), "hello ");
        f.update(key(KeyCode::Home));
        f.update(key(KeyCode::Delete));
        assert_eq!(f.value(), "ello ");
        f.update(key(KeyCode::Right));
        f.update(ctrl('k'));
        assert_eq!(f.value(), "e");
        f.update(ctrl('e'));
        f.update(ctrl('u'));
        assert!(f.is_empty());
    }

    #[test]
    fn paste_inserts_at_cursor_within_limit() {
        let mut f = focused(InputField::new().with_char_limit(5).with_value("ad"));
        f.update(key(KeyCode::Left));
        assert_eq!(changed(f.update(Message::Paste("bcxyz".into()))), Some("abcxd".into()));
        assert_eq!(f.cursor_position(), 4);
    }

    #[test]
    fn enter_submits() {
        let mut f = focused(InputField::new().with_value("go"));
        match f.update(key(KeyCode::Enter)).into_message() {
            Some(Message::Submit(v)) => assert_eq!(v, "go"),
            _ => panic!("expected Submit"),
        }
    }

    #[test]
    fn clear_requires_clearable_value_and_enabled() {
        let mut f = InputField::new().with_value("abc");
        assert!(f.update(Message::Clear).is_none());
        assert_eq!(f.value(), "abc");

        let mut f = InputField::new().clearable(true);
        assert!(f.update(Message::Clear).is_none());

        let mut f = InputField::new().clearable(true).with_value("abc").disabled(true);
        assert!(f.update(Message::Clear).is_none());

        let mut f = focused(InputField::new().clearable(true).with_value("abc"));
        assert_eq!(changed(f.update(ctrl('l'))), Some(String::new()));
        assert!(f.is_empty());
    }

    #[test]
    fn reveal_only_for_enabled_password() {
        let mut f = InputField::new().with_kind(InputKind::Password);
        f.update(Message::ToggleVisibility);
        assert!(f.is_revealed());
        f.update(Message::ToggleVisibility);
        assert!(!f.is_revealed());

        let mut f = InputField::new();
        f.update(Message::ToggleVisibility);
        assert!(!f.is_revealed());

        let mut f = InputField::new().with_kind(InputKind::Password).loading(true);
        f.update(Message::ToggleVisibility);
        assert!(!f.is_revealed());
    }

    #[test]
    fn password_is_masked_until_revealed() {
        let mut f = InputField::new()
            .with_kind(InputKind::Password)
            .with_value("secret");
        let out = render(&f, 30);
        assert!(out.contains("••••••"));
        assert!(out.contains("show"));
        assert!(!out.contains("secret"));

        f.update(Message::ToggleVisibility);
        let out = render(&f, 30);
        assert!(out.contains("secret"));
        assert!(out.contains("hide"));
    }

    #[test]
    fn error_replaces_helper_only_when_invalid() {
        let mut f = InputField::new()
            .with_helper_text("We never share it")
            .with_error_message("Please enter a valid email");
        assert_eq!(f.footer().map(|(t, _)| t), Some("We never share it"));
        f.set_invalid(true);
        assert_eq!(f.footer().map(|(t, _)| t), Some("Please enter a valid email"));

        let mut bare = InputField::new().with_error_message("bad");
        assert!(bare.footer().is_none());
        bare.set_invalid(true);
        assert_eq!(bare.footer().map(|(t, _)| t), Some("bad"));

        let mut no_error = InputField::new();
        no_error.set_invalid(true);
        assert!(no_error.footer().is_none());
    }

    #[test]
    fn height_tracks_label_variant_size_and_footer() {
        assert_eq!(InputField::new().height(), 3);
        assert_eq!(InputField::new().with_label("Name").with_helper_text("h").height(), 5);
        assert_eq!(InputField::new().with_variant(Variant::Ghost).height(), 2);
        assert_eq!(InputField::new().with_variant(Variant::Filled).height(), 1);
        assert_eq!(
            InputField::new().with_variant(Variant::Filled).with_size(Size::Lg).height(),
            3
        );
    }

    #[test]
    fn renders_label_placeholder_and_clear_icon() {
        let f = InputField::new()
            .with_label("Username")
            .with_placeholder("Enter username")
            .with_helper_text("This will be your display name");
        let out = render(&f, 40);
        assert!(out.starts_with("Username"));
        assert!(out.contains("Enter username"));
        assert!(out.ends_with("This will be your display name"));
        assert!(!out.contains(CLEAR_GLYPH));

        let f = InputField::new().clearable(true).with_value("bob");
        assert!(render(&f, 20).contains(CLEAR_GLYPH));
    }

    #[test]
    fn clearable_password_shows_reveal_and_clear_together() {
        let mut f = InputField::new()
            .with_kind(InputKind::Password)
            .clearable(true)
            .with_value("secret");
        let out = render(&f, 30);
        assert!(out.contains(&format!("show {CLEAR_GLYPH}")));

        f.update(Message::ToggleVisibility);
        assert!(render(&f, 30).contains(&format!("hide {CLEAR_GLYPH}")));

        f.update(Message::Clear);
        let out = render(&f, 30);
        assert!(out.contains("show"));
        assert!(!out.contains(CLEAR_GLYPH));
    }

    #[test]
    fn email_renders_like_text() {
        let text = InputField::new().with_value("a@b.c");
        let email = InputField::new().with_value("a@b.c").with_kind(InputKind::Email);
        assert_eq!(render(&text, 20), render(&email, 20));
    }

    #[test]
    fn long_value_scrolls_to_keep_cursor_visible() {
        let mut f = focused(InputField::new().with_size(Size::Sm));
        type_str(&mut f, "abcdefghijklmnopqrstuvwxyz");
        let out = render(&f, 12);
        assert!(out.contains("rstuvwxyz"));
        assert!(!out.contains("abc"));
    }

    #[test]
    fn loading_subscribes_to_spinner() {
        let mut f = InputField::new().with_label("Email").loading(true);
        assert_eq!(f.subscriptions().len(), 1);
        f.set_loading(false);
        assert!(f.subscriptions().is_empty());
    }

    #[test]
    fn help_lists_available_actions() {
        let f = InputField::new().with_kind(InputKind::Password).clearable(true).with_value("x");
        let labels: Vec<&str> = f.short_help().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["^l", "^r"]);
        assert!(InputField::new().short_help().is_empty());
    }
}
