//! Animated loading indicator.

use bento_core::command::Command;
use bento_core::component::Component;
use bento_core::subscription::Subscription;
use bento_core::subscriptions::every;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;

/// Built-in frame sets.
pub mod frames {
    /// Braille dots.
    pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    /// ASCII line.
    pub const LINE: &[&str] = &["|", "/", "-", "\\"];
    /// Growing ellipsis.
    pub const ELLIPSIS: &[&str] = &["", ".", "..", "..."];
}

/// Messages for the spinner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Advance one frame.
    Tick,
}

/// A spinner that advances on a timer while active.
///
/// Each spinner subscribes to its own timer keyed by `key`; give spinners
/// that may run at the same time distinct keys.
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    index: usize,
    label: String,
    style: Style,
    label_style: Style,
    interval: Duration,
    active: bool,
    key: String,
}

impl Spinner {
    /// An inactive spinner with the [`frames::DOTS`] set at 80ms per frame.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            frames: frames::DOTS,
            index: 0,
            label: String::new(),
            style: Style::default().fg(Color::Cyan),
            label_style: Style::default().fg(Color::Gray),
            interval: Duration::from_millis(80),
            active: false,
            key: key.into(),
        }
    }

    /// Use a different frame set.
    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.frames = frames;
        self
    }

    /// Text drawn after the frame.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Style of the spinning glyph.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Time between frames.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start or stop the animation. Stopping rewinds to the first frame.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.index = 0;
        }
    }

    /// Whether the spinner is animating.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The glyph for the current frame, or `""` for an empty frame set.
    pub fn frame(&self) -> &'static str {
        self.frames.get(self.index).copied().unwrap_or("")
    }

    /// Columns the spinner needs: widest frame, plus the label if any.
    pub fn width(&self) -> u16 {
        use unicode_width::UnicodeWidthStr;
        let glyph = self.frames.iter().map(|f| f.width()).max().unwrap_or(0);
        let label = if self.label.is_empty() {
            0
        } else {
            1 + self.label.width()
        };
        u16::try_from(glyph + label).unwrap_or(u16::MAX)
    }
}

impl Component for Spinner {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Tick => {
                if self.active && !self.frames.is_empty() {
                    self.index = (self.index + 1) % self.frames.len();
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if !self.active || area.is_empty() {
            return;
        }
        let mut spans = vec![Span::styled(self.frame(), self.style)];
        if !self.label.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(self.label.as_str(), self.label_style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.active {
            vec![every(self.interval, &self.key).map(|_| Message::Tick)]
        } else {
            vec![]
        }
    }
}
