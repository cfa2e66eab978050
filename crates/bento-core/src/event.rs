use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent};

/// Events read from the terminal, delivered through
/// [`terminal_events`](crate::subscriptions::terminal_events).
///
/// Focus-change events are folded away; the widgets have no use for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press. Release and repeat events are filtered out, see
    /// [`TerminalEvent::from_crossterm`].
    Key(KeyEvent),
    /// A mouse event (only when mouse capture is on).
    Mouse(MouseEvent),
    /// The terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// Convert a crossterm event, dropping what bento does not route.
    ///
    /// Terminals that report key releases (Windows, kitty protocol) would
    /// otherwise type every character twice.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => None,
            Event::Key(key) => Some(TerminalEvent::Key(key)),
            Event::Mouse(mouse) => Some(TerminalEvent::Mouse(mouse)),
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            Event::Paste(text) => Some(TerminalEvent::Paste(text)),
            Event::FocusGained | Event::FocusLost => None,
        }
    }

    /// The key event, if this is one.
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            TerminalEvent::Key(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn key_press_is_kept() {
        let ev = TerminalEvent::from_crossterm(key(KeyEventKind::Press)).expect("key");
        assert_eq!(ev.as_key().map(|k| k.code), Some(KeyCode::Char('a')));
    }

    #[test]
    fn key_release_is_dropped() {
        assert!(TerminalEvent::from_crossterm(key(KeyEventKind::Release)).is_none());
    }

    #[test]
    fn focus_events_are_dropped() {
        assert!(TerminalEvent::from_crossterm(Event::FocusGained).is_none());
        assert!(TerminalEvent::from_crossterm(Event::FocusLost).is_none());
    }

    #[test]
    fn resize_and_paste_pass_through() {
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Resize(80, 24)),
            Some(TerminalEvent::Resize(80, 24))
        );
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Paste("hi".into())),
            Some(TerminalEvent::Paste("hi".into()))
        );
        assert!(TerminalEvent::Resize(1, 1).as_key().is_none());
    }
}
