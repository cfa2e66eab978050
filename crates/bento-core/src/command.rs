use std::sync::Arc;

/// A side effect returned from [`Model::update`](crate::Model::update),
/// [`Model::init`](crate::Model::init) or [`Component::update`](crate::Component::update).
///
/// Widgets use commands to report events to their parent: the input field
/// emits `Changed(value)` and the data table emits `SelectionChanged(rows)` as
/// immediate messages. The parent receives them on the next turn of the loop.
///
/// # Examples
///
/// ```rust,ignore
/// // Nothing to do:
/// let cmd = Command::none();
///
/// // Report the full selection to whoever owns the table:
/// let cmd = Command::message(Message::SelectionChanged(rows));
///
/// // Leave the program:
/// let cmd = Command::quit();
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    Quit,
    Batch(Vec<Command<Msg>>),
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Deliver `msg` back to `update` without leaving the event loop.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Stop the program after the current batch of messages.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Quit,
        }
    }

    /// Combine several commands. `None` entries are dropped, and a batch of
    /// one collapses to that command.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.remove(0),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Lift the message type into a parent's message type.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Message(msg) => CommandInner::Message(f(msg)),
            CommandInner::Quit => CommandInner::Quit,
            CommandInner::Batch(cmds) => CommandInner::Batch(
                cmds.into_iter()
                    .map(|cmd| cmd.map_with(f.clone()))
                    .collect(),
            ),
        };
        Command { inner }
    }

    // Inspection helpers, mostly for tests.

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command asks the program to quit.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Quit)
    }

    /// If this command is an immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }
}

impl<Msg: Send + 'static> Default for Command<Msg> {
    fn default() -> Self {
        Command::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
        assert!(!cmd.is_quit());
    }

    #[test]
    fn message_round_trips_through_into_message() {
        let cmd: Command<i32> = Command::message(7);
        assert_eq!(cmd.into_message(), Some(7));
    }

    #[test]
    fn quit_is_not_a_message() {
        let cmd: Command<i32> = Command::quit();
        assert!(cmd.is_quit());
        assert_eq!(cmd.into_message(), None);
    }

    #[test]
    fn batch_drops_none_and_collapses_single() {
        let cmd: Command<i32> =
            Command::batch(vec![Command::none(), Command::message(3), Command::none()]);
        assert_eq!(cmd.into_message(), Some(3));
    }

    #[test]
    fn batch_of_nothing_is_none() {
        let cmd: Command<i32> = Command::batch(vec![Command::none()]);
        assert!(cmd.is_none());
    }

    #[test]
    fn batch_keeps_multiple() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::quit()]);
        let cmds = cmd.into_batch().expect("batch");
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn map_wraps_message() {
        #[derive(Debug, PartialEq)]
        enum Parent {
            Child(i32),
        }
        let cmd: Command<i32> = Command::message(5);
        assert_eq!(cmd.map(Parent::Child).into_message(), Some(Parent::Child(5)));
    }

    #[test]
    fn map_preserves_quit_and_batch() {
        let cmd: Command<i32> = Command::quit();
        assert!(cmd.map(|n| n.to_string()).is_quit());

        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let mapped = cmd.map(|n| n * 10).into_batch().expect("batch");
        let values: Vec<_> = mapped.into_iter().filter_map(Command::into_message).collect();
        assert_eq!(values, vec![10, 20]);
    }
}
