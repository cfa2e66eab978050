use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable piece of UI that owns its own state and renders into a [`Rect`]
/// chosen by its parent.
///
/// Components look like a [`Model`](crate::Model) without `init`: the parent
/// constructs them, forwards messages to [`update`](Component::update), and
/// lifts the returned command with [`Command::map`].
///
/// ```rust,ignore
/// enum Msg {
///     Users(data_table::Message<User>),
/// }
///
/// fn update(&mut self, msg: Msg) -> Command<Msg> {
///     match msg {
///         Msg::Users(data_table::Message::SelectionChanged(rows)) => {
///             self.selected = rows;
///             Command::none()
///         }
///         Msg::Users(m) => self.users.update(m).map(Msg::Users),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's own message type.
    type Message: Send + 'static;

    /// Apply one message. The returned command is in the component's message
    /// type; parents map it into theirs.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw into `area`. Implementations must stay inside the rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions this component needs (spinner ticks, for example).
    /// Parents collect and map them into their own list.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether the component currently takes keyboard input.
    fn focused(&self) -> bool {
        false
    }
}
