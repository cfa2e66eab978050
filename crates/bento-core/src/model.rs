use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// A bento application is a single value that the runtime drives through
/// **init -> view -> update -> view ...**:
///
/// 1. [`init`](Model::init) builds the state from `Flags` and may return a
///    startup [`Command`].
/// 2. [`view`](Model::view) draws the state into the frame.
/// 3. Terminal events and timer ticks arrive through
///    [`subscriptions`](Model::subscriptions) as messages.
/// 4. [`update`](Model::update) applies one message and returns the next
///    command.
///
/// Every state transition happens inside `update` and finishes before the next
/// message is read, so widgets never observe a half-applied change.
///
/// # Example
///
/// ```rust,ignore
/// use bento_core::{Command, Model};
/// use ratatui::widgets::Paragraph;
/// use ratatui::Frame;
///
/// struct Greeting { name: String }
///
/// enum Msg { Rename(String) }
///
/// impl Model for Greeting {
///     type Message = Msg;
///     type Flags = String;
///
///     fn init(name: String) -> (Self, Command<Msg>) {
///         (Greeting { name }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Rename(name) => self.name = name,
///         }
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         frame.render_widget(Paragraph::new(format!("Hello, {}", self.name)), frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// Every event that can change the application state.
    type Message: Send + 'static;

    /// Startup configuration handed to [`Model::init`]. Use `()` when there
    /// is none.
    type Flags: Send + 'static;

    /// Build the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Apply one message and return the follow-up command.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the current state. Must not mutate the model.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be running for the current state.
    ///
    /// Called after every update; the runtime starts new ids and stops ids
    /// that disappeared.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
