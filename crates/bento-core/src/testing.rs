use crate::command::{Command, CommandInner};
use crate::model::Model;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::collections::VecDeque;

/// Drives a [`Model`] without a terminal or a tokio runtime.
///
/// Immediate messages returned as commands ([`Command::message`]) are queued
/// and replayed by [`drain_messages`](TestProgram::drain_messages). This is how widget reports such as the data table's
/// `SelectionChanged` reach the parent model in tests.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<App>::new(flags);
/// prog.send(Msg::Users(data_table::Message::ToggleRow(2)));
/// prog.drain_messages();
/// assert!(prog.render_string(80, 24).contains("Selected Users: Bob"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: VecDeque<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and queue any immediate messages it returns.
    pub fn new(flags: M::Flags) -> Self {
        let (model, cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: VecDeque::new(),
            quit: false,
        };
        program.collect(cmd);
        program
    }

    /// Run one update with `msg`. Follow-up messages are queued, not run.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Send `msg` and then drain everything it triggers.
    pub fn dispatch(&mut self, msg: M::Message) {
        self.send(msg);
        self.drain_messages();
    }

    /// Replay queued messages in order until the queue stays empty.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            let cmd = self.model.update(msg);
            self.collect(cmd);
        }
    }

    /// Number of queued, not yet processed messages.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether any update so far returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The model, for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The model, for arranging state directly.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render into an off-screen buffer of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend never fails");
        terminal
            .draw(|frame| self.model.view(frame))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render and return the buffer as text, one line per row, with
    /// trailing spaces trimmed from each row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending.push_back(msg),
            CommandInner::Quit => self.quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

/// Flatten a buffer to text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
