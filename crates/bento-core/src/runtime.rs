use crate::command::{Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, stdout, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Errors that can occur while setting up, running or tearing down a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Terminal setup, drawing, restore, or opening the log file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Runtime configuration for a [`Program`].
///
/// Override only what you need:
///
/// ```rust,ignore
/// let options = ProgramOptions {
///     fps: 30,
///     log_file: Some("bento.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Redraw rate cap, clamped to 1..=120 (default: 60).
    pub fps: u32,
    /// Draw on the alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse events (default: false).
    pub mouse_capture: bool,
    /// Deliver pastes as a single event (default: true).
    pub bracketed_paste: bool,
    /// Terminal window title.
    pub title: Option<String>,
    /// Restore the terminal before the panic message prints (default: true).
    pub catch_panics: bool,
    /// Quit cleanly on Ctrl+C delivered as a signal (default: true).
    pub handle_signals: bool,
    /// Append runtime debug lines to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: false,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
        }
    }
}

/// Owns the terminal and drives a [`Model`] until it returns
/// [`Command::quit`] or the process is interrupted.
///
/// ```rust,ignore
/// let options = ProgramOptions { title: Some("demo".into()), ..Default::default() };
/// let final_state = Program::<App>::with_options(flags, options)?.run().await?;
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
    log: Option<File>,
    started: Instant,
}

impl<M: Model> Program<M> {
    /// Create a program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a program with custom options.
    ///
    /// Calls [`Model::init`], takes over the terminal, runs the startup
    /// command and starts the initial subscriptions.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let log = options.log_file.as_deref().map(log_to_file).transpose()?;
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;

        let mut program = Self {
            model,
            terminal,
            subscriptions: SubscriptionManager::new(msg_tx.clone()),
            msg_tx,
            msg_rx,
            options,
            needs_redraw: true,
            should_quit: false,
            log,
            started: Instant::now(),
        };

        program.debug_log("program initialized");
        program.execute(init_cmd);
        program.reconcile_subscriptions();
        Ok(program)
    }

    /// A sender for injecting messages from outside the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.msg_tx.clone()
    }

    /// Run until quit, then restore the terminal and hand back the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;

        self.debug_log("shutting down");
        self.subscriptions.shutdown();
        restore_terminal(self.options.alt_screen)?;
        outcome?;
        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.options.handle_signals;

        while !self.should_quit {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    self.debug_log("received ctrl+c signal");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.process(msg);

                    // Drain what is already queued so a burst of input costs
                    // one redraw.
                    let deadline = Instant::now() + Duration::from_micros(100);
                    let mut drained = 0u32;
                    while drained < 100 && !self.should_quit && Instant::now() < deadline {
                        match self.msg_rx.try_recv() {
                            Ok(msg) => {
                                self.process(msg);
                                drained += 1;
                            }
                            Err(_) => break,
                        }
                    }
                }

                _ = frames.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
        Ok(())
    }

    fn process(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute(cmd);
        self.reconcile_subscriptions();
        self.needs_redraw = true;
    }

    fn execute(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Quit => {
                self.debug_log("quit requested");
                self.should_quit = true;
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
        }
    }

    fn reconcile_subscriptions(&mut self) {
        let declared = self.model.subscriptions();
        let report = self.subscriptions.reconcile(declared);
        if report.started > 0 || report.stopped > 0 {
            self.debug_log(&format!(
                "subscriptions: {} started, {} stopped",
                report.started, report.stopped
            ));
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        let model = &self.model;
        self.terminal.draw(|frame| model.view(frame))?;
        Ok(())
    }

    /// Append a line to the debug log, if one is configured.
    fn debug_log(&mut self, msg: &str) {
        if let Some(ref mut file) = self.log {
            let elapsed = self.started.elapsed().as_secs_f64();
            let _ = writeln!(file, "[{elapsed:>9.3}s] {msg}");
        }
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    if options.catch_panics {
        static HOOK: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal(alt_screen);
                previous(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut out = stdout();
    if options.alt_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(out, EnableBracketedPaste)?;
    }
    if options.mouse_capture {
        execute!(out, EnableMouseCapture)?;
    }
    if let Some(ref title) = options.title {
        execute!(out, SetTitle(title))?;
    }
    execute!(out, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

/// Best-effort restore: every step runs even if an earlier one failed, and
/// the raw-mode error is the one reported.
fn restore_terminal(alt_screen: bool) -> Result<(), io::Error> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    execute!(out, DisableBracketedPaste).ok();
    execute!(out, DisableMouseCapture).ok();
    execute!(out, cursor::Show).ok();
    if alt_screen {
        execute!(out, LeaveAlternateScreen).ok();
    }
    raw
}

/// Open `path` for appending, creating it if needed.
///
/// A TUI owns stdout, so debug output has to go to a file. The runtime uses
/// this for [`ProgramOptions::log_file`]; applications can open their own.
///
/// ```no_run
/// use bento_core::runtime::log_to_file;
/// use std::io::Write;
///
/// let mut log = log_to_file("bento.log").unwrap();
/// writeln!(log, "selection changed").unwrap();
/// ```
pub fn log_to_file(path: impl AsRef<Path>) -> Result<File, io::Error> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}
