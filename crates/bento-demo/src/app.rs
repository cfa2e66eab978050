//! The demo model: a form of input fields above a users table, or one of
//! the standalone table stories.

use bento::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use bento::ratatui::layout::{Constraint, Layout, Rect};
use bento::ratatui::style::{Color, Modifier, Style};
use bento::ratatui::text::Line;
use bento::ratatui::widgets::Paragraph;
use bento::ratatui::Frame;
use bento::widgets::data_table::{self, Column, DataTable, TableRow};
use bento::widgets::focus::FocusRing;
use bento::widgets::input_field::{self, InputField, InputKind, Variant};
use bento::widgets::key::{help_line, Binding, KeyCombination, KeyMap};
use bento::{log_to_file, terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use clap::ValueEnum;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

const USERNAME: usize = 0;
const EMAIL: usize = 1;
const DISABLED: usize = 3;

/// Which screen to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Story {
    /// Plain table, no selection.
    Default,
    /// Table waiting for data.
    Loading,
    /// Table with no rows.
    Empty,
    /// Table with row selection.
    Selectable,
    /// Input fields and a selectable users table.
    #[default]
    App,
}

/// Startup options for [`App`].
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub story: Story,
    /// Start the enabled input fields and the table in the loading state.
    pub loading: bool,
    /// Append app events (story, selection) to this file.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
}

impl TableRow for User {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn user(id: u32, name: &str, email: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        user(1, "Alice", "alice@example.com"),
        user(2, "Bob", "bob@example.com"),
        user(3, "Charlie", "charlie@example.com"),
    ]
}

fn user_columns(with_id: bool) -> Vec<Column<User>> {
    let id = Column::new("id", "ID", |u: &User| u.id.into())
        .sortable()
        .with_width(Constraint::Length(6));
    let name = Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable();
    let email = Column::new("email", "Email", |u: &User| u.email.as_str().into()).sortable();
    if with_id {
        vec![id, name, email]
    } else {
        vec![name, email]
    }
}

fn form_fields() -> Vec<InputField> {
    vec![
        InputField::new()
            .with_label("Username")
            .with_placeholder("Enter your username")
            .with_helper_text("This will be your display name")
            .clearable(true),
        InputField::new()
            .with_label("Email")
            .with_placeholder("Enter your email")
            .with_kind(InputKind::Email)
            .with_variant(Variant::Filled)
            .with_error_message("Please enter a valid email")
            .clearable(true),
        InputField::new()
            .with_label("Password")
            .with_placeholder("Enter your password")
            .with_kind(InputKind::Password)
            .with_helper_text("At least 8 characters"),
        InputField::new()
            .with_label("Disabled Field")
            .with_placeholder("Can't type here")
            .with_variant(Variant::Ghost)
            .disabled(true),
    ]
}

fn email_is_invalid(value: &str) -> bool {
    !value.is_empty() && !value.contains('@')
}

pub struct App {
    story: Story,
    fields: Vec<InputField>,
    users: DataTable<User>,
    selected: Vec<User>,
    focus: FocusRing,
    nav: Vec<Binding>,
    log: Option<File>,
}

#[derive(Debug)]
pub enum Msg {
    /// Key not handled globally; goes to the focused widget.
    Key(KeyEvent),
    /// Paste; goes to the focused field.
    Paste(String),
    Field(usize, input_field::Message),
    Users(data_table::Message<User>),
    FocusNext,
    FocusPrev,
    Quit,
}

impl App {
    fn log(&mut self, args: fmt::Arguments<'_>) {
        if let Some(file) = self.log.as_mut() {
            // Best effort.
            let _ = writeln!(file, "[app] {args}");
        }
    }

    fn table_slot(&self) -> usize {
        self.fields.len()
    }

    fn sync_focus(&mut self) {
        let focused = self.focus.focused();
        for (i, field) in self.fields.iter_mut().enumerate() {
            if i == focused {
                field.focus();
            } else {
                field.blur();
            }
        }
        if focused == self.table_slot() {
            self.users.focus();
        } else {
            self.users.blur();
        }
    }

    fn selected_line(&self) -> String {
        let names: Vec<&str> = self.selected.iter().map(|u| u.name.as_str()).collect();
        if names.is_empty() {
            "Selected Users: None".to_string()
        } else {
            format!("Selected Users: {}", names.join(", "))
        }
    }

    fn help(&self) -> Line<'static> {
        let focused = self.focus.focused();
        let mut bindings: Vec<&Binding> = match self.fields.get(focused) {
            Some(field) => field.short_help(),
            None => self.users.key_bindings().short_help(),
        };
        if self.focus.len() > 1 {
            bindings.extend(self.nav.iter().take(2));
        }
        bindings.extend(self.nav.iter().skip(2));
        help_line(
            &bindings,
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::DarkGray),
        )
    }

    fn story_title(&self) -> &'static str {
        match self.story {
            Story::Default => "DataTable: Default",
            Story::Loading => "DataTable: Loading",
            Story::Empty => "DataTable: Empty",
            Story::Selectable => "DataTable: Selectable",
            Story::App => "DataTable Demo",
        }
    }

    fn view_form(&self, frame: &mut Frame, area: Rect) -> Rect {
        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(self.fields.iter().map(|f| Constraint::Length(f.height() + 1)));
        constraints.push(Constraint::Fill(1));
        let areas = Layout::vertical(constraints).split(area);

        frame.render_widget(
            Paragraph::new("InputField Demo").style(heading()),
            areas[0],
        );
        for (field, slot) in self.fields.iter().zip(areas.iter().skip(1)) {
            field.view(frame, Rect { height: field.height().min(slot.height), ..*slot });
        }
        areas[areas.len() - 1]
    }
}

fn heading() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

impl Model for App {
    type Message = Msg;
    type Flags = Flags;

    fn init(flags: Flags) -> (Self, Command<Msg>) {
        let Flags {
            story,
            loading,
            log_file,
        } = flags;
        let (rows, selectable, start_loading) = match story {
            Story::Default => (sample_users(), false, loading),
            Story::Loading => (Vec::new(), false, true),
            Story::Empty => (Vec::new(), false, loading),
            Story::Selectable | Story::App => (sample_users(), true, loading),
        };

        let mut fields = if story == Story::App { form_fields() } else { Vec::new() };
        for field in fields.iter_mut().filter(|f| !f.is_disabled()) {
            field.set_loading(loading);
        }

        let users = DataTable::new(user_columns(story == Story::App))
            .with_rows(rows)
            .selectable(selectable)
            .loading(start_loading)
            .with_title("Users");

        let mut focus = FocusRing::new(fields.len() + 1);
        if story == Story::App {
            focus.set_skipped(DISABLED, true);
        }

        let nav = vec![
            Binding::new(vec![KeyCombination::new(KeyCode::Tab)], "tab", "next"),
            Binding::new(vec![KeyCombination::new(KeyCode::BackTab)], "shift+tab", "prev"),
            Binding::new(vec![KeyCombination::new(KeyCode::Esc)], "esc", "quit"),
        ];

        let mut app = App {
            story,
            fields,
            users,
            selected: Vec::new(),
            focus,
            nav,
            log: log_file.and_then(|path| log_to_file(path).ok()),
        };
        app.log(format_args!("story {story:?} loading={loading}"));
        app.sync_focus();
        (app, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Field(index, m) => {
                if let (EMAIL, input_field::Message::Changed(value)) = (index, &m) {
                    if self.story == Story::App {
                        self.fields[EMAIL].set_invalid(email_is_invalid(value));
                    }
                }
                match self.fields.get_mut(index) {
                    Some(field) => field.update(m).map(move |m| Msg::Field(index, m)),
                    None => Command::none(),
                }
            }
            Msg::Key(key) => {
                let focused = self.focus.focused();
                if focused == self.table_slot() {
                    self.update(Msg::Users(data_table::Message::KeyPress(key)))
                } else {
                    self.update(Msg::Field(focused, input_field::Message::KeyPress(key)))
                }
            }
            Msg::Paste(text) => {
                let focused = self.focus.focused();
                self.update(Msg::Field(focused, input_field::Message::Paste(text)))
            }
            Msg::Users(data_table::Message::SelectionChanged(rows)) => {
                let ids: Vec<u32> = rows.iter().map(|u| u.id).collect();
                self.log(format_args!("selection {ids:?}"));
                self.selected = rows;
                Command::none()
            }
            Msg::Users(m) => self.users.update(m).map(Msg::Users),
            Msg::FocusNext => {
                self.focus.next();
                self.sync_focus();
                Command::none()
            }
            Msg::FocusPrev => {
                self.focus.prev();
                self.sync_focus();
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let rest = if self.fields.is_empty() {
            main_area
        } else {
            self.view_form(frame, main_area)
        };

        let show_selection = self.users.is_selectable();
        let [title_area, table_area, selected_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(u16::from(show_selection)),
        ])
        .areas(rest);

        frame.render_widget(Paragraph::new(self.story_title()).style(heading()), title_area);
        self.users.view(frame, table_area);
        if show_selection {
            frame.render_widget(Paragraph::new(self.selected_line()), selected_area);
        }
        frame.render_widget(Paragraph::new(self.help()), help_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| match ev {
            TerminalEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => Some(Msg::Quit),
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                (KeyCode::Tab, KeyModifiers::NONE) => Some(Msg::FocusNext),
                (KeyCode::BackTab, _) => Some(Msg::FocusPrev),
                _ => Some(Msg::Key(key)),
            },
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            _ => None,
        })];

        for (index, field) in self.fields.iter().enumerate() {
            subs.extend(
                field
                    .subscriptions()
                    .into_iter()
                    .map(move |sub| sub.map(move |m| Msg::Field(index, m))),
            );
        }
        subs.extend(self.users.subscriptions().into_iter().map(|sub| sub.map(Msg::Users)));
        subs
    }
}
