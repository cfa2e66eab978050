//! Sortable, selectable data table over application-defined rows.
//!
//! The table is generic over a row type implementing [`TableRow`]. Columns
//! pull a [`CellValue`] out of each row; the visible order is derived from the
//! rows and the current [`SortState`] by [`derive_sorted_view`], a pure
//! function that never reorders the caller's rows.
//!
//! Selection is a set keyed by [`TableRow::id`]. Every change to it is
//! reported to the parent as [`Message::SelectionChanged`] carrying the whole
//! selection, not a delta.
//!
//! Sorting cycles between ascending and descending once a column has been
//! chosen; only [`DataTable::clear_sort`] returns to the input order.

use crate::chrome::focus_block;
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::spinner::{self, Spinner};
use bento_core::command::Command;
use bento_core::component::Component;
use bento_core::subscription::Subscription;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A record the table can display.
///
/// The id must be unique within the rows given to one table. With duplicate
/// ids, selection matches whichever row comes first.
pub trait TableRow: Clone + Send + 'static {
    /// Identifier type; strings and integers both work.
    type Id: Ord + Clone + fmt::Debug + Send + 'static;

    /// The row's identifier.
    fn id(&self) -> Self::Id;
}

/// A value pulled out of a row by a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing value. Always sorts last and renders empty.
    Null,
    /// Boolean; `false` sorts before `true`.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point, ordered by [`f64::total_cmp`].
    Float(f64),
    /// Text, ordered by byte-wise string comparison.
    Text(String),
}

impl CellValue {
    /// Whether this is [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Null => 3,
            CellValue::Bool(_) => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Text(_) => 2,
        }
    }

    /// Natural order between two values. Numbers compare numerically across
    /// `Int` and `Float`; otherwise values of different kinds order by kind
    /// (booleans, numbers, text, null).
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => int_float_cmp(*a, *b),
            (Float(a), Int(b)) => int_float_cmp(*b, *a).reverse(),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// Exact comparison of an integer with a float. NaN orders the way
/// `total_cmp` puts it relative to every finite value.
fn int_float_cmp(a: i64, b: f64) -> Ordering {
    if b.is_nan() {
        return if b.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    // 2^63 is exact as f64; i64 spans [-2^63, 2^63).
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if b >= LIMIT {
        return Ordering::Less;
    }
    if b < -LIMIT {
        return Ordering::Greater;
    }
    let whole = b.trunc();
    a.cmp(&(whole as i64)).then_with(|| {
        let fraction = b - whole;
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Describes one column: its key, header title, how to read the value from a
/// row, and whether clicking the header sorts.
pub struct Column<R> {
    key: String,
    title: String,
    accessor: Accessor<R>,
    sortable: bool,
    width: Constraint,
}

impl<R> Column<R> {
    /// A non-sortable column taking an equal share of the width.
    ///
    /// ```ignore
    /// Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable()
    /// ```
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&R) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            accessor: Arc::new(accessor),
            sortable: false,
            width: Constraint::Fill(1),
        }
    }

    /// Allow sorting on this column.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Override the width constraint.
    pub fn with_width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    /// Unique key within the table.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Read this column's value from `row`.
    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            accessor: Arc::clone(&self.accessor),
            sortable: self.sortable,
            width: self.width,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Header indicator for this direction.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// The active sort: one column key and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Key of the sorted column.
    pub key: String,
    /// Direction.
    pub direction: SortDirection,
}

/// The sort state after the user picks `column`.
///
/// Non-sortable columns leave the state as it is. A different column starts
/// ascending; the same column flips direction, descending going back to
/// ascending.
pub fn next_sort_state<R>(current: Option<&SortState>, column: &Column<R>) -> Option<SortState> {
    if !column.sortable {
        return current.cloned();
    }
    let direction = match current {
        Some(state) if state.key == column.key && state.direction == SortDirection::Ascending => {
            SortDirection::Descending
        }
        _ => SortDirection::Ascending,
    };
    Some(SortState {
        key: column.key.clone(),
        direction,
    })
}

/// Compare two cells for display order.
///
/// Null goes after everything else in both directions and two nulls are
/// equal. Non-null values use [`CellValue::natural_cmp`], reversed for
/// descending.
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let order = a.natural_cmp(b);
            match direction {
                SortDirection::Ascending => order,
                SortDirection::Descending => order.reverse(),
            }
        }
    }
}

/// The rows in display order for `sort`.
///
/// With no sort, or a sort whose key is not among `columns`, this is the
/// input order. The sort is stable, so rows with equal values keep their
/// relative input order in either direction.
pub fn derive_sorted_view<'a, R>(
    rows: &'a [R],
    columns: &[Column<R>],
    sort: Option<&SortState>,
) -> Vec<&'a R> {
    let column = sort.and_then(|s| columns.iter().find(|c| c.key == s.key).map(|c| (c, s.direction)));
    let Some((column, direction)) = column else {
        return rows.iter().collect();
    };

    let mut keyed: Vec<(CellValue, &R)> = rows.iter().map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_cells(a, b, direction));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Which of the three mutually exclusive states the table draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Loading indicator only.
    Loading,
    /// Empty-state text only.
    Empty,
    /// Header and rows.
    Rows,
}

/// Messages for the data table.
#[derive(Debug, Clone)]
pub enum Message<R: TableRow> {
    /// A key press, acted on only while focused and showing rows.
    KeyPress(KeyEvent),
    /// Toggle sort on the column at this index.
    ToggleSort(usize),
    /// Toggle selection of the row with this id.
    ToggleRow(R::Id),
    /// Spinner animation tick.
    Spinner(spinner::Message),
    /// Emitted after every selection change with the full selection, in id
    /// order.
    SelectionChanged(Vec<R>),
}

/// Key bindings for the data table.
#[derive(Debug, Clone)]
pub struct DataTableKeyBindings {
    /// Row cursor up. Default: Up, k
    pub up: Binding,
    /// Row cursor down. Default: Down, j
    pub down: Binding,
    /// First row. Default: Home, g
    pub first: Binding,
    /// Last row. Default: End, G
    pub last: Binding,
    /// Header cursor left. Default: Left, h
    pub column_left: Binding,
    /// Header cursor right. Default: Right, l
    pub column_right: Binding,
    /// Sort by the header-cursor column. Default: s, Enter
    pub sort: Binding,
    /// Toggle the cursor row. Default: Space
    pub toggle_row: Binding,
    /// Select every row, or clear if all are selected. Default: a
    pub toggle_all: Binding,
}

impl Default for DataTableKeyBindings {
    fn default() -> Self {
        let key = |c: char| KeyCombination::new(KeyCode::Char(c));
        Self {
            up: Binding::new(vec![KeyCombination::new(KeyCode::Up), key('k')], "↑/k", "up"),
            down: Binding::new(vec![KeyCombination::new(KeyCode::Down), key('j')], "↓/j", "down"),
            first: Binding::new(vec![KeyCombination::new(KeyCode::Home), key('g')], "g", "first"),
            last: Binding::new(vec![KeyCombination::new(KeyCode::End), key('G')], "G", "last"),
            column_left: Binding::new(
                vec![KeyCombination::new(KeyCode::Left), key('h')],
                "←/h",
                "column",
            ),
            column_right: Binding::new(
                vec![KeyCombination::new(KeyCode::Right), key('l')],
                "→/l",
                "column",
            ),
            sort: Binding::new(vec![key('s'), KeyCombination::new(KeyCode::Enter)], "s", "sort"),
            toggle_row: Binding::new(vec![key(' ')], "space", "select"),
            toggle_all: Binding::new(vec![key('a')], "a", "all"),
        }
    }
}

impl KeyMap for DataTableKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.up,
            &self.down,
            &self.column_right,
            &self.sort,
            &self.toggle_row,
            &self.toggle_all,
        ]
    }
}

/// Style configuration for the data table.
#[derive(Debug, Clone)]
pub struct DataTableStyle {
    /// Header cells.
    pub header: Style,
    /// Header cell under the header cursor, while focused.
    pub header_cursor: Style,
    /// Rows in the selection set.
    pub selected: Style,
    /// The cursor row, while focused.
    pub cursor: Style,
    /// Loading and empty-state text.
    pub status: Style,
}

impl Default for DataTableStyle {
    fn default() -> Self {
        Self {
            header: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            header_cursor: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selected: Style::default().bg(Color::Blue).fg(Color::White),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            status: Style::default().fg(Color::DarkGray),
        }
    }
}

/// A table of `R` rows with single-column sorting and multi-row selection.
///
/// ```ignore
/// let table = DataTable::new(vec![
///         Column::new("id", "ID", |u: &User| u.id.into()).sortable(),
///         Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable(),
///     ])
///     .with_rows(users)
///     .selectable(true)
///     .with_title("Users");
/// ```
pub struct DataTable<R: TableRow> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    sort: Option<SortState>,
    selection: BTreeMap<R::Id, R>,
    selectable: bool,
    loading: bool,
    focus: bool,
    cursor: usize,
    header_cursor: usize,
    title: String,
    loading_text: String,
    empty_text: String,
    spinner: Spinner,
    style: DataTableStyle,
    key_bindings: DataTableKeyBindings,
}

impl<R: TableRow> DataTable<R> {
    /// An empty, non-selectable, idle table with these columns.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            sort: None,
            selection: BTreeMap::new(),
            selectable: false,
            loading: false,
            focus: false,
            cursor: 0,
            header_cursor: 0,
            title: String::new(),
            loading_text: "Loading data...".to_string(),
            empty_text: "No data available.".to_string(),
            spinner: Spinner::new("data-table"),
            style: DataTableStyle::default(),
            key_bindings: DataTableKeyBindings::default(),
        }
    }

    /// Builder: initial rows.
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Builder: selectable mode.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Builder: start in the loading state.
    pub fn loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Builder: border title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: text shown next to the spinner while loading.
    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    /// Builder: text shown when there are no rows.
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Builder: timer key for the loading spinner. Tables that may load at
    /// the same time need distinct keys.
    pub fn with_spinner_key(mut self, key: impl Into<String>) -> Self {
        let active = self.spinner.is_active();
        self.spinner = Spinner::new(key);
        self.spinner.set_active(active);
        self
    }

    /// Builder: styles.
    pub fn with_style(mut self, style: DataTableStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: key bindings.
    pub fn with_key_bindings(mut self, bindings: DataTableKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Current key bindings, for help rendering.
    pub fn key_bindings(&self) -> &DataTableKeyBindings {
        &self.key_bindings
    }

    /// Take keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Drop keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Replace the rows. Sort and selection are kept; the cursor is clamped.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    /// Replace the columns. The sort state is cleared since it may name a
    /// column that no longer exists.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
        self.sort = None;
        self.header_cursor = self.header_cursor.min(self.columns.len().saturating_sub(1));
    }

    /// Enter or leave the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.spinner.set_active(loading);
    }

    /// Turn selectable mode on or off. Turning it off clears the selection;
    /// if that removed anything, the returned command reports the empty set.
    pub fn set_selectable(&mut self, selectable: bool) -> Command<Message<R>> {
        self.selectable = selectable;
        if !selectable && !self.selection.is_empty() {
            return self.clear_selection();
        }
        Command::none()
    }

    /// Empty the selection, reporting it if it was not already empty.
    pub fn clear_selection(&mut self) -> Command<Message<R>> {
        if self.selection.is_empty() {
            return Command::none();
        }
        self.selection.clear();
        self.selection_changed()
    }

    /// Drop the sort and show rows in input order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Column descriptors.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The active sort, if any.
    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Whether selectable mode is on.
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether the table is loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the row with `id` is selected.
    pub fn is_selected(&self, id: &R::Id) -> bool {
        self.selection.contains_key(id)
    }

    /// The selection, in id order.
    pub fn selected_rows(&self) -> Vec<R> {
        self.selection.values().cloned().collect()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Rows in display order.
    pub fn sorted_rows(&self) -> Vec<&R> {
        derive_sorted_view(&self.rows, &self.columns, self.sort.as_ref())
    }

    /// Which state the table draws right now.
    pub fn render_state(&self) -> RenderState {
        if self.loading {
            RenderState::Loading
        } else if self.rows.is_empty() {
            RenderState::Empty
        } else {
            RenderState::Rows
        }
    }

    /// Cursor position in display order.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the column under the header cursor.
    pub fn header_cursor(&self) -> usize {
        self.header_cursor
    }

    /// Toggle sort on the column at `index`. Returns whether the sort state
    /// changed; out-of-range and non-sortable columns are no-ops.
    ///
    /// The cursor stays on the same row across the reorder.
    pub fn toggle_sort(&mut self, index: usize) -> bool {
        let Some(column) = self.columns.get(index) else {
            return false;
        };
        let next = next_sort_state(self.sort.as_ref(), column);
        if next == self.sort {
            return false;
        }
        let cursor_id = self.row_at_cursor().map(TableRow::id);
        self.sort = next;
        if let Some(id) = cursor_id {
            if let Some(pos) = self.sorted_rows().iter().position(|r| r.id() == id) {
                self.cursor = pos;
            }
        }
        true
    }

    /// Toggle selection of `row`, matched by id. The returned command
    /// reports the full selection; it is a no-op when not selectable.
    pub fn toggle_row_selection(&mut self, row: &R) -> Command<Message<R>> {
        if !self.selectable {
            return Command::none();
        }
        let id = row.id();
        if self.selection.remove(&id).is_none() {
            self.selection.insert(id, row.clone());
        }
        self.selection_changed()
    }

    fn toggle_row_by_id(&mut self, id: &R::Id) -> Command<Message<R>> {
        let Some(row) = self.rows.iter().find(|r| &r.id() == id).cloned() else {
            return Command::none();
        };
        self.toggle_row_selection(&row)
    }

    fn toggle_all(&mut self) -> Command<Message<R>> {
        if !self.selectable || self.rows.is_empty() {
            return Command::none();
        }
        let all_selected = self.rows.iter().all(|r| self.selection.contains_key(&r.id()));
        if all_selected {
            self.selection.clear();
        } else {
            for row in &self.rows {
                self.selection.entry(row.id()).or_insert_with(|| row.clone());
            }
        }
        self.selection_changed()
    }

    fn selection_changed(&self) -> Command<Message<R>> {
        Command::message(Message::SelectionChanged(self.selected_rows()))
    }

    fn row_at_cursor(&self) -> Option<&R> {
        self.sorted_rows().get(self.cursor).copied()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message<R>> {
        let last = self.rows.len().saturating_sub(1);
        let bindings = &self.key_bindings;
        if bindings.up.matches(&key) {
            self.cursor = if self.cursor == 0 { last } else { self.cursor - 1 };
        } else if bindings.down.matches(&key) {
            self.cursor = if self.cursor >= last { 0 } else { self.cursor + 1 };
        } else if bindings.first.matches(&key) {
            self.cursor = 0;
        } else if bindings.last.matches(&key) {
            self.cursor = last;
        } else if bindings.column_left.matches(&key) {
            self.header_cursor = self.header_cursor.saturating_sub(1);
        } else if bindings.column_right.matches(&key) {
            self.header_cursor = (self.header_cursor + 1).min(self.columns.len().saturating_sub(1));
        } else if bindings.sort.matches(&key) {
            self.toggle_sort(self.header_cursor);
        } else if bindings.toggle_row.matches(&key) {
            if let Some(id) = self.row_at_cursor().map(TableRow::id) {
                return self.toggle_row_by_id(&id);
            }
        } else if bindings.toggle_all.matches(&key) {
            return self.toggle_all();
        }
        Command::none()
    }

    fn header_row(&self) -> Row<'_> {
        let mut cells = Vec::with_capacity(self.columns.len() + 1);
        if self.selectable {
            cells.push(Cell::from(""));
        }
        for (index, column) in self.columns.iter().enumerate() {
            let mut title = column.title.clone();
            if let Some(sort) = self.sort.as_ref().filter(|s| column.sortable && s.key == column.key) {
                title.push(' ');
                title.push_str(sort.direction.arrow());
            }
            let style = if self.focus && index == self.header_cursor {
                self.style.header_cursor
            } else {
                self.style.header
            };
            cells.push(Cell::from(title).style(style));
        }
        Row::new(cells).bottom_margin(1)
    }

    fn body_rows(&self) -> Vec<Row<'_>> {
        self.sorted_rows()
            .into_iter()
            .map(|row| {
                let selected = self.selection.contains_key(&row.id());
                let mut cells = Vec::with_capacity(self.columns.len() + 1);
                if self.selectable {
                    cells.push(Cell::from(if selected { "[x]" } else { "[ ]" }));
                }
                cells.extend(self.columns.iter().map(|c| Cell::from(c.value(row).to_string())));
                let row = Row::new(cells);
                if selected {
                    row.style(self.style.selected)
                } else {
                    row
                }
            })
            .collect()
    }

    fn widths(&self) -> Vec<Constraint> {
        let checkbox = self.selectable.then_some(Constraint::Length(3));
        checkbox
            .into_iter()
            .chain(self.columns.iter().map(|c| c.width))
            .collect()
    }

    fn view_status(&self, frame: &mut Frame, area: Rect) {
        let [line] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        match self.render_state() {
            RenderState::Loading => {
                let spinner_width = self.spinner.width();
                let text_width = u16::try_from(self.loading_text.chars().count()).unwrap_or(u16::MAX);
                let [glyph, text] = Layout::horizontal([
                    Constraint::Length(spinner_width + 1),
                    Constraint::Length(text_width),
                ])
                .flex(Flex::Center)
                .areas(line);
                self.spinner.view(frame, glyph);
                frame.render_widget(
                    Paragraph::new(self.loading_text.as_str()).style(self.style.status),
                    text,
                );
            }
            RenderState::Empty => {
                frame.render_widget(
                    Paragraph::new(Line::from(self.empty_text.as_str()))
                        .alignment(Alignment::Center)
                        .style(self.style.status),
                    line,
                );
            }
            RenderState::Rows => {}
        }
    }
}

impl<R: TableRow> Component for DataTable<R> {
    type Message = Message<R>;

    fn update(&mut self, msg: Message<R>) -> Command<Message<R>> {
        match msg {
            Message::Spinner(m) => self.spinner.update(m).map(Message::Spinner),
            // No interaction while loading or empty.
            _ if self.render_state() != RenderState::Rows => Command::none(),
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::ToggleSort(index) => {
                self.toggle_sort(index);
                Command::none()
            }
            Message::ToggleRow(id) => self.toggle_row_by_id(&id),
            Message::SelectionChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = focus_block(&self.title, self.focus);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.render_state() != RenderState::Rows {
            self.view_status(frame, inner);
            return;
        }

        let mut state = TableState::default();
        if self.focus {
            state.select(Some(self.cursor));
        }
        let table = Table::new(self.body_rows(), self.widths())
            .header(self.header_row())
            .row_highlight_style(self.style.cursor)
            .column_spacing(2);
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message<R>>> {
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
    use crossterm::event::KeyModifiers;
    use proptest::prelude::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: u32,
        name: &'static str,
        age: Option<i64>,
    }

    impl TableRow for Person {
        type Id = u32;
        fn id(&self) -> u32 {
            self.id
        }
    }

    fn person(id: u32, name: &'static str, age: Option<i64>) -> Person {
        Person { id, name, age }
    }

    fn columns() -> Vec<Column<Person>> {
        vec![
            Column::new("id", "ID", |p: &Person| p.id.into()).sortable(),
            Column::new("name", "Name", |p: &Person| p.name.into()).sortable(),
            Column::new("age", "Age", |p: &Person| p.age.into()).sortable(),
            Column::new("note", "Note", |_: &Person| CellValue::Null),
        ]
    }

    fn people() -> Vec<Person> {
        vec![
            person(1, "Bob", Some(40)),
            person(2, "Alice", None),
            person(3, "Eve", Some(25)),
        ]
    }

    fn table() -> DataTable<Person> {
        DataTable::new(columns()).with_rows(people())
    }

    fn names(rows: &[&Person]) -> Vec<&'static str> {
        rows.iter().map(|p| p.name).collect()
    }

    fn asc(key: &str) -> SortState {
        SortState {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    fn desc(key: &str) -> SortState {
        SortState {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    fn key(code: KeyCode) -> Message<Person> {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn reported(cmd: Command<Message<Person>>) -> Option<Vec<u32>> {
        match cmd.into_message() {
            Some(Message::SelectionChanged(rows)) => Some(rows.iter().map(|p| p.id).collect()),
            _ => None,
        }
    }

    fn render(table: &DataTable<Person>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| table.view(f, f.area())).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    // ── derive_sorted_view ──

    #[test]
    fn no_sort_keeps_input_order() {
        let rows = people();
        assert_eq!(names(&derive_sorted_view(&rows, &columns(), None)), ["Bob", "Alice", "Eve"]);
    }

    #[test]
    fn sorts_names_both_ways() {
        let rows = people();
        let cols = columns();
        assert_eq!(
            names(&derive_sorted_view(&rows, &cols, Some(&asc("name")))),
            ["Alice", "Bob", "Eve"]
        );
        assert_eq!(
            names(&derive_sorted_view(&rows, &cols, Some(&desc("name")))),
            ["Eve", "Bob", "Alice"]
        );
    }

    #[test]
    fn nulls_last_in_both_directions() {
        let rows = people();
        let cols = columns();
        assert_eq!(
            names(&derive_sorted_view(&rows, &cols, Some(&asc("age")))),
            ["Eve", "Bob", "Alice"]
        );
        assert_eq!(
            names(&derive_sorted_view(&rows, &cols, Some(&desc("age")))),
            ["Bob", "Eve", "Alice"]
        );
    }

    #[test]
    fn equal_values_keep_input_order_when_descending() {
        let rows = vec![
            person(1, "Ann", Some(30)),
            person(2, "Ben", Some(30)),
            person(3, "Cid", Some(50)),
        ];
        let view = derive_sorted_view(&rows, &columns(), Some(&desc("age")));
        assert_eq!(names(&view), ["Cid", "Ann", "Ben"]);
    }

    #[test]
    fn unknown_sort_key_keeps_input_order() {
        let rows = people();
        let view = derive_sorted_view(&rows, &columns(), Some(&asc("missing")));
        assert_eq!(names(&view), ["Bob", "Alice", "Eve"]);
    }

    #[test]
    fn sorting_does_not_touch_the_rows() {
        let mut t = table();
        t.toggle_sort(1);
        assert_eq!(names(&t.sorted_rows()), ["Alice", "Bob", "Eve"]);
        assert_eq!(t.rows(), people().as_slice());
    }

    #[test]
    fn mixed_numbers_compare_numerically() {
        assert_eq!(CellValue::Int(2).natural_cmp(&CellValue::Float(1.5)), Ordering::Greater);
        assert_eq!(
            CellValue::Bool(true).natural_cmp(&CellValue::Text("a".into())),
            Ordering::Less
        );
    }

    #[test]
    fn int_and_float_compare_exactly_past_f64_precision() {
        let a = CellValue::Int(9_007_199_254_740_993);
        let b = CellValue::Float(9_007_199_254_740_992.0);
        let c = CellValue::Int(9_007_199_254_740_992);
        assert_eq!(a.natural_cmp(&b), Ordering::Greater);
        assert_eq!(b.natural_cmp(&a), Ordering::Less);
        assert_eq!(b.natural_cmp(&c), Ordering::Equal);
        assert_eq!(a.natural_cmp(&c), Ordering::Greater);
        assert_eq!(CellValue::Int(3).natural_cmp(&CellValue::Float(3.5)), Ordering::Less);
        assert_eq!(CellValue::Int(-3).natural_cmp(&CellValue::Float(-3.5)), Ordering::Greater);
        assert_eq!(CellValue::Int(i64::MAX).natural_cmp(&CellValue::Float(1e19)), Ordering::Less);
        assert_eq!(CellValue::Int(i64::MIN).natural_cmp(&CellValue::Float(f64::NEG_INFINITY)), Ordering::Greater);
        assert_eq!(CellValue::Int(0).natural_cmp(&CellValue::Float(-0.0)), Ordering::Equal);
    }

    #[test]
    fn null_displays_empty() {
        assert_eq!(CellValue::from(None::<i64>).to_string(), "");
        assert_eq!(CellValue::from(Some("x")).to_string(), "x");
    }

    // ── toggle_sort ──

    #[test]
    fn sort_cycles_between_two_states() {
        let mut t = table();
        assert!(t.toggle_sort(1));
        assert_eq!(t.sort_state(), Some(&asc("name")));
        assert!(t.toggle_sort(1));
        assert_eq!(t.sort_state(), Some(&desc("name")));
        assert!(t.toggle_sort(1));
        assert_eq!(t.sort_state(), Some(&asc("name")));
    }

    #[test]
    fn switching_column_starts_ascending() {
        let mut t = table();
        t.toggle_sort(1);
        t.toggle_sort(1);
        t.toggle_sort(2);
        assert_eq!(t.sort_state(), Some(&asc("age")));
    }

    #[test]
    fn non_sortable_column_is_a_no_op() {
        let mut t = table();
        t.toggle_sort(1);
        assert!(!t.toggle_sort(3));
        assert!(!t.toggle_sort(99));
        assert_eq!(t.sort_state(), Some(&asc("name")));
    }

    #[test]
    fn set_columns_clears_sort() {
        let mut t = table();
        t.toggle_sort(0);
        t.set_columns(columns());
        assert_eq!(t.sort_state(), None);
    }

    #[test]
    fn cursor_follows_row_across_sort() {
        let mut t = table();
        t.focus();
        t.update(key(KeyCode::Down)); // Alice, input index 1
        t.toggle_sort(1); // Alice first by name
        assert_eq!(t.cursor(), 0);
    }

    // ── selection ──

    #[test]
    fn selection_reports_full_set() {
        let mut t = table().selectable(true);
        assert_eq!(reported(t.update(Message::ToggleRow(1))), Some(vec![1]));
        assert_eq!(reported(t.update(Message::ToggleRow(2))), Some(vec![1, 2]));
        assert_eq!(reported(t.update(Message::ToggleRow(1))), Some(vec![2]));
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut t = table().selectable(true);
        t.update(Message::ToggleRow(3));
        let before = t.selected_rows();
        t.update(Message::ToggleRow(1));
        t.update(Message::ToggleRow(1));
        assert_eq!(t.selected_rows(), before);
    }

    #[test]
    fn selection_matches_by_id_not_value() {
        let mut t = table().selectable(true);
        assert_eq!(reported(t.toggle_row_selection(&person(1, "Bob", Some(40)))), Some(vec![1]));
        // Same id, different contents: still the same logical row.
        assert_eq!(reported(t.toggle_row_selection(&person(1, "Robert", None))), Some(vec![]));
        assert_eq!(t.selected_count(), 0);
    }

    #[test]
    fn direct_toggle_reports_selection() {
        let mut t = table().selectable(true);
        assert_eq!(reported(t.toggle_row_selection(&people()[0])), Some(vec![1]));
        assert_eq!(reported(t.toggle_row_selection(&people()[2])), Some(vec![1, 3]));
        assert!(t.is_selected(&3));
    }

    #[test]
    fn not_selectable_ignores_toggles() {
        let mut t = table();
        assert!(t.update(Message::ToggleRow(1)).is_none());
        assert!(t.toggle_row_selection(&people()[0]).is_none());
        assert_eq!(t.selected_count(), 0);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut t = table().selectable(true);
        assert!(t.update(Message::ToggleRow(42)).is_none());
    }

    #[test]
    fn space_selects_cursor_row_in_sorted_order() {
        let mut t = table().selectable(true);
        t.focus();
        t.toggle_sort(1); // Alice, Bob, Eve
        t.update(key(KeyCode::Home));
        assert_eq!(reported(t.update(key(KeyCode::Char(' ')))), Some(vec![2]));
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let mut t = table().selectable(true);
        t.focus();
        t.update(Message::ToggleRow(2));
        assert_eq!(reported(t.update(key(KeyCode::Char('a')))), Some(vec![1, 2, 3]));
        assert_eq!(reported(t.update(key(KeyCode::Char('a')))), Some(vec![]));
    }

    #[test]
    fn disabling_selection_reports_empty_set() {
        let mut t = table().selectable(true);
        t.update(Message::ToggleRow(1));
        assert_eq!(reported(t.set_selectable(false)), Some(vec![]));
        assert!(t.set_selectable(false).is_none());
    }

    // ── keys and states ──

    #[test]
    fn keys_need_focus() {
        let mut t = table();
        t.update(key(KeyCode::Down));
        assert_eq!(t.cursor(), 0);
        t.focus();
        t.update(key(KeyCode::Down));
        assert_eq!(t.cursor(), 1);
        t.update(key(KeyCode::Up));
        t.update(key(KeyCode::Up));
        assert_eq!(t.cursor(), 2);
    }

    #[test]
    fn header_cursor_drives_sort_key() {
        let mut t = table();
        t.focus();
        t.update(key(KeyCode::Right));
        t.update(key(KeyCode::Right));
        t.update(key(KeyCode::Char('s')));
        assert_eq!(t.sort_state(), Some(&asc("age")));
        t.update(key(KeyCode::Enter));
        assert_eq!(t.sort_state(), Some(&desc("age")));
    }

    #[test]
    fn loading_blocks_interaction() {
        let mut t = table().selectable(true).loading(true);
        t.focus();
        assert!(t.update(Message::ToggleRow(1)).is_none());
        t.update(Message::ToggleSort(1));
        t.update(key(KeyCode::Char(' ')));
        assert_eq!(t.sort_state(), None);
        assert_eq!(t.selected_count(), 0);
    }

    #[test]
    fn render_state_precedence() {
        let empty: DataTable<Person> = DataTable::new(columns());
        assert_eq!(empty.render_state(), RenderState::Empty);
        assert_eq!(empty.loading(true).render_state(), RenderState::Loading);
        assert_eq!(table().render_state(), RenderState::Rows);
    }

    #[test]
    fn loading_spins_and_subscribes() {
        let mut t = table().loading(true);
        assert_eq!(t.subscriptions().len(), 1);
        t.set_loading(false);
        assert!(t.subscriptions().is_empty());
    }

    #[test]
    fn loading_renders_only_indicator() {
        let out = render(&table().loading(true), 50, 8);
        assert!(out.contains("Loading data..."));
        assert!(!out.contains("Bob"));
        assert!(!out.contains("Name"));
    }

    #[test]
    fn empty_renders_only_empty_state() {
        let t: DataTable<Person> = DataTable::new(columns());
        let out = render(&t, 50, 8);
        assert!(out.contains("No data available."));
        assert!(!out.contains("Name"));
    }

    #[test]
    fn rows_render_with_sort_arrow_and_checkboxes() {
        let mut t = table().selectable(true);
        t.toggle_sort(1);
        t.toggle_sort(1);
        t.update(Message::ToggleRow(3));
        let out = render(&t, 60, 8);
        assert!(out.contains("Name ↓"));
        assert!(out.contains("[x]"));
        assert!(out.contains("[ ]"));
        let eve = out.find("Eve").unwrap();
        let alice = out.find("Alice").unwrap();
        assert!(eve < alice);
    }

    // ── properties ──

    fn arb_rows() -> impl Strategy<Value = Vec<Person>> {
        prop::collection::vec(prop::option::of(-5i64..5), 0..40).prop_map(|ages| {
            ages.into_iter()
                .enumerate()
                .map(|(i, age)| person(i as u32, "p", age))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_no_sort_is_identity(rows in arb_rows()) {
            let view = derive_sorted_view(&rows, &columns(), None);
            let ids: Vec<u32> = view.iter().map(|p| p.id).collect();
            let expected: Vec<u32> = rows.iter().map(|p| p.id).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn prop_ascending_is_ordered_with_nulls_last_and_stable(rows in arb_rows()) {
            let view = derive_sorted_view(&rows, &columns(), Some(&asc("age")));
            prop_assert_eq!(view.len(), rows.len());
            for pair in view.windows(2) {
                match (pair[0].age, pair[1].age) {
                    (Some(a), Some(b)) => {
                        prop_assert!(a <= b);
                        if a == b {
                            prop_assert!(pair[0].id < pair[1].id);
                        }
                    }
                    (None, Some(_)) => prop_assert!(false, "null before value"),
                    (None, None) => prop_assert!(pair[0].id < pair[1].id),
                    (Some(_), None) => {}
                }
            }
        }

        #[test]
        fn prop_descending_keeps_nulls_last(rows in arb_rows()) {
            let view = derive_sorted_view(&rows, &columns(), Some(&desc("age")));
            let first_null = view.iter().position(|p| p.age.is_none()).unwrap_or(view.len());
            prop_assert!(view[first_null..].iter().all(|p| p.age.is_none()));
            for pair in view[..first_null].windows(2) {
                prop_assert!(pair[0].age >= pair[1].age);
            }
        }

        #[test]
        fn prop_double_toggle_is_identity(rows in arb_rows(), pick in 0usize..40) {
            prop_assume!(!rows.is_empty());
            let target = rows[pick % rows.len()].clone();
            let mut t = DataTable::new(columns()).with_rows(rows).selectable(true);
            t.update(Message::ToggleRow(0));
            let before = t.selected_rows();
            let _ = t.toggle_row_selection(&target);
            let _ = t.toggle_row_selection(&target);
            prop_assert_eq!(t.selected_rows(), before);
        }
    }
}
