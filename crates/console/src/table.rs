//! Generic list/table display contract.
//!
//! The table owns no data: it projects whatever collection it is handed
//! against column and row-action specifications, and turns user input into
//! [`TableEvent`]s for the owning controller.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Key of the synthetic column holding row actions.
pub const ACTIONS_COLUMN: &str = "actions";

/// How a column's values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Array,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub label_key: &'static str,
    pub sortable: bool,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn text(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            sortable: true,
            kind: ColumnKind::Text,
        }
    }

    pub const fn array(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            sortable: false,
            kind: ColumnKind::Array,
        }
    }

    pub const fn date(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            sortable: true,
            kind: ColumnKind::Date,
        }
    }

    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// What a row action does once invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Edit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionColor {
    Primary,
    Accent,
    Warn,
}

/// A per-row action button.
pub struct RowAction<E> {
    pub icon: &'static str,
    pub label_key: &'static str,
    pub color: ActionColor,
    pub kind: ActionKind,
    /// Shown only for rows where this returns true; always shown when absent.
    pub visible: Option<fn(&E) -> bool>,
}

impl<E> Clone for RowAction<E> {
    fn clone(&self) -> Self {
        Self {
            icon: self.icon,
            label_key: self.label_key,
            color: self.color,
            kind: self.kind,
            visible: self.visible,
        }
    }
}

impl<E> core::fmt::Debug for RowAction<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RowAction")
            .field("icon", &self.icon)
            .field("label_key", &self.label_key)
            .field("kind", &self.kind)
            .field("conditional", &self.visible.is_some())
            .finish()
    }
}

impl<E> RowAction<E> {
    pub fn edit() -> Self {
        Self {
            icon: "edit",
            label_key: "common.edit",
            color: ActionColor::Primary,
            kind: ActionKind::Edit,
            visible: None,
        }
    }

    pub fn delete() -> Self {
        Self {
            icon: "delete",
            label_key: "common.delete",
            color: ActionColor::Warn,
            kind: ActionKind::Delete,
            visible: None,
        }
    }

    pub fn visible_when(mut self, predicate: fn(&E) -> bool) -> Self {
        self.visible = Some(predicate);
        self
    }

    pub fn is_visible_for(&self, row: &E) -> bool {
        self.visible.is_none_or(|predicate| predicate(row))
    }
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    List(Vec<String>),
    Date(DateTime<Utc>),
    Empty,
}

/// Rows the table can project.
pub trait TableRow {
    /// Stable row key (the entity id).
    fn row_id(&self) -> String;

    /// Value of the column `key`; unknown keys are [`CellValue::Empty`].
    fn cell(&self, key: &str) -> CellValue;
}

/// Intents emitted by the table towards its controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    CreateRequested,
    RefreshRequested,
    SearchChanged(String),
    ActionInvoked { action: ActionKind, row_id: String },
}

/// Piece of cell text, highlighted when it matches the search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub highlighted: bool,
}

impl Fragment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Split `text` around every case-insensitive occurrence of `term`.
///
/// The term is matched literally; characters such as `.` or `*` carry no
/// pattern meaning.
pub fn highlight(text: &str, term: &str) -> Vec<Fragment> {
    if text.is_empty() {
        return Vec::new();
    }
    if term.is_empty() {
        return vec![Fragment::plain(text)];
    }

    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    let mut fragments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i < chars.len() {
        let Some(len) = match_len(&chars[i..], &needle) else {
            i += 1;
            continue;
        };

        let start = chars[i].0;
        let end = chars.get(i + len).map_or(text.len(), |(offset, _)| *offset);
        if plain_start < start {
            fragments.push(Fragment::plain(&text[plain_start..start]));
        }
        fragments.push(Fragment::matched(&text[start..end]));
        plain_start = end;
        i += len;
    }
    if plain_start < text.len() {
        fragments.push(Fragment::plain(&text[plain_start..]));
    }
    fragments
}

/// Number of chars of `chars` whose lowercase form spells `needle` exactly.
fn match_len(chars: &[(usize, char)], needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut consumed = 0;
    for (_, c) in chars {
        if matched == needle.len() {
            break;
        }
        for lower in c.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        consumed += 1;
    }
    (matched == needle.len() && consumed > 0).then_some(consumed)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub key: &'static str,
    pub label_key: &'static str,
    pub sortable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellView {
    Text(Vec<Fragment>),
    Array(Vec<Vec<Fragment>>),
    Date(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub icon: &'static str,
    pub label_key: &'static str,
    pub color: ActionColor,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<CellView>,
    pub actions: Vec<ActionView>,
}

/// Everything a UI layer needs to draw the table once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub displayed_columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub loading: bool,
    pub searchable: bool,
    pub search_term: String,
}

/// Rendering format of date cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The table component: specs plus the search box state.
#[derive(Debug, Clone)]
pub struct DataTable<E> {
    columns: Vec<ColumnSpec>,
    actions: Vec<RowAction<E>>,
    searchable: bool,
    search_term: String,
}

impl<E: TableRow> DataTable<E> {
    pub fn new(columns: Vec<ColumnSpec>, actions: Vec<RowAction<E>>) -> Self {
        Self {
            columns,
            actions,
            searchable: true,
            search_term: String::new(),
        }
    }

    pub fn with_search(mut self, enabled: bool) -> Self {
        self.searchable = enabled;
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Column keys, followed by the actions column when any action exists.
    pub fn displayed_columns(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.columns.iter().map(|c| c.key).collect();
        if !self.actions.is_empty() {
            keys.push(ACTIONS_COLUMN);
        }
        keys
    }

    pub fn visible_actions<'a>(&'a self, row: &'a E) -> impl Iterator<Item = &'a RowAction<E>> + 'a {
        self.actions.iter().filter(move |action| action.is_visible_for(row))
    }

    /// Feed raw search box input; emits only when the trimmed value changes.
    pub fn input_search(&mut self, raw: &str) -> Option<TableEvent> {
        if !self.searchable {
            return None;
        }
        let term = raw.trim();
        if term == self.search_term {
            return None;
        }
        self.search_term = term.to_string();
        Some(TableEvent::SearchChanged(self.search_term.clone()))
    }

    pub fn request_create(&self) -> TableEvent {
        TableEvent::CreateRequested
    }

    pub fn request_refresh(&self) -> TableEvent {
        TableEvent::RefreshRequested
    }

    /// Invoke `action` on `row`; hidden actions emit nothing.
    pub fn invoke(&self, action: ActionKind, row: &E) -> Option<TableEvent> {
        self.visible_actions(row)
            .any(|candidate| candidate.kind == action)
            .then(|| TableEvent::ActionInvoked {
                action,
                row_id: row.row_id(),
            })
    }

    /// Project `rows` for display, highlighting the current search term.
    pub fn render(&self, rows: &[E], loading: bool) -> TableView {
        let term = self.search_term.as_str();
        let rows = rows
            .iter()
            .map(|row| RowView {
                id: row.row_id(),
                cells: self
                    .columns
                    .iter()
                    .map(|column| render_cell(row.cell(column.key), column.kind, term))
                    .collect(),
                actions: self
                    .visible_actions(row)
                    .map(|action| ActionView {
                        icon: action.icon,
                        label_key: action.label_key,
                        color: action.color,
                        kind: action.kind,
                    })
                    .collect(),
            })
            .collect();

        TableView {
            headers: self
                .columns
                .iter()
                .map(|c| HeaderView {
                    key: c.key,
                    label_key: c.label_key,
                    sortable: c.sortable,
                })
                .collect(),
            displayed_columns: self.displayed_columns(),
            rows,
            loading,
            searchable: self.searchable,
            search_term: self.search_term.clone(),
        }
    }
}

fn render_cell(value: CellValue, kind: ColumnKind, term: &str) -> CellView {
    match (value, kind) {
        (CellValue::Empty, _) => CellView::Empty,
        (CellValue::Date(at), _) => CellView::Date(at.format(DATE_FORMAT).to_string()),
        (CellValue::List(items), _) => {
            CellView::Array(items.iter().map(|item| highlight(item, term)).collect())
        }
        (CellValue::Text(text), ColumnKind::Array) => CellView::Array(vec![highlight(&text, term)]),
        (CellValue::Text(text), _) => CellView::Text(highlight(&text, term)),
    }
}
