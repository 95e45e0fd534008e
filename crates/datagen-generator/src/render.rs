//! Statement rendering.
//!
//! Turns a record into literal INSERT / UPDATE / DELETE text. Values are
//! formatted by type:
//!
//! | Value   | Rendered as                                  |
//! |---------|----------------------------------------------|
//! | null    | `NULL`                                       |
//! | boolean | `TRUE` / `FALSE`                             |
//! | numeric | unquoted literal                             |
//! | text    | single-quoted, every `'` doubled to `''`     |
//!
//! Quote doubling is the only escaping performed.

use datagen_core::{FieldValue, Fields, Operation, Statement};

/// Column used in WHERE clauses unless configured otherwise.
pub const DEFAULT_ID_COLUMN: &str = "id";

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render one value as SQL literal text.
pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "NULL".to_string(),
        FieldValue::Bool(true) => "TRUE".to_string(),
        FieldValue::Bool(false) => "FALSE".to_string(),
        FieldValue::Int(i) => i.to_string(),
        FieldValue::Float(f) if f.is_finite() => f.to_string(),
        FieldValue::Float(_) => "NULL".to_string(),
        FieldValue::Text(s) => quote_text(s),
    }
}

/// `INSERT INTO <table> (<cols>) VALUES (<vals>);` in field order.
pub fn render_insert<R: Fields + ?Sized>(table: &str, record: &R) -> Statement {
    let fields = record.fields();
    let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
    let values: Vec<String> = fields.iter().map(|(_, value)| format_value(value)).collect();

    Statement::new(
        Operation::Insert,
        format!(
            "INSERT INTO {table} ({}) VALUES ({});",
            columns.join(", "),
            values.join(", ")
        ),
    )
}

/// `UPDATE <table> SET <col>=<val>, ... WHERE <id_column>=<id>;`
///
/// Every field except the id column lands in the SET list. A record without
/// the id column renders `WHERE <id_column>=NULL`, which matches nothing.
pub fn render_update<R: Fields + ?Sized>(table: &str, record: &R, id_column: &str) -> Statement {
    let mut id = FieldValue::Null;
    let mut assignments = Vec::new();

    for (column, value) in record.fields() {
        if column == id_column {
            id = value;
        } else {
            assignments.push(format!("{column}={}", format_value(&value)));
        }
    }

    Statement::new(
        Operation::Update,
        format!(
            "UPDATE {table} SET {} WHERE {id_column}={};",
            assignments.join(", "),
            format_value(&id)
        ),
    )
}

/// `DELETE FROM <table> WHERE <id_column>=<id>;`
pub fn render_delete(table: &str, id: &FieldValue, id_column: &str) -> Statement {
    Statement::new(
        Operation::Delete,
        format!("DELETE FROM {table} WHERE {id_column}={};", format_value(id)),
    )
}

/// Split a rendered VALUES list on top-level commas, ignoring commas inside
/// quoted literals.
///
/// `'a,b', 1, 'it''s'` yields three items. Surrounding whitespace is trimmed.
pub fn split_values(list: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in list.chars() {
        match c {
            // A doubled quote toggles twice, so it never ends the literal.
            '\'' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                items.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.trim().is_empty() || !items.is_empty() {
        items.push(current.trim().to_string());
    }

    items
}

/// Renders records into statements against a configurable id column.
#[derive(Debug, Clone)]
pub struct StatementRenderer {
    id_column: String,
}

impl Default for StatementRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementRenderer {
    pub fn new() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
        }
    }

    /// Use a different column for UPDATE/DELETE predicates.
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Render `record` as the given operation against `table`.
    pub fn render<R: Fields + ?Sized>(
        &self,
        table: &str,
        record: &R,
        operation: Operation,
    ) -> Statement {
        match operation {
            Operation::Insert => render_insert(table, record),
            Operation::Update => render_update(table, record, &self.id_column),
            Operation::Delete => {
                let id = record.field(&self.id_column).unwrap_or(FieldValue::Null);
                render_delete(table, &id, &self.id_column)
            }
        }
    }
}
