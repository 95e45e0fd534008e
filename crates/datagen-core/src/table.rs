//! Target table definitions and DDL generation.
//!
//! Each [`EntityKind`] has a fixed column layout matching the field order of
//! its record shape. DDL is derived per [`SqlDialect`] so that the same layout
//! can be created on MySQL and PostgreSQL.

use crate::kinds::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL dialect used for identifier quoting and column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    MySql,
    PostgreSql,
}

impl SqlDialect {
    /// Quote a table or column identifier.
    pub fn quote_identifier(&self, name: &str) -> String {
        match self {
            SqlDialect::MySql => format!("`{}`", name.replace('`', "``")),
            SqlDialect::PostgreSql => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    /// DDL type for a column type.
    pub fn column_type(&self, column_type: &ColumnType) -> String {
        match column_type {
            ColumnType::VarChar { length } => format!("VARCHAR({length})"),
            ColumnType::Bool => "BOOLEAN".to_string(),
            ColumnType::Int => match self {
                SqlDialect::MySql => "INT".to_string(),
                SqlDialect::PostgreSql => "INTEGER".to_string(),
            },
            ColumnType::Decimal { precision, scale } => format!("DECIMAL({precision},{scale})"),
            ColumnType::DateTime => match self {
                SqlDialect::MySql => "DATETIME".to_string(),
                SqlDialect::PostgreSql => "TIMESTAMP".to_string(),
            },
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::MySql => write!(f, "mysql"),
            SqlDialect::PostgreSql => write!(f, "postgresql"),
        }
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(SqlDialect::MySql),
            "postgresql" | "postgres" | "pg" => Ok(SqlDialect::PostgreSql),
            other => Err(format!("Unknown SQL dialect: '{other}'")),
        }
    }
}

/// Column storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    VarChar { length: u16 },
    Bool,
    Int,
    Decimal { precision: u8, scale: u8 },
    DateTime,
}

/// A single column in a target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub primary_key: bool,
}

const fn column(name: &'static str, column_type: ColumnType) -> ColumnDefinition {
    ColumnDefinition {
        name,
        column_type,
        primary_key: false,
    }
}

const fn primary(name: &'static str, column_type: ColumnType) -> ColumnDefinition {
    ColumnDefinition {
        name,
        column_type,
        primary_key: true,
    }
}

const fn varchar(length: u16) -> ColumnType {
    ColumnType::VarChar { length }
}

const MONEY: ColumnType = ColumnType::Decimal {
    precision: 10,
    scale: 2,
};

const USER_COLUMNS: &[ColumnDefinition] = &[
    primary("id", varchar(36)),
    column("username", varchar(100)),
    column("email", varchar(100)),
    column("first_name", varchar(50)),
    column("last_name", varchar(50)),
    column("phone", varchar(20)),
    column("city", varchar(50)),
    column("state", varchar(2)),
    column("country", varchar(50)),
    column("is_active", ColumnType::Bool),
    column("created_at", ColumnType::DateTime),
    column("updated_at", ColumnType::DateTime),
];

const PRODUCT_COLUMNS: &[ColumnDefinition] = &[
    primary("id", varchar(36)),
    column("sku", varchar(20)),
    column("name", varchar(100)),
    column("category", varchar(50)),
    column("price", MONEY),
    column("stock_quantity", ColumnType::Int),
    column("is_available", ColumnType::Bool),
    column("created_at", ColumnType::DateTime),
    column("updated_at", ColumnType::DateTime),
];

const ORDER_COLUMNS: &[ColumnDefinition] = &[
    primary("id", varchar(36)),
    column("order_number", varchar(20)),
    column("user_id", varchar(36)),
    column("product_id", varchar(36)),
    column("quantity", ColumnType::Int),
    column("unit_price", MONEY),
    column("subtotal", MONEY),
    column("tax", MONEY),
    column("total", MONEY),
    column("payment_method", varchar(50)),
    column("status", varchar(20)),
    column("created_at", ColumnType::DateTime),
    column("updated_at", ColumnType::DateTime),
];

/// Column layout of one target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Layout for an entity kind, under its default table name.
    pub fn for_kind(kind: EntityKind) -> Self {
        let columns = match kind {
            EntityKind::User => USER_COLUMNS,
            EntityKind::Product => PRODUCT_COLUMNS,
            EntityKind::Order => ORDER_COLUMNS,
        };
        Self {
            name: kind.table_name().to_string(),
            columns: columns.to_vec(),
        }
    }

    /// Same layout under a different table name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn primary_keys(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name)
            .collect()
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for the given dialect.
    pub fn create_table_sql(&self, dialect: SqlDialect) -> String {
        let mut defs: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let null = if c.primary_key { " NOT NULL" } else { "" };
                format!(
                    "{} {}{null}",
                    dialect.quote_identifier(c.name),
                    dialect.column_type(&c.column_type)
                )
            })
            .collect();

        let keys = self.primary_keys();
        if !keys.is_empty() {
            let quoted: Vec<String> = keys.iter().map(|k| dialect.quote_identifier(k)).collect();
            defs.push(format!("PRIMARY KEY ({})", quoted.join(", ")));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            dialect.quote_identifier(&self.name),
            defs.join(", ")
        )
    }

    /// `DROP TABLE IF EXISTS` statement for the given dialect.
    pub fn drop_table_sql(&self, dialect: SqlDialect) -> String {
        format!(
            "DROP TABLE IF EXISTS {}",
            dialect.quote_identifier(&self.name)
        )
    }
}
