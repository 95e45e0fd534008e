//! Core types for sql-datagen.
//!
//! This crate provides the foundational types shared by the generator, the
//! parallel coordinator and the command-line front-end:
//!
//! - [`FieldValue`] - Scalar value held by a record column
//! - [`Record`] - Closed set of record shapes (`User`, `Product`, `Order`)
//! - [`EntityKind`] / [`OperationKind`] / [`Operation`] - What to generate and how
//! - [`Statement`] - A rendered data-manipulation statement
//! - [`TableDefinition`] - Column layout and DDL for each target table
//!
//! # Architecture
//!
//! ```text
//! datagen-core (this crate)
//!    │
//!    ├─── datagen-generator  (records, rendering, batches)
//!    │
//!    └─── datagen-parallel   (partitioning, workers, accounting)
//! ```

pub mod error;
pub mod kinds;
pub mod statement;
pub mod table;
pub mod values;

// Re-exports for convenience
pub use error::GenerationError;
pub use kinds::{EntityKind, Operation, OperationKind};
pub use statement::Statement;
pub use table::{ColumnDefinition, ColumnType, SqlDialect, TableDefinition};
pub use values::{round_cents, FieldValue, Fields, Order, Product, Record, User, TAX_RATE};
