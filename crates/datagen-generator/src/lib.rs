//! Record generator and statement renderer for sql-datagen.
//!
//! This crate provides the [`RecordGenerator`], which produces deterministic
//! fake users, products and orders from a seeded RNG, the
//! [`StatementRenderer`], which turns a record into literal SQL text, and the
//! [`BatchGenerator`], which combines the two.
//!
//! # Architecture
//!
//! ```text
//!   EntityKind + OperationKind
//!          │
//!          ▼
//! ┌──────────────────┐      ┌───────────────────┐
//! │  RecordGenerator │─────▶│ StatementRenderer │
//! │                  │Record│                   │
//! │  - seed          │      │  - id_column      │
//! │  - rng (StdRng)  │      └─────────┬─────────┘
//! │  - anchor        │                │
//! └──────────────────┘                ▼
//!                          Statement { operation, text }
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagen_core::{EntityKind, OperationKind};
//! use datagen_generator::BatchGenerator;
//!
//! let mut batch = BatchGenerator::new(42);
//! let statements = batch.generate_batch(EntityKind::User, 3, OperationKind::Insert);
//! assert_eq!(statements.len(), 3);
//! assert!(statements[0].as_str().starts_with("INSERT INTO users ("));
//! ```

pub mod batch;
pub mod generator;
pub mod generators;
pub mod render;

// Re-exports for convenience
pub use batch::{BatchGenerator, StatementIterator};
pub use generator::RecordGenerator;
pub use render::{
    format_value, quote_text, render_delete, render_insert, render_update, split_values,
    StatementRenderer, DEFAULT_ID_COLUMN,
};
