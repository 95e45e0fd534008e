//! Batch statement generation.

use crate::generator::RecordGenerator;
use crate::render::StatementRenderer;
use datagen_core::{EntityKind, GenerationError, Operation, OperationKind, Statement};
use rand::Rng;

/// Produces batches of rendered statements for one entity kind at a time.
///
/// Calling [`generate_batch`](Self::generate_batch) twice yields two fresh,
/// independently random batches: the underlying stream keeps advancing.
pub struct BatchGenerator {
    generator: RecordGenerator,
    renderer: StatementRenderer,
    table: Option<String>,
}

impl BatchGenerator {
    /// Create a batch generator with its own seeded record generator.
    pub fn new(seed: u64) -> Self {
        Self::from_generator(RecordGenerator::new(seed))
    }

    pub fn from_generator(generator: RecordGenerator) -> Self {
        Self {
            generator,
            renderer: StatementRenderer::new(),
            table: None,
        }
    }

    /// Write to `table` instead of the entity kind's default table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_renderer(mut self, renderer: StatementRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Table statements for `kind` are rendered against.
    pub fn table_for(&self, kind: EntityKind) -> &str {
        self.table.as_deref().unwrap_or_else(|| kind.table_name())
    }

    pub fn generator(&self) -> &RecordGenerator {
        &self.generator
    }

    /// Generate `count` statements of `kind`.
    ///
    /// With [`OperationKind::RandomMix`] the operation is drawn uniformly
    /// from insert/update/delete for each record; any other kind applies the
    /// same operation to the whole batch.
    pub fn generate_batch(
        &mut self,
        kind: EntityKind,
        count: u64,
        operation: OperationKind,
    ) -> Vec<Statement> {
        self.statements(kind, count, operation).collect()
    }

    /// String-keyed entry point used at the CLI/config boundary.
    pub fn generate_batch_named(
        &mut self,
        kind: &str,
        count: u64,
        operation: &str,
    ) -> Result<Vec<Statement>, GenerationError> {
        let kind: EntityKind = kind.parse()?;
        let operation: OperationKind = operation.parse()?;
        Ok(self.generate_batch(kind, count, operation))
    }

    /// Lazily generate `count` statements.
    pub fn statements(
        &mut self,
        kind: EntityKind,
        count: u64,
        operation: OperationKind,
    ) -> StatementIterator<'_> {
        StatementIterator {
            batch: self,
            kind,
            operation,
            remaining: count,
        }
    }

    /// Generate a single statement.
    pub fn next_statement(&mut self, kind: EntityKind, operation: OperationKind) -> Statement {
        let record = self.generator.generate(kind);
        let operation = self.resolve(operation);
        let table = self.table.as_deref().unwrap_or_else(|| kind.table_name());
        self.renderer.render(table, &record, operation)
    }

    fn resolve(&mut self, operation: OperationKind) -> Operation {
        match operation.fixed() {
            Some(op) => op,
            None => {
                let idx = self.generator.rng_mut().random_range(0..Operation::ALL.len());
                Operation::ALL[idx]
            }
        }
    }
}

/// Iterator that lazily generates statements.
pub struct StatementIterator<'a> {
    batch: &'a mut BatchGenerator,
    kind: EntityKind,
    operation: OperationKind,
    remaining: u64,
}

impl Iterator for StatementIterator<'_> {
    type Item = Statement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.batch.next_statement(self.kind, self.operation))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StatementIterator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn batch(seed: u64) -> BatchGenerator {
        let anchor = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        BatchGenerator::from_generator(RecordGenerator::new(seed).with_anchor(anchor))
    }

    #[test]
    fn test_batch_count() {
        let mut batch = batch(42);
        for count in [0u64, 1, 7, 250] {
            for kind in EntityKind::ALL {
                let statements = batch.generate_batch(kind, count, OperationKind::Insert);
                assert_eq!(statements.len() as u64, count);
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut batch = batch(42);
        let statements = batch
            .generate_batch_named("user", 0, "insert")
            .unwrap();
        assert!(statements.is_empty());
    }

    #[test]
    fn test_fixed_operation_applies_to_all() {
        let mut batch = batch(42);
        let statements = batch.generate_batch(EntityKind::Product, 50, OperationKind::Update);
        assert!(statements
            .iter()
            .all(|s| s.operation() == Operation::Update
                && s.as_str().starts_with("UPDATE products SET ")));

        let statements = batch.generate_batch(EntityKind::User, 50, OperationKind::Delete);
        assert!(statements
            .iter()
            .all(|s| s.as_str().starts_with("DELETE FROM users WHERE id='")));
    }

    #[test]
    fn test_unknown_kind() {
        let mut batch = batch(42);
        let result = batch.generate_batch_named("invalid", 5, "insert");
        assert!(matches!(result, Err(GenerationError::UnknownKind(k)) if k == "invalid"));
    }

    #[test]
    fn test_unknown_operation() {
        let mut batch = batch(42);
        let result = batch.generate_batch_named("user", 5, "invalid");
        assert!(matches!(result, Err(GenerationError::UnknownOperation(op)) if op == "invalid"));
    }

    #[test]
    fn test_random_mix_covers_all_operations() {
        let mut batch = batch(11);
        let statements = batch.generate_batch(EntityKind::Order, 1000, OperationKind::RandomMix);

        for prefix in ["INSERT INTO orders", "UPDATE orders", "DELETE FROM orders"] {
            assert!(
                statements.iter().any(|s| s.as_str().starts_with(prefix)),
                "no statement starting with {prefix}"
            );
        }
        for stmt in &statements {
            assert!(stmt.as_str().starts_with(stmt.operation().keyword()));
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let mut batch1 = batch(99);
        let mut batch2 = batch(99);
        assert_eq!(
            batch1.generate_batch(EntityKind::Order, 20, OperationKind::RandomMix),
            batch2.generate_batch(EntityKind::Order, 20, OperationKind::RandomMix)
        );
    }

    #[test]
    fn test_repeated_calls_are_fresh() {
        let mut batch = batch(5);
        let first = batch.generate_batch(EntityKind::User, 5, OperationKind::Insert);
        let second = batch.generate_batch(EntityKind::User, 5, OperationKind::Insert);
        assert_ne!(first, second);
    }

    #[test]
    fn test_table_override() {
        let mut batch = batch(42).with_table("customers");
        assert_eq!(batch.table_for(EntityKind::User), "customers");

        let statements = batch.generate_batch(EntityKind::User, 3, OperationKind::Insert);
        assert!(statements
            .iter()
            .all(|s| s.as_str().starts_with("INSERT INTO customers (")));
    }

    #[test]
    fn test_iterator_is_lazy_and_exact() {
        let mut batch = batch(42);
        let mut iter = batch.statements(EntityKind::Product, 3, OperationKind::Insert);
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        drop(iter);
        assert_eq!(batch.generator().generated_count(), 1);
    }
}
