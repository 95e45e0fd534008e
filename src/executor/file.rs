//! File executor: writes each statement as one line instead of running it.

use super::{ExecutorError, StatementExecutor};
use async_trait::async_trait;
use datagen_core::SqlDialect;
use datagen_parallel::ExecutionOutcome;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

pub struct FileExecutor {
    writer: Box<dyn Write + Send>,
    dialect: SqlDialect,
    lines_written: u64,
}

impl FileExecutor {
    /// Write to `path`, truncating it.
    pub fn create(path: &Path, dialect: SqlDialect) -> Result<Self, ExecutorError> {
        let file = File::create(path)?;
        Ok(Self::from_writer(Box::new(BufWriter::new(file)), dialect))
    }

    pub fn stdout(dialect: SqlDialect) -> Self {
        Self::from_writer(Box::new(BufWriter::new(io::stdout())), dialect)
    }

    pub fn from_writer(writer: Box<dyn Write + Send>, dialect: SqlDialect) -> Self {
        Self {
            writer,
            dialect,
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.lines_written += 1;
        Ok(())
    }
}

#[async_trait]
impl StatementExecutor for FileExecutor {
    fn name(&self) -> &'static str {
        "file"
    }

    fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    async fn execute(&mut self, statement: &str) -> ExecutionOutcome {
        let start = Instant::now();
        match self.write_line(statement) {
            Ok(()) => ExecutionOutcome::succeeded(1, start.elapsed()),
            Err(e) => ExecutionOutcome::failed(e.to_string(), start.elapsed()),
        }
    }

    async fn execute_ddl(&mut self, sql: &str) -> Result<(), ExecutorError> {
        self.write_line(&format!("{sql};"))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ExecutorError> {
        self.writer.flush()?;
        Ok(())
    }
}
