//! Batch runner applying the passes to every configured file

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sqlprep_core::{Config, Dialect, FileOutcome, Report};
use crate::clean::normalize_newlines;
use crate::drops::inject_drop_statements;
use crate::error::PrepError;
use crate::split::split_seed;
use crate::tables::drop_order;

/// Tables found in one DDL file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableListing {
    /// File name as configured
    pub file: String,

    /// Dialect the file resolves to
    pub dialect: Option<Dialect>,

    /// Table names in drop order
    pub tables: Vec<String>,
}

/// Applies the DDL passes to the files named in a [`Config`]
///
/// Files are processed in config order. Missing files are skipped.
/// In dry-run mode nothing touches the disk: writes are staged in memory so a
/// later pass in the same run still sees the output of an earlier one.
pub struct Preparer<'c> {
    config: &'c Config,
    dry_run: bool,
    staged: HashMap<PathBuf, String>,
}

impl<'c> Preparer<'c> {
    /// Create a runner for a config
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            dry_run: false,
            staged: HashMap::new(),
        }
    }

    /// Compute outcomes without writing any file
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Contents a dry run would have written, keyed by path
    pub fn staged(&self) -> &HashMap<PathBuf, String> {
        &self.staged
    }

    /// Prefix every configured file with its DROP TABLE header
    pub fn inject_drops(&mut self) -> Result<Report, PrepError> {
        let config = self.config;
        let mut report = self.new_report();
        for file in &config.files {
            let outcome = self.inject_drops_file(file)?;
            report.add_outcome(outcome);
        }
        Ok(report)
    }

    /// Split every configured file into schema and seed files
    pub fn split_seeds(&mut self) -> Result<Report, PrepError> {
        let config = self.config;
        let mut report = self.new_report();
        for file in &config.files {
            let outcome = self.split_seed_file(file)?;
            report.add_outcome(outcome);
        }
        Ok(report)
    }

    /// Drop injection over all files, then the split over all files
    pub fn run_all(&mut self) -> Result<Report, PrepError> {
        let mut report = self.inject_drops()?;
        report.merge(self.split_seeds()?);
        Ok(report)
    }

    /// Tables of every existing configured file, in drop order
    pub fn list_tables(&self) -> Result<Vec<TableListing>, PrepError> {
        let mut listings = Vec::new();
        for file in &self.config.files {
            let path = self.config.file_path(file);
            let Some(content) = self.read(&path)? else {
                tracing::debug!(file = %file, "not found, skipping");
                continue;
            };

            listings.push(TableListing {
                file: file.clone(),
                dialect: self.config.dialect_for(file),
                tables: drop_order(&content),
            });
        }
        Ok(listings)
    }

    /// Drop injection for a single configured file name
    pub fn inject_drops_file(&mut self, file: &str) -> Result<FileOutcome, PrepError> {
        let path = self.config.file_path(file);
        let Some(content) = self.read(&path)? else {
            tracing::debug!(file = %file, "not found, skipping");
            return Ok(FileOutcome::skipped(file));
        };

        let dialect = self.config.dialect_for(file);
        if dialect.is_none() {
            tracing::warn!(file = %file, "no dialect matches file name; header will be empty");
        }

        let injection = inject_drop_statements(&content, dialect);
        let drops = injection.drop_count();
        let tables = injection.tables.len();
        self.write(&path, injection.output)?;

        tracing::info!(file = %file, tables, drops, "injected drop statements");

        Ok(FileOutcome::drops_injected(file, dialect, drops).with_dry_run(self.dry_run))
    }

    /// Schema/seed split for a single configured file name
    pub fn split_seed_file(&mut self, file: &str) -> Result<FileOutcome, PrepError> {
        let path = self.config.file_path(file);
        let Some(content) = self.read(&path)? else {
            tracing::debug!(file = %file, "not found, skipping");
            return Ok(FileOutcome::skipped(file));
        };

        let Some(split) = split_seed(&content, &self.config.split.marker) else {
            tracing::info!(file = %file, marker = %self.config.split.marker, "no seed marker");
            return Ok(FileOutcome::no_seed_data(file).with_dry_run(self.dry_run));
        };

        let seed_name = self.config.split.seed_file_name(file);
        let seed_path = self.config.file_path(&seed_name);
        if seed_path == path {
            return Err(PrepError::SeedNameCollision { path });
        }

        let schema = split.schema_file_contents();
        let seed = split.seed_file_contents();

        // Seed first: if it cannot be written the DDL file still holds the data
        self.write(&seed_path, seed)?;
        self.write(&path, schema)?;

        tracing::info!(file = %file, seed_file = %seed_name, "split seed data");

        Ok(FileOutcome::split(file, seed_name).with_dry_run(self.dry_run))
    }

    fn new_report(&self) -> Report {
        let mut report = Report::new();
        report.dry_run = self.dry_run;
        report
    }

    fn read(&self, path: &Path) -> Result<Option<String>, PrepError> {
        if let Some(staged) = self.staged.get(path) {
            return Ok(Some(staged.clone()));
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(normalize_newlines(&content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PrepError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn write(&mut self, path: &Path, contents: String) -> Result<(), PrepError> {
        if self.dry_run {
            tracing::debug!(path = %path.display(), bytes = contents.len(), "dry run, staging write");
            self.staged.insert(path.to_path_buf(), contents);
            return Ok(());
        }

        std::fs::write(path, contents).map_err(|source| PrepError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
