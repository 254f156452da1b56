//! Course catalog service
//!
//! Owns the currently published course store. Loading always builds a fresh
//! store and replaces the published one only after the whole pipeline succeeded,
//! so callers never observe a half-populated catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Course, CourseTree, Ingest, LoadReport, LoadSummary};
use crate::infrastructure::traits::FileSystem;

/// A prerequisite resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrerequisite {
    pub number: String,
    /// Title of the prerequisite, `None` when it is not in the catalog
    pub title: Option<String>,
}

/// A course together with its resolved prerequisites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetail {
    pub course: Course,
    pub prerequisites: Vec<ResolvedPrerequisite>,
}

/// Shape and content statistics of the published catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub courses: usize,
    pub depth: usize,
    pub summary: LoadSummary,
}

/// Service for loading and querying the course catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    catalog: Option<CourseTree>,
    source: Option<PathBuf>,
}

impl CatalogService {
    /// Create a catalog service with nothing loaded.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self {
            fs,
            settings,
            catalog: None,
            source: None,
        }
    }

    fn ingest(&self) -> Ingest {
        Ingest::with_delimiter(self.settings.delimiter)
    }

    /// Load the configured default course file.
    pub fn reload_default(&mut self) -> ApplicationResult<LoadReport> {
        let path = self.settings.catalog_path.clone();
        self.reload(&path)
    }

    /// Read `path` and replace the published catalog with its contents.
    ///
    /// If the file cannot be read or holds a malformed record, the previously
    /// published catalog (if any) stays in place.
    #[instrument(level = "debug", skip(self))]
    pub fn reload(&mut self, path: &Path) -> ApplicationResult<LoadReport> {
        info!("loading course data from file: {}", path.display());
        let lines = self.fs.read_lines(path).source_context(path)?;
        let report = self.load_records(lines)?;
        self.source = Some(path.to_path_buf());
        Ok(report)
    }

    /// Replace the published catalog with already-read records.
    #[instrument(level = "debug", skip(self, records))]
    pub fn load_records<I, S>(&mut self, records: I) -> ApplicationResult<LoadReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fresh = CourseTree::new();
        let report = self.ingest().load(records, &mut fresh)?;
        debug!(courses = fresh.len(), "publishing catalog");
        self.catalog = Some(fresh);
        self.source = None;
        Ok(report)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// The published catalog, if a load has succeeded.
    pub fn catalog(&self) -> Option<&CourseTree> {
        self.catalog.as_ref()
    }

    /// File the published catalog was read from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn loaded(&self) -> ApplicationResult<&CourseTree> {
        self.catalog.as_ref().ok_or(ApplicationError::NotLoaded)
    }

    /// All courses in ascending course-number order.
    pub fn list(&self) -> ApplicationResult<Vec<&Course>> {
        Ok(self.loaded()?.iter().collect())
    }

    /// Normalize user input into a lookup key.
    pub fn normalize_key(&self, input: &str) -> String {
        let key = input.trim();
        if self.settings.lookup.uppercase {
            key.to_uppercase()
        } else {
            key.to_string()
        }
    }

    /// Look up a course and resolve the titles of its prerequisites.
    ///
    /// Returns `Ok(None)` when the course does not exist. Prerequisites missing
    /// from the catalog resolve with `title: None`.
    #[instrument(level = "debug", skip(self))]
    pub fn describe(&self, number: &str) -> ApplicationResult<Option<CourseDetail>> {
        let catalog = self.loaded()?;
        let key = self.normalize_key(number);

        let Some(course) = catalog.search(&key) else {
            debug!(key = %key, "course not found");
            return Ok(None);
        };

        let prerequisites = course
            .prerequisites()
            .iter()
            .map(|prereq| ResolvedPrerequisite {
                number: prereq.clone(),
                title: catalog.search(prereq).map(|c| c.title().to_string()),
            })
            .collect();

        Ok(Some(CourseDetail {
            course: course.clone(),
            prerequisites,
        }))
    }

    /// Statistics of the published catalog.
    pub fn stats(&self) -> ApplicationResult<CatalogStats> {
        let catalog = self.loaded()?;
        Ok(CatalogStats {
            courses: catalog.len(),
            depth: catalog.depth(),
            summary: LoadSummary::of(catalog),
        })
    }
}
