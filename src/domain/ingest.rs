//! Ingestion pipeline: turns raw delimited lines into courses and commits them to a store.
//!
//! Loading runs in three passes:
//! 1. structural parse of every line (fatal on a malformed record)
//! 2. prerequisite reference check across the batch (warnings only)
//! 3. insert of every parsed course, in input order
//!
//! Nothing reaches the store unless pass 1 succeeded for the whole batch.

use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use crate::domain::course::Course;
use crate::domain::error::DomainError;
use crate::domain::store::CourseTree;

/// Field delimiter of the catalog format.
pub const DEFAULT_DELIMITER: char = ',';

const TRIM_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

/// A prerequisite that names no course in the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingPrerequisite {
    /// Course listing the prerequisite
    pub course: String,
    /// The unknown prerequisite number
    pub prerequisite: String,
}

/// Reporting-only statistics about a loaded batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub total_courses: usize,
    /// Courses listing at least one prerequisite
    pub courses_with_prerequisites: usize,
    /// Prerequisite references across all courses, duplicates included
    pub total_prerequisites: usize,
}

impl LoadSummary {
    pub fn of<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Self {
        courses.into_iter().fold(Self::default(), |mut summary, course| {
            summary.total_courses += 1;
            if course.has_prerequisites() {
                summary.courses_with_prerequisites += 1;
                summary.total_prerequisites += course.prerequisites().len();
            }
            summary
        })
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub summary: LoadSummary,
    /// Referential warnings, in the order they were found
    pub dangling: Vec<DanglingPrerequisite>,
}

impl LoadReport {
    pub fn has_warnings(&self) -> bool {
        !self.dangling.is_empty()
    }
}

/// Splits a line on `delimiter`, trims every token and drops the empty ones.
///
/// An intentionally empty field is indistinguishable from a missing one and
/// shifts the fields after it.
pub fn tokenize(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter)
        .map(|token| token.trim_matches(TRIM_CHARS))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Reports every prerequisite that does not name a course in `courses`.
///
/// Findings are returned, not printed; callers decide how to surface them.
#[instrument(level = "debug", skip(courses), fields(courses = courses.len()))]
pub fn validate_prerequisites(courses: &[Course]) -> Vec<DanglingPrerequisite> {
    let known: HashSet<&str> = courses.iter().map(Course::number).collect();

    let mut dangling = Vec::new();
    for course in courses {
        for prerequisite in course.prerequisites() {
            if !known.contains(prerequisite.as_str()) {
                debug!(
                    course = course.number(),
                    prerequisite = prerequisite.as_str(),
                    "prerequisite does not exist in the course list"
                );
                dangling.push(DanglingPrerequisite {
                    course: course.number().to_string(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }
    }
    dangling
}

/// Parses, validates and commits course records.
#[derive(Debug, Clone, Copy)]
pub struct Ingest {
    delimiter: char,
}

impl Default for Ingest {
    fn default() -> Self {
        Self::new()
    }
}

impl Ingest {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Parses a single non-blank line. `line_no` is 1-based and only used for errors.
    pub fn parse_record(&self, line: &str, line_no: usize) -> Result<Course, DomainError> {
        let tokens = tokenize(line, self.delimiter);
        match tokens.as_slice() {
            [number, title, prerequisites @ ..] => Ok(Course::new(
                *number,
                *title,
                prerequisites.iter().map(|p| p.to_string()).collect(),
            )),
            _ => Err(DomainError::MalformedRecord {
                line: line_no,
                reason: "missing course number or title".to_string(),
            }),
        }
    }

    /// Structural pass over all records. Blank lines are skipped but still counted
    /// for line numbers. Stops at the first malformed record.
    #[instrument(level = "debug", skip(self, records))]
    pub fn parse<I, S>(&self, records: I) -> Result<Vec<Course>, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut courses = Vec::new();
        for (idx, record) in records.into_iter().enumerate() {
            let line = record.as_ref();
            if line.trim_matches(TRIM_CHARS).is_empty() {
                continue;
            }
            let course = self.parse_record(line, idx + 1)?;
            debug!(number = course.number(), "parsed course");
            courses.push(course);
        }
        Ok(courses)
    }

    /// Runs the full pipeline and inserts every course into `store`.
    ///
    /// On a structural error the store is left untouched. Dangling prerequisites
    /// are reported in the returned [`LoadReport`] and do not stop the load.
    #[instrument(level = "debug", skip(self, records, store))]
    pub fn load<I, S>(&self, records: I, store: &mut CourseTree) -> Result<LoadReport, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let courses = self.parse(records)?;

        let dangling = validate_prerequisites(&courses);
        if !dangling.is_empty() {
            info!(
                count = dangling.len(),
                "prerequisite validation issues found, continuing to load data"
            );
        }

        let summary = LoadSummary::of(&courses);
        for course in courses {
            store.insert(course);
        }
        info!(
            total = summary.total_courses,
            with_prerequisites = summary.courses_with_prerequisites,
            prerequisites = summary.total_prerequisites,
            "loaded courses"
        );

        Ok(LoadReport { summary, dangling })
    }

    /// [`load`](Self::load) reduced to its success flag.
    pub fn try_load<I, S>(&self, records: I, store: &mut CourseTree) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.load(records, store) {
            Ok(_) => true,
            Err(e) => {
                warn!("load failed: {}", e);
                false
            }
        }
    }
}
