//! Domain layer: course entities, the ordered course store and the ingestion pipeline
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod course;
pub mod error;
pub mod ingest;
pub mod store;

pub use course::Course;
pub use error::DomainError;
pub use ingest::{
    tokenize, validate_prerequisites, DanglingPrerequisite, Ingest, LoadReport, LoadSummary,
    DEFAULT_DELIMITER,
};
pub use store::{CourseTree, InOrder, TreeRender, MAX_RENDER_DEPTH};
