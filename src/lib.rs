//! advisor: an in-memory course catalog.
//!
//! Course records are read from a delimited text file, validated, and stored in
//! an ordered binary search tree keyed by course number. The catalog supports
//! ordered listing and exact lookup with prerequisite resolution.
//!
//! Layers, innermost first:
//! - [`domain`]: course entity, ordered store, ingestion pipeline (no I/O)
//! - [`application`]: catalog service, errors
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing, commands, interactive menu

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
