//! Graph materialization bounded context
//!
//! Pure domain model and services that turn a project's occurrence inventory
//! into a deduplicated ancestor/descendant closure table. Nothing in here
//! performs I/O.
pub mod domain;
pub mod services;
