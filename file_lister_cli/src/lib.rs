//! File Lister command line support
//!
//! Configuration, error reporting and output rendering for the
//! `file-lister` binary.

pub mod config;
pub mod error;
pub mod output;
