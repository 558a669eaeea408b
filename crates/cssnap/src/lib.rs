//! Batch driver for the value-optimization engine: command-line parsing and
//! the filesystem walker that feeds stylesheet files through the rewriter.

#![forbid(unsafe_code)]

pub mod cli;
pub mod walk;
