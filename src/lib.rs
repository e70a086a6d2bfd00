//! Pre-indexing filter for extracted package trees.
//!
//! [`filters::FilterConfig`] holds the blacklists, built once from comma-separated lists.
//! [`classifier::classify`] decides per entry whether it should be deleted from the working copy
//! and skipped during indexing. [`walker`] drives the classifier over a directory tree.

pub mod builtins;
pub mod classifier;
pub mod config;
pub mod disksize;
pub mod filters;
pub mod walker;

pub use classifier::{FileEntry, Reason, classify, explain};
pub use filters::FilterConfig;
