//! Testing utilities for codepeek.
//!
//! This module provides:
//! - Stub fetchers and a recording renderer
//! - Assertions on preview outcomes
//! - Canned HTML pages

mod assertions;
pub mod fixtures;
mod mocks;

pub use assertions::{assert_failed, assert_language, assert_rendered, assert_skipped};
pub use mocks::{FailingFetcher, RecordingTarget, StaticFetcher, StaticPrivilegedFetcher};
