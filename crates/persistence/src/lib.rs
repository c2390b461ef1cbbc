// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! File storage for courtdata.
//!
//! Data lives in a directory tree split into three tiers:
//!
//! - `raw/`: pages and JSON documents exactly as fetched
//! - `stage/`: parsed, validated tables, one per unit of work
//! - `analytics/`: downstream datasets, not written by this workspace
//!
//! Below each tier, paths are namespaced by data-source domain and then by
//! the tournament path, e.g.
//! `stage/atptour/tournaments/tour/375_vienna/2026/results.csv`.
//!
//! ## Versioned filenames
//!
//! Artifacts fetched repeatedly carry a run timestamp in the stem:
//! `schedule_20260121_093000.html`. The staged table of a snapshot keeps the
//! same stem, which is how the pipeline tells which snapshots still need
//! staging.
//!
//! ## Tables
//!
//! Tables are CSV with a header row, read and written through `serde`.
//! Validated record types deserialize through their constructors, so reading
//! a table re-checks every row.
//!
//! ## Atomic writes
//!
//! Every write goes to `{path}.tmp` first and is renamed into place. On any
//! failure the temporary file is removed and the previous file, if there was
//! one, is left as it was.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod storage;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use storage::{Bucket, Storage, Version, matches_pattern};
