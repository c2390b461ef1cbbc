// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod path_tests;

use crate::Storage;
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

/// Storage over a fresh temporary directory with a fixed run time.
pub fn temp_storage() -> (TempDir, Storage) {
    let dir: TempDir = TempDir::new().unwrap();
    let run: NaiveDateTime = NaiveDate::from_ymd_opt(2026, 1, 21)
        .unwrap()
        .and_hms_opt(9, 30, 5)
        .unwrap();
    let storage: Storage = Storage::at(dir.path(), "atptour", run);
    (dir, storage)
}
