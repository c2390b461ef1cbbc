// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::temp_storage;
use crate::{Bucket, Version};
use std::path::PathBuf;

const TOURNAMENT: &str = "tournaments/tour/375_vienna/2026";

#[test]
fn test_build_path_layout() {
    let (dir, storage) = temp_storage();
    let path: PathBuf = storage.build_path(Bucket::Stage, TOURNAMENT, "results.csv", None);
    assert_eq!(
        path,
        dir.path()
            .join("stage/atptour/tournaments/tour/375_vienna/2026/results.csv")
    );
}

#[test]
fn test_build_path_date_version() {
    let (_dir, storage) = temp_storage();
    let path: PathBuf = storage.build_path(
        Bucket::Raw,
        "rankings",
        "rankings_singles.html",
        Some(Version::Date),
    );
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "rankings_singles_20260121.html"
    );
}

#[test]
fn test_build_path_datetime_version() {
    let (_dir, storage) = temp_storage();
    let path: PathBuf = storage.build_path(
        Bucket::Raw,
        TOURNAMENT,
        "schedule.html",
        Some(Version::DateTime),
    );
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "schedule_20260121_093005.html"
    );
}

#[test]
fn test_build_path_version_without_extension() {
    let (_dir, storage) = temp_storage();
    let path: PathBuf = storage.build_path(Bucket::Raw, "", "snapshot", Some(Version::Date));
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "snapshot_20260121"
    );
}

#[test]
fn test_dir_without_relative_path() {
    let (dir, storage) = temp_storage();
    assert_eq!(
        storage.dir(Bucket::Analytics, ""),
        dir.path().join("analytics/atptour")
    );
}

#[test]
fn test_bucket_names() {
    let names: Vec<&str> = Bucket::ALL.iter().map(Bucket::as_str).collect();
    assert_eq!(names, vec!["raw", "stage", "analytics"]);
}
