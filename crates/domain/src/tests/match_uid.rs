// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Round, create_match_uid};

#[test]
fn test_uid_format() {
    let uid: String = create_match_uid(2026, 375, Round::R16, "AB12", "CD34", false).unwrap();
    assert_eq!(uid, "2026_375_SGL_R16_AB12_CD34");
}

#[test]
fn test_uid_is_symmetric() {
    let pairs: [(&str, &str); 3] = [("AB12", "CD34"), ("z9z9", "A0A0"), ("M0UR", "m0ur")];
    for round in Round::ALL {
        for (a, b) in pairs {
            for doubles in [false, true] {
                let forward: String = create_match_uid(2026, 580, round, a, b, doubles).unwrap();
                let backward: String = create_match_uid(2026, 580, round, b, a, doubles).unwrap();
                assert_eq!(forward, backward);
                assert_eq!(
                    forward,
                    create_match_uid(2026, 580, round, a, b, doubles).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_uid_uppercases_ids() {
    let uid: String = create_match_uid(2026, 9158, Round::Final, "cd34", "ab12", true).unwrap();
    assert_eq!(uid, "2026_9158_DBL_F_AB12_CD34");
}

#[test]
fn test_uid_rejects_space_with_hint() {
    let err: DomainError =
        create_match_uid(2026, 375, Round::QuarterFinal, "AB 2", "CD34", false).unwrap_err();
    match err {
        DomainError::InvalidMatchUid { hint, .. } => {
            assert!(hint.unwrap().contains("4-character"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_uid_rejects_competitor_id_with_correction_hint() {
    let err: DomainError = create_match_uid(
        2026,
        580,
        Round::Q1,
        "SR:COMPETITOR:999999",
        "CD34",
        false,
    )
    .unwrap_err();
    let message: String = err.to_string();
    assert!(message.contains("correction"));
    assert!(message.contains("SR:COMPETITOR:999999"));
}
