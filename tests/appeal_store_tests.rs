mod common;
use clampkeeper::db::appeals::{
    count_appeals_for_clamp, create_appeal, delete_appeal, get_appeal, list_appeals,
    list_appeals_for_clamp, list_appeals_with_clamp, update_appeal,
};
use clampkeeper::db::clamps::create_clamp;
use clampkeeper::errors::AppError;
use clampkeeper::models::{AppealPatch, AppealStatus, NewAppeal};
use common::{date, main_st_clamp, open_store};

#[test]
fn test_appeal_round_trip_with_defaults() {
    let pool = open_store("appeal_round_trip");
    let clamp_id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();

    let id = create_appeal(
        &pool.conn,
        &NewAppeal::new(clamp_id, date("2024-01-03"), "Was loading goods"),
    )
    .unwrap();

    let a = get_appeal(&pool.conn, id).unwrap();
    assert_eq!(a.clamp_id, clamp_id);
    assert_eq!(a.appeal_date, date("2024-01-03"));
    assert_eq!(a.appeal_reason, "Was loading goods");
    assert_eq!(a.appeal_status, AppealStatus::Pending);
    assert_eq!(a.notes, None);
}

#[test]
fn test_appeal_requires_existing_clamp() {
    let pool = open_store("appeal_missing_clamp");

    let err = create_appeal(&pool.conn, &NewAppeal::new(99, date("2024-01-03"), "x")).unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Clamp", id: 99 }));
    assert!(list_appeals(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_update_status_and_clear_notes() {
    let pool = open_store("appeal_update");
    let clamp_id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();

    let mut new = NewAppeal::new(clamp_id, date("2024-01-03"), "Medical emergency");
    new.notes = Some("Doctor's note attached".into());
    let id = create_appeal(&pool.conn, &new).unwrap();

    let patch = AppealPatch {
        appeal_status: Some(AppealStatus::Approved),
        notes: Some(None),
        ..AppealPatch::default()
    };
    let updated = update_appeal(&pool.conn, id, &patch).unwrap();

    assert_eq!(updated.appeal_status, AppealStatus::Approved);
    assert_eq!(updated.notes, None);
    assert_eq!(updated.appeal_reason, "Medical emergency");
}

#[test]
fn test_update_to_unknown_clamp_is_rejected() {
    let pool = open_store("appeal_update_bad_clamp");
    let clamp_id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    let id = create_appeal(&pool.conn, &NewAppeal::new(clamp_id, date("2024-01-03"), "x")).unwrap();

    let patch = AppealPatch {
        clamp_id: Some(clamp_id + 100),
        ..AppealPatch::default()
    };
    assert!(update_appeal(&pool.conn, id, &patch).unwrap_err().is_not_found());
    assert_eq!(get_appeal(&pool.conn, id).unwrap().clamp_id, clamp_id);
}

#[test]
fn test_listing_by_clamp_and_joined_view() {
    let pool = open_store("appeal_listing");

    let mut other = main_st_clamp();
    other.location = "Station Rd".into();
    other.registration = "CY 42".into();

    let c1 = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    let c2 = create_clamp(&pool.conn, &other).unwrap();

    create_appeal(&pool.conn, &NewAppeal::new(c1, date("2024-01-03"), "first")).unwrap();
    create_appeal(&pool.conn, &NewAppeal::new(c2, date("2024-01-04"), "second")).unwrap();
    create_appeal(&pool.conn, &NewAppeal::new(c2, date("2024-01-05"), "third")).unwrap();

    assert_eq!(count_appeals_for_clamp(&pool.conn, c2).unwrap(), 2);

    let for_c2 = list_appeals_for_clamp(&pool.conn, c2).unwrap();
    let reasons: Vec<&str> = for_c2.iter().map(|a| a.appeal_reason.as_str()).collect();
    assert_eq!(reasons, vec!["second", "third"]);

    let joined = list_appeals_with_clamp(&pool.conn).unwrap();
    assert_eq!(joined.len(), 3);
    assert_eq!(joined[1].location, "Station Rd");
    assert_eq!(joined[1].registration, "CY 42");
}

#[test]
fn test_delete_appeal_then_clamp() {
    let pool = open_store("appeal_delete");
    let clamp_id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    let id = create_appeal(&pool.conn, &NewAppeal::new(clamp_id, date("2024-01-03"), "x")).unwrap();

    delete_appeal(&pool.conn, id).unwrap();
    assert!(get_appeal(&pool.conn, id).unwrap_err().is_not_found());
    assert!(delete_appeal(&pool.conn, id).unwrap_err().is_not_found());

    // No appeals left, so the clamp can go.
    clampkeeper::db::clamps::delete_clamp(&pool.conn, clamp_id).unwrap();
}
