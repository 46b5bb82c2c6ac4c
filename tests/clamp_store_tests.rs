mod common;
use clampkeeper::db::appeals::create_appeal;
use clampkeeper::db::clamps::{
    create_clamp, delete_clamp, get_clamp, list_clamps, update_clamp,
};
use clampkeeper::errors::AppError;
use clampkeeper::models::{ClampFilter, ClampPatch, NewAppeal, PaymentStatus};
use common::{date, main_st_clamp, open_store, time};

#[test]
fn test_create_then_get_returns_the_input() {
    let pool = open_store("clamp_create_get");

    let mut input = main_st_clamp();
    input.registration = "CA 987-654".into();
    input.time_released = Some(time("11:45"));
    input.color = "Blue".into();

    let id = create_clamp(&pool.conn, &input).unwrap();
    let got = get_clamp(&pool.conn, id).unwrap();

    assert_eq!(got.id, id);
    assert_eq!(got.location, input.location);
    assert_eq!(got.registration, input.registration);
    assert_eq!(got.clamp_date, input.clamp_date);
    assert_eq!(got.time_in, input.time_in);
    assert_eq!(got.time_released, input.time_released);
    assert_eq!(got.offense, input.offense);
    assert_eq!(got.payment_status, PaymentStatus::Processing);
    assert_eq!(got.color, "Blue");
    assert_eq!(got.car_type, "");
    assert!(!got.created_at.is_empty());
}

#[test]
fn test_blank_required_field_is_rejected_without_insert() {
    let pool = open_store("clamp_blank_required");

    let mut input = main_st_clamp();
    input.offense = "  ".into();

    let err = create_clamp(&pool.conn, &input).unwrap_err();
    assert!(matches!(err, AppError::MissingField("offense")));
    assert!(list_clamps(&pool.conn, None).unwrap().is_empty());
}

#[test]
fn test_delete_then_get_is_not_found() {
    let pool = open_store("clamp_delete_get");

    let id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    delete_clamp(&pool.conn, id).unwrap();

    let err = get_clamp(&pool.conn, id).unwrap_err();
    assert!(err.is_not_found());

    let err = delete_clamp(&pool.conn, id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_paid_filter_tracks_payment_status_updates() {
    let pool = open_store("clamp_paid_filter");

    let id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    let paid = Some(ClampFilter::PaymentStatus(PaymentStatus::Paid));

    let before = list_clamps(&pool.conn, paid).unwrap();
    assert!(before.iter().all(|c| c.id != id));

    let patch = ClampPatch {
        payment_status: Some(PaymentStatus::Paid),
        ..ClampPatch::default()
    };
    let updated = update_clamp(&pool.conn, id, &patch).unwrap();
    assert_eq!(updated.payment_status, PaymentStatus::Paid);

    let after = list_clamps(&pool.conn, paid).unwrap();
    assert!(after.iter().any(|c| c.id == id));
}

#[test]
fn test_partial_update_leaves_other_fields_unchanged() {
    let pool = open_store("clamp_partial_update");

    let mut input = main_st_clamp();
    input.time_released = Some(time("10:30"));
    let id = create_clamp(&pool.conn, &input).unwrap();

    let patch = ClampPatch {
        location: Some("High St".into()),
        ..ClampPatch::default()
    };
    let updated = update_clamp(&pool.conn, id, &patch).unwrap();

    assert_eq!(updated.location, "High St");
    assert_eq!(updated.offense, "No permit");
    assert_eq!(updated.time_released, Some(time("10:30")));

    // A full overwrite can clear the release time again.
    let mut overwrite = main_st_clamp();
    overwrite.time_released = None;
    let cleared = update_clamp(&pool.conn, id, &ClampPatch::from(overwrite)).unwrap();
    assert_eq!(cleared.time_released, None);
    assert_eq!(cleared.location, "Main St");
}

#[test]
fn test_update_missing_clamp_is_not_found() {
    let pool = open_store("clamp_update_missing");

    let patch = ClampPatch {
        offense: Some("Double parking".into()),
        ..ClampPatch::default()
    };
    assert!(update_clamp(&pool.conn, 4242, &patch).unwrap_err().is_not_found());
}

#[test]
fn test_list_is_in_insertion_order_and_ids_are_not_reused() {
    let pool = open_store("clamp_order_ids");

    let mut a = main_st_clamp();
    a.clamp_date = date("2024-03-01");
    let mut b = main_st_clamp();
    b.clamp_date = date("2024-01-15");

    let id_a = create_clamp(&pool.conn, &a).unwrap();
    let id_b = create_clamp(&pool.conn, &b).unwrap();

    let ids: Vec<i64> = list_clamps(&pool.conn, None)
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![id_a, id_b]);

    delete_clamp(&pool.conn, id_b).unwrap();
    let id_c = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    assert!(id_c > id_b);
}

#[test]
fn test_clamp_with_appeals_cannot_be_deleted() {
    let pool = open_store("clamp_delete_with_appeal");

    let id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    create_appeal(
        &pool.conn,
        &NewAppeal::new(id, date("2024-01-02"), "Signage was missing"),
    )
    .unwrap();

    let err = delete_clamp(&pool.conn, id).unwrap_err();
    assert!(matches!(err, AppError::ClampHasAppeals(x) if x == id));
    assert!(get_clamp(&pool.conn, id).is_ok());
}

#[test]
fn test_unknown_status_in_store_is_reported_not_accepted() {
    let pool = open_store("clamp_bad_status_row");

    let id = create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    pool.conn
        .execute(
            "UPDATE clamp_data SET payment_status = 'Waived' WHERE id = ?1",
            [id],
        )
        .unwrap();

    let err = get_clamp(&pool.conn, id).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
}
