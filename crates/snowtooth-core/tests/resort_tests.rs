//! End-to-end tests for the resort context.
//!
//! These drive [`Resort`] the way the API layer does: queries, status
//! changes, and subscriptions against one shared store.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::time::Duration;

use futures::StreamExt;
use snowtooth_core::{ActivitySource, EntityKind, EntityStore, Resort, ResortError, Seed};
use snowtooth_types::{Lift, LiftId, LiftStatus, Trail, TrailId, TrailStatus};

fn panorama_store() -> EntityStore {
    let lifts = vec![
        Lift {
            id: LiftId::new("panorama"),
            name: String::from("Panorama"),
            status: LiftStatus::Open,
            capacity: 6,
            night: false,
            elevation_gain: 2500,
            trails: vec![TrailId::new("sundance"), TrailId::new("panorama-trail")],
        },
        Lift {
            id: LiftId::new("summit"),
            name: String::from("Summit"),
            status: LiftStatus::Open,
            capacity: 4,
            night: false,
            elevation_gain: 600,
            trails: vec![TrailId::new("panorama-trail")],
        },
    ];
    let trails = vec![Trail {
        id: TrailId::new("panorama-trail"),
        name: String::from("Panorama Trail"),
        status: Some(TrailStatus::Closed),
        difficulty: String::from("expert"),
        groomed: false,
        trees: true,
        night: false,
        lifts: vec![LiftId::new("panorama"), LiftId::new("summit")],
    }];
    EntityStore::new(lifts, trails).unwrap()
}

fn builtin_resort() -> Resort {
    Resort::new(
        Seed::builtin().unwrap().into_store().unwrap(),
        ActivitySource::Disabled,
    )
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn panorama_hold_example() {
    let resort = Resort::new(panorama_store(), ActivitySource::Disabled);
    let panorama = LiftId::new("panorama");

    let updated = resort
        .mutations()
        .set_lift_status(&panorama, LiftStatus::Hold)
        .await
        .unwrap();
    assert_eq!(updated.status, LiftStatus::Hold);

    let open = resort.queries().list_lifts(Some(LiftStatus::Open)).await;
    assert!(open.iter().all(|l| l.id != panorama));
    assert_eq!(resort.queries().count_lifts(LiftStatus::Hold).await, 1);

    let view = resort.queries().lift_view(&panorama).await.unwrap();
    let ids: Vec<&str> = view.trail_access.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["panorama-trail"]);
}

#[tokio::test]
async fn get_by_id_is_exact_for_every_entity() {
    let resort = builtin_resort();
    let q = resort.queries();
    for lift in q.list_lifts(None).await {
        assert_eq!(q.get_lift(&lift.id).await.unwrap(), lift);
    }
    for trail in q.list_trails(None).await {
        assert_eq!(q.get_trail(&trail.id).await.unwrap(), trail);
    }
}

#[tokio::test]
async fn unknown_ids_are_not_found_and_mutate_nothing() {
    let resort = builtin_resort();
    let before_lifts = resort.queries().list_lifts(None).await;
    let before_trails = resort.queries().list_trails(None).await;

    let err = resort
        .mutations()
        .set_trail_status(&TrailId::new("astra-express"), TrailStatus::Closed)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ResortError::NotFound {
            kind: EntityKind::Trail,
            id: String::from("astra-express"),
        }
    );
    assert!(resort.queries().get_lift(&LiftId::new("blue-bird")).await.is_err());

    assert_eq!(resort.queries().list_lifts(None).await, before_lifts);
    assert_eq!(resort.queries().list_trails(None).await, before_trails);
}

#[tokio::test]
async fn every_prior_subscriber_sees_the_change() {
    let resort = builtin_resort();
    let mut first = resort.subscribe_lift_status_change();
    let mut second = resort.subscribe_lift_status_change();

    let updated = resort
        .mutations()
        .set_lift_status(&LiftId::new("jazz-cat"), LiftStatus::Open)
        .await
        .unwrap();

    assert_eq!(first.next().await.unwrap(), updated);
    assert_eq!(second.next().await.unwrap(), updated);
    assert_eq!(
        resort.queries().get_lift(&LiftId::new("jazz-cat")).await.unwrap().status,
        LiftStatus::Open
    );
}

#[tokio::test]
async fn late_subscriber_gets_no_replay() {
    let resort = builtin_resort();
    resort
        .mutations()
        .set_lift_status(&LiftId::new("summit"), LiftStatus::Hold)
        .await
        .unwrap();

    let mut late = resort.subscribe_lift_status_change();
    let waited = tokio::time::timeout(Duration::from_millis(50), late.next()).await;
    assert!(waited.is_err(), "late subscriber received a past event");
}

#[tokio::test]
async fn subscriber_in_another_task_is_woken() {
    let resort = builtin_resort();
    let mut stream = resort.subscribe_trail_status_change();

    let consumer = tokio::spawn(async move { stream.next().await });

    resort
        .mutations()
        .set_trail_status(&TrailId::new("big-easy"), TrailStatus::Closed)
        .await
        .unwrap();

    let trail = consumer.await.unwrap().unwrap();
    assert_eq!(trail.id.as_str(), "big-easy");
    assert_eq!(trail.status, Some(TrailStatus::Closed));
}

#[tokio::test]
async fn counts_track_mutations() {
    let resort = builtin_resort();
    let q = resort.queries();
    let open_before = q.count_trails(TrailStatus::Open).await;

    resort
        .mutations()
        .set_trail_status(&TrailId::new("blue-bird"), TrailStatus::Closed)
        .await
        .unwrap();

    assert_eq!(q.count_trails(TrailStatus::Open).await, open_before - 1);
    assert_eq!(
        q.count_trails(TrailStatus::Closed).await,
        q.list_trails(Some(TrailStatus::Closed)).await.len()
    );
}
