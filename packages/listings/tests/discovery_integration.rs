//! Integration tests for the listing discovery flow.
//!
//! These tests drive the full path an application takes:
//! 1. Load the store from the gateway
//! 2. Derive filtered, ordered views
//! 3. Toggle interest and observe reconciled state
//! 4. Create/update/delete listings through the gateway

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use listings::testing::MockGateway;
use listings::{
    evaluate, FilterCriteria, GatewayError, InterestController, InterestState, InterestStatus,
    Listing, ListingDraft, ListingGateway, ListingId, ListingPatch, ListingStore, SortKey, UserId,
    Viewer,
};

fn listing(title: &str, location: &str, rent: f64, day: u32) -> Listing {
    Listing::new(ListingId::new(), UserId::from_raw("owner"), title)
        .with_location(location)
        .with_description(format!("{title} in {location}"))
        .with_rent(rent)
        .with_room_type("Single")
        .with_created_at(Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap())
}

fn viewer(name: &str) -> Viewer {
    Viewer::new(
        UserId::from_raw(name),
        format!("{name}@example.com"),
        name,
        "bearer-token",
    )
}

/// Helper to set up a loaded store plus its controller.
async fn setup(
    gateway: MockGateway,
) -> (
    Arc<MockGateway>,
    Arc<ListingStore<MockGateway>>,
    InterestController<MockGateway>,
) {
    let gateway = Arc::new(gateway);
    let store = Arc::new(ListingStore::new(gateway.clone()));
    store.load().await.unwrap();
    let controller = InterestController::new(gateway.clone(), store.clone());
    (gateway, store, controller)
}

#[tokio::test]
async fn test_load_then_derive_filtered_views() {
    let gateway = MockGateway::new().with_listings([
        listing("Sunny loft", "Minneapolis", 650.0, 3),
        listing("Basement room", "St Paul", 450.0, 5),
        listing("Campus double", "Minneapolis", 520.0, 1),
    ]);
    let (_, store, _) = setup(gateway).await;

    // Free-text search hits any text field, case-insensitively.
    let snapshot = store.snapshot();
    let minneapolis = evaluate(
        &snapshot,
        &FilterCriteria::new().with_search_text("minneapolis"),
    );
    assert_eq!(minneapolis.len(), 2);

    // Rent bounds compose with the other predicates.
    let affordable = evaluate(
        &snapshot,
        &FilterCriteria::new()
            .with_location("minneapolis")
            .with_max_rent(600.0)
            .sorted_by(SortKey::PriceLow),
    );
    assert_eq!(affordable.len(), 1);
    assert_eq!(affordable[0].title, "Campus double");

    // Featured view: newest first, capped.
    let featured = evaluate(&snapshot, &FilterCriteria::featured(2));
    assert_eq!(featured.len(), 2);
    assert_eq!(featured[0].title, "Basement room");

    // All-filtered-out is an empty view over a loaded store, not an error.
    let none = evaluate(&snapshot, &FilterCriteria::new().with_search_text("penthouse"));
    assert!(none.is_empty());
    assert!(!store.is_empty());
}

#[tokio::test]
async fn test_interest_toggle_feeds_back_into_views() {
    let quiet = listing("Quiet room", "Duluth", 500.0, 2);
    let popular = listing("Popular room", "Duluth", 510.0, 4).with_interest_count(2);
    let quiet_id = quiet.id.clone();
    let gateway = MockGateway::new().with_listings([quiet.clone(), popular.clone()]);
    let (_, store, controller) = setup(gateway).await;
    let alice = viewer("alice");
    let bob = viewer("bob");

    let by_interest = evaluate(
        &store.snapshot(),
        &FilterCriteria::new().sorted_by(SortKey::MostInterest),
    );
    assert_eq!(by_interest[0].title, "Popular room");

    // Two distinct viewers can hold interest at the same time.
    let state = controller.toggle(&quiet_id, Some(&alice)).await.unwrap();
    assert_eq!(
        state,
        InterestState {
            has_interest: true,
            count: 1,
            pending: false
        }
    );
    let state = controller.toggle(&quiet_id, Some(&bob)).await.unwrap();
    assert_eq!(state.count, 2);

    let state = controller.toggle(&quiet_id, Some(&alice)).await.unwrap();
    assert!(!state.has_interest);
    assert_eq!(state.count, 1);

    // The store's record was reconciled on every confirmation, and the
    // derived view reflects it without a reload.
    assert_eq!(store.get(&quiet_id).unwrap().interest_count, 1);
}

#[tokio::test]
async fn test_interest_status_round_trip_matches_gateway_truth() {
    let room = listing("Corner room", "Rochester", 700.0, 8);
    let id = room.id.clone();
    let carol = viewer("carol");
    let gateway = MockGateway::new()
        .with_listing(room)
        .with_status(&id, &carol.user_id, InterestStatus::new(5, false));
    let (_, store, controller) = setup(gateway).await;

    let before = controller.status(&id, Some(&carol)).await.unwrap();
    assert_eq!(before.count, 5);
    assert!(!before.has_interest);

    let after = controller.toggle(&id, Some(&carol)).await.unwrap();
    assert_eq!(after.count, 6);
    assert!(after.has_interest);
    assert_eq!(store.get(&id).unwrap().interest_count, 6);
}

#[tokio::test]
async fn test_create_update_delete_round_trip() {
    let (gateway, store, _) = setup(MockGateway::new()).await;

    // Create through the gateway, then publish the confirmed record.
    let draft = ListingDraft::new("New room", "Mankato", "Street parking")
        .with_rent(480.0)
        .with_room_type("Studio");
    let created = gateway.create(&draft).await.unwrap();
    store.upsert(created.clone());
    assert_eq!(store.len(), 1);

    // Update, publish, observe.
    let updated = gateway
        .update(&created.id, &ListingPatch::new().rent(520.0))
        .await
        .unwrap();
    store.upsert(updated);
    assert_eq!(store.get(&created.id).unwrap().rent_amount, Some(520.0));

    // Delete, evict, and a second delete reports NotFound.
    gateway.delete(&created.id).await.unwrap();
    store.remove(&created.id);
    assert!(store.is_empty());

    let err = gateway.delete(&created.id).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound { .. }));
}

#[tokio::test]
async fn test_store_watch_drives_reevaluation() {
    let room = listing("Watched room", "Bemidji", 430.0, 6);
    let id = room.id.clone();
    let gateway = MockGateway::new().with_listing(room);
    let (_, store, controller) = setup(gateway).await;
    let mut revisions = store.watch();

    // The initial load already counts as a change.
    assert!(*revisions.borrow_and_update() > 0);

    controller.toggle(&id, Some(&viewer("dana"))).await.unwrap();
    assert!(revisions.has_changed().unwrap());

    let view = evaluate(&store.snapshot(), &FilterCriteria::new());
    assert_eq!(view[0].interest_count, 1);
}
