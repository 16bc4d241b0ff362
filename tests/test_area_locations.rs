mod helpers;

use presensi::api::middleware::ApiError;
use presensi::models::*;
use presensi::services::area_service;

async fn seed_location(store: &presensi::store::MemoryStore, name: &str) -> Location {
    area_service::create_location(
        store,
        CreateLocationRequest {
            name: name.to_string(),
            latitude: -6.2,
            longitude: 106.8,
            radius: 100.0,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_create_area_points_locations_back() {
    let store = helpers::test_store();
    let location = seed_location(&store, "Kantor Pusat").await;

    let area = area_service::create_area(
        store.as_ref(),
        CreateAreaRequest {
            name: "Jakarta".to_string(),
            location_ids: vec![location.id.clone()],
        },
    )
    .await
    .unwrap();

    assert_eq!(area.locations, vec![RefSummary::new(location.id.clone(), "Kantor Pusat")]);

    let stored = area_service::get_location(store.as_ref(), &location.id)
        .await
        .unwrap();
    assert_eq!(stored.assigned_to, Some(RefSummary::new(area.id, "Jakarta")));
}

#[tokio::test]
async fn test_update_area_clears_removed_locations() {
    let store = helpers::test_store();
    let keep = seed_location(&store, "Kantor Pusat").await;
    let drop = seed_location(&store, "Gudang").await;

    let area = area_service::create_area(
        store.as_ref(),
        CreateAreaRequest {
            name: "Jakarta".to_string(),
            location_ids: vec![keep.id.clone(), drop.id.clone()],
        },
    )
    .await
    .unwrap();

    area_service::update_area(
        store.as_ref(),
        &area.id,
        UpdateAreaRequest {
            name: None,
            location_ids: Some(vec![keep.id.clone()]),
        },
    )
    .await
    .unwrap();

    let kept = area_service::get_location(store.as_ref(), &keep.id).await.unwrap();
    assert!(kept.assigned_to.is_some());
    let dropped = area_service::get_location(store.as_ref(), &drop.id).await.unwrap();
    assert!(dropped.assigned_to.is_none());
}

#[tokio::test]
async fn test_delete_area_releases_its_locations() {
    let store = helpers::test_store();
    let location = seed_location(&store, "Kantor Pusat").await;
    let area = area_service::create_area(
        store.as_ref(),
        CreateAreaRequest {
            name: "Jakarta".to_string(),
            location_ids: vec![location.id.clone()],
        },
    )
    .await
    .unwrap();

    area_service::delete_area(store.as_ref(), &area.id).await.unwrap();

    let released = area_service::get_location(store.as_ref(), &location.id)
        .await
        .unwrap();
    assert!(released.assigned_to.is_none());
    let err = area_service::get_area(store.as_ref(), &area.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_location_geo_validation() {
    let store = helpers::test_store();

    let err = area_service::create_location(
        store.as_ref(),
        CreateLocationRequest {
            name: "Nowhere".to_string(),
            latitude: 120.0,
            longitude: 106.8,
            radius: 100.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let err = area_service::create_location(
        store.as_ref(),
        CreateLocationRequest {
            name: "Nowhere".to_string(),
            latitude: -6.2,
            longitude: 106.8,
            radius: 0.0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}
