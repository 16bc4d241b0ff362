use crate::api::middleware::{ApiError, ApiResult};
use crate::models::{
    Area, CreateAreaRequest, CreateLocationRequest, Location, RefSummary, UpdateAreaRequest,
    UpdateLocationRequest,
};
use crate::services::resolver;
use crate::store::{get_doc, list_docs, put_doc, DocumentStore};
use serde_json::json;
use std::collections::HashSet;

pub const AREAS: &str = "areas";
pub const LOCATIONS: &str = "locations";

pub async fn list_areas(store: &dyn DocumentStore) -> ApiResult<Vec<Area>> {
    Ok(list_docs(store, AREAS).await?)
}

pub async fn get_area(store: &dyn DocumentStore, id: &str) -> ApiResult<Area> {
    get_doc(store, AREAS, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("area {} not found", id)))
}

pub async fn create_area(store: &dyn DocumentStore, request: CreateAreaRequest) -> ApiResult<Area> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let locations =
        resolver::resolve_references(store, LOCATIONS, &request.location_ids, "Location").await;
    let area = Area::new(request.name, locations);
    put_doc(store, AREAS, &area.id, &area).await?;

    assign_locations(store, &area, &request.location_ids, &[]).await;
    Ok(area)
}

pub async fn update_area(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateAreaRequest,
) -> ApiResult<Area> {
    let mut area = get_area(store, id).await?;
    let previous_ids: Vec<String> = area.locations.iter().map(|l| l.id.clone()).collect();

    if let Some(name) = request.name {
        area.name = name;
    }
    let new_ids = match request.location_ids {
        Some(ids) => {
            area.locations =
                resolver::resolve_references(store, LOCATIONS, &ids, "Location").await;
            ids
        }
        None => previous_ids.clone(),
    };
    area.updated_at = crate::models::now_rfc3339();

    put_doc(store, AREAS, &area.id, &area).await?;

    let removed: Vec<String> = previous_ids
        .iter()
        .filter(|id| !new_ids.contains(id))
        .cloned()
        .collect();
    assign_locations(store, &area, &new_ids, &removed).await;
    Ok(area)
}

pub async fn delete_area(store: &dyn DocumentStore, id: &str) -> ApiResult<()> {
    if let Ok(area) = get_area(store, id).await {
        let owned: Vec<String> = area.locations.iter().map(|l| l.id.clone()).collect();
        assign_locations(store, &area, &[], &owned).await;
    }
    store.delete(AREAS, id).await?;
    Ok(())
}

/// Point every location in the area back at it and clear the pointer on
/// locations that were removed. Fan-out writes, best effort, not
/// transactional with the area write.
async fn assign_locations(
    store: &dyn DocumentStore,
    area: &Area,
    current: &[String],
    removed: &[String],
) {
    let area_ref = RefSummary::new(area.id.clone(), area.name.clone());
    let current_set: HashSet<&String> = current.iter().collect();

    for location_id in current {
        let fields = json!({
            "assignedTo": area_ref,
            "updatedAt": crate::models::now_rfc3339(),
        });
        if let Err(err) = store.patch(LOCATIONS, location_id, &fields).await {
            tracing::warn!(location_id, area_id = %area.id, error = %err,
                "location back-reference update failed");
        }
    }

    for location_id in removed {
        if current_set.contains(location_id) {
            continue;
        }
        let fields = json!({
            "assignedTo": serde_json::Value::Null,
            "updatedAt": crate::models::now_rfc3339(),
        });
        if let Err(err) = store.patch(LOCATIONS, location_id, &fields).await {
            tracing::warn!(location_id, area_id = %area.id, error = %err,
                "location back-reference clear failed");
        }
    }
}

// Location CRUD

pub async fn list_locations(store: &dyn DocumentStore) -> ApiResult<Vec<Location>> {
    Ok(list_docs(store, LOCATIONS).await?)
}

pub async fn get_location(store: &dyn DocumentStore, id: &str) -> ApiResult<Location> {
    get_doc(store, LOCATIONS, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("location {} not found", id)))
}

fn validate_geo(latitude: f64, longitude: f64, radius: f64) -> ApiResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::BadRequest("latitude out of range".to_string()));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::BadRequest("longitude out of range".to_string()));
    }
    if radius <= 0.0 {
        return Err(ApiError::BadRequest("radius must be positive".to_string()));
    }
    Ok(())
}

pub async fn create_location(
    store: &dyn DocumentStore,
    request: CreateLocationRequest,
) -> ApiResult<Location> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    validate_geo(request.latitude, request.longitude, request.radius)?;

    let location = Location::new(
        request.name,
        request.latitude,
        request.longitude,
        request.radius,
    );
    put_doc(store, LOCATIONS, &location.id, &location).await?;
    Ok(location)
}

pub async fn update_location(
    store: &dyn DocumentStore,
    id: &str,
    request: UpdateLocationRequest,
) -> ApiResult<Location> {
    let mut location = get_location(store, id).await?;

    if let Some(name) = request.name {
        location.name = name;
    }
    if let Some(latitude) = request.latitude {
        location.latitude = latitude;
    }
    if let Some(longitude) = request.longitude {
        location.longitude = longitude;
    }
    if let Some(radius) = request.radius {
        location.radius = radius;
    }
    validate_geo(location.latitude, location.longitude, location.radius)?;
    location.updated_at = crate::models::now_rfc3339();

    put_doc(store, LOCATIONS, &location.id, &location).await?;
    Ok(location)
}

pub async fn delete_location(store: &dyn DocumentStore, id: &str) -> ApiResult<()> {
    store.delete(LOCATIONS, id).await?;
    Ok(())
}
