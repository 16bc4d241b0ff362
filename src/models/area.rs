use crate::models::RefSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub name: String,
    /// Location summaries denormalized onto the area. The reverse
    /// `assignedTo` pointer on each location document is maintained by
    /// the area write path, best effort.
    #[serde(default)]
    pub locations: Vec<RefSummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl Area {
    pub fn new(name: String, locations: Vec<RefSummary>) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            locations,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Geofence radius in meters.
    pub radius: f64,
    #[serde(default)]
    pub assigned_to: Option<RefSummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl Location {
    pub fn new(name: String, latitude: f64, longitude: f64, radius: f64) -> Self {
        let now = crate::models::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            latitude,
            longitude,
            radius,
            assigned_to: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// DTOs for API

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAreaRequest {
    pub name: String,
    #[serde(default)]
    pub location_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAreaRequest {
    pub name: Option<String>,
    pub location_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
}
