use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw check-in event with optional geolocation, fetched month-bounded in UTC.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CheckInEvent {
    pub staff_email: String,
    pub happened_at: DateTime<Utc>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub distance_m: Option<f64>,
}

/// Geolocation of the first check-in of a day, attached to a report row for
/// audit display only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[schema(example = 42.5)]
    pub distance_m: Option<f64>,
}
