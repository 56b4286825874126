use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::journey::Journey;
use super::place::{Accommodation, Activity, Location};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ImageAttribution {
    pub photographer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographer_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    // Cover image cache, keyed by the hash of title and description
    pub image_url: Option<String>,
    pub image_attribution: Option<ImageAttribution>,
    pub image_hash: Option<String>,
    pub image_updated_at: Option<DateTime>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripPhase {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub order: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A trip together with everything placed on its map.
#[derive(Debug, Clone, Default)]
pub struct TripGraph {
    pub trip: Trip,
    pub phases: Vec<TripPhase>,
    pub locations: Vec<Location>,
    pub accommodations: Vec<Accommodation>,
    pub activities: Vec<Activity>,
    pub journeys: Vec<Journey>,
}
