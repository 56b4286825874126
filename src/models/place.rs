use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Location {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub phase_id: Option<ObjectId>,
    pub name: String,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Accommodation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub location_id: ObjectId,
    pub name: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub location_id: ObjectId,
    pub name: String,
    pub coordinates: Option<Coordinates>,
}
