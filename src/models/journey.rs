use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum JourneyMode {
    Flight,
    Train,
    Bus,
    Car,
    Ferry,
    Walk,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Journey {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub from_location_id: ObjectId,
    pub to_location_id: ObjectId,
    #[serde(default)]
    pub mode: JourneyMode,
}
