use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    Client, Collection, Database,
};
use serde::de::DeserializeOwned;
use std::fmt;

use crate::models::journey::Journey;
use crate::models::place::{Accommodation, Activity, Location};
use crate::models::trip::{Trip, TripGraph, TripPhase};
use crate::services::trip_image_service::ImageUpdate;

const TRIPS: &str = "trips";
const TRIP_PHASES: &str = "trip_phases";
const LOCATIONS: &str = "locations";
const ACCOMMODATIONS: &str = "accommodations";
const ACTIVITIES: &str = "activities";
const JOURNEYS: &str = "journeys";

#[derive(Debug)]
pub enum TripServiceError {
    InvalidId(String),
    NotFound,
    DatabaseError(mongodb::error::Error),
    SerializationError(String),
}

impl fmt::Display for TripServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripServiceError::InvalidId(id) => write!(f, "Invalid trip id: {}", id),
            TripServiceError::NotFound => write!(f, "Trip not found"),
            TripServiceError::DatabaseError(err) => write!(f, "Database error: {}", err),
            TripServiceError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for TripServiceError {}

impl From<mongodb::error::Error> for TripServiceError {
    fn from(err: mongodb::error::Error) -> Self {
        TripServiceError::DatabaseError(err)
    }
}

pub fn parse_trip_id(id: &str) -> Result<ObjectId, TripServiceError> {
    ObjectId::parse_str(id).map_err(|_| TripServiceError::InvalidId(id.to_string()))
}

/// Where the cover image route loads a trip and stores the lookup outcome.
pub trait TripStore {
    async fn get_trip(&self, trip_id: ObjectId) -> Result<Trip, TripServiceError>;

    async fn apply_image_update(
        &self,
        trip_id: ObjectId,
        update: &ImageUpdate,
    ) -> Result<(), TripServiceError>;
}

/// Reads trips and their children; the only writes are to the cover image fields.
#[derive(Clone)]
pub struct TripService {
    db: Database,
}

impl TripService {
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn get_trip(&self, trip_id: ObjectId) -> Result<Trip, TripServiceError> {
        self.collection::<Trip>(TRIPS)
            .find_one(doc! { "_id": trip_id })
            .await?
            .ok_or(TripServiceError::NotFound)
    }

    pub async fn load_trip_graph(&self, trip_id: ObjectId) -> Result<TripGraph, TripServiceError> {
        let trip = self.get_trip(trip_id).await?;

        let phases: Vec<TripPhase> = self
            .find_all(TRIP_PHASES, doc! { "trip_id": trip_id }, doc! { "order": 1 })
            .await?;
        let locations: Vec<Location> = self
            .find_all(LOCATIONS, doc! { "trip_id": trip_id }, doc! { "order": 1 })
            .await?;

        let location_ids: Vec<ObjectId> = locations.iter().filter_map(|l| l.id).collect();
        let by_location = doc! { "location_id": { "$in": location_ids } };

        let accommodations: Vec<Accommodation> = self
            .find_all(ACCOMMODATIONS, by_location.clone(), doc! { "_id": 1 })
            .await?;
        let activities: Vec<Activity> = self
            .find_all(ACTIVITIES, by_location, doc! { "_id": 1 })
            .await?;
        let journeys: Vec<Journey> = self
            .find_all(JOURNEYS, doc! { "trip_id": trip_id }, doc! { "_id": 1 })
            .await?;

        log::debug!(
            "Loaded trip {} with {} phases, {} locations, {} journeys",
            trip_id,
            phases.len(),
            locations.len(),
            journeys.len()
        );

        Ok(TripGraph {
            trip,
            phases,
            locations,
            accommodations,
            activities,
            journeys,
        })
    }

    async fn find_all<T>(
        &self,
        collection: &str,
        filter: Document,
        sort: Document,
    ) -> Result<Vec<T>, TripServiceError>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let cursor = self.collection::<T>(collection).find(filter).sort(sort).await?;
        Ok(cursor.try_collect::<Vec<T>>().await?)
    }

    /// Write back the outcome of a cover image lookup.
    pub async fn apply_image_update(
        &self,
        trip_id: ObjectId,
        update: &ImageUpdate,
    ) -> Result<(), TripServiceError> {
        let Some(changes) = image_update_document(update)? else {
            return Ok(());
        };

        let result = self
            .collection::<Trip>(TRIPS)
            .update_one(doc! { "_id": trip_id }, changes)
            .await?;
        if result.matched_count == 0 {
            return Err(TripServiceError::NotFound);
        }
        Ok(())
    }
}

impl TripStore for TripService {
    async fn get_trip(&self, trip_id: ObjectId) -> Result<Trip, TripServiceError> {
        TripService::get_trip(self, trip_id).await
    }

    async fn apply_image_update(
        &self,
        trip_id: ObjectId,
        update: &ImageUpdate,
    ) -> Result<(), TripServiceError> {
        TripService::apply_image_update(self, trip_id, update).await
    }
}

fn image_update_document(update: &ImageUpdate) -> Result<Option<Document>, TripServiceError> {
    let now = DateTime::now();
    match update {
        ImageUpdate::Keep => Ok(None),
        ImageUpdate::Set { image, hash } => {
            let attribution = mongodb::bson::to_bson(&image.attribution)
                .map_err(|e| TripServiceError::SerializationError(e.to_string()))?;
            Ok(Some(doc! {
                "$set": {
                    "image_url": image.image_url.as_str(),
                    "image_attribution": attribution,
                    "image_hash": hash.as_str(),
                    "image_updated_at": now,
                    "updated_at": now,
                }
            }))
        }
        ImageUpdate::Clear => Ok(Some(doc! {
            "$unset": {
                "image_url": "",
                "image_attribution": "",
                "image_hash": "",
                "image_updated_at": "",
            }
        })),
    }
}
