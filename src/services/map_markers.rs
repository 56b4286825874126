//! Map data for a trip: one marker per place with known coordinates,
//! markers grouped by position, and the journeys drawn between locations.

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::journey::{Journey, JourneyMode};
use crate::models::place::{Coordinates, Location};
use crate::models::trip::TripGraph;

/// Coordinates are rounded to 1e-6 degrees before grouping.
const COORDINATE_SCALE: f64 = 1e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Location,
    Accommodation,
    Activity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub kind: MarkerKind,
    pub label: String,
    pub coordinates: Coordinates,
    pub location_id: String,
    pub phase_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerGroup {
    pub coordinates: Coordinates,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneySegment {
    pub journey_id: String,
    pub mode: JourneyMode,
    pub from: Coordinates,
    pub to: Coordinates,
}

/// A journey that leaves one phase of the trip and arrives in another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryJourney {
    pub journey_id: String,
    pub mode: JourneyMode,
    pub from_location_id: String,
    pub to_location_id: String,
    pub from_phase_id: Option<String>,
    pub to_phase_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripMap {
    pub markers: Vec<MapMarker>,
    pub groups: Vec<MarkerGroup>,
    pub segments: Vec<JourneySegment>,
    pub boundary_journeys: Vec<BoundaryJourney>,
}

impl TripMap {
    pub fn from_graph(graph: &TripGraph) -> Self {
        let markers = generate_map_markers(graph);
        let groups = group_markers(&markers);
        Self {
            markers,
            groups,
            segments: journey_segments(graph),
            boundary_journeys: phase_boundary_journeys(graph),
        }
    }
}

/// Locations ordered by phase, then by their own order. Locations without a
/// (known) phase come last.
fn ordered_locations(graph: &TripGraph) -> Vec<&Location> {
    let mut phases: Vec<_> = graph.phases.iter().collect();
    phases.sort_by_key(|phase| phase.order);
    let phase_rank: HashMap<ObjectId, usize> = phases
        .iter()
        .enumerate()
        .filter_map(|(rank, phase)| phase.id.map(|id| (id, rank)))
        .collect();

    let mut locations: Vec<&Location> = graph.locations.iter().collect();
    locations.sort_by_key(|location| {
        let rank = location
            .phase_id
            .and_then(|id| phase_rank.get(&id).copied())
            .unwrap_or(usize::MAX);
        (rank, location.order)
    });
    locations
}

/// One marker per location, accommodation and activity that can be placed.
///
/// Accommodations and activities without coordinates of their own are put
/// on their location. Each location's marker is followed by its
/// accommodations and then its activities.
pub fn generate_map_markers(graph: &TripGraph) -> Vec<MapMarker> {
    let mut markers = Vec::new();

    for location in ordered_locations(graph) {
        let Some(location_id) = location.id else {
            continue;
        };
        let phase_id = location.phase_id.map(|id| id.to_hex());

        let mut push = |id: ObjectId, kind, label: &str, coordinates: Option<Coordinates>| {
            if let Some(coordinates) = coordinates {
                markers.push(MapMarker {
                    id: id.to_hex(),
                    kind,
                    label: label.to_string(),
                    coordinates,
                    location_id: location_id.to_hex(),
                    phase_id: phase_id.clone(),
                });
            }
        };

        push(
            location_id,
            MarkerKind::Location,
            &location.name,
            location.coordinates,
        );

        for accommodation in graph
            .accommodations
            .iter()
            .filter(|a| a.location_id == location_id)
        {
            if let Some(id) = accommodation.id {
                push(
                    id,
                    MarkerKind::Accommodation,
                    &accommodation.name,
                    accommodation.coordinates.or(location.coordinates),
                );
            }
        }

        for activity in graph
            .activities
            .iter()
            .filter(|a| a.location_id == location_id)
        {
            if let Some(id) = activity.id {
                push(
                    id,
                    MarkerKind::Activity,
                    &activity.name,
                    activity.coordinates.or(location.coordinates),
                );
            }
        }
    }

    markers
}

fn coordinate_key(coordinates: &Coordinates) -> (i64, i64) {
    (
        (coordinates.lat * COORDINATE_SCALE).round() as i64,
        (coordinates.lng * COORDINATE_SCALE).round() as i64,
    )
}

/// Group markers that sit on the same spot, in order of first appearance.
pub fn group_markers(markers: &[MapMarker]) -> Vec<MarkerGroup> {
    let mut groups: Vec<MarkerGroup> = Vec::new();
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();

    for marker in markers {
        let key = coordinate_key(&marker.coordinates);
        match index.get(&key) {
            Some(&i) => groups[i].markers.push(marker.clone()),
            None => {
                index.insert(key, groups.len());
                groups.push(MarkerGroup {
                    coordinates: marker.coordinates,
                    markers: vec![marker.clone()],
                });
            }
        }
    }

    groups
}

fn locations_by_id(graph: &TripGraph) -> HashMap<ObjectId, &Location> {
    graph
        .locations
        .iter()
        .filter_map(|location| location.id.map(|id| (id, location)))
        .collect()
}

/// Journeys with both endpoints known, paired with those endpoints.
fn resolved_journeys(graph: &TripGraph) -> Vec<(&Journey, &Location, &Location)> {
    let locations = locations_by_id(graph);
    graph
        .journeys
        .iter()
        .filter_map(|journey| {
            let from = locations.get(&journey.from_location_id)?;
            let to = locations.get(&journey.to_location_id)?;
            Some((journey, *from, *to))
        })
        .collect()
}

fn journey_id(journey: &Journey) -> String {
    journey.id.map(|id| id.to_hex()).unwrap_or_default()
}

/// Journeys whose endpoints are in different phases, including a journey
/// between a phased location and one with no phase.
pub fn phase_boundary_journeys(graph: &TripGraph) -> Vec<BoundaryJourney> {
    resolved_journeys(graph)
        .into_iter()
        .filter(|(_, from, to)| from.phase_id != to.phase_id)
        .map(|(journey, from, to)| BoundaryJourney {
            journey_id: journey_id(journey),
            mode: journey.mode,
            from_location_id: journey.from_location_id.to_hex(),
            to_location_id: journey.to_location_id.to_hex(),
            from_phase_id: from.phase_id.map(|id| id.to_hex()),
            to_phase_id: to.phase_id.map(|id| id.to_hex()),
        })
        .collect()
}

pub fn journeys_within_phase(graph: &TripGraph, phase_id: ObjectId) -> Vec<&Journey> {
    resolved_journeys(graph)
        .into_iter()
        .filter(|(_, from, to)| from.phase_id == Some(phase_id) && to.phase_id == Some(phase_id))
        .map(|(journey, _, _)| journey)
        .collect()
}

/// Line segments for journeys whose endpoints both have coordinates.
pub fn journey_segments(graph: &TripGraph) -> Vec<JourneySegment> {
    resolved_journeys(graph)
        .into_iter()
        .filter_map(|(journey, from, to)| {
            Some(JourneySegment {
                journey_id: journey_id(journey),
                mode: journey.mode,
                from: from.coordinates?,
                to: to.coordinates?,
            })
        })
        .collect()
}
