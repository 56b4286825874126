use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::config::AppConfig;
use crate::services::map_markers::TripMap;
use crate::services::photo_search_service::PhotoSearch;
use crate::services::trip_image_service::TripImageService;
use crate::services::trip_service::{parse_trip_id, TripService, TripServiceError, TripStore};

fn error_response(err: TripServiceError) -> HttpResponse {
    match err {
        TripServiceError::InvalidId(_) => HttpResponse::BadRequest().body("Invalid ID"),
        TripServiceError::NotFound => HttpResponse::NotFound().body("Trip not found"),
        err => {
            error!("Trip lookup failed: {}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}

/*
    /api/trips/{id}/image
*/
pub async fn get_image<S: TripStore + 'static, P: PhotoSearch + 'static>(
    path: web::Path<String>,
    trips: web::Data<S>,
    images: web::Data<TripImageService<P>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let trip_id = match parse_trip_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };

    let trip = match trips.get_trip(trip_id).await {
        Ok(trip) => trip,
        Err(err) => return error_response(err),
    };

    let resolution = images.resolve(&trip).await;

    // The image is served even if the cache could not be updated
    if let Err(err) = trips.apply_image_update(trip_id, &resolution.update()).await {
        error!("Failed to store cover image for trip {}: {}", trip_id, err);
    }

    HttpResponse::Ok().json(resolution.into_response(&config.placeholder_image_url))
}

/*
    /api/trips/{id}/markers
*/
pub async fn get_markers(path: web::Path<String>, trips: web::Data<TripService>) -> impl Responder {
    let trip_id = match parse_trip_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };

    match trips.load_trip_graph(trip_id).await {
        Ok(graph) => HttpResponse::Ok().json(TripMap::from_graph(&graph)),
        Err(err) => error_response(err),
    }
}
