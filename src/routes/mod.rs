use actix_web::web;

use crate::services::photo_search_service::UnsplashClient;
use crate::services::trip_service::TripService;

pub mod health;
pub mod search_query;
pub mod trip;

/// Mounts the API. Expects `TripService`, `TripImageService<UnsplashClient>`,
/// `AppConfig` and the Mongo `Client` as app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/search-query", web::get().to(search_query::preview))
                .service(
                    web::scope("/trips/{id}")
                        .route(
                            "/image",
                            web::get().to(trip::get_image::<TripService, UnsplashClient>),
                        )
                        .route("/markers", web::get().to(trip::get_markers)),
                ),
        );
}
