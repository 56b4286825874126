use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use trip_planner_api::{
    config::AppConfig,
    db,
    routes,
    services::{
        photo_search_service::UnsplashClient, trip_image_service::TripImageService,
        trip_service::TripService,
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let client = db::mongo::create_mongo_client(&config.mongodb_uri)
        .await
        .map_err(|e| {
            error!("Failed to create MongoDB client: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;

    let photo_search = match UnsplashClient::new(&config.photo_search) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Photo search disabled: {}", e);
            None
        }
    };

    let trip_service = web::Data::new(TripService::new(&client, &config.database));
    let image_service = web::Data::new(TripImageService::new(photo_search));
    let client = web::Data::new(client);
    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);

    info!("Starting HTTP server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(client.clone())
            .app_data(config.clone())
            .app_data(trip_service.clone())
            .app_data(image_service.clone())
            .configure(routes::config)
    })
    .bind(bind)?
    .run()
    .await
}
