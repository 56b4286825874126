use actix_web::{web, App};
use mongodb::{options::ClientOptions, Client};
use std::time::Duration;

use trip_planner_api::{
    config::{AppConfig, PhotoSearchConfig},
    routes,
    services::{
        photo_search_service::UnsplashClient, trip_image_service::TripImageService,
        trip_service::TripService,
    },
};

pub const PLACEHOLDER_IMAGE_URL: &str = "/images/test-placeholder.jpg";

pub struct TestApp {
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    /// Builds the app without touching the network; the Mongo client only
    /// connects when a handler actually queries it.
    pub async fn new() -> Self {
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let mut options = ClientOptions::parse(&mongo_uri).await.unwrap();
        options.server_selection_timeout = Some(Duration::from_millis(500));
        let client = Client::with_options(options).unwrap();

        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mongodb_uri: mongo_uri,
            database: "TripPlannerTest".to_string(),
            photo_search: PhotoSearchConfig::default(),
            placeholder_image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        };

        Self { client, config }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let image_service: TripImageService<UnsplashClient> = TripImageService::new(None);

        App::new()
            .app_data(web::Data::new(self.client.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(TripService::new(
                &self.client,
                &self.config.database,
            )))
            .app_data(web::Data::new(image_service))
            .configure(routes::config)
    }
}
