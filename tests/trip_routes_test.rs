mod common;

use actix_web::{test, web, App};
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use common::{TestApp, PLACEHOLDER_IMAGE_URL};
use trip_planner_api::{
    models::trip::Trip,
    routes::trip::get_image,
    services::{
        photo_search_service::{Photo, PhotoSearch, PhotoSearchError},
        trip_image_service::{image_cache_hash, ImageUpdate, TripImageService},
        trip_service::{TripServiceError, TripStore},
    },
};

/// Holds a single trip and records every image update written back.
struct MemoryStore {
    trip: Trip,
    updates: Mutex<Vec<ImageUpdate>>,
}

impl MemoryStore {
    fn new(title: &str) -> Self {
        Self {
            trip: Trip {
                id: Some(ObjectId::new()),
                title: title.to_string(),
                ..Default::default()
            },
            updates: Mutex::new(Vec::new()),
        }
    }

    fn image_uri(&self) -> String {
        format!("/api/trips/{}/image", self.trip.id.unwrap())
    }

    fn updates(&self) -> Vec<ImageUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl TripStore for MemoryStore {
    async fn get_trip(&self, trip_id: ObjectId) -> Result<Trip, TripServiceError> {
        if self.trip.id == Some(trip_id) {
            Ok(self.trip.clone())
        } else {
            Err(TripServiceError::NotFound)
        }
    }

    async fn apply_image_update(
        &self,
        _trip_id: ObjectId,
        update: &ImageUpdate,
    ) -> Result<(), TripServiceError> {
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }
}

/// Answers every query with the same photo, or with no result.
struct FixedSearch(Option<Photo>);

impl PhotoSearch for FixedSearch {
    async fn search_photo(&self, _query: &str) -> Result<Option<Photo>, PhotoSearchError> {
        Ok(self.0.clone())
    }
}

async fn call_image_route(
    store: web::Data<MemoryStore>,
    search: FixedSearch,
    uri: &str,
) -> actix_web::dev::ServiceResponse {
    let test_app = TestApp::new().await;
    let app = test::init_service(
        App::new()
            .app_data(store)
            .app_data(web::Data::new(TripImageService::new(Some(search))))
            .app_data(web::Data::new(test_app.config.clone()))
            .route(
                "/api/trips/{id}/image",
                web::get().to(get_image::<MemoryStore, FixedSearch>),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri(uri).to_request();
    test::call_service(&app, req).await
}

#[actix_rt::test]
async fn test_image_with_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/invalid_id_format/image")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_markers_with_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/1234/markers")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_unknown_route() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/65f1c2a9e4b0a1b2c3d4e5f6/photos")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_health_reports_services() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["status"] == "ok" || body["status"] == "degraded");
    assert!(body["services"]["mongodb"]["status"].is_string());
    assert_eq!(body["services"]["photo_search"]["status"], "disabled");
}

#[actix_rt::test]
async fn test_image_without_search_result_serves_placeholder() {
    let store = web::Data::new(MemoryStore::new("Xyzzy"));
    let uri = store.image_uri();

    let resp = call_image_route(store.clone(), FixedSearch(None), &uri).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["image_url"], PLACEHOLDER_IMAGE_URL);
    assert_eq!(body["source"], "placeholder");
    assert_eq!(body["query"], "xyzzy");
    assert!(body["attribution"].is_null());
    assert_eq!(store.updates(), vec![ImageUpdate::Clear]);
}

#[actix_rt::test]
async fn test_image_from_search_is_stored() {
    let store = web::Data::new(MemoryStore::new("Amazing Kyoto Adventure"));
    let uri = store.image_uri();
    let photo = Photo {
        image_url: "https://images.example/kyoto.jpg".to_string(),
        photographer_name: "Hiro".to_string(),
        photographer_url: None,
    };

    let resp = call_image_route(store.clone(), FixedSearch(Some(photo)), &uri).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["image_url"], "https://images.example/kyoto.jpg");
    assert_eq!(body["source"], "search");
    assert_eq!(body["query"], "amazing kyoto adventure");
    assert_eq!(body["attribution"]["photographer_name"], "Hiro");

    match store.updates().as_slice() {
        [ImageUpdate::Set { image, hash }] => {
            assert_eq!(image.image_url, "https://images.example/kyoto.jpg");
            assert_eq!(*hash, image_cache_hash("Amazing Kyoto Adventure", None));
        }
        other => panic!("expected one Set update, got {:?}", other),
    }
}

#[actix_rt::test]
async fn test_image_for_unknown_trip() {
    let store = web::Data::new(MemoryStore::new("Kyoto"));
    let uri = format!("/api/trips/{}/image", ObjectId::new());

    let resp = call_image_route(store.clone(), FixedSearch(None), &uri).await;
    assert_eq!(resp.status(), 404);
    assert!(store.updates().is_empty());
}
