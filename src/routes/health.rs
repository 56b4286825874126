use actix_web::{web, HttpResponse, Responder};
use log::error;
use mongodb::Client;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::AppConfig;
use crate::db::mongo;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    client: web::Data<Client>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&client).await;
    let photo_search_result = check_photo_search(&config);

    // Without photo search the service still works, serving placeholders
    if mongo_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    health.services.insert("mongodb".to_string(), mongo_result);
    health
        .services
        .insert("photo_search".to_string(), photo_search_result);

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(client: &Client) -> ServiceStatus {
    match mongo::ping(client).await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            error!("MongoDB health check failed: {}", e);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

fn check_photo_search(config: &AppConfig) -> ServiceStatus {
    match &config.photo_search.access_key {
        Some(key) => {
            let masked_key = if key.is_ascii() && key.len() > 8 {
                format!("{}***{}", &key[0..4], &key[key.len() - 4..])
            } else {
                "***".to_string()
            };

            ServiceStatus {
                status: "ok".to_string(),
                details: Some(format!("Unsplash access key configured ({})", masked_key)),
            }
        }
        None => ServiceStatus {
            status: "disabled".to_string(),
            details: Some("UNSPLASH_ACCESS_KEY not configured, serving placeholder images".to_string()),
        },
    }
}
