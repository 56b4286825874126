use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::search_query::build_search_query;

#[derive(Deserialize)]
pub struct SearchQueryParams {
    #[serde(default)]
    title: String,
    description: Option<String>,
}

#[derive(Serialize)]
struct SearchQueryResponse {
    query: String,
}

/*
    /api/search-query?title=..&description=..
*/
pub async fn preview(params: web::Query<SearchQueryParams>) -> impl Responder {
    let query = build_search_query(&params.title, params.description.as_deref());
    HttpResponse::Ok().json(SearchQueryResponse { query })
}
