pub mod map_markers;
pub mod photo_search_service;
pub mod search_query;
pub mod trip_image_service;
pub mod trip_service;
