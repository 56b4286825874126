use log::{debug, warn};
use serde::Serialize;

use crate::models::trip::{ImageAttribution, Trip};
use crate::services::photo_search_service::{Photo, PhotoSearch};
use crate::services::search_query::build_search_query;

const HASH_LEN: usize = 16;

/// Fingerprint of the fields a trip's cover image is derived from.
/// A missing description hashes the same as an empty one.
pub fn image_cache_hash(title: &str, description: Option<&str>) -> String {
    let digest = md5::compute(format!("{}\u{1f}{}", title, description.unwrap_or("")));
    let mut hash = format!("{:x}", digest);
    hash.truncate(HASH_LEN);
    hash
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripImage {
    pub image_url: String,
    pub attribution: Option<ImageAttribution>,
}

impl From<Photo> for TripImage {
    fn from(photo: Photo) -> Self {
        Self {
            image_url: photo.image_url,
            attribution: Some(ImageAttribution {
                photographer_name: photo.photographer_name,
                photographer_url: photo.photographer_url,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageResolution {
    /// Stored image is still valid for the current title and description
    Cached(TripImage),
    Fetched {
        image: TripImage,
        hash: String,
        query: String,
    },
    /// The search ran and returned nothing
    NotFound { query: String },
    /// The search could not be run or failed; stored fields stay as they are
    Unavailable,
}

/// What the caller has to write back to the trip document.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageUpdate {
    Set { image: TripImage, hash: String },
    Clear,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Cache,
    Search,
    Placeholder,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripImageResponse {
    pub image_url: String,
    pub attribution: Option<ImageAttribution>,
    pub source: ImageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ImageResolution {
    pub fn update(&self) -> ImageUpdate {
        match self {
            ImageResolution::Cached(_) | ImageResolution::Unavailable => ImageUpdate::Keep,
            ImageResolution::Fetched { image, hash, .. } => ImageUpdate::Set {
                image: image.clone(),
                hash: hash.clone(),
            },
            ImageResolution::NotFound { .. } => ImageUpdate::Clear,
        }
    }

    pub fn into_response(self, placeholder_url: &str) -> TripImageResponse {
        match self {
            ImageResolution::Cached(image) => TripImageResponse {
                image_url: image.image_url,
                attribution: image.attribution,
                source: ImageSource::Cache,
                query: None,
            },
            ImageResolution::Fetched { image, query, .. } => TripImageResponse {
                image_url: image.image_url,
                attribution: image.attribution,
                source: ImageSource::Search,
                query: Some(query),
            },
            ImageResolution::NotFound { query } => TripImageResponse {
                image_url: placeholder_url.to_string(),
                attribution: None,
                source: ImageSource::Placeholder,
                query: Some(query),
            },
            ImageResolution::Unavailable => TripImageResponse {
                image_url: placeholder_url.to_string(),
                attribution: None,
                source: ImageSource::Placeholder,
                query: None,
            },
        }
    }
}

pub struct TripImageService<P> {
    photo_search: Option<P>,
}

impl<P: PhotoSearch> TripImageService<P> {
    /// `None` disables lookups; only already cached images are served.
    pub fn new(photo_search: Option<P>) -> Self {
        Self { photo_search }
    }

    /// Reuse the stored cover image when its hash still matches, otherwise
    /// search for a new one.
    pub async fn resolve(&self, trip: &Trip) -> ImageResolution {
        let description = trip.description.as_deref();
        let hash = image_cache_hash(&trip.title, description);

        if let (Some(stored_hash), Some(image_url)) = (&trip.image_hash, &trip.image_url) {
            if *stored_hash == hash {
                debug!("Cover image cache hit for trip {:?}", trip.id);
                return ImageResolution::Cached(TripImage {
                    image_url: image_url.clone(),
                    attribution: trip.image_attribution.clone(),
                });
            }
        }

        let Some(photo_search) = &self.photo_search else {
            debug!("Photo search not configured, skipping lookup for trip {:?}", trip.id);
            return ImageResolution::Unavailable;
        };

        let query = build_search_query(&trip.title, description);
        if query.trim().is_empty() {
            return ImageResolution::NotFound { query };
        }

        match photo_search.search_photo(&query).await {
            Ok(Some(photo)) => ImageResolution::Fetched {
                image: photo.into(),
                hash,
                query,
            },
            Ok(None) => {
                debug!("No photo found for {:?}", query);
                ImageResolution::NotFound { query }
            }
            Err(e) => {
                warn!("Photo search failed for trip {:?}: {}", trip.id, e);
                ImageResolution::Unavailable
            }
        }
    }
}
