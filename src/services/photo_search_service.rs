use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use url::Url;

use crate::config::PhotoSearchConfig;

/// A single photo picked for a trip cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub image_url: String,
    pub photographer_name: String,
    pub photographer_url: Option<String>,
}

#[derive(Debug)]
pub enum PhotoSearchError {
    MissingCredentials,
    InvalidUrl(String),
    HttpError(reqwest::Error),
    ApiError { status: u16, body: String },
    ParseError(String),
}

impl fmt::Display for PhotoSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoSearchError::MissingCredentials => write!(f, "Photo search access key not configured"),
            PhotoSearchError::InvalidUrl(msg) => write!(f, "Invalid photo search URL: {}", msg),
            PhotoSearchError::HttpError(err) => write!(f, "HTTP error: {}", err),
            PhotoSearchError::ApiError { status, body } => {
                write!(f, "Photo search API returned {}: {}", status, body)
            }
            PhotoSearchError::ParseError(msg) => write!(f, "Failed to parse photo search response: {}", msg),
        }
    }
}

impl Error for PhotoSearchError {}

impl From<reqwest::Error> for PhotoSearchError {
    fn from(err: reqwest::Error) -> Self {
        PhotoSearchError::HttpError(err)
    }
}

/// Looks up one landscape photo for a keyword query.
///
/// `Ok(None)` means the search ran and found nothing, which callers treat
/// differently from a failed search.
pub trait PhotoSearch {
    async fn search_photo(&self, query: &str) -> Result<Option<Photo>, PhotoSearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: PhotoUrls,
    user: PhotoUser,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
    links: Option<PhotoUserLinks>,
}

#[derive(Debug, Deserialize)]
struct PhotoUserLinks {
    html: Option<String>,
}

/// Client for the Unsplash photo search endpoint.
#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(config: &PhotoSearchConfig) -> Result<Self, PhotoSearchError> {
        let access_key = config
            .access_key
            .clone()
            .ok_or(PhotoSearchError::MissingCredentials)?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            access_key,
        })
    }

    fn search_url(&self, query: &str) -> Result<Url, PhotoSearchError> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("query", query),
                ("per_page", "1"),
                ("orientation", "landscape"),
            ],
        )
        .map_err(|e| PhotoSearchError::InvalidUrl(e.to_string()))
    }
}

impl PhotoSearch for UnsplashClient {
    async fn search_photo(&self, query: &str) -> Result<Option<Photo>, PhotoSearchError> {
        let url = self.search_url(query)?;
        log::debug!("Searching photos for {:?}", query);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PhotoSearchError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        parse_search_response(&body)
    }
}

fn parse_search_response(body: &str) -> Result<Option<Photo>, PhotoSearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| PhotoSearchError::ParseError(e.to_string()))?;

    Ok(response.results.into_iter().next().map(|result| Photo {
        image_url: result.urls.regular,
        photographer_name: result.user.name,
        photographer_url: result.user.links.and_then(|links| links.html),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(access_key: Option<&str>) -> PhotoSearchConfig {
        PhotoSearchConfig {
            access_key: access_key.map(str::to_string),
            base_url: "https://api.unsplash.com/search/photos".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_missing_access_key_is_rejected() {
        let result = UnsplashClient::new(&config(None));
        assert!(matches!(result, Err(PhotoSearchError::MissingCredentials)));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = UnsplashClient::new(&config(Some("key"))).unwrap();
        let url = client.search_url("kyoto temple & garden").unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "kyoto temple & garden".to_string()),
                ("per_page".to_string(), "1".to_string()),
                ("orientation".to_string(), "landscape".to_string()),
            ]
        );
        assert!(url.as_str().contains("query=kyoto+temple+%26+garden"));
    }

    #[test]
    fn test_parse_first_result() {
        let body = r#"{
            "total": 2,
            "results": [
                {
                    "urls": { "raw": "https://images.example/raw", "regular": "https://images.example/regular" },
                    "user": { "name": "Ansel", "links": { "html": "https://unsplash.com/@ansel" } }
                },
                {
                    "urls": { "regular": "https://images.example/second" },
                    "user": { "name": "Dorothea" }
                }
            ]
        }"#;

        let photo = parse_search_response(body).unwrap().unwrap();
        assert_eq!(photo.image_url, "https://images.example/regular");
        assert_eq!(photo.photographer_name, "Ansel");
        assert_eq!(photo.photographer_url.as_deref(), Some("https://unsplash.com/@ansel"));
    }

    #[test]
    fn test_parse_empty_results() {
        assert_eq!(parse_search_response(r#"{"total": 0, "results": []}"#).unwrap(), None);
        assert_eq!(parse_search_response("{}").unwrap(), None);
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        let result = parse_search_response("<html>rate limited</html>");
        assert!(matches!(result, Err(PhotoSearchError::ParseError(_))));
    }
}
