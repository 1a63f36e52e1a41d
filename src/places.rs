//! Nearby place search using the Foursquare Places API.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::types::{Coordinates, Place};

const FOURSQUARE_SEARCH_URL: &str = "https://places-api.foursquare.com/places/search";
const FOURSQUARE_API_VERSION: &str = "2025-06-17";

/// Search radius around the user's location, in meters.
pub const SEARCH_RADIUS_METERS: u32 = 5000;

/// Result of a places lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacesOutcome {
    /// At least one place, in provider order.
    Found(Vec<Place>),
    /// The provider answered with no results.
    Empty,
    /// Transport error, error status, or a body we could not read.
    Failed(String),
}

impl PlacesOutcome {
    fn from_places(places: Vec<Place>) -> Self {
        if places.is_empty() {
            Self::Empty
        } else {
            Self::Found(places)
        }
    }
}

#[async_trait]
pub trait PlacesLookup: Send + Sync {
    async fn search(&self, coordinates: Coordinates, query: &str) -> PlacesOutcome;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Place>,
}

/// Decode a search response body into an outcome.
fn parse_search_response(body: &str) -> PlacesOutcome {
    match serde_json::from_str::<SearchResponse>(body) {
        Ok(response) => PlacesOutcome::from_places(response.results),
        Err(e) => PlacesOutcome::Failed(format!("malformed places response: {e}")),
    }
}

pub struct FoursquareClient {
    api_key: String,
    client: reqwest::Client,
}

impl FoursquareClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(
        &self,
        coordinates: Coordinates,
        query: &str,
    ) -> reqwest::Result<reqwest::Request> {
        let ll = format!("{},{}", coordinates.latitude, coordinates.longitude);
        let radius = SEARCH_RADIUS_METERS.to_string();

        self.client
            .get(FOURSQUARE_SEARCH_URL)
            .bearer_auth(&self.api_key)
            .header("X-Places-Api-Version", FOURSQUARE_API_VERSION)
            .header("Accept", "application/json")
            .query(&[("ll", ll.as_str()), ("query", query), ("radius", radius.as_str())])
            .build()
    }

    async fn fetch(
        &self,
        coordinates: Coordinates,
        query: &str,
    ) -> reqwest::Result<reqwest::Response> {
        let request = self.build_request(coordinates, query)?;
        self.client.execute(request).await
    }
}

#[async_trait]
impl PlacesLookup for FoursquareClient {
    async fn search(&self, coordinates: Coordinates, query: &str) -> PlacesOutcome {
        debug!(
            "Searching places for '{}' around {},{}",
            query, coordinates.latitude, coordinates.longitude
        );

        let response = match self.fetch(coordinates, query).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Places request failed: {e}");
                return PlacesOutcome::Failed(e.to_string());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read places response: {e}");
                return PlacesOutcome::Failed(e.to_string());
            }
        };

        if !status.is_success() {
            warn!("Places API returned {status}: {body}");
            return PlacesOutcome::Failed(format!("places API returned {status}"));
        }

        let outcome = parse_search_response(&body);
        match &outcome {
            PlacesOutcome::Found(places) => debug!("Found {} places", places.len()),
            PlacesOutcome::Empty => debug!("No places found"),
            PlacesOutcome::Failed(reason) => warn!("{reason}"),
        }
        outcome
    }
}
