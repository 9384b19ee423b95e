//! Address geocoding.
//!
//! Geocoding is best effort: a listing is still created when the lookup
//! fails, placed at [`Coordinates::ORIGIN`].

use std::time::Duration;

use async_trait::async_trait;
use rentwise_core::geo::Coordinates;
use serde::Deserialize;

/// The parts of a postal address sent to the geocoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressQuery {
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

/// Resolves street addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up `query`. Never fails; unresolvable addresses map to
    /// [`Coordinates::ORIGIN`].
    async fn geocode(&self, query: &AddressQuery) -> Coordinates;
}

/// Errors inside a single Nominatim lookup. Logged, never surfaced.
#[derive(Debug, thiserror::Error)]
enum LookupError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Nominatim returned {status}")]
    Status { status: u16 },

    #[error("no match for address")]
    NoMatch,
}

/// Settings for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Service root, e.g. `https://nominatim.openstreetmap.org`.
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    pub timeout: Duration,
}

/// One entry of a Nominatim `/search?format=json` response.
/// Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Pick the first place with parseable, in-range coordinates.
fn first_coordinates(places: &[Place]) -> Option<Coordinates> {
    let place = places.first()?;
    let longitude = place.lon.trim().parse::<f64>().ok()?;
    let latitude = place.lat.trim().parse::<f64>().ok()?;
    Some(Coordinates::new(longitude, latitude)).filter(Coordinates::is_valid)
}

/// Geocoder backed by an OpenStreetMap Nominatim instance.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    search_url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(config: &NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            search_url: format!("{}/search", config.base_url.trim_end_matches('/')),
            user_agent: config.user_agent.clone(),
        })
    }

    async fn lookup(&self, query: &AddressQuery) -> Result<Coordinates, LookupError> {
        let response = self
            .client
            .get(&self.search_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("street", query.address.as_str()),
                ("city", query.city.as_str()),
                ("country", query.country.as_str()),
                ("postalcode", query.postal_code.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let places: Vec<Place> = response.json().await?;
        first_coordinates(&places).ok_or(LookupError::NoMatch)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &AddressQuery) -> Coordinates {
        match self.lookup(query).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    city = %query.city,
                    country = %query.country,
                    "Geocoding failed, using origin coordinates",
                );
                Coordinates::ORIGIN
            }
        }
    }
}

/// Returns the same coordinates for every address.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeocoder(pub Coordinates);

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _query: &AddressQuery) -> Coordinates {
        self.0
    }
}
