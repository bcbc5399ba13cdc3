//! Data sources attached to a map view.

use crate::geo::FeaturesDataSource;

/// Environment variable holding the vector-tile API key.
pub const API_KEY_VAR: &str = "HERE_API_KEY";

/// Default endpoint of the base map vector tiles.
pub const DEFAULT_TILE_URL: &str = "https://vector.hereapi.com/v2/vectortiles/base/mc";

/// Remote vector-tile source.
///
/// Fetching and decoding tiles belongs to the tile decoder; this only
/// carries the endpoint and the authentication code handed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorTileDataSource {
    pub base_url: String,
    pub authentication_code: Option<String>,
}

impl VectorTileDataSource {
    pub fn new(authentication_code: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_TILE_URL.to_string(),
            authentication_code,
        }
    }

    /// Builds a source authenticated with the API key from the environment.
    ///
    /// The runtime environment is checked first, then the value captured at
    /// compile time (the only option on the web). The key is not validated.
    pub fn from_env() -> Self {
        let key = runtime_api_key().or_else(|| option_env!("HERE_API_KEY").map(str::to_string));
        if key.is_none() {
            log::debug!("{} is not set; vector tiles will be unauthenticated", API_KEY_VAR);
        }
        Self::new(key)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_api_key() -> Option<String> {
    std::env::var(API_KEY_VAR).ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_api_key() -> Option<String> {
    None
}

/// A provider of renderable content.
#[derive(Debug, Clone)]
pub enum DataSource {
    VectorTile(VectorTileDataSource),
    Features(FeaturesDataSource),
}

impl DataSource {
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::VectorTile(_) => "vector-tiles",
            DataSource::Features(_) => "features",
        }
    }
}

impl From<VectorTileDataSource> for DataSource {
    fn from(source: VectorTileDataSource) -> Self {
        DataSource::VectorTile(source)
    }
}

impl From<FeaturesDataSource> for DataSource {
    fn from(source: FeaturesDataSource) -> Self {
        DataSource::Features(source)
    }
}
