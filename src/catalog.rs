use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::model::Recipe;
use crate::normalize::normalize_record;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Upstream response envelope. `meals` is null when nothing matched.
#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    meals: Option<Vec<Value>>,
}

/// Thin proxy over a TheMealDB-compatible catalog API.
///
/// Responses are parsed and passed through the normalizer, so callers only
/// ever see the canonical `Recipe` shape. No timeout is configured; a hung
/// upstream call blocks until the connection dies.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogClient {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Text search against the upstream catalog.
    ///
    /// Blank queries resolve to an empty list without touching the network.
    /// An absent or null result list is treated as no matches.
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let envelope = self.fetch_meals("search.php", Some(query)).await?;
        Ok(envelope
            .meals
            .unwrap_or_default()
            .iter()
            .map(normalize_record)
            .collect())
    }

    /// One upstream-chosen recipe, or `None` when the catalog returns nothing.
    pub async fn random(&self) -> Result<Option<Recipe>, CatalogError> {
        let envelope = self.fetch_meals("random.php", None).await?;
        Ok(envelope
            .meals
            .unwrap_or_default()
            .first()
            .map(normalize_record))
    }

    async fn fetch_meals(
        &self,
        endpoint: &str,
        query: Option<&str>,
    ) -> Result<MealsEnvelope, CatalogError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.client.get(&url);
        if let Some(q) = query {
            request = request.query(&[("s", q)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;
        debug!("upstream response from {url}: {body}");
        Ok(serde_json::from_str(&body)?)
    }
}
