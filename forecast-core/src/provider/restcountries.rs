use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::model::{Coordinates, Place};

use super::{PlaceSearch, truncate_body};

const FIELDS: &str = "name,capital,population,region,flags,latlng";

/// Country search backed by the REST Countries API.
#[derive(Debug, Clone)]
pub struct RestCountries {
    base_url: String,
    http: Client,
}

impl RestCountries {
    pub fn new(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid countries base URL: {}", self.base_url))?;

        url.path_segments_mut()
            .map_err(|_| anyhow!("Countries base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push("name")
            .push(query);

        Ok(url)
    }
}

/// Build a place from one search record, reading every field leniently.
///
/// A record without a common name is unusable and yields `None`; any other
/// missing, null or oddly typed field just leaves that part of the place absent.
fn place_from_record(record: &Value) -> Option<Place> {
    let common_name = record
        .get("name")
        .and_then(|n| n.get("common"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    let capital = record
        .get("capital")
        .and_then(Value::as_array)
        .and_then(|caps| caps.iter().find_map(Value::as_str))
        .map(str::to_string);

    let population = record.get("population").and_then(|p| {
        p.as_u64()
            .or_else(|| p.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
    });

    let region = record
        .get("region")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let flags = record.get("flags");
    let flag_image_url = ["svg", "png"]
        .iter()
        .find_map(|kind| flags.and_then(|f| f.get(*kind)).and_then(Value::as_str))
        .map(str::to_string);

    let coordinates = match record.get("latlng").and_then(Value::as_array).map(Vec::as_slice) {
        Some([lat, lon, ..]) => lat.as_f64().zip(lon.as_f64()).map(|(lat, lon)| Coordinates::new(lat, lon)),
        _ => None,
    };

    Some(Place {
        common_name: common_name.to_string(),
        capital,
        population,
        region,
        flag_image_url,
        coordinates,
    })
}

/// Parse a search response body, skipping records that can't become a place.
fn parse_places(body: &str) -> Result<Vec<Place>> {
    let parsed: Value =
        serde_json::from_str(body).context("Failed to parse REST Countries JSON")?;

    let records = parsed
        .as_array()
        .ok_or_else(|| anyhow!("REST Countries response is not a list: {}", truncate_body(body)))?;

    Ok(records
        .iter()
        .filter_map(|record| {
            let place = place_from_record(record);
            if place.is_none() {
                tracing::debug!("Skipping REST Countries record without a name");
            }
            place
        })
        .collect())
}

#[async_trait]
impl PlaceSearch for RestCountries {
    async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let url = self.search_url(query)?;

        let res = self
            .http
            .get(url)
            .query(&[("fields", FIELDS)])
            .send()
            .await
            .context("Failed to send request to REST Countries")?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("REST Countries has no match for '{query}'");
            return Ok(Vec::new());
        }

        let body = res
            .text()
            .await
            .context("Failed to read REST Countries response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "REST Countries request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_places(&body)
    }
}
