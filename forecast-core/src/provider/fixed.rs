use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::model::Coordinates;

use super::{LocationProvider, LocationRequest};

/// Location provider for hosts without a positioning service: answers with
/// preconfigured coordinates, or reports the location as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self, request: &LocationRequest) -> Result<Coordinates> {
        tracing::debug!(
            "Locating (high accuracy: {}, timeout: {:?})",
            request.high_accuracy,
            request.timeout
        );

        self.coordinates.ok_or_else(|| {
            anyhow!(
                "No device location available.\n\
                 Hint: run `forecast configure` to set a home location, or pass --lat/--lon."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_location_is_an_error() {
        let err = FixedLocation::default()
            .locate(&LocationRequest::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No device location available"));
    }
}
