use std::time::Duration;

use reqwest::Client;

use crate::{cli::Cli, data::geoip::IpProvider, domain::weather::LocationFix};

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOrigin {
    Saved,
    Coordinates,
    IpLookup(&'static str),
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub fix: LocationFix,
    pub origin: LocationOrigin,
}

#[must_use]
pub fn fallback_location() -> LocationFix {
    LocationFix {
        latitude: 59.3293,
        longitude: 18.0686,
        label: "Stockholm, Sweden".to_string(),
        timezone: Some("Europe/Stockholm".to_string()),
    }
}

/// Ordered best-effort lookups; the first one that yields a fix wins and the
/// fallback always does.
#[derive(Debug, Clone)]
pub struct LocationChain {
    client: Client,
    saved: Option<LocationFix>,
    coordinates: Option<LocationFix>,
    providers: Vec<IpProvider>,
    fallback: LocationFix,
}

impl LocationChain {
    #[must_use]
    pub fn new(providers: Vec<IpProvider>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
            saved: None,
            coordinates: None,
            providers,
            fallback: fallback_location(),
        }
    }

    #[must_use]
    pub fn from_cli(cli: &Cli, saved: Option<LocationFix>) -> Self {
        let mut ipapi = IpProvider::ipapi();
        if let Some(url) = &cli.ipapi_url {
            ipapi = ipapi.with_url(url.clone());
        }
        let mut ipwho = IpProvider::ipwho();
        if let Some(url) = &cli.ipwho_url {
            ipwho = ipwho.with_url(url.clone());
        }

        let coordinates = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => Some(LocationFix::from_coords(lat, lon)),
            _ => None,
        };

        Self::new(vec![ipapi, ipwho])
            .with_saved(saved)
            .with_coordinates(coordinates)
    }

    #[must_use]
    pub fn with_saved(mut self, saved: Option<LocationFix>) -> Self {
        self.saved = saved;
        self
    }

    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Option<LocationFix>) -> Self {
        self.coordinates = coordinates;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: LocationFix) -> Self {
        self.fallback = fallback;
        self
    }

    pub async fn resolve(&self) -> ResolvedLocation {
        if let Some(fix) = self.saved.clone() {
            return ResolvedLocation {
                fix,
                origin: LocationOrigin::Saved,
            };
        }
        if let Some(fix) = self.coordinates.clone() {
            return ResolvedLocation {
                fix,
                origin: LocationOrigin::Coordinates,
            };
        }

        for provider in &self.providers {
            match provider.locate(&self.client).await {
                Ok(fix) => {
                    tracing::info!(
                        provider = provider.name(),
                        label = %fix.label,
                        "location detected"
                    );
                    return ResolvedLocation {
                        fix,
                        origin: LocationOrigin::IpLookup(provider.name()),
                    };
                }
                Err(err) => {
                    tracing::debug!(
                        provider = provider.name(),
                        error = %err,
                        "location lookup failed"
                    );
                }
            }
        }

        tracing::info!(label = %self.fallback.label, "using fallback location");
        ResolvedLocation {
            fix: self.fallback.clone(),
            origin: LocationOrigin::Fallback,
        }
    }
}
