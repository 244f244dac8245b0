use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::LocationFix;

const IPAPI_URL: &str = "https://ipapi.co/json/";
const IPWHO_URL: &str = "https://ipwho.is/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProviderKind {
    IpApiCo,
    IpWhoIs,
}

/// One IP-based geolocation endpoint. Accuracy is whatever the provider
/// offers; no precision is promised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpProvider {
    kind: IpProviderKind,
    url: String,
}

impl IpProvider {
    #[must_use]
    pub fn ipapi() -> Self {
        Self {
            kind: IpProviderKind::IpApiCo,
            url: IPAPI_URL.to_string(),
        }
    }

    #[must_use]
    pub fn ipwho() -> Self {
        Self {
            kind: IpProviderKind::IpWhoIs,
            url: IPWHO_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn kind(&self) -> IpProviderKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.kind {
            IpProviderKind::IpApiCo => "ipapi.co",
            IpProviderKind::IpWhoIs => "ipwho.is",
        }
    }

    pub async fn locate(&self, client: &Client) -> Result<LocationFix> {
        let response = client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("{} request failed", self.name()))?
            .error_for_status()
            .with_context(|| format!("{} returned non-success status", self.name()))?;

        match self.kind {
            IpProviderKind::IpApiCo => {
                let payload: IpApiResponse = response
                    .json()
                    .await
                    .context("failed to decode ipapi.co response")?;
                payload.into_fix()
            }
            IpProviderKind::IpWhoIs => {
                let payload: IpWhoResponse = response
                    .json()
                    .await
                    .context("failed to decode ipwho.is response")?;
                payload.into_fix()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

impl IpApiResponse {
    fn into_fix(self) -> Result<LocationFix> {
        if self.error {
            bail!(
                "ipapi.co refused lookup: {}",
                self.reason.as_deref().unwrap_or("unknown reason")
            );
        }
        fix_from_parts(
            self.latitude,
            self.longitude,
            [self.city, self.region, self.country_name],
            self.timezone,
        )
    }
}

#[derive(Debug, Deserialize)]
struct IpWhoResponse {
    #[serde(default = "default_success")]
    success: bool,
    message: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<IpWhoTimezone>,
}

#[derive(Debug, Deserialize)]
struct IpWhoTimezone {
    id: Option<String>,
}

fn default_success() -> bool {
    true
}

impl IpWhoResponse {
    fn into_fix(self) -> Result<LocationFix> {
        if !self.success {
            bail!(
                "ipwho.is refused lookup: {}",
                self.message.as_deref().unwrap_or("unknown reason")
            );
        }
        fix_from_parts(
            self.latitude,
            self.longitude,
            [self.city, self.region, self.country],
            self.timezone.and_then(|tz| tz.id),
        )
    }
}

fn fix_from_parts(
    latitude: Option<f64>,
    longitude: Option<f64>,
    place: [Option<String>; 3],
    timezone: Option<String>,
) -> Result<LocationFix> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        bail!("geolocation response carried no coordinates");
    };
    let [city, region, country] = place.map(|part| part.filter(|p| !p.trim().is_empty()));
    let label = match (city, region, country) {
        (Some(city), _, Some(country)) => format!("{city}, {country}"),
        (Some(city), Some(region), None) => format!("{city}, {region}"),
        (Some(city), None, None) => city,
        (None, Some(region), _) => region,
        (None, None, Some(country)) => country,
        (None, None, None) => format!("{latitude:.4}, {longitude:.4}"),
    };
    Ok(LocationFix {
        latitude,
        longitude,
        label,
        timezone: timezone.filter(|tz| !tz.trim().is_empty()),
    })
}
