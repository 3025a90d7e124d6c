//! Connection configuration for the contacts client.
//!
//! # Design
//! Configuration is an explicit value handed to constructors. It is fixed for
//! the lifetime of the client; nothing reads it back from the environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://localhost:5001";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";

/// One entry of an `Accept` header: a media type with an optional quality
/// weight in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    media_type: String,
    quality: Option<f32>,
}

impl MediaRange {
    pub fn new(media_type: &str) -> Self {
        Self {
            media_type: media_type.trim().to_ascii_lowercase(),
            quality: None,
        }
    }

    pub fn with_quality(mut self, quality: f32) -> Result<Self, ApiError> {
        if !(0.0..=1.0).contains(&quality) {
            return Err(ApiError::InvalidConfig(format!(
                "quality {quality} for {} is outside 0..=1",
                self.media_type
            )));
        }
        self.quality = Some(quality);
        Ok(self)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Effective weight; an absent `q` parameter means 1.
    pub fn quality(&self) -> f32 {
        self.quality.unwrap_or(1.0)
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quality {
            Some(q) => write!(f, "{};q={q}", self.media_type),
            None => f.write_str(&self.media_type),
        }
    }
}

impl FromStr for MediaRange {
    type Err = ApiError;

    /// Parses `type/subtype` optionally followed by `;q=<weight>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';');
        let media_type = parts.next().unwrap_or("").trim();
        if media_type.split('/').filter(|p| !p.is_empty()).count() != 2 {
            return Err(ApiError::InvalidConfig(format!("malformed media type: {s:?}")));
        }

        let mut range = MediaRange::new(media_type);
        for param in parts {
            let Some(value) = param.trim().strip_prefix("q=") else {
                continue;
            };
            let quality = value
                .trim()
                .parse::<f32>()
                .map_err(|_| ApiError::InvalidConfig(format!("malformed quality in {s:?}")))?;
            range = range.with_quality(quality)?;
        }
        Ok(range)
    }
}

/// Base address, per-request timeout and `Accept` preferences.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub accept: Vec<MediaRange>,
}

impl Default for ClientConfig {
    /// JSON preferred, XML accepted as a lower-priority fallback.
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept: vec![
                MediaRange::new(APPLICATION_JSON),
                MediaRange {
                    media_type: APPLICATION_XML.to_string(),
                    quality: Some(0.8),
                },
            ],
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept(mut self, accept: Vec<MediaRange>) -> Self {
        self.accept = accept;
        self
    }

    /// Renders `accept` as a single header value, or `None` when empty.
    pub fn accept_header(&self) -> Option<String> {
        if self.accept.is_empty() {
            return None;
        }
        let ranges: Vec<String> = self.accept.iter().map(ToString::to_string).collect();
        Some(ranges.join(", "))
    }
}
