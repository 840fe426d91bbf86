use reqwest::Url;
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::{ChartError, Result};

const DEFAULT_URL: &str = "https://www.melon.com/chart/day/index.htm";
const DEFAULT_CUT_LINE: usize = 50;

/// Selector expressions for the three extracted fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPaths {
    pub song_titles: String,
    pub artist_names: String,
    pub album_names: String,
}

impl Default for FieldPaths {
    fn default() -> Self {
        Self {
            song_titles: ".wrap_song_info .ellipsis.rank01 span a".to_string(),
            artist_names: ".wrap_song_info .ellipsis.rank02 span".to_string(),
            album_names: ".wrap_song_info .ellipsis.rank03 a".to_string(),
        }
    }
}

/// Static provider configuration, read-only once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the daily chart; weekly and monthly are derived from it
    pub url: String,
    /// Maximum number of entries returned
    pub cut_line: usize,
    pub xpath: FieldPaths,
    pub index_key: String,
    pub moved_key: String,
    pub start_date_key: String,
    pub end_date_key: String,
    pub is_first_date_key: String,
    pub is_last_date_key: String,
    pub rank_month_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            cut_line: DEFAULT_CUT_LINE,
            xpath: FieldPaths::default(),
            index_key: "idx".to_string(),
            moved_key: "moved".to_string(),
            start_date_key: "startDay".to_string(),
            end_date_key: "endDay".to_string(),
            is_first_date_key: "isFirstDate".to_string(),
            is_last_date_key: "isLastDate".to_string(),
            rank_month_key: "rankMonth".to_string(),
        }
    }
}

/// Caller overrides for [`ProviderConfig`]; unset fields keep their defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub url: Option<String>,
    pub cut_line: Option<usize>,
    pub xpath: Option<FieldPathOptions>,
    pub index_key: Option<String>,
    pub moved_key: Option<String>,
    pub start_date_key: Option<String>,
    pub end_date_key: Option<String>,
    pub is_first_date_key: Option<String>,
    pub is_last_date_key: Option<String>,
    pub rank_month_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPathOptions {
    pub song_titles: Option<String>,
    pub artist_names: Option<String>,
    pub album_names: Option<String>,
}

impl ProviderConfig {
    /// Built-in defaults with `options` laid over them
    pub fn with_options(options: ChartOptions) -> Self {
        let mut config = Self::default();

        if let Some(url) = options.url {
            config.url = url;
        }
        if let Some(cut_line) = options.cut_line {
            config.cut_line = cut_line;
        }
        if let Some(xpath) = options.xpath {
            if let Some(song_titles) = xpath.song_titles {
                config.xpath.song_titles = song_titles;
            }
            if let Some(artist_names) = xpath.artist_names {
                config.xpath.artist_names = artist_names;
            }
            if let Some(album_names) = xpath.album_names {
                config.xpath.album_names = album_names;
            }
        }
        if let Some(key) = options.index_key {
            config.index_key = key;
        }
        if let Some(key) = options.moved_key {
            config.moved_key = key;
        }
        if let Some(key) = options.start_date_key {
            config.start_date_key = key;
        }
        if let Some(key) = options.end_date_key {
            config.end_date_key = key;
        }
        if let Some(key) = options.is_first_date_key {
            config.is_first_date_key = key;
        }
        if let Some(key) = options.is_last_date_key {
            config.is_last_date_key = key;
        }
        if let Some(key) = options.rank_month_key {
            config.rank_month_key = key;
        }

        config
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .map_err(|e| ChartError::InvalidConfig(format!("Invalid base URL {}: {}", self.url, e)))?;

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ChartError::InvalidConfig(format!(
                "Base URL has no host: {}",
                self.url
            )));
        }

        Ok(url)
    }

    /// Check that every required value is present and usable
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.cut_line == 0 {
            return Err(ChartError::InvalidConfig(
                "cutLine must be greater than zero".to_string(),
            ));
        }

        let required = [
            ("xpath.songTitles", &self.xpath.song_titles),
            ("xpath.artistNames", &self.xpath.artist_names),
            ("xpath.albumNames", &self.xpath.album_names),
            ("indexKey", &self.index_key),
            ("movedKey", &self.moved_key),
            ("startDateKey", &self.start_date_key),
            ("endDateKey", &self.end_date_key),
            ("isFirstDateKey", &self.is_first_date_key),
            ("isLastDateKey", &self.is_last_date_key),
            ("rankMonthKey", &self.rank_month_key),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ChartError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }
}

/// Server process configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Timeout applied to every chart page request
    pub http_timeout: Duration,
    pub chart_options: ChartOptions,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            http_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(10),
            ),

            chart_options: ChartOptions {
                url: env::var("CHART_URL").ok(),
                cut_line: env::var("CHART_CUT_LINE").ok().and_then(|c| c.parse().ok()),
                ..ChartOptions::default()
            },
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::with_options(self.chart_options.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
