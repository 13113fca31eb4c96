use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// HTTP client settings shared by every data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Upper bound for any single upstream request.
    pub timeout_secs: u64,
    /// Nominatim and Wikipedia both ask clients to identify themselves.
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("travel-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpSettings {
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(self.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")
    }
}

/// Base URLs of the upstream data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub weather_url: String,
    pub wikipedia_api_url: String,
    /// Prefix that a page id is appended to when linking an article directly.
    pub wikipedia_page_url: String,
    pub nominatim_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            weather_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            wikipedia_api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            wikipedia_page_url: "https://en.wikipedia.org/?curid=".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org/search".to_string(),
        }
    }
}

/// Tuning for the attraction fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractionSettings {
    /// Display cap; the proximity search asks for three times as many candidates.
    pub max_results: usize,
    pub search_radius_m: u32,
    /// Appended to the place name for the free-text fallback search.
    pub keywords: Vec<String>,
    /// Prepended to the place name for the general place search.
    pub place_search_phrase: String,
}

impl Default for AttractionSettings {
    fn default() -> Self {
        Self {
            max_results: 9,
            search_radius_m: 25_000,
            keywords: vec!["attractions".to_string(), "landmarks".to_string()],
            place_search_phrase: "tourist attractions in".to_string(),
        }
    }
}

impl AttractionSettings {
    pub fn candidate_limit(&self) -> usize {
        self.max_results.saturating_mul(3)
    }

    pub fn text_query(&self, place_name: &str) -> String {
        std::iter::once(place_name)
            .chain(self.keywords.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn place_query(&self, place_name: &str) -> String {
        format!("{} {}", self.place_search_phrase, place_name)
            .trim()
            .to_string()
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [attractions]
/// max_results = 3
/// search_radius_m = 12000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpSettings,
    pub endpoints: Endpoints,
    pub attractions: AttractionSettings,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "travel-dashboard", "travel-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.attractions.max_results >= 1,
            "attractions.max_results must be at least 1"
        );
        ensure!(
            self.attractions.search_radius_m >= 1,
            "attractions.search_radius_m must be at least 1"
        );
        ensure!(self.http.timeout_secs >= 1, "http.timeout_secs must be at least 1");
        Ok(())
    }

    /// Apply per-invocation overrides, e.g. from command-line flags.
    pub fn with_overrides(
        mut self,
        max_results: Option<usize>,
        radius_m: Option<u32>,
    ) -> Result<Self> {
        if let Some(max) = max_results {
            self.attractions.max_results = max;
        }
        if let Some(radius) = radius_m {
            self.attractions.search_radius_m = radius;
        }
        self.validate()?;
        Ok(self)
    }
}
