use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::entities::query::{
    FilterCriteria, MalformedBoundPolicy, PageSize, SortSpec, DEFAULT_PAGE_SIZE,
};
use crate::infra::mock::generator::{MockSource, DEFAULT_CAMPAIGN_COUNT};
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::view_controller::ViewState;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page_size: usize,
    pub refresh_interval_secs: u64,
    pub refresh_latency_ms: u64,
    pub campaign_count: usize,
    pub mock_seed: Option<u64>,
    pub malformed_bounds: MalformedBoundPolicy,
    pub log_filter: String,
    pub filters: FilterCriteria,
    pub sort: SortSpec,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refresh_interval_secs: 30,
            refresh_latency_ms: 1_000,
            campaign_count: DEFAULT_CAMPAIGN_COUNT,
            mock_seed: None,
            malformed_bounds: MalformedBoundPolicy::default(),
            log_filter: "info".to_string(),
            filters: FilterCriteria::default(),
            sort: SortSpec::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = default_config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("failed to parse toml")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero")
        }
        if self.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be greater than zero")
        }
        Ok(())
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.page_size).unwrap_or_default()
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn refresh_latency(&self) -> Duration {
        Duration::from_millis(self.refresh_latency_ms)
    }

    pub fn mock_source(&self) -> MockSource {
        match self.mock_seed {
            Some(seed) => MockSource::seeded(self.campaign_count, seed),
            None => MockSource::new(self.campaign_count),
        }
    }

    pub fn query_service(&self) -> QueryService {
        QueryService::new(self.page_size(), self.malformed_bounds)
    }

    pub fn initial_view(&self) -> ViewState {
        ViewState::new(self.filters.clone(), self.sort)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "campaign-dashboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
