use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;

static DEFAULT_DB_NAME: &str = "tasks.db";
static DEFAULT_JSON_NAME: &str = "todos.json";
static DEFAULT_LOG_NAME: &str = "tasklet.log";
static ENV_DATA_DIR: &str = "TASKLET_DATA_DIR";
static ENV_STORE: &str = "TASKLET_STORE";

/// Which persistence backend holds the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Json,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Json => "json",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sql" | "db" => Ok(StoreBackend::Sqlite),
            "json" | "file" => Ok(StoreBackend::Json),
            other => Err(anyhow!(
                "Unknown store '{}': expected sqlite|json",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    backend: StoreBackend,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data directory and backend from the provided
    /// overrides, then environment variables, then the working directory.
    pub fn discover(
        data_dir_override: Option<PathBuf>,
        backend_override: Option<StoreBackend>,
    ) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        let backend = match backend_override {
            Some(backend) => backend,
            None => resolve_backend()?,
        };
        Ok(Self::from_data_dir(data_dir, backend))
    }

    /// Construct [`AppConfig`] directly from a resolved data directory.
    pub fn from_data_dir(data_dir: PathBuf, backend: StoreBackend) -> Self {
        Self { data_dir, backend }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_DB_NAME)
    }

    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_JSON_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_LOG_NAME)
    }

    /// Path of the file backing the selected store.
    pub fn store_path(&self) -> PathBuf {
        match self.backend {
            StoreBackend::Sqlite => self.db_path(),
            StoreBackend::Json => self.json_path(),
        }
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        if !env_dir.is_empty() {
            return Ok(PathBuf::from(env_dir));
        }
    }

    env::current_dir().context("Failed to resolve the working directory")
}

fn resolve_backend() -> Result<StoreBackend> {
    match env::var(ENV_STORE) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .with_context(|| format!("Invalid {} value", ENV_STORE)),
        _ => Ok(StoreBackend::default()),
    }
}
