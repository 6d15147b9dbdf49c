use crate::codec::CodecOptions;
use crate::store::{StoreOptions, DEFAULT_CHUNK_SIZE};
use crate::{info, StoreError};
use chrono::format::{Item, StrftimeItems};
use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Once;

pub const ENV_PREFIX: &str = "PATIENTMANAGER";
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.toml";

static DOTENV_ONCE: Once = Once::new();

fn ensure_dotenv_loaded() {
    DOTENV_ONCE.call_once(|| {
        match dotenv() {
            Ok(_) => info!("Config loaded including .env file."),
            Err(_) => info!("Config loaded without .env file."),
        }
    });
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub patients_file: String,
    pub users_file: String,
    pub chunk_size: usize,
    pub date_format: String,
    /// Bound of every console retry loop.
    pub max_input_attempts: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            patients_file: "patients.csv".to_string(),
            users_file: "user.csv".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            date_format: CodecOptions::default().date_format,
            max_input_attempts: 5,
        }
    }
}

impl Settings {
    /// Defaults, overridden by the optional file at `path`, overridden by
    /// `PATIENTMANAGER__*` environment variables (`.env` included).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        ensure_dotenv_loaded();

        let builder = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            );

        let settings = builder.build()?.try_deserialize::<Settings>()?;
        if StrftimeItems::new(&settings.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Message(format!("Invalid date_format `{}`", settings.date_format)).into());
        }
        info!("{:#?}", settings);
        Ok(settings)
    }

    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Self::default() }
    }

    pub fn patients_path(&self) -> PathBuf {
        self.data_dir.join(&self.patients_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            chunk_size: self.chunk_size,
            codec: CodecOptions { date_format: self.date_format.clone() },
        }
    }
}
