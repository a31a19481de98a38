use std::env;
use std::path::PathBuf;

use anyhow::Context;
use kanban_shared::DEFAULT_CATEGORY;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store_file: String,
    pub category: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = match env::var("KANBAN_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .context("Could not find data directory")?
                .join("kanban"),
        };

        Ok(Self {
            data_dir,
            store_file: env::var("KANBAN_STORE_FILE")
                .unwrap_or_else(|_| "storage.json".to_string()),
            category: env::var("KANBAN_CATEGORY")
                .unwrap_or_else(|_| DEFAULT_CATEGORY.to_string()),
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("kanban.log")
    }
}
