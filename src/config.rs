use log::info;
use std::env;
use std::io;
use std::path::PathBuf;

const API_URL_VAR: &str = "CATALOG_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote catalog API
    pub api_url: String,
    /// Directory holding preview copies of staged images
    pub preview_cache_dir: PathBuf,
}

impl Config {
    /// Read the API URL from the environment (with a local default) and
    /// ensure the preview cache directory exists.
    pub fn load() -> io::Result<Self> {
        let api_url = env::var(API_URL_VAR).unwrap_or_else(|_| {
            info!("{} not set, using default: {}", API_URL_VAR, DEFAULT_API_URL);
            DEFAULT_API_URL.to_string()
        });
        // Trailing slash would double up in endpoint paths
        let api_url = api_url.trim_end_matches('/').to_string();

        let preview_cache_dir = Self::cache_dir();
        std::fs::create_dir_all(&preview_cache_dir)?;

        info!("preview cache at {}", preview_cache_dir.display());
        Ok(Self {
            api_url,
            preview_cache_dir,
        })
    }

    /// Preview cache location:
    /// - Linux: ~/.cache/catalog-admin/previews
    /// - macOS: ~/Library/Caches/catalog-admin/previews
    /// - Windows: %LOCALAPPDATA%\catalog-admin\previews
    fn cache_dir() -> PathBuf {
        let mut path = dirs::cache_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(env::temp_dir);
        path.push("catalog-admin");
        path.push("previews");
        path
    }
}
