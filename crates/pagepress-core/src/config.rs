//! Global configuration loaded from `~/.config/pagepress/config.toml`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Settings that rarely change between runs; per-run options (base URL,
/// proxy, output directory) stay on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagepressConfig {
    /// Browser binary used for captures.
    pub browser: String,
    /// Extra flags appended after the fixed headless flag set.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Output artifact extension (no leading dot).
    pub extension: String,
    /// Default concurrent capture count when `-t` is not given.
    /// None = host CPU count.
    #[serde(default)]
    pub default_jobs: Option<usize>,
}

impl Default for PagepressConfig {
    fn default() -> Self {
        Self {
            browser: "chromium".to_string(),
            extra_args: Vec::new(),
            extension: "pdf".to_string(),
            default_jobs: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagepress")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PagepressConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PagepressConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PagepressConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PagepressConfig::default();
        assert_eq!(cfg.browser, "chromium");
        assert_eq!(cfg.extension, "pdf");
        assert!(cfg.extra_args.is_empty());
        assert!(cfg.default_jobs.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PagepressConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PagepressConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.browser, cfg.browser);
        assert_eq!(parsed.extension, cfg.extension);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            browser = "chromium-browser"
            extension = "pdf"
            extra_args = ["--disable-extensions"]
            default_jobs = 4
        "#;
        let cfg: PagepressConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.browser, "chromium-browser");
        assert_eq!(cfg.extra_args, vec!["--disable-extensions".to_string()]);
        assert_eq!(cfg.default_jobs, Some(4));
    }

    #[test]
    fn config_toml_minimal() {
        let toml = r#"
            browser = "chromium"
            extension = "pdf"
        "#;
        let cfg: PagepressConfig = toml::from_str(toml).unwrap();
        assert!(cfg.extra_args.is_empty());
        assert!(cfg.default_jobs.is_none());
    }
}
