use anyhow::{Context, Result};
use dumbgit_refs::TagSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Time allowed for reading request headers, and separately the body
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);
/// Time allowed for producing a complete response
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);
/// A connection moving no bytes for this long is closed
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory served over HTTP and searched for repositories
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Write request logs to stdout
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub refs: RefsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefsConfig {
    /// Directory tag hashes are read from
    #[serde(default)]
    pub tag_source: TagSource,
    /// What an unreadable refs/tags directory does to the server
    #[serde(default)]
    pub on_tags_error: TagsErrorPolicy,
}

/// Response to a `refs/tags` directory that cannot be listed.
///
/// `Exit` stops the whole server, taking every in-flight request with it.
/// Heads that cannot be listed only ever produce a 404, so `NotFound`
/// brings tags in line with that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagsErrorPolicy {
    #[default]
    Exit,
    NotFound,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            host: default_host(),
            port: default_port(),
            verbose: false,
            refs: RefsConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Anchor a relative `dir` at the process working directory
    pub fn absolutize(mut self) -> Result<Self> {
        if self.dir.is_relative() {
            let cwd = std::env::current_dir().context("Failed to determine working directory")?;
            self.dir = if self.dir == Path::new(".") {
                cwd
            } else {
                cwd.join(&self.dir)
            };
        }
        Ok(self)
    }

    /// Listen address as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
