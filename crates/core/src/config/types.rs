use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub retriever: RetrieverConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8099
}

/// Where downloaded tracks are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Output root. The catalog is built from this tree at startup.
    #[serde(default = "default_base_folder")]
    pub base_folder: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_folder: default_base_folder(),
        }
    }
}

fn default_base_folder() -> PathBuf {
    PathBuf::from("downloads")
}

/// Target site
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Domain suffix every crawled host must end with (e.g. "bandcamp.com")
    #[serde(default = "default_domain")]
    pub domain: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
        }
    }
}

fn default_domain() -> String {
    "bandcamp.com".to_string()
}

/// HTTP retriever configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrieverConfig {
    /// Request timeout in seconds (0 = wait until the transport gives up)
    #[serde(default)]
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 0,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("tapedeck/{}", env!("CARGO_PKG_VERSION"))
}

/// Crawl behaviour
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CrawlConfig {
    /// How many tracks of one album may be fetched at once (1 = sequential, fail-fast)
    #[serde(default = "default_max_concurrent_tracks")]
    pub max_concurrent_tracks: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tracks: default_max_concurrent_tracks(),
        }
    }
}

fn default_max_concurrent_tracks() -> usize {
    1
}
