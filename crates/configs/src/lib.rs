use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub vehicles: ServerConfig,
    #[serde(default = "default_pricing_server")]
    pub pricing: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub peers: PeerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

fn default_pricing_server() -> ServerConfig {
    ServerConfig { port: 8082, ..ServerConfig::default() }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Endpoints of the sibling services the vehicles service calls out to.
#[derive(Debug, Clone, Deserialize)]
pub struct PeerConfig {
    #[serde(default = "default_pricing_endpoint")]
    pub pricing_endpoint: String,
    #[serde(default = "default_maps_endpoint")]
    pub maps_endpoint: String,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            pricing_endpoint: default_pricing_endpoint(),
            maps_endpoint: default_maps_endpoint(),
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_pricing_endpoint() -> String { "http://localhost:8082".into() }
fn default_maps_endpoint() -> String { "http://localhost:9191".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.vehicles.normalize("VEHICLES_PORT")?;
        self.pricing.normalize("PRICING_PORT")?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.peers.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self, port_env: &str) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        }
        if let Some(p) = std::env::var(port_env).ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = p;
        }
        if self.port == 0 {
            return Err(anyhow!("server port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            _ => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML may omit the URL; fall back to the environment.
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl PeerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("PRICING_ENDPOINT") {
            if !url.trim().is_empty() {
                self.pricing_endpoint = url;
            }
        }
        if let Ok(url) = std::env::var("MAPS_ENDPOINT") {
            if !url.trim().is_empty() {
                self.maps_endpoint = url;
            }
        }
    }
}
