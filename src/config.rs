use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub monitoring: MonitoringConfig,
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Time between samples; also the denominator of every rate.
    pub sample_interval_ms: u64,
    /// How often the worker logs app stats at INFO level.
    pub stats_log_interval_secs: u64,
    /// Fixed offset for snapshot timestamps. Unset means the host's local zone.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            stats_log_interval_secs: 60,
            utc_offset_minutes: None,
        }
    }
}

/// Where each metric is read from. Paths are overridable so tests (and odd platforms) can
/// point the reader at other files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub net_dev: String,
    pub cpu_stat: String,
    pub uptime: String,
    pub loadavg: String,
    pub meminfo: String,
    pub thermal: String,
    /// Program and arguments printing a `df`-style table in 1 KB blocks.
    pub disk_command: Vec<String>,
    pub columns: ColumnsConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            net_dev: "/proc/net/dev".into(),
            cpu_stat: "/proc/stat".into(),
            uptime: "/proc/uptime".into(),
            loadavg: "/proc/loadavg".into(),
            meminfo: "/proc/meminfo".into(),
            thermal: "/sys/class/thermal/thermal_zone0/temp".into(),
            disk_command: vec!["df".into()],
            columns: ColumnsConfig::default(),
        }
    }
}

/// Field indices into whitespace-split rows. For the network table, field 0 is the
/// `name:` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub net_rx_bytes: usize,
    pub net_tx_bytes: usize,
    pub disk_total: usize,
    pub disk_used: usize,
    pub disk_available: usize,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            net_rx_bytes: 1,
            net_tx_bytes: 9,
            disk_total: 1,
            disk_used: 2,
            disk_available: 3,
        }
    }
}

impl AppConfig {
    /// Load from `explicit`, else `CONFIG_FILE`, else `config.toml` when it exists, else defaults.
    /// A file that was named explicitly (flag or env) must be readable.
    pub fn load(explicit: Option<&str>) -> anyhow::Result<Self> {
        let named = explicit
            .map(str::to_owned)
            .or_else(|| std::env::var("CONFIG_FILE").ok());
        let path = match named {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH.into(),
            None => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
        };
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the listening port (CLI flag) and re-check.
    pub fn with_port(mut self, port: u16) -> anyhow::Result<Self> {
        self.server.port = port;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        if let Some(offset) = self.monitoring.utc_offset_minutes {
            anyhow::ensure!(
                offset.abs() < 24 * 60,
                "monitoring.utc_offset_minutes must be within +/-1439, got {}",
                offset
            );
        }
        anyhow::ensure!(
            !self.sources.disk_command.is_empty() && !self.sources.disk_command[0].is_empty(),
            "sources.disk_command must name a program"
        );
        let c = &self.sources.columns;
        anyhow::ensure!(
            c.net_rx_bytes > 0 && c.net_tx_bytes > 0,
            "sources.columns.net_rx_bytes/net_tx_bytes must be >= 1 (field 0 is the interface name)"
        );
        anyhow::ensure!(
            c.disk_total > 0 && c.disk_used > 0 && c.disk_available > 0,
            "sources.columns.disk_* must be >= 1 (field 0 is the filesystem)"
        );
        Ok(())
    }
}
