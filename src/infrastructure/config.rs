use anyhow::Context;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("server.host {:?} is not an IP address", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub mode: TelemetryMode,
    /// Falls back to the source's own period when unset
    pub interval_ms: Option<u64>,
    /// Random-walk seed; entropy when unset
    pub seed: Option<u64>,
    pub channel_capacity: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryMode {
    Deterministic,
    RandomWalk,
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_from("config/dashboard")
}

fn load_from(file: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.static_dir", "dist")?
        .set_default("telemetry.mode", "deterministic")?
        .set_default("telemetry.channel_capacity", 16)?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    if config.telemetry.interval_ms == Some(0) {
        anyhow::bail!("telemetry.interval_ms must be greater than zero");
    }
    Ok(config)
}
