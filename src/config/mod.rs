#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use self::toml_config::PortalConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dealer-portal")]
#[command(about = "Dealer portal client: registration, login and services list")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Directory holding the persisted portal data (overrides config)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Skip the simulated network delay
    #[arg(long)]
    pub no_latency: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入配置檔並套用命令列覆蓋設定
    pub fn resolve(&self) -> crate::utils::error::Result<PortalConfig> {
        let mut config = match &self.config {
            Some(path) => PortalConfig::from_file(path)?,
            None => PortalConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.storage.path = dir.clone();
        }
        if self.no_latency {
            config.latency = Some(toml_config::LatencyConfig {
                register_ms: Some(0),
                login_ms: Some(0),
            });
        }

        Ok(config)
    }
}
