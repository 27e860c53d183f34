use clap::Parser;
use rosterapp::config::RosterConfig;
use rosterapp::error::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "HTTP service for managing user records", long_about = None)]
pub struct Cli {
    /// TOML config file (optional; missing files are ignored)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Flat file holding the user records
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,
}

impl Cli {
    /// Loads config from env and file, then applies flags on top.
    pub fn load_config(&self) -> Result<RosterConfig> {
        let mut config = RosterConfig::load(self.config.as_deref())?;
        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if let Some(data_file) = &self.data_file {
            config.data_file = Some(data_file.clone());
        }
        Ok(config)
    }
}
