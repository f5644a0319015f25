use clap::Parser;
use eyre::{Context, Result};

use crate::config::{self, Configuration, load_configuration, lookup_config_path};

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"A chat backend that answers questions with an OpenAI-compatible model and cites its sources

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/globalrate/config.toml
    * $HOME/.config/globalrate/config.toml
    * $HOME/.globalrate.toml
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Address to listen on, overrides `server.bind`
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Show the version
    #[arg(short, long)]
    version: bool,
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        let mut config = if config_path.is_empty() {
            // No config path is specified just use the default config
            Configuration::default()
        } else {
            load_configuration(&config_path).wrap_err("loading configuration")?
        };

        if let Some(bind) = self.bind.as_deref() {
            config.server.bind = bind.to_string();
        }
        Ok(config)
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }
}
