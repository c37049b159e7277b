pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::types::AppKind;

#[derive(Parser)]
#[command(name = "fullstack-api")]
#[command(about = "Serve the fyyur, trivia or casting JSON API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Print command output as JSON instead of YAML")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run one app's HTTP server")]
    Serve {
        #[arg(value_enum, help = "Which app to serve")]
        app: AppKind,

        #[arg(long, help = "Listen port (overrides PORT and the config file)")]
        port: Option<u16>,

        #[arg(long, help = "YAML config file")]
        config: Option<PathBuf>,

        #[arg(long, help = "Keep data in memory instead of Postgres")]
        memory: bool,
    },

    #[command(about = "Print the effective configuration")]
    Config {
        #[arg(long, help = "YAML config file")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve {
            app,
            port,
            config,
            memory,
        } => commands::serve::handle(app, port, config, memory).await,
        Commands::Config { config } => commands::config::handle(config, output_format),
    }
}
