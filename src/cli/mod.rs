pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore};

#[derive(Parser)]
#[command(name = "devconnector")]
#[command(about = "DevConnector administration - migrations, users and tokens")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply pending migrations to DATABASE_URL")]
    Migrate,

    #[command(about = "User account management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Mint an access token for an existing user")]
    Token {
        #[arg(long, help = "User id")]
        user: uuid::Uuid,
    },

    #[command(about = "Run the HTTP server")]
    Serve,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::migrate::handle(&config, output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, &config, output_format).await,
        Commands::Token { user } => commands::user::token(user, &config, output_format).await,
        Commands::Serve => crate::serve(config).await,
    }
}

/// Administrative commands always talk to Postgres, whatever STORE_BACKEND says.
pub(crate) async fn connect_store(config: &AppConfig) -> anyhow::Result<PgStore> {
    let manager = DatabaseManager::connect(&config.database).await?;
    Ok(PgStore::new(manager))
}
