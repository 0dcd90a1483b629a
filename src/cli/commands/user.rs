use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::generate_jwt;
use crate::cli::{connect_store, utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::models::User;
use crate::database::{DatabaseError, UserStore};
use crate::validation::is_empty;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user and print an access token for it")]
    Create {
        #[arg(long, help = "Display name")]
        name: String,
        #[arg(long, help = "Email address (unique)")]
        email: String,
        #[arg(long, default_value = "", help = "Avatar URL")]
        avatar: String,
    },
}

pub async fn handle(cmd: UserCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Create { name, email, avatar } => {
            if is_empty(Some(&name)) {
                anyhow::bail!("--name must not be blank");
            }
            if is_empty(Some(&email)) || !email.contains('@') {
                anyhow::bail!("--email must be an email address");
            }

            let store = connect_store(config).await?;
            let user = User::new(name.trim(), email.trim().to_lowercase(), avatar.trim());
            let user = match store.insert_user(&user).await {
                Ok(user) => user,
                Err(DatabaseError::UniqueViolation(_)) => anyhow::bail!("A user with email {} already exists", email),
                Err(e) => return Err(e.into()),
            };
            let token = generate_jwt(&user, &config.security)?;

            output_success(
                output_format,
                &format!("Created user {}", user.name),
                Some(json!({ "id": user.id, "token": token })),
            )
        }
    }
}

pub async fn token(user_id: Uuid, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = connect_store(config).await?;
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No user with id {}", user_id))?;
    let token = generate_jwt(&user, &config.security)?;

    output_success(
        output_format,
        &format!("Token for {}", user.name),
        Some(json!({ "id": user.id, "token": token, "expires_in_hours": config.security.jwt_expiry_hours })),
    )
}
