use clap::Parser;
use devconnector_api::cli::{utils::output_error, Cli, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    devconnector_api::init_tracing();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);
    let config = devconnector_api::config::config().clone();

    if let Err(e) = devconnector_api::cli::run(cli, config).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => output_error(output_format, &format!("{e:?}")),
            _ => output_error(output_format, &e.to_string()),
        }
        std::process::exit(1);
    }

    Ok(())
}
