pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod export;
pub mod generator;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{ActivityCommands, Cli, Commands, UserCommands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    // A missing .env is normal outside development.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    let serving = matches!(cli.command, Some(Commands::Serve));
    let prometheus_handle = if serving && config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve => cli::cmd_serve(config, prometheus_handle).await,

        Commands::Generate(args) => cli::cmd_generate(&config, args).await,

        Commands::User { command } => match command {
            UserCommands::Create {
                username,
                email,
                password,
                admin,
            } => cli::cmd_user_create(&config, &username, &email, password, admin).await,
            UserCommands::List => cli::cmd_user_list(&config).await,
            UserCommands::Delete { username } => cli::cmd_user_delete(&config, &username).await,
        },

        Commands::Activity { command } => match command {
            ActivityCommands::Export { format, output } => {
                cli::cmd_activity_export(&config, format, output).await
            }
        },

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists; left unchanged.");
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so `generate` output can be piped.
    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
