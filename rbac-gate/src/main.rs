use clap::{Parser, Subcommand};
use rbac_gate::{
    app_state::AppState, http::setup_http_server, init_telemetry, settings::config::Settings,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "rbac-gate")]
#[command(about = "Role based access control in front of an HTTP API")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration and loaded policy rules, then exit
    Config,
    /// Start the HTTP server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Existing environment variables win over .env.local, which wins over .env
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::new()?;

    if let Some(Commands::Config) = cli.command {
        let app_state = AppState::from_settings(settings).await?;
        println!("{:#?}", &app_state.settings);
        println!("Policy rules:");
        for rule in app_state.rbac.engine().policies().await {
            println!("  p, {}", rule.join(", "));
        }
        return Ok(());
    }

    init_telemetry::init_tracing(settings.debug)?;
    let app_state = AppState::from_settings(settings).await?;

    let handle = setup_http_server(app_state.clone(), &app_state.settings.api.bind_address).await?;
    handle.await??;

    info!("All tasks are done");
    Ok(())
}
