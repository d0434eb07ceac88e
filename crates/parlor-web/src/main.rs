//! Parlor server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p parlor-web
//! ```
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored). Subcommands cover the admin bootstrap and the offline
//! error report; with no subcommand the server starts.

use clap::{Parser, Subcommand};
use parlor_common::{generate_report, try_init_tracing, AppConfig};
use parlor_service::AuthService;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "parlor", version, about = "Chat room server with an admin panel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (the default)
    Serve,
    /// Create the admin account, or reset an existing user to admin
    CreateAdmin {
        /// Admin username (defaults to ADMIN_USERNAME)
        #[arg(long)]
        username: Option<String>,
        /// Admin password (defaults to ADMIN_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },
    /// Write a summary report of the category logs and print it
    ErrorReport,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::CreateAdmin { username, password } => create_admin(username, password).await,
        Command::ErrorReport => error_report(),
    };

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

/// Start the server
async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Parlor server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Configuration loaded"
    );

    parlor_web::server::run(config).await?;

    Ok(())
}

/// Create or refresh the admin account
async fn create_admin(
    username: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let username = username.unwrap_or_else(|| config.admin.username.clone());
    let password = password.unwrap_or_else(|| config.admin.password.clone());

    let state = parlor_web::server::create_app_state(config).await?;
    let service = AuthService::new(state.service_context());
    let outcome = service.bootstrap_admin(&username, &password).await?;

    if outcome.created {
        println!("Admin user '{}' created successfully", outcome.user.username);
    } else {
        println!(
            "Existing user '{}' promoted to admin with a new password",
            outcome.user.username
        );
    }

    Ok(())
}

/// Generate the summary report without starting the server
fn error_report() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let report = generate_report(&config.logging.logs_dir)?;

    println!("Report written to {}", report.path.display());
    println!();
    println!("{}", report.body);

    Ok(())
}
