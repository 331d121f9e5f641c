use anyhow::Context;
use clap::{Parser, Subcommand};
use roster_config::{load as load_config, AppConfig};
use roster_gateway::{create_router, openapi_json, GatewayState};
use roster_runtime::{telemetry, BackendServices};
use roster_users::UserService;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Roster user service (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Print every stored user
    DumpUsers,
    /// Print the OpenAPI document as JSON
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Migrate => migrate().await,
        Commands::DumpUsers => dump_users().await,
        Commands::Openapi => print_openapi(),
    }
}

/// Load configuration and install the tracing subscriber it describes.
fn bootstrap() -> anyhow::Result<AppConfig> {
    let config = load_config().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging.filter).context("failed to initialise tracing")?;
    Ok(config)
}

async fn run_server() -> anyhow::Result<()> {
    let config = bootstrap()?;

    info!("starting Roster backend");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.db_pool.clone());
    let app = create_router(state);

    let address = config.http.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(roster_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn migrate() -> anyhow::Result<()> {
    let config = bootstrap()?;

    BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    println!("Migrations applied to {}", config.database.url);
    Ok(())
}

async fn dump_users() -> anyhow::Result<()> {
    let config = bootstrap()?;

    info!("dumping users from database");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let service = UserService::new(services.db_pool.clone());
    let count = service.user_count().await.context("failed to count users")?;

    println!("=== USERS ===");
    if count == 0 {
        println!("No users found in database");
        return Ok(());
    }

    let users = service.list_users().await.context("failed to fetch users")?;

    println!("Found {count} users:");
    println!(
        "{:<5} {:<30} {:<40} {:<35} {:<35}",
        "ID", "Name", "Email", "Created At", "Updated At"
    );
    println!("{}", "-".repeat(150));

    for user in users {
        println!(
            "{:<5} {:<30} {:<40} {:<35} {:<35}",
            user.id, user.name, user.email, user.created_at, user.updated_at
        );
    }

    Ok(())
}

fn print_openapi() -> anyhow::Result<()> {
    let document = openapi_json().context("failed to render OpenAPI document")?;
    println!("{document}");
    Ok(())
}
