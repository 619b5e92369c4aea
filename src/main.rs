/// PetHaven - pet-adoption marketplace service
use pethaven::{config::ServerConfig, context::AppContext, error::ApiResult, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ApiResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pethaven=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context (storage backend, migrations, seed data)
    let ctx = AppContext::new(config).await?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ____       _   _   _
   |  _ \ ___| |_| | | | __ ___   _____ _ __
   | |_) / _ \ __| |_| |/ _` \ \ / / _ \ '_ \
   |  __/  __/ |_|  _  | (_| |\ V /  __/ | | |
   |_|   \___|\__|_| |_|\__,_| \_/ \___|_| |_|

        Pet Adoption Marketplace v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
