use dotenvy::dotenv;
use tracing::{error, info};

use malisha::router::init_router;
use malisha::state::init_app_state;
use malisha_config::ServerConfig;
use malisha_observability::{init_console_logging, init_metrics, metrics_app};

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_console_logging("info");

    let state = match init_app_state() {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, "Failed to initialize application state");
            std::process::exit(1);
        }
    };

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics exposed at /metrics");
    }

    let server_config = ServerConfig::from_env();
    let listener = match tokio::net::TcpListener::bind(&server_config.addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %server_config.addr, error = %err, "Failed to bind");
            std::process::exit(1);
        }
    };

    let base = format!("http://{}", server_config.addr.replace("0.0.0.0", "localhost"));
    println!("🚀 Gateway running on {}", base);
    println!("📚 Swagger UI available at {}/swagger-ui", base);
    println!("📖 Scalar UI available at {}/scalar", base);

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server error");
        std::process::exit(1);
    }
}
