//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` on `FIREWORKS_PORT` (default 8000).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::{Command, ExitCode};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = match std::env::var("FIREWORKS_PORT") {
        Ok(value) => match value.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                tracing::error!(value = %value, "FIREWORKS_PORT is not a port number");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => 8000,
    };

    tracing::info!("building wasm bundle");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(status) if status.success() => {}
        Ok(status) => {
            tracing::error!(%status, "wasm-pack failed");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            // serve whatever bundle is already there
            tracing::warn!("wasm-pack not runnable ({err}); static/pkg may be stale");
        }
    }

    tracing::info!("serving static/ at http://127.0.0.1:{port}");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .status();
    match server {
        Ok(status) if status.success() => ExitCode::SUCCESS,
        Ok(status) => {
            tracing::error!(%status, "http server exited");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("failed to start python3 http.server: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
