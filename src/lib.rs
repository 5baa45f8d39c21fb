pub mod api;
pub mod auth;
pub mod config;
pub mod contacts;
pub mod error;
pub mod notify;
pub mod observe;
pub mod resume;
pub mod session;
pub mod storage;
pub mod validate;

mod app;
mod components;
mod pages;

use leptos::prelude::*;

use app::App;
use config::AppConfig;

/// Browser entry point: install console logging and mount the app.
pub fn run() {
    let config = AppConfig::load();
    init_tracing(&config.log_filter);

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}

fn init_tracing(default_filter: &str) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(fmt_layer)
        .init();
}
