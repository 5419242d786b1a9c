// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildwerk — Photo-to-PDF Composer
//
// Entry point. Initialises logging, the composer service, and launches the
// Dioxus UI.

mod components;
mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::home::Home;
use services::composer::ComposerService;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Bildwerk starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
}

/// Root component.
fn app() -> Element {
    // Wire the platform bridge and composer once at startup.
    let svc = use_hook(ComposerService::init);
    tracing::info!(platform = svc.platform_name(), "composer service ready");

    // Provide the service as context for all pages.
    use_context_provider(|| svc.clone());

    rsx! {
        Router::<Route> {}
    }
}
