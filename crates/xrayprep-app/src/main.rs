// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// X-Ray Image Preprocessor — desktop shell.
//
// Entry point. Initialises logging, loads settings, creates the image session,
// and launches the Dioxus UI.

mod pages;
mod preview;
mod services;
mod state;

use dioxus::prelude::*;

use xrayprep_core::FilterSettings;
use xrayprep_imaging::Session;

use pages::preprocessor::Preprocessor;
use services::settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("X-Ray preprocessor starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let config = use_hook(settings::load_config);

    // The session is the only business state; the page mutates it through
    // this signal from its event handlers.
    use_context_provider(|| Signal::new(open_session(config.filters)));
    use_context_provider(|| Signal::new(config.clone()));

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Preprocessor {}
            }
        }
    }
}

fn open_session(filters: FilterSettings) -> Session {
    match Session::with_settings(filters) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "invalid filter settings — using defaults");
            Session::new()
        }
    }
}
