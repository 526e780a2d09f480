// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preprocessor page — load a radiograph, apply one enhancement filter at a
// time, preview the result, and save it as PNG.
//
// Every button delegates to the image session; this page only owns the
// preview and the notice line.

use std::path::Path;

use dioxus::prelude::*;

use xrayprep_core::AppConfig;
use xrayprep_core::FilterKind;
use xrayprep_core::error::{Result, XrayPrepError};
use xrayprep_imaging::Session;

use crate::preview;
use crate::services::settings;
use crate::state::Notice;

const BUTTON_STYLE: &str = "padding: 10px 14px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 14px;";

#[component]
pub fn Preprocessor() -> Element {
    let mut session = use_context::<Signal<Session>>();
    let config = use_context::<Signal<AppConfig>>();
    let preview_uri = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<Notice>::None);

    rsx! {
        div {
            h1 { style: "text-align: center;", "X-Ray Image Preprocessor" }

            // Image display area
            div { style: "display: flex; align-items: center; justify-content: center; min-height: 60vh; margin: 16px 0; background: #111; border-radius: 8px;",
                if let Some(ref uri) = *preview_uri.read() {
                    img {
                        src: "{uri}",
                        style: "max-width: 100%; max-height: 60vh; object-fit: contain;",
                    }
                } else {
                    p { style: "color: #aaa;", "No image loaded." }
                }
            }

            if let Some(info) = session.read().info() {
                p { style: "text-align: center; color: #666; font-size: 13px;", "{info} px" }
            }

            // Toolbar
            div { style: "display: flex; flex-wrap: wrap; gap: 8px; justify-content: center;",
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        let Some(path) = pick_image(&config.read()) else {
                            return; // Cancelled by user
                        };
                        remember_directory(config, &path);
                        // Reloading drops any unsaved result without asking.
                        let outcome = session.write().load(&path).map(|_| ());
                        refresh(outcome, session, preview_uri, notice);
                    },
                    "Load X-Ray Image"
                }

                for kind in FilterKind::ALL {
                    button {
                        key: "{kind}",
                        style: BUTTON_STYLE,
                        onclick: move |_| {
                            let outcome = session.write().apply(kind).map(|_| ());
                            refresh(outcome, session, preview_uri, notice);
                        },
                        "{kind.label()}"
                    }
                }

                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        let outcome = session.write().revert().map(|_| ());
                        refresh(outcome, session, preview_uri, notice);
                    },
                    "Revert to Original"
                }

                button {
                    style: "padding: 10px 14px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 14px;",
                    onclick: move |_| {
                        if session.read().current().is_none() {
                            notice.set(Some(Notice::from_error(&XrayPrepError::NoProcessedImage)));
                            return;
                        }
                        let Some(path) = pick_destination(&config.read()) else {
                            return;
                        };
                        remember_directory(config, &path);
                        let saved = session.read().save(&path);
                        match saved {
                            Ok(()) => {
                                tracing::info!(path = %path.display(), "processed image saved");
                                notice.set(Some(Notice::info(
                                    "Processed image saved successfully!",
                                    Some(path.display().to_string()),
                                )));
                            }
                            Err(e) => notice.set(Some(Notice::from_error(&e))),
                        }
                    },
                    "Save Processed Image"
                }
            }

            // Notice
            if let Some(ref n) = *notice.read() {
                div { style: "margin-top: 12px; text-align: center; font-size: 14px; color: {n.colour()};",
                    strong { "{n.heading}" }
                    if let Some(ref detail) = n.detail {
                        p { style: "margin: 4px 0; color: #666;", "{detail}" }
                    }
                }
            }
        }
    }
}

/// Surface the result of a session call and redraw the preview from
/// whatever the session now holds.
///
/// A failed call leaves the session untouched, so the preview stays. Once a
/// call succeeds the preview always follows the session: if it cannot be
/// rendered it is cleared rather than left showing an older image.
fn refresh(
    outcome: Result<()>,
    session: Signal<Session>,
    mut preview_uri: Signal<Option<String>>,
    mut notice: Signal<Option<Notice>>,
) {
    if let Err(e) = outcome {
        notice.set(Some(Notice::from_error(&e)));
        return;
    }
    let rendered = preview::render(&session.read());
    match rendered {
        Ok(uri) => {
            preview_uri.set(uri);
            notice.set(None);
        }
        Err(e) => {
            tracing::warn!(error = %e, "preview could not be rendered");
            preview_uri.set(None);
            notice.set(Some(Notice::from_error(&e)));
        }
    }
}

fn pick_image(config: &AppConfig) -> Option<std::path::PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open X-Ray Image")
        .add_filter("Image files", &["png", "jpg", "jpeg"]);
    if let Some(ref dir) = config.last_directory {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

fn pick_destination(config: &AppConfig) -> Option<std::path::PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save Processed Image")
        .add_filter("PNG files", &["png"])
        .set_file_name("processed.png");
    if let Some(ref dir) = config.last_directory {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

/// Point the next dialog at the folder the operator just used.
fn remember_directory(mut config: Signal<AppConfig>, path: &Path) {
    let Some(dir) = path.parent() else {
        return;
    };
    if config.read().last_directory.as_deref() == Some(dir) {
        return;
    }
    config.write().last_directory = Some(dir.to_path_buf());
    if let Err(e) = settings::persist_config(&config.read()) {
        tracing::warn!(error = %e, "failed to persist settings");
    }
}
