// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — the host surface. One action: open the compose overlay.

use dioxus::prelude::*;

use crate::components::compose_modal::ComposeModal;

#[component]
pub fn Home() -> Element {
    let mut show_composer = use_signal(|| false);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100vh; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",

            h1 { "Bildwerk" }
            p { style: "color: #666;",
                "Collect photos, add a description, and share them as one PDF."
            }

            button {
                style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 24px;",
                onclick: move |_| show_composer.set(true),
                "New Photo Document"
            }

            if show_composer() {
                ComposeModal {
                    on_close: move |_| show_composer.set(false),
                }
            }
        }
    }
}
