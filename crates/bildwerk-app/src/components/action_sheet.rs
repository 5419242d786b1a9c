// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bottom action sheet offering the two photo sources plus cancel.

use dioxus::prelude::*;

#[component]
pub fn ActionSheet(
    on_take: EventHandler<()>,
    on_pick: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        // Dimmed backdrop; tapping it cancels, like tapping Cancel.
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; flex-direction: column; justify-content: flex-end; z-index: 20;",
            onclick: move |_| on_cancel.call(()),

            div {
                style: "background: white; border-radius: 16px 16px 0 0; padding: 16px;",
                onclick: move |evt| evt.stop_propagation(),

                h3 { style: "margin: 0 0 12px; text-align: center; font-size: 15px; color: #666;",
                    "Select Image Source"
                }

                button {
                    style: "width: 100%; padding: 14px; border: none; background: none; font-size: 17px; color: #007aff; border-top: 1px solid #eee;",
                    onclick: move |_| on_take.call(()),
                    "\u{1F4F7} Take Photo"
                }
                button {
                    style: "width: 100%; padding: 14px; border: none; background: none; font-size: 17px; color: #007aff; border-top: 1px solid #eee;",
                    onclick: move |_| on_pick.call(()),
                    "\u{1F5BC} Choose from Gallery"
                }
                button {
                    style: "width: 100%; padding: 14px; border: none; background: none; font-size: 17px; color: #ff3b30; border-top: 1px solid #eee;",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
