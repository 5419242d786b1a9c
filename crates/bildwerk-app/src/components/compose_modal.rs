// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compose overlay — collect photos and a caption, then assemble and share.
//
// All session state lives in this component's signals and is cleared when
// the overlay is dismissed; nothing survives a close-and-reopen.

use dioxus::prelude::*;

use bildwerk_core::ImageSelection;

use crate::components::action_sheet::ActionSheet;
use crate::services::composer::ComposerService;
use crate::state::{Notice, NoticeKind};

#[component]
pub fn ComposeModal(on_close: EventHandler<()>) -> Element {
    let svc = use_context::<ComposerService>();
    let mut selection = use_signal(ImageSelection::new);
    let mut caption = use_signal(String::new);
    let mut sheet_open = use_signal(|| false);
    let mut working = use_signal(|| false);
    let mut notice = use_signal(|| Option::<Notice>::None);

    let photo_count = selection.read().len();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: white; z-index: 10; display: flex; flex-direction: column; font-family: system-ui, -apple-system, sans-serif;",

            // Header with dismiss
            div { style: "display: flex; align-items: center; justify-content: space-between; padding: 12px 16px; border-bottom: 1px solid #e0e0e0;",
                h2 { style: "margin: 0; font-size: 18px;", "New Photo Document" }
                button {
                    style: "border: none; background: none; font-size: 16px; color: #007aff;",
                    onclick: move |_| {
                        // Dismiss discards the session: selection and caption
                        // do not survive a close-and-reopen.
                        selection.write().clear();
                        caption.set(String::new());
                        on_close.call(());
                    },
                    "Close"
                }
            }

            div { style: "flex: 1; overflow-y: auto; padding: 16px;",

                // Add photos
                button {
                    style: "width: 100%; padding: 16px; border-radius: 12px; border: 2px dashed #007aff; color: #007aff; background: white; font-size: 16px;",
                    disabled: working(),
                    onclick: move |_| sheet_open.set(true),
                    "\u{1F4F7} Add Photos"
                }

                // Selected photos
                if photo_count == 0 {
                    p { style: "text-align: center; color: #aaa; margin: 48px 0;",
                        "No photos selected yet."
                    }
                } else {
                    h3 { style: "margin: 16px 0 8px;", "{photo_count} photo(s)" }
                    div { style: "display: flex; gap: 8px; overflow-x: auto; padding: 8px 0;",
                        for (i, entry) in selection.read().iter().enumerate() {
                            {
                                let src = entry.display_path.display().to_string();
                                rsx! {
                                    div { style: "position: relative; min-width: 96px;",
                                        img {
                                            style: "width: 96px; height: 128px; object-fit: cover; border-radius: 4px; border: 1px solid #ccc;",
                                            src: "{src}",
                                        }
                                        button {
                                            style: "position: absolute; top: 4px; right: 4px; width: 22px; height: 22px; border-radius: 11px; border: none; background: rgba(0,0,0,0.6); color: white; font-size: 12px;",
                                            disabled: working(),
                                            onclick: move |_| {
                                                if selection.write().remove(i).is_none() {
                                                    tracing::warn!(index = i, "remove ignored: index out of range");
                                                }
                                            },
                                            "\u{2715}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                // Caption
                h3 { style: "margin: 16px 0 8px;", "Description" }
                textarea {
                    style: "width: 100%; min-height: 80px; padding: 10px; border-radius: 8px; border: 1px solid #ccc; font-size: 14px; font-family: inherit; box-sizing: border-box;",
                    placeholder: "Describe these photos...",
                    disabled: working(),
                    value: "{caption}",
                    oninput: move |evt| caption.set(evt.value()),
                }

                // Notice
                if let Some(ref n) = *notice.read() {
                    {
                        let (border, color) = match n.kind {
                            NoticeKind::Success => ("#34c759", "#1d7a3a"),
                            NoticeKind::Error => ("#ff3b30", "#b3261e"),
                        };
                        rsx! {
                            div { style: "margin-top: 16px; padding: 12px; border-radius: 8px; border: 1px solid {border};",
                                div { style: "display: flex; justify-content: space-between; align-items: baseline;",
                                    strong { style: "color: {color};", "{n.heading}" }
                                    button {
                                        style: "border: none; background: none; color: #666; font-size: 14px;",
                                        onclick: move |_| notice.set(None),
                                        "Dismiss"
                                    }
                                }
                                p { style: "margin: 6px 0 0; color: #444; font-size: 14px;", "{n.body}" }
                            }
                        }
                    }
                }
            }

            // Footer: assemble and share
            div { style: "padding: 16px; border-top: 1px solid #e0e0e0;",
                button {
                    style: "width: 100%; padding: 14px; border-radius: 12px; border: none; background: #007aff; color: white; font-size: 16px;",
                    disabled: working(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let svc = svc.clone();
                            working.set(true);
                            notice.set(None);
                            spawn(async move {
                                let entries = selection.read().entries().to_vec();
                                let text = caption.read().clone();
                                match svc.assemble_and_share(&entries, &text).await {
                                    Ok(summary) => {
                                        tracing::info!(id = %summary.id, pages = summary.pages, "document shared");
                                        notice.set(Some(Notice::success(
                                            "Shared",
                                            format!("{} page(s) handed to the share sheet.", summary.pages),
                                        )));
                                    }
                                    Err(err) => {
                                        tracing::error!(error = %err, kind = ?err.kind(), "assemble-and-share failed");
                                        notice.set(Some(Notice::error(&err)));
                                    }
                                }
                                working.set(false);
                            });
                        }
                    },
                    if working() { "Preparing..." } else { "Share as PDF" }
                }
            }

            // Source chooser
            if sheet_open() {
                ActionSheet {
                    on_take: {
                        let svc = svc.clone();
                        move |_| {
                            sheet_open.set(false);
                            match svc.capture_photo() {
                                Ok(Some(entry)) => selection.write().push(entry),
                                Ok(None) => {}
                                Err(err) => {
                                    tracing::error!(error = %err, "capture failed");
                                    notice.set(Some(Notice::error(&err)));
                                }
                            }
                        }
                    },
                    on_pick: {
                        let svc = svc.clone();
                        move |_| {
                            sheet_open.set(false);
                            match svc.pick_photos() {
                                Ok(entries) => selection.write().extend(entries),
                                Err(err) => {
                                    tracing::error!(error = %err, "pick failed");
                                    notice.set(Some(Notice::error(&err)));
                                }
                            }
                        }
                    },
                    on_cancel: move |_| sheet_open.set(false),
                }
            }
        }
    }
}
