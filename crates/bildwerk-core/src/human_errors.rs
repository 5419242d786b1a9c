// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the notice UI.
//
// Every technical error maps to plain English with a clear suggestion. The
// severity levels drive how the notice is presented.

use crate::error::BildwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again right away.
    Transient,
    /// User must do something first (grant a permission, pick a different photo).
    ActionRequired,
    /// Cannot be fixed by retrying on this device.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether tapping "try again" is worthwhile.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `BildwerkError` into a `HumanError` for the dismissible notice.
pub fn humanize_error(err: &BildwerkError) -> HumanError {
    match err {
        BildwerkError::Camera(_) => HumanError {
            message: "The photo couldn't be taken.".into(),
            suggestion: "Check that the camera works in other apps, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::Gallery(_) => HumanError {
            message: "Those photos couldn't be loaded from your gallery.".into(),
            suggestion: "Try choosing the photos again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::PermissionDenied(capability) => HumanError {
            message: format!("Bildwerk doesn't have permission to use the {capability}."),
            suggestion: "Open your device settings and allow access, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BildwerkError::ImageLoad(_) => HumanError {
            message: "One of the photos couldn't be read.".into(),
            suggestion: "It may have been moved or deleted. Remove it from the list and add it again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BildwerkError::ImageLoadTimeout { .. } => HumanError {
            message: "A photo took too long to load.".into(),
            suggestion: "Try again. If it keeps happening, remove that photo and re-add it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::Image(_) => HumanError {
            message: "There's a problem with one of the photos.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try a different photo.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BildwerkError::Pdf(_) => HumanError {
            message: "The document couldn't be put together.".into(),
            suggestion: "Try again with fewer photos.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::ShareUnavailable => HumanError {
            message: "Sharing isn't available on this device.".into(),
            suggestion: "This device has no share sheet. Nothing was created or sent.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BildwerkError::Share(_) => HumanError {
            message: "The document couldn't be shared.".into(),
            suggestion: "Try sharing again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::AssemblyInProgress => HumanError {
            message: "A document is already being prepared.".into(),
            suggestion: "Wait a moment for it to finish, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "A file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try adding the photo again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        BildwerkError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::Bridge(_) => HumanError {
            message: "A device-specific feature didn't work.".into(),
            suggestion: "Try restarting the app. Some features may not be available on all devices.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BildwerkError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Some features require a phone or tablet with a camera.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_failure_is_transient() {
        let human = humanize_error(&BildwerkError::Camera("hardware busy".into()));
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn permission_denied_is_action_required() {
        let human = humanize_error(&BildwerkError::PermissionDenied("camera".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
        assert!(human.message.contains("camera"));
    }

    #[test]
    fn share_unavailable_is_permanent() {
        let human = humanize_error(&BildwerkError::ShareUnavailable);
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }

    #[test]
    fn busy_is_retriable() {
        let human = humanize_error(&BildwerkError::AssemblyInProgress);
        assert!(human.retriable);
    }

    #[test]
    fn missing_file_is_action_required() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let human = humanize_error(&BildwerkError::Io(io));
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
