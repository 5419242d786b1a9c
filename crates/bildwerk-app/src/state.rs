// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UI-facing notice model — every operation outcome the user should see,
// success or failure, becomes a dismissible notice.

use bildwerk_core::error::BildwerkError;
use bildwerk_core::human_errors::humanize_error;

/// How a notice is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible message shown inside the compose overlay.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Short heading.
    pub heading: String,
    /// Supporting body text.
    pub body: String,
}

impl Notice {
    pub fn success(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// Build an error notice from the human-readable mapping.
    pub fn error(err: &BildwerkError) -> Self {
        let human = humanize_error(err);
        Self {
            kind: NoticeKind::Error,
            heading: human.message,
            body: human.suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_notice_carries_the_human_message() {
        let notice = Notice::error(&BildwerkError::ShareUnavailable);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(!notice.heading.is_empty());
        assert!(!notice.body.is_empty());
    }

    #[test]
    fn success_notice_round_trips_text() {
        let notice = Notice::success("Shared", "3 pages handed to the share sheet.");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.heading, "Shared");
    }
}
