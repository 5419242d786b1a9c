// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildwerk — Native platform bridge abstractions.
//
// Defines the capability traits (camera, gallery, share) and the platform
// dispatch that selects the compiled-in implementation: iOS via UIKit,
// Android via JNI, or the desktop substitute.

pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

/// Retrieve the bridge implementation for the target operating system.
///
/// Returns a boxed trait object (`dyn PlatformBridge`) that abstracts away
/// the underlying native SDK details.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "ios")]
    {
        // iOS: type-safe message passing to UIKit via `objc2`.
        Box::new(ios::IosBridge::new())
    }
    #[cfg(target_os = "android")]
    {
        // Android: JNI calls into the ART runtime via `jni-rs`.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // Desktop: file dialogs stand in for camera and gallery; sharing is
        // reported unavailable.
        Box::new(desktop::DesktopBridge::new())
    }
}
