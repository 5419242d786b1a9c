// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bridge via objc2.
//
// Requires compilation with the iOS SDK (Xcode). Each trait method wraps the
// corresponding UIKit API through Objective-C message sends.
//
// This module is cfg-gated to `target_os = "ios"` and will not compile on
// other platforms. All UIKit interactions require the main thread; methods
// that present view controllers return `BildwerkError::Bridge` if called
// off-main.

#![cfg(target_os = "ios")]

use std::cell::RefCell;
use std::ffi::c_void;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

use objc2::rc::Retained;
use objc2::runtime::{AnyObject, NSObject};
use objc2::{MainThreadMarker, MainThreadOnly, define_class, msg_send};
use objc2_foundation::{NSArray, NSDictionary, NSString, NSURL};
use objc2_ui_kit::{
    UIActivityViewController, UIApplication, UIImagePickerController,
    UIImagePickerControllerDelegate, UIImagePickerControllerSourceType,
    UINavigationControllerDelegate, UIViewController,
};

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::types::{CaptureOptions, ImageEntry, PickOptions, ShareRequest};

use crate::traits::*;

// ---------------------------------------------------------------------------
// UIKit C functions & constants
// ---------------------------------------------------------------------------

extern "C" {
    /// Key into the `info` dictionary passed to the image-picker delegate.
    /// The value is the original `UIImage` chosen by the user.
    static UIImagePickerControllerOriginalImage: &'static NSString;

    /// Key for the cropped/rotated `UIImage` when editing was allowed.
    static UIImagePickerControllerEditedImage: &'static NSString;

    /// Convert a `UIImage` to JPEG `NSData`.
    ///
    /// ```c
    /// NSData * _Nullable UIImageJPEGRepresentation(UIImage *image,
    ///                                              CGFloat compressionQuality);
    /// ```
    fn UIImageJPEGRepresentation(
        image: *const AnyObject,
        compression_quality: f64,
    ) -> *mut AnyObject;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Obtain the root `UIViewController` from the key window.
///
/// Uses the deprecated `keyWindow` property for broad iOS-version compat.
fn root_view_controller() -> Result<Retained<UIViewController>> {
    let mtm = MainThreadMarker::new()
        .ok_or_else(|| BildwerkError::Bridge("must be called from the main thread".into()))?;

    let app = UIApplication::sharedApplication(mtm);

    // SAFETY: msg_send! to well-known UIApplication selectors (keyWindow,
    // rootViewController), on the main thread per the marker above.
    let root: Option<Retained<UIViewController>> = unsafe {
        let window: Option<Retained<AnyObject>> = msg_send![&app, keyWindow];
        window.and_then(|w| msg_send![&w, rootViewController])
    };

    root.ok_or_else(|| BildwerkError::Bridge("no root view controller available".into()))
}

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| BildwerkError::Bridge("must be called from the main thread".into()))
}

/// Monotonic counter giving each captured photo a distinct temp-file name.
static PHOTO_SEQ: AtomicU64 = AtomicU64::new(0);

/// Write captured JPEG bytes into the app's temp directory and return the
/// resulting entry. On iOS the same file serves as both device path and
/// display path.
fn persist_capture(bytes: &[u8]) -> Result<ImageEntry> {
    let seq = PHOTO_SEQ.fetch_add(1, Ordering::Relaxed);
    let path: PathBuf = std::env::temp_dir().join(format!("bildwerk_photo_{seq}.jpg"));
    std::fs::write(&path, bytes)
        .map_err(|e| BildwerkError::Bridge(format!("failed to store captured photo: {e}")))?;
    Ok(ImageEntry::local(path))
}

// ---------------------------------------------------------------------------
// Picker delegate (UIImagePickerControllerDelegate)
// ---------------------------------------------------------------------------
// Captures an `mpsc::Sender` so the presenting call can block until the user
// takes/picks a photo or cancels.

struct PickerDelegateIvars {
    /// Channel sender; taken (`Option::take`) on first callback to prevent
    /// double-sends.
    sender: RefCell<Option<mpsc::Sender<Option<Vec<u8>>>>>,
    /// JPEG quality passed to `UIImageJPEGRepresentation` (0.0 - 1.0).
    quality: f64,
    /// Whether the edited image should be preferred over the original.
    prefer_edited: bool,
}

// SAFETY: define_class! #[unsafe(super(NSObject))] declares PickerDelegate as
// an ObjC class inheriting from NSObject, as objc2 requires for all custom
// ObjC classes. MainThreadOnly ensures delegate callbacks only fire on the
// main thread.
define_class! {
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "BildwerkPickerDelegate"]
    #[ivars = PickerDelegateIvars]
    struct PickerDelegate;

    unsafe impl UIImagePickerControllerDelegate for PickerDelegate {
        /// Called when the user has taken or chosen an image.
        #[unsafe(method(imagePickerController:didFinishPickingMediaWithInfo:))]
        fn did_finish(
            &self,
            picker: &UIImagePickerController,
            info: &NSDictionary<NSString, AnyObject>,
        ) {
            let ivars = self.ivars();

            // Prefer the user's crop when editing was allowed; fall back to
            // the untouched capture.
            // SAFETY: objectForKey with the UIKit extern statics above.
            // Returns nil if a key is not present.
            let ui_image: Option<Retained<AnyObject>> = unsafe {
                let edited = if ivars.prefer_edited {
                    info.objectForKey(UIImagePickerControllerEditedImage)
                } else {
                    None
                };
                edited.or_else(|| info.objectForKey(UIImagePickerControllerOriginalImage))
            };

            let image_bytes: Option<Vec<u8>> = ui_image.and_then(|img| {
                // SAFETY: UIImageJPEGRepresentation is a UIKit C function.
                // Returns autoreleased NSData* (nil on failure).
                let raw = unsafe {
                    UIImageJPEGRepresentation(&*img as *const AnyObject, ivars.quality)
                };
                if raw.is_null() {
                    None
                } else {
                    // SAFETY: non-null result is an NSData*. We copy the
                    // bytes immediately so the autorelease is harmless.
                    let ns_data: &objc2_foundation::NSData =
                        unsafe { &*(raw as *const objc2_foundation::NSData) };
                    Some(ns_data.to_vec())
                }
            });

            // SAFETY: dismissViewControllerAnimated:completion: is a standard
            // UIViewController selector, called on the main thread (the
            // delegate is MainThreadOnly).
            unsafe {
                let _: () = msg_send![
                    picker,
                    dismissViewControllerAnimated: true,
                    completion: std::ptr::null::<c_void>()
                ];
            }

            if let Some(tx) = ivars.sender.borrow_mut().take() {
                let _ = tx.send(image_bytes);
            }
        }

        /// Called when the user cancels the picker.
        #[unsafe(method(imagePickerControllerDidCancel:))]
        fn did_cancel(&self, picker: &UIImagePickerController) {
            // SAFETY: dismissViewControllerAnimated:completion: — same as above.
            unsafe {
                let _: () = msg_send![
                    picker,
                    dismissViewControllerAnimated: true,
                    completion: std::ptr::null::<c_void>()
                ];
            }
            if let Some(tx) = self.ivars().sender.borrow_mut().take() {
                let _ = tx.send(None);
            }
        }
    }

    // UIImagePickerController requires its delegate to also conform to
    // UINavigationControllerDelegate.  We provide an empty impl.
    unsafe impl UINavigationControllerDelegate for PickerDelegate {}
}

impl PickerDelegate {
    /// Create a delegate wired to `tx` with the given JPEG quality (1-100).
    fn new(
        mtm: MainThreadMarker,
        tx: mpsc::Sender<Option<Vec<u8>>>,
        quality: u8,
        prefer_edited: bool,
    ) -> Retained<Self> {
        let this = mtm.alloc::<Self>();
        let this = this.set_ivars(PickerDelegateIvars {
            sender: RefCell::new(Some(tx)),
            quality: f64::from(quality.clamp(1, 100)) / 100.0,
            prefer_edited,
        });
        // SAFETY: standard NSObject init via super; alloc above provides a
        // valid allocated-but-uninitialised object.
        unsafe { msg_send![super(this), init] }
    }
}

/// Present a `UIImagePickerController` with the given source and block until
/// the delegate reports JPEG bytes or cancellation.
fn present_picker(
    source: UIImagePickerControllerSourceType,
    quality: u8,
    allow_editing: bool,
) -> Result<Option<Vec<u8>>> {
    let mtm = require_main_thread()?;

    let available = UIImagePickerController::isSourceTypeAvailable(source, mtm);
    if !available {
        return Err(BildwerkError::Bridge(format!(
            "picker source {source:?} is not available on this device"
        )));
    }

    let picker = UIImagePickerController::new(mtm);
    // SAFETY: property setters on the picker we just created; availability
    // was verified above.
    unsafe {
        picker.setSourceType(source);
        picker.setAllowsEditing(allow_editing);
    }

    let (tx, rx) = mpsc::channel();
    let delegate = PickerDelegate::new(mtm, tx, quality, allow_editing);

    // SAFETY: PickerDelegate conforms to both UIImagePickerControllerDelegate
    // and UINavigationControllerDelegate (define_class! above). The cast to
    // AnyObject is valid: PickerDelegate is an NSObject subclass with
    // identical pointer representation.
    unsafe {
        let delegate_obj: &AnyObject =
            &*((&*delegate) as *const PickerDelegate as *const AnyObject);
        picker.setDelegate(Some(delegate_obj));
    }

    let root_vc = root_view_controller()?;
    // SAFETY: presentViewController is a UIViewController method; the
    // main-thread requirement is satisfied by require_main_thread() above.
    unsafe {
        root_vc.presentViewController_animated_completion(&picker, true, None);
    }

    // Block until the delegate fires. The main run loop continues to pump
    // while the picker is presented, so the callbacks execute as expected.
    rx.recv()
        .map_err(|e| BildwerkError::Bridge(format!("picker delegate channel error: {e}")))
}

// ---------------------------------------------------------------------------
// IosBridge
// ---------------------------------------------------------------------------

/// Concrete iOS platform bridge.
///
/// All methods present UI controllers and must be invoked from the main
/// thread.
pub struct IosBridge;

impl IosBridge {
    /// Create a new iOS bridge instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for IosBridge {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}

// ---------------------------------------------------------------------------
// NativeCamera -- UIImagePickerController (camera source)
// ---------------------------------------------------------------------------

impl NativeCamera for IosBridge {
    /// Launch the device camera, wait for the user, and store the captured
    /// JPEG in the app temp directory.
    ///
    /// Returns `Ok(None)` when the user cancels.
    ///
    /// # Errors
    ///
    /// Returns `BildwerkError::Bridge` when called off the main thread, when
    /// the camera source is unavailable (e.g. Simulator), or when no root
    /// view controller exists for presentation.
    fn capture_photo(&self, opts: &CaptureOptions) -> Result<Option<ImageEntry>> {
        tracing::info!(
            quality = opts.quality,
            allow_editing = opts.allow_editing,
            "iOS: launching UIImagePickerController for camera"
        );

        let bytes = present_picker(
            UIImagePickerControllerSourceType::Camera,
            opts.quality,
            opts.allow_editing,
        )?;

        match bytes {
            Some(jpeg) => Ok(Some(persist_capture(&jpeg)?)),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// NativeGallery -- UIImagePickerController (photo library source)
// ---------------------------------------------------------------------------

impl NativeGallery for IosBridge {
    /// Pick from the photo library.
    ///
    /// `UIImagePickerController` presents one selection per invocation, so
    /// this returns at most one entry regardless of `opts.limit`.
    // TODO: migrate to PHPickerViewController for true multi-select up to the limit.
    fn pick_photos(&self, opts: &PickOptions) -> Result<Vec<ImageEntry>> {
        tracing::info!(
            quality = opts.quality,
            limit = opts.limit,
            "iOS: launching UIImagePickerController for photo library"
        );

        let bytes = present_picker(
            UIImagePickerControllerSourceType::PhotoLibrary,
            opts.quality,
            false,
        )?;

        match bytes {
            Some(jpeg) => Ok(vec![persist_capture(&jpeg)?]),
            None => Ok(Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// NativeShare -- UIActivityViewController
// ---------------------------------------------------------------------------

impl NativeShare for IosBridge {
    fn can_share(&self) -> bool {
        true
    }

    /// Present the iOS share sheet with the request's files and text.
    ///
    /// Each file is written to the temp directory under its requested name so
    /// the share sheet shows a sensible filename to the receiving app.
    ///
    /// # Errors
    ///
    /// Returns `BildwerkError::Bridge` if not called from the main thread or
    /// if no root view controller is available.
    fn share(&self, request: &ShareRequest) -> Result<()> {
        let _mtm = require_main_thread()?;

        tracing::info!(
            files = request.files.len(),
            title = %request.title,
            "iOS: presenting UIActivityViewController"
        );

        let mut items: Vec<Retained<AnyObject>> = Vec::with_capacity(request.files.len() + 1);

        for file in &request.files {
            let path = std::env::temp_dir().join(&file.name);
            std::fs::write(&path, &file.bytes).map_err(|e| {
                BildwerkError::Bridge(format!("failed to stage {} for sharing: {e}", file.name))
            })?;

            let ns_path = NSString::from_str(&path.display().to_string());
            let url = NSURL::fileURLWithPath(&ns_path);
            // Upcast NSURL -> AnyObject via Retained::into_super.
            items.push(Retained::into_super(Retained::into_super(url)));
        }

        // The descriptive text joins the activity items; receiving apps that
        // accept text render it alongside the file.
        let ns_text = NSString::from_str(&request.text);
        items.push(Retained::into_super(Retained::into_super(ns_text)));

        let activity_items = NSArray::from_retained_slice(&items);

        // SAFETY: ObjC alloc+init pattern for UIActivityViewController.
        // initWithActivityItems:applicationActivities: takes the items array
        // and an optional NSArray of UIActivity objects (nil = system default).
        let activity_vc: Retained<UIActivityViewController> = unsafe {
            let alloc: Retained<UIActivityViewController> =
                msg_send![objc2::class!(UIActivityViewController), alloc];
            msg_send![
                alloc,
                initWithActivityItems: &*activity_items,
                applicationActivities: std::ptr::null::<AnyObject>()
            ]
        };

        let root_vc = root_view_controller()?;
        // SAFETY: presentViewController is a UIViewController method; main
        // thread confirmed above.
        unsafe {
            root_vc.presentViewController_animated_completion(&activity_vc, true, None);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that the bridge reports the correct platform name.
    #[test]
    fn platform_name() {
        let bridge = IosBridge::new();
        assert_eq!(bridge.platform_name(), "iOS");
        assert!(bridge.can_share());
    }

    // Integration tests for UI-presenting methods require a running iOS app
    // with a key window.  They are exercised in the Xcode test target rather
    // than via `cargo test`.
}
