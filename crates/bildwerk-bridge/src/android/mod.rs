// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Sharing completes synchronously via JNI (write file, build Intent, launch
// chooser) and is fully implemented here.
//
// Camera capture and gallery pick require `startActivityForResult`. Those
// methods launch the Intent and return `BildwerkError::Bridge` explaining
// that the result must be collected through the Activity's `onActivityResult`
// callback. The host Activity is responsible for wiring that callback back
// into Bildwerk.

#![cfg(target_os = "android")]

use jni::JNIEnv;
use jni::objects::{JObject, JString, JValue};

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::types::{CaptureOptions, ImageEntry, PickOptions, ShareRequest};

use crate::traits::*;

/// Request codes for `startActivityForResult`. The host Activity must
/// recognise these in its `onActivityResult` override.
pub const REQUEST_CAPTURE_PHOTO: i32 = 0x4257_0001; // "BW" + 1
pub const REQUEST_PICK_PHOTOS: i32 = 0x4257_0002;

/// `Intent.FLAG_GRANT_READ_URI_PERMISSION`.
const FLAG_GRANT_READ: i32 = 0x0000_0001;
/// Read + write grants, needed so the camera app can write the capture target.
const FLAG_GRANT_READ_WRITE: i32 = 0x0000_0003;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Obtain a [`JNIEnv`] handle from the global Android context.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by `android_main` or `ANativeActivity_onCreate`, then attaches the
/// current thread if it is not already attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BildwerkError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    vm.attach_current_thread()
        .map_err(|e| BildwerkError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(BildwerkError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `BildwerkError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> BildwerkError {
    BildwerkError::Bridge(format!("{context}: {e}"))
}

/// The app's FileProvider authority: `<package>.fileprovider`.
fn get_authority(env: &mut JNIEnv, activity: &JObject) -> Result<String> {
    let package: JString = env
        .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err("getPackageName", e))?
        .l()
        .map_err(|e| jni_err("getPackageName->l", e))?
        .into();
    let package: String = env
        .get_string(&package)
        .map_err(|e| jni_err("get_string(package)", e))?
        .into();
    Ok(format!("{package}.fileprovider"))
}

/// Write `bytes` into `<cacheDir>/<filename>` and return the `java.io.File`.
fn write_cache_file<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject,
    filename: &str,
    bytes: &[u8],
) -> Result<JObject<'a>> {
    let cache_dir: JObject = env
        .call_method(activity, "getCacheDir", "()Ljava/io/File;", &[])
        .map_err(|e| jni_err("getCacheDir", e))?
        .l()
        .map_err(|e| jni_err("getCacheDir->l", e))?;

    let j_filename: JString = env
        .new_string(filename)
        .map_err(|e| jni_err("new_string(filename)", e))?;

    let file_obj: JObject = env
        .new_object(
            "java/io/File",
            "(Ljava/io/File;Ljava/lang/String;)V",
            &[JValue::Object(&cache_dir), JValue::Object(&j_filename)],
        )
        .map_err(|e| jni_err("new File", e))?;

    let fos: JObject = env
        .new_object(
            "java/io/FileOutputStream",
            "(Ljava/io/File;)V",
            &[JValue::Object(&file_obj)],
        )
        .map_err(|e| jni_err("new FileOutputStream", e))?;

    let byte_array = env
        .byte_array_from_slice(bytes)
        .map_err(|e| jni_err("byte_array_from_slice", e))?;

    env.call_method(&fos, "write", "([B)V", &[JValue::Object(&byte_array)])
        .map_err(|e| jni_err("FileOutputStream.write", e))?;

    env.call_method(&fos, "close", "()V", &[])
        .map_err(|e| jni_err("FileOutputStream.close", e))?;

    Ok(file_obj)
}

/// Convert a `java.io.File` into a `content://` URI via FileProvider.
fn content_uri<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject,
    file_obj: &JObject,
) -> Result<JObject<'a>> {
    let authority = get_authority(env, activity)?;
    let j_authority: JString = env
        .new_string(&authority)
        .map_err(|e| jni_err("new_string(authority)", e))?;

    env.call_static_method(
        "androidx/core/content/FileProvider",
        "getUriForFile",
        "(Landroid/content/Context;Ljava/lang/String;Ljava/io/File;)Landroid/net/Uri;",
        &[
            JValue::Object(activity),
            JValue::Object(&j_authority),
            JValue::Object(file_obj),
        ],
    )
    .map_err(|e| jni_err("FileProvider.getUriForFile", e))?
    .l()
    .map_err(|e| jni_err("getUriForFile->l", e))
}

/// Build `new Intent(action)`.
fn new_intent<'a>(env: &mut JNIEnv<'a>, action: &str) -> Result<JObject<'a>> {
    let j_action: JString = env
        .new_string(action)
        .map_err(|e| jni_err("new_string(action)", e))?;
    env.new_object(
        "android/content/Intent",
        "(Ljava/lang/String;)V",
        &[JValue::Object(&j_action)],
    )
    .map_err(|e| jni_err("new Intent", e))
}

/// `intent.putExtra(key, stringValue)`.
fn put_string_extra(env: &mut JNIEnv, intent: &JObject, key: &str, value: &str) -> Result<()> {
    let j_key: JString = env
        .new_string(key)
        .map_err(|e| jni_err("new_string(extra key)", e))?;
    let j_value: JString = env
        .new_string(value)
        .map_err(|e| jni_err("new_string(extra value)", e))?;
    env.call_method(
        intent,
        "putExtra",
        "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&j_key), JValue::Object(&j_value)],
    )
    .map_err(|e| jni_err("putExtra(string)", e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Bildwerk platform bridge.
///
/// All methods go through JNI to call the Android SDK. The struct is
/// zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeCamera — Intent ACTION_IMAGE_CAPTURE
// ---------------------------------------------------------------------------

impl NativeCamera for AndroidBridge {
    /// Launch the system camera via `MediaStore.ACTION_IMAGE_CAPTURE`.
    ///
    /// This dispatches the capture intent and returns immediately. Because
    /// `startActivityForResult` is inherently asynchronous, the photo is
    /// **not** returned from this call. Instead, the host Activity must
    /// override `onActivityResult` with request code [`REQUEST_CAPTURE_PHOTO`]
    /// and forward the stored file path back to Bildwerk as an `ImageEntry`.
    ///
    /// Returns `Err(Bridge(...))` with an explanatory message after the
    /// intent has been launched so callers know to await the Activity
    /// callback.
    fn capture_photo(&self, opts: &CaptureOptions) -> Result<Option<ImageEntry>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(
            quality = opts.quality,
            "Android: launching ACTION_IMAGE_CAPTURE intent"
        );

        // Capture target the camera app writes the full-resolution photo to.
        let photo_file = write_cache_file(&mut env, &activity, "bildwerk_capture.jpg", &[])?;
        let photo_uri = content_uri(&mut env, &activity, &photo_file)?;

        let intent = new_intent(&mut env, "android.media.action.IMAGE_CAPTURE")?;

        // intent.putExtra(MediaStore.EXTRA_OUTPUT, photoUri)
        let j_extra_output: JString = env
            .new_string("output")
            .map_err(|e| jni_err("new_string(EXTRA_OUTPUT)", e))?;
        env.call_method(
            &intent,
            "putExtra",
            "(Ljava/lang/String;Landroid/os/Parcelable;)Landroid/content/Intent;",
            &[JValue::Object(&j_extra_output), JValue::Object(&photo_uri)],
        )
        .map_err(|e| jni_err("putExtra(EXTRA_OUTPUT)", e))?;

        // Grant write permission so the camera app can write the photo.
        env.call_method(
            &intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(FLAG_GRANT_READ_WRITE)],
        )
        .map_err(|e| jni_err("addFlags(camera)", e))?;

        env.call_method(
            &activity,
            "startActivityForResult",
            "(Landroid/content/Intent;I)V",
            &[JValue::Object(&intent), JValue::Int(REQUEST_CAPTURE_PHOTO)],
        )
        .map_err(|e| jni_err("startActivityForResult(capture)", e))?;

        tracing::info!(
            request_code = REQUEST_CAPTURE_PHOTO,
            "Android: camera intent dispatched — awaiting onActivityResult"
        );

        Err(BildwerkError::Bridge(
            "Camera intent dispatched (request code 0x42570001). \
             The captured photo will arrive via onActivityResult — \
             wire the Activity callback back into the compose flow."
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativeGallery — Storage Access Framework
// ---------------------------------------------------------------------------

impl NativeGallery for AndroidBridge {
    /// Launch the system photo picker via `ACTION_OPEN_DOCUMENT` with
    /// `EXTRA_ALLOW_MULTIPLE`, filtered to `image/*`.
    ///
    /// Same result-delivery caveat as [`NativeCamera::capture_photo`]: the
    /// chosen URIs arrive through `onActivityResult` with request code
    /// [`REQUEST_PICK_PHOTOS`].
    fn pick_photos(&self, opts: &PickOptions) -> Result<Vec<ImageEntry>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(limit = opts.limit, "Android: launching ACTION_OPEN_DOCUMENT");

        let intent = new_intent(&mut env, "android.intent.action.OPEN_DOCUMENT")?;

        let j_mime: JString = env
            .new_string("image/*")
            .map_err(|e| jni_err("new_string(image mime)", e))?;
        env.call_method(
            &intent,
            "setType",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_mime)],
        )
        .map_err(|e| jni_err("setType(pick)", e))?;

        // intent.putExtra(Intent.EXTRA_ALLOW_MULTIPLE, true)
        let j_allow_multiple: JString = env
            .new_string("android.intent.extra.ALLOW_MULTIPLE")
            .map_err(|e| jni_err("new_string(EXTRA_ALLOW_MULTIPLE)", e))?;
        env.call_method(
            &intent,
            "putExtra",
            "(Ljava/lang/String;Z)Landroid/content/Intent;",
            &[JValue::Object(&j_allow_multiple), JValue::Bool(1)],
        )
        .map_err(|e| jni_err("putExtra(EXTRA_ALLOW_MULTIPLE)", e))?;

        env.call_method(
            &activity,
            "startActivityForResult",
            "(Landroid/content/Intent;I)V",
            &[JValue::Object(&intent), JValue::Int(REQUEST_PICK_PHOTOS)],
        )
        .map_err(|e| jni_err("startActivityForResult(pick)", e))?;

        tracing::info!(
            request_code = REQUEST_PICK_PHOTOS,
            "Android: photo pick intent dispatched — awaiting onActivityResult"
        );

        Err(BildwerkError::Bridge(
            "Photo pick intent dispatched (request code 0x42570002). \
             The selected photos will arrive via onActivityResult — \
             wire the Activity callback back into the compose flow."
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativeShare — Intent ACTION_SEND / ACTION_SEND_MULTIPLE
// ---------------------------------------------------------------------------

impl NativeShare for AndroidBridge {
    fn can_share(&self) -> bool {
        true
    }

    /// Share the request's files via the Android share sheet.
    ///
    /// Each file is written to the cache directory under its requested name
    /// and exposed through `FileProvider` as a `content://` URI, then an
    /// `ACTION_SEND` (or `ACTION_SEND_MULTIPLE`) chooser is launched with the
    /// request's title and text.
    fn share(&self, request: &ShareRequest) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(
            files = request.files.len(),
            title = %request.title,
            "Android: launching share intent"
        );

        let first = request
            .files
            .first()
            .ok_or_else(|| BildwerkError::Share("share request has no files".into()))?;

        let multiple = request.files.len() > 1;
        let action = if multiple {
            "android.intent.action.SEND_MULTIPLE"
        } else {
            "android.intent.action.SEND"
        };
        let intent = new_intent(&mut env, action)?;

        // intent.setType(mimeType) — the first file's type speaks for the set.
        let j_mime: JString = env
            .new_string(&first.mime_type)
            .map_err(|e| jni_err("new_string(mime)", e))?;
        env.call_method(
            &intent,
            "setType",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_mime)],
        )
        .map_err(|e| jni_err("setType(share)", e))?;

        let j_extra_stream: JString = env
            .new_string("android.intent.extra.STREAM")
            .map_err(|e| jni_err("new_string(EXTRA_STREAM)", e))?;

        if multiple {
            // ArrayList<Uri> for EXTRA_STREAM.
            let uri_list: JObject = env
                .new_object("java/util/ArrayList", "()V", &[])
                .map_err(|e| jni_err("new ArrayList", e))?;
            for file in &request.files {
                let file_obj = write_cache_file(&mut env, &activity, &file.name, &file.bytes)?;
                let uri = content_uri(&mut env, &activity, &file_obj)?;
                env.call_method(
                    &uri_list,
                    "add",
                    "(Ljava/lang/Object;)Z",
                    &[JValue::Object(&uri)],
                )
                .map_err(|e| jni_err("ArrayList.add", e))?;
            }
            env.call_method(
                &intent,
                "putParcelableArrayListExtra",
                "(Ljava/lang/String;Ljava/util/ArrayList;)Landroid/content/Intent;",
                &[JValue::Object(&j_extra_stream), JValue::Object(&uri_list)],
            )
            .map_err(|e| jni_err("putParcelableArrayListExtra", e))?;
        } else {
            let file_obj = write_cache_file(&mut env, &activity, &first.name, &first.bytes)?;
            let uri = content_uri(&mut env, &activity, &file_obj)?;
            env.call_method(
                &intent,
                "putExtra",
                "(Ljava/lang/String;Landroid/os/Parcelable;)Landroid/content/Intent;",
                &[JValue::Object(&j_extra_stream), JValue::Object(&uri)],
            )
            .map_err(|e| jni_err("putExtra(EXTRA_STREAM)", e))?;
        }

        put_string_extra(
            &mut env,
            &intent,
            "android.intent.extra.SUBJECT",
            &request.title,
        )?;
        put_string_extra(&mut env, &intent, "android.intent.extra.TEXT", &request.text)?;

        env.call_method(
            &intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(FLAG_GRANT_READ)],
        )
        .map_err(|e| jni_err("addFlags(share)", e))?;

        // Wrap in a chooser so the user picks the target app.
        let j_title: JString = env
            .new_string(&request.title)
            .map_err(|e| jni_err("new_string(chooser_title)", e))?;
        let chooser: JObject = env
            .call_static_method(
                "android/content/Intent",
                "createChooser",
                "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
                &[JValue::Object(&intent), JValue::Object(&j_title)],
            )
            .map_err(|e| jni_err("Intent.createChooser", e))?
            .l()
            .map_err(|e| jni_err("createChooser->l", e))?;

        env.call_method(
            &activity,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&chooser)],
        )
        .map_err(|e| jni_err("startActivity(share)", e))?;

        tracing::info!("Android: share chooser presented");
        Ok(())
    }
}
