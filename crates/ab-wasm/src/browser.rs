//! Browser-side collaborators: file downloads, a JS rasterizer callback, and
//! the local clock used for export filenames.

use ab_core::{FileKind, Timestamp};
use ab_editor::{ExportError, FileSink, RasterOptions, Rasterizer};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn js_reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

// ─── Downloads ───────────────────────────────────────────────────────────

/// Delivers files by clicking a temporary `<a download>` pointing at a blob URL.
#[derive(Debug, Default)]
pub struct DownloadSink;

impl DownloadSink {
    fn download(filename: &str, kind: FileKind, bytes: &[u8]) -> Result<(), JsValue> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type(kind.mime());
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        Url::revoke_object_url(&url)
    }
}

impl FileSink for DownloadSink {
    fn deliver(&mut self, filename: &str, kind: FileKind, bytes: &[u8]) -> Result<(), ExportError> {
        Self::download(filename, kind, bytes).map_err(|e| ExportError::Deliver {
            filename: filename.to_string(),
            reason: js_reason(&e),
        })
    }
}

// ─── Rasterizer ──────────────────────────────────────────────────────────

/// Calls back into JS with the raster options as JSON; the callback returns
/// the encoded image as a `Uint8Array`.
#[derive(Debug, Default)]
pub struct JsRasterizer {
    callback: Option<js_sys::Function>,
}

impl JsRasterizer {
    pub fn set_callback(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }
}

impl Rasterizer for JsRasterizer {
    fn rasterize(&mut self, options: &RasterOptions) -> Result<Vec<u8>, ExportError> {
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| ExportError::Rasterize("no rasterizer registered".into()))?;
        let options = serde_json::to_string(options)?;
        let result = callback
            .call1(&JsValue::NULL, &JsValue::from_str(&options))
            .map_err(|e| ExportError::Rasterize(js_reason(&e)))?;
        let image: js_sys::Uint8Array = result
            .dyn_into()
            .map_err(|_| ExportError::Rasterize("rasterizer must return a Uint8Array".into()))?;
        Ok(image.to_vec())
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────

/// Current wall-clock time in the browser's local time zone.
pub fn local_now() -> Timestamp {
    let now = js_sys::Date::new_0();
    Timestamp {
        year: now.get_full_year() as i32,
        month: (now.get_month() + 1) as u8,
        day: now.get_date() as u8,
        hour: now.get_hours() as u8,
        minute: now.get_minutes() as u8,
        second: now.get_seconds() as u8,
    }
}
