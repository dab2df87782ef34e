//! ブラウザ連携（ダウンロード・通知・日付）

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// バイト列を Blob の Object URL 経由でダウンロードさせる
pub fn download_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)
}

/// ユーザーへの通知（alert + console）
pub fn notify(message: &str) {
    web_sys::console::log_1(&message.into());
    gloo::dialogs::alert(message);
}

/// エラー通知
pub fn notify_error(context: &str, err: &dyn std::fmt::Display) {
    let message = format!("{}: {}", context, err);
    web_sys::console::error_1(&message.as_str().into());
    gloo::dialogs::alert(&message);
}

pub fn confirm(message: &str) -> bool {
    gloo::dialogs::confirm(message)
}

pub fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// ブラウザのローカル日付
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}
