//! 写真アップロードエリア

use crate::browser::log_warn;
use fai_common::PhotoStore;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement};

#[component]
pub fn UploadArea(photos: RwSignal<PhotoStore>) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files, photos);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            handle_files(files, photos);
        }
        // 同じファイルを再選択できるように
        input.set_value("");
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <div class="upload-icon">"📷"</div>
            <p>"Drag & drop photos here, or choose files"</p>
            <input type="file" accept="image/*" multiple=true on:change=on_change />
            <p class="text-muted">"Supported: JPEG, PNG, GIF, WebP, BMP"</p>
        </div>
    }
}

fn handle_files(files: FileList, photos: RwSignal<PhotoStore>) {
    for i in 0..files.length() {
        if let Some(file) = files.get(i) {
            read_file(file, photos);
        }
    }
}

/// FileReader で Data URL として読み込み、読み終わった順に追加
fn read_file(file: File, photos: RwSignal<PhotoStore>) {
    let file_name = file.name();
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(err) => {
            log_warn(&format!("FileReader unavailable: {:?}", err));
            return;
        }
    };

    let file_name_clone = file_name.clone();
    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|result| result.as_string());
        let warning = photos
            .try_update(|store| ingest_loaded(store, &file_name_clone, data_url))
            .flatten();
        if let Some(warning) = warning {
            log_warn(&warning);
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(err) = reader.read_as_data_url(&file) {
        log_warn(&format!("{}: {:?}", file_name, err));
    }
}

/// 読み込み結果を取り込む。読めない写真は一覧に加えず、コンソール用の警告を返す
fn ingest_loaded(store: &mut PhotoStore, file_name: &str, data_url: Option<String>) -> Option<String> {
    let Some(data_url) = data_url else {
        return Some(format!("{}: empty read result", file_name));
    };
    store
        .ingest_data_url(file_name, &data_url)
        .err()
        .map(|err| format!("photo skipped: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn test_unreadable_photo_is_left_out_quietly() {
        let mut store = PhotoStore::new();
        let warning = ingest_loaded(&mut store, "broken.jpg", Some("data:image/jpeg;base64,/9j/AA==".to_string()));
        assert!(warning.is_some_and(|w| w.contains("broken.jpg")));
        assert!(ingest_loaded(&mut store, "empty.png", None).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_readable_photo_is_appended() {
        let mut store = PhotoStore::new();
        assert_eq!(ingest_loaded(&mut store, "pixel.png", Some(PIXEL_PNG.to_string())), None);
        assert_eq!(store.len(), 1);
    }
}
