//! メインアプリケーションコンポーネント

use crate::browser::notify_error;
use crate::components::{
    add_item::AddItemForm,
    checklist::ChecklistTable,
    export_buttons::ExportButtons,
    header::{Header, HeaderForm, SizeMarketPanel},
    photo_gallery::PhotoGallery,
    upload_area::UploadArea,
};
use fai_common::{InspectionSession, PhotoStore};
use leptos::prelude::*;
use std::collections::HashSet;

/// セッションを更新し、失敗したら通知する
pub fn apply_session<T>(
    session: RwSignal<InspectionSession>,
    context: &str,
    op: impl FnOnce(&mut InspectionSession) -> fai_common::Result<T>,
) -> Option<T> {
    match session.try_update(op)? {
        Ok(value) => Some(value),
        Err(err) => {
            notify_error(context, &err);
            None
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 検査セッション（ヘッダ・項目・結果）
    let session = RwSignal::new(InspectionSession::default());
    // 添付写真
    let photos = RwSignal::new(PhotoStore::new());
    // 折りたたみ中のセクション
    let collapsed = RwSignal::new(HashSet::<String>::new());

    view! {
        <div class="container">
            <Header session=session />
            <HeaderForm session=session />
            <SizeMarketPanel session=session />
            <ChecklistTable session=session collapsed=collapsed />
            <AddItemForm session=session />
            <ExportButtons session=session photos=photos collapsed=collapsed />
            <UploadArea photos=photos />
            <PhotoGallery photos=photos />
        </div>
    }
}
