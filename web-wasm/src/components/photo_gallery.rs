//! 写真ギャラリーコンポーネント

use fai_common::PhotoStore;
use leptos::prelude::*;

#[component]
pub fn PhotoGallery(photos: RwSignal<PhotoStore>) -> impl IntoView {
    let photo_ids = move || photos.with(|store| store.photos().iter().map(|p| p.id).collect::<Vec<_>>());

    view! {
        <Show
            when=move || photos.with(|store| !store.is_empty())
            fallback=|| view! { <p class="text-muted">"No photos attached"</p> }
        >
            <div class="photo-gallery">
                <For
                    each=photo_ids
                    key=|id| *id
                    children=move |id| view! { <PhotoCard id=id photos=photos /> }
                />
            </div>
        </Show>
    }
}

#[component]
fn PhotoCard(id: u64, photos: RwSignal<PhotoStore>) -> impl IntoView {
    let Some((data_url, file_name)) =
        photos.with_untracked(|store| store.get(id).map(|p| (p.to_data_url(), p.file_name.clone())))
    else {
        return ().into_any();
    };

    let caption = move || {
        photos.with(|store| store.get(id).map(|p| p.caption.clone()).unwrap_or_default())
    };

    view! {
        <div class="photo-card">
            <img src=data_url alt=file_name.clone() />
            <div class="photo-info">
                <h4>{file_name}</h4>
                <input
                    type="text"
                    placeholder="Caption"
                    prop:value=caption
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        photos.update(|store| {
                            store.set_caption(id, value);
                        });
                    }
                />
                <div class="photo-actions">
                    <button
                        class="btn btn-small btn-tertiary"
                        on:click=move |_| {
                            photos.update(|store| {
                                store.remove(id);
                            })
                        }
                    >
                        "Remove"
                    </button>
                </div>
            </div>
        </div>
    }
    .into_any()
}
