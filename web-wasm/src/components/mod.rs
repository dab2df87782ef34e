pub mod add_item;
pub mod checklist;
pub mod export_buttons;
pub mod header;
pub mod photo_gallery;
pub mod upload_area;
