use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::Local;
use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use fai_common::{
    ChecklistConfig, InspectionSession, Market, PhotoUpload, RecordPatch, ResultStatus, Tally,
    TvSize,
};
use tracing::{info, warn};

use crate::io::{read_photo, write_export};
use crate::model::{AppState, ExportKind};

const THUMB_SIZE: [u32; 2] = [220, 160];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

const PURPLE: Color32 = Color32::from_rgb(76, 29, 149);
const SECTION_FILL: Color32 = Color32::from_rgb(237, 233, 254);

pub struct DesktopApp {
    state: AppState,
    status: String,
    thumbs: HashMap<u64, egui::TextureHandle>,
    photo_rx: Receiver<PhotoMessage>,
    photo_tx: Sender<PhotoMessage>,
    photos_inflight: usize,
}

/// ワーカースレッドから UI スレッドへの写真読み込み結果
struct PhotoMessage {
    path: PathBuf,
    result: Result<LoadedPhoto, String>,
}

struct LoadedPhoto {
    upload: PhotoUpload,
    thumb: Option<([usize; 2], Vec<u8>)>,
}

/// 1行分の表示用スナップショット
struct RowView {
    id: u32,
    item: String,
    checkpoint: String,
    status: ResultStatus,
    tracking_ref: String,
    note: String,
}

struct SectionView {
    name: String,
    tally: Tally,
    rows: Vec<RowView>,
}

impl DesktopApp {
    pub fn new(config: ChecklistConfig) -> Self {
        let (photo_tx, photo_rx) = mpsc::channel();
        Self {
            state: AppState::new(config),
            status: String::new(),
            thumbs: HashMap::new(),
            photo_rx,
            photo_tx,
            photos_inflight: 0,
        }
    }

    fn pick_photos(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files()
        else {
            return;
        };
        for path in paths {
            self.photos_inflight += 1;
            spawn_photo_loader(path, self.photo_tx.clone());
        }
    }

    /// 読み込み完了順にストアへ追加
    fn poll_photos(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.photo_rx.try_recv() {
            self.photos_inflight = self.photos_inflight.saturating_sub(1);
            match msg.result {
                Ok(loaded) => {
                    let id = self.state.photos.push(loaded.upload);
                    if let Some((size, pixels)) = loaded.thumb {
                        let image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                        let texture = ctx.load_texture(format!("photo-{id}"), image, egui::TextureOptions::default());
                        self.thumbs.insert(id, texture);
                    }
                }
                Err(message) => {
                    warn!(path = %msg.path.display(), error = %message, "photo skipped");
                    self.status = format!("Photo skipped: {message}");
                }
            }
        }
    }

    fn remove_photo(&mut self, id: u64) {
        if self.state.photos.remove(id) {
            self.thumbs.remove(&id);
        }
    }

    fn run_export(&mut self, kind: ExportKind) {
        let bytes = match kind.render(&self.state.session, &self.state.photos) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(kind = ?kind, error = %err, "export aborted");
                self.status = format!("{} failed: {err}", kind.label());
                return;
            }
        };

        let default_name = kind.file_name(&self.state.session, Local::now().date_naive());
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter(kind.extension().to_uppercase(), &[kind.extension()])
            .save_file()
        else {
            return;
        };

        match write_export(&path, &bytes) {
            Ok(()) => {
                info!(kind = ?kind, mime = kind.mime(), path = %path.display(), bytes = bytes.len(), "export saved");
                self.status = format!("Saved {}", path.display());
            }
            Err(err) => self.status = format!("Save failed: {err:#}"),
        }
    }

    fn reset(&mut self) {
        self.state.session.reset();
        self.status = "Checklist reset".to_string();
    }

    fn add_item(&mut self) {
        match self.state.submit_draft() {
            Ok(_) => {
                self.status = format!("Added new inspection item under {}", self.state.draft.section);
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn render_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Add Photos...").clicked() {
                    self.pick_photos();
                    ui.close_menu();
                }
                if ui.button("Reset Checklist").clicked() {
                    self.reset();
                    ui.close_menu();
                }
            });

            ui.menu_button("Export", |ui| {
                for kind in ExportKind::ALL {
                    if ui.button(kind.label()).clicked() {
                        self.run_export(kind);
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Collapse All").clicked() {
                    self.state.collapse_all();
                    ui.close_menu();
                }
                if ui.button("Expand All").clicked() {
                    self.state.expand_all();
                    ui.close_menu();
                }
            });

            ui.separator();
            if self.photos_inflight > 0 {
                ui.label(RichText::new(format!("Loading {} photo(s)...", self.photos_inflight)).color(Color32::from_gray(170)));
            }
            if !self.status.is_empty() {
                ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
            }
        });
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let session = &mut self.state.session;
        ui.heading(RichText::new("FAI Inspection Checklist").color(PURPLE));

        ui.horizontal_wrapped(|ui| {
            egui::Grid::new("header_fields").num_columns(4).show(ui, |ui| {
                ui.label("Model #");
                ui.text_edit_singleline(&mut session.header.model);
                ui.label("Serial");
                ui.text_edit_singleline(&mut session.header.serial);
                ui.end_row();

                ui.label("Mfg date");
                ui.text_edit_singleline(&mut session.header.mfg_date);
                ui.label("Insp date");
                ui.text_edit_singleline(&mut session.header.insp_date);
                ui.end_row();

                ui.label("Overall");
                let mut overall = session.header.overall;
                egui::ComboBox::from_id_source("overall")
                    .selected_text(RichText::new(overall.label()).color(status_color(overall)))
                    .show_ui(ui, |ui| {
                        for choice in ResultStatus::OVERALL_CHOICES {
                            ui.selectable_value(&mut overall, choice, choice.label());
                        }
                    });
                session.set_overall(overall);
                ui.end_row();

                ui.label("TV size");
                let mut size = session.header.size;
                egui::ComboBox::from_id_source("tv_size")
                    .selected_text(size.label())
                    .show_ui(ui, |ui| {
                        for choice in TvSize::ALL {
                            ui.selectable_value(&mut size, choice, choice.label());
                        }
                    });
                session.set_size(size);

                ui.label("Market");
                let mut market = session.header.market;
                egui::ComboBox::from_id_source("market")
                    .selected_text(market.code())
                    .show_ui(ui, |ui| {
                        for choice in Market::ALL {
                            ui.selectable_value(&mut market, choice, choice.code());
                        }
                    });
                session.set_market(market);
                ui.end_row();
            });
        });

        ui.horizontal_wrapped(|ui| {
            let tally = session.overall_tally();
            badge(ui, format!("All {}", tally.total), Color32::from_gray(30), Color32::from_gray(235));
            badge(ui, format!("Pass {}", tally.pass), Color32::from_rgb(6, 95, 70), Color32::from_rgb(236, 253, 245));
            badge(ui, format!("Fail {}", tally.fail), Color32::from_rgb(127, 29, 29), Color32::from_rgb(254, 242, 242));
            badge(ui, format!("N/A {}", tally.na), Color32::from_gray(30), Color32::from_rgb(229, 231, 235));
            badge(ui, format!("Open {}", tally.open), Color32::from_rgb(124, 45, 18), Color32::from_rgb(255, 247, 237));
            badge(ui, format!("Pass % {}%", tally.pass_percentage()), PURPLE, SECTION_FILL);
        });
    }

    fn section_views(&self) -> Vec<SectionView> {
        self.state
            .session
            .visible_sections()
            .into_iter()
            .map(|group| SectionView {
                tally: Tally::of_entries(group.entries.iter().copied()),
                rows: group
                    .entries
                    .iter()
                    .map(|entry| RowView {
                        id: entry.id(),
                        item: entry.item.item.clone(),
                        checkpoint: entry.item.checkpoint.clone(),
                        status: entry.record.status,
                        tracking_ref: entry.record.tracking_ref.clone(),
                        note: entry.record.note.clone(),
                    })
                    .collect(),
                name: group.section,
            })
            .collect()
    }

    fn render_checklist(&mut self, ui: &mut egui::Ui) {
        for section in self.section_views() {
            let collapsed = self.state.collapsed.contains(&section.name);
            egui::Frame::none()
                .fill(SECTION_FILL)
                .inner_margin(egui::Margin::same(6.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let icon = if collapsed { "▶" } else { "▼" };
                        let title = RichText::new(format!("{icon} {}", section.name)).strong().color(PURPLE);
                        if ui.add(egui::Button::new(title).frame(false)).clicked() {
                            if !self.state.collapsed.remove(&section.name) {
                                self.state.collapsed.insert(section.name.clone());
                            }
                        }
                        badge(ui, format!("All {}", section.tally.total), Color32::from_gray(30), Color32::WHITE);
                        badge(ui, format!("Pass {}", section.tally.pass), Color32::from_rgb(6, 95, 70), Color32::from_rgb(236, 253, 245));
                        badge(ui, format!("Fail {}", section.tally.fail), Color32::from_rgb(127, 29, 29), Color32::from_rgb(254, 242, 242));
                        if ui.small_button("All PASS").clicked() {
                            self.state.session.set_section_status(&section.name, ResultStatus::Pass);
                        }
                        if ui.small_button("All FAIL").clicked() {
                            self.state.session.set_section_status(&section.name, ResultStatus::Fail);
                        }
                        if ui.small_button("Clear").clicked() {
                            self.state.session.clear_section(&section.name);
                        }
                    });
                });

            if collapsed {
                continue;
            }

            egui::Grid::new(("section_grid", &section.name))
                .striped(true)
                .num_columns(5)
                .min_col_width(60.0)
                .show(ui, |ui| {
                    for row in &section.rows {
                        self.render_row(ui, row);
                        ui.end_row();
                    }
                });
            ui.add_space(6.0);
        }
    }

    fn render_row(&mut self, ui: &mut egui::Ui, row: &RowView) {
        ui.add(egui::Label::new(&row.item).wrap(true));
        ui.add(egui::Label::new(RichText::new(&row.checkpoint).color(Color32::from_gray(150))).wrap(true));

        let mut status = row.status;
        egui::ComboBox::from_id_source(("status", row.id))
            .width(150.0)
            .selected_text(RichText::new(status_text(status)).color(status_color(status)))
            .show_ui(ui, |ui| {
                for choice in ResultStatus::ALL {
                    ui.selectable_value(&mut status, choice, status_text(choice));
                }
            });

        let mut tracking_ref = row.tracking_ref.clone();
        let jira_changed = ui
            .add(egui::TextEdit::singleline(&mut tracking_ref).hint_text("JIRA").desired_width(90.0))
            .changed();

        let mut note = row.note.clone();
        let note_changed = ui
            .add(egui::TextEdit::multiline(&mut note).desired_rows(1).desired_width(180.0))
            .changed();

        let mut patch = RecordPatch::default();
        if status != row.status {
            patch.status = Some(status);
        }
        if jira_changed {
            patch.tracking_ref = Some(tracking_ref);
        }
        if note_changed {
            patch.note = Some(note);
        }
        if !patch.is_empty() {
            if let Err(err) = self.state.session.update_record(row.id, patch) {
                self.status = err.to_string();
            }
        }
    }

    fn render_add_item(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Add item").strong());
            let sections = self.state.session.sections().to_vec();
            egui::ComboBox::from_id_source("new_section")
                .selected_text(self.state.draft.section.clone())
                .show_ui(ui, |ui| {
                    for name in sections {
                        let label = name.clone();
                        ui.selectable_value(&mut self.state.draft.section, name, label);
                    }
                });
            ui.add(egui::TextEdit::singleline(&mut self.state.draft.item).hint_text("Item"));
            ui.add(egui::TextEdit::singleline(&mut self.state.draft.checkpoint).hint_text("Checkpoint").desired_width(320.0));
            if ui.button("Add").clicked() {
                self.add_item();
            }
        });
    }

    fn render_photos(&mut self, ui: &mut egui::Ui) {
        ui.heading("Photos");
        if ui.button("Add Photos...").clicked() {
            self.pick_photos();
        }
        ui.label(format!("{} attached", self.state.photos.len()));
        ui.separator();

        let mut remove = None;
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            let ids: Vec<u64> = self.state.photos.photos().iter().map(|p| p.id).collect();
            for id in ids {
                let Some(photo) = self.state.photos.get(id) else {
                    continue;
                };
                let file_name = photo.file_name.clone();
                let mut caption = photo.caption.clone();

                ui.group(|ui| {
                    let thumb_size = egui::vec2(THUMB_SIZE[0] as f32, THUMB_SIZE[1] as f32);
                    match self.thumbs.get(&id) {
                        Some(texture) => {
                            ui.add(egui::Image::new(texture).max_size(thumb_size));
                        }
                        None => {
                            ui.label("No preview");
                        }
                    }
                    ui.label(RichText::new(&file_name).size(12.0));
                    if ui
                        .add(egui::TextEdit::singleline(&mut caption).hint_text("Caption"))
                        .changed()
                    {
                        self.state.photos.set_caption(id, caption);
                    }
                    if ui.small_button("Remove").clicked() {
                        remove = Some(id);
                    }
                });
            }
        });
        if let Some(id) = remove {
            self.remove_photo(id);
        }
    }
}

/// ファイル読み込み・検証・サムネイル生成をワーカースレッドで行う
fn spawn_photo_loader(path: PathBuf, sender: Sender<PhotoMessage>) {
    std::thread::spawn(move || {
        let result = load_photo(&path).map_err(|err| format!("{err:#}"));
        let _ = sender.send(PhotoMessage { path, result });
    });
}

fn load_photo(path: &Path) -> anyhow::Result<LoadedPhoto> {
    let (file_name, data) = read_photo(path)?;
    let upload = PhotoUpload::from_bytes(file_name, data)?;
    let thumb = upload.thumbnail_rgba(THUMB_SIZE[0], THUMB_SIZE[1]).ok();
    Ok(LoadedPhoto { upload, thumb })
}

fn badge(ui: &mut egui::Ui, text: String, fg: Color32, bg: Color32) {
    egui::Frame::none()
        .fill(bg)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(fg).size(12.0));
        });
}

fn status_text(status: ResultStatus) -> &'static str {
    match status {
        ResultStatus::Unset => "-",
        other => other.label(),
    }
}

fn status_color(status: ResultStatus) -> Color32 {
    match status {
        ResultStatus::Pass => Color32::from_rgb(6, 95, 70),
        ResultStatus::Fail => Color32::from_rgb(127, 29, 29),
        ResultStatus::ConditionalApproval => Color32::from_rgb(120, 53, 15),
        ResultStatus::NotApplicable | ResultStatus::Unset => Color32::from_gray(120),
    }
}

/// メモ・キャプションの多言語入力用フォールバックフォント
pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("fallback".to_string(), FontData::from_owned(data));
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts.families.entry(family).or_default().push("fallback".to_string());
            }
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.photos_inflight > 0 {
            ctx.request_repaint();
        }
        self.poll_photos(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            self.render_menu(ui);
        });

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::TopBottomPanel::bottom("add_item").show(ctx, |ui| {
            self.render_add_item(ui);
        });

        egui::SidePanel::right("photos").resizable(true).show(ctx, |ui| {
            self.render_photos(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                self.render_checklist(ui);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_photo_loader_reports_failures_through_channel() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("bogus.jpg");
        std::fs::write(&bogus, b"not an image").unwrap();
        let missing = dir.path().join("missing.png");

        let (tx, rx) = mpsc::channel();
        spawn_photo_loader(bogus.clone(), tx.clone());
        spawn_photo_loader(missing.clone(), tx);

        let mut paths = Vec::new();
        for _ in 0..2 {
            let msg = rx.recv_timeout(Duration::from_secs(10)).expect("worker did not report");
            assert!(msg.result.is_err());
            paths.push(msg.path);
        }
        paths.sort();
        let mut expected = vec![bogus, missing];
        expected.sort();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_status_text_and_color() {
        assert_eq!(status_text(ResultStatus::Unset), "-");
        assert_eq!(status_text(ResultStatus::NotApplicable), "N/A");
        assert_ne!(status_color(ResultStatus::Pass), status_color(ResultStatus::Fail));
    }

    #[test]
    fn test_section_views_follow_market() {
        let mut app = DesktopApp::new(ChecklistConfig::default());
        assert_eq!(app.section_views().len(), 6);
        app.state.session.set_market(Market::Ca);
        let views = app.section_views();
        assert_eq!(views.len(), 8);
        let rows: usize = views.iter().map(|v| v.rows.len()).sum();
        assert_eq!(rows, 99);
        assert_eq!(views[0].tally.open, views[0].rows.len());
    }

    #[test]
    fn test_session_type_is_shared() {
        let app = DesktopApp::new(ChecklistConfig::default());
        let session: &InspectionSession = &app.state.session;
        assert_eq!(session.visible_entries().len(), 92);
    }
}
