//! PDF export core (printpdf).
//!
//! 表ページ: タイトル・メタ情報・総合判定バナー・チェックリスト表。
//! 写真ページ: 3×2 のグリッドにキャプション付きで配置。

use crate::error::{Error, Result};
use crate::layout::{
    banner_color, fit_dpi, from_top, paginate, pdf_safe_text, photo_slot, pt_to_mm, split_row, Rgb8,
    TableLayout, ALT_ROW_FILL, BANNER_FONT_PT, BANNER_Y_MM, BODY_TEXT, BRAND_PURPLE,
    CAPTION_FONT_PT, CELL_PADDING_MM, HEADER_TEXT, MARGIN_MM, META_FONT_PT, META_TEXT, META_Y_MM,
    PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PHOTOS_PER_PAGE, TABLE_COLUMNS, TABLE_TOP_MM,
    TABLE_TOP_WITH_BANNER_MM, TITLE_FONT_PT, TITLE_Y_MM,
};
use crate::photo::{PhotoAttachment, PhotoStore};
use crate::session::{ExportScope, InspectionSession};
use crate::types::{ChecklistEntry, HeaderMetadata};
use ::image::DynamicImage;
use printpdf::path::PaintMode;
use printpdf::*;
use std::ops::Range;
use tracing::{info, warn};

/// 埋め込み前に縮小する最大ピクセル
const PHOTO_MAX_PX: u32 = 1600;

/// ベースラインを行上端からずらす量（フォント高さ比）
const ASCENT_RATIO: f32 = 0.8;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// 表の1行分のセル（折り返し前）
fn row_cells(entry: &ChecklistEntry) -> Vec<String> {
    vec![
        entry.item.section.clone(),
        entry.item.item.clone(),
        entry.item.checkpoint.clone(),
        entry.record.status.label().to_string(),
        entry.record.tracking_ref.clone(),
        entry.record.note.clone(),
    ]
    .into_iter()
    .map(|cell| pdf_safe_text(&cell))
    .collect()
}

fn table_top_mm(header: &HeaderMetadata) -> f32 {
    if header.overall.is_set() {
        TABLE_TOP_WITH_BANNER_MM
    } else {
        TABLE_TOP_MM
    }
}

/// 1ページに収まる表の行片。長い行は複数の片に分かれる
pub(crate) struct RowSegment {
    pub(crate) row: usize,
    pub(crate) cells: Vec<Vec<String>>,
    pub(crate) height: f32,
}

/// 表に使える高さ（1ページ目, 2ページ目以降）
fn page_capacities(table: &TableLayout, header: &HeaderMetadata) -> (f32, f32) {
    let bottom = PAGE_HEIGHT_MM - MARGIN_MM;
    let header_band = table.header_height_mm();
    (
        bottom - table_top_mm(header) - header_band,
        bottom - MARGIN_MM - header_band,
    )
}

pub(crate) fn table_segments(
    table: &TableLayout,
    header: &HeaderMetadata,
    entries: &[&ChecklistEntry],
) -> Vec<RowSegment> {
    let (first, other) = page_capacities(table, header);
    let max_lines = table.lines_within(first.min(other));
    entries
        .iter()
        .enumerate()
        .flat_map(|(row, entry)| {
            split_row(&table.wrap_row(&row_cells(entry)), max_lines)
                .into_iter()
                .map(move |cells| RowSegment {
                    row,
                    height: table.row_height_mm(&cells),
                    cells,
                })
        })
        .collect()
}

/// 行片の高さからページごとの範囲を決める
pub(crate) fn plan_table_pages(table: &TableLayout, header: &HeaderMetadata, heights: &[f32]) -> Vec<Range<usize>> {
    let (first, other) = page_capacities(table, header);
    paginate(heights, first, other)
}

/// PDFを生成してバイト列を返す
pub fn render_pdf(session: &InspectionSession, photos: &PhotoStore, scope: ExportScope) -> Result<Vec<u8>> {
    let entries = session.entries_for(scope);
    let header = &session.header;
    let table = TableLayout::landscape_a4();

    let segments = table_segments(&table, header, &entries);
    let heights: Vec<f32> = segments.iter().map(|segment| segment.height).collect();
    let pages = plan_table_pages(&table, header, &heights);

    let (doc, first_page, first_layer) = PdfDocument::new(
        pdf_safe_text(session.title()),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_error)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_error)?,
    };

    for (page_no, range) in pages.iter().enumerate() {
        let layer = if page_no == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Layer {}", page_no + 1),
            );
            doc.get_page(page).get_layer(layer)
        };

        let mut top = if page_no == 0 {
            draw_title_block(&layer, &fonts, session.title(), header);
            table_top_mm(header)
        } else {
            MARGIN_MM
        };
        top = draw_table_header(&layer, &fonts, &table, top);
        for segment in &segments[range.clone()] {
            draw_table_row(&layer, &fonts, &table, &segment.cells, segment.height, top, segment.row % 2 == 1);
            top += segment.height;
        }
    }

    let placed = draw_photo_pages(&doc, &fonts, photos.photos(), pages.len());

    let bytes = doc.save_to_bytes().map_err(render_error)?;
    info!(
        format = "pdf",
        rows = entries.len(),
        pages = pages.len(),
        photos = placed,
        bytes = bytes.len(),
        "pdf rendered"
    );
    Ok(bytes)
}

fn render_error(err: impl std::fmt::Debug) -> Error {
    Error::PdfRender(format!("{:?}", err))
}

fn color(rgb: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
        None,
    ))
}

/// 上端基準の矩形を塗りつぶす
fn fill_rect(layer: &PdfLayerReference, rgb: Rgb8, x_mm: f32, top_mm: f32, width_mm: f32, height_mm: f32) {
    layer.set_fill_color(color(rgb));
    let rect = Rect::new(
        Mm(x_mm),
        Mm(from_top(top_mm + height_mm)),
        Mm(x_mm + width_mm),
        Mm(from_top(top_mm)),
    )
    .with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

fn draw_title_block(layer: &PdfLayerReference, fonts: &Fonts, title: &str, header: &HeaderMetadata) {
    layer.set_fill_color(color(BRAND_PURPLE));
    layer.use_text(
        pdf_safe_text(title),
        TITLE_FONT_PT,
        Mm(MARGIN_MM),
        Mm(from_top(TITLE_Y_MM)),
        &fonts.bold,
    );

    layer.set_fill_color(color(META_TEXT));
    layer.use_text(
        pdf_safe_text(&header.summary_line()),
        META_FONT_PT,
        Mm(MARGIN_MM),
        Mm(from_top(META_Y_MM)),
        &fonts.regular,
    );

    if header.overall.is_set() {
        layer.set_fill_color(color(banner_color(header.overall)));
        layer.use_text(
            format!("FAI Overall Result: {}", header.overall.label()),
            BANNER_FONT_PT,
            Mm(MARGIN_MM),
            Mm(from_top(BANNER_Y_MM)),
            &fonts.bold,
        );
    }
}

/// 紫のヘッダ帯を描き、次の行の上端を返す
fn draw_table_header(layer: &PdfLayerReference, fonts: &Fonts, table: &TableLayout, top: f32) -> f32 {
    let height = table.header_height_mm();
    fill_rect(layer, BRAND_PURPLE, MARGIN_MM, top, table.table_width_mm(), height);

    layer.set_fill_color(color(HEADER_TEXT));
    let baseline = top + CELL_PADDING_MM + pt_to_mm(table.font_pt) * ASCENT_RATIO;
    for (column, definition) in TABLE_COLUMNS.iter().enumerate() {
        layer.use_text(
            definition.label,
            table.font_pt,
            Mm(table.column_x_mm[column] + CELL_PADDING_MM),
            Mm(from_top(baseline)),
            &fonts.bold,
        );
    }
    top + height
}

fn draw_table_row(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    table: &TableLayout,
    cells: &[Vec<String>],
    height: f32,
    top: f32,
    shaded: bool,
) {
    if shaded {
        fill_rect(layer, ALT_ROW_FILL, MARGIN_MM, top, table.table_width_mm(), height);
    }

    layer.set_fill_color(color(BODY_TEXT));
    let first_baseline = top + CELL_PADDING_MM + pt_to_mm(table.font_pt) * ASCENT_RATIO;
    for (column, lines) in cells.iter().enumerate() {
        for (line_no, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = first_baseline + line_no as f32 * table.line_height_mm;
            layer.use_text(
                line.as_str(),
                table.font_pt,
                Mm(table.column_x_mm[column] + CELL_PADDING_MM),
                Mm(from_top(baseline)),
                &fonts.regular,
            );
        }
    }
}

/// 写真ページを追加し、配置できた枚数を返す
fn draw_photo_pages(doc: &PdfDocumentReference, fonts: &Fonts, photos: &[PhotoAttachment], table_pages: usize) -> usize {
    let mut placed = 0;
    for (chunk_no, chunk) in photos.chunks(PHOTOS_PER_PAGE).enumerate() {
        let (page, layer) = doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Layer {}", table_pages + chunk_no + 1),
        );
        let layer = doc.get_page(page).get_layer(layer);

        layer.set_fill_color(color(BRAND_PURPLE));
        layer.use_text(
            "Photos",
            TITLE_FONT_PT,
            Mm(MARGIN_MM),
            Mm(from_top(TITLE_Y_MM)),
            &fonts.bold,
        );

        for (index, photo) in chunk.iter().enumerate() {
            if draw_photo(&layer, fonts, photo, index) {
                placed += 1;
            }
        }
    }
    placed
}

fn draw_photo(layer: &PdfLayerReference, fonts: &Fonts, photo: &PhotoAttachment, index_on_page: usize) -> bool {
    let decoded = match photo.decode() {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(id = photo.id, error = %err, "photo skipped in pdf");
            return false;
        }
    };
    let rgb = decoded.thumbnail(PHOTO_MAX_PX, PHOTO_MAX_PX).to_rgb8();
    let (width_px, height_px) = rgb.dimensions();

    let slot = photo_slot(index_on_page);
    let dpi = fit_dpi(width_px, height_px, slot.width_mm, slot.height_mm);
    let drawn_height_mm = height_px as f32 * 25.4 / dpi;

    Image::from_dynamic_image(&DynamicImage::ImageRgb8(rgb)).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(slot.x_mm)),
            translate_y: Some(Mm(from_top(slot.top_mm + drawn_height_mm))),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    let caption = if photo.caption.trim().is_empty() {
        &photo.file_name
    } else {
        &photo.caption
    };
    layer.set_fill_color(color(BODY_TEXT));
    layer.use_text(
        pdf_safe_text(caption),
        CAPTION_FONT_PT,
        Mm(slot.x_mm),
        Mm(from_top(slot.top_mm + slot.height_mm + pt_to_mm(CAPTION_FONT_PT) + 1.0)),
        &fonts.regular,
    );
    true
}
