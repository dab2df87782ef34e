//! PDFレイアウト設定モジュール
//!
//! mm基準のレイアウト定義（A4横）。描画に依存しない計算のみを置き、
//! printpdf を使う描画は export::pdf_core が担当する。

use crate::types::ResultStatus;
use std::ops::Range;

// ============================================
// mm基準レイアウト
// ============================================

/// A4横サイズ（mm）
pub const PAGE_WIDTH_MM: f32 = 297.0;
pub const PAGE_HEIGHT_MM: f32 = 210.0;

/// 余白（mm）
pub const MARGIN_MM: f32 = 10.0;

/// 上端からのベースライン位置（mm）
pub const TITLE_Y_MM: f32 = 16.0;
pub const META_Y_MM: f32 = 22.0;
pub const BANNER_Y_MM: f32 = 29.0;
pub const TABLE_TOP_MM: f32 = 26.0;
pub const TABLE_TOP_WITH_BANNER_MM: f32 = 33.0;

/// フォントサイズ（pt）
pub const TITLE_FONT_PT: f32 = 14.0;
pub const META_FONT_PT: f32 = 10.0;
pub const BANNER_FONT_PT: f32 = 12.0;
pub const TABLE_FONT_PT: f32 = 7.0;
pub const CAPTION_FONT_PT: f32 = 8.0;

/// セル内余白（mm）
pub const CELL_PADDING_MM: f32 = 1.5;
pub const LINE_SPACING: f32 = 1.25;

/// Helvetica の平均文字幅（em比）
const AVG_CHAR_EM: f32 = 0.5;

// ============================================
// 変換係数
// ============================================

/// pt → mm変換
pub const PT_TO_MM: f32 = 25.4 / 72.0;

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * PT_TO_MM
}

/// 上端基準のy座標をPDF座標（下端基準）に変換
pub fn from_top(y_mm: f32) -> f32 {
    PAGE_HEIGHT_MM - y_mm
}

// ============================================
// 色
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

pub const BRAND_PURPLE: Rgb8 = Rgb8(76, 29, 149);
pub const HEADER_TEXT: Rgb8 = Rgb8(255, 255, 255);
pub const ALT_ROW_FILL: Rgb8 = Rgb8(245, 243, 255);
pub const META_TEXT: Rgb8 = Rgb8(60, 60, 60);
pub const BODY_TEXT: Rgb8 = Rgb8(20, 20, 20);

/// 総合判定バナーの色
pub fn banner_color(status: ResultStatus) -> Rgb8 {
    match status {
        ResultStatus::Pass => Rgb8(6, 95, 70),
        ResultStatus::Fail => Rgb8(127, 29, 29),
        _ => Rgb8(120, 53, 15),
    }
}

// ============================================
// 表の列定義
// ============================================

#[derive(Debug, Clone, Copy)]
pub struct ColumnDefinition {
    pub label: &'static str,
    pub weight: f32,
}

/// 画面の列比率と同じ配分
pub const TABLE_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition { label: "Category", weight: 1.6 },
    ColumnDefinition { label: "Item", weight: 2.6 },
    ColumnDefinition { label: "Checkpoint", weight: 5.0 },
    ColumnDefinition { label: "Result", weight: 0.9 },
    ColumnDefinition { label: "JIRA", weight: 1.1 },
    ColumnDefinition { label: "Notes", weight: 1.4 },
];

/// 表レイアウトの計算結果（mm単位）
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub column_x_mm: Vec<f32>,
    pub column_width_mm: Vec<f32>,
    pub font_pt: f32,
    pub line_height_mm: f32,
}

impl TableLayout {
    pub fn landscape_a4() -> Self {
        let usable = PAGE_WIDTH_MM - MARGIN_MM * 2.0;
        let total_weight: f32 = TABLE_COLUMNS.iter().map(|c| c.weight).sum();
        let column_width_mm: Vec<f32> = TABLE_COLUMNS
            .iter()
            .map(|c| usable * c.weight / total_weight)
            .collect();
        let column_x_mm = column_width_mm
            .iter()
            .scan(MARGIN_MM, |x, width| {
                let start = *x;
                *x += width;
                Some(start)
            })
            .collect();

        Self {
            column_x_mm,
            column_width_mm,
            font_pt: TABLE_FONT_PT,
            line_height_mm: pt_to_mm(TABLE_FONT_PT) * LINE_SPACING,
        }
    }

    pub fn table_width_mm(&self) -> f32 {
        self.column_width_mm.iter().sum()
    }

    /// 列に収まるおおよその文字数
    pub fn max_chars(&self, column: usize) -> usize {
        let char_mm = pt_to_mm(self.font_pt) * AVG_CHAR_EM;
        let inner = self.column_width_mm[column] - CELL_PADDING_MM * 2.0;
        ((inner / char_mm).floor() as usize).max(1)
    }

    /// 各セルを折り返した行
    pub fn wrap_row(&self, cells: &[String]) -> Vec<Vec<String>> {
        cells
            .iter()
            .enumerate()
            .map(|(column, text)| wrap_text(text, self.max_chars(column)))
            .collect()
    }

    pub fn row_height_mm(&self, wrapped: &[Vec<String>]) -> f32 {
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * self.line_height_mm + CELL_PADDING_MM * 2.0
    }

    pub fn header_height_mm(&self) -> f32 {
        self.line_height_mm + CELL_PADDING_MM * 2.0
    }

    /// 指定の高さに収まるテキスト行数（最低1行）
    pub fn lines_within(&self, height_mm: f32) -> usize {
        let inner = height_mm - CELL_PADDING_MM * 2.0;
        ((inner / self.line_height_mm).floor() as usize).max(1)
    }
}

/// 折り返し済みの行を max_lines ごとに区切る。各列の行は順序を保って配分される
pub fn split_row(wrapped: &[Vec<String>], max_lines: usize) -> Vec<Vec<Vec<String>>> {
    let max_lines = max_lines.max(1);
    let lines = wrapped.iter().map(Vec::len).max().unwrap_or(0);
    if lines <= max_lines {
        return vec![wrapped.to_vec()];
    }
    (0..lines)
        .step_by(max_lines)
        .map(|start| {
            wrapped
                .iter()
                .map(|column| column.iter().skip(start).take(max_lines).cloned().collect())
                .collect()
        })
        .collect()
}

/// 単語単位で折り返す。長すぎる単語は文字数で分割
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// 行の高さからページ分割（各ページの行範囲）
pub fn paginate(row_heights: &[f32], first_page_mm: f32, other_pages_mm: f32) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    let mut available = first_page_mm;

    for (index, height) in row_heights.iter().enumerate() {
        if used + height > available && index > start {
            pages.push(start..index);
            start = index;
            used = 0.0;
            available = other_pages_mm;
        }
        used += height;
    }
    if start < row_heights.len() || pages.is_empty() {
        pages.push(start..row_heights.len());
    }
    pages
}

// ============================================
// 写真ページ
// ============================================

pub const PHOTO_COLUMNS: usize = 3;
pub const PHOTO_ROWS: usize = 2;
pub const PHOTOS_PER_PAGE: usize = PHOTO_COLUMNS * PHOTO_ROWS;
pub const PHOTO_GAP_MM: f32 = 6.0;
pub const PHOTO_CAPTION_MM: f32 = 8.0;
pub const PHOTO_TOP_MM: f32 = 24.0;

/// 写真スロットの位置（mm, 上端基準）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSlot {
    pub x_mm: f32,
    pub top_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

pub fn photo_slot(index_on_page: usize) -> PhotoSlot {
    let usable_w = PAGE_WIDTH_MM - MARGIN_MM * 2.0;
    let usable_h = PAGE_HEIGHT_MM - PHOTO_TOP_MM - MARGIN_MM;
    let width_mm = (usable_w - PHOTO_GAP_MM * (PHOTO_COLUMNS as f32 - 1.0)) / PHOTO_COLUMNS as f32;
    let cell_h = (usable_h - PHOTO_GAP_MM * (PHOTO_ROWS as f32 - 1.0)) / PHOTO_ROWS as f32;
    let column = index_on_page % PHOTO_COLUMNS;
    let row = (index_on_page / PHOTO_COLUMNS) % PHOTO_ROWS;

    PhotoSlot {
        x_mm: MARGIN_MM + column as f32 * (width_mm + PHOTO_GAP_MM),
        top_mm: PHOTO_TOP_MM + row as f32 * (cell_h + PHOTO_GAP_MM),
        width_mm,
        height_mm: cell_h - PHOTO_CAPTION_MM,
    }
}

/// 縦横比を保って枠に収めるDPI
pub fn fit_dpi(width_px: u32, height_px: u32, box_w_mm: f32, box_h_mm: f32) -> f32 {
    let by_width = width_px.max(1) as f32 * 25.4 / box_w_mm;
    let by_height = height_px.max(1) as f32 * 25.4 / box_h_mm;
    by_width.max(by_height)
}

/// 組み込みフォント（WinAnsi）で描ける文字に置換
pub fn pdf_safe_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '≤' => out.push_str("<="),
            '≥' => out.push_str(">="),
            '–' | '—' => out.push('-'),
            '‘' | '’' => out.push('\''),
            '“' | '”' => out.push('"'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'É' | 'È' => out.push('E'),
            'à' | 'â' => out.push('a'),
            'ç' => out.push('c'),
            'ô' => out.push('o'),
            'î' | 'ï' => out.push('i'),
            'û' | 'ù' => out.push('u'),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c if c.is_whitespace() => out.push(' '),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_fill_usable_width() {
        let layout = TableLayout::landscape_a4();
        assert_eq!(layout.column_x_mm.len(), TABLE_COLUMNS.len());
        assert!((layout.table_width_mm() - (PAGE_WIDTH_MM - MARGIN_MM * 2.0)).abs() < 0.01);
        assert!((layout.column_x_mm[0] - MARGIN_MM).abs() < f32::EPSILON);
        assert!(layout.column_x_mm.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_checkpoint_column_is_widest() {
        let layout = TableLayout::landscape_a4();
        let widest = (0..TABLE_COLUMNS.len()).max_by_key(|&c| layout.max_chars(c)).unwrap();
        assert_eq!(TABLE_COLUMNS[widest].label, "Checkpoint");
    }

    #[test]
    fn test_wrap_text_by_words() {
        let lines = wrap_text("Check for dents, scratches, smudges", 12);
        assert_eq!(lines, vec!["Check for", "dents,", "scratches,", "smudges"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        let lines = wrap_text("ab ABCDEFGHIJ", 4);
        assert_eq!(lines, vec!["ab", "ABCD", "EFGH", "IJ"]);
    }

    #[test]
    fn test_wrap_text_empty_is_one_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
        assert_eq!(wrap_text("   ", 10), vec![String::new()]);
    }

    #[test]
    fn test_row_height_grows_with_lines() {
        let layout = TableLayout::landscape_a4();
        let one = layout.row_height_mm(&[vec!["a".into()]]);
        let three = layout.row_height_mm(&[vec!["a".into()], vec!["a".into(), "b".into(), "c".into()]]);
        assert!(three > one);
        assert!((one - layout.header_height_mm()).abs() < f32::EPSILON);
    }

    #[test]
    fn test_paginate() {
        let heights = vec![10.0; 25];
        let pages = paginate(&heights, 100.0, 150.0);
        assert_eq!(pages, vec![0..10, 10..25]);

        let pages = paginate(&[], 100.0, 150.0);
        assert_eq!(pages, vec![0..0]);
    }

    #[test]
    fn test_paginate_oversized_row_gets_own_page() {
        let pages = paginate(&[10.0, 500.0, 10.0], 100.0, 100.0);
        assert_eq!(pages, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_split_row_keeps_every_line_in_order() {
        let note: Vec<String> = (0..7).map(|n| format!("line {n}")).collect();
        let wrapped = vec![vec!["Mechanical".to_string()], vec![], note.clone()];
        let parts = split_row(&wrapped, 3);

        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|part| part.len() == 3));
        assert!(parts.iter().all(|part| part.iter().all(|column| column.len() <= 3)));
        assert_eq!(parts[0][0], vec!["Mechanical".to_string()]);
        assert!(parts[1][0].is_empty());
        let joined: Vec<String> = parts.iter().flat_map(|part| part[2].clone()).collect();
        assert_eq!(joined, note);
    }

    #[test]
    fn test_split_row_short_row_is_untouched() {
        let wrapped = vec![vec!["a".to_string()], vec!["b".to_string(), "c".to_string()]];
        assert_eq!(split_row(&wrapped, 5), vec![wrapped.clone()]);
    }

    #[test]
    fn test_lines_within_fits_height() {
        let layout = TableLayout::landscape_a4();
        let lines = layout.lines_within(100.0);
        let rows: Vec<Vec<String>> = vec![vec![String::new(); lines]];
        assert!(layout.row_height_mm(&rows) <= 100.0 + 1e-3);
        assert_eq!(layout.lines_within(0.0), 1);
    }

    #[test]
    fn test_photo_slots_stay_on_page() {
        for index in 0..PHOTOS_PER_PAGE {
            let slot = photo_slot(index);
            assert!(slot.x_mm + slot.width_mm <= PAGE_WIDTH_MM - MARGIN_MM + 0.01);
            assert!(slot.top_mm + slot.height_mm + PHOTO_CAPTION_MM <= PAGE_HEIGHT_MM - MARGIN_MM + 0.01);
        }
        assert_eq!(photo_slot(0), photo_slot(PHOTOS_PER_PAGE));
    }

    #[test]
    fn test_fit_dpi_keeps_image_inside_box() {
        let dpi = fit_dpi(4000, 1000, 80.0, 60.0);
        let width_mm = 4000.0 * 25.4 / dpi;
        let height_mm = 1000.0 * 25.4 / dpi;
        assert!(width_mm <= 80.01 && height_mm <= 60.01);
    }

    #[test]
    fn test_pdf_safe_text() {
        assert_eq!(pdf_safe_text("Boot ≤5s"), "Boot <=5s");
        assert_eq!(pdf_safe_text("Fabriqué en ___"), "Fabrique en ___");
        assert_eq!(pdf_safe_text("工事"), "??");
    }

    #[test]
    fn test_banner_colors() {
        assert_eq!(banner_color(ResultStatus::Pass), Rgb8(6, 95, 70));
        assert_eq!(banner_color(ResultStatus::Fail), Rgb8(127, 29, 29));
        assert_eq!(banner_color(ResultStatus::ConditionalApproval), Rgb8(120, 53, 15));
    }
}
