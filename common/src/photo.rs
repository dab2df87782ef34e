//! 写真添付
//!
//! アップロードされた画像をメモリ上に保持する。ファイル単位で検証し、
//! 読めない画像はその1枚だけを除外する。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use tracing::{info, warn};

/// 検証済みのアップロード（id 未割り当て）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    /// バイト列から形式を判定し、全体をデコードして検証
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let format = image::guess_format(&data)
            .map_err(|e| Error::PhotoDecode(format!("{}: {}", file_name, e)))?;
        let mime = mime_for(format)
            .ok_or_else(|| Error::PhotoDecode(format!("{}: unsupported format {:?}", file_name, format)))?;
        let decoded = image::load_from_memory_with_format(&data, format)
            .map_err(|e| Error::PhotoDecode(format!("{}: {}", file_name, e)))?;
        let (width, height) = (decoded.width(), decoded.height());

        Ok(Self {
            file_name,
            mime: mime.to_string(),
            width,
            height,
            data,
        })
    }

    /// "data:image/jpeg;base64,..." 形式から読み込み
    pub fn from_data_url(file_name: impl Into<String>, data_url: &str) -> Result<Self> {
        let file_name = file_name.into();
        let payload = extract_base64_from_data_url(data_url)
            .ok_or_else(|| Error::PhotoDecode(format!("{}: not a base64 data URL", file_name)))?;
        let data = STANDARD
            .decode(payload)
            .map_err(|e| Error::PhotoDecode(format!("{}: {}", file_name, e)))?;
        Self::from_bytes(file_name, data)
    }

    /// 取り込み前（ワーカースレッド側）でサムネイルを作る
    pub fn thumbnail_rgba(&self, max_width: u32, max_height: u32) -> Result<([usize; 2], Vec<u8>)> {
        rgba_thumbnail(&self.file_name, &self.data, max_width, max_height)
    }
}

/// 写真添付
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub id: u64,
    pub file_name: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub caption: String,
}

impl PhotoAttachment {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        decode_image(&self.file_name, &self.data)
    }

    /// プレビュー用の RGBA サムネイル（[幅, 高さ], ピクセル）
    pub fn thumbnail_rgba(&self, max_width: u32, max_height: u32) -> Result<([usize; 2], Vec<u8>)> {
        rgba_thumbnail(&self.file_name, &self.data, max_width, max_height)
    }
}

/// 写真ストア
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoStore {
    photos: Vec<PhotoAttachment>,
    next_id: u64,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photos(&self) -> &[PhotoAttachment] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&PhotoAttachment> {
        self.photos.iter().find(|p| p.id == id)
    }

    /// 検証済みの写真を末尾に追加し、idを返す
    pub fn push(&mut self, upload: PhotoUpload) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        info!(id, file = %upload.file_name, bytes = upload.data.len(), "photo attached");
        self.photos.push(PhotoAttachment {
            id,
            file_name: upload.file_name,
            mime: upload.mime,
            width: upload.width,
            height: upload.height,
            data: upload.data,
            caption: String::new(),
        });
        id
    }

    pub fn ingest(&mut self, file_name: impl Into<String>, data: Vec<u8>) -> Result<u64> {
        let upload = PhotoUpload::from_bytes(file_name, data)?;
        Ok(self.push(upload))
    }

    pub fn ingest_data_url(&mut self, file_name: impl Into<String>, data_url: &str) -> Result<u64> {
        let upload = PhotoUpload::from_data_url(file_name, data_url)?;
        Ok(self.push(upload))
    }

    /// 複数ファイルを取り込む。失敗したファイルは除外し、追加件数を返す
    pub fn ingest_all<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut added = 0;
        for (file_name, data) in files {
            match self.ingest(file_name, data) {
                Ok(_) => added += 1,
                Err(err) => warn!(error = %err, "photo skipped"),
            }
        }
        added
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != id);
        self.photos.len() != before
    }

    pub fn set_caption(&mut self, id: u64, caption: impl Into<String>) -> bool {
        match self.photos.iter_mut().find(|p| p.id == id) {
            Some(photo) => {
                photo.caption = caption.into();
                true
            }
            None => false,
        }
    }
}

fn decode_image(file_name: &str, data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(data).map_err(|e| Error::PhotoDecode(format!("{}: {}", file_name, e)))
}

fn rgba_thumbnail(file_name: &str, data: &[u8], max_width: u32, max_height: u32) -> Result<([usize; 2], Vec<u8>)> {
    let thumb = decode_image(file_name, data)?.thumbnail(max_width, max_height).to_rgba8();
    let size = [thumb.width() as usize, thumb.height() as usize];
    Ok((size, thumb.into_raw()))
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    let (meta, payload) = data_url.split_once(',')?;
    if !meta.starts_with("data:") || !meta.ends_with(";base64") {
        return None;
    }
    Some(payload)
}

fn mime_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        _ => None,
    }
}
