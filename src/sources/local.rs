//! Filesystem-backed collaborators.
//!
//! These are the adapters a cron/VM deployment actually wires in:
//! - [`DirectoryImageSource`] — a directory of photos, indexed by query page.
//! - [`FileFontSource`] — one font file on disk, charset ignored.
//! - [`DirPublisher`] — "publishes" by writing the PNG, the caption, and a
//!   JSON receipt into an output directory. Useful both as a dry-run target
//!   and as the hand-off point for an external posting script.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{
    Attribution, FontSource, ImageQuery, ImageSource, PublishReceipt, Publisher, SourceError,
    SourcedImage,
};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Serves photos from a flat directory. The query's page selects among the
/// files (sorted by name, wrapped), so resampling a query walks the pool.
pub struct DirectoryImageSource {
    root: PathBuf,
}

impl DirectoryImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn photo_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

impl ImageSource for DirectoryImageSource {
    fn search(&mut self, query: &ImageQuery) -> Result<Option<SourcedImage>, SourceError> {
        let files = self.photo_files()?;
        if files.is_empty() {
            return Ok(None);
        }
        // pages are 1-based; wrap over the pool
        let path = &files[query.page.saturating_sub(1) as usize % files.len()];
        debug!("serving {} for query {:?}", path.display(), query);
        let image = image::open(path)?;
        let author = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());
        Ok(Some(SourcedImage {
            image,
            attribution: Some(Attribution { author, source_url: None }),
        }))
    }
}

/// Reads one font file from disk. The charset hint only matters for remote
/// backends that subset; a local file is returned whole.
pub struct FileFontSource {
    path: PathBuf,
}

impl FileFontSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FontSource for FileFontSource {
    fn fetch(&mut self, family: &str, charset: &str) -> Result<Vec<u8>, SourceError> {
        debug!(
            "loading font {} (requested family {family:?}, {} chars)",
            self.path.display(),
            charset.chars().count()
        );
        Ok(fs::read(&self.path)?)
    }
}

/// Writes the finished post into a directory, one timestamped trio of files
/// per run: `<stamp>.png`, `<stamp>.txt`, `<stamp>.json`. Runs landing in
/// the same second get a counter suffix instead of overwriting each other.
pub struct DirPublisher {
    out_dir: PathBuf,
}

impl DirPublisher {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    fn write_receipt(&self, path: &Path, receipt: &PublishReceipt) -> Result<(), SourceError> {
        let json = serde_json::to_string_pretty(receipt)
            .map_err(|e| SourceError::Provider(format!("receipt serialization: {e}")))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// First stem derived from `stamp` whose PNG does not exist yet.
    fn unique_stem(&self, stamp: &str) -> String {
        let mut stem = stamp.to_string();
        let mut suffix = 1u32;
        while self.out_dir.join(format!("{stem}.png")).exists() {
            stem = format!("{stamp}-{suffix}");
            suffix += 1;
        }
        stem
    }
}

impl Publisher for DirPublisher {
    fn publish(&mut self, png: &[u8], caption: &str) -> Result<PublishReceipt, SourceError> {
        fs::create_dir_all(&self.out_dir)?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        let stem = self.unique_stem(&stamp);

        let png_path = self.out_dir.join(format!("{stem}.png"));
        fs::write(&png_path, png)?;
        fs::write(self.out_dir.join(format!("{stem}.txt")), caption)?;

        let receipt = PublishReceipt {
            media_reference: png_path.display().to_string(),
            caption: caption.to_string(),
        };
        self.write_receipt(&self.out_dir.join(format!("{stem}.json")), &receipt)?;
        Ok(receipt)
    }
}
