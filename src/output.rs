//! Output directory handling and PNG writing.
//!
//! Files are named `saying_{id}_{YYYYMMDDHHMMSS}.png` (UTC). Two calls
//! with the same id inside the same second collide and the later write
//! wins; callers that need stronger guarantees must serialize on id.

use crate::generators::Generator;
use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Owns the output directory and the naming convention.
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Construction touches nothing on disk; call [`init`](Self::init)
    /// once before generating.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory if it does not exist.
    pub fn init(&self) -> Result<(), GenerateError> {
        std::fs::create_dir_all(&self.root).map_err(|source| GenerateError::CreateDir {
            path: self.root.clone(),
            source,
        })
    }

    /// Render `prompt` with `generator` and persist the result.
    ///
    /// Returns the path of the written PNG.
    pub fn generate(
        &self,
        generator: &dyn Generator,
        saying_id: i64,
        prompt: &str,
    ) -> Result<PathBuf, GenerateError> {
        let image = generator.render(prompt);
        let path = self.root.join(filename(saying_id, Utc::now()));
        write_png(&image, &path)?;
        info!(
            saying_id,
            generator = generator.name(),
            path = %path.display(),
            "image written"
        );
        Ok(path)
    }
}

fn filename(saying_id: i64, now: DateTime<Utc>) -> String {
    format!("saying_{}_{}.png", saying_id, now.format("%Y%m%d%H%M%S"))
}

/// Encode fully in memory before touching the filesystem, so a failed
/// run never leaves a truncated file behind.
fn write_png(image: &RgbImage, path: &Path) -> Result<(), GenerateError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    std::fs::write(path, &bytes).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FlatGenerator;

    impl Generator for FlatGenerator {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn render(&self, _prompt: &str) -> RgbImage {
            RgbImage::from_pixel(8, 8, image::Rgb([7, 8, 9]))
        }
    }

    #[test]
    fn filename_follows_convention() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        assert_eq!(filename(42, at), "saying_42_20260314150926.png");
    }

    #[test]
    fn init_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("a/b/c"));
        store.init().unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn generate_writes_a_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        store.init().unwrap();

        let path = store.generate(&FlatGenerator, 7, "anything").unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("saying_7_"));

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(*decoded.get_pixel(0, 0), image::Rgb([7, 8, 9]));
    }

    #[test]
    fn write_into_missing_directory_fails_without_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("never-created"));
        let result = store.generate(&FlatGenerator, 1, "x");
        assert!(matches!(result, Err(GenerateError::Write { .. })));
        assert!(!store.root().exists());
    }
}
