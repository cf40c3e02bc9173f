//! End-to-end runs over the filesystem adapters.
//!
//! These exercise the orchestrator wired exactly as `arunsawat run` wires it:
//! photo directory in, font file in, output directory out. Happy-path
//! compositing is covered by the in-crate tests with a mock renderer; here we
//! verify the run-level contracts — bounded image search, fatal font errors,
//! and above all that a failed run leaves nothing behind for the publisher.

use arunsawat::date::{DateContext, DayOfWeek};
use arunsawat::fitting::SizeSearch;
use arunsawat::pipeline::{Pipeline, PipelineError, PipelineOptions};
use arunsawat::sources::local::{DirPublisher, DirectoryImageSource, FileFontSource};
use arunsawat::text::FontError;
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tempfile::TempDir;

fn options() -> PipelineOptions {
    PipelineOptions {
        canvas: (800, 800),
        watermark: "@arunsawat".to_string(),
        search: SizeSearch::default(),
        max_image_attempts: 5,
    }
}

fn local_pipeline(
    photo_dir: &Path,
    font_path: &Path,
    out_dir: &Path,
) -> Pipeline<DirectoryImageSource, FileFontSource, DirPublisher> {
    Pipeline::new(
        DirectoryImageSource::new(photo_dir),
        FileFontSource::new(font_path),
        DirPublisher::new(out_dir),
        options(),
    )
}

fn write_photo(dir: &Path, name: &str) {
    let img = RgbaImage::from_pixel(640, 640, Rgba([90, 120, 150, 255]));
    image::DynamicImage::ImageRgba8(img).save(dir.join(name)).unwrap();
}

#[test]
fn empty_photo_pool_fails_after_bounded_attempts() {
    let tmp = TempDir::new().unwrap();
    let photos = tmp.path().join("photos");
    let out = tmp.path().join("out");
    std::fs::create_dir_all(&photos).unwrap();
    let font = tmp.path().join("font.ttf");
    std::fs::write(&font, b"irrelevant").unwrap();

    let mut pipeline = local_pipeline(&photos, &font, &out);
    let date = DateContext::for_day(DayOfWeek::Monday);
    let err = pipeline.run(&date, &mut StdRng::seed_from_u64(1)).unwrap_err();

    assert!(matches!(err, PipelineError::NoImageFound { attempts: 5 }));
    assert!(!out.exists(), "a failed run must publish nothing");
}

#[test]
fn unparsable_font_file_aborts_before_publishing() {
    let tmp = TempDir::new().unwrap();
    let photos = tmp.path().join("photos");
    let out = tmp.path().join("out");
    std::fs::create_dir_all(&photos).unwrap();
    write_photo(&photos, "morning.png");
    let font = tmp.path().join("font.ttf");
    std::fs::write(&font, vec![0u8; 64]).unwrap();

    let mut pipeline = local_pipeline(&photos, &font, &out);
    let date = DateContext::for_day(DayOfWeek::Sunday);
    let err = pipeline.run(&date, &mut StdRng::seed_from_u64(2)).unwrap_err();

    assert!(matches!(err, PipelineError::Font(FontError::Parse)));
    assert!(!out.exists(), "a failed run must publish nothing");
}

#[test]
fn missing_font_file_is_a_collaborator_failure() {
    let tmp = TempDir::new().unwrap();
    let photos = tmp.path().join("photos");
    let out = tmp.path().join("out");
    std::fs::create_dir_all(&photos).unwrap();
    write_photo(&photos, "morning.png");

    let mut pipeline =
        local_pipeline(&photos, &tmp.path().join("no-such-font.ttf"), &out);
    let date = DateContext::for_day(DayOfWeek::Friday);
    let err = pipeline.run(&date, &mut StdRng::seed_from_u64(3)).unwrap_err();

    assert!(matches!(err, PipelineError::Source(_)));
    assert!(!out.exists());
}
