use std::fs;
use std::path::Path;

use folder_art::{
    Error, FolderArtGenerator, FormData, RenderConfig, Resolution, ShadowSettings, StorageConfig,
    Theme, UploadedFile, draw::encode_png,
};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

/// Writes a solid template for every resolution of `theme`.
fn write_templates(assets: &Path, theme: Theme, color: [u8; 4]) {
    let dir = assets.join("folders").join(theme.dir_name());
    fs::create_dir_all(&dir).unwrap();
    for resolution in Resolution::ALL {
        let edge = resolution.edge();
        let png = encode_png(&RgbaImage::from_pixel(edge, edge, Rgba(color))).unwrap();
        fs::write(dir.join(resolution.file_name()), png).unwrap();
    }
}

fn icon_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(width, height, Rgba([250, 250, 250, 255]))).unwrap()
}

fn setup() -> (TempDir, FolderArtGenerator) {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("assets");
    write_templates(&assets, Theme::Light, [84, 170, 240, 255]);
    write_templates(&assets, Theme::Dark, [40, 90, 150, 255]);
    let generator = FolderArtGenerator::new(StorageConfig::new(dir.path(), assets));
    (dir, generator)
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn writes_complete_iconset() {
    let (_dir, generator) = setup();
    let form = FormData::new().file("file", UploadedFile::new(icon_png(64, 64)));

    let set = generator
        .generate(&form, &RenderConfig::new().with_theme(Theme::Dark))
        .await
        .unwrap();

    let results = generator.storage().results_dir();
    assert_eq!(entries(&results), vec![format!("{}.iconset", set.id)]);
    assert_eq!(set.path, results.join(format!("{}.iconset", set.id)));

    let mut expected: Vec<_> = Resolution::ALL.iter().map(|r| r.file_name()).collect();
    expected.sort();
    assert_eq!(entries(&set.path), expected);

    for resolution in Resolution::ALL {
        let img = image::open(set.file(resolution)).unwrap().to_rgba8();
        assert_eq!(img.width(), resolution.edge(), "{resolution}");
        assert_eq!(img.height(), resolution.edge(), "{resolution}");
        // corner shows the dark template
        assert_eq!(img.get_pixel(0, 0).0, [40, 90, 150, 255], "{resolution}");
    }
}

#[tokio::test]
async fn builtin_icon_from_text_field() {
    let (dir, generator) = setup();
    let icons = dir.path().join("assets/icons");
    fs::create_dir_all(&icons).unwrap();
    fs::write(
        icons.join("star.svg"),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><path d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z" fill="#ffd700"/></svg>"##,
    )
    .unwrap();

    let form = FormData::new().text("file", "star");
    let set = generator.generate(&form, &RenderConfig::new()).await.unwrap();
    assert_eq!(entries(&set.path).len(), Resolution::ALL.len());
}

#[tokio::test]
async fn unknown_builtin_icon_writes_nothing() {
    let (_dir, generator) = setup();
    let form = FormData::new().text("file", "nope");

    let err = generator.generate(&form, &RenderConfig::new()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(!generator.storage().results_dir().exists());
}

#[tokio::test]
async fn missing_file_field_creates_no_results() {
    let (_dir, generator) = setup();

    let err = generator
        .generate(&FormData::new(), &RenderConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Couldn't get file");
    assert!(!generator.storage().results_dir().exists());
}

#[tokio::test]
async fn corrupt_upload_creates_no_results() {
    let (_dir, generator) = setup();
    let form = FormData::new().file("file", UploadedFile::new(b"\x89PNG\r\n\x1a\ntruncated".to_vec()));

    let err = generator.generate(&form, &RenderConfig::new()).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(!generator.storage().results_dir().exists());
}

#[tokio::test]
async fn out_of_range_shadow_creates_no_results() {
    let (_dir, generator) = setup();
    let form = FormData::new().file("file", UploadedFile::new(icon_png(64, 64)));

    for shadow in [
        ShadowSettings { blur: 1e30, offset_y: 0.0, opacity: 0.5, enabled: true },
        ShadowSettings { blur: 0.0, offset_y: 1e10, opacity: 0.5, enabled: true },
    ] {
        let config = RenderConfig::new().with_shadow(shadow);
        let err = generator.generate(&form, &config).await.unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
    assert!(!generator.storage().results_dir().exists());
}

#[tokio::test]
async fn interrupted_loop_keeps_unsuffixed_partial() {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("assets");
    write_templates(&assets, Theme::Light, [84, 170, 240, 255]);

    let failing = 4;
    fs::remove_file(
        assets
            .join("folders/light")
            .join(Resolution::ALL[failing].file_name()),
    )
    .unwrap();

    let storage = StorageConfig::new(dir.path(), &assets).with_keep_partial(true);
    let generator = FolderArtGenerator::new(storage);
    let form = FormData::new().file("file", UploadedFile::new(icon_png(32, 48)));

    let err = generator.generate(&form, &RenderConfig::new()).await.unwrap_err();
    assert!(matches!(err, Error::Io(..)));

    let results = generator.storage().results_dir();
    let names = entries(&results);
    assert_eq!(names.len(), 1);
    assert!(!names[0].ends_with(".iconset"));

    let written = entries(&results.join(&names[0]));
    assert_eq!(written.len(), failing);
    assert!(written.len() < Resolution::ALL.len());
}

#[tokio::test]
async fn interrupted_loop_removes_partial_by_default() {
    let (dir, generator) = setup();
    fs::remove_file(
        dir.path()
            .join("assets/folders/light")
            .join(Resolution::Icon512At2x.file_name()),
    )
    .unwrap();

    let form = FormData::new().file("file", UploadedFile::new(icon_png(32, 32)));
    let err = generator.generate(&form, &RenderConfig::new()).await.unwrap_err();

    assert!(matches!(err, Error::Io(..)));
    assert!(entries(&generator.storage().results_dir()).is_empty());
}

#[tokio::test]
async fn concurrent_requests_get_distinct_sets() {
    let (_dir, generator) = setup();
    let form = FormData::new().file("file", UploadedFile::new(icon_png(16, 16)));
    let config = RenderConfig::new();

    let (a, b) = tokio::join!(
        generator.generate(&form, &config),
        generator.generate(&form, &config)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.id, b.id);
    assert_eq!(entries(&generator.storage().results_dir()).len(), 2);
}

#[tokio::test]
async fn identical_requests_produce_identical_files() {
    let (_dir, generator) = setup();
    let form = FormData::new().file("file", UploadedFile::new(icon_png(40, 24)));
    let config = RenderConfig::from_json(r#"{"shadow":{"blur":0.02,"offsetY":0.02,"opacity":0.35}}"#)
        .unwrap();

    let a = generator.generate(&form, &config).await.unwrap();
    let b = generator.generate(&form, &config).await.unwrap();

    for resolution in [Resolution::Icon16, Resolution::Icon128At2x] {
        assert_eq!(
            fs::read(a.file(resolution)).unwrap(),
            fs::read(b.file(resolution)).unwrap()
        );
    }
}
