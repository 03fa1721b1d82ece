use aicon::icon::{self, IconSpec};

#[test]
fn png_roundtrip_preserves_dimensions_and_channels() {
    let dir = tempfile::tempdir().unwrap();
    // Nested path also exercises parent-directory creation.
    let path = dir.path().join("nested/assets/icon.png");
    let img = icon::render(IconSpec::with_border(96)).unwrap();
    icon::write_icon(&img, &path).unwrap();

    let read = image::open(&path).unwrap();
    assert_eq!(read.color(), image::ColorType::Rgba8);
    let read = read.to_rgba8();
    assert_eq!(read.dimensions(), (96, 96));
    // PNG is lossless, so the raster survives bit-exact.
    assert_eq!(read.as_raw(), img.as_raw());
}

#[test]
fn write_to_blocked_path_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    // A directory occupying the target file name makes the write fail.
    let blocker = dir.path().join("icon.png");
    std::fs::create_dir_all(&blocker).unwrap();
    let img = icon::render(IconSpec::new(16)).unwrap();
    assert!(icon::write_icon(&img, &blocker).is_err());
}
