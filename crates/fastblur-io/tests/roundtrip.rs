use fastblur_io::{read, read_raw, write, ImageData, IoError, PixelLayout, RawFormat};
use tempfile::tempdir;

#[test]
fn padded_rows_are_repacked_on_write() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("padded.png");

    // 2x2 RGB, stride 8 (2 padding bytes per row)
    let data = vec![1, 2, 3, 4, 5, 6, 0xEE, 0xEE, 7, 8, 9, 10, 11, 12, 0xEE, 0xEE];
    let image = ImageData::from_raw_parts(2, 2, 8, PixelLayout::RGB, data).unwrap();
    write(&path, &image).expect("write png");

    let loaded = read(&path).expect("read png");
    assert_eq!((loaded.width, loaded.height), (2, 2));
    assert_eq!(loaded.packed().as_ref(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn raw_file_reads_as_layout() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("frame.bin");
    std::fs::write(&path, [9, 1, 2, 3, 9, 4, 5, 6]).unwrap();

    let format: RawFormat = "argb:2x1".parse().unwrap();
    let image = read_raw(&path, &format).expect("read raw");
    assert_eq!(image.layout, PixelLayout::ARGB);
    assert_eq!(image.stride, 8);

    // Raw in, PNG out: alpha-first reordered to RGBA
    let png_path = dir.path().join("frame.png");
    write(&png_path, &image).unwrap();
    let loaded = read(&png_path).unwrap();
    assert_eq!(loaded.layout, PixelLayout::RGBA);
    assert_eq!(loaded.data, vec![1, 2, 3, 9, 4, 5, 6, 9]);
}

#[test]
fn truncated_raw_file_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("short.bin");
    std::fs::write(&path, [0u8; 10]).unwrap();

    let format: RawFormat = "rgb:2x2".parse().unwrap();
    match read_raw(&path, &format) {
        Err(IoError::Truncated { expected, actual }) => {
            assert_eq!(expected, 12);
            assert_eq!(actual, 10);
        }
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = read(dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
}

#[test]
fn non_png_input_is_unsupported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("image.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
}
