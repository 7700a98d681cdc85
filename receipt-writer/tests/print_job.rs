// receipt-writer/tests/print_job.rs
// End-to-end print job assembly

use receipt_writer::{
    Align, CustomProfile, DynamicImage, ImageSource, Paper58mm, Paper80mm, PrintError,
    PrinterWriter, WriterConfig,
};
use std::collections::HashMap;
use tempfile::TempDir;

fn checker(width: u32, height: u32) -> DynamicImage {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            image::Rgba([0, 0, 0, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
}

/// (width_bytes, height) from a GS v 0 header
fn raster_header(chunk: &[u8]) -> (u32, u32) {
    assert_eq!(&chunk[0..4], &[0x1D, 0x76, 0x30, 0x00]);
    let x = chunk[4] as u32 | (chunk[5] as u32) << 8;
    let y = chunk[6] as u32 | (chunk[7] as u32) << 8;
    (x, y)
}

#[test]
fn test_receipt_job() {
    let mut w = PrinterWriter::new(Paper58mm).unwrap();
    w.align_center().unwrap();
    w.emphasized_on().unwrap();
    w.print("小票").unwrap();
    w.emphasized_off().unwrap();
    w.line_feed().unwrap();
    w.align_left().unwrap();
    w.print_in_one_line("合计", "9.50", 0).unwrap();
    w.line_feed().unwrap();
    w.feed_paper_cut().unwrap();

    let data = w.data_and_close().unwrap();

    let mut expected = vec![0x1B, 0x40, 0x1B, 0x61, 0x01, 0x1B, 0x45, 0x01];
    expected.extend_from_slice(&[0xD0, 0xA1, 0xC6, 0xB1]); // 小票 in GB2312
    expected.extend_from_slice(&[0x1B, 0x45, 0x00, 0x0A, 0x1B, 0x61, 0x00]);
    expected.extend_from_slice(&[0xBA, 0xCF, 0xBC, 0xC6]); // 合计
    expected.extend_from_slice(" ".repeat(31 - 4 - 4).as_bytes());
    expected.extend_from_slice(b"9.50");
    expected.extend_from_slice(&[0x0A, 0x1D, 0x56, 0x41, 0x00]);
    assert_eq!(data, expected);
}

#[test]
fn test_jobs_do_not_share_bytes() {
    let mut w = PrinterWriter::new(Paper80mm).unwrap();
    w.print("first").unwrap();
    let first = w.data_and_reset().unwrap();
    assert_eq!(first, b"\x1B\x40first");

    w.print("second").unwrap();
    assert_eq!(w.data_and_reset().unwrap(), b"second");
}

#[test]
fn test_balanced_line_layout() {
    let profile = CustomProfile {
        line_char_width: 12,
        line_dot_widths: vec![24],
        max_raster_dot_width: 200,
    };
    let config = WriterConfig::default().with_charset("utf-8");
    let mut w = PrinterWriter::with_config(profile, config).unwrap();
    w.data_and_reset().unwrap();

    w.print_in_one_line_balanced("ABCD", "EFGHIJ", "KLMN", 0).unwrap();
    assert_eq!(
        w.data_and_reset().unwrap(),
        b"ABCD     EFGHIJ     KLMN".to_vec()
    );

    w.print_justified("end", Align::Right, 0).unwrap();
    assert_eq!(
        w.data_and_reset().unwrap(),
        format!("{}end", " ".repeat(21)).into_bytes()
    );

    w.print_asterisk_line().unwrap();
    assert_eq!(w.data_and_reset().unwrap(), vec![b'*'; 24]);
}

#[test]
fn test_unknown_default_charset() {
    let config = WriterConfig::default().with_charset("x-unknown");
    let mut w = PrinterWriter::with_config(Paper58mm, config).unwrap();
    let err = w.print("abc").unwrap_err();
    assert!(matches!(err, PrintError::UnsupportedEncoding(_)));
}

#[test]
fn test_image_from_bitmap_is_banded() {
    let mut w = PrinterWriter::with_height_parting(Paper80mm, 200).unwrap();
    let img = checker(1000, 1000);

    let chunks = w.image_bytes(ImageSource::Bitmap(&img)).unwrap();
    let headers: Vec<(u32, u32)> = chunks.iter().map(|c| raster_header(c)).collect();
    // 1000x1000 scaled to 500x500, 63 bytes per row
    assert_eq!(headers, vec![(63, 200), (63, 200), (63, 100)]);

    w.data_and_reset().unwrap();
    assert!(w.print_image(ImageSource::Bitmap(&img)).unwrap());
    let data = w.data_and_reset().unwrap();
    assert_eq!(data, chunks.concat());
}

#[test]
fn test_image_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("logo.png");
    checker(760, 100).save(&path).unwrap();

    let w = PrinterWriter::new(Paper58mm).unwrap();
    let chunks = w.image_bytes(ImageSource::Path(&path)).unwrap();
    assert_eq!(chunks.len(), 1);
    // 760 -> 380 dots wide, 50 rows
    assert_eq!(raster_header(&chunks[0]), (48, 50));
}

#[test]
fn test_image_from_resource() {
    let mut encoded = std::io::Cursor::new(Vec::new());
    checker(100, 300)
        .write_to(&mut encoded, image::ImageFormat::Png)
        .unwrap();
    let mut resources = HashMap::new();
    resources.insert(42u32, encoded.into_inner());

    let mut w = PrinterWriter::new(Paper58mm).unwrap();
    w.set_height_parting(128);
    let chunks = w
        .image_bytes(ImageSource::Resource {
            resolver: &resources,
            id: 42,
        })
        .unwrap();
    let heights: Vec<u32> = chunks.iter().map(|c| raster_header(c).1).collect();
    assert_eq!(heights, vec![128, 128, 44]);
}

#[test]
fn test_missing_image_appends_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.png");

    let mut w = PrinterWriter::new(Paper58mm).unwrap();
    w.data_and_reset().unwrap();
    assert!(!w.print_image(ImageSource::Path(&path)).unwrap());
    assert!(w.data_and_reset().unwrap().is_empty());
}

#[test]
fn test_decode_limit_yields_no_image() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("big.png");
    checker(2000, 2000).save(&path).unwrap();

    let config = WriterConfig::default().with_decode_limit(1024);
    let w = PrinterWriter::with_config(Paper80mm, config).unwrap();
    assert!(w.image_bytes(ImageSource::Path(&path)).is_none());
}
