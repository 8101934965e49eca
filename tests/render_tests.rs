mod common;

use std::io::Cursor;

use chrono::{DateTime, Local, TimeZone};
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};
use sha2::{Digest, Sha256};

use shipform::report::renderer;
use shipform::submission::record::{ReportForm, SubmissionRecord};

fn sample_record() -> SubmissionRecord {
    ReportForm {
        vessel: "117정".to_string(),
        department: "기관".to_string(),
        rank: "경사".to_string(),
        name: "홍길동".to_string(),
        phone: "010-1234-5678".to_string(),
        equipment: "발전기".to_string(),
        model: "ABC-100".to_string(),
        action_req: "부품 교체".to_string(),
        condition: "작동 불가".to_string(),
        status: "누유 발생\n소음 심함".to_string(),
    }
    .validate()
    .expect("sample record")
}

fn pinned_timestamp() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

fn sample_photo() -> Vec<u8> {
    let buffer = ImageBuffer::from_fn(60, 40, |x, y| {
        Rgb([(x * 4) as u8, (y * 6) as u8, 128u8])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("encode sample photo");
    bytes
}

/// Counts `/Type /Page` objects, excluding the `/Type /Pages` tree node.
fn page_count(bytes: &[u8]) -> usize {
    const TAG: &[u8] = b"/Type /Page";
    let mut count = 0;
    let mut index = 0;
    while index + TAG.len() <= bytes.len() {
        if bytes[index..].starts_with(TAG) && bytes.get(index + TAG.len()) != Some(&b's') {
            count += 1;
            index += TAG.len();
        } else {
            index += 1;
        }
    }
    count
}

/// Blanks out the PDF metadata that varies between otherwise identical
/// renders (creation dates, document ids, producer version).
fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(&mut normalized, b"<xmp:MetadataDate>", b"</xmp:MetadataDate>");
    scrub_xml(&mut normalized, b"<xmpMM:DocumentID>", b"</xmpMM:DocumentID>");
    scrub_xml(&mut normalized, b"<xmpMM:InstanceID>", b"</xmpMM:InstanceID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn renders_single_page_without_photo() {
    if !common::fonts_available() {
        eprintln!("Skipping renders_single_page_without_photo: no fonts in assets/fonts");
        return;
    }

    let report = renderer::render(
        &sample_record(),
        None,
        &common::font_dir(),
        pinned_timestamp(),
    )
    .expect("render without photo");

    assert!(report.bytes.starts_with(b"%PDF"));
    assert_eq!(report.filename, "Report_117정_발전기.pdf");
    assert_eq!(page_count(&report.bytes), 1);
}

#[test]
fn corrupt_photo_degrades_to_placeholder_and_still_renders() {
    if !common::fonts_available() {
        eprintln!(
            "Skipping corrupt_photo_degrades_to_placeholder_and_still_renders: no fonts in assets/fonts"
        );
        return;
    }

    let report = renderer::render(
        &sample_record(),
        Some(b"this is not an image"),
        &common::font_dir(),
        pinned_timestamp(),
    )
    .expect("render with corrupt photo");

    assert!(!report.bytes.is_empty());
    assert_eq!(page_count(&report.bytes), 1);
}

#[test]
fn embedded_photo_renders_single_page() {
    if !common::fonts_available() {
        eprintln!("Skipping embedded_photo_renders_single_page: no fonts in assets/fonts");
        return;
    }

    let photo = sample_photo();
    let report = renderer::render(
        &sample_record(),
        Some(&photo),
        &common::font_dir(),
        pinned_timestamp(),
    )
    .expect("render with photo");

    assert_eq!(page_count(&report.bytes), 1);
}

#[test]
fn rendering_is_deterministic_for_a_pinned_timestamp() {
    if !common::fonts_available() {
        eprintln!(
            "Skipping rendering_is_deterministic_for_a_pinned_timestamp: no fonts in assets/fonts"
        );
        return;
    }

    let record = sample_record();
    let photo = sample_photo();
    let render = || {
        renderer::render(
            &record,
            Some(&photo),
            &common::font_dir(),
            pinned_timestamp(),
        )
        .expect("render")
        .bytes
    };

    let first = render();
    let second = render();

    assert_eq!(first.len(), second.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&first),
        normalized_hash(&second),
        "renders must be identical after metadata normalization"
    );
}
