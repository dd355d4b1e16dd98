#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const ASCII: u16 = 2;
const SHORT: u16 = 3;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

pub const GPS_POINTER: u16 = 0x8825;

pub fn unique_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("exif_grouper_{name}_{stamp}.{ext}"));
    path
}

pub fn unique_dir(name: &str) -> PathBuf {
    let dir = unique_path(name, "d");
    fs::create_dir_all(&dir).expect("should create temp directory");
    dir
}

pub struct IfdEntry {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

impl IfdEntry {
    pub fn ascii(tag: u16, value: &str) -> Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        Self {
            tag,
            kind: ASCII,
            count: data.len() as u32,
            data,
        }
    }

    pub fn short(tag: u16, value: u16) -> Self {
        Self {
            tag,
            kind: SHORT,
            count: 1,
            data: value.to_le_bytes().to_vec(),
        }
    }

    pub fn long(tag: u16, value: u32) -> Self {
        Self {
            tag,
            kind: LONG,
            count: 1,
            data: value.to_le_bytes().to_vec(),
        }
    }

    pub fn rationals(tag: u16, values: &[(u32, u32)]) -> Self {
        let data = values
            .iter()
            .flat_map(|(num, denom)| {
                num.to_le_bytes()
                    .into_iter()
                    .chain(denom.to_le_bytes())
            })
            .collect();
        Self {
            tag,
            kind: RATIONAL,
            count: values.len() as u32,
            data,
        }
    }
}

/// Little-endian TIFF block with IFD0 and, optionally, a GPS IFD linked from it.
pub fn tiff(mut ifd0: Vec<IfdEntry>, gps: Option<Vec<IfdEntry>>) -> Vec<u8> {
    if gps.is_some() {
        ifd0.push(IfdEntry::long(GPS_POINTER, 0));
    }
    ifd0.sort_by_key(|entry| entry.tag);

    let gps_start = 8 + ifd_len(&ifd0);
    if let Some(pointer) = ifd0.iter_mut().find(|entry| entry.tag == GPS_POINTER) {
        pointer.data = (gps_start as u32).to_le_bytes().to_vec();
    }

    let mut out = b"II".to_vec();
    out.extend(42u16.to_le_bytes());
    out.extend(8u32.to_le_bytes());
    write_ifd(&mut out, &ifd0);

    if let Some(mut gps) = gps {
        gps.sort_by_key(|entry| entry.tag);
        write_ifd(&mut out, &gps);
    }
    out
}

fn padded(len: usize) -> usize {
    len + len % 2
}

fn ifd_len(entries: &[IfdEntry]) -> usize {
    let data: usize = entries
        .iter()
        .filter(|entry| entry.data.len() > 4)
        .map(|entry| padded(entry.data.len()))
        .sum();
    2 + 12 * entries.len() + 4 + data
}

fn write_ifd(out: &mut Vec<u8>, entries: &[IfdEntry]) {
    let base = out.len() + 2 + 12 * entries.len() + 4;
    let mut data = Vec::new();

    out.extend((entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend(entry.tag.to_le_bytes());
        out.extend(entry.kind.to_le_bytes());
        out.extend(entry.count.to_le_bytes());
        if entry.data.len() <= 4 {
            let mut inline = entry.data.clone();
            inline.resize(4, 0);
            out.extend(inline);
        } else {
            out.extend(((base + data.len()) as u32).to_le_bytes());
            data.extend(&entry.data);
            if entry.data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    out.extend(0u32.to_le_bytes());
    out.extend(data);
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([120, 80, 40]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .expect("should encode jpeg");
    bytes
}

/// Inserts an APP1 Exif segment right after SOI.
pub fn jpeg_with_exif(width: u32, height: u32, tiff: &[u8]) -> Vec<u8> {
    let plain = jpeg(width, height);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = plain[..2].to_vec();
    out.extend([0xFF, 0xE1]);
    out.extend(segment_len.to_be_bytes());
    out.extend(b"Exif\0\0");
    out.extend(tiff);
    out.extend(&plain[2..]);
    out
}

pub fn camera_tiff() -> Vec<u8> {
    tiff(
        vec![
            IfdEntry::ascii(0x010F, "Canon"),
            IfdEntry::ascii(0x0110, "EOS 5D"),
            IfdEntry::ascii(0x0131, "Lightroom"),
            IfdEntry::ascii(0x0132, "2020:01:01 10:00:00"),
            IfdEntry::ascii(0x9003, "2020:01:01 10:00:00"),
            IfdEntry::ascii(0x9004, "2020:01:01 10:00:00"),
            IfdEntry::short(0xA002, 32),
            IfdEntry::short(0xA003, 24),
        ],
        Some(vec![
            IfdEntry::ascii(1, "S"),
            IfdEntry::rationals(2, &[(33, 1), (51, 1), (3540, 100)]),
            IfdEntry::ascii(3, "E"),
            IfdEntry::rationals(4, &[(151, 1), (12, 1), (3600, 100)]),
        ]),
    )
}
