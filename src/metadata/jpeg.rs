//! Resolution from a JPEG's APP1/Exif segment.
//!
//! Reads XResolution (0x011A), YResolution (0x011B) and ResolutionUnit
//! (0x0128) from IFD0 of the embedded TIFF block.

use crate::error::MetadataError;
use crate::metadata::reader::{ByteReader, Endian, offset};
use crate::types::{MetadataSource, ResolutionMetadata};

pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const EXIF_TAG: &[u8; 4] = b"Exif";

const TAG_X_RESOLUTION: u16 = 0x011A;
const TAG_Y_RESOLUTION: u16 = 0x011B;
const TAG_RESOLUTION_UNIT: u16 = 0x0128;
const UNIT_CENTIMETERS: u16 = 3;
const IFD_ENTRY_LEN: usize = 12;

pub fn read_resolution(data: &[u8]) -> Result<ResolutionMetadata, MetadataError> {
    let r = ByteReader::new(data);
    if r.bytes::<2>(0).ok() != Some(JPEG_SOI) {
        return Err(MetadataError::BadSignature { format: "JPEG" });
    }

    let mut pos = 2;
    while pos + 4 < r.len() {
        let lead = r.u8_at(pos)?;
        if lead != 0xFF {
            return Err(MetadataError::MalformedSegment { offset: pos, found: lead });
        }
        let marker = r.u8_at(pos + 1)?;
        if marker == SOS || marker == EOI {
            break;
        }
        let seg_len = usize::from(r.u16_at(pos + 2, Endian::Big)?);

        if marker == APP1 {
            let exif = pos + 4;
            if &r.bytes::<4>(exif)? != EXIF_TAG {
                return Err(MetadataError::NotExif { offset: pos });
            }
            // A readable Exif block without both resolutions moves on to the next segment.
            if let Some(meta) = read_tiff_block(&r, exif + 6)? {
                return Ok(meta);
            }
        }

        pos = offset(pos, 2 + seg_len)?;
    }

    Err(MetadataError::MissingResolution)
}

/// Walk IFD0 of the TIFF block starting at `tiff`. Offsets inside the
/// block are relative to its start.
fn read_tiff_block(r: &ByteReader<'_>, tiff: usize) -> Result<Option<ResolutionMetadata>, MetadataError> {
    let endian = if r.u16_at(tiff, Endian::Big)? == 0x4949 {
        Endian::Little
    } else {
        Endian::Big
    };
    let ifd = offset(tiff, r.u32_at(tiff + 4, endian)? as usize)?;
    let count = usize::from(r.u16_at(ifd, endian)?);

    let mut x_res = None;
    let mut y_res = None;
    let mut unit = 2;

    for i in 0..count {
        let entry = offset(ifd + 2, i * IFD_ENTRY_LEN)?;
        match r.u16_at(entry, endian)? {
            TAG_X_RESOLUTION => {
                let value = offset(tiff, r.u32_at(entry + 8, endian)? as usize)?;
                x_res = Some(r.rational_at(value, endian)?);
            }
            TAG_Y_RESOLUTION => {
                let value = offset(tiff, r.u32_at(entry + 8, endian)? as usize)?;
                y_res = Some(r.rational_at(value, endian)?);
            }
            TAG_RESOLUTION_UNIT => unit = r.u16_at(entry + 8, endian)?,
            _ => {}
        }
    }

    let (Some(x), Some(y)) = (x_res.filter(|v| *v > 0.0), y_res.filter(|v| *v > 0.0)) else {
        return Ok(None);
    };
    let factor = if unit == UNIT_CENTIMETERS { 2.54 } else { 1.0 };
    Ok(Some(ResolutionMetadata {
        x_dpi: (x * factor).round() as u32,
        y_dpi: (y * factor).round() as u32,
        source: MetadataSource::JpegExif,
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// One IFD0 entry: tag, type, count, value-or-offset, all in `endian`.
    fn entry(endian: Endian, tag: u16, typ: u16, value: u32) -> Vec<u8> {
        let mut e = Vec::with_capacity(12);
        match endian {
            Endian::Big => {
                e.extend(tag.to_be_bytes());
                e.extend(typ.to_be_bytes());
                e.extend(1u32.to_be_bytes());
            }
            Endian::Little => {
                e.extend(tag.to_le_bytes());
                e.extend(typ.to_le_bytes());
                e.extend(1u32.to_le_bytes());
            }
        }
        match (endian, typ) {
            // SHORT values sit left-justified in the 4-byte slot
            (Endian::Big, 3) => e.extend([(value as u16).to_be_bytes(), [0, 0]].concat()),
            (Endian::Little, 3) => e.extend([(value as u16).to_le_bytes(), [0, 0]].concat()),
            (Endian::Big, _) => e.extend(value.to_be_bytes()),
            (Endian::Little, _) => e.extend(value.to_le_bytes()),
        }
        e
    }

    fn u32s(endian: Endian, v: u32) -> [u8; 4] {
        match endian {
            Endian::Big => v.to_be_bytes(),
            Endian::Little => v.to_le_bytes(),
        }
    }

    /// TIFF block with X/Y resolution rationals and an optional unit entry.
    pub(crate) fn tiff_block(endian: Endian, x: (u32, u32), y: (u32, u32), unit: Option<u16>) -> Vec<u8> {
        let count: u16 = if unit.is_some() { 3 } else { 2 };
        let ifd_len = 2 + usize::from(count) * 12 + 4;
        let x_off = 8 + ifd_len as u32;
        let y_off = x_off + 8;

        let mut t = Vec::new();
        match endian {
            Endian::Big => {
                t.extend(b"MM");
                t.extend(42u16.to_be_bytes());
                t.extend(8u32.to_be_bytes());
                t.extend(count.to_be_bytes());
            }
            Endian::Little => {
                t.extend(b"II");
                t.extend(42u16.to_le_bytes());
                t.extend(8u32.to_le_bytes());
                t.extend(count.to_le_bytes());
            }
        }
        t.extend(entry(endian, TAG_X_RESOLUTION, 5, x_off));
        t.extend(entry(endian, TAG_Y_RESOLUTION, 5, y_off));
        if let Some(u) = unit {
            t.extend(entry(endian, TAG_RESOLUTION_UNIT, 3, u32::from(u)));
        }
        t.extend([0u8; 4]);
        t.extend(u32s(endian, x.0));
        t.extend(u32s(endian, x.1));
        t.extend(u32s(endian, y.0));
        t.extend(u32s(endian, y.1));
        t
    }

    pub(crate) fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
        let mut s = vec![0xFF, marker];
        s.extend(((payload.len() + 2) as u16).to_be_bytes());
        s.extend(payload);
        s
    }

    pub(crate) fn app1_exif(tiff: &[u8]) -> Vec<u8> {
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend(tiff);
        segment(APP1, &payload)
    }

    pub(crate) fn jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
        let mut data = JPEG_SOI.to_vec();
        for s in segments {
            data.extend(s);
        }
        data.extend([0xFF, SOS, 0x00, 0x02, 0x12, 0x34]);
        data.extend([0xFF, EOI]);
        data
    }

    fn jfif() -> Vec<u8> {
        segment(0xE0, b"JFIF\0\x01\x01\x00\x00\x48\x00\x48\x00\x00")
    }

    #[test]
    fn big_endian_inches() {
        let data = jpeg(&[app1_exif(&tiff_block(Endian::Big, (300, 1), (300, 1), Some(2)))]);
        let meta = read_resolution(&data).unwrap();
        assert_eq!(meta, ResolutionMetadata { x_dpi: 300, y_dpi: 300, source: MetadataSource::JpegExif });
    }

    #[test]
    fn little_endian_after_jfif() {
        let data = jpeg(&[jfif(), app1_exif(&tiff_block(Endian::Little, (240, 1), (720, 2), Some(2)))]);
        let meta = read_resolution(&data).unwrap();
        assert_eq!((meta.x_dpi, meta.y_dpi), (240, 360));
    }

    #[test]
    fn centimeters_converted_to_dpi() {
        let data = jpeg(&[app1_exif(&tiff_block(Endian::Big, (118, 1), (118, 1), Some(3)))]);
        let meta = read_resolution(&data).unwrap();
        assert_eq!((meta.x_dpi, meta.y_dpi), (300, 300));
    }

    #[test]
    fn missing_unit_defaults_to_inches() {
        let data = jpeg(&[app1_exif(&tiff_block(Endian::Big, (72, 1), (72, 1), None))]);
        assert_eq!(read_resolution(&data).unwrap().x_dpi, 72);
    }

    #[test]
    fn fractional_rational_rounds() {
        let data = jpeg(&[app1_exif(&tiff_block(Endian::Little, (1001, 10), (999, 10), None))]);
        let meta = read_resolution(&data).unwrap();
        assert_eq!((meta.x_dpi, meta.y_dpi), (100, 100));
    }

    #[test]
    fn non_exif_app1_aborts() {
        let xmp = segment(APP1, b"http://ns.adobe.com/xap/1.0/\0<x/>");
        let later = app1_exif(&tiff_block(Endian::Big, (300, 1), (300, 1), None));
        let data = jpeg(&[xmp, later]);
        assert_eq!(read_resolution(&data), Err(MetadataError::NotExif { offset: 2 }));
    }

    #[test]
    fn no_app1_is_missing_resolution() {
        let data = jpeg(&[jfif()]);
        assert_eq!(read_resolution(&data), Err(MetadataError::MissingResolution));
    }

    #[test]
    fn garbage_between_segments_is_malformed() {
        let mut data = JPEG_SOI.to_vec();
        data.extend([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert!(matches!(read_resolution(&data), Err(MetadataError::MalformedSegment { offset: 2, found: 0x00 })));
    }

    #[test]
    fn wrong_signature() {
        assert_eq!(
            read_resolution(b"\x89PNG\r\n\x1a\n"),
            Err(MetadataError::BadSignature { format: "JPEG" })
        );
        assert!(read_resolution(&[]).is_err());
    }

    #[test]
    fn zero_denominator_is_an_error() {
        let data = jpeg(&[app1_exif(&tiff_block(Endian::Big, (300, 0), (300, 1), None))]);
        assert_eq!(read_resolution(&data), Err(MetadataError::ZeroDenominator));
    }

    #[test]
    fn truncated_exif_is_an_error_not_a_panic() {
        let full = jpeg(&[app1_exif(&tiff_block(Endian::Big, (300, 1), (300, 1), Some(2)))]);
        for cut in 0..full.len() {
            let _ = read_resolution(&full[..cut]);
        }
        // Cut inside the rational values
        let cut = 2 + 4 + 6 + 8 + 2 + 3 * 12 + 4 + 4;
        assert!(read_resolution(&full[..cut]).is_err());
    }

    #[test]
    fn ifd_offset_past_end_is_out_of_bounds() {
        let mut tiff = tiff_block(Endian::Big, (300, 1), (300, 1), None);
        tiff[4..8].copy_from_slice(&0xFFFF_FF00u32.to_be_bytes());
        let data = jpeg(&[app1_exif(&tiff)]);
        assert!(matches!(read_resolution(&data), Err(MetadataError::OutOfBounds { .. })));
    }
}
