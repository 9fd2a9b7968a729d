use crate::error::MetadataError;
use crate::metadata::reader::{ByteReader, Endian, offset};
use crate::types::{MetadataSource, ResolutionMetadata};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const INCHES_PER_METER: f64 = 0.0254;
const UNIT_METER: u8 = 1;

/// Length, type and CRC around each chunk payload.
const CHUNK_OVERHEAD: usize = 12;

/// Resolution from the `pHYs` chunk. `pHYs` must precede `IDAT`, so the
/// scan gives up at the first image-data or end chunk. CRCs are not checked.
pub fn read_resolution(data: &[u8]) -> Result<ResolutionMetadata, MetadataError> {
    let r = ByteReader::new(data);
    if r.bytes::<8>(0).ok() != Some(PNG_SIGNATURE) {
        return Err(MetadataError::BadSignature { format: "PNG" });
    }

    let mut pos = PNG_SIGNATURE.len();
    while pos + 4 < r.len() {
        let len = r.u32_at(pos, Endian::Big)? as usize;
        match &r.bytes::<4>(pos + 4)? {
            b"pHYs" => return read_phys(&r, pos + 8),
            b"IDAT" => return Err(MetadataError::ImageDataReached("pHYs")),
            b"IEND" => break,
            _ => {}
        }
        pos = offset(pos, offset(CHUNK_OVERHEAD, len)?)?;
    }

    Err(MetadataError::MissingResolution)
}

fn read_phys(r: &ByteReader<'_>, payload: usize) -> Result<ResolutionMetadata, MetadataError> {
    let ppu_x = r.u32_at(payload, Endian::Big)?;
    let ppu_y = r.u32_at(payload + 4, Endian::Big)?;
    let unit = r.u8_at(payload + 8)?;

    if unit == UNIT_METER {
        Ok(ResolutionMetadata {
            x_dpi: (f64::from(ppu_x) * INCHES_PER_METER).round() as u32,
            y_dpi: (f64::from(ppu_y) * INCHES_PER_METER).round() as u32,
            source: MetadataSource::PngPhys,
        })
    } else {
        Ok(ResolutionMetadata {
            x_dpi: ppu_x,
            y_dpi: ppu_y,
            source: MetadataSource::PngPhysUnknownUnit,
        })
    }
}
