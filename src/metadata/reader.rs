use crate::error::MetadataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Bounds-checked reads over an in-memory buffer. Every out-of-range
/// access is a `MetadataError::OutOfBounds`, never a panic.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N], MetadataError> {
        let end = offset.checked_add(N).ok_or(MetadataError::OffsetOverflow)?;
        self.data
            .get(offset..end)
            .and_then(|s| s.try_into().ok())
            .ok_or(MetadataError::OutOfBounds {
                offset,
                len: N,
                available: self.data.len(),
            })
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8, MetadataError> {
        let [b] = self.bytes::<1>(offset)?;
        Ok(b)
    }

    pub fn u16_at(&self, offset: usize, endian: Endian) -> Result<u16, MetadataError> {
        let raw = self.bytes::<2>(offset)?;
        Ok(match endian {
            Endian::Big => u16::from_be_bytes(raw),
            Endian::Little => u16::from_le_bytes(raw),
        })
    }

    pub fn u32_at(&self, offset: usize, endian: Endian) -> Result<u32, MetadataError> {
        let raw = self.bytes::<4>(offset)?;
        Ok(match endian {
            Endian::Big => u32::from_be_bytes(raw),
            Endian::Little => u32::from_le_bytes(raw),
        })
    }

    /// Unsigned rational (numerator, denominator) as a float.
    pub fn rational_at(&self, offset: usize, endian: Endian) -> Result<f64, MetadataError> {
        let num = self.u32_at(offset, endian)?;
        let den = self.u32_at(offset.checked_add(4).ok_or(MetadataError::OffsetOverflow)?, endian)?;
        if den == 0 {
            return Err(MetadataError::ZeroDenominator);
        }
        Ok(f64::from(num) / f64::from(den))
    }
}

/// `base + delta` without wrapping.
pub fn offset(base: usize, delta: usize) -> Result<usize, MetadataError> {
    base.checked_add(delta).ok_or(MetadataError::OffsetOverflow)
}
