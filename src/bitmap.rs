// Minimal uncompressed 32 bpp bitmap container.
// Rows are written top-to-bottom exactly as stored (no vertical flip), so
// standard viewers show the image upside down relative to buffer order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, warn};

use crate::buffer::ColorBuffer;
use crate::error::{Error, Result};
use crate::types::Color;

pub const FILE_TYPE: u16 = 0x4D42; // "BM"
pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;
pub const HEADER_SIZE: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
pub const BITMAP_RESOLUTION: i32 = 4096;

/// Header for a `width` x `height` image. Fails with `TooLarge` when a
/// dimension or the byte counts do not fit their header fields.
fn header(width: usize, height: usize) -> Result<[u8; HEADER_SIZE as usize]> {
    let too_large = || Error::TooLarge { width, height };
    let signed = |n: usize| i32::try_from(n).map_err(|_| too_large());
    let (w, h) = (signed(width)?, signed(height)?);
    let pixel_size = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    let file_size = pixel_size.checked_add(HEADER_SIZE).ok_or_else(too_large)?;

    let mut out = [0u8; HEADER_SIZE as usize];
    let fields: [&[u8]; 15] = [
        // File header
        &FILE_TYPE.to_le_bytes(),
        &file_size.to_le_bytes(),
        &0u16.to_le_bytes(),
        &0u16.to_le_bytes(),
        &HEADER_SIZE.to_le_bytes(),
        // Info header
        &INFO_HEADER_SIZE.to_le_bytes(),
        &w.to_le_bytes(),
        &h.to_le_bytes(),
        &1u16.to_le_bytes(),  // planes
        &32u16.to_le_bytes(), // bits per pixel
        &0u32.to_le_bytes(),  // no compression
        &pixel_size.to_le_bytes(),
        &BITMAP_RESOLUTION.to_le_bytes(),
        &BITMAP_RESOLUTION.to_le_bytes(),
        &[0; 8], // colors used, colors important
    ];
    let mut at = 0;
    for field in fields {
        out[at..at + field.len()].copy_from_slice(field);
        at += field.len();
    }
    Ok(out)
}

/// Serialize `buffer` into a complete bitmap file image.
pub fn encode(buffer: &ColorBuffer) -> Result<Vec<u8>> {
    let header = header(buffer.width(), buffer.height())?;
    let mut out = Vec::with_capacity(header.len() + buffer.len() * 4);
    out.extend_from_slice(&header);
    for c in buffer.pixels() {
        out.extend_from_slice(&c.argb().to_le_bytes());
    }
    Ok(out)
}

/// Encode `buffer` into any writer.
pub fn write_to<W: Write>(mut writer: W, buffer: &ColorBuffer) -> Result<()> {
    writer.write_all(&encode(buffer)?)?;
    writer.flush()?;
    Ok(())
}

/// Write `buffer` to `path`. Failure is logged and returned, never fatal.
pub fn write(path: impl AsRef<Path>, buffer: &ColorBuffer) -> Result<()> {
    let path = path.as_ref();
    let result = encode(buffer).and_then(|bytes| {
        File::create(path)
            .and_then(|f| {
                let mut writer = BufWriter::new(f);
                writer.write_all(&bytes)?;
                writer.flush()
            })
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })
    });
    match &result {
        Ok(()) => debug!(
            "wrote {}x{} bitmap to {}",
            buffer.width(),
            buffer.height(),
            path.display()
        ),
        Err(e) => warn!("unable to write output file {}: {e}", path.display()),
    }
    result
}

/// Read back a bitmap in the layout [`encode`] produces.
pub fn decode(bytes: &[u8]) -> Result<ColorBuffer> {
    if bytes.len() < HEADER_SIZE as usize {
        return Err(Error::Decode(format!(
            "{} bytes is shorter than the {HEADER_SIZE}-byte header",
            bytes.len()
        )));
    }
    let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
    let u32_at = |at: usize| {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };

    if u16_at(0) != FILE_TYPE {
        return Err(Error::Decode("missing BM signature".into()));
    }
    let offset = u32_at(10) as usize;
    let width = u32_at(18) as i32;
    let height = u32_at(22) as i32;
    let bits_per_pixel = u16_at(28);
    let compression = u32_at(30);

    if bits_per_pixel != 32 || compression != 0 {
        return Err(Error::Decode(format!(
            "unsupported format: {bits_per_pixel} bpp, compression {compression}"
        )));
    }
    if width < 0 || height < 0 {
        return Err(Error::Decode(format!("negative dimensions {width}x{height}")));
    }

    let (width, height) = (width as usize, height as usize);
    let data = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| n.checked_add(offset))
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| {
            Error::Decode(format!(
                "{width}x{height} pixels at offset {offset} do not fit in {} bytes",
                bytes.len()
            ))
        })?;

    let pixels = data
        .chunks_exact(4)
        .map(|b| Color(u32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        .collect();
    ColorBuffer::from_pixels(width, height, pixels)
}
