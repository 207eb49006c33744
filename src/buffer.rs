// Owned width x height grids of cells, row-major.
// A `ColorBuffer` holds visible pixels; a `SeedBuffer` holds nearest-seed
// coordinates for the distance field engine. They are distinct types so one
// phase can never read the other's cells as its own.

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::types::{Color, Seed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer<P> {
    width: usize,
    height: usize,
    pixels: Vec<P>, // length = width * height, always
}

pub type ColorBuffer = PixelBuffer<Color>;
pub type SeedBuffer = PixelBuffer<Seed>;

impl<P: Copy + Default> PixelBuffer<P> {
    /// Allocate a buffer with every cell set to `P::default()`
    /// (transparent black for colors, "no seed" for seeds).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![P::default(); width * height],
        }
    }

    /// Overwrite every cell.
    /// Visual: the whole image becomes one flat color.
    pub fn clear(&mut self, value: P) {
        self.pixels.fill(value);
    }

    pub fn get(&self, x: usize, y: usize) -> Result<P> {
        let idx = self.index(x, y)?;
        Ok(self.pixels[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, value: P) -> Result<()> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = value;
        Ok(())
    }

    /// Write a cell given signed coordinates, skipping anything off the buffer.
    /// This is the clipping primitive the rasterizers draw through.
    /// Visual: one dot, or nothing if it falls off the edge.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, value: P) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = value;
    }

    /// Copy every cell into `dst`.
    /// `dst` must have the same width and at least as many rows; rows of
    /// `dst` past `self.height` are left untouched. On mismatch nothing is
    /// written.
    pub fn copy_into(&self, dst: &mut PixelBuffer<P>) -> Result<()> {
        if dst.width != self.width || dst.height < self.height {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                found: (dst.width, dst.height),
            });
        }
        dst.pixels[..self.pixels.len()].copy_from_slice(&self.pixels);
        Ok(())
    }

    /// Exchange the contents of two buffers without copying any cells.
    pub fn swap(&mut self, other: &mut PixelBuffer<P>) {
        std::mem::swap(self, other);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    /// Iterate `(x, y, cell)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, usize, P)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &p)| (i % width, i / width, p))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}

impl ColorBuffer {
    /// Build a buffer from raw cells, e.g. pixels decoded from a file.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::DimensionMismatch {
                expected: (width, height),
                found: (pixels.len(), 1),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert an `image` crate RGBA image (e.g. a PNG mask) into a buffer.
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|&Rgba([r, g, b, a])| Color::rgba(r, g, b, a))
            .collect();
        Self {
            width: w as usize,
            height: h as usize,
            pixels,
        }
    }

    /// Convert into an `image` crate RGBA image, e.g. for saving as PNG.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.pixels[y as usize * self.width + x as usize];
            Rgba([c.r(), c.g(), c.b(), c.a()])
        })
    }

    /// Pixels as raw `0xAARRGGBB` words, the format a `minifb` window takes.
    pub fn to_argb_words(&self) -> Vec<u32> {
        self.pixels.iter().map(|c| c.argb()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let buf = ColorBuffer::new(3, 2);
        assert_eq!(buf.len(), 6);
        assert!(buf.pixels().iter().all(|&c| c == Color::TRANSPARENT));

        let seeds = SeedBuffer::new(2, 2);
        assert!(seeds.pixels().iter().all(|s| s.is_none()));
    }

    #[test]
    fn get_set_and_bounds() {
        let mut buf = ColorBuffer::new(4, 3);
        buf.set(3, 2, Color::WHITE).unwrap();
        assert_eq!(buf.get(3, 2).unwrap(), Color::WHITE);
        assert!(matches!(buf.get(4, 0), Err(Error::OutOfBounds { x: 4, .. })));
        assert!(matches!(
            buf.set(0, 3, Color::WHITE),
            Err(Error::OutOfBounds { y: 3, .. })
        ));
    }

    #[test]
    fn plot_clips() {
        let mut buf = ColorBuffer::new(2, 2);
        buf.plot(-1, 0, Color::WHITE);
        buf.plot(0, 2, Color::WHITE);
        buf.plot(1, 1, Color::WHITE);
        assert_eq!(buf.pixels().iter().filter(|&&c| c == Color::WHITE).count(), 1);
    }

    #[test]
    fn empty_buffer_is_well_defined() {
        let mut buf = ColorBuffer::new(0, 0);
        assert!(buf.is_empty());
        buf.clear(Color::WHITE);
        assert!(buf.get(0, 0).is_err());
        assert_eq!(buf.enumerate().count(), 0);
    }

    #[test]
    fn clone_is_independent() {
        let mut a = ColorBuffer::new(2, 2);
        let b = a.clone();
        a.clear(Color::WHITE);
        assert_eq!(b.get(0, 0).unwrap(), Color::TRANSPARENT);
        assert_eq!((b.width(), b.height()), (2, 2));
    }

    #[test]
    fn copy_into_rules() {
        let mut src = ColorBuffer::new(2, 2);
        src.clear(Color::WHITE);

        let mut taller = ColorBuffer::new(2, 3);
        src.copy_into(&mut taller).unwrap();
        assert_eq!(taller.get(1, 1).unwrap(), Color::WHITE);
        assert_eq!(taller.get(1, 2).unwrap(), Color::TRANSPARENT);

        let mut wider = ColorBuffer::new(3, 2);
        assert!(matches!(
            src.copy_into(&mut wider),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(wider.pixels().iter().all(|&c| c == Color::TRANSPARENT));

        let mut shorter = ColorBuffer::new(2, 1);
        assert!(src.copy_into(&mut shorter).is_err());
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = ColorBuffer::new(1, 1);
        let mut b = ColorBuffer::new(2, 1);
        b.clear(Color::WHITE);
        a.swap(&mut b);
        assert_eq!(a.width(), 2);
        assert_eq!(a.get(1, 0).unwrap(), Color::WHITE);
        assert_eq!(b.width(), 1);
    }

    #[test]
    fn rgba_image_conversion() {
        let mut buf = ColorBuffer::new(2, 1);
        buf.set(1, 0, Color::rgba(10, 20, 30, 40)).unwrap();
        let img = buf.to_rgba_image();
        assert_eq!(img.get_pixel(1, 0), &Rgba([10, 20, 30, 40]));
        assert_eq!(ColorBuffer::from_rgba_image(&img), buf);
    }
}
