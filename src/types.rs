// Core cell and coordinate types shared by every stage.

use std::fmt;

/// A packed 32-bit color, `0xAARRGGBB`.
/// In memory (little-endian) the bytes are B, G, R, A, which is the layout a
/// 32 bpp bitmap expects.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::rgba(r, g, b, 255)
    }

    /// Opaque gray with all three channels set to `v`.
    /// Visual: 0 is black, 255 is white.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Color::rgb(v, v, v)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn argb(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08x})", self.0)
    }
}

/// Integer screen coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Cell of a seed buffer: the coordinate of the nearest known seed pixel,
/// packed as two 16-bit fields, or [`Seed::NONE`].
///
/// `NONE` is `(0xFFFF, 0xFFFF)`, which no buffer accepted by the distance
/// field engine can address, so `(0, 0)` stays a valid seed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Seed(u32);

impl Seed {
    pub const NONE: Seed = Seed(u32::MAX);

    #[inline]
    pub const fn at(x: u16, y: u16) -> Self {
        Seed(((y as u32) << 16) | x as u32)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Seed::NONE.0
    }

    #[inline]
    pub fn coords(self) -> Option<(u16, u16)> {
        if self.is_none() {
            None
        } else {
            Some((self.0 as u16, (self.0 >> 16) as u16))
        }
    }

    /// Squared Euclidean distance from this seed to `(x, y)`, or `None` for
    /// an empty cell.
    #[inline]
    pub fn distance_sq(self, x: usize, y: usize) -> Option<u64> {
        self.coords().map(|(sx, sy)| {
            let dx = sx as i64 - x as i64;
            let dy = sy as i64 - y as i64;
            (dx * dx + dy * dy) as u64
        })
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed::NONE
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coords() {
            Some((x, y)) => write!(f, "Seed({x}, {y})"),
            None => f.write_str("Seed::NONE"),
        }
    }
}
