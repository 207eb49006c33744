// Distance fields from a binary mask via jump flooding.
//
// Pipeline: seed -> propagate (ceil(log2 N) passes over two ping-ponged
// seed buffers) -> materialize (grayscale distance image). The signed field
// combines an outer and an inner run.

use log::debug;

use crate::buffer::{ColorBuffer, SeedBuffer};
use crate::error::{Error, Result};
use crate::types::{Color, Seed};

/// Alpha above this is foreground.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Which side of the mask boundary the seeds sit on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDirection {
    /// Seeds at foreground pixels; distances grow away from the shape.
    Outer,
    /// Seeds at background pixels; distances grow into the shape.
    Inner,
}

impl FieldDirection {
    #[inline]
    pub fn is_seed(self, mask_pixel: Color) -> bool {
        let foreground = mask_pixel.a() > ALPHA_THRESHOLD;
        match self {
            FieldDirection::Outer => foreground,
            FieldDirection::Inner => !foreground,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistanceFieldOptions {
    /// Gain applied to the normalized distance before clamping to 255.
    pub multiplier: u32,
    /// Write `255 - value`, so the seeds themselves are brightest.
    pub invert: bool,
}

impl Default for DistanceFieldOptions {
    fn default() -> Self {
        Self {
            multiplier: 8,
            invert: true,
        }
    }
}

/// `ceil(log2(n))`, with 0 for `n <= 1`.
pub fn pass_count(width: usize, height: usize) -> u32 {
    let n = width.max(height);
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// Build the initial seed buffer: every mask pixel matching `direction`
/// holds its own coordinate, the rest hold `Seed::NONE`.
pub fn seed(mask: &ColorBuffer, direction: FieldDirection) -> Result<SeedBuffer> {
    let (width, height) = (mask.width(), mask.height());
    // 0xFFFF is reserved for Seed::NONE
    if width > u16::MAX as usize || height > u16::MAX as usize {
        return Err(Error::TooLarge { width, height });
    }

    let mut seeds = SeedBuffer::new(width, height);
    let mut count = 0usize;
    for (cell, (x, y, pixel)) in seeds.pixels_mut().iter_mut().zip(mask.enumerate()) {
        if direction.is_seed(pixel) {
            *cell = Seed::at(x as u16, y as u16);
            count += 1;
        }
    }
    debug!("seeded {count} of {} pixels ({direction:?})", mask.len());
    Ok(seeds)
}

/// The two seed buffers the passes alternate between.
/// `read` holds the previous pass; `write` receives the current one.
struct PingPong {
    read: SeedBuffer,
    write: SeedBuffer,
}

impl PingPong {
    fn new(initial: SeedBuffer) -> Self {
        let write = SeedBuffer::new(initial.width(), initial.height());
        Self {
            read: initial,
            write,
        }
    }

    /// Exchange read/write roles. No cells are copied.
    fn swap(&mut self) {
        self.read.swap(&mut self.write);
    }

    fn into_result(self) -> SeedBuffer {
        self.read
    }
}

/// One jump flood pass: every cell of `dst` receives the nearest seed among
/// the 9 cells of `src` at `offset` steps around it (clamped to the edges).
/// Ties keep the first candidate in row-major offset order.
fn flood_pass(src: &SeedBuffer, dst: &mut SeedBuffer, offset: i64) {
    let (width, height) = (src.width(), src.height());
    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;
    let cells = src.pixels();
    let out = dst.pixels_mut();

    for y in 0..height {
        for x in 0..width {
            let mut best = Seed::NONE;
            let mut best_distance = u64::MAX;

            for dy in [-offset, 0, offset] {
                let read_y = (y as i64 + dy).clamp(0, max_y) as usize;
                for dx in [-offset, 0, offset] {
                    let read_x = (x as i64 + dx).clamp(0, max_x) as usize;
                    let candidate = cells[read_y * width + read_x];
                    if let Some(d) = candidate.distance_sq(x, y) {
                        if d < best_distance {
                            best_distance = d;
                            best = candidate;
                        }
                    }
                }
            }
            out[y * width + x] = best;
        }
    }
}

/// Run every jump flood pass and return the resolved seed buffer.
/// Visual: nothing yet; this only moves seed coordinates around.
/// Cells no seed can reach (an empty mask) stay `Seed::NONE`.
pub fn propagate(seeds: SeedBuffer) -> SeedBuffer {
    let passes = pass_count(seeds.width(), seeds.height());
    let mut slots = PingPong::new(seeds);

    for pass in 0..passes {
        let offset = 1i64 << (passes - 1 - pass);
        debug!("jump flood pass {}/{passes}, offset {offset}", pass + 1);
        flood_pass(&slots.read, &mut slots.write, offset);
        slots.swap();
    }
    slots.into_result()
}

/// Turn resolved seeds into a grayscale distance image.
/// Distance is normalized by `max(width, height)`; cells without a seed count
/// as infinitely far (255 before inversion).
///
/// Visual: gray ramps around every seed. With `invert` the seeds are white
/// and fade to black with distance; without it they are black.
pub fn materialize(seeds: &SeedBuffer, options: DistanceFieldOptions) -> ColorBuffer {
    let n = seeds.width().max(seeds.height()) as f32;
    let mut out = ColorBuffer::new(seeds.width(), seeds.height());

    for (cell, (x, y, seed)) in out.pixels_mut().iter_mut().zip(seeds.enumerate()) {
        let value = match seed.distance_sq(x, y) {
            Some(d) => {
                let normalized = (255.0 * ((d as f32).sqrt() / n)) as u32;
                options.multiplier.saturating_mul(normalized).min(255) as u8
            }
            None => 255,
        };
        let value = if options.invert { 255 - value } else { value };
        *cell = Color::gray(value);
    }
    out
}

/// Unsigned distance field of `mask`.
/// Visual: a soft glow spreading out from the shape (or into it, for `Inner`).
pub fn distance_field(
    mask: &ColorBuffer,
    direction: FieldDirection,
    options: DistanceFieldOptions,
) -> Result<ColorBuffer> {
    let seeds = propagate(seed(mask, direction)?);
    Ok(materialize(&seeds, options))
}

/// Signed distance field of `mask`: the boundary sits near 127, with values
/// moving toward 0 on one side and 255 on the other.
///
/// Visual: mid-gray outline of the shape, one side darkening and the other
/// brightening with distance from it.
pub fn signed_distance_field(mask: &ColorBuffer, options: DistanceFieldOptions) -> Result<ColorBuffer> {
    let mut outer = distance_field(mask, FieldDirection::Outer, options)?;
    let inner = distance_field(mask, FieldDirection::Inner, options)?;

    for (o, i) in outer.pixels_mut().iter_mut().zip(inner.pixels()) {
        let combined = (255 - o.r()) / 2 + i.r() / 2;
        *o = Color::gray(combined);
    }
    Ok(outer)
}
