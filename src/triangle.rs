// Solid triangle fill: horizontal spans with per-pixel barycentric shading.
//
// Fill rule, shared by the span walk and the edge interpolation:
// scanline `y` samples at `y + 0.5`, and a pixel is covered when its centre
// `x + 0.5` lies in `[left, right)`. Neighbouring triangles that share an
// edge evaluate the same edge equation at the same sample, so each pixel on
// the edge goes to exactly one of them.
//
// A triangle with positive area that contains no pixel centre on the buffer
// still draws one pixel: the one holding its centroid. Only such sub-pixel
// triangles can touch a pixel a neighbour also draws.
//
// Corner arithmetic is widened before subtracting, so any `i32` corners are
// accepted.

use log::trace;

use crate::buffer::PixelBuffer;
use crate::types::{Color, Point};

/// Weights of a point relative to triangle `(a, b, c)`; `u + v + w == 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl Barycentric {
    /// Equal weights: the centroid.
    pub const CENTROID: Self = Self {
        u: 1.0 / 3.0,
        v: 1.0 / 3.0,
        w: 1.0 / 3.0,
    };

    /// Solve `p - a = v (b - a) + w (c - a)` for `(v, w)`.
    /// Returns `None` for a collinear triangle.
    pub fn of(a: [f32; 2], b: [f32; 2], c: [f32; 2], p: [f32; 2]) -> Option<Self> {
        let widen = |q: [f32; 2]| [q[0] as f64, q[1] as f64];
        let frame = Frame::new(widen(a), widen(b), widen(c));

        // f32 inputs make every product exact in f64; only the final
        // subtraction rounds, so anything within that error is zero.
        let terms = [frame.ab[0] * frame.ac[1], frame.ab[1] * frame.ac[0]];
        let roundoff = f64::EPSILON * terms[0].abs().max(terms[1].abs());
        if frame.area.abs() <= roundoff {
            return None;
        }
        Some(frame.at(widen(p)))
    }

    /// The weights as an opaque color, `(255u, 255v, 255w)`.
    pub fn to_color(self) -> Color {
        let channel = |t: f32| (255.0 * t).clamp(0.0, 255.0) as u8;
        Color::rgb(channel(self.u), channel(self.v), channel(self.w))
    }

    /// Interpolate per-vertex colors channel by channel.
    pub fn mix(self, colors: [Color; 3]) -> Color {
        let lerp = |f: fn(Color) -> u8| {
            let t = self.u * f(colors[0]) as f32
                + self.v * f(colors[1]) as f32
                + self.w * f(colors[2]) as f32;
            t.round().clamp(0.0, 255.0) as u8
        };
        Color::rgba(lerp(Color::r), lerp(Color::g), lerp(Color::b), lerp(Color::a))
    }
}

fn cross(l: [f64; 2], r: [f64; 2]) -> f64 {
    l[0] * r[1] - l[1] * r[0]
}

/// Triangle edges relative to `a`, set up once per triangle.
/// `area` is twice the signed area and must be non-zero before [`Frame::at`].
struct Frame {
    a: [f64; 2],
    ab: [f64; 2],
    ac: [f64; 2],
    area: f64,
}

impl Frame {
    fn new(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Self {
        let ab = [b[0] - a[0], b[1] - a[1]];
        let ac = [c[0] - a[0], c[1] - a[1]];
        Self { a, ab, ac, area: cross(ab, ac) }
    }

    fn at(&self, p: [f64; 2]) -> Barycentric {
        let ap = [p[0] - self.a[0], p[1] - self.a[1]];
        let v = cross(ap, self.ac) / self.area;
        let w = cross(self.ab, ap) / self.area;
        Barycentric {
            u: (1.0 - v - w) as f32,
            v: v as f32,
            w: w as f32,
        }
    }
}

/// One edge of the triangle, solved for x at any y.
#[derive(Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    step: f64, // dx / dy
}

impl Edge {
    fn new(from: Point, to: Point) -> Self {
        let dy = to.y as i64 - from.y as i64;
        let dx = to.x as i64 - from.x as i64;
        let step = if dy == 0 { 0.0 } else { dx as f64 / dy as f64 };
        Self {
            x0: from.x as f64,
            y0: from.y as f64,
            step,
        }
    }

    #[inline]
    fn x_at(&self, y: f64) -> f64 {
        self.x0 + self.step * (y - self.y0)
    }
}

/// First pixel index whose centre is at or right of `x`.
#[inline]
fn first_covered(x: f64) -> i64 {
    // `as` saturates, so far-off edges clamp instead of wrapping.
    (x - 0.5).ceil() as i64
}

/// Twice the signed area of `(a, b, c)`, exact for any corners.
fn doubled_area(a: Point, b: Point, c: Point) -> i128 {
    let d = |p: Point| (p.x as i128 - a.x as i128, p.y as i128 - a.y as i128);
    let (ab, ac) = (d(b), d(c));
    ab.0 * ac.1 - ab.1 * ac.0
}

/// Fill triangle `(p0, p1, p2)`, asking `shade` for the color of every
/// covered pixel. Pixels off the buffer are skipped; a triangle with zero
/// area draws nothing.
///
/// Visual: a solid triangle; its bottom and right edges stop one pixel short
/// so a neighbouring triangle can take them.
pub fn fill_triangle<P, F>(buf: &mut PixelBuffer<P>, p0: Point, p1: Point, p2: Point, mut shade: F)
where
    P: Copy + Default,
    F: FnMut(Barycentric) -> P,
{
    if doubled_area(p0, p1, p2) == 0 {
        trace!("skipping zero-area triangle: {p0:?} {p1:?} {p2:?}");
        return;
    }
    let frame = Frame::new(
        [p0.x as f64, p0.y as f64],
        [p1.x as f64, p1.y as f64],
        [p2.x as f64, p2.y as f64],
    );

    let (mut top, mut mid, mut bottom) = (p0, p1, p2);
    if mid.y < top.y {
        std::mem::swap(&mut top, &mut mid);
    }
    if bottom.y < top.y {
        std::mem::swap(&mut top, &mut bottom);
    }
    if bottom.y < mid.y {
        std::mem::swap(&mut mid, &mut bottom);
    }

    // Is `mid` right of the long edge? Then the long edge bounds the left of
    // every span and the short edges the right, for the whole sweep.
    let long_is_left = doubled_area(top, bottom, mid) < 0;
    let long_slot = usize::from(!long_is_left);

    let width = buf.width().min(i32::MAX as usize) as i64;
    let height = buf.height().min(i32::MAX as usize) as i64;

    let mut edges = [Edge::new(top, bottom); 2];
    let halves = [
        (Edge::new(top, mid), top.y, mid.y),
        (Edge::new(mid, bottom), mid.y, bottom.y),
    ];
    let mut drawn = false;
    for (short, y_from, y_to) in halves {
        edges[1 - long_slot] = short;
        for y in (y_from as i64).max(0)..(y_to as i64).min(height) {
            let sample_y = y as f64 + 0.5;
            let [left, right] = edges.map(|e| e.x_at(sample_y));
            let x_start = first_covered(left).max(0);
            let x_end = first_covered(right).min(width);
            for x in x_start..x_end {
                let bc = frame.at([x as f64 + 0.5, sample_y]);
                buf.plot(x as i32, y as i32, shade(bc));
                drawn = true;
            }
        }
    }

    if !drawn {
        let centroid = |a: i32, b: i32, c: i32| (a as i64 + b as i64 + c as i64).div_euclid(3);
        let (x, y) = (centroid(p0.x, p1.x, p2.x), centroid(p0.y, p1.y, p2.y));
        trace!("no pixel centre covered by {p0:?} {p1:?} {p2:?}, drawing centroid ({x}, {y})");
        // Within the bounding box, so it fits in i32.
        buf.plot(x as i32, y as i32, shade(Barycentric::CENTROID));
    }
}

/// Fill with a single color.
pub fn fill_triangle_flat<P: Copy + Default>(
    buf: &mut PixelBuffer<P>,
    p0: Point,
    p1: Point,
    p2: Point,
    color: P,
) {
    fill_triangle(buf, p0, p1, p2, |_| color);
}

/// Fill with the barycentric weights shown as red, green and blue.
/// Visual: red, green and blue corners blending smoothly through the middle.
pub fn fill_triangle_barycentric(buf: &mut PixelBuffer<Color>, p0: Point, p1: Point, p2: Point) {
    fill_triangle(buf, p0, p1, p2, Barycentric::to_color);
}
