// Single-pixel-wide lines and wireframe triangles.
// Everything is drawn through `PixelBuffer::plot`, so primitives that leave
// the buffer are clipped instead of failing.

use crate::buffer::PixelBuffer;
use crate::types::Point;

/// Draw a line from `p0` to `p1` (both inclusive) using Bresenham.
/// Every integer point on the line is visited exactly once, in any octant;
/// `p0 == p1` draws a single pixel.
///
/// Visual: a one-pixel-wide line with stair steps on shallow slopes.
pub fn draw_line<P: Copy + Default>(buf: &mut PixelBuffer<P>, p0: Point, p1: Point, color: P) {
    let Some((p0, p1)) = clip_line(p0, p1, buf.width(), buf.height()) else {
        return;
    };
    for_each_line_point(p0, p1, |p| buf.plot(p.x, p.y, color));
}

/// Walk the points `draw_line` would visit, in order from `p0` to `p1`.
pub fn for_each_line_point(p0: Point, p1: Point, mut visit: impl FnMut(Point)) {
    let (x1, y1) = (p1.x as i64, p1.y as i64);
    let (mut x, mut y) = (p0.x as i64, p0.y as i64);
    let dx = (x1 - x).abs();
    let sx = if x1 > x { 1 } else { -1 };
    let dy = -(y1 - y).abs();
    let sy = if y1 > y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        // Stays between the endpoints, so always fits back into i32.
        visit(Point::new(x as i32, y as i32));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Shorten `p0 -> p1` to the part that can reach a `width` x `height`
/// buffer, or `None` when none of it does.
///
/// Segments that stay near the buffer are returned untouched so they keep
/// their exact Bresenham steps. Far endpoints are cut back (Liang-Barsky) to
/// a one-pixel border around the buffer.
fn clip_line(p0: Point, p1: Point, width: usize, height: usize) -> Option<(Point, Point)> {
    let (w, h) = (width.min(i32::MAX as usize) as f64, height.min(i32::MAX as usize) as f64);
    let margin = w.max(h);
    let near = |p: Point| {
        let (x, y) = (p.x as f64, p.y as f64);
        (-margin..=w + margin).contains(&x) && (-margin..=h + margin).contains(&y)
    };
    if near(p0) && near(p1) {
        return Some((p0, p1));
    }

    let (x0, y0) = (p0.x as f64, p0.y as f64);
    let (dx, dy) = (p1.x as f64 - x0, p1.y as f64 - y0);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let bounds = [
        (-dx, x0 + 1.0),
        (dx, w - x0),
        (-dy, y0 + 1.0),
        (dy, h - y0),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

/// Outline a triangle with three lines.
/// Visual: a hollow triangle; corners are shared, so each is drawn twice.
pub fn draw_triangle<P: Copy + Default>(
    buf: &mut PixelBuffer<P>,
    p0: Point,
    p1: Point,
    p2: Point,
    color: P,
) {
    draw_line(buf, p0, p1, color);
    draw_line(buf, p1, p2, color);
    draw_line(buf, p2, p0, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorBuffer;
    use crate::types::Color;

    fn points(p0: Point, p1: Point) -> Vec<Point> {
        let mut out = Vec::new();
        for_each_line_point(p0, p1, |p| out.push(p));
        out
    }

    #[test]
    fn endpoints_and_connectivity_in_every_octant() {
        let c = Point::new(0, 0);
        let ends = [
            (7, 3), (3, 7), (-3, 7), (-7, 3),
            (-7, -3), (-3, -7), (3, -7), (7, -3),
            (5, 0), (0, 5), (-5, 0), (0, -5), (4, 4), (-4, 4),
        ];
        for (x, y) in ends {
            let end = Point::new(x, y);
            let pts = points(c, end);
            assert_eq!(pts.first(), Some(&c));
            assert_eq!(pts.last(), Some(&end));
            for w in pts.windows(2) {
                assert!((w[0].x - w[1].x).abs() <= 1 && (w[0].y - w[1].y).abs() <= 1);
                assert_ne!(w[0], w[1]);
            }
            // One point per step along the major axis
            assert_eq!(pts.len() as i32, x.abs().max(y.abs()) + 1);
        }
    }

    #[test]
    fn degenerate_line_is_one_pixel() {
        assert_eq!(points(Point::new(2, 3), Point::new(2, 3)), vec![Point::new(2, 3)]);

        let mut buf = ColorBuffer::new(4, 4);
        draw_line(&mut buf, Point::new(1, 1), Point::new(1, 1), Color::WHITE);
        assert_eq!(buf.pixels().iter().filter(|&&c| c == Color::WHITE).count(), 1);
    }

    #[test]
    fn clipped_line_does_not_panic() {
        let mut buf = ColorBuffer::new(4, 4);
        draw_line(&mut buf, Point::new(-10, -10), Point::new(10, 10), Color::WHITE);
        for i in 0..4 {
            assert_eq!(buf.get(i, i).unwrap(), Color::WHITE);
        }
    }

    #[test]
    fn extreme_endpoints_are_clipped_without_overflow() {
        let mut buf = ColorBuffer::new(4, 4);
        draw_line(&mut buf, Point::new(i32::MIN, 0), Point::new(i32::MAX, 0), Color::WHITE);
        for x in 0..4 {
            assert_eq!(buf.get(x, 0).unwrap(), Color::WHITE);
        }
        assert!((0..4).all(|x| (1..4).all(|y| buf.get(x, y).unwrap() == Color::TRANSPARENT)));

        let mut diag = ColorBuffer::new(4, 4);
        draw_line(&mut diag, Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX), Color::WHITE);
        for i in 0..4 {
            assert_eq!(diag.get(i, i).unwrap(), Color::WHITE);
        }

        // Entirely beside the buffer.
        let mut none = ColorBuffer::new(4, 4);
        draw_line(&mut none, Point::new(i32::MIN, -5), Point::new(i32::MAX, -5), Color::WHITE);
        assert!(none.pixels().iter().all(|&c| c == Color::TRANSPARENT));
    }

    #[test]
    fn long_walks_do_not_overflow() {
        let mut n = 0u64;
        for_each_line_point(Point::new(i32::MAX - 2, i32::MIN), Point::new(i32::MAX, i32::MIN + 1), |_| n += 1);
        assert_eq!(n, 3);
    }

    #[test]
    fn wireframe_touches_all_vertices() {
        let mut buf = ColorBuffer::new(8, 8);
        let (a, b, c) = (Point::new(1, 1), Point::new(6, 2), Point::new(3, 6));
        draw_triangle(&mut buf, a, b, c, Color::WHITE);
        for p in [a, b, c] {
            assert_eq!(buf.get(p.x as usize, p.y as usize).unwrap(), Color::WHITE);
        }
    }
}
