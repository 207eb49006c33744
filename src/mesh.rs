// Triangle meshes as produced by a loader, and drawing them into a buffer.

use log::debug;
use rand::Rng;

use crate::buffer::ColorBuffer;
use crate::draw::draw_triangle;
use crate::error::{Error, Result};
use crate::triangle::fill_triangle_flat;
use crate::types::{Color, Point};

/// Vertex positions plus index triples. Every index is checked against the
/// vertex list on construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<[f32; 3]>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        for (triangle, corners) in triangles.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(Error::InvalidIndex {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, triangles })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Screen-space corners of triangle `index` in a `width` x `height`
    /// target. Vertex x and y in `[-1, 1]` span the target; z is ignored.
    pub fn screen_triangle(&self, index: usize, width: usize, height: usize) -> [Point; 3] {
        self.triangles[index].map(|i| {
            let [x, y, _] = self.vertices[i as usize];
            Point::new(
                (0.5 * width as f32 * (x + 1.0)) as i32,
                (0.5 * height as f32 * (y + 1.0)) as i32,
            )
        })
    }
}

/// Fill every triangle with its own flat color drawn from `rng`.
/// Pass a seeded generator for reproducible output.
/// Visual: a patchwork of flat-colored triangles.
pub fn draw_mesh<R: Rng>(buf: &mut ColorBuffer, mesh: &Mesh, rng: &mut R) {
    let (w, h) = (buf.width(), buf.height());
    for index in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.screen_triangle(index, w, h);
        let color = Color::rgb(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255));
        fill_triangle_flat(buf, a, b, c, color);
    }
    debug!("drew {} triangles into {w}x{h}", mesh.triangle_count());
}

/// Outline every triangle in `color`.
pub fn draw_mesh_wireframe(buf: &mut ColorBuffer, mesh: &Mesh, color: Color) {
    let (w, h) = (buf.width(), buf.height());
    for index in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.screen_triangle(index, w, h);
        draw_triangle(buf, a, b, c, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quad() -> Mesh {
        Mesh::new(
            vec![[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0]],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_indices() {
        let err = Mesh::new(vec![[0.0; 3]; 3], vec![[0, 1, 2], [2, 3, 0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidIndex { triangle: 1, index: 3, vertex_count: 3 }
        ));
    }

    #[test]
    fn counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn screen_mapping() {
        let mesh = quad();
        assert_eq!(
            mesh.screen_triangle(0, 100, 50),
            [Point::new(0, 0), Point::new(100, 0), Point::new(100, 50)]
        );
    }

    #[test]
    fn seeded_draw_is_reproducible_and_covers_the_target() {
        let mesh = quad();
        let mut first = ColorBuffer::new(16, 16);
        let mut second = ColorBuffer::new(16, 16);
        draw_mesh(&mut first, &mesh, &mut StdRng::seed_from_u64(7));
        draw_mesh(&mut second, &mesh, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert!(first.pixels().iter().all(|c| c.a() == 255));
    }

    #[test]
    fn wireframe_draws_outline() {
        let mesh = quad();
        let mut buf = ColorBuffer::new(8, 8);
        draw_mesh_wireframe(&mut buf, &mesh, Color::WHITE);
        assert_eq!(buf.get(0, 0).unwrap(), Color::WHITE);
        assert_eq!(buf.get(3, 3).unwrap(), Color::WHITE); // diagonal
        assert_eq!(buf.get(5, 1).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn far_vertices_are_clipped_not_wrapped() {
        // Saturates to the i32 limits once mapped to the screen.
        let mesh = Mesh::new(
            vec![[-1e10, -1e10, 0.0], [1e10, -1e10, 0.0], [0.0, 1e10, 0.0]],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let mut buf = ColorBuffer::new(16, 16);
        buf.clear(Color::BLACK);
        draw_mesh(&mut buf, &mesh, &mut StdRng::seed_from_u64(7));
        assert_ne!(buf.get(8, 8).unwrap(), Color::BLACK);

        let mut outline = ColorBuffer::new(16, 16);
        draw_mesh_wireframe(&mut outline, &mesh, Color::WHITE);
    }
}
