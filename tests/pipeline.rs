// End-to-end: rasterize, derive distance fields, persist, read back.

use rand::SeedableRng;
use rand::rngs::StdRng;

use softraster::distance::{self, DistanceFieldOptions, FieldDirection};
use softraster::triangle::fill_triangle_flat;
use softraster::{bitmap, mask, mesh, Color, ColorBuffer, Mesh, Point, SeedBuffer};

fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("softraster-{}-{name}", std::process::id()))
}

#[test_log::test]
fn rasterized_triangle_becomes_a_signed_field() {
    let mut shape = ColorBuffer::new(64, 64);
    fill_triangle_flat(
        &mut shape,
        Point::new(8, 8),
        Point::new(56, 16),
        Point::new(24, 56),
        Color::WHITE,
    );

    let sdf = distance::signed_distance_field(&shape, DistanceFieldOptions::default()).unwrap();
    assert_eq!((sdf.width(), sdf.height()), (64, 64));

    // With the default inversion the shape's interior sits below the midpoint
    // and the far background above it.
    let inside = sdf.get(28, 26).unwrap().r();
    let outside = sdf.get(62, 62).unwrap().r();
    assert!(inside < 127, "inside {inside}");
    assert!(outside > 127, "outside {outside}");
}

#[test_log::test]
fn glyph_field_round_trips_through_a_file() {
    let glyph = mask::glyph_mask(64, 16);
    let sdf = distance::signed_distance_field(&glyph, DistanceFieldOptions::default()).unwrap();

    let path = scratch_path("glyph.bmp");
    bitmap::write(&path, &sdf).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(bytes.len(), 54 + 64 * 64 * 4);
    assert_eq!(bitmap::decode(&bytes).unwrap(), sdf);
}

#[test_log::test]
fn mesh_render_is_reproducible_with_a_seed() {
    let model = Mesh::new(
        vec![[-0.9, -0.9, 0.0], [0.9, -0.8, 0.0], [0.1, 0.9, 0.0], [-0.9, 0.9, 0.0]],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .unwrap();

    let render = |seed| {
        let mut image = ColorBuffer::new(48, 48);
        image.clear(Color::BLACK);
        mesh::draw_mesh(&mut image, &model, &mut StdRng::seed_from_u64(seed));
        image
    };
    assert_eq!(render(42), render(42));
    assert!(render(42).pixels().iter().any(|&c| c != Color::BLACK));
}

#[test_log::test]
fn unsigned_fields_on_an_empty_mask_are_uniform() {
    let empty = ColorBuffer::new(9, 5);
    let seeds: SeedBuffer = distance::propagate(distance::seed(&empty, FieldDirection::Outer).unwrap());
    assert!(seeds.pixels().iter().all(|s| s.is_none()));

    for invert in [false, true] {
        let options = DistanceFieldOptions { multiplier: 8, invert };
        let image = distance::materialize(&seeds, options);
        let first = image.pixels()[0];
        assert!(image.pixels().iter().all(|&c| c == first));
    }

    // Every pixel is background, so the inner field is all seeds: distance 0.
    let inner = distance::distance_field(&empty, FieldDirection::Inner, DistanceFieldOptions::default()).unwrap();
    assert!(inner.pixels().iter().all(|&c| c == Color::gray(255)));
}

#[test_log::test]
fn write_failure_is_reported_not_fatal() {
    let image = ColorBuffer::new(2, 2);
    let missing = scratch_path("no-such-dir").join("out.bmp");
    assert!(matches!(
        bitmap::write(&missing, &image),
        Err(softraster::Error::Io { .. })
    ));
}
