// Demo driver.
// • `sdf`  renders a signed (or unsigned) distance field of the letter "A", or
//          of any image whose alpha channel is the mask.
// • `mesh` rasterizes a small synthetic mesh with seeded per-triangle colors.
// Both write a bitmap and can show the result in a window (`--preview`).

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use softraster::distance::{self, DistanceFieldOptions, FieldDirection};
use softraster::preview::Preview;
use softraster::{bitmap, mask, mesh, Color, ColorBuffer, Error, Mesh};

#[derive(Parser)]
#[command(name = "softraster", about = "Software rasterizer and jump-flood distance fields")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Outer,
    Inner,
}

#[derive(Subcommand)]
enum Cmd {
    /// Distance field of a mask
    Sdf {
        /// Mask image (alpha > 127 is foreground); the letter "A" if omitted
        #[arg(long)]
        mask: Option<PathBuf>,
        /// Size of the generated glyph mask
        #[arg(long, default_value_t = 512)]
        size: usize,
        /// Empty border around the generated glyph
        #[arg(long, default_value_t = 128)]
        margin: usize,
        /// Gain applied to normalized distances
        #[arg(long, default_value_t = 8)]
        multiplier: u32,
        /// Write a one-sided field instead of the signed one
        #[arg(long, value_enum)]
        unsigned: Option<Direction>,
        /// Keep raw distances (seeds dark) instead of inverting them
        #[arg(long)]
        no_invert: bool,
        #[arg(short, long, default_value = "signed_distance_field.bmp")]
        output: PathBuf,
        #[arg(long)]
        preview: bool,
    },
    /// Rasterize a synthetic mesh
    Mesh {
        #[arg(long, default_value_t = 512)]
        size: usize,
        /// Seed for the per-triangle colors
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Triangles per side of the grid
        #[arg(long, default_value_t = 8)]
        grid: u32,
        #[arg(long)]
        wireframe: bool,
        #[arg(short, long, default_value = "mesh.bmp")]
        output: PathBuf,
        #[arg(long)]
        preview: bool,
    },
}

/// A `cells` x `cells` grid of quads over [-1, 1], each split in two and
/// pulled toward the centre so the triangles are not all right-angled.
fn grid_mesh(cells: u32) -> Result<Mesh, Error> {
    let cells = cells.max(1);
    let side = cells + 1;
    let mut vertices = Vec::with_capacity((side * side) as usize);
    for j in 0..side {
        for i in 0..side {
            let x = 2.0 * i as f32 / cells as f32 - 1.0;
            let y = 2.0 * j as f32 / cells as f32 - 1.0;
            let pinch = 1.0 - 0.15 * (1.0 - x * x) * (1.0 - y * y);
            vertices.push([x * pinch, y * pinch, 0.0]);
        }
    }
    let mut triangles = Vec::with_capacity((2 * cells * cells) as usize);
    for j in 0..cells {
        for i in 0..cells {
            let a = j * side + i;
            let (b, c, d) = (a + 1, a + side + 1, a + side);
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }
    Mesh::new(vertices, triangles)
}

fn finish(image: &ColorBuffer, output: &Path, preview: bool, title: &str) -> Result<(), Error> {
    bitmap::write(output, image)?;
    info!("wrote {}", output.display());
    if preview {
        Preview::new(title, image.width(), image.height())?.show(image)?;
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Cmd::Sdf {
            mask: mask_path,
            size,
            margin,
            multiplier,
            unsigned,
            no_invert,
            output,
            preview,
        } => {
            let source = match mask_path {
                Some(path) => ColorBuffer::from_rgba_image(&image::open(&path)?.to_rgba8()),
                None => mask::glyph_mask(size, margin),
            };
            let options = DistanceFieldOptions {
                multiplier,
                invert: !no_invert,
            };
            info!("distance field of a {}x{} mask", source.width(), source.height());
            let image = match unsigned {
                Some(Direction::Outer) => distance::distance_field(&source, FieldDirection::Outer, options)?,
                Some(Direction::Inner) => distance::distance_field(&source, FieldDirection::Inner, options)?,
                None => distance::signed_distance_field(&source, options)?,
            };
            finish(&image, &output, preview, "softraster: distance field")
        }
        Cmd::Mesh {
            size,
            seed,
            grid,
            wireframe,
            output,
            preview,
        } => {
            let model = grid_mesh(grid)?;
            let mut image = ColorBuffer::new(size, size);
            image.clear(Color::BLACK);
            if wireframe {
                mesh::draw_mesh_wireframe(&mut image, &model, Color::WHITE);
            } else {
                mesh::draw_mesh(&mut image, &model, &mut StdRng::seed_from_u64(seed));
            }
            finish(&image, &output, preview, "softraster: mesh")
        }
    }
}
