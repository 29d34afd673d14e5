//! Row loop and image assembly.

use image::{GrayImage, Rgb, RgbImage};
use log::debug;
use ndarray::{Array2, ArrayViewMut2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::geometry::{Geometry, ParamError, RenderParams};
use crate::links::LinkTable;
use crate::pattern::fill_row;

/// Renders a random-dot autostereogram from an 8-bit grayscale depth map.
///
/// Brighter depth samples read as nearer to the observer. The dot pattern is
/// fully determined by the depth map, the parameters and `seed`; rendering the
/// same inputs twice produces byte-identical images.
pub fn render_rds(
    depth: &GrayImage,
    params: &RenderParams,
    seed: u64,
) -> Result<RgbImage, ParamError> {
    let geometry = Geometry::new(params)?;
    let width = depth.width() as usize;
    let height = depth.height() as usize;
    if width == 0 || height == 0 {
        return Ok(RgbImage::new(depth.width(), depth.height()));
    }

    let stripes = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
        .min(height);
    let pattern = render_pattern(depth.as_raw(), width, height, &geometry, seed, stripes);

    let mut out = RgbImage::new(depth.width(), depth.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let v = pattern[(y as usize, x as usize)];
        *pixel = Rgb([v, v, v]);
    }
    Ok(out)
}

/// Renders the binary luminance pattern, one scoped thread per row stripe.
///
/// Rows carry no state between them, so the grid is split into disjoint
/// stripes and joined before assembly. Each row seeds its own generator from
/// `seed` and its index, which keeps the output independent of the stripe
/// partition.
fn render_pattern(
    samples: &[u8],
    width: usize,
    height: usize,
    geometry: &Geometry,
    seed: u64,
    stripes: usize,
) -> Array2<u8> {
    let mut pattern = Array2::<u8>::zeros((height, width));
    if stripes <= 1 {
        render_stripe(samples, width, geometry, seed, 0, pattern.view_mut());
        return pattern;
    }

    let rows_per_stripe = (height + stripes - 1) / stripes;
    debug!(
        "rendering {}x{} pattern in stripes of {} rows",
        width, height, rows_per_stripe
    );
    std::thread::scope(|s| {
        for (i, chunk) in pattern
            .axis_chunks_iter_mut(Axis(0), rows_per_stripe)
            .enumerate()
        {
            let first_row = i * rows_per_stripe;
            s.spawn(move || render_stripe(samples, width, geometry, seed, first_row, chunk));
        }
    });
    pattern
}

fn render_stripe(
    samples: &[u8],
    width: usize,
    geometry: &Geometry,
    seed: u64,
    first_row: usize,
    mut rows: ArrayViewMut2<u8>,
) {
    // One link table per stripe, reset at the start of every row.
    let mut links = LinkTable::new(width);
    for (i, mut row) in rows.outer_iter_mut().enumerate() {
        let y = first_row + i;
        links.build_row(&samples[y * width..(y + 1) * width], geometry);
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(y as u64));
        let out = row
            .as_slice_mut()
            .expect("pattern rows are contiguous");
        fill_row(&links, &mut rng, out);
    }
}
