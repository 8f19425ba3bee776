use glam::Vec4;
use log::info;
use rayon::prelude::*;

use crate::buffer::{ColorBuffer, ScalarBuffer};
use crate::config::SamplingResolution;

use super::sss_blur_pass::depth_weight;

/// Depth similarity tolerance for the upsample, relative to the center
/// pixel's depth.
const UPSAMPLE_DEPTH_REL_SIGMA: f32 = 0.05;

/// Half-res handling for the blur: 2x2 box downsample of the inputs and a
/// depth-aware bilinear upsample of the blurred result. The depth test keeps
/// the low-res blur from smearing across silhouettes on the way back up.
pub struct ResolutionPass;

impl ResolutionPass {
  pub fn new() -> Self {
    info!("Creating ResolutionPass");
    Self
  }

  pub fn half_dims((width, height): (usize, usize)) -> (usize, usize) {
    let div = SamplingResolution::HalfRes.divisor();
    ((width + div - 1) / div, (height + div - 1) / div)
  }

  /// 2x2 box filter, clamp-to-edge on odd dimensions.
  pub fn downsample_color(&self, src: &ColorBuffer, dst: &mut ColorBuffer) {
    let (dst_width, _) = dst.dims();
    dst
      .as_mut_slice()
      .par_chunks_mut(dst_width)
      .enumerate()
      .for_each(|(hy, row)| {
        for (hx, out_px) in row.iter_mut().enumerate() {
          let x = (hx * 2) as i64;
          let y = (hy * 2) as i64;
          *out_px = (src.get_clamped(x, y)
            + src.get_clamped(x + 1, y)
            + src.get_clamped(x, y + 1)
            + src.get_clamped(x + 1, y + 1))
            * 0.25;
        }
      });
  }

  pub fn downsample_scalar(&self, src: &ScalarBuffer, dst: &mut ScalarBuffer) {
    let (dst_width, _) = dst.dims();
    dst
      .as_mut_slice()
      .par_chunks_mut(dst_width)
      .enumerate()
      .for_each(|(hy, row)| {
        for (hx, out_px) in row.iter_mut().enumerate() {
          let x = (hx * 2) as i64;
          let y = (hy * 2) as i64;
          *out_px = (src.get_clamped(x, y)
            + src.get_clamped(x + 1, y)
            + src.get_clamped(x, y + 1)
            + src.get_clamped(x + 1, y + 1))
            * 0.25;
        }
      });
  }

  /// Bilinear upsample where each of the 4 low-res neighbors is additionally
  /// weighted by depth similarity to the full-res pixel. Falls back to plain
  /// bilinear when every neighbor gets rejected.
  pub fn upsample_depth_aware(
    &self,
    half: &ColorBuffer,
    half_depth: &ScalarBuffer,
    full_depth: &ScalarBuffer,
    dst: &mut ColorBuffer,
  ) {
    let (dst_width, _) = dst.dims();
    dst
      .as_mut_slice()
      .par_chunks_mut(dst_width)
      .enumerate()
      .for_each(|(y, row)| {
        for (x, out_px) in row.iter_mut().enumerate() {
          *out_px = upsample_pixel(half, half_depth, full_depth, x, y);
        }
      });
  }
}

fn upsample_pixel(
  half: &ColorBuffer,
  half_depth: &ScalarBuffer,
  full_depth: &ScalarBuffer,
  x: usize,
  y: usize,
) -> Vec4 {
  // center of half-res pixel h lies at full-res coordinate 2h + 0.5
  let hx = (x as f32 - 0.5) / 2.0;
  let hy = (y as f32 - 0.5) / 2.0;
  let x0 = hx.floor();
  let y0 = hy.floor();
  let fx = hx - x0;
  let fy = hy - y0;
  let (x0, y0) = (x0 as i64, y0 as i64);

  let center_depth = full_depth.get(x, y);
  let sigma = center_depth.abs() * UPSAMPLE_DEPTH_REL_SIGMA;

  let neighbors = [
    (x0, y0, (1.0 - fx) * (1.0 - fy)),
    (x0 + 1, y0, fx * (1.0 - fy)),
    (x0, y0 + 1, (1.0 - fx) * fy),
    (x0 + 1, y0 + 1, fx * fy),
  ];

  let mut color_sum = Vec4::ZERO;
  let mut weight_sum = 0.0;
  for &(nx, ny, bilinear_w) in neighbors.iter() {
    let delta = half_depth.get_clamped(nx, ny) - center_depth;
    let w = bilinear_w * depth_weight(delta, sigma);
    color_sum += half.get_clamped(nx, ny) * w;
    weight_sum += w;
  }

  if weight_sum > 1e-5 {
    color_sum / weight_sum
  } else {
    half.sample_bilinear(hx, hy)
  }
}
