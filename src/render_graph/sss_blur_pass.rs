use glam::{vec2, Vec2, Vec3, Vec4};
use log::info;
use rayon::prelude::*;

use crate::buffer::{ColorBuffer, ScalarBuffer};
use crate::config::ScatteringProfile;
use crate::jitter::tap_jitter;
use crate::kernel::{diffusion_kernel, pixels_per_mm, KernelTap, KERNEL_RADIUS_MM};

/// Bilateral rejection falloff, in multiples of the kernel's world-space
/// radius. Taps further away in depth than ~1 kernel radius contribute
/// almost nothing.
const DEPTH_REJECT_SIGMA_SCALE: f32 = 1.0;

/// Blur SSS, so a blur, but with a special per-channel diffusion profile.
/// Depth-aware: rejects contribution from samples that are too far in world
/// space from the center pixel, so light never bleeds across silhouettes.
/// Implemented as 2 passes - 1st horizontal and 2nd vertical, each a
/// data-parallel loop over pixel rows.
pub struct SssBlurPass;

impl SssBlurPass {
  pub const BLUR_DIRECTION_PASS0: Vec2 = vec2(1.0, 0.0);
  pub const BLUR_DIRECTION_PASS1: Vec2 = vec2(0.0, 1.0);

  pub fn new() -> Self {
    info!("Creating SssBlurPass");
    Self
  }

  /// ### Params:
  /// * `color_source` - read only
  /// * `tmp_ping_pong` - 1st write, 2nd read
  /// * `result` - 2nd write
  /// * `linear_depth`, `sss_color` - read only, same resolution as `color_source`
  ///
  /// The vertical pass starts only after the horizontal pass has finished
  /// writing the whole ping-pong buffer - the rayon dispatches run
  /// back-to-back, which is the required barrier.
  pub fn execute(
    &self,
    profile: &ScatteringProfile,
    frame_idx: u32,
    color_source: &ColorBuffer,
    tmp_ping_pong: &mut ColorBuffer,
    result: &mut ColorBuffer,
    linear_depth: &ScalarBuffer,
    sss_color: &ColorBuffer,
  ) {
    self.execute_blur_single_direction(
      profile,
      frame_idx,
      Self::BLUR_DIRECTION_PASS0,
      color_source,  // read
      linear_depth,  // read
      sss_color,     // read
      tmp_ping_pong, // write
    );

    self.execute_blur_single_direction(
      profile,
      frame_idx,
      Self::BLUR_DIRECTION_PASS1,
      tmp_ping_pong, // read
      linear_depth,  // read
      sss_color,     // read
      result,        // write
    );
  }

  fn execute_blur_single_direction(
    &self,
    profile: &ScatteringProfile,
    frame_idx: u32,
    blur_direction: Vec2,
    color_source: &ColorBuffer,
    linear_depth: &ScalarBuffer,
    sss_color: &ColorBuffer,
    result: &mut ColorBuffer,
  ) {
    let (width, _) = result.dims();
    let viewport_height_px = color_source.height() as f32;
    let kernel = diffusion_kernel(profile.sample_quality);

    result
      .as_mut_slice()
      .par_chunks_mut(width)
      .enumerate()
      .for_each(|(y, row)| {
        for (x, out_px) in row.iter_mut().enumerate() {
          *out_px = blur_pixel(
            profile,
            frame_idx,
            blur_direction,
            kernel,
            viewport_height_px,
            color_source,
            linear_depth,
            sss_color,
            x,
            y,
          );
        }
      });
  }
}

fn blur_pixel(
  profile: &ScatteringProfile,
  frame_idx: u32,
  blur_direction: Vec2,
  kernel: &[KernelTap],
  viewport_height_px: f32,
  color_source: &ColorBuffer,
  linear_depth: &ScalarBuffer,
  sss_color: &ColorBuffer,
  x: usize,
  y: usize,
) -> Vec4 {
  let original = color_source.get(x, y);
  let mask = sss_color.get(x, y).truncate();
  if mask.max_element() <= 0.0 {
    // not skin, skip the whole kernel
    return original;
  }

  let center_depth = linear_depth.get(x, y);
  let px_per_mm = pixels_per_mm(profile.world_unit, center_depth, viewport_height_px);
  let depth_sigma = KERNEL_RADIUS_MM / profile.world_unit * DEPTH_REJECT_SIGMA_SCALE;

  let mut color_sum = Vec3::ZERO;
  let mut weight_sum = Vec3::ZERO;

  for (tap_idx, tap) in kernel.iter().enumerate() {
    let mut offset_px = tap.offset_mm * px_per_mm;
    if profile.jitter_radius > 0.0 {
      let jitter = tap_jitter(x, y, tap_idx, frame_idx, profile.temporal_jitter);
      offset_px += jitter * profile.jitter_radius * KERNEL_RADIUS_MM * px_per_mm;
    }

    let sample_x = x as f32 + blur_direction.x * offset_px;
    let sample_y = y as f32 + blur_direction.y * offset_px;
    let sample = color_source.sample_bilinear(sample_x, sample_y);
    let sample_depth = linear_depth.sample_bilinear(sample_x, sample_y);

    let weight = tap.weight * depth_weight(sample_depth - center_depth, depth_sigma);
    color_sum += sample.truncate() * weight;
    weight_sum += weight;
  }

  let blurred = color_sum / weight_sum.max(Vec3::splat(f32::MIN_POSITIVE));
  // mask modulates effect strength per channel
  let original_rgb = original.truncate();
  let out = original_rgb + (blurred - original_rgb) * mask;
  Vec4::new(out.x, out.y, out.z, original.w)
}

/// Bilateral depth weight. 1 at zero depth difference, monotonically
/// decreasing with |delta|, never negative.
pub fn depth_weight(delta_depth: f32, sigma: f32) -> f32 {
  let t = delta_depth / sigma.max(f32::MIN_POSITIVE);
  (-0.5 * t * t).exp()
}
