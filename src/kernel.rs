use glam::{vec3, Vec3};
use lazy_static::lazy_static;

use crate::config::SampleQuality;

/// Sum-of-Gaussians fit of the skin diffusion profile from d'Eon & Luebke
/// (GPU Gems 3, ch. 14). Variance in mm^2, weight per RGB channel.
/// The original shader is gone, so this is the standard profile instead of
/// a bit-exact reproduction.
const SKIN_GAUSSIANS: [(f32, [f32; 3]); 6] = [
  (0.0064, [0.233, 0.455, 0.649]),
  (0.0484, [0.100, 0.336, 0.344]),
  (0.1870, [0.118, 0.198, 0.000]),
  (0.5670, [0.113, 0.007, 0.007]),
  (1.9900, [0.358, 0.004, 0.000]),
  (7.4100, [0.078, 0.000, 0.000]),
];

/// Kernel footprint in millimeters, ~3 sigma of the widest Gaussian.
pub const KERNEL_RADIUS_MM: f32 = 8.0;

/// Vertical fov used to estimate on-screen size of a millimeter at a given
/// depth. The host pipeline renders with a fixed-fov camera.
const DEPTH_PROJECTION_FOV_Y_DGR: f32 = 45.0;

/// One tap of the 1-D separable kernel. Offset in millimeters along the blur
/// axis, weight per RGB channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelTap {
  pub offset_mm: f32,
  pub weight: Vec3,
}

/// Radial falloff of the diffusion profile, unnormalized.
pub fn diffusion_profile(r_mm: f32) -> Vec3 {
  let r2 = r_mm * r_mm;
  SKIN_GAUSSIANS.iter().fold(Vec3::ZERO, |acc, &(variance, w)| {
    let gauss = (-r2 / (2.0 * variance)).exp();
    acc + vec3(w[0], w[1], w[2]) * gauss
  })
}

/// Tap offsets and per-channel weights for one blur direction.
/// `2 * quality - 1` taps, symmetric about the center, denser near the
/// origin (quadratic spacing), normalized so each channel sums to 1.
pub fn build_kernel(quality: SampleQuality) -> Vec<KernelTap> {
  let tap_count = quality.tap_count();
  debug_assert!(tap_count % 2 == 1);

  let offsets: Vec<f32> = (0..tap_count)
    .map(|i| {
      let t = -1.0 + 2.0 * (i as f32) / (tap_count as f32 - 1.0);
      KERNEL_RADIUS_MM * t * t.abs()
    })
    .collect();

  // trapezoid rule: weight = profile(r) * covered segment width
  let mut taps: Vec<KernelTap> = offsets
    .iter()
    .enumerate()
    .map(|(i, &offset_mm)| {
      let left = if i > 0 { offsets[i - 1] } else { offset_mm };
      let right = if i + 1 < tap_count { offsets[i + 1] } else { offset_mm };
      let segment = (right - left) / 2.0;
      KernelTap {
        offset_mm,
        weight: diffusion_profile(offset_mm) * segment,
      }
    })
    .collect();

  let total: Vec3 = taps.iter().fold(Vec3::ZERO, |acc, tap| acc + tap.weight);
  taps.iter_mut().for_each(|tap| tap.weight /= total);
  taps
}

lazy_static! {
  static ref KERNEL_LOW: Vec<KernelTap> = build_kernel(SampleQuality::Low);
  static ref KERNEL_MEDIUM: Vec<KernelTap> = build_kernel(SampleQuality::Medium);
  static ref KERNEL_HIGH: Vec<KernelTap> = build_kernel(SampleQuality::High);
}

/// Precomputed kernel for a quality level. Cheap to call every frame.
pub fn diffusion_kernel(quality: SampleQuality) -> &'static [KernelTap] {
  match quality {
    SampleQuality::Low => &KERNEL_LOW,
    SampleQuality::Medium => &KERNEL_MEDIUM,
    SampleQuality::High => &KERNEL_HIGH,
  }
}

/// Perspective-correct footprint: how many pixels one millimeter covers at
/// `depth` (scene units). `offset_px = offset_mm / world_unit * projection`.
pub fn pixels_per_mm(world_unit: f32, depth: f32, viewport_height_px: f32) -> f32 {
  let projection_scale =
    viewport_height_px / (2.0 * (DEPTH_PROJECTION_FOV_Y_DGR.to_radians() / 2.0).tan());
  projection_scale / depth.max(f32::MIN_POSITIVE) / world_unit
}
