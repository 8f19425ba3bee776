use crate::utils::fract_f32;

/// Interleaved gradient noise, Jimenez 2014 ("Next Generation Post
/// Processing in Call of Duty: Advanced Warfare"). Stable per pixel, so the
/// dither pattern does not crawl between frames.
pub fn interleaved_gradient_noise(x: f32, y: f32) -> f32 {
  fract_f32(52.9829189 * fract_f32(0.06711056 * x + 0.00583715 * y))
}

/// Golden-ratio pixel shift applied to the noise domain when temporal
/// jitter is on. 8-frame cycle, matches the usual TAA history length.
const TEMPORAL_SHIFT_PX: f32 = 5.588238;
const TEMPORAL_CYCLE: u32 = 8;

/// Per-pixel, per-tap jitter value in `[-1, 1]`.
/// With `temporal` the pattern is re-seeded each frame (expects temporal
/// accumulation downstream), otherwise it is a pure function of the pixel
/// coordinate and the tap index.
pub fn tap_jitter(x: usize, y: usize, tap_idx: usize, frame_idx: u32, temporal: bool) -> f32 {
  let temporal_offset = if temporal {
    (frame_idx % TEMPORAL_CYCLE) as f32 * TEMPORAL_SHIFT_PX
  } else {
    0.0
  };
  // decorrelate taps by shifting the noise domain per tap
  let nx = x as f32 + temporal_offset + (tap_idx as f32) * 17.0;
  let ny = y as f32 + temporal_offset + (tap_idx as f32) * 59.0;
  interleaved_gradient_noise(nx, ny) * 2.0 - 1.0
}
