use glam::Vec4;

use crate::utils::lerp_f32;

/// RGBA float image, the CPU stand-in for a render target texture.
/// Row-major, no padding.
#[derive(Clone, Debug)]
pub struct ColorBuffer {
  width: usize,
  height: usize,
  data: Vec<Vec4>,
}

impl ColorBuffer {
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      width,
      height,
      data: vec![Vec4::ZERO; width * height],
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn dims(&self) -> (usize, usize) {
    (self.width, self.height)
  }

  pub fn get(&self, x: usize, y: usize) -> Vec4 {
    self.data[y * self.width + x]
  }

  pub fn set(&mut self, x: usize, y: usize, value: Vec4) {
    self.data[y * self.width + x] = value;
  }

  /// Nearest sample with clamp-to-edge addressing.
  pub fn get_clamped(&self, x: i64, y: i64) -> Vec4 {
    let cx = x.clamp(0, self.width as i64 - 1) as usize;
    let cy = y.clamp(0, self.height as i64 - 1) as usize;
    self.get(cx, cy)
  }

  /// Bilinear sample at a fractional pixel position, clamp-to-edge.
  pub fn sample_bilinear(&self, x: f32, y: f32) -> Vec4 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = self.get_clamped(x0, y0);
    let p10 = self.get_clamped(x0 + 1, y0);
    let p01 = self.get_clamped(x0, y0 + 1);
    let p11 = self.get_clamped(x0 + 1, y0 + 1);

    let top = p00.lerp(p10, fx);
    let bottom = p01.lerp(p11, fx);
    top.lerp(bottom, fy)
  }

  pub fn fill(&mut self, value: Vec4) {
    self.data.iter_mut().for_each(|px| *px = value);
  }

  /// Keeps the allocation when dimensions already match.
  pub fn ensure_size(&mut self, width: usize, height: usize) {
    if self.width != width || self.height != height {
      self.width = width;
      self.height = height;
      self.data.clear();
      self.data.resize(width * height, Vec4::ZERO);
    }
  }

  pub fn as_slice(&self) -> &[Vec4] {
    &self.data
  }

  /// Raw component view, 4 floats per pixel.
  pub fn as_f32_slice(&self) -> &[f32] {
    bytemuck::cast_slice(&self.data)
  }

  /// For rayon's `par_chunks_mut(width)` row dispatch.
  pub fn as_mut_slice(&mut self) -> &mut [Vec4] {
    &mut self.data
  }

  pub fn copy_from(&mut self, other: &ColorBuffer) {
    debug_assert_eq!(self.dims(), other.dims());
    self.data.copy_from_slice(&other.data);
  }

  /// Gamma-encoded 8-bit RGBA, for the demo PNG capture.
  pub fn to_rgba8(&self, gamma: f32) -> Vec<u8> {
    let inv_gamma = 1.0 / gamma;
    self
      .as_f32_slice()
      .chunks_exact(4)
      .flat_map(|px| {
        let encode = |c: f32| (c.max(0.0).powf(inv_gamma).min(1.0) * 255.0) as u8;
        // alpha stays linear
        [encode(px[0]), encode(px[1]), encode(px[2]), (px[3].clamp(0.0, 1.0) * 255.0) as u8]
      })
      .collect()
  }
}

/// Single-channel float image: linear depth, camera distance, shading model id.
#[derive(Clone, Debug)]
pub struct ScalarBuffer {
  width: usize,
  height: usize,
  data: Vec<f32>,
}

impl ScalarBuffer {
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      width,
      height,
      data: vec![0.0; width * height],
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn dims(&self) -> (usize, usize) {
    (self.width, self.height)
  }

  pub fn get(&self, x: usize, y: usize) -> f32 {
    self.data[y * self.width + x]
  }

  pub fn set(&mut self, x: usize, y: usize, value: f32) {
    self.data[y * self.width + x] = value;
  }

  pub fn get_clamped(&self, x: i64, y: i64) -> f32 {
    let cx = x.clamp(0, self.width as i64 - 1) as usize;
    let cy = y.clamp(0, self.height as i64 - 1) as usize;
    self.get(cx, cy)
  }

  pub fn sample_bilinear(&self, x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let top = lerp_f32(self.get_clamped(x0, y0), self.get_clamped(x0 + 1, y0), fx);
    let bottom = lerp_f32(self.get_clamped(x0, y0 + 1), self.get_clamped(x0 + 1, y0 + 1), fx);
    lerp_f32(top, bottom, fy)
  }

  pub fn fill(&mut self, value: f32) {
    self.data.iter_mut().for_each(|px| *px = value);
  }

  pub fn ensure_size(&mut self, width: usize, height: usize) {
    if self.width != width || self.height != height {
      self.width = width;
      self.height = height;
      self.data.clear();
      self.data.resize(width * height, 0.0);
    }
  }

  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }

  pub fn as_mut_slice(&mut self) -> &mut [f32] {
    &mut self.data
  }
}
