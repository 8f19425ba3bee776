use glam::Vec4;
use log::info;
use rayon::prelude::*;

use crate::buffer::{ColorBuffer, ScalarBuffer};
use crate::config::{DebugPass, ScatteringProfile};

use super::FrameInputs;

/// Final blend: fade the blurred diffuse back to the raw lighting with
/// camera distance, re-add specular, and route debug views.
pub struct CompositePass;

impl CompositePass {
  pub fn new() -> Self {
    info!("Creating CompositePass");
    Self
  }

  /// 0 at `camera_distance <= fade_distance` (full effect), 1 beyond
  /// `fade_distance + fade_radius` (raw lighting).
  pub fn fade_factor(profile: &ScatteringProfile, camera_distance: f32) -> f32 {
    const EPSILON: f32 = 1e-4;
    let band = profile.fade_radius.max(EPSILON);
    ((camera_distance - profile.fade_distance) / band).clamp(0.0, 1.0)
  }

  pub fn execute(
    &self,
    profile: &ScatteringProfile,
    frame: &FrameInputs,
    blurred_diffuse: &ColorBuffer,
    result: &mut ColorBuffer,
  ) {
    match profile.debug_pass {
      DebugPass::Combine => self.combine(profile, frame, blurred_diffuse, result),
      DebugPass::DiffuseLighting => result.copy_from(frame.diffuse_lighting),
      DebugPass::SpecularLighting => result.copy_from(frame.specular_lighting),
      DebugPass::Albedo => result.copy_from(frame.albedo),
      DebugPass::Specular => result.copy_from(frame.specular),
      DebugPass::SssColor => result.copy_from(frame.sss_color),
      DebugPass::ShadingModel => Self::scalar_to_grayscale(frame.shading_model, result),
      DebugPass::Fade => {
        let (width, _) = result.dims();
        result
          .as_mut_slice()
          .par_chunks_mut(width)
          .enumerate()
          .for_each(|(y, row)| {
            for (x, out_px) in row.iter_mut().enumerate() {
              let fade = Self::fade_factor(profile, frame.camera_distance.get(x, y));
              *out_px = Vec4::new(fade, fade, fade, 1.0);
            }
          });
      }
    }
  }

  fn combine(
    &self,
    profile: &ScatteringProfile,
    frame: &FrameInputs,
    blurred_diffuse: &ColorBuffer,
    result: &mut ColorBuffer,
  ) {
    let (width, _) = result.dims();
    result
      .as_mut_slice()
      .par_chunks_mut(width)
      .enumerate()
      .for_each(|(y, row)| {
        for (x, out_px) in row.iter_mut().enumerate() {
          let fade = Self::fade_factor(profile, frame.camera_distance.get(x, y));
          let diffuse = frame.diffuse_lighting.get(x, y);
          let blurred = blurred_diffuse.get(x, y);
          let specular = frame.specular_lighting.get(x, y);
          let mixed = blurred.lerp(diffuse, fade);
          *out_px = Vec4::new(
            mixed.x + specular.x,
            mixed.y + specular.y,
            mixed.z + specular.z,
            diffuse.w,
          );
        }
      });
  }

  fn scalar_to_grayscale(src: &ScalarBuffer, result: &mut ColorBuffer) {
    let (width, _) = result.dims();
    result
      .as_mut_slice()
      .par_chunks_mut(width)
      .enumerate()
      .for_each(|(y, row)| {
        for (x, out_px) in row.iter_mut().enumerate() {
          let v = src.get(x, y);
          *out_px = Vec4::new(v, v, v, 1.0);
        }
      });
  }
}
