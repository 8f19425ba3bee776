use log::{info, trace};

use crate::buffer::{ColorBuffer, ScalarBuffer};
use crate::config::{SamplingResolution, ScatteringProfile};
use crate::errors::EngineError;

pub use self::composite_pass::CompositePass;
pub use self::resolution_pass::ResolutionPass;
pub use self::sss_blur_pass::{depth_weight, SssBlurPass};

pub mod composite_pass;
pub mod resolution_pass;
pub mod sss_blur_pass;

/// Per-frame G-buffer planes, borrowed from the host pipeline. All read-only
/// and all the same resolution - a mismatched set is rejected, never
/// resampled.
pub struct FrameInputs<'a> {
  pub depth: &'a ScalarBuffer,
  pub camera_distance: &'a ScalarBuffer,
  pub albedo: &'a ColorBuffer,
  pub specular: &'a ColorBuffer,
  pub diffuse_lighting: &'a ColorBuffer,
  pub specular_lighting: &'a ColorBuffer,
  /// Per-channel scattering mask. 0 means "not skin", the blur skips the
  /// pixel entirely.
  pub sss_color: &'a ColorBuffer,
  pub shading_model: &'a ScalarBuffer,
}

impl<'a> FrameInputs<'a> {
  pub fn dims(&self) -> (usize, usize) {
    self.depth.dims()
  }

  pub fn validate(&self) -> Result<(), EngineError> {
    let expected = self.depth.dims();
    if expected.0 == 0 || expected.1 == 0 {
      return Err(EngineError::EmptyFrame {
        width: expected.0,
        height: expected.1,
      });
    }
    check_dims("camera_distance", self.camera_distance.dims(), expected)?;
    check_dims("albedo", self.albedo.dims(), expected)?;
    check_dims("specular", self.specular.dims(), expected)?;
    check_dims("diffuse_lighting", self.diffuse_lighting.dims(), expected)?;
    check_dims("specular_lighting", self.specular_lighting.dims(), expected)?;
    check_dims("sss_color", self.sss_color.dims(), expected)?;
    check_dims("shading_model", self.shading_model.dims(), expected)?;
    Ok(())
  }
}

fn check_dims(
  name: &'static str,
  actual: (usize, usize),
  expected: (usize, usize),
) -> Result<(), EngineError> {
  if actual != expected {
    return Err(EngineError::BufferSizeMismatch {
      name,
      actual_width: actual.0,
      actual_height: actual.1,
      expected_width: expected.0,
      expected_height: expected.1,
    });
  }
  Ok(())
}

/// The whole effect: separable diffusion blur of the diffuse lighting,
/// optional half-res round trip, fade compositing. Owns every intermediate
/// buffer and reuses them across frames, so steady-state frames allocate
/// nothing.
pub struct ScatteringEngine {
  sss_blur_pass: SssBlurPass,
  resolution_pass: ResolutionPass,
  composite_pass: CompositePass,
  // scratch, reused across frames
  ping_pong: ColorBuffer,
  blurred: ColorBuffer,
  half_diffuse: ColorBuffer,
  half_sss_color: ColorBuffer,
  half_blurred: ColorBuffer,
  half_depth: ScalarBuffer,
  output: ColorBuffer,
}

impl ScatteringEngine {
  pub fn new() -> Self {
    info!("Creating ScatteringEngine");
    Self {
      sss_blur_pass: SssBlurPass::new(),
      resolution_pass: ResolutionPass::new(),
      composite_pass: CompositePass::new(),
      ping_pong: ColorBuffer::new(0, 0),
      blurred: ColorBuffer::new(0, 0),
      half_diffuse: ColorBuffer::new(0, 0),
      half_sss_color: ColorBuffer::new(0, 0),
      half_blurred: ColorBuffer::new(0, 0),
      half_depth: ScalarBuffer::new(0, 0),
      output: ColorBuffer::new(0, 0),
    }
  }

  /// One frame of the effect. Pure function of the arguments: same profile,
  /// buffers and frame index always give the same image.
  pub fn compute(
    &mut self,
    profile: &ScatteringProfile,
    frame: &FrameInputs,
    frame_idx: u32,
  ) -> Result<&ColorBuffer, EngineError> {
    profile.validate()?;
    frame.validate()?;

    let (width, height) = frame.dims();
    trace!("ScatteringEngine frame {} ({}x{})", frame_idx, width, height);
    self.blurred.ensure_size(width, height);
    self.output.ensure_size(width, height);

    match profile.sampling_resolution {
      SamplingResolution::FullRes => {
        self.ping_pong.ensure_size(width, height);
        self.sss_blur_pass.execute(
          profile,
          frame_idx,
          frame.diffuse_lighting,
          &mut self.ping_pong,
          &mut self.blurred,
          frame.depth,
          frame.sss_color,
        );
      }
      SamplingResolution::HalfRes => {
        let (half_width, half_height) = ResolutionPass::half_dims((width, height));
        self.half_diffuse.ensure_size(half_width, half_height);
        self.half_sss_color.ensure_size(half_width, half_height);
        self.half_blurred.ensure_size(half_width, half_height);
        self.half_depth.ensure_size(half_width, half_height);
        self.ping_pong.ensure_size(half_width, half_height);

        self
          .resolution_pass
          .downsample_color(frame.diffuse_lighting, &mut self.half_diffuse);
        self
          .resolution_pass
          .downsample_color(frame.sss_color, &mut self.half_sss_color);
        self
          .resolution_pass
          .downsample_scalar(frame.depth, &mut self.half_depth);

        self.sss_blur_pass.execute(
          profile,
          frame_idx,
          &self.half_diffuse,
          &mut self.ping_pong,
          &mut self.half_blurred,
          &self.half_depth,
          &self.half_sss_color,
        );

        self.resolution_pass.upsample_depth_aware(
          &self.half_blurred,
          &self.half_depth,
          frame.depth,
          &mut self.blurred,
        );
      }
    }

    self
      .composite_pass
      .execute(profile, frame, &self.blurred, &mut self.output);
    Ok(&self.output)
  }
}

impl Default for ScatteringEngine {
  fn default() -> Self {
    Self::new()
  }
}
