use glam::{vec4, Vec4};

use rs_ssss::{
  ColorBuffer, DebugPass, EngineError, FrameInputs, SampleQuality, SamplingResolution,
  ScalarBuffer, ScatteringEngine, ScatteringProfile,
};

/// Owned G-buffer set for tests. Mask fully on, everything else flat.
struct OwnedInputs {
  depth: ScalarBuffer,
  camera_distance: ScalarBuffer,
  albedo: ColorBuffer,
  specular: ColorBuffer,
  diffuse_lighting: ColorBuffer,
  specular_lighting: ColorBuffer,
  sss_color: ColorBuffer,
  shading_model: ScalarBuffer,
}

impl OwnedInputs {
  fn flat(width: usize, height: usize, depth: f32, camera_distance: f32) -> Self {
    let mut depth_buf = ScalarBuffer::new(width, height);
    depth_buf.fill(depth);
    let mut camera_buf = ScalarBuffer::new(width, height);
    camera_buf.fill(camera_distance);
    let mut sss_color = ColorBuffer::new(width, height);
    sss_color.fill(Vec4::ONE);

    Self {
      depth: depth_buf,
      camera_distance: camera_buf,
      albedo: ColorBuffer::new(width, height),
      specular: ColorBuffer::new(width, height),
      diffuse_lighting: ColorBuffer::new(width, height),
      specular_lighting: ColorBuffer::new(width, height),
      sss_color,
      shading_model: ScalarBuffer::new(width, height),
    }
  }

  fn frame(&self) -> FrameInputs {
    FrameInputs {
      depth: &self.depth,
      camera_distance: &self.camera_distance,
      albedo: &self.albedo,
      specular: &self.specular,
      diffuse_lighting: &self.diffuse_lighting,
      specular_lighting: &self.specular_lighting,
      sss_color: &self.sss_color,
      shading_model: &self.shading_model,
    }
  }
}

fn spec_profile() -> ScatteringProfile {
  ScatteringProfile {
    sample_quality: SampleQuality::Medium,
    sampling_resolution: SamplingResolution::FullRes,
    jitter_radius: 0.0,
    temporal_jitter: false,
    world_unit: 25.0,
    fade_distance: 4.0,
    fade_radius: 1.0,
    ..ScatteringProfile::default()
  }
}

#[test]
fn bright_pixel_spreads_and_energy_is_conserved() {
  let size = 64;
  // camera well inside the fade distance, so the blur is fully visible
  let mut inputs = OwnedInputs::flat(size, size, 3.0, 3.0);
  inputs
    .diffuse_lighting
    .set(size / 2, size / 2, vec4(10.0, 10.0, 10.0, 1.0));

  let mut engine = ScatteringEngine::new();
  let output = engine.compute(&spec_profile(), &inputs.frame(), 0).unwrap();

  let center = output.get(size / 2, size / 2);
  assert!(center.x < 10.0, "center kept all its energy: {}", center.x);
  let neighbor = output.get(size / 2 + 2, size / 2);
  assert!(neighbor.x > 0.0, "no energy spread to neighbors");

  // red channel total over the whole image
  let total: f32 = output.as_f32_slice().chunks_exact(4).map(|px| px[0]).sum();
  let relative_error = (total - 10.0).abs() / 10.0;
  assert!(relative_error < 0.02, "energy not conserved: total = {}", total);
}

#[test]
fn zero_jitter_is_deterministic_regardless_of_temporal_flag() {
  let size = 32;
  let mut inputs = OwnedInputs::flat(size, size, 3.0, 3.0);
  inputs
    .diffuse_lighting
    .set(10, 20, vec4(4.0, 2.0, 1.0, 1.0));

  let static_profile = spec_profile();
  let temporal_profile = ScatteringProfile {
    temporal_jitter: true,
    ..spec_profile()
  };

  let mut engine = ScatteringEngine::new();
  let a = engine
    .compute(&static_profile, &inputs.frame(), 0)
    .unwrap()
    .clone();
  let b = engine
    .compute(&temporal_profile, &inputs.frame(), 7)
    .unwrap()
    .clone();

  assert_eq!(a.as_f32_slice(), b.as_f32_slice());
}

#[test]
fn temporal_jitter_shifts_the_pattern_between_frames() {
  let size = 32;
  let mut inputs = OwnedInputs::flat(size, size, 3.0, 3.0);
  inputs
    .diffuse_lighting
    .set(size / 2, size / 2, vec4(10.0, 10.0, 10.0, 1.0));

  let profile = ScatteringProfile {
    jitter_radius: 0.5,
    temporal_jitter: true,
    ..spec_profile()
  };

  let mut engine = ScatteringEngine::new();
  let frame0 = engine.compute(&profile, &inputs.frame(), 0).unwrap().clone();
  let frame1 = engine.compute(&profile, &inputs.frame(), 1).unwrap().clone();

  assert_ne!(frame0.as_f32_slice(), frame1.as_f32_slice());
}

#[test]
fn half_res_output_has_full_res_dimensions() {
  // odd dimensions on purpose
  let (width, height) = (33, 17);
  let inputs = OwnedInputs::flat(width, height, 3.0, 3.0);
  let profile = ScatteringProfile {
    sampling_resolution: SamplingResolution::HalfRes,
    ..spec_profile()
  };

  let mut engine = ScatteringEngine::new();
  let output = engine.compute(&profile, &inputs.frame(), 0).unwrap();
  assert_eq!(output.dims(), (width, height));
}

#[test]
fn mismatched_buffer_dimensions_are_rejected() {
  let inputs = OwnedInputs::flat(32, 32, 3.0, 3.0);
  let small_albedo = ColorBuffer::new(16, 16);
  let frame = FrameInputs {
    albedo: &small_albedo,
    ..inputs.frame()
  };

  let mut engine = ScatteringEngine::new();
  let err = engine.compute(&spec_profile(), &frame, 0).unwrap_err();
  match err {
    EngineError::BufferSizeMismatch { name, .. } => assert_eq!(name, "albedo"),
    other => panic!("expected BufferSizeMismatch, got {:?}", other),
  }
}

#[test]
fn empty_frame_is_rejected_not_dispatched() {
  // 0x0 buffers match each other, but there is nothing to blur - the
  // engine must refuse instead of launching the passes
  let inputs = OwnedInputs::flat(0, 0, 3.0, 3.0);

  let mut engine = ScatteringEngine::new();
  let err = engine.compute(&spec_profile(), &inputs.frame(), 0).unwrap_err();
  assert!(matches!(err, EngineError::EmptyFrame { .. }));

  // half-res goes through the same guard
  let profile = ScatteringProfile {
    sampling_resolution: SamplingResolution::HalfRes,
    ..spec_profile()
  };
  let err = engine.compute(&profile, &inputs.frame(), 0).unwrap_err();
  assert!(matches!(err, EngineError::EmptyFrame { .. }));
}

#[test]
fn invalid_profile_is_rejected_not_clamped() {
  let inputs = OwnedInputs::flat(16, 16, 3.0, 3.0);
  let profile = ScatteringProfile {
    jitter_radius: 2.0,
    ..spec_profile()
  };

  let mut engine = ScatteringEngine::new();
  let err = engine.compute(&profile, &inputs.frame(), 0).unwrap_err();
  assert!(matches!(err, EngineError::InvalidProfile { .. }));
}

#[test]
fn debug_fade_pass_ignores_lighting_contents() {
  let size = 16;
  let mut inputs = OwnedInputs::flat(size, size, 3.0, 4.5);
  let profile = ScatteringProfile {
    debug_pass: DebugPass::Fade,
    ..spec_profile()
  };

  let mut engine = ScatteringEngine::new();
  let a = engine.compute(&profile, &inputs.frame(), 0).unwrap().clone();

  // wildly different lighting, same fade output
  inputs.diffuse_lighting.fill(vec4(9.0, 0.0, 3.0, 1.0));
  inputs.albedo.fill(Vec4::ONE);
  let b = engine.compute(&profile, &inputs.frame(), 0).unwrap().clone();
  assert_eq!(a.as_f32_slice(), b.as_f32_slice());

  // camera_distance 4.5 with fade band [4, 5] -> factor 0.5, broadcast to rgb
  let px = a.get(8, 8);
  assert!((px.x - 0.5).abs() < 1e-5);
  assert_eq!(px.x, px.y);
  assert_eq!(px.y, px.z);
}

#[test]
fn fade_band_blends_toward_original_lighting() {
  let size = 32;
  // beyond fade_distance + fade_radius: effect fully off
  let mut inputs = OwnedInputs::flat(size, size, 3.0, 6.0);
  inputs
    .diffuse_lighting
    .set(size / 2, size / 2, vec4(10.0, 10.0, 10.0, 1.0));

  let mut engine = ScatteringEngine::new();
  let output = engine.compute(&spec_profile(), &inputs.frame(), 0).unwrap();

  // output == raw lighting, nothing spread
  let center = output.get(size / 2, size / 2);
  assert!((center.x - 10.0).abs() < 1e-4);
  let neighbor = output.get(size / 2 + 2, size / 2);
  assert!(neighbor.x.abs() < 1e-6);
}
