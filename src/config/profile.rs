use crate::errors::EngineError;

use super::{DebugPass, SampleQuality, SamplingResolution};

/// Tunable parameters of the scattering effect. Authored once, then read-only
/// at render time - many frames may share one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringProfile {
  // Debug view
  pub debug_pass: DebugPass,
  // Quality settings
  pub sampling_resolution: SamplingResolution,
  pub sample_quality: SampleQuality,
  /// Fraction of the kernel radius by which tap offsets are perturbed, [0..1]
  pub jitter_radius: f32,
  // General settings
  /// Re-seed the jitter pattern every frame. Turn on if the consuming
  /// pipeline runs temporal AA, otherwise the dither will crawl.
  pub temporal_jitter: bool,
  /// World scale in meters. Maps the millimeter-space diffusion profile
  /// into scene units.
  pub world_unit: f32,
  /// Camera distance at which the effect starts to fade out
  pub fade_distance: f32,
  /// Width of the fade transition band
  pub fade_radius: f32,
}

impl Default for ScatteringProfile {
  fn default() -> Self {
    Self {
      debug_pass: DebugPass::Combine,
      sampling_resolution: SamplingResolution::FullRes,
      sample_quality: SampleQuality::Medium,
      jitter_radius: 0.25,
      temporal_jitter: false,
      world_unit: 25.0,
      fade_distance: 4.0,
      fade_radius: 1.0,
    }
  }
}

impl ScatteringProfile {
  /// Reject out-of-range values. Called at the engine boundary - the engine
  /// never clamps, a bad profile is a wiring error on the caller's side.
  pub fn validate(&self) -> Result<(), EngineError> {
    check_scalar("jitter_radius", self.jitter_radius, 0.0, 1.0)?;
    check_non_negative("fade_distance", self.fade_distance)?;
    check_non_negative("fade_radius", self.fade_radius)?;
    check_non_negative("world_unit", self.world_unit)?;
    if self.world_unit == 0.0 {
      return Err(EngineError::InvalidProfile {
        field: "world_unit",
        value: self.world_unit,
        reason: "must be positive",
      });
    }
    Ok(())
  }

  /// Authoring-time helper: clamp every scalar into its legal range.
  /// The stand-in for the inspector's range widgets.
  pub fn clamped(mut self) -> Self {
    self.jitter_radius = self.jitter_radius.clamp(0.0, 1.0);
    self.world_unit = self.world_unit.max(f32::MIN_POSITIVE);
    self.fade_distance = self.fade_distance.max(0.0);
    self.fade_radius = self.fade_radius.max(0.0);
    self
  }
}

fn check_scalar(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), EngineError> {
  if !value.is_finite() || value < min || value > max {
    return Err(EngineError::InvalidProfile {
      field,
      value,
      reason: "outside allowed range",
    });
  }
  Ok(())
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), EngineError> {
  if !value.is_finite() || value < 0.0 {
    return Err(EngineError::InvalidProfile {
      field,
      value,
      reason: "must be a non-negative finite number",
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_profile_is_valid() {
    assert!(ScatteringProfile::default().validate().is_ok());
  }

  #[test]
  fn jitter_radius_boundaries_accepted() {
    for &jr in &[0.0, 1.0] {
      let profile = ScatteringProfile {
        jitter_radius: jr,
        ..ScatteringProfile::default()
      };
      assert!(profile.validate().is_ok());
    }
  }

  #[test]
  fn jitter_radius_out_of_range_rejected() {
    for &jr in &[-0.01, 1.01, f32::NAN, f32::INFINITY] {
      let profile = ScatteringProfile {
        jitter_radius: jr,
        ..ScatteringProfile::default()
      };
      assert!(profile.validate().is_err(), "jitter_radius = {}", jr);
    }
  }

  #[test]
  fn negative_fade_rejected() {
    let profile = ScatteringProfile {
      fade_distance: -1.0,
      ..ScatteringProfile::default()
    };
    assert!(profile.validate().is_err());
  }

  #[test]
  fn zero_world_unit_rejected() {
    let profile = ScatteringProfile {
      world_unit: 0.0,
      ..ScatteringProfile::default()
    };
    assert!(profile.validate().is_err());
  }

  #[test]
  fn clamped_pulls_values_into_range() {
    let profile = ScatteringProfile {
      jitter_radius: 1.8,
      fade_distance: -3.0,
      ..ScatteringProfile::default()
    }
    .clamped();
    assert_eq!(profile.jitter_radius, 1.0);
    assert_eq!(profile.fade_distance, 0.0);
    assert!(profile.validate().is_ok());
  }
}
