pub use self::profile::*;

pub mod profile;

/// Which intermediate buffer is routed to the output. Visualization only,
/// never affects the computed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugPass {
  Combine,
  DiffuseLighting,
  SpecularLighting,
  Albedo,
  Specular,
  SssColor,
  ShadingModel,
  Fade,
}

/// Downsample factor for the blur passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingResolution {
  FullRes = 1,
  HalfRes = 2,
}

impl SamplingResolution {
  pub fn divisor(self) -> usize {
    self as usize
  }
}

/// Kernel taps per blur direction: `2 * quality - 1`.
/// Low = 11, medium = 17, high = 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleQuality {
  Low = 6,    // 5 + 1
  Medium = 9, // 8 + 1
  High = 13,  // 12 + 1
}

impl SampleQuality {
  pub fn tap_count(self) -> usize {
    2 * (self as usize) - 1
  }
}
