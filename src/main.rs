use glam::{vec3, Vec3, Vec4};
use log::info;
use rand::Rng;

use rs_ssss::utils::{color_hex_to_vec, spherical_to_cartesian_dgr};
use rs_ssss::{ColorBuffer, FrameInputs, ScalarBuffer, ScatteringEngine, ScatteringProfile};

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

const SPHERE_DEPTH: f32 = 3.0;
const BACKGROUND_DEPTH: f32 = 20.0;

/// Demo capture: shade a synthetic "skin" sphere into a G-buffer, run the
/// scattering engine over it and write the composited frame to a png.
fn main() {
  simple_logger::SimpleLogger::new().init().unwrap();
  log::set_max_level(log::LevelFilter::Trace);
  info!("-- Start --");

  let image_name = std::env::args()
    .nth(1)
    .unwrap_or_else(|| "ssss_demo".to_string());

  let scene = build_scene();
  let profile = ScatteringProfile::default();
  let mut engine = ScatteringEngine::new();

  let frame = FrameInputs {
    depth: &scene.depth,
    camera_distance: &scene.camera_distance,
    albedo: &scene.albedo,
    specular: &scene.specular,
    diffuse_lighting: &scene.diffuse_lighting,
    specular_lighting: &scene.specular_lighting,
    sss_color: &scene.sss_color,
    shading_model: &scene.shading_model,
  };
  let output = engine.compute(&profile, &frame, 0).unwrap();

  let path = format!("{}.png", image_name);
  image::save_buffer(
    &path,
    &output.to_rgba8(2.2),
    WIDTH as u32,
    HEIGHT as u32,
    image::ExtendedColorType::Rgba8,
  )
  .unwrap();
  info!("Capture written to '{}'", path);
}

struct DemoScene {
  depth: ScalarBuffer,
  camera_distance: ScalarBuffer,
  albedo: ColorBuffer,
  specular: ColorBuffer,
  diffuse_lighting: ColorBuffer,
  specular_lighting: ColorBuffer,
  sss_color: ColorBuffer,
  shading_model: ScalarBuffer,
}

fn build_scene() -> DemoScene {
  info!("Building synthetic sphere G-buffer");
  let mut rng = rand::thread_rng();

  let mut scene = DemoScene {
    depth: ScalarBuffer::new(WIDTH, HEIGHT),
    camera_distance: ScalarBuffer::new(WIDTH, HEIGHT),
    albedo: ColorBuffer::new(WIDTH, HEIGHT),
    specular: ColorBuffer::new(WIDTH, HEIGHT),
    diffuse_lighting: ColorBuffer::new(WIDTH, HEIGHT),
    specular_lighting: ColorBuffer::new(WIDTH, HEIGHT),
    sss_color: ColorBuffer::new(WIDTH, HEIGHT),
    shading_model: ScalarBuffer::new(WIDTH, HEIGHT),
  };

  let skin_albedo = color_hex_to_vec(224, 169, 147);
  let backdrop_albedo = Vec3::splat(0.1);
  let light_dir = spherical_to_cartesian_dgr(-93.0, 55.0, 1.0).normalize();
  let view_dir = vec3(0.0, 0.0, 1.0);
  let half_vec = (light_dir + view_dir).normalize();

  let radius = HEIGHT as f32 * 0.35;
  let center = (WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);

  for y in 0..HEIGHT {
    for x in 0..WIDTH {
      let dx = (x as f32 - center.0) / radius;
      let dy = (y as f32 - center.1) / radius;
      let r2 = dx * dx + dy * dy;

      if r2 < 1.0 {
        // on the sphere
        let normal = vec3(dx, -dy, (1.0 - r2).sqrt()).normalize();
        let n_dot_l = normal.dot(light_dir).max(0.0);
        let n_dot_h = normal.dot(half_vec).max(0.0);

        let diffuse = skin_albedo * n_dot_l * 1.2;
        let spec = n_dot_h.powf(64.0) * 0.4;

        scene.depth.set(x, y, SPHERE_DEPTH - normal.z * 0.3);
        scene.camera_distance.set(x, y, SPHERE_DEPTH);
        scene.albedo.set(x, y, skin_albedo.extend(1.0));
        scene.specular.set(x, y, Vec4::splat(0.028));
        scene.diffuse_lighting.set(x, y, diffuse.extend(1.0));
        scene.specular_lighting.set(x, y, Vec3::splat(spec).extend(0.0));
        scene.sss_color.set(x, y, vec3(1.0, 0.85, 0.7).extend(1.0));
        scene.shading_model.set(x, y, 1.0);
      } else {
        // backdrop, with a few bright specks to make the dither visible
        let speck = rng.gen::<f32>() > 0.9995;
        let lighting = if speck { Vec3::splat(1.5) } else { backdrop_albedo * 0.2 };

        scene.depth.set(x, y, BACKGROUND_DEPTH);
        scene.camera_distance.set(x, y, BACKGROUND_DEPTH);
        scene.albedo.set(x, y, backdrop_albedo.extend(1.0));
        scene.diffuse_lighting.set(x, y, lighting.extend(1.0));
        // specular, specular_lighting, sss_color, shading_model stay zero
      }
    }
  }

  scene
}
