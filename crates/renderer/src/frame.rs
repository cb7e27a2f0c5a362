use math::{vec3, Mat4, MathError, Vec3, PI_2, QUARTER_PI};

use crate::scene::SceneDescriptor;
use crate::uniform_buffer::FrameTransforms;
use crate::RendererError;

/// Model transform at `elapsed` seconds: one full turn per second about `spin_axis`,
/// then a fixed 45 degree tilt about an axis circling the xy plane.
pub fn model_transform(spin_axis: Vec3, elapsed: f32) -> Result<Mat4, MathError> {
    let spin = Mat4::rotation(elapsed * PI_2, spin_axis)?;
    let (sin, cos) = elapsed.sin_cos();
    let wobble = Mat4::rotation(QUARTER_PI, vec3(cos, sin, 0.0))?;
    Ok(wobble * spin)
}

/// Builds the uniform block for one frame.
///
/// `elapsed` is seconds since the renderer started and `aspect_ratio` is the current
/// framebuffer width over height. Nothing is cached between calls, so identical inputs
/// give identical bytes.
pub fn update_frame_transforms(
    scene: &SceneDescriptor,
    elapsed: f32,
    aspect_ratio: f32,
) -> Result<FrameTransforms, RendererError> {
    profiling::scope!("update_frame_transforms");

    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(RendererError::InvalidProjection(
            "aspect ratio must be positive and finite",
        ));
    }
    scene.validate()?;

    let model = model_transform(scene.spin_axis, elapsed)?;
    let view = Mat4::camera(scene.eye, scene.target, scene.up)?;
    let projection = Mat4::perspective(scene.fov_y, aspect_ratio, scene.near, scene.far);

    log::trace!("frame at {:.3}s model {}", elapsed, model);

    Ok(FrameTransforms {
        model,
        view,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::HALF_PI;

    const ASPECT: f32 = 800.0 / 600.0;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn fixed_inputs_are_deterministic() {
        init_logger();
        let scene = SceneDescriptor::default();
        let first = update_frame_transforms(&scene, 0.0, ASPECT).unwrap();
        let second = update_frame_transforms(&scene, 0.0, ASPECT).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn view_and_projection_come_from_scene() {
        let scene = SceneDescriptor::default();
        let transforms = update_frame_transforms(&scene, 0.0, ASPECT).unwrap();
        assert_eq!(
            transforms.view,
            Mat4::camera(vec3(2.0, 2.0, 2.0), Vec3::ZERO, Vec3::Z).unwrap()
        );
        assert_eq!(
            transforms.projection,
            Mat4::perspective(HALF_PI, ASPECT, 0.1, 10.0)
        );
    }

    #[test]
    fn view_and_projection_do_not_depend_on_time() {
        let scene = SceneDescriptor::default();
        let start = update_frame_transforms(&scene, 0.0, ASPECT).unwrap();
        let later = update_frame_transforms(&scene, 3.7, ASPECT).unwrap();
        assert_eq!(start.view, later.view);
        assert_eq!(start.projection, later.projection);
        assert_ne!(start.model, later.model);
    }

    #[test]
    fn model_applies_spin_before_wobble() {
        let elapsed = 0.3f32;
        let spin = Mat4::rotation(elapsed * PI_2, Vec3::Z).unwrap();
        let wobble = Mat4::rotation(QUARTER_PI, vec3(elapsed.cos(), elapsed.sin(), 0.0)).unwrap();
        let model = model_transform(Vec3::Z, elapsed).unwrap();
        assert_eq!(model, wobble * spin);
        assert_ne!(model, spin * wobble);
    }

    #[test]
    fn model_at_start_is_tilt_about_x() {
        let model = model_transform(Vec3::Z, 0.0).unwrap();
        assert_eq!(model, Mat4::rotation(QUARTER_PI, Vec3::X).unwrap());
    }

    #[test]
    fn spin_completes_a_turn_each_second() {
        let axis = Vec3::Z;
        let start = model_transform(axis, 0.0).unwrap();
        // a whole turn of spin leaves just the wobble
        let one_second = model_transform(axis, 1.0).unwrap();
        let wobble = Mat4::rotation(QUARTER_PI, vec3(1.0f32.cos(), 1.0f32.sin(), 0.0)).unwrap();
        let expected = wobble.transform_point(Vec3::X);
        let actual = one_second.transform_point(Vec3::X);
        assert!((expected - actual).norm() < 1e-4);
        assert_ne!(start, one_second);
    }

    #[test]
    fn zero_spin_axis_is_an_error() {
        let scene = SceneDescriptor::builder().spin_axis(Vec3::ZERO).build();
        assert!(matches!(
            update_frame_transforms(&scene, 1.0, ASPECT),
            Err(RendererError::Math(MathError::ZeroLengthAxis))
        ));
    }

    #[test]
    fn collinear_camera_is_an_error() {
        let scene = SceneDescriptor::builder().eye(vec3(0.0, 0.0, 5.0)).build();
        assert!(matches!(
            update_frame_transforms(&scene, 0.0, ASPECT),
            Err(RendererError::Math(MathError::CollinearCameraBasis))
        ));
    }

    #[test]
    fn built_scene_with_bad_planes_is_an_error() {
        let cases = [
            SceneDescriptor::builder().near(1.0).far(1.0).build(),
            SceneDescriptor::builder().near(-0.1).build(),
            SceneDescriptor::builder().fov_y(0.0).build(),
        ];
        for scene in cases {
            assert!(
                matches!(
                    update_frame_transforms(&scene, 0.0, ASPECT),
                    Err(RendererError::InvalidProjection(_))
                ),
                "{scene:?}"
            );
        }
    }

    #[test]
    fn degenerate_aspect_ratio_is_an_error() {
        let scene = SceneDescriptor::default();
        for aspect in [0.0, -1.0, f32::INFINITY, f32::NAN] {
            assert!(matches!(
                update_frame_transforms(&scene, 0.0, aspect),
                Err(RendererError::InvalidProjection(_))
            ));
        }
    }
}
