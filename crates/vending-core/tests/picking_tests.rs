use glam::{Mat4, Vec2, Vec3};
use vending_core::*;

#[test]
fn triangle_hit_in_front() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::NEG_Z);
    let t = ray_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).expect("hit");
    assert!((t - 5.0).abs() < 1e-6);
    assert!((ray.at(t) - Vec3::new(0.25, 0.25, 0.0)).length() < 1e-6);
}

#[test]
fn triangle_is_double_sided() {
    // Same triangle seen from behind
    let ray = Ray::new(Vec3::new(0.25, 0.25, -5.0), Vec3::Z);
    assert!(ray_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_some());
}

#[test]
fn triangle_misses() {
    // Outside the triangle
    let ray = Ray::new(Vec3::new(0.8, 0.8, 5.0), Vec3::NEG_Z);
    assert!(ray_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    // Behind the origin
    let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::Z);
    assert!(ray_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    // Parallel to the plane
    let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::X);
    assert!(ray_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
}

#[test]
fn aabb_entry_distance() {
    let b = Aabb::from_points([Vec3::splat(-1.0), Vec3::splat(1.0)]);
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    assert_eq!(ray_aabb(&ray, &b), Some(4.0));

    // Origin inside the box clamps to zero
    let inside = Ray::new(Vec3::ZERO, Vec3::X);
    assert_eq!(ray_aabb(&inside, &b), Some(0.0));

    let miss = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
    assert_eq!(ray_aabb(&miss, &b), None);

    assert_eq!(ray_aabb(&ray, &Aabb::EMPTY), None);
}

#[test]
fn nearest_hit_picks_closest_triangle() {
    let positions = vec![
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(-1.0, -1.0, 2.0),
        Vec3::new(1.0, -1.0, 2.0),
        Vec3::new(0.0, 1.0, 2.0),
    ];
    let indices: Vec<u32> = vec![0, 1, 2, 3, 4, 5];
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
    let t = nearest_triangle_hit(&ray, &positions, &indices).unwrap();
    assert!((t - 8.0).abs() < 1e-5);
}

#[test]
fn nearest_hit_skips_out_of_range_indices() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
    let indices: Vec<u32> = vec![0, 1, 9];
    let ray = Ray::new(Vec3::new(0.1, 0.1, 1.0), Vec3::NEG_Z);
    assert_eq!(nearest_triangle_hit(&ray, &positions, &indices), None);
}

#[test]
fn model_raycast_respects_transform() {
    let v = |p: [f32; 3]| Vertex {
        position: p,
        normal: [0.0, 0.0, 1.0],
        uv: [0.0, 0.0],
    };
    let model = ModelData::from_triangles(
        vec![v([-1.0, -1.0, 0.0]), v([1.0, -1.0, 0.0]), v([0.0, 1.0, 0.0])],
        vec![0, 1, 2],
    );
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    assert!((model.raycast(&ray, Mat4::IDENTITY).unwrap() - 5.0).abs() < 1e-5);

    // Moved toward the camera and scaled: distances stay in world units
    let m = Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)) * Mat4::from_scale(Vec3::splat(3.0));
    assert!((model.raycast(&ray, m).unwrap() - 3.0).abs() < 1e-5);

    // Moved out of the way
    let m = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
    assert!(model.raycast(&ray, m).is_none());

    // Degenerate transform
    assert!(model.raycast(&ray, Mat4::ZERO).is_none());
}

#[test]
fn camera_center_ray_looks_at_target() {
    let camera = Camera::default();
    let ray = camera.ray_from_ndc(Vec2::ZERO);
    assert_eq!(ray.origin, camera.eye);
    let expected = (camera.target - camera.eye).normalize();
    assert!((ray.dir - expected).length() < 1e-4, "dir {:?}", ray.dir);
}

#[test]
fn camera_ray_tilts_with_ndc() {
    let mut camera = Camera::default();
    camera.set_viewport(1920, 1080);
    let up = camera.ray_from_ndc(Vec2::new(0.0, 1.0));
    let right = camera.ray_from_ndc(Vec2::new(1.0, 0.0));
    assert!(up.dir.y > 0.0);
    assert!(right.dir.x > 0.0);
    // Top edge of the frustum sits at half the vertical fov
    let angle = up.dir.angle_between(Vec3::NEG_Z);
    assert!((angle - camera.fovy_radians / 2.0).abs() < 1e-3);
}

#[test]
fn transform_matrix_applies_scale_rotation_translation() {
    let t = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0))
        .with_uniform_scale(2.0)
        .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
    let p = t.matrix().transform_point3(Vec3::X);
    // +X scaled to 2, yawed 90 degrees to -Z, then translated
    assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5, "{p:?}");
}

#[test]
fn hex_colors_convert_to_linear() {
    let white = hex_to_linear_rgb(0xFFFFFF);
    assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
    assert_eq!(hex_to_linear_rgb(0x000000), [0.0, 0.0, 0.0]);
    let [r, g, b] = hex_to_linear_rgb(0x87CEEB);
    assert!(r < g && g < b);
    // sRGB mid grey is darker in linear space
    assert!(hex_to_linear_rgb(0x808080)[0] < 0.25);
}
