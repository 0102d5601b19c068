use glam::{Mat3, Mat4, Vec3};
use skyview_common::MoveDirection;

/// Pitch is clamped to this many degrees either side of the horizon.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view reachable by scrolling, in degrees.
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view reachable by scrolling, in degrees.
pub const MAX_ZOOM: f32 = 45.0;

/// First-person fly camera.
///
/// Angles are stored in degrees. `front`, `right` and `up` are private and
/// only ever recomputed from yaw/pitch, so they always form an orthonormal
/// basis.
#[derive(Debug, Clone, PartialEq)]
pub struct FpsCamera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    /// World units per second.
    pub speed: f32,
    /// Degrees per unit of cursor offset.
    pub sensitivity: f32,
    zoom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

impl FpsCamera {
    /// Camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            speed: 2.5,
            sensitivity: 0.1,
            zoom: MAX_ZOOM,
            near: 0.1,
            far: 100.0,
        };
        camera.update_vectors();
        camera
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set yaw and pitch (degrees). Pitch is clamped like mouse input.
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
        self
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Move along the view direction or strafe, scaled by `speed * dt`.
    pub fn process_keyboard(&mut self, direction: MoveDirection, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
        }
    }

    /// Rotate by a cursor offset. Positive `y_offset` looks up.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch += y_offset * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Scrolling up narrows the field of view.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// View matrix with the translation dropped, so the skybox stays
    /// centred on the camera.
    pub fn skybox_view_matrix(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_mat4(self.view_matrix()))
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, self.near, self.far)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    /// Small deterministic generator so the sequences are reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn next_f32(&mut self, range: f32) -> f32 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (self.0 >> 40) as f32 / (1u64 << 24) as f32;
            (unit * 2.0 - 1.0) * range
        }
    }

    fn assert_orthonormal(cam: &FpsCamera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        // right-handed: right x up points backwards
        assert!((r.cross(u) + f).length() < 1e-3);
    }

    #[test]
    fn default_camera() {
        let cam = FpsCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 3.0));
        assert!((cam.front() - Vec3::NEG_Z).length() < EPS);
        assert!((cam.up() - Vec3::Y).length() < EPS);
        assert!((cam.right() - Vec3::X).length() < EPS);
        assert_eq!(cam.zoom(), 45.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn keyboard_moves_along_basis() {
        let mut cam = FpsCamera::default();
        cam.process_keyboard(MoveDirection::Forward, 1.0);
        assert!((cam.position - Vec3::new(0.0, 0.0, 0.5)).length() < EPS);

        cam.process_keyboard(MoveDirection::Right, 2.0);
        assert!((cam.position - Vec3::new(5.0, 0.0, 0.5)).length() < EPS);

        cam.process_keyboard(MoveDirection::Left, 2.0);
        cam.process_keyboard(MoveDirection::Backward, 1.0);
        assert!((cam.position - Vec3::new(0.0, 0.0, 3.0)).length() < EPS);
    }

    #[test]
    fn keyboard_scales_with_delta_time() {
        let mut a = FpsCamera::default();
        let mut b = FpsCamera::default();
        a.process_keyboard(MoveDirection::Forward, 0.5);
        b.process_keyboard(MoveDirection::Forward, 0.25);
        b.process_keyboard(MoveDirection::Forward, 0.25);
        assert!((a.position - b.position).length() < EPS);
    }

    #[test]
    fn mouse_rotates_yaw_and_pitch() {
        let mut cam = FpsCamera::default();
        cam.process_mouse_movement(100.0, 50.0);
        assert!((cam.yaw() - -80.0).abs() < EPS);
        assert!((cam.pitch() - 5.0).abs() < EPS);
        assert!(cam.front().y > 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FpsCamera::default();
        cam.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        cam.process_mouse_movement(0.0, -50_000.0);
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_stays_bounded_for_any_sequence() {
        let mut rng = Lcg(7);
        let mut cam = FpsCamera::default();
        for _ in 0..2_000 {
            cam.process_mouse_movement(rng.next_f32(500.0), rng.next_f32(500.0));
            assert!(cam.pitch().abs() <= PITCH_LIMIT);
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = FpsCamera::default();
        cam.process_mouse_scroll(10.0);
        assert_eq!(cam.zoom(), 35.0);
        cam.process_mouse_scroll(100.0);
        assert_eq!(cam.zoom(), MIN_ZOOM);
        cam.process_mouse_scroll(-100.0);
        assert_eq!(cam.zoom(), MAX_ZOOM);
    }

    #[test]
    fn zoom_stays_bounded_for_any_sequence() {
        let mut rng = Lcg(11);
        let mut cam = FpsCamera::default();
        for _ in 0..2_000 {
            cam.process_mouse_scroll(rng.next_f32(30.0));
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&cam.zoom()));
        }
    }

    #[test]
    fn basis_stays_orthonormal_under_mixed_input() {
        let mut rng = Lcg(42);
        let mut cam = FpsCamera::default();
        let dirs = [
            MoveDirection::Forward,
            MoveDirection::Backward,
            MoveDirection::Left,
            MoveDirection::Right,
        ];
        for i in 0..1_000 {
            cam.process_mouse_movement(rng.next_f32(200.0), rng.next_f32(200.0));
            cam.process_keyboard(dirs[i % 4], rng.next_f32(0.05).abs());
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let mut rng = Lcg(3);
        let mut cam = FpsCamera::new(Vec3::new(4.0, -2.0, 7.5));
        for _ in 0..200 {
            cam.process_mouse_movement(rng.next_f32(100.0), rng.next_f32(100.0));
            cam.process_keyboard(MoveDirection::Forward, 0.01);
            let eye = cam.view_matrix().transform_point3(cam.position);
            assert!(eye.length() < 1e-3, "eye mapped to {eye}");
        }
    }

    #[test]
    fn view_matrix_looks_down_negative_z() {
        let cam = FpsCamera::default().with_orientation(30.0, -20.0);
        let ahead = cam.position + cam.front() * 5.0;
        let in_view = cam.view_matrix().transform_point3(ahead);
        assert!((in_view - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-3);
    }

    #[test]
    fn skybox_view_drops_translation() {
        let mut cam = FpsCamera::default();
        cam.position = Vec3::new(100.0, 50.0, -20.0);
        let view = cam.skybox_view_matrix();
        assert_eq!(view.w_axis, glam::Vec4::W);

        let mut at_origin = cam.clone();
        at_origin.position = Vec3::ZERO;
        assert!(view.abs_diff_eq(at_origin.skybox_view_matrix(), EPS));
    }

    #[test]
    fn projection_uses_zoom() {
        let mut cam = FpsCamera::default();
        let wide = cam.projection_matrix(16.0 / 9.0);
        cam.process_mouse_scroll(20.0);
        let narrow = cam.projection_matrix(16.0 / 9.0);
        // narrower fov -> larger focal length on the y axis
        assert!(narrow.y_axis.y > wide.y_axis.y);
        assert!(!wide.col(0).x.is_nan());
    }

    #[test]
    fn orientation_builder_clamps_pitch() {
        let cam = FpsCamera::default().with_orientation(0.0, 120.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        assert!((cam.front().x - PITCH_LIMIT.to_radians().cos()).abs() < EPS);
    }
}
