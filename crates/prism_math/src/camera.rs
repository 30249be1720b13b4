use glam::{Mat4, Vec3, Vec4};

/// Left-handed camera (+z forward, +y up) shared by the rasterizer and ray tracer.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin: Vec3,
    /// Vertical field of view in degrees
    pub fov_angle: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Rotation about the right axis, radians
    pub pitch: f32,
    /// Rotation about the world up axis, radians
    pub yaw: f32,
}

impl Camera {
    /// Create a new camera looking down +z.
    pub fn new(origin: Vec3, fov_angle: f32, aspect: f32) -> Self {
        Self {
            origin,
            fov_angle,
            aspect,
            near: 0.1,
            far: 100.0,
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    /// Set pitch and yaw (radians).
    pub fn with_rotation(mut self, pitch: f32, yaw: f32) -> Self {
        self.pitch = pitch;
        self.yaw = yaw;
        self
    }

    /// Set the near and far clip planes.
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Update aspect ratio (e.g., when the output resolution changes)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// `tan(fov / 2)`, the half-height of the image plane at distance 1.
    pub fn fov_scale(&self) -> f32 {
        (self.fov_angle.to_radians() * 0.5).tan()
    }

    fn rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw) * Mat4::from_rotation_x(self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation().transform_vector3(Vec3::Z)
    }

    pub fn right(&self) -> Vec3 {
        self.rotation().transform_vector3(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.rotation().transform_vector3(Vec3::Y)
    }

    /// Orthonormal basis (right, up, forward) plus origin: camera space → world space.
    ///
    /// The basis comes straight from the pitch/yaw rotation, so it stays
    /// defined when looking straight up or down.
    pub fn camera_to_world(&self) -> Mat4 {
        Mat4::from_cols(
            self.right().extend(0.0),
            self.up().extend(0.0),
            self.forward().extend(0.0),
            Vec4::new(self.origin.x, self.origin.y, self.origin.z, 1.0),
        )
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_lh(self.origin, self.forward(), self.up())
    }

    /// Get the projection matrix (camera → clip space, depth in [0, 1])
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_angle.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Primary-ray generator for a `width` x `height` image.
    pub fn pixel_rays(&self, width: u32, height: u32) -> PixelRays {
        let fov = self.fov_scale();
        PixelRays {
            origin: self.origin,
            camera_to_world: self.camera_to_world(),
            scale_x: self.aspect * fov,
            scale_y: fov,
            width: width as f32,
            height: height as f32,
        }
    }

    /// World-space direction of the primary ray through the center of pixel (px, py).
    pub fn pixel_direction(&self, px: u32, py: u32, width: u32, height: u32) -> Vec3 {
        self.pixel_rays(width, height).direction(px, py)
    }
}

/// Camera basis and image-plane scale, computed once per frame.
#[derive(Debug, Clone, Copy)]
pub struct PixelRays {
    pub origin: Vec3,
    camera_to_world: Mat4,
    scale_x: f32,
    scale_y: f32,
    width: f32,
    height: f32,
}

impl PixelRays {
    /// Normalized direction through the center of pixel (px, py).
    #[inline]
    pub fn direction(&self, px: u32, py: u32) -> Vec3 {
        let cx = (2.0 * (px as f32 + 0.5) / self.width - 1.0) * self.scale_x;
        let cy = (1.0 - 2.0 * (py as f32 + 0.5) / self.height) * self.scale_y;

        self.camera_to_world
            .transform_vector3(Vec3::new(cx, cy, 1.0))
            .normalize()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 45.0, 1.0)
    }
}
