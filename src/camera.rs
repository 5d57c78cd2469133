use crate::error::CameraError;

/// Smallest depth scale the camera accepts. Anything below is rejected.
pub const MIN_DEPTH_SCALE: f32 = 0.1;

/// Construction-time camera parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,   // radians
    pub pitch: f32, // radians
    pub roll: f32,  // radians, applied in screen space
    pub projection_distance: f32,
    pub depth_scale: f32,
    pub draw_limit: f32,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            projection_distance: 10.0,
            depth_scale: 4.0,
            draw_limit: 60.0,
            surface_width: 160,
            surface_height: 120,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<(), CameraError> {
        let scalars = [
            ("yaw", self.yaw),
            ("pitch", self.pitch),
            ("roll", self.roll),
            ("projection_distance", self.projection_distance),
            ("depth_scale", self.depth_scale),
            ("draw_limit", self.draw_limit),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CameraError::InvalidConfiguration(format!(
                "{name} must be finite"
            )));
        }
        if self.position.iter().any(|c| !c.is_finite()) {
            return Err(CameraError::InvalidConfiguration(
                "position must be finite".into(),
            ));
        }
        if self.draw_limit <= 0.0 {
            return Err(CameraError::InvalidConfiguration(format!(
                "draw_limit must be positive, got {}",
                self.draw_limit
            )));
        }
        if self.projection_distance <= 0.0 {
            return Err(CameraError::InvalidConfiguration(format!(
                "projection_distance must be positive, got {}",
                self.projection_distance
            )));
        }
        if self.depth_scale < MIN_DEPTH_SCALE {
            return Err(CameraError::InvalidConfiguration(format!(
                "depth_scale must be at least {MIN_DEPTH_SCALE}, got {}",
                self.depth_scale
            )));
        }
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(CameraError::InvalidConfiguration(format!(
                "surface must be non-empty, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        Ok(())
    }
}

/// Sine/cosine of the current camera angles.
///
/// Only [`Camera::rotate`] writes this, so it always matches the angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationCache {
    pub cos_yaw: f32,
    pub sin_yaw: f32,
    pub cos_pitch: f32,
    pub sin_pitch: f32,
    pub cos_roll: f32,
    pub sin_roll: f32,
}

impl RotationCache {
    fn from_angles(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        let (sin_roll, cos_roll) = roll.sin_cos();
        Self {
            cos_yaw,
            sin_yaw,
            cos_pitch,
            sin_pitch,
            cos_roll,
            sin_roll,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: [f32; 3], // world space
    yaw: f32,           // about the vertical axis
    pitch: f32,         // about the horizontal axis
    roll: f32,          // screen-space tilt
    projection_distance: f32,
    depth_scale: f32, // divides rotated depth, never below MIN_DEPTH_SCALE
    draw_limit: f32,
    surface_width: u32,
    surface_height: u32,
    rotation: RotationCache,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;

        let mut camera = Self {
            position: config.position,
            yaw: config.yaw,
            pitch: config.pitch,
            roll: config.roll,
            projection_distance: config.projection_distance,
            depth_scale: config.depth_scale,
            draw_limit: config.draw_limit,
            surface_width: config.surface_width,
            surface_height: config.surface_height,
            rotation: RotationCache::from_angles(0.0, 0.0, 0.0),
        };
        // Populate the cache from the configured angles
        camera.rotate(0.0, 0.0, 0.0);
        Ok(camera)
    }

    #[inline]
    pub fn translate(&mut self, delta: [f32; 3]) {
        self.position[0] += delta[0];
        self.position[1] += delta[1];
        self.position[2] += delta[2];
    }

    /// Adds the deltas to the angles and recomputes every cached sine/cosine,
    /// even when all deltas are zero.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32, d_roll: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
        self.roll += d_roll;
        self.rotation = RotationCache::from_angles(self.yaw, self.pitch, self.roll);
    }

    /// Changes the depth scale by `delta`. A result that is not finite or
    /// falls below [`MIN_DEPTH_SCALE`] is rejected and the scale is left as is.
    pub fn adjust_depth_scale(&mut self, delta: f32) -> Result<(), CameraError> {
        let next = self.depth_scale + delta;
        if !next.is_finite() || next < MIN_DEPTH_SCALE {
            return Err(CameraError::InvalidConfiguration(format!(
                "depth_scale {} + {delta} would drop below {MIN_DEPTH_SCALE}",
                self.depth_scale
            )));
        }
        self.depth_scale = next;
        Ok(())
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn depth_scale(&self) -> f32 {
        self.depth_scale
    }

    pub fn projection_distance(&self) -> f32 {
        self.projection_distance
    }

    pub fn draw_limit(&self) -> f32 {
        self.draw_limit
    }

    /// (width, height) of the raster the camera projects onto.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_width, self.surface_height)
    }

    #[inline]
    pub fn rotation(&self) -> &RotationCache {
        &self.rotation
    }

    #[inline]
    pub fn screen_center(&self) -> (f32, f32) {
        (
            0.5 * self.surface_width as f32,
            0.5 * self.surface_height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn new_populates_rotation_cache_from_config_angles() {
        let camera = Camera::new(CameraConfig {
            yaw: FRAC_PI_2,
            ..CameraConfig::default()
        })
        .unwrap();

        let r = camera.rotation();
        assert!((r.sin_yaw - 1.0).abs() < 1e-6);
        assert!(r.cos_yaw.abs() < 1e-6);
        assert_eq!(r.cos_pitch, 1.0);
        assert_eq!(r.sin_roll, 0.0);
    }

    #[test]
    fn rotate_accumulates_angles_and_refreshes_cache() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        camera.rotate(0.25, -0.5, 1.0);
        camera.rotate(0.25, 0.0, 0.0);

        assert_eq!(camera.yaw(), 0.5);
        assert_eq!(camera.pitch(), -0.5);
        assert_eq!(camera.roll(), 1.0);

        let r = camera.rotation();
        assert_eq!(r.sin_yaw, 0.5f32.sin());
        assert_eq!(r.cos_pitch, (-0.5f32).cos());
        assert_eq!(r.sin_roll, 1.0f32.sin());
    }

    #[test]
    fn rotate_by_zero_changes_nothing() {
        let mut camera = Camera::new(CameraConfig {
            yaw: 1.3,
            pitch: -0.7,
            roll: 0.2,
            ..CameraConfig::default()
        })
        .unwrap();
        let before = *camera.rotation();

        camera.rotate(0.0, 0.0, 0.0);

        assert_eq!(*camera.rotation(), before);
        assert_eq!(camera.yaw(), 1.3);
        assert_eq!(camera.pitch(), -0.7);
        assert_eq!(camera.roll(), 0.2);
    }

    #[test]
    fn large_angles_are_accepted() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        camera.rotate(1000.0, -1000.0, 0.0);
        assert!(camera.rotation().cos_yaw.is_finite());
        assert_eq!(camera.yaw(), 1000.0);
    }

    #[test]
    fn translate_moves_position_only() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        let before = *camera.rotation();

        camera.translate([1.0, -2.0, 3.5]);
        camera.translate([0.5, 0.0, -0.5]);

        assert_eq!(camera.position(), [1.5, -2.0, 3.0]);
        assert_eq!(*camera.rotation(), before);
    }

    #[test]
    fn depth_scale_adjustment_within_range_is_applied() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        camera.adjust_depth_scale(1.5).unwrap();
        assert_eq!(camera.depth_scale(), 5.5);
        camera.adjust_depth_scale(-5.0).unwrap();
        assert_eq!(camera.depth_scale(), 0.5);
    }

    #[test]
    fn depth_scale_cannot_reach_zero() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();

        let err = camera.adjust_depth_scale(-4.0).unwrap_err();
        assert!(matches!(err, CameraError::InvalidConfiguration(_)));
        assert_eq!(camera.depth_scale(), 4.0);

        assert!(camera.adjust_depth_scale(-10.0).is_err());
        assert!(camera.adjust_depth_scale(f32::NAN).is_err());
        assert_eq!(camera.depth_scale(), 4.0);
    }

    #[test]
    fn repeated_small_decrements_stop_at_minimum() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        for _ in 0..1000 {
            let _ = camera.adjust_depth_scale(-0.05);
        }
        assert!(camera.depth_scale() >= MIN_DEPTH_SCALE);
        assert!(camera.depth_scale() > 0.0);
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let bad = [
            CameraConfig {
                draw_limit: 0.0,
                ..CameraConfig::default()
            },
            CameraConfig {
                draw_limit: -5.0,
                ..CameraConfig::default()
            },
            CameraConfig {
                depth_scale: 0.0,
                ..CameraConfig::default()
            },
            CameraConfig {
                projection_distance: 0.0,
                ..CameraConfig::default()
            },
            CameraConfig {
                surface_width: 0,
                ..CameraConfig::default()
            },
            CameraConfig {
                surface_height: 0,
                ..CameraConfig::default()
            },
            CameraConfig {
                yaw: f32::INFINITY,
                ..CameraConfig::default()
            },
            CameraConfig {
                position: [0.0, f32::NAN, 0.0],
                ..CameraConfig::default()
            },
        ];

        for config in bad {
            assert!(Camera::new(config.clone()).is_err(), "{config:?}");
        }
    }

    #[test]
    fn accessors_reflect_config() {
        let camera = Camera::new(CameraConfig {
            position: [1.0, 2.0, 3.0],
            ..CameraConfig::default()
        })
        .unwrap();
        assert_eq!(camera.position(), [1.0, 2.0, 3.0]);
        assert_eq!(camera.projection_distance(), 10.0);
        assert_eq!(camera.draw_limit(), 60.0);
        assert_eq!(camera.surface_size(), (160, 120));
        assert_eq!(camera.screen_center(), (80.0, 60.0));
    }
}
