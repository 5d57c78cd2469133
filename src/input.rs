use std::collections::HashSet;
use std::f32::consts::PI;

use winit::keyboard::KeyCode;

use crate::camera::Camera;

/// Per-tick step sizes for keyboard camera control.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub move_step: f32, // world units per tick
    pub turn_step: f32, // radians per tick
    pub zoom_step: f32, // depth scale per tick
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_step: 0.1,
            turn_step: PI / 360.0,
            zoom_step: 0.05,
        }
    }
}

impl Controls {
    /// Applies one tick of held keys to the camera.
    ///
    /// W/S walk along the yaw heading, J/K move on y, arrows turn and tilt,
    /// Q/E roll, Z/X zoom out/in through the depth scale.
    pub fn apply(&self, keys: &HashSet<KeyCode>, camera: &mut Camera) {
        let held = |k: KeyCode| keys.contains(&k);
        let axis = |neg: KeyCode, pos: KeyCode| {
            let mut v = 0.0f32;
            if held(neg) {
                v -= 1.0;
            }
            if held(pos) {
                v += 1.0;
            }
            v
        };

        let fwd = axis(KeyCode::KeyS, KeyCode::KeyW);
        let rise = axis(KeyCode::KeyK, KeyCode::KeyJ); // +y is down on screen
        if fwd != 0.0 || rise != 0.0 {
            let (s, c) = (camera.rotation().sin_yaw, camera.rotation().cos_yaw);
            let step = self.move_step;
            camera.translate([fwd * step * s, rise * step, fwd * step * c]);
        }

        let d_yaw = axis(KeyCode::ArrowLeft, KeyCode::ArrowRight);
        let d_pitch = axis(KeyCode::ArrowUp, KeyCode::ArrowDown);
        let d_roll = axis(KeyCode::KeyQ, KeyCode::KeyE);
        if d_yaw != 0.0 || d_pitch != 0.0 || d_roll != 0.0 {
            let t = self.turn_step;
            camera.rotate(d_yaw * t, d_pitch * t, d_roll * t);
        }

        let zoom = axis(KeyCode::KeyZ, KeyCode::KeyX);
        if zoom != 0.0 {
            if let Err(e) = camera.adjust_depth_scale(zoom * self.zoom_step) {
                log::warn!("zoom ignored: {e}");
            }
        }
    }
}
