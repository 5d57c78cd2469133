use crate::{camera::CameraConfig, input::Controls, world::GridConfig};

/// Everything the viewer needs at start-up. Values are compiled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub grid: GridConfig,
    pub controls: Controls,
    pub window_scale: u32, // window pixels per raster pixel
    pub frames_per_second: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            grid: GridConfig::default(),
            controls: Controls::default(),
            window_scale: 5,
            frames_per_second: 60,
        }
    }
}

impl ViewerConfig {
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.camera.surface_width * self.window_scale.max(1),
            self.camera.surface_height * self.window_scale.max(1),
        )
    }
}
