/// Glyph cell edge, in logical pixels.
pub const DEFAULT_CELL_SIZE: u32 = 14;
pub const DEFAULT_SPEED: f32 = 50.0;
pub const DEFAULT_DENSITY: f32 = 25.0;

/// Constructor-level options for the rain layer.
///
/// `speed` and `density` are accepted and kept for callers that set them, but
/// neither changes frame timing or column layout yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainOptions {
    pub speed: f32,
    pub density: f32,
    /// Width and height of one glyph cell in logical units.
    pub cell_size: u32,
}

impl Default for RainOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            density: DEFAULT_DENSITY,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl RainOptions {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// A zero cell size is bumped to 1.
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    /// Number of glyph columns that fit in `width` logical units.
    pub fn column_count(&self, width: u32) -> usize {
        (width / self.cell_size.max(1)) as usize
    }
}

/// Logical viewport size plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    /// Non-positive or non-finite ratios fall back to 1.
    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        self
    }

    /// Device-pixel size of the backing store.
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f32 * self.pixel_ratio) as u32;
        (scale(self.width), scale(self.height))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
