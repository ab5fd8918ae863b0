//! Registration points: the fractional pivot a sprite's geometry hangs from.

/// Fractional pivot in the sprite's own size, y-up: `x` 0 is the left edge
/// and 1 the right, `y` 0 is the bottom edge and 1 the top. The pivot maps
/// to the sprite's local origin, so it is what `x`/`y` position and what
/// rotation and scaling happen around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegistrationPoint {
    pub x: f32,
    pub y: f32,
}

impl RegistrationPoint {
    pub const TOP_LEFT: RegistrationPoint = RegistrationPoint { x: 0.0, y: 1.0 };
    pub const TOP: RegistrationPoint = RegistrationPoint { x: 0.5, y: 1.0 };
    pub const TOP_RIGHT: RegistrationPoint = RegistrationPoint { x: 1.0, y: 1.0 };
    pub const LEFT: RegistrationPoint = RegistrationPoint { x: 0.0, y: 0.5 };
    pub const CENTER: RegistrationPoint = RegistrationPoint { x: 0.5, y: 0.5 };
    pub const RIGHT: RegistrationPoint = RegistrationPoint { x: 1.0, y: 0.5 };
    pub const BOTTOM_LEFT: RegistrationPoint = RegistrationPoint { x: 0.0, y: 0.0 };
    pub const BOTTOM: RegistrationPoint = RegistrationPoint { x: 0.5, y: 0.0 };
    pub const BOTTOM_RIGHT: RegistrationPoint = RegistrationPoint { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same constructor for callers thinking in top-down (screen) fractions.
    pub fn from_top_down(x: f32, y: f32) -> Self {
        Self { x, y: 1.0 - y }
    }
}

impl Default for RegistrationPoint {
    fn default() -> Self {
        RegistrationPoint::CENTER
    }
}
