use super::ScreenRect;

/// Drawable area of a window in logical pixels.
///
/// Renderers upload this as the basis for the logical-px → NDC conversion;
/// the UI layer uses [`Viewport::bounds`] as the root container rectangle.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// The whole viewport as a screen rectangle anchored at the origin.
    #[inline]
    pub fn bounds(self) -> ScreenRect {
        ScreenRect::new(0.0, 0.0, self.width, self.height)
    }
}
