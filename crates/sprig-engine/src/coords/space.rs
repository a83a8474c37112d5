use std::fmt::Debug;

use super::Length;

/// Coordinate space tag.
///
/// Every geometric primitive is parameterized by a space so values from
/// different spaces cannot be combined without an explicit projection.
pub trait Space: Copy + Clone + Debug + Default + PartialEq + 'static {
    /// Per-axis component type.
    type Scalar: Copy + Debug + Default + PartialEq;
}

/// Integer texel coordinates inside a drawable.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixel;

/// Logical window pixels, origin top-left, +Y down.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Screen;

/// Game-world units, +Y up.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct World;

/// Positions relative to a container, expressed as [`Length`]s.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ui;

impl Space for Pixel {
    type Scalar = i32;
}

impl Space for Screen {
    type Scalar = f32;
}

impl Space for World {
    type Scalar = f32;
}

impl Space for Ui {
    type Scalar = Length;
}
