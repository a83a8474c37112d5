//! Coordinate and geometry types shared across engine renderers and UI.
//!
//! Spaces:
//! - [`Pixel`]: integer texels inside a drawable
//! - [`Screen`]: logical window pixels, origin top-left, +Y down
//! - [`World`]: game units, +Y up
//! - [`Ui`]: container-relative [`Length`]s, resolved against a screen rect
//!
//! Renderers convert screen coordinates to NDC in shaders using a viewport uniform.

mod length;
mod point;
mod rect;
mod space;
mod ui;
mod vector;
mod viewport;

pub use length::Length;
pub use point::Point;
pub use rect::Rect;
pub use space::{Pixel, Screen, Space, Ui, World};
pub use vector::Vector;
pub use viewport::Viewport;

pub type PixelPoint = Point<Pixel>;
pub type PixelVector = Vector<Pixel>;
pub type PixelRect = Rect<Pixel>;

pub type ScreenPoint = Point<Screen>;
pub type ScreenVector = Vector<Screen>;
pub type ScreenRect = Rect<Screen>;

pub type WorldPoint = Point<World>;
pub type WorldVector = Vector<World>;
pub type WorldRect = Rect<World>;

pub type UiPoint = Point<Ui>;
pub type UiVector = Vector<Ui>;
pub type UiRect = Rect<Ui>;
