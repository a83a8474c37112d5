//! Font loading and text rasterization (fontdue).

mod font;

pub use font::Font;
