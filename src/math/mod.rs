//! Plain value math types shared by components, collision queries and draw calls.

pub mod color;
pub mod rect;
pub mod vec2;

pub use color::Color;
pub use rect::Rect;
pub use vec2::Vec2;
