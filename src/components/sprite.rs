//! Sprite component: texture reference plus rendering modifiers.

use crate::math::{Color, Rect, Vec2};
use crate::resources::texturestore::TextureHandle;

/// A 2D sprite: texture handle, tint, optional atlas sub-rect, optional
/// render-size override, flip flags and a normalized anchor point.
///
/// A pure value with two mutation styles: in-place `set_*` methods and
/// builder-style `with_*` twins. The `with_*` methods are thin copies over
/// the `set_*` primitives, so both styles always produce identical values.
///
/// The optional fields are flag-gated: readers must check
/// `has_source_rect`/`has_custom_size` (or use the [`source_rect`](Self::source_rect)
/// and [`custom_size`](Self::custom_size) accessors) instead of inferring
/// absence from zeroed numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// RGBA tint multiplied over the texture; opaque white is neutral.
    pub color: Color,
    pub source_rect: Rect,
    pub has_source_rect: bool,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Normalized pivot in [0,1]x[0,1]; (0,0) is top-left, (0.5,1.0) bottom-center.
    pub anchor: Vec2,
    pub custom_size: Vec2,
    pub has_custom_size: bool,
}

impl Sprite {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            ..Self::default()
        }
    }

    /// Source rectangle if one is set, `None` for the whole texture.
    #[inline]
    pub fn source_rect(&self) -> Option<Rect> {
        self.has_source_rect.then_some(self.source_rect)
    }

    /// Render-size override if one is set, `None` for the natural size.
    #[inline]
    pub fn custom_size(&self) -> Option<Vec2> {
        self.has_custom_size.then_some(self.custom_size)
    }

    // =========================================================================
    // In-place setters
    // =========================================================================

    #[inline]
    pub fn set_texture(&mut self, texture: TextureHandle) -> &mut Self {
        self.texture = texture;
        self
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn set_flip_x(&mut self, flip: bool) -> &mut Self {
        self.flip_x = flip;
        self
    }

    #[inline]
    pub fn set_flip_y(&mut self, flip: bool) -> &mut Self {
        self.flip_y = flip;
        self
    }

    #[inline]
    pub fn set_anchor(&mut self, x: f32, y: f32) -> &mut Self {
        self.anchor = Vec2::new(x, y);
        self
    }

    #[inline]
    pub fn set_source_rect(&mut self, rect: Rect) -> &mut Self {
        self.source_rect = rect;
        self.has_source_rect = true;
        self
    }

    /// Drops back to whole-texture rendering. Only the flag is reset; the
    /// stored rectangle keeps its last numbers.
    #[inline]
    pub fn clear_source_rect(&mut self) -> &mut Self {
        self.has_source_rect = false;
        self
    }

    #[inline]
    pub fn set_custom_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.custom_size = Vec2::new(width, height);
        self.has_custom_size = true;
        self
    }

    /// Drops back to the texture's natural size. Only the flag is reset.
    #[inline]
    pub fn clear_custom_size(&mut self) -> &mut Self {
        self.has_custom_size = false;
        self
    }

    // =========================================================================
    // Builder-style copies
    // =========================================================================

    #[inline]
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.set_texture(texture);
        self
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    #[inline]
    pub fn with_flip_x(mut self, flip: bool) -> Self {
        self.set_flip_x(flip);
        self
    }

    #[inline]
    pub fn with_flip_y(mut self, flip: bool) -> Self {
        self.set_flip_y(flip);
        self
    }

    #[inline]
    pub fn with_anchor(mut self, x: f32, y: f32) -> Self {
        self.set_anchor(x, y);
        self
    }

    #[inline]
    pub fn with_source_rect(mut self, rect: Rect) -> Self {
        self.set_source_rect(rect);
        self
    }

    #[inline]
    pub fn with_custom_size(mut self, width: f32, height: f32) -> Self {
        self.set_custom_size(width, height);
        self
    }
}

impl Default for Sprite {
    /// No texture, neutral white tint, no flips, top-left anchor.
    fn default() -> Self {
        Self {
            texture: TextureHandle::INVALID,
            color: Color::WHITE,
            source_rect: Rect::default(),
            has_source_rect: false,
            flip_x: false,
            flip_y: false,
            anchor: Vec2::ZERO,
            custom_size: Vec2::ZERO,
            has_custom_size: false,
        }
    }
}
