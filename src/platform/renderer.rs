/// Abstract drawing surface.

use crate::core::error::Result;
use crate::core::types::{Color, Size, Vec2};

pub trait Renderer {
    fn begin_frame(&mut self, width: i32, height: i32);
    /// Finish the frame, reporting any error the backend accumulated.
    fn end_frame(&mut self) -> Result<()>;

    /// Match the backing store to new surface dimensions.
    fn resize(&mut self, width: i32, height: i32) -> Result<()>;

    // Primitives
    fn clear(&self, color: Color);
    fn draw_line(&self, from: Vec2, to: Vec2, color: Color, line_width: f64);
    fn fill_circle(&self, cx: f64, cy: f64, radius: f64, color: Color);

    // Soft glow around a circle, fading out over `blur` pixels
    fn draw_glow(&self, cx: f64, cy: f64, radius: f64, color: Color, blur: f64);
}

/// Something that owns the page a backdrop surface is attached to.
pub trait SurfaceHost {
    type Surface: Renderer;

    fn viewport_size(&self) -> Size;

    /// Create a surface covering the viewport, layered behind page content.
    fn attach_surface(&mut self, size: Size) -> Result<Self::Surface>;

    /// Remove a surface from the page and release it.
    fn detach_surface(&mut self, surface: Self::Surface);
}
