/// Cairo-based renderer implementation.

use crate::core::error::{BackdropError, Result};
use crate::core::types::{Color, Vec2};
use crate::platform::renderer::Renderer;
use cairo::{Context, Format, ImageSurface, Operator, RadialGradient, SurfaceType};
use std::f64::consts::PI;
use std::fs::File;
use std::path::Path;

pub struct RendererCairo {
    cr: Context,
}

impl RendererCairo {
    pub fn new(cr: Context) -> Self {
        Self { cr }
    }

    /// Renderer over a fresh off-screen ARGB image.
    pub fn offscreen(width: i32, height: i32) -> Result<Self> {
        let surface = ImageSurface::create(Format::ARgb32, width.max(0), height.max(0))?;
        Ok(Self::new(Context::new(&surface)?))
    }

    /// Write the current surface contents as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)?;
        self.cr.target().flush();
        self.cr
            .target()
            .write_to_png(&mut file)
            .map_err(|e| BackdropError::Snapshot(e.to_string()))
    }

    /// Read one premultiplied ARGB pixel from an image-backed surface.
    #[cfg(test)]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let surface = ImageSurface::try_from(self.cr.target()).ok()?;
        if x < 0 || y < 0 || x >= surface.width() || y >= surface.height() {
            return None;
        }
        let offset = y as usize * surface.stride() as usize + x as usize * 4;
        let mut pixel = None;
        surface
            .with_data(|data| {
                pixel = data
                    .get(offset..offset + 4)
                    .and_then(|b| <[u8; 4]>::try_from(b).ok())
                    .map(u32::from_ne_bytes);
            })
            .ok()?;
        pixel
    }

    fn set_color(&self, color: Color) {
        self.cr.set_source_rgba(color.r, color.g, color.b, color.a);
    }
}

impl Renderer for RendererCairo {
    fn begin_frame(&mut self, _width: i32, _height: i32) {
        self.cr.save().ok();
    }

    fn end_frame(&mut self) -> Result<()> {
        self.cr.restore().ok();
        self.cr.target().flush();
        self.cr.status()?;
        Ok(())
    }

    fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        let target = self.cr.target();
        match target.type_() {
            SurfaceType::Xlib => {
                // The xlib surface tracks the window; only its extent changes.
                unsafe {
                    cairo_sys::cairo_xlib_surface_set_size(target.to_raw_none(), width, height);
                }
                target.status()?;
            }
            _ => {
                // Image surfaces have a fixed extent, so swap in a new one.
                *self = Self::offscreen(width, height)?;
            }
        }
        Ok(())
    }

    fn clear(&self, color: Color) {
        self.cr.save().ok();
        self.cr.set_operator(Operator::Source);
        self.set_color(color);
        self.cr.paint().ok();
        self.cr.restore().ok();
    }

    fn draw_line(&self, from: Vec2, to: Vec2, color: Color, line_width: f64) {
        self.set_color(color);
        self.cr.set_line_width(line_width);
        self.cr.new_path();
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke().ok();
    }

    fn fill_circle(&self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.set_color(color);
        self.cr.new_path();
        self.cr.arc(cx, cy, radius, 0.0, 2.0 * PI);
        self.cr.fill().ok();
    }

    fn draw_glow(&self, cx: f64, cy: f64, radius: f64, color: Color, blur: f64) {
        // Radial falloff from the circle edge approximates a blurred shadow
        let outer = radius + blur;
        let gradient = RadialGradient::new(cx, cy, radius * 0.5, cx, cy, outer);
        gradient.add_color_stop_rgba(0.0, color.r, color.g, color.b, color.a);
        gradient.add_color_stop_rgba(1.0, color.r, color.g, color.b, 0.0);

        if self.cr.set_source(&gradient).is_err() {
            return;
        }
        self.cr.new_path();
        self.cr.arc(cx, cy, outer, 0.0, 2.0 * PI);
        self.cr.fill().ok();
    }
}
