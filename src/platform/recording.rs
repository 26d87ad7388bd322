/// In-memory surface and host for exercising the field without a display.

use crate::core::error::{BackdropError, Result};
use crate::core::types::{Color, Size, Vec2};
use crate::platform::renderer::{Renderer, SurfaceHost};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Begin { width: i32, height: i32 },
    End,
    Resize { width: i32, height: i32 },
    Clear,
    Line { from: Vec2, to: Vec2, alpha: f64 },
    Circle { x: f64, y: f64, radius: f64, alpha: f64 },
    Glow { x: f64, y: f64, radius: f64, blur: f64 },
}

/// Renderer that logs every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Rc<RefCell<Vec<DrawCall>>>,
    fail_frames: Rc<Cell<bool>>,
    fail_until_rebuilt: Rc<Cell<bool>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Make `end_frame` report a render error until switched off.
    pub fn set_fail_frames(&self, fail: bool) {
        self.fail_frames.set(fail);
    }

    /// Fail every frame until a host hands this surface out again,
    /// like a Cairo context stuck in an error state.
    pub fn break_until_rebuilt(&self) {
        self.fail_until_rebuilt.set(true);
    }

    fn push(&self, call: DrawCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, width: i32, height: i32) {
        self.push(DrawCall::Begin { width, height });
    }

    fn end_frame(&mut self) -> Result<()> {
        self.push(DrawCall::End);
        if self.fail_frames.get() || self.fail_until_rebuilt.get() {
            return Err(cairo::Error::SurfaceFinished.into());
        }
        Ok(())
    }

    fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        self.push(DrawCall::Resize { width, height });
        Ok(())
    }

    fn clear(&self, _color: Color) {
        self.push(DrawCall::Clear);
    }

    fn draw_line(&self, from: Vec2, to: Vec2, color: Color, _line_width: f64) {
        self.push(DrawCall::Line {
            from,
            to,
            alpha: color.a,
        });
    }

    fn fill_circle(&self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.push(DrawCall::Circle {
            x: cx,
            y: cy,
            radius,
            alpha: color.a,
        });
    }

    fn draw_glow(&self, cx: f64, cy: f64, radius: f64, _color: Color, blur: f64) {
        self.push(DrawCall::Glow {
            x: cx,
            y: cy,
            radius,
            blur,
        });
    }
}

/// Host handing out [`RecordingRenderer`]s that share one log.
pub struct RecordingHost {
    pub viewport: Size,
    pub surface: RecordingRenderer,
    pub attached: bool,
    pub attach_count: usize,
    pub detach_count: usize,
    pub unavailable: bool,
}

impl RecordingHost {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            viewport: Size::new(width, height),
            surface: RecordingRenderer::new(),
            attached: false,
            attach_count: 0,
            detach_count: 0,
            unavailable: false,
        }
    }
}

impl SurfaceHost for RecordingHost {
    type Surface = RecordingRenderer;

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn attach_surface(&mut self, _size: Size) -> Result<RecordingRenderer> {
        if self.unavailable {
            return Err(BackdropError::SurfaceUnavailable("no canvas".to_string()));
        }
        self.attached = true;
        self.attach_count += 1;
        self.surface.fail_until_rebuilt.set(false);
        Ok(self.surface.clone())
    }

    fn detach_surface(&mut self, _surface: RecordingRenderer) {
        self.attached = false;
        self.detach_count += 1;
    }
}
