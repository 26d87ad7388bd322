/// X11 window hosting the backdrop surface.

use crate::core::error::{BackdropError, Result};
use crate::core::types::{ResizeEvent, Size};
use crate::platform::renderer::SurfaceHost;
use crate::platform::renderer_cairo::RendererCairo;
use std::ffi::CString;
use std::ptr;
use x11::xlib;

pub struct WindowX11 {
    display: *mut xlib::Display,
    window: xlib::Window,
    width: i32,
    height: i32,
    wm_delete_window: xlib::Atom,
    should_close: bool,
    screen: i32,

    // Pending size changes for external consumption
    pending_resize_events: Vec<ResizeEvent>,
}

impl WindowX11 {
    pub fn new() -> Self {
        Self {
            display: ptr::null_mut(),
            window: 0,
            width: 0,
            height: 0,
            wm_delete_window: 0,
            should_close: false,
            screen: 0,
            pending_resize_events: Vec::new(),
        }
    }

    pub fn create(&mut self, width: i32, height: i32, title: &str) -> Result<()> {
        let title_c = CString::new(title)
            .map_err(|e| BackdropError::SurfaceUnavailable(format!("bad window title: {}", e)))?;
        let wm_delete = CString::new("WM_DELETE_WINDOW")
            .map_err(|e| BackdropError::SurfaceUnavailable(e.to_string()))?;

        unsafe {
            self.display = xlib::XOpenDisplay(ptr::null());
            if self.display.is_null() {
                return Err(BackdropError::SurfaceUnavailable(
                    "failed to open X11 display".to_string(),
                ));
            }

            self.screen = xlib::XDefaultScreen(self.display);
            let root = xlib::XRootWindow(self.display, self.screen);

            self.window = xlib::XCreateSimpleWindow(
                self.display,
                root,
                0,
                0,
                width as u32,
                height as u32,
                0,
                xlib::XBlackPixel(self.display, self.screen),
                xlib::XBlackPixel(self.display, self.screen),
            );

            self.width = width;
            self.height = height;

            xlib::XStoreName(self.display, self.window, title_c.as_ptr());

            // Pointer and key events are not selected: the backdrop never
            // takes input away from whatever is stacked above it.
            xlib::XSelectInput(
                self.display,
                self.window,
                xlib::ExposureMask | xlib::StructureNotifyMask,
            );

            // WM_DELETE_WINDOW protocol
            self.wm_delete_window =
                xlib::XInternAtom(self.display, wm_delete.as_ptr(), xlib::False);
            xlib::XSetWMProtocols(
                self.display,
                self.window,
                &mut self.wm_delete_window as *mut _,
                1,
            );

            xlib::XMapWindow(self.display, self.window);
            xlib::XFlush(self.display);
        }

        Ok(())
    }

    /// Create a Cairo context drawing into the window at its current size.
    pub fn create_cairo_context(&self) -> Option<cairo::Context> {
        if self.display.is_null() {
            return None;
        }

        let surface = unsafe {
            let visual = xlib::XDefaultVisual(self.display, self.screen);
            let raw = cairo_sys::cairo_xlib_surface_create(
                self.display,
                self.window,
                visual,
                self.width,
                self.height,
            );
            // Takes over the creation reference; an error surface becomes Err
            cairo::Surface::from_raw_full(raw).ok()?
        };

        match cairo::Context::new(&surface) {
            Ok(cr) => Some(cr),
            Err(e) => {
                log::warn!("Cairo context for X11 window failed: {}", e);
                None
            }
        }
    }

    /// Process pending X11 events. Returns false if window should close.
    pub fn poll_events(&mut self) -> bool {
        if self.should_close || self.display.is_null() {
            return false;
        }

        unsafe {
            while xlib::XPending(self.display) > 0 {
                let mut event: xlib::XEvent = std::mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);

                match event.get_type() {
                    xlib::Expose => {}
                    xlib::ConfigureNotify => {
                        let configure = event.configure;
                        if configure.width != self.width || configure.height != self.height {
                            self.width = configure.width;
                            self.height = configure.height;
                            self.pending_resize_events.push(ResizeEvent {
                                width: configure.width,
                                height: configure.height,
                            });
                        }
                    }
                    xlib::ClientMessage => {
                        let cm = event.client_message;
                        if cm.data.get_long(0) as xlib::Atom == self.wm_delete_window {
                            self.should_close = true;
                            return false;
                        }
                    }
                    _ => {}
                }
            }
        }

        !self.should_close
    }

    /// Drain pending resize notifications.
    pub fn take_resize_events(&mut self) -> Vec<ResizeEvent> {
        std::mem::take(&mut self.pending_resize_events)
    }

    pub fn flush(&self) {
        if self.display.is_null() {
            return;
        }
        unsafe {
            xlib::XFlush(self.display);
        }
    }
}

impl Default for WindowX11 {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceHost for WindowX11 {
    type Surface = RendererCairo;

    fn viewport_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn attach_surface(&mut self, _size: Size) -> Result<RendererCairo> {
        self.create_cairo_context()
            .map(RendererCairo::new)
            .ok_or_else(|| {
                BackdropError::SurfaceUnavailable("failed to create Cairo context".to_string())
            })
    }

    fn detach_surface(&mut self, surface: RendererCairo) {
        drop(surface);
        if self.display.is_null() {
            return;
        }
        unsafe {
            xlib::XClearWindow(self.display, self.window);
            xlib::XFlush(self.display);
        }
    }
}

impl Drop for WindowX11 {
    fn drop(&mut self) {
        if self.display.is_null() {
            return;
        }
        unsafe {
            xlib::XDestroyWindow(self.display, self.window);
            xlib::XCloseDisplay(self.display);
        }
        self.display = ptr::null_mut();
    }
}
