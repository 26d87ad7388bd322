/// Off-screen host backed by Cairo image surfaces.

use crate::core::error::Result;
use crate::core::types::Size;
use crate::platform::renderer::SurfaceHost;
use crate::platform::renderer_cairo::RendererCairo;

pub struct ImageHost {
    viewport: Size,
    attached: bool,
}

impl ImageHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            attached: false,
        }
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl SurfaceHost for ImageHost {
    type Surface = RendererCairo;

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn attach_surface(&mut self, size: Size) -> Result<RendererCairo> {
        let renderer = RendererCairo::offscreen(size.width, size.height)?;
        self.attached = true;
        log::debug!("Attached {}x{} image surface", size.width, size.height);
        Ok(renderer)
    }

    fn detach_surface(&mut self, surface: RendererCairo) {
        drop(surface);
        self.attached = false;
    }
}
