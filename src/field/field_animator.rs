/// Particle-network backdrop: owns the surface, the field, and the frame loop.

use crate::core::config;
use crate::core::error::{BackdropError, Result};
use crate::core::types::*;
use crate::field::link::LinkRenderer;
use crate::field::particle::{Particle, ParticleRenderer};
use crate::field::particle_field::ParticleField;
use crate::platform::frame_clock::{FrameHandle, FrameScheduler};
use crate::platform::renderer::{Renderer, SurfaceHost};
use rand::Rng;

pub struct ParticleFieldAnimator<S: Renderer, R: Rng> {
    field: ParticleField,
    rng: R,

    // Attached drawing surface, present only while running
    surface: Option<S>,
    pending_frame: Option<FrameHandle>,
    running: bool,

    // Renderers
    link_renderer: LinkRenderer,
    particle_renderer: ParticleRenderer,

    // Counters
    frames_rendered: u64,
    frames_failed: u64,
}

impl<S: Renderer, R: Rng> ParticleFieldAnimator<S, R> {
    pub fn new(rng: R) -> Self {
        Self {
            field: ParticleField::new(),
            rng,
            surface: None,
            pending_frame: None,
            running: false,
            link_renderer: LinkRenderer::new(),
            particle_renderer: ParticleRenderer::new(),
            frames_rendered: 0,
            frames_failed: 0,
        }
    }

    /// Attach a viewport-sized surface, populate it, and schedule the first frame.
    ///
    /// If the host cannot provide a surface the animator stays stopped.
    pub fn start<H>(&mut self, host: &mut H, scheduler: &mut dyn FrameScheduler) -> Result<()>
    where
        H: SurfaceHost<Surface = S>,
    {
        if self.running {
            log::debug!("Backdrop already running");
            return Ok(());
        }

        let size = host.viewport_size();
        let surface = host.attach_surface(size)?;
        self.surface = Some(surface);
        self.field.resize(size, &mut self.rng);
        self.pending_frame = Some(scheduler.request_frame());
        self.running = true;

        log::info!(
            "Backdrop started at {}x{} with {} particles",
            size.width,
            size.height,
            self.field.particles().len()
        );
        Ok(())
    }

    /// Follow a viewport size change: resize the surface and respawn every particle.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        let size = Size::new(width, height);
        if !size.is_positive() {
            return Err(BackdropError::InvalidDimensions { width, height });
        }

        // The surface goes first so a rejected size leaves the field untouched.
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height)?;
        }

        self.field.resize(size, &mut self.rng);
        log::debug!(
            "Backdrop resized to {}x{}, {} particles (generation {})",
            width,
            height,
            self.field.particles().len(),
            self.field.generation()
        );
        Ok(())
    }

    /// Scheduler callback. Stale or cancelled handles are ignored.
    ///
    /// A failed frame does not end the loop: the surface is rebuilt through
    /// `host` and the next frame is scheduled as usual.
    pub fn on_frame<H>(
        &mut self,
        handle: FrameHandle,
        host: &mut H,
        scheduler: &mut dyn FrameScheduler,
    ) where
        H: SurfaceHost<Surface = S>,
    {
        if !self.running || self.pending_frame != Some(handle) {
            return;
        }
        self.pending_frame = None;

        if self.surface.is_none() {
            self.rebuild_surface(host);
        }

        match self.step() {
            Ok(()) => self.frames_rendered += 1,
            Err(e) => {
                self.frames_failed += 1;
                log::warn!("Backdrop frame failed: {}", e);
                // Backend errors are sticky; only a fresh surface clears them.
                self.rebuild_surface(host);
            }
        }

        self.pending_frame = Some(scheduler.request_frame());
    }

    /// Swap the current surface for a freshly attached one at the field's size.
    fn rebuild_surface<H>(&mut self, host: &mut H)
    where
        H: SurfaceHost<Surface = S>,
    {
        if let Some(old) = self.surface.take() {
            host.detach_surface(old);
        }

        let size = self.field.size();
        match host.attach_surface(size) {
            Ok(surface) => {
                log::debug!("Rebuilt backdrop surface at {}x{}", size.width, size.height);
                self.surface = Some(surface);
            }
            Err(e) => log::warn!("Backdrop surface unavailable, retrying next frame: {}", e),
        }
    }

    /// One tick: advance the simulation, then redraw links and particles.
    pub fn step(&mut self) -> Result<()> {
        self.field.update();

        let surface = match self.surface.as_mut() {
            Some(s) => s,
            None => return Ok(()),
        };

        let size = self.field.size();
        surface.begin_frame(size.width, size.height);
        surface.clear(Color::from_hex(config::PAGE_BG, 1.0));

        // Links first (behind particles)
        self.link_renderer.render(&*surface, self.field.particles());
        for particle in self.field.particles() {
            self.particle_renderer.render(&*surface, particle);
        }

        surface.end_frame()
    }

    /// Cancel the pending frame and detach the surface. Safe to call repeatedly.
    pub fn stop<H>(&mut self, host: &mut H, scheduler: &mut dyn FrameScheduler)
    where
        H: SurfaceHost<Surface = S>,
    {
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        if let Some(surface) = self.surface.take() {
            host.detach_surface(surface);
        }
        self.field.clear();

        if self.running {
            self.running = false;
            log::info!(
                "Backdrop stopped after {} frames ({} failed)",
                self.frames_rendered,
                self.frames_failed
            );
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    #[cfg(test)]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[cfg(test)]
    pub fn size(&self) -> Size {
        self.field.size()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn frames_failed(&self) -> u64 {
        self.frames_failed
    }
}

impl<S: Renderer, R: Rng> Drop for ParticleFieldAnimator<S, R> {
    fn drop(&mut self) {
        if self.running {
            log::warn!("Backdrop dropped while running; call stop() to detach it from its host");
        }
    }
}
