/// The simulated particle population and the surface it lives on.

use crate::core::config;
use crate::core::types::*;
use crate::field::particle::Particle;
use rand::Rng;

/// Population size for a surface: one particle per `AREA_PER_PARTICLE`
/// square pixels, capped at `MAX_PARTICLES`. Degenerate sizes get none.
pub fn particle_count(size: Size) -> usize {
    let raw = (size.area() / config::AREA_PER_PARTICLE).floor() as usize;
    raw.min(config::MAX_PARTICLES)
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    size: Size,
    particles: Vec<Particle>,
    // Bumped each time the population is replaced.
    generation: u64,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a new surface size and replace the whole population.
    pub fn resize<R: Rng + ?Sized>(&mut self, size: Size, rng: &mut R) {
        self.size = size;
        self.regenerate(rng);
    }

    /// Discard every particle and spawn a fresh population for the current size.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let size = self.size;
        self.particles = (0..particle_count(size))
            .map(|_| Particle::spawn(&mut *rng, size))
            .collect();
        self.generation += 1;
    }

    /// Advance every particle by one frame.
    pub fn update(&mut self) {
        let size = self.size;
        for particle in &mut self.particles {
            particle.update(size);
        }
    }

    #[cfg(test)]
    pub fn links(&self) -> impl Iterator<Item = crate::field::link::Link> + '_ {
        crate::field::link::find_links(&self.particles)
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
