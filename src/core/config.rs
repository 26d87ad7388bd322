/// Visual and behavioral constants.

// --- Visual colors (hex) ---
pub const PAGE_BG: u32 = 0x0F0F23;
pub const LINK_COLOR: u32 = 0x3B82F6;
pub const PARTICLE_COLOR: u32 = 0x60A5FA;

// --- Population ---
pub const MAX_PARTICLES: usize = 80;
pub const AREA_PER_PARTICLE: f64 = 15000.0;

// --- Particle spawn ranges ---
pub const MAX_SPEED: f64 = 0.25;
pub const RADIUS_MIN: f64 = 1.0;
pub const RADIUS_MAX: f64 = 3.0;

// --- Links ---
pub const LINK_DISTANCE: f64 = 120.0;
pub const LINK_MAX_OPACITY: f64 = 0.2;
pub const LINK_WIDTH: f64 = 1.0;

// --- Particle look ---
pub const PARTICLE_ALPHA: f64 = 0.6;
pub const GLOW_ALPHA: f64 = 0.5;
pub const GLOW_BLUR: f64 = 10.0;

// --- Scheduling ---
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const RESIZE_THROTTLE_MS: u64 = 0;

// --- Window ---
pub const DEFAULT_WIDTH: i32 = 1280;
pub const DEFAULT_HEIGHT: i32 = 720;
pub const WINDOW_TITLE: &str = "Particle Backdrop";
