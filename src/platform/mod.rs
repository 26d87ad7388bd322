pub mod frame_clock;
pub mod image_host;
pub mod renderer;
pub mod renderer_cairo;
pub mod resize_throttle;
pub mod window_x11;

#[cfg(test)]
pub mod recording;
