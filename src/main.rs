mod core;
mod field;
mod platform;

use crate::core::config;
use crate::core::error::{BackdropError, Result};
use crate::core::types::Size;
use crate::field::field_animator::ParticleFieldAnimator;
use crate::platform::frame_clock::FrameClock;
use crate::platform::image_host::ImageHost;
use crate::platform::renderer_cairo::RendererCairo;
use crate::platform::resize_throttle::ResizeThrottle;
use crate::platform::window_x11::WindowX11;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

struct Args {
    width: i32,
    height: i32,
    seed: Option<u64>,
    frame_ms: u64,
    resize_throttle_ms: u64,
    snapshot: Option<PathBuf>,
    frames: u32,
}

fn parse_args(argv: &[String]) -> Args {
    let mut args = Args {
        width: config::DEFAULT_WIDTH,
        height: config::DEFAULT_HEIGHT,
        seed: None,
        frame_ms: config::FRAME_INTERVAL_MS,
        resize_throttle_ms: config::RESIZE_THROTTLE_MS,
        snapshot: None,
        frames: 60,
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--width" if i + 1 < argv.len() => {
                i += 1;
                args.width = parse_number(&argv[i], "--width").unwrap_or(args.width);
            }
            "--height" if i + 1 < argv.len() => {
                i += 1;
                args.height = parse_number(&argv[i], "--height").unwrap_or(args.height);
            }
            "--seed" if i + 1 < argv.len() => {
                i += 1;
                args.seed = parse_number(&argv[i], "--seed");
            }
            "--frame-ms" if i + 1 < argv.len() => {
                i += 1;
                args.frame_ms = parse_number(&argv[i], "--frame-ms").unwrap_or(args.frame_ms);
            }
            "--resize-throttle-ms" if i + 1 < argv.len() => {
                i += 1;
                args.resize_throttle_ms = parse_number(&argv[i], "--resize-throttle-ms")
                    .unwrap_or(args.resize_throttle_ms);
            }
            "--snapshot" if i + 1 < argv.len() => {
                i += 1;
                args.snapshot = Some(PathBuf::from(&argv[i]));
            }
            "--frames" if i + 1 < argv.len() => {
                i += 1;
                args.frames = parse_number(&argv[i], "--frames").unwrap_or(args.frames);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => log::warn!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    args
}

/// Parse a flag value, warning and yielding `None` when it is malformed.
fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Option<T> {
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("Invalid value for {}: {:?}", flag, value);
            None
        }
    }
}

fn print_usage() {
    eprintln!("Usage: particle-backdrop [--width <px>] [--height <px>] [--seed <n>]");
    eprintln!("                         [--frame-ms <ms>] [--resize-throttle-ms <ms>]");
    eprintln!("       particle-backdrop --snapshot <out.png> [--frames <n>] [--width <px>] [--height <px>]");
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let result = match &args.snapshot {
        Some(path) => run_snapshot(&args, path, rng),
        None => run_window(&args, rng),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Render a fixed number of frames off-screen and save the last one.
fn run_snapshot(args: &Args, path: &Path, rng: StdRng) -> Result<()> {
    let size = Size::new(args.width, args.height);
    if !size.is_positive() {
        return Err(BackdropError::InvalidDimensions {
            width: args.width,
            height: args.height,
        });
    }

    let mut host = ImageHost::new(size);
    let mut clock = FrameClock::new(Duration::ZERO);
    let mut animator: ParticleFieldAnimator<RendererCairo, StdRng> =
        ParticleFieldAnimator::new(rng);

    animator.start(&mut host, &mut clock)?;
    for _ in 0..args.frames {
        if let Some(handle) = clock.poll(Instant::now()) {
            animator.on_frame(handle, &mut host, &mut clock);
        }
    }

    let written = match animator.surface() {
        Some(surface) => surface.write_png(path),
        None => Err(BackdropError::Snapshot("no surface attached".to_string())),
    };
    let particle_count = animator.particles().len();
    animator.stop(&mut host, &mut clock);
    written?;

    log::info!(
        "Wrote {} with {} particles after {} frames ({} failed)",
        path.display(),
        particle_count,
        animator.frames_rendered(),
        animator.frames_failed()
    );
    Ok(())
}

/// Run the backdrop in a native window until it is closed.
fn run_window(args: &Args, rng: StdRng) -> Result<()> {
    let started = Instant::now();

    let mut window = WindowX11::new();
    window.create(args.width, args.height, config::WINDOW_TITLE)?;

    let mut clock = FrameClock::new(Duration::from_millis(args.frame_ms));
    let mut throttle = ResizeThrottle::new(Duration::from_millis(args.resize_throttle_ms));
    let mut animator: ParticleFieldAnimator<RendererCairo, StdRng> =
        ParticleFieldAnimator::new(rng);

    animator.start(&mut window, &mut clock)?;
    log::info!(
        "Backdrop started in {:.2}ms",
        started.elapsed().as_secs_f64() * 1000.0
    );

    // Main loop
    loop {
        if !window.poll_events() {
            break;
        }

        let now = Instant::now();
        for event in window.take_resize_events() {
            throttle.notify(event.into(), now);
        }
        for size in throttle.take_ready(now) {
            if let Err(e) = animator.resize(size.width, size.height) {
                log::warn!("Ignoring resize to {}x{}: {}", size.width, size.height, e);
            }
        }

        if let Some(handle) = clock.poll(now) {
            animator.on_frame(handle, &mut window, &mut clock);
            window.flush();
        }

        std::thread::sleep(clock.time_until_next(Instant::now()).max(Duration::from_millis(1)));
    }

    animator.stop(&mut window, &mut clock);
    Ok(())
}
