//! mailshell - a desktop shell around a terminal mail client
//!
//! Main entry point for the application.

use anyhow::{Context, Result};
use gpui::*;
use gpui_component_assets::Assets;
use mailshell_workspace::ShellView;
use once_cell::sync::Lazy;
use settings::constants::window::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use settings::{Config, Layout};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Application startup time for performance monitoring
static STARTUP_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Check if debug mode is enabled via environment variable.
fn is_debug_mode() -> bool {
    std::env::var("MAILSHELL_DEBUG").is_ok()
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(debug_mode: bool) -> &'static str {
    if debug_mode {
        "mailshell=trace,commands=trace,gpui=debug,info"
    } else {
        "mailshell=info,mailshell_workspace=info,commands=info,settings=info,terminal=info,\
         terminal_view=info,warn"
    }
}

/// Initialize the logging system.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let debug_mode = is_debug_mode();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug_mode)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(filter)
        .init();

    if debug_mode {
        info!(
            "mailshell v{} starting up (DEBUG MODE ENABLED)",
            env!("CARGO_PKG_VERSION")
        );
        info!("Set RUST_LOG for custom log levels, e.g. RUST_LOG=commands=trace");
    } else {
        info!("mailshell v{} starting up", env!("CARGO_PKG_VERSION"));
    }
}

/// Create the config directory and a commented default config.
fn init_paths() -> Result<()> {
    mailshell_paths::ensure_dirs().context("Failed to create the mailshell config directory")?;
    if settings::ensure_config_file().is_none() {
        warn!("Could not create default config file");
    }
    debug!("Initialized paths - config: {:?}", mailshell_paths::config_dir());
    Ok(())
}

/// Compute a centered origin for the given window size on the primary display.
fn centered_origin(w: f32, h: f32, cx: &mut App) -> Point<Pixels> {
    if let Some(display) = cx.primary_display() {
        let screen = display.bounds();
        let x = (f32::from(screen.size.width) - w) / 2.0;
        let y = (f32::from(screen.size.height) - h) / 2.0;
        Point::new(px(x.max(0.0)), px(y.max(0.0)))
    } else {
        Point::default()
    }
}

/// Linux: native or app-drawn decorations for Wayland/X11 compositors.
#[cfg(target_os = "linux")]
fn window_decorations(config: &Config) -> Option<WindowDecorations> {
    match config.linux_decorations.as_deref() {
        Some("client") => Some(WindowDecorations::Client),
        _ => Some(WindowDecorations::Server),
    }
}

#[cfg(not(target_os = "linux"))]
fn window_decorations(_config: &Config) -> Option<WindowDecorations> {
    None
}

fn build_titlebar_options(layout: &Layout, config: &Config) -> TitlebarOptions {
    let appears_transparent =
        cfg!(target_os = "linux") && config.linux_decorations.as_deref() == Some("client");

    TitlebarOptions {
        title: Some(layout.window.title.clone().into()),
        appears_transparent,
        ..Default::default()
    }
}

fn build_window_options(layout: &Layout, config: &Config, cx: &mut App) -> WindowOptions {
    let w = config.window_width.unwrap_or(DEFAULT_WIDTH);
    let h = config.window_height.unwrap_or(DEFAULT_HEIGHT);
    let bounds = Bounds {
        origin: centered_origin(w, h, cx),
        size: Size {
            width: px(w),
            height: px(h),
        },
    };

    WindowOptions {
        window_bounds: Some(if layout.window.maximized {
            WindowBounds::Maximized(bounds)
        } else {
            WindowBounds::Windowed(bounds)
        }),
        window_min_size: Some(Size {
            width: px(MIN_WIDTH),
            height: px(MIN_HEIGHT),
        }),
        titlebar: Some(build_titlebar_options(layout, config)),
        window_decorations: window_decorations(config),
        ..Default::default()
    }
}

/// Open the main application window.
fn open_main_window(layout: &Layout, config: &Config, cx: &mut App) -> Result<()> {
    let options = build_window_options(layout, config, cx);
    cx.open_window(options, |window, cx| {
        let shell = cx.new(|cx| ShellView::new(layout, config, window, cx));
        cx.new(|cx| gpui_component::Root::new(shell, window, cx))
    })
    .context("Failed to open main window")?;

    info!("Main window opened in {:?}", STARTUP_TIME.elapsed());
    Ok(())
}

/// Initialize subsystems.
fn initialize_subsystems(cx: &mut App) {
    gpui_component::init(cx);
    debug!("UI components initialized");

    cx.bind_keys(mailshell_workspace::keybindings());

    // One window, one session: closing it ends the application
    cx.on_window_closed(|cx| {
        if cx.windows().is_empty() {
            info!("Main window closed, quitting");
            cx.quit();
        }
    })
    .detach();
}

fn main() {
    let _ = *STARTUP_TIME;

    init_logging();

    if let Err(e) = init_paths() {
        error!("Failed to initialize paths: {:#}", e);
    }

    let config = settings::load_config();
    let layout = match settings::load_layout() {
        Ok(layout) => layout,
        Err(e) => {
            error!("Failed to load layout: {:#}", e);
            eprintln!("mailshell: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = Application::new().with_assets(Assets);

    app.run(move |cx: &mut App| {
        cx.activate(true);
        initialize_subsystems(cx);

        if let Err(e) = open_main_window(&layout, &config, cx) {
            error!("Failed to open main window: {:#}", e);
            cx.quit();
        }

        info!(
            "Application fully initialized in {:?}",
            STARTUP_TIME.elapsed()
        );
    });
}
