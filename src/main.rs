// Hide console window on Windows release builds
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use chatpad::app::ChatpadApp;
use chatpad::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };

    // CLI --log-level takes precedence, then RUST_LOG, then config (applied below)
    chatpad::debug::init_log_bridge(runtime_options.log_level);
    log::info!("Starting chatpad {}", chatpad::VERSION);

    let config = runtime_options.load_config();
    chatpad::debug::apply_config_level(config.log_level.to_level_filter());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([320.0, 240.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let title = config.window_title.clone();
    let result = eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(ChatpadApp::new(config)))),
    );

    log::info!("Event loop exited");

    if let Err(e) = result {
        eprintln!("chatpad: error: {e}");
        #[cfg(target_os = "linux")]
        {
            let msg = e.to_string().to_lowercase();
            if msg.contains("display") || msg.contains("wayland") || msg.contains("x11") {
                eprintln!(
                    "chatpad: hint: no display server found, ensure DISPLAY (X11) or \
                     WAYLAND_DISPLAY (Wayland) is set"
                );
            }
        }
        return Err(anyhow::anyhow!("{e}"));
    }
    Ok(())
}
