//! # Wallpaper Changer
//!
//! A system tray application that periodically rotates the desktop
//! wallpaper, picking randomly from a user-selected folder of images.
//!
//! ## Architecture
//! - `app.rs` - command loop owning the playlist, timer and settings
//! - `playlist.rs` - shuffled wallpaper collection with a skipping cursor
//! - `scanner.rs` - recursive folder walk collecting candidate files
//! - `sniff.rs` - content-based "is this an image" check
//! - `setter.rs` - per-desktop-environment background call-outs
//! - `timer.rs` - one-shot rearming rotation timer
//! - `tray.rs` - StatusNotifierItem tray icon and menu
//! - `service.rs` - D-Bus remote control interface
//! - `config.rs` - persisted folder/interval settings

mod app;
mod config;
mod error;
mod playlist;
mod scanner;
mod service;
mod setter;
mod sniff;
mod timer;
mod tray;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_help(&args[0]);
                return;
            }
            "--version" | "-v" => {
                println!("wallpaper-changer {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(app::run()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Prints help message
fn print_help(program: &str) {
    println!("Wallpaper Changer\n");
    println!("Usage: {} [OPTIONS]\n", program);
    println!("Options:");
    println!("  (none)             Run the tray application");
    println!("  --version, -v      Show version information");
    println!("  --help, -h         Show this help message");
    println!();
    println!("Wallpapers rotate on the interval from the settings file;");
    println!("use the tray menu or the D-Bus interface to control rotation.");
}
