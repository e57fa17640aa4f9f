//! # D-Bus Service Module
//!
//! Exposes remote control of the running instance, so shell keybindings or
//! scripts can switch wallpapers without the tray menu, e.g.:
//!
//! ```text
//! gdbus call --session --dest com.selfcoders.WallpaperChanger \
//!     --object-path /com/selfcoders/WallpaperChanger \
//!     --method com.selfcoders.WallpaperChanger.NextWallpaper
//! ```
//!
//! Methods enqueue commands on the command loop; the two getters read the
//! shared status snapshot. Losing the bus name (second instance, no session
//! bus) is logged by the caller and non-fatal.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use zbus::{connection, interface, Connection};

use crate::app::{Command, Status};

/// D-Bus service name
pub const SERVICE_NAME: &str = "com.selfcoders.WallpaperChanger";

/// D-Bus object path
pub const OBJECT_PATH: &str = "/com/selfcoders/WallpaperChanger";

/// The D-Bus interface implementation.
pub struct ChangerService {
    tx: UnboundedSender<Command>,
    status: Arc<RwLock<Status>>,
}

#[interface(name = "com.selfcoders.WallpaperChanger")]
impl ChangerService {
    /// Switch to the next wallpaper.
    async fn next_wallpaper(&self) {
        let _ = self.tx.send(Command::Next);
    }

    /// Switch to the previous wallpaper.
    async fn previous_wallpaper(&self) {
        let _ = self.tx.send(Command::Previous);
    }

    /// Pause or resume the rotation timer.
    async fn toggle_pause(&self) {
        let _ = self.tx.send(Command::TogglePause);
    }

    /// Rescan the wallpaper folder and reshuffle.
    async fn reload_wallpapers(&self) {
        let _ = self.tx.send(Command::Reload);
    }

    /// Path of the currently applied wallpaper (empty if none).
    async fn get_current_wallpaper(&self) -> String {
        let status = self.status.read().await;
        status
            .current
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Whether rotation is currently paused.
    async fn get_paused(&self) -> bool {
        self.status.read().await.paused
    }
}

/// Claims the bus name and serves the interface for the lifetime of the
/// returned connection.
pub async fn serve(
    tx: UnboundedSender<Command>,
    status: Arc<RwLock<Status>>,
) -> zbus::Result<Connection> {
    let service = ChangerService { tx, status };

    let conn = connection::Builder::session()?
        .name(SERVICE_NAME)?
        .serve_at(OBJECT_PATH, service)?
        .build()
        .await?;

    log::info!(
        "D-Bus service running at {} on {}",
        OBJECT_PATH,
        SERVICE_NAME
    );
    Ok(conn)
}
