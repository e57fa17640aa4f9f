//! # System Tray Module
//!
//! Implements the system tray icon using the StatusNotifierItem (SNI)
//! protocol via the ksni crate. The menu maps 1:1 to the command loop:
//! every activation just enqueues a [`Command`]; no wallpaper state is
//! touched on the tray thread.

use std::path::PathBuf;

use ksni::{Tray, TrayService};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::Command;

/// The system tray implementation.
///
/// `current` and `paused` are pushed in by the command loop through the
/// [`ksni::Handle`]; the tray only renders them.
#[derive(Debug)]
pub struct WallpaperTray {
    tx: UnboundedSender<Command>,
    /// Path of the wallpaper currently applied, for the tooltip.
    pub current: Option<PathBuf>,
    /// Whether rotation is paused (flips the Pause/Continue label).
    pub paused: bool,
}

impl WallpaperTray {
    pub fn new(tx: UnboundedSender<Command>) -> Self {
        Self {
            tx,
            current: None,
            paused: false,
        }
    }

    fn send(&self, command: Command) {
        let _ = self.tx.send(command);
    }
}

impl Tray for WallpaperTray {
    fn id(&self) -> String {
        "com.selfcoders.WallpaperChanger".to_string()
    }

    fn title(&self) -> String {
        "Wallpaper Changer".to_string()
    }

    fn icon_name(&self) -> String {
        "preferences-desktop-wallpaper".to_string()
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        let description = match &self.current {
            Some(path) => format!("Current wallpaper: {}", path.display()),
            None => "No wallpaper selected".to_string(),
        };

        ksni::ToolTip {
            title: "Wallpaper Changer".to_string(),
            description,
            icon_name: String::new(),
            icon_pixmap: Vec::new(),
        }
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        use ksni::menu::*;

        vec![
            StandardItem {
                label: "Show settings".to_string(),
                icon_name: "preferences-system".to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(Command::ShowSettings)),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: "Open current wallpaper".to_string(),
                icon_name: "image-viewer".to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(Command::OpenCurrent)),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: "Previous wallpaper".to_string(),
                icon_name: "media-skip-backward".to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(Command::Previous)),
                ..Default::default()
            }
            .into(),
            StandardItem {
                label: if self.paused { "Continue" } else { "Pause" }.to_string(),
                icon_name: if self.paused {
                    "media-playback-start"
                } else {
                    "media-playback-pause"
                }
                .to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(Command::TogglePause)),
                ..Default::default()
            }
            .into(),
            StandardItem {
                label: "Next wallpaper".to_string(),
                icon_name: "media-skip-forward".to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(Command::Next)),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: "Quit".to_string(),
                icon_name: "application-exit".to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(Command::Quit)),
                ..Default::default()
            }
            .into(),
        ]
    }
}

/// Starts the tray service on its own thread and returns a handle the
/// command loop uses to push tooltip and pause-state updates.
pub fn spawn(tx: UnboundedSender<Command>) -> ksni::Handle<WallpaperTray> {
    let service = TrayService::new(WallpaperTray::new(tx));
    let handle = service.handle();
    service.spawn();
    handle
}
