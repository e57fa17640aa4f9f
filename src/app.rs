//! # Application Command Loop
//!
//! Single consumer of every command source: tray menu activations, D-Bus
//! method calls, the rotation timer and the settings-file watcher all push
//! [`Command`]s onto one channel, and the loop below is the only place that
//! touches the playlist. That keeps navigation single-threaded without any
//! locking around the cursor.
//!
//! The folder scan and the per-step content sniff run inline in the loop; a
//! huge wallpaper tree therefore stalls command handling for the duration of
//! the scan.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::RwLock;

use crate::config::Settings;
use crate::error::Error;
use crate::playlist::{Direction, Playlist};
use crate::timer::RotationTimer;
use crate::tray::WallpaperTray;
use crate::{scanner, service, setter, sniff, tray};

/// Commands understood by the loop. Tray menu entries and D-Bus methods map
/// onto these 1:1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    TogglePause,
    OpenCurrent,
    ShowSettings,
    Reload,
    Quit,
}

/// Snapshot of the loop's state readable from outside (D-Bus getters).
#[derive(Debug, Default)]
pub struct Status {
    pub current: Option<PathBuf>,
    pub paused: bool,
}

struct App {
    settings: Settings,
    playlist: Playlist,
    timer: RotationTimer,
    status: Arc<RwLock<Status>>,
    tray: ksni::Handle<WallpaperTray>,
}

/// Runs the application until the user quits.
pub async fn run() -> Result<(), Error> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let status = Arc::new(RwLock::new(Status::default()));

    let tray_handle = tray::spawn(tx.clone());

    // Remote control is best-effort; a second instance or a missing session
    // bus must not keep the tray from working.
    let _dbus = match service::serve(tx.clone(), status.clone()).await {
        Ok(conn) => Some(conn),
        Err(e) => {
            log::warn!("D-Bus service unavailable: {}", e);
            None
        }
    };

    let _watcher = watch_settings(tx.clone());

    let settings = Settings::load();
    let (timer, mut tick_rx) = RotationTimer::new(settings.interval_duration());

    let mut app = App {
        settings,
        playlist: Playlist::new(),
        timer,
        status,
        tray: tray_handle,
    };

    app.reload().await;

    loop {
        tokio::select! {
            Some(command) = rx.recv() => match command {
                Command::Next => app.navigate(Direction::Forward).await,
                Command::Previous => app.navigate(Direction::Backward).await,
                Command::TogglePause => app.toggle_pause().await,
                Command::OpenCurrent => app.open_current(),
                Command::ShowSettings => app.show_settings(),
                Command::Reload => app.reload().await,
                Command::Quit => break,
            },
            Some(()) = tick_rx.recv() => app.navigate(Direction::Forward).await,
        }
    }

    app.timer.stop();
    app.tray.shutdown();

    Ok(())
}

impl App {
    /// Rereads the settings, rescans the wallpaper folder and starts over
    /// with a fresh shuffle.
    async fn reload(&mut self) {
        self.settings = Settings::load();
        self.restart_rotation().await;
    }

    /// Rescans the configured folder, reshuffles, applies a first wallpaper
    /// and restarts rotation with the current settings.
    async fn restart_rotation(&mut self) {
        self.timer.set_interval(self.settings.interval_duration());

        if self.settings.folder.is_empty() {
            log::warn!("no wallpaper folder configured; open the settings to pick one");
            return;
        }

        let files = scanner::scan_directory(std::path::Path::new(&self.settings.folder));
        self.playlist.load(files);

        if self.playlist.is_empty() {
            log::warn!("wallpaper folder {} contains no files", self.settings.folder);
        }

        self.navigate(Direction::Forward).await;

        // A reload always restarts rotation and clears pause, even when the
        // first navigation found no valid image: the next tick retries, so
        // rotation recovers once the folder contents change.
        self.timer.rearm();
        self.status.write().await.paused = false;
        self.tray.update(|tray| tray.paused = false);
    }

    /// Steps the playlist in `direction` and applies the entry it lands on.
    ///
    /// When no valid image is found within the attempt budget, the apply is
    /// skipped for this cycle but the timer is still rearmed (unless
    /// paused), so rotation recovers by itself once the folder changes.
    async fn navigate(&mut self, direction: Direction) {
        let found = match direction {
            Direction::Forward => self.playlist.advance(sniff::is_image_file),
            Direction::Backward => self.playlist.retreat(sniff::is_image_file),
        };

        if found {
            self.apply_current().await;
        } else {
            log::warn!("no valid wallpaper found in the playlist");
            if self.timer.is_armed() {
                self.timer.rearm();
            }
        }
    }

    /// Applies the wallpaper under the cursor and rearms the timer.
    ///
    /// Any successful navigation restarts the interval from zero; a manual
    /// Next/Previous while paused therefore also resumes rotation.
    async fn apply_current(&mut self) {
        let Some(path) = self.playlist.current().map(PathBuf::from) else {
            return;
        };

        log::info!("applying wallpaper {}", path.display());
        if let Err(e) = setter::set_wallpaper(&path) {
            // Fire and forget: the entry stays current and rotation goes on.
            log::warn!("could not apply {}: {}", path.display(), e);
        }

        self.timer.rearm();

        {
            let mut status = self.status.write().await;
            status.current = Some(path.clone());
            status.paused = false;
        }
        self.tray.update(|tray| {
            tray.current = Some(path.clone());
            tray.paused = false;
        });
    }

    async fn toggle_pause(&mut self) {
        let paused = if self.timer.is_armed() {
            self.timer.stop();
            true
        } else {
            self.timer.rearm();
            false
        };

        log::info!("rotation {}", if paused { "paused" } else { "resumed" });

        self.status.write().await.paused = paused;
        self.tray.update(move |tray| tray.paused = paused);
    }

    /// Hands the current wallpaper to the system file opener.
    fn open_current(&mut self) {
        let Some(path) = self.playlist.current().map(PathBuf::from) else {
            return;
        };

        if let Err(e) = open::that(&path) {
            log::warn!("could not open {}: {}", path.display(), e);
        }
    }

    /// Opens the settings file in the default editor, creating it with
    /// defaults first if it does not exist yet. Saving the file triggers a
    /// reload via the settings watcher.
    fn show_settings(&self) {
        let Some(path) = Settings::path() else {
            log::warn!("could not determine the settings path");
            return;
        };

        if !path.exists() {
            if let Err(e) = self.settings.save() {
                log::warn!("could not write default settings: {}", e);
                return;
            }
        }

        if let Err(e) = open::that(&path) {
            log::warn!("could not open settings file: {}", e);
        }
    }
}

/// Watches the settings file and turns every save into a [`Command::Reload`].
///
/// The parent directory is watched because editors tend to replace the file
/// atomically. Returns `None` (and logs) when the watcher cannot be set up;
/// the app still works, reloads just require a restart.
fn watch_settings(tx: UnboundedSender<Command>) -> Option<RecommendedWatcher> {
    let path = Settings::path()?;
    let watch_dir = path.parent()?.to_path_buf();
    std::fs::create_dir_all(&watch_dir).ok()?;
    let file_name = path.file_name()?.to_owned();

    let config = NotifyConfig::default().with_poll_interval(Duration::from_secs(1));
    let watcher: Result<RecommendedWatcher, _> = Watcher::new(
        move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                if matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) && event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()))
                {
                    let _ = tx.send(Command::Reload);
                }
            }
        },
        config,
    );

    match watcher {
        Ok(mut watcher) => match watcher.watch(&watch_dir, RecursiveMode::NonRecursive) {
            Ok(()) => Some(watcher),
            Err(e) => {
                log::warn!("cannot watch settings directory: {}", e);
                None
            }
        },
        Err(e) => {
            log::warn!("cannot create settings watcher: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The tray service is never spawned here; the handle still applies
    // updates to the shared model, which is all the loop needs.
    fn test_app(folder: String) -> App {
        let (tx, _) = mpsc::unbounded_channel();
        let tray = ksni::TrayService::new(WallpaperTray::new(tx)).handle();
        let (timer, _tick_rx) = RotationTimer::new(Duration::from_secs(60));

        App {
            settings: Settings {
                folder,
                interval: 1,
            },
            playlist: Playlist::new(),
            timer,
            status: Arc::new(RwLock::new(Status::default())),
            tray,
        }
    }

    #[tokio::test]
    async fn restart_rearms_rotation_even_when_no_valid_image_is_found() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            std::fs::write(dir.path().join(name), b"not an image").unwrap();
        }

        let mut app = test_app(dir.path().to_string_lossy().into_owned());
        app.restart_rotation().await;

        // Every entry fails the image sniff, so nothing was applied, but
        // rotation must still be scheduled and unpaused.
        assert!(app.status.read().await.current.is_none());
        assert!(app.timer.is_armed());
        assert!(!app.status.read().await.paused);
    }

    #[tokio::test]
    async fn restart_with_valid_images_applies_one_and_arms_the_timer() {
        let dir = tempfile::tempdir().unwrap();
        // Minimal PNG header; enough for the format sniff.
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];
        std::fs::write(dir.path().join("only.png"), png).unwrap();

        let mut app = test_app(dir.path().to_string_lossy().into_owned());
        app.restart_rotation().await;

        let status = app.status.read().await;
        assert_eq!(status.current, Some(dir.path().join("only.png")));
        assert!(!status.paused);
        assert!(app.timer.is_armed());
    }

    #[tokio::test]
    async fn restart_without_a_configured_folder_does_not_arm_the_timer() {
        let mut app = test_app(String::new());
        app.restart_rotation().await;

        assert!(!app.timer.is_armed());
        assert!(app.status.read().await.current.is_none());
    }
}
