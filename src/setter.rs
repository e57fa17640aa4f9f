//! # Platform Wallpaper Setter Module
//!
//! Asks the operating system's desktop environment to change the background
//! image. Callers treat this as fire-and-forget: a failure is logged and the
//! rotation simply continues with the next interval.
//!
//! On Linux the desktop environment is detected from `DESKTOP_SESSION` /
//! `XDG_CURRENT_DESKTOP` and the matching settings tool is invoked. macOS
//! goes through Finder via `osascript`, Windows through
//! `SystemParametersInfoW`.

use std::path::Path;

use crate::error::Error;

/// Applies `path` as the desktop background using the platform mechanism.
pub fn set_wallpaper(path: &Path) -> Result<(), Error> {
    #[cfg(target_os = "linux")]
    return linux::set(path);

    #[cfg(target_os = "macos")]
    return macos::set(path);

    #[cfg(target_os = "windows")]
    return windows_desktop::set(path);

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        let _ = path;
        Err(Error::UnsupportedDesktop)
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use std::path::Path;
    use std::process::Command;

    use crate::error::Error;

    /// Desktop sessions that use the GNOME background schema.
    const GNOME_SESSIONS: &[&str] = &[
        "gnome",
        "gnome-wayland",
        "unity",
        "ubuntu",
        "pantheon",
        "budgie-desktop",
        "pop",
    ];

    pub fn set(path: &Path) -> Result<(), Error> {
        let session = desktop_session();

        if GNOME_SESSIONS.iter().any(|s| session.contains(s)) {
            let uri = file_uri(path);
            gsettings(&["set", "org.gnome.desktop.background", "picture-uri", &uri])?;
            // Newer GNOME picks the dark-mode key; setting both keeps either
            // theme in sync. Failure here is not fatal on older releases.
            let _ = gsettings(&[
                "set",
                "org.gnome.desktop.background",
                "picture-uri-dark",
                &uri,
            ]);
            Ok(())
        } else if session.contains("cinnamon") {
            let uri = file_uri(path);
            gsettings(&["set", "org.cinnamon.desktop.background", "picture-uri", &uri])
        } else if session.contains("mate") {
            // MATE takes a plain filesystem path, not a URI.
            let path = path.to_string_lossy();
            gsettings(&["set", "org.mate.background", "picture-filename", &path])
        } else if session.contains("cosmic") {
            set_cosmic(path)
        } else {
            // KDE and anything else: no supported mechanism.
            Err(Error::UnsupportedDesktop)
        }
    }

    fn desktop_session() -> String {
        std::env::var("DESKTOP_SESSION")
            .or_else(|_| std::env::var("XDG_CURRENT_DESKTOP"))
            .unwrap_or_default()
            .to_lowercase()
    }

    /// gsettings expects a percent-encoded `file://` URI; spaces or `#` in
    /// the raw path would truncate or break it.
    fn file_uri(path: &Path) -> String {
        match url::Url::from_file_path(path) {
            Ok(uri) => uri.to_string(),
            // Only relative paths cannot form a file URI; pass them raw.
            Err(()) => format!("file://{}", path.display()),
        }
    }

    fn gsettings(args: &[&str]) -> Result<(), Error> {
        let status = Command::new("gsettings").args(args).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Setter(format!("gsettings exited with {}", status)))
        }
    }

    /// COSMIC has no gsettings schema; its background daemon reads a config
    /// file and has to be restarted to pick up a change.
    fn set_cosmic(path: &Path) -> Result<(), Error> {
        let config_path = dirs::config_dir()
            .ok_or(Error::NoConfigDir)?
            .join("cosmic/com.system76.CosmicBackground/v1/all");

        let config_content = format!(
            r#"(
    output: "all",
    source: Path("{}"),
    filter_by_theme: false,
    rotation_frequency: 300,
    filter_method: Lanczos,
    scaling_mode: Zoom,
    sampling_method: Alphanumeric,
)"#,
            path.display()
        );

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, config_content)?;

        let _ = Command::new("pkill").args(["-x", "cosmic-bg"]).output();
        std::thread::sleep(std::time::Duration::from_millis(500));

        Command::new("cosmic-bg")
            .spawn()
            .map_err(|e| Error::Setter(format!("failed to start cosmic-bg: {}", e)))?;

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::file_uri;
        use std::path::Path;

        #[test]
        fn file_uri_percent_encodes_reserved_characters() {
            assert_eq!(
                file_uri(Path::new("/pics/my wallpaper #1.png")),
                "file:///pics/my%20wallpaper%20%231.png"
            );
        }

        #[test]
        fn file_uri_leaves_plain_paths_alone() {
            assert_eq!(file_uri(Path::new("/pics/sunset.png")), "file:///pics/sunset.png");
        }
    }
}

#[cfg(target_os = "macos")]
mod macos {
    use std::path::Path;
    use std::process::Command;

    use crate::error::Error;

    pub fn set(path: &Path) -> Result<(), Error> {
        let script = format!(
            "tell application \"Finder\" to set desktop picture to POSIX file \"{}\"",
            path.display()
        );

        let status = Command::new("osascript").args(["-e", &script]).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Setter(format!("osascript exited with {}", status)))
        }
    }
}

#[cfg(target_os = "windows")]
mod windows_desktop {
    use std::ffi::c_void;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use windows::Win32::UI::WindowsAndMessaging::{
        SystemParametersInfoW, SPIF_SENDWININICHANGE, SPIF_UPDATEINIFILE, SPI_SETDESKWALLPAPER,
    };

    use crate::error::Error;

    pub fn set(path: &Path) -> Result<(), Error> {
        let mut wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();

        unsafe {
            SystemParametersInfoW(
                SPI_SETDESKWALLPAPER,
                0,
                Some(wide.as_mut_ptr() as *mut c_void),
                SPIF_UPDATEINIFILE | SPIF_SENDWININICHANGE,
            )
        }
        .map_err(|e| Error::Setter(e.to_string()))
    }
}
