//! # Wallpaper Playlist Module
//!
//! Owns the shuffled collection of candidate wallpaper files and the cursor
//! into it. Navigation skips over entries the caller's validity predicate
//! rejects, so the folder scan can stay cheap and extension-agnostic: a file
//! is only sniffed when the cursor actually lands on it.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

/// Maximum number of entries a single navigation step will try before
/// giving up and reporting that no valid wallpaper was found.
pub const MAX_SKIP_ATTEMPTS: usize = 10;

/// Direction of a navigation step through the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A shuffled list of wallpaper candidates plus the current cursor position.
///
/// The playlist is rebuilt wholesale via [`Playlist::load`] whenever the
/// source folder changes; there is no incremental add or remove. The cursor
/// is kept in bounds lazily: it is clamped on read rather than on every
/// mutation.
#[derive(Debug, Default)]
pub struct Playlist {
    entries: Vec<PathBuf>,
    current_index: usize,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the playlist contents with the given paths and shuffles them
    /// uniformly. The cursor keeps its previous value and is clamped on the
    /// next read.
    pub fn load(&mut self, paths: Vec<PathBuf>) {
        self.entries = paths;
        self.entries.shuffle(&mut rand::thread_rng());
        log::info!("playlist loaded with {} candidate files", self.entries.len());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry under the cursor, or `None` if the playlist is
    /// empty. Clamps the cursor back to 0 if the collection shrank since the
    /// cursor was last moved.
    pub fn current(&mut self) -> Option<&Path> {
        if self.entries.is_empty() {
            return None;
        }

        if self.current_index > self.entries.len() - 1 {
            self.current_index = 0;
        }

        Some(&self.entries[self.current_index])
    }

    /// Moves the cursor one step forward (with wraparound), skipping entries
    /// the predicate rejects. See [`Playlist::step`].
    pub fn advance(&mut self, is_valid: impl Fn(&Path) -> bool) -> bool {
        self.step(Direction::Forward, is_valid)
    }

    /// Moves the cursor one step backward (with wraparound), skipping entries
    /// the predicate rejects. See [`Playlist::step`].
    pub fn retreat(&mut self, is_valid: impl Fn(&Path) -> bool) -> bool {
        self.step(Direction::Backward, is_valid)
    }

    /// Steps the cursor in the given direction, treating the playlist as
    /// circular, until the predicate accepts an entry or
    /// [`MAX_SKIP_ATTEMPTS`] entries have been rejected.
    ///
    /// Returns `true` when a valid entry was found; the cursor then points at
    /// it. Returns `false` on an empty playlist or after exhausting the
    /// attempt budget, in which case the cursor stays wherever the last
    /// attempt landed.
    fn step(&mut self, direction: Direction, is_valid: impl Fn(&Path) -> bool) -> bool {
        // Guard before any index arithmetic; an empty list has no modulus.
        if self.entries.is_empty() {
            return false;
        }

        let last = self.entries.len() - 1;

        for _ in 0..MAX_SKIP_ATTEMPTS {
            self.current_index = match direction {
                Direction::Forward => {
                    if self.current_index >= last {
                        0
                    } else {
                        self.current_index + 1
                    }
                }
                Direction::Backward => {
                    if self.current_index == 0 {
                        last
                    } else {
                        self.current_index - 1
                    }
                }
            };

            if is_valid(&self.entries[self.current_index]) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn load_is_a_permutation_of_the_input() {
        let input = paths(&["/a", "/b", "/c", "/d", "/e"]);
        let mut playlist = Playlist::new();
        playlist.load(input.clone());

        assert_eq!(playlist.entries.len(), input.len());

        let mut got = playlist.entries.clone();
        let mut want = input;
        got.sort();
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn advance_then_retreat_round_trips() {
        let mut playlist = Playlist {
            entries: paths(&["/a", "/b", "/c"]),
            current_index: 1,
        };

        assert!(playlist.advance(|_| true));
        assert!(playlist.retreat(|_| true));
        assert_eq!(playlist.current_index, 1);
    }

    #[test]
    fn full_cycle_of_advances_returns_to_start() {
        let mut playlist = Playlist {
            entries: paths(&["/a", "/b", "/c", "/d"]),
            current_index: 2,
        };

        for _ in 0..playlist.entries.len() {
            assert!(playlist.advance(|_| true));
        }
        assert_eq!(playlist.current_index, 2);
    }

    #[test]
    fn wraparound_in_both_directions() {
        let mut playlist = Playlist {
            entries: paths(&["/a", "/b", "/c"]),
            current_index: 2,
        };
        assert!(playlist.advance(|_| true));
        assert_eq!(playlist.current_index, 0);

        assert!(playlist.retreat(|_| true));
        assert_eq!(playlist.current_index, 2);
    }

    #[test]
    fn navigation_gives_up_after_ten_attempts() {
        let mut playlist = Playlist {
            entries: paths(&["/a", "/b", "/c"]),
            current_index: 0,
        };

        let attempts = Cell::new(0usize);
        assert!(!playlist.advance(|_| {
            attempts.set(attempts.get() + 1);
            false
        }));
        assert_eq!(attempts.get(), MAX_SKIP_ATTEMPTS);

        let attempts = Cell::new(0usize);
        assert!(!playlist.retreat(|_| {
            attempts.set(attempts.get() + 1);
            false
        }));
        assert_eq!(attempts.get(), MAX_SKIP_ATTEMPTS);
    }

    #[test]
    fn advance_skips_invalid_entries() {
        let mut playlist = Playlist {
            entries: paths(&["/a.png", "/b.txt", "/c.jpg"]),
            current_index: 1, // start on the non-image
        };

        let looks_like_image =
            |p: &Path| p.extension().is_some_and(|ext| ext == "png" || ext == "jpg");

        for _ in 0..20 {
            assert!(playlist.advance(looks_like_image));
            let current = playlist.current().unwrap().to_path_buf();
            assert_ne!(current, PathBuf::from("/b.txt"));
        }
    }

    #[test]
    fn empty_playlist_is_inert() {
        let mut playlist = Playlist::new();

        let touched = Cell::new(false);
        assert!(playlist.current().is_none());
        assert!(!playlist.advance(|_| {
            touched.set(true);
            true
        }));
        assert!(!playlist.retreat(|_| {
            touched.set(true);
            true
        }));
        assert!(!touched.get());
    }

    #[test]
    fn current_clamps_stale_cursor_after_reload() {
        let mut playlist = Playlist {
            entries: paths(&["/a", "/b", "/c", "/d", "/e"]),
            current_index: 4,
        };

        // Reload with a shorter list; the stale cursor must clamp to 0.
        playlist.load(paths(&["/x", "/y"]));
        assert!(playlist.current().is_some());
        assert_eq!(playlist.current_index, 0);
    }
}
