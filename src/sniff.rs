//! Content-based image detection.
//!
//! The folder scan collects every file it sees, so navigation has to tell
//! images apart from the thumbnails, sidecars and stray text files that live
//! next to them. Detection goes by file content, not extension: the first
//! few bytes are matched against the magic numbers the `image` crate knows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How many leading bytes to read for format detection. Every format the
/// `image` crate recognizes declares itself well within this window.
const SNIFF_LEN: usize = 64;

/// Returns `true` if the file at `path` looks like a decodable image.
///
/// Unreadable files are simply not images. The result is not cached;
/// revisiting the same file sniffs it again.
pub fn is_image_file(path: &Path) -> bool {
    let mut header = [0u8; SNIFF_LEN];

    let n = match File::open(path).and_then(|mut f| f.read(&mut header)) {
        Ok(n) => n,
        Err(e) => {
            log::debug!("cannot sniff {}: {}", path.display(), e);
            return false;
        }
    };

    image::guess_format(&header[..n]).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn recognizes_png_and_jpeg_headers() {
        let dir = tempfile::tempdir().unwrap();

        let png = dir.path().join("image.png");
        fs::write(&png, [PNG_MAGIC, &[0u8; 16]].concat()).unwrap();
        assert!(is_image_file(&png));

        let jpeg = dir.path().join("image.jpg");
        fs::write(&jpeg, [JPEG_MAGIC, &[0u8; 16]].concat()).unwrap();
        assert!(is_image_file(&jpeg));
    }

    #[test]
    fn rejects_non_image_content_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();

        let fake = dir.path().join("notes.png");
        fs::write(&fake, b"just some text pretending to be an image").unwrap();
        assert!(!is_image_file(&fake));
    }

    #[test]
    fn rejects_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();

        assert!(!is_image_file(&dir.path().join("missing.jpg")));

        let empty = dir.path().join("empty.jpg");
        fs::write(&empty, b"").unwrap();
        assert!(!is_image_file(&empty));
    }
}
