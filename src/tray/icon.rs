// Tray icon pixels, shared by both tray backends

use crate::error::{Result, SpeechError};
use log::{debug, warn};
use std::path::Path;

const ICON_SIZE: u32 = 32;

/// Straight RGBA pixels plus dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl IconImage {
    /// The configured icon, or a generated one if it is missing or broken.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                warn!("Failed to load icon {}: {e}", path.display());
                Self::generated()
            }),
            None => Self::generated(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let img = image::load_from_memory(&data)
            .map_err(|e| SpeechError::Tray(format!("Invalid icon image: {e}")))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!("Loaded icon from {} ({width}x{height})", path.display());

        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// A blue speech bubble on a transparent background.
    pub fn generated() -> Self {
        let size = ICON_SIZE as usize;
        let mut rgba = vec![0u8; size * size * 4];
        let (r, g, b) = (40u8, 110u8, 200u8);

        for y in 0..size {
            for x in 0..size {
                let idx = (y * size + x) * 4;
                let bubble = (2..size - 2).contains(&x) && (3..size - 10).contains(&y);
                // Tail under the bubble, narrowing to the left
                let tail = (size - 10..size - 4).contains(&y) && x >= 6 && x < 6 + (size - 4 - y);
                if !(bubble || tail) {
                    continue;
                }

                let edge = x == 2 || x == size - 3 || y == 3;
                let shade = if edge { 2 } else { 1 };
                rgba[idx] = r / shade;
                rgba[idx + 1] = g / shade;
                rgba[idx + 2] = b / shade;
                rgba[idx + 3] = 255;
            }
        }

        Self {
            width: ICON_SIZE,
            height: ICON_SIZE,
            rgba,
        }
    }

    /// ARGB32 in network byte order, as StatusNotifierItem pixmaps expect.
    pub fn to_argb(&self) -> Vec<u8> {
        let mut argb = self.rgba.clone();
        for pixel in argb.chunks_exact_mut(4) {
            pixel.rotate_right(1);
        }
        argb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_conversion() {
        let icon = IconImage {
            width: 2,
            height: 1,
            rgba: vec![1, 2, 3, 4, 10, 20, 30, 255],
        };
        assert_eq!(icon.to_argb(), vec![4, 1, 2, 3, 255, 10, 20, 30]);
    }

    #[test]
    fn test_generated_icon_has_pixels() {
        let icon = IconImage::generated();
        assert_eq!(icon.rgba.len(), (icon.width * icon.height * 4) as usize);
        assert!(icon.rgba.chunks_exact(4).any(|p| p[3] == 255));
        assert!(icon.rgba.chunks_exact(4).any(|p| p[3] == 0));
    }

    #[test]
    fn test_missing_icon_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let icon = IconImage::load_or_default(Some(&dir.path().join("none.png")));
        assert_eq!(icon, IconImage::generated());
    }

    #[test]
    fn test_broken_icon_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(IconImage::load(&path).is_err());
    }
}
