use std::path::PathBuf;

use anyhow::{Context, Result};
use image::{Rgb32FImage, RgbImage};

use lumen::color;

/// Sink for the finished frame.
pub trait FinalOutput {
    fn commit(&self, color: &Rgb32FImage) -> Result<()>;
}

/// Writes the color buffer as an 8-bit sRGB image, PNG by extension.
pub struct FileOutput {
    pub path: PathBuf,
}

impl FinalOutput for FileOutput {
    fn commit(&self, color: &Rgb32FImage) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create {}", parent.display()))?;
            }
        }

        let (width, height) = color.dimensions();
        let mut ldr = RgbImage::new(width, height);
        for (x, y, pixel) in color.enumerate_pixels() {
            let srgb = color::to_srgb(*pixel);
            ldr.put_pixel(x, y, image::Rgb(srgb.0.map(|c| (c * 255. + 0.5) as u8)));
        }

        ldr.save(&self.path)
            .with_context(|| format!("cannot write image to {}", self.path.display()))?;
        log::info!("wrote {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn commit_writes_a_readable_png() {
        let dir = std::env::temp_dir().join("lumen_output_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.png");

        let mut color = Rgb32FImage::new(4, 2);
        color.put_pixel(0, 0, Rgb([1.0, 0.0, 0.0]));

        FileOutput { path: path.clone() }.commit(&color).unwrap();

        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (4, 2));
        assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let color = Rgb32FImage::new(2, 2);
        let out = FileOutput {
            path: "/dev/null/nope/out.png".into(),
        };
        assert!(out.commit(&color).is_err());
    }
}
