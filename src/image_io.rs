// PNG save/load for the canvas.
// Visual: what you saved is pixel-for-pixel what you get back.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::info;

use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// Make sure a save target ends in `.png` (appended, not substituted).
pub fn png_path(path: &Path) -> PathBuf {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        path.to_path_buf()
    } else {
        let mut s = path.as_os_str().to_owned();
        s.push(".png");
        PathBuf::from(s)
    }
}

/// Encode the whole grid as RGBA PNG at exactly `path`.
pub fn save(canvas: &Canvas, path: &Path) -> Result<()> {
    canvas
        .image()
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Save { path: path.to_path_buf(), source })?;
    info!("Saved {}x{} canvas to {}", canvas.width(), canvas.height(), path.display());
    Ok(())
}

/// Decode a PNG into a fresh canvas of whatever size the file has.
pub fn load(path: &Path) -> Result<Canvas> {
    let err = |source: image::ImageError| Error::Load { path: path.to_path_buf(), source };
    let reader = image::ImageReader::open(path)
        .map_err(|e| err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| err(image::ImageError::IoError(e)))?;
    let decoded = reader.decode().map_err(err)?;

    let canvas = Canvas::from_image(decoded.to_rgba8());
    info!("Loaded {}x{} image from {}", canvas.width(), canvas.height(), path.display());
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pen::Thickness;
    use crate::types::{Point, Rgb};
    use image::{Rgba, RgbaImage};

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pen-paint-{}-{name}", std::process::id()))
    }

    #[test]
    fn png_path_appends_extension() {
        assert_eq!(png_path(Path::new("a/pic")), PathBuf::from("a/pic.png"));
        assert_eq!(png_path(Path::new("pic.PNG")), PathBuf::from("pic.PNG"));
        assert_eq!(png_path(Path::new("pic.jpg")), PathBuf::from("pic.jpg.png"));
    }

    #[test]
    fn extensionless_document_saves_and_loads_at_one_path() {
        let mut canvas = Canvas::new(9, 9);
        canvas.draw_segment(Point::new(1.0, 1.0), Point::new(7.0, 7.0), Rgb::new(1, 2, 3), Thickness::clamped(3));

        let document = png_path(&scratch("sketch"));
        assert_eq!(document.extension().and_then(|e| e.to_str()), Some("png"));
        save(&canvas, &document).unwrap();
        let back = load(&document).unwrap();
        let _ = std::fs::remove_file(&document);

        assert_eq!(back, canvas);
        assert_eq!(png_path(&document), document);
    }

    #[test]
    fn round_trips_drawn_canvas_exactly() {
        let mut canvas = Canvas::new(120, 80);
        canvas.draw_segment(Point::new(3.0, 4.0), Point::new(110.0, 70.0), Rgb::new(200, 30, 90), Thickness::clamped(9));
        canvas.draw_segment(Point::new(100.0, 5.0), Point::new(7.0, 60.0), Rgb::new(0, 90, 255), Thickness::clamped(2));

        let path = scratch("roundtrip.png");
        save(&canvas, &path).unwrap();
        let back = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back, canvas);
    }

    #[test]
    fn round_trips_translucent_pixels_and_odd_sizes() {
        let mut img = RgbaImage::from_pixel(3, 517, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 200, Rgba([12, 34, 56, 78]));
        img.put_pixel(2, 516, Rgba([0, 0, 0, 0]));
        let canvas = Canvas::from_image(img);

        let path = scratch("odd.png");
        save(&canvas, &path).unwrap();
        let back = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((back.width(), back.height()), (3, 517));
        assert_eq!(back, canvas);
    }

    #[test]
    fn load_missing_file_is_a_load_error() {
        let err = load(&scratch("does-not-exist.png")).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(err.is_io_failure());
    }

    #[test]
    fn load_garbage_is_a_load_error() {
        let path = scratch("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn save_into_missing_directory_is_a_save_error() {
        let path = scratch("no-such-dir").join("out.png");
        let err = save(&Canvas::new(2, 2), &path).unwrap_err();
        assert!(matches!(err, Error::Save { .. }));
    }
}
