use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flume::Receiver;
use thiserror::Error;

pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Starts decoding `path` on a background thread and returns immediately.
/// The receiver yields exactly one result; polling it never blocks the
/// render loop.
pub fn spawn(path: PathBuf) -> Receiver<Result<DecodedImage, LoaderError>> {
    let (tx, rx) = flume::bounded(1);

    std::thread::spawn(move || {
        let result = load(&path);

        // The window may already be gone; then there is no one to tell.
        let _ = tx.send(result);
    });

    rx
}

fn load(path: &Path) -> Result<DecodedImage, LoaderError> {
    let file = File::open(path).map_err(|e| LoaderError::Open(path.to_owned(), e))?;

    decode(file)
}

fn decode<R: Read>(source: R) -> Result<DecodedImage, LoaderError> {
    let mut decoder = png::Decoder::new(source);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let pixels = expand_to_rgba(&buf, info.color_type, info.bit_depth)?;

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

fn expand_to_rgba(
    data: &[u8],
    color: png::ColorType,
    depth: png::BitDepth,
) -> Result<Vec<u8>, LoaderError> {
    if depth != png::BitDepth::Eight {
        return Err(LoaderError::UnsupportedFormat(color, depth));
    }

    let pixels = match color {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|g| [*g, *g, *g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Indexed => return Err(LoaderError::UnsupportedFormat(color, depth)),
    };

    Ok(pixels)
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot open {0:?}: {1}")]
    Open(PathBuf, std::io::Error),
    #[error("cannot decode image: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported image format {0:?} at {1:?} bit depth")]
    UnsupportedFormat(png::ColorType, png::BitDepth),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }

        out
    }

    #[test]
    fn rgba_passes_through() {
        let encoded = encode_png(1, 2, png::ColorType::Rgba, &[1, 2, 3, 4, 5, 6, 7, 8]);

        let img = decode(&encoded[..]).unwrap();

        assert_eq!(img.width, 1);
        assert_eq!(img.height, 2);
        assert_eq!(img.pixels, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn rgb_expands_to_rgba() {
        let encoded = encode_png(2, 1, png::ColorType::Rgb, &[10, 20, 30, 40, 50, 60]);

        let img = decode(&encoded[..]).unwrap();

        assert_eq!(img.pixels, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn grayscale_expands_to_rgba() {
        let encoded = encode_png(2, 1, png::ColorType::Grayscale, &[7, 200]);

        let img = decode(&encoded[..]).unwrap();

        assert_eq!(img.pixels, vec![7, 7, 7, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let result = decode(&b"not a png"[..]);

        assert!(matches!(result, Err(LoaderError::Decode(_))));
    }
}
