use anyhow::bail;
use nalgebra::{DMatrix, Vector3};

// Row-major 8-bit gray buffer, intensities scaled to [0, 1]
pub fn gray_to_dmatrix(pixels: &[u8], width: usize, height: usize) -> anyhow::Result<DMatrix<f64>> {
    if pixels.len() != width * height {
        bail!("Gray buffer holds {} bytes, expected {width}x{height}", pixels.len());
    }

    Ok(DMatrix::from_fn(height, width, |r, c| pixels[r * width + c] as f64 / 255.0))
}

pub fn colored_to_channels(pixels: &[u8], width: usize, height: usize) -> anyhow::Result<DMatrix<Vector3<f64>>> {
    if pixels.len() != width * height * 3 {
        bail!("Color buffer holds {} bytes, expected {width}x{height}x3", pixels.len());
    }

    Ok(DMatrix::from_fn(height, width, |r, c| {
        let offset = (r * width + c) * 3;
        Vector3::new(pixels[offset], pixels[offset + 1], pixels[offset + 2]).map(|v| v as f64 / 255.0)
    }))
}
