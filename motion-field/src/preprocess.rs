use anyhow::bail;
use nalgebra::{DMatrix, Vector3};

use crate::utils::{colored_to_channels, gray_to_dmatrix};

// ITU-R BT.601 luma weights in BGR order
const LUMA_BGR: Vector3<f64> = Vector3::new(0.114, 0.587, 0.299);

// 1 (gray) or 3 (BGR) channel 8-bit image to a gray frame
pub fn preprocess_image(pixels: &[u8], width: usize, height: usize, channels: usize) -> anyhow::Result<DMatrix<f64>> {
    let frame = match channels {
        1 => gray_to_dmatrix(pixels, width, height)?,
        3 => {
            let colored = colored_to_channels(pixels, width, height)?;
            colored.map(|bgr| bgr.dot(&LUMA_BGR))
        }
        _ => {
            bail!("Image with {channels} channels is of unknown color type");
        }
    };

    Ok(frame)
}
