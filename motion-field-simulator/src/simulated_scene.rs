use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

struct Blob {
    center: Vector2<f64>,
    radius: f64,
    color: [f64; 3],
}

/// Continuous synthetic scene that a virtual camera pans over at constant speed.
pub struct SimScene {
    blobs: Vec<Blob>,
    pan: Vector2<f64>,
}

impl SimScene {
    pub fn random(seed: u64, width: usize, height: usize, blob_count: usize, pan: Vector2<f64>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let blobs = (0..blob_count)
            .map(|_| Blob {
                center: Vector2::new(rng.gen_range(0.0..width as f64), rng.gen_range(0.0..height as f64)),
                radius: rng.gen_range(2.0..8.0),
                color: [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)],
            })
            .collect();

        Self { blobs, pan }
    }

    /// Renders frame `index` as an 8-bit BGR buffer. Frame `t` shows the scene moved by `t * pan`,
    /// so the content at pixel p of frame `t + 1` sits at p + pan in frame `t`.
    pub fn render(&self, index: usize, width: usize, height: usize) -> Vec<u8> {
        let offset = self.pan * index as f64;
        let mut pixels = Vec::with_capacity(width * height * 3);

        for y in 0..height {
            for x in 0..width {
                let p = Vector2::new(x as f64, y as f64) + offset;
                // soft background gradient keeps flat regions from being ambiguous
                let mut bgr = [0.2 + 0.002 * p.x, 0.2 + 0.002 * p.y, 0.2];

                for blob in &self.blobs {
                    let d2 = (p - blob.center).norm_squared();
                    let weight = (-d2 / (2.0 * blob.radius * blob.radius)).exp();
                    for (channel, color) in bgr.iter_mut().zip(blob.color) {
                        *channel += weight * color;
                    }
                }

                pixels.extend(bgr.iter().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
            }
        }

        pixels
    }
}
