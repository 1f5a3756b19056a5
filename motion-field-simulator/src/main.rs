mod simulated_scene;

use anyhow::bail;
use clap::{Parser, ValueEnum};
use motion_field::{
    preprocess_image, EstimatorConfig, FieldExport, FieldExporter, Marker, MotionEstimator, UpdateScheme,
    DEFAULT_RENDER_SCALE,
};
use nalgebra::{DMatrix, Vector2};
use simulated_scene::SimScene;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scheme {
    GaussSeidel,
    Jacobi,
}

/// Estimates the motion field of a synthetic panning sequence and logs the result.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = 128)]
    width: usize,
    #[arg(long, default_value_t = 80)]
    height: usize,
    #[arg(long, default_value_t = 5)]
    frames: usize,
    /// Horizontal camera pan per frame in pixels
    #[arg(long, default_value_t = 1.5, allow_hyphen_values = true)]
    pan_x: f64,
    /// Vertical camera pan per frame in pixels
    #[arg(long, default_value_t = -0.5, allow_hyphen_values = true)]
    pan_y: f64,
    #[arg(long, default_value_t = 40)]
    blobs: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = motion_field::DEFAULT_BLOCK_SIZE)]
    block_size: usize,
    #[arg(long, default_value_t = 10)]
    iterations: usize,
    #[arg(long, default_value_t = motion_field::DEFAULT_NU)]
    nu: f64,
    #[arg(long, default_value_t = motion_field::DEFAULT_LAMBDA)]
    lambda: f64,
    #[arg(long, default_value_t = motion_field::DEFAULT_LAMBDA_TEMPORAL)]
    lambda_temporal: f64,
    #[arg(long, value_enum, default_value_t = Scheme::GaussSeidel)]
    scheme: Scheme,
}

/// Logs every exported field as soon as the estimator finishes it.
struct LogExporter {
    pan: Vector2<f64>,
    worst_error: f64,
}

impl FieldExporter for LogExporter {
    fn export(&mut self, export: FieldExport) {
        let mean = export.field.mean();
        let error = export.field.iter().map(|v| (v - self.pan).norm()).fold(0.0, f64::max);
        self.worst_error = self.worst_error.max(error);

        let arrows = export
            .markers(DEFAULT_RENDER_SCALE)
            .iter()
            .filter(|m| matches!(m, Marker::Arrow { .. }))
            .count();

        log::info!(
            "Transition {}: mean motion ({:.2}, {:.2}), {arrows}/{} blocks moving, max deviation from pan {error:.2}",
            export.transition,
            mean.x,
            mean.y,
            export.field.len()
        );
        for row in 0..export.geometry.height_in_blocks {
            let line: String = (0..export.geometry.width_in_blocks)
                .map(|col| direction_glyph(&export.field[row * export.geometry.width_in_blocks + col]))
                .collect();
            log::debug!("{line}");
        }
    }
}

fn direction_glyph(v: &Vector2<f64>) -> char {
    if v.norm() < motion_field::STILL_THRESHOLD {
        return '.';
    }

    let octant = ((v.y.atan2(v.x) / std::f64::consts::FRAC_PI_4).round() as i32).rem_euclid(8);
    ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'][octant as usize]
}

fn check_dimensions(args: &Args) -> anyhow::Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Cannot render a {}x{} scene", args.width, args.height);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = Args::parse();
    check_dimensions(&args)?;

    let pan = Vector2::new(args.pan_x, args.pan_y);
    log::info!("Rendering {} frames of {}x{} panning by ({}, {})", args.frames, args.width, args.height, pan.x, pan.y);
    let scene = SimScene::random(args.seed, args.width, args.height, args.blobs, pan);

    let frames = (0..args.frames)
        .map(|i| preprocess_image(&scene.render(i, args.width, args.height), args.width, args.height, 3))
        .collect::<anyhow::Result<Vec<DMatrix<f64>>>>()?;

    let scheme = match args.scheme {
        Scheme::GaussSeidel => UpdateScheme::GaussSeidel,
        Scheme::Jacobi => UpdateScheme::Jacobi,
    };
    let config = EstimatorConfig::default()
        .with_block_size(args.block_size)
        .with_iterations(args.iterations)
        .with_nu(args.nu)
        .with_lambda(args.lambda)
        .with_lambda_temporal(args.lambda_temporal)
        .with_scheme(scheme);

    let mut exporter = LogExporter { pan, worst_error: 0.0 };
    MotionEstimator::new(config).estimate_into(&frames, &mut exporter)?;

    log::info!("Largest block deviation from the true pan: {:.2} px", exporter.worst_error);

    Ok(())
}

fn setup_logging() {
    simple_log::quick!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scene_is_rejected_before_rendering() {
        let args = Args::parse_from(["motion-field-simulator", "--width", "0"]);
        assert!(check_dimensions(&args).is_err());

        let args = Args::parse_from(["motion-field-simulator", "--height", "0"]);
        assert!(check_dimensions(&args).is_err());

        let args = Args::parse_from(["motion-field-simulator"]);
        assert!(check_dimensions(&args).is_ok());
    }
}
