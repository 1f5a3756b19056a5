use nalgebra::DMatrix;

/// Read-only access to the intensities of one frame.
///
/// Only `width`, `height` and `pixel` have to be provided. `sample` interpolates
/// bilinearly between pixels and never reads outside the frame: the queried
/// coordinate is clamped to `[0, width - 1] x [0, height - 1]` first.
pub trait Frame {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn pixel(&self, x: usize, y: usize) -> f64;

    fn sample(&self, x: f64, y: f64) -> f64 {
        let max_x = self.width().saturating_sub(1);
        let max_y = self.height().saturating_sub(1);

        let x = x.clamp(0.0, max_x as f64);
        let y = y.clamp(0.0, max_y as f64);

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(max_x);
        let y1 = (y0 + 1).min(max_y);

        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let top = self.pixel(x0, y0) * (1.0 - fx) + self.pixel(x1, y0) * fx;
        let bottom = self.pixel(x0, y1) * (1.0 - fx) + self.pixel(x1, y1) * fx;

        top * (1.0 - fy) + bottom * fy
    }
}

// Rows are image lines, columns are pixels within a line
impl Frame for DMatrix<f64> {
    fn width(&self) -> usize {
        self.ncols()
    }

    fn height(&self) -> usize {
        self.nrows()
    }

    #[inline(always)]
    fn pixel(&self, x: usize, y: usize) -> f64 {
        self[(y, x)]
    }
}

impl<F: Frame + ?Sized> Frame for &F {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn pixel(&self, x: usize, y: usize) -> f64 {
        (**self).pixel(x, y)
    }

    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn ramp() -> DMatrix<f64> {
        // f(x, y) = x + 10 y
        DMatrix::from_fn(4, 5, |y, x| x as f64 + 10.0 * y as f64)
    }

    #[test]
    fn dimensions_follow_rows_and_columns() {
        let frame = ramp();
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.pixel(3, 2), 23.0);
    }

    #[test]
    fn integer_sample_matches_pixel() {
        let frame = ramp();
        assert_eq!(frame.sample(2.0, 1.0), frame.pixel(2, 1));
        assert_eq!(frame.sample(4.0, 3.0), 34.0);
    }

    #[test]
    fn bilinear_between_pixels() {
        let frame = ramp();
        assert_relative_eq!(frame.sample(1.5, 0.0), 1.5);
        assert_relative_eq!(frame.sample(1.25, 2.5), 26.25);
    }

    #[test]
    fn out_of_range_coordinates_are_clamped() {
        let frame = ramp();
        assert_eq!(frame.sample(-3.0, -0.5), 0.0);
        assert_eq!(frame.sample(100.0, 1.0), 14.0);
        assert_eq!(frame.sample(4.5, 3.5), 34.0);
        assert_relative_eq!(frame.sample(2.5, 9.0), 32.5);
    }

    #[test]
    fn borrowed_frames_sample_like_owned_ones() {
        let frame = ramp();
        let borrowed = vec![&frame, &frame];
        assert_eq!(borrowed[1].width(), 5);
        assert_eq!(Frame::sample(&borrowed[0], 0.5, 0.5), frame.sample(0.5, 0.5));
    }
}
