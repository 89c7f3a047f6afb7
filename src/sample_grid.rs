//! Fixed sampling pattern used to score a grayscale rendering.
//!
//! Four points sit just inside the corners of the frame, where a portrait usually shows
//! background. Fifty more points lie on a horizontal line through the vertical center,
//! spanning the width a face occupies in a front facing selfie.

use crate::{density::Density, error::Error, image::Image, Result};

/// Distance of the corner points from the image edges, in pixels.
pub const CORNER_INSET: u16 = 5;
/// Width of the face band in density-independent units.
pub const FACE_WIDTH_DP: f32 = 100.0;
pub const CORNER_POINT_COUNT: usize = 4;
pub const FACE_BAND_POINT_COUNT: usize = 50;
pub const SAMPLE_POINT_COUNT: usize = CORNER_POINT_COUNT + FACE_BAND_POINT_COUNT;

const MINIMUM_SIDE_LENGTH: u16 = 2 * CORNER_INSET + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplePoint {
    pub x: u16,
    pub y: u16,
}

impl SamplePoint {
    fn new(x: u16, y: u16) -> Self {
        SamplePoint { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleGrid {
    width: u16,
    height: u16,
    points: Vec<SamplePoint>,
}

impl SampleGrid {
    pub fn new(width: u16, height: u16, density: Density) -> Result<Self> {
        Self::check_corners_fit(width, height)?;
        let face_width = Self::face_band_width(width, density)?;
        let mut points = Vec::with_capacity(SAMPLE_POINT_COUNT);
        points.extend(Self::corner_points(width, height));
        points.extend(Self::face_band_points(width, height, face_width));
        log::debug!(
            "Built sample grid for {}x{} with a face band of {} pixels",
            width,
            height,
            face_width
        );
        Ok(SampleGrid {
            width,
            height,
            points,
        })
    }

    pub fn for_image(image: &Image, density: Density) -> Result<Self> {
        Self::new(image.width(), image.height(), density)
    }

    /// Corner points (top left, top right, bottom left, bottom right) followed by the face
    /// band from left to right.
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn matches(&self, image: &Image) -> bool {
        self.width == image.width() && self.height == image.height()
    }

    /// Sums the red component of `image` at every sample point. On a grayscale image that is
    /// the luma of each sampled dot.
    pub fn sum_luma(&self, image: &Image) -> Result<u32> {
        if !self.matches(image) {
            return Err(Error::SampleGridDoesNotMatchImage);
        }
        Ok(self
            .points
            .iter()
            .map(|point| image.dot(point.x, point.y).red as u32)
            .sum())
    }

    fn check_corners_fit(width: u16, height: u16) -> Result<()> {
        if width < MINIMUM_SIDE_LENGTH || height < MINIMUM_SIDE_LENGTH {
            return Err(Error::ImageTooSmallForSampleGrid {
                width,
                height,
                minimum: MINIMUM_SIDE_LENGTH,
            });
        }
        Ok(())
    }

    fn face_band_width(width: u16, density: Density) -> Result<u16> {
        // float to int casts saturate, the density is positive and finite
        let face_width = density.dp_to_px(FACE_WIDTH_DP) as u32;
        if face_width == 0 || face_width > width as u32 {
            return Err(Error::FaceBandDoesNotFit { width, face_width });
        }
        Ok(face_width as u16)
    }

    fn corner_points(width: u16, height: u16) -> [SamplePoint; CORNER_POINT_COUNT] {
        let left = CORNER_INSET;
        let top = CORNER_INSET;
        let right = width - 1 - CORNER_INSET;
        let bottom = height - 1 - CORNER_INSET;
        [
            SamplePoint::new(left, top),
            SamplePoint::new(right, top),
            SamplePoint::new(left, bottom),
            SamplePoint::new(right, bottom),
        ]
    }

    fn face_band_points(
        width: u16,
        height: u16,
        face_width: u16,
    ) -> impl Iterator<Item = SamplePoint> {
        let left = (width - face_width) as u32 / 2;
        let span = face_width as u32 - 1;
        let last_step = FACE_BAND_POINT_COUNT as u32 - 1;
        let y = height / 2;
        (0..FACE_BAND_POINT_COUNT as u32).map(move |step| {
            let x = left + step * span / last_step;
            SamplePoint::new(x as u16, y)
        })
    }
}

#[cfg(test)]
mod test {
    use super::{SampleGrid, SamplePoint, CORNER_POINT_COUNT, SAMPLE_POINT_COUNT};
    use crate::{density::Density, error::Error};

    #[test]
    fn grid_has_54_points_inside_the_image() {
        for (width, height) in [(100, 11), (200, 200), (101, 4000), (640, 480), (u16::MAX, 11)] {
            let grid = SampleGrid::new(width, height, Density::default()).unwrap();
            assert_eq!(grid.points().len(), SAMPLE_POINT_COUNT);
            for point in grid.points() {
                assert!(
                    point.x < width && point.y < height,
                    "{:?} outside of {}x{}",
                    point,
                    width,
                    height
                );
            }
        }
    }

    #[test]
    fn grid_layout_for_200x200() {
        let grid = SampleGrid::new(200, 200, Density::default()).unwrap();
        let points = grid.points();
        assert_eq!(
            &points[..CORNER_POINT_COUNT],
            &[
                SamplePoint { x: 5, y: 5 },
                SamplePoint { x: 194, y: 5 },
                SamplePoint { x: 5, y: 194 },
                SamplePoint { x: 194, y: 194 },
            ]
        );
        let band = &points[CORNER_POINT_COUNT..];
        assert_eq!(band.first(), Some(&SamplePoint { x: 50, y: 100 }));
        assert_eq!(band.last(), Some(&SamplePoint { x: 149, y: 100 }));
        assert!(band.windows(2).all(|pair| pair[0].x < pair[1].x));
    }

    #[test]
    fn face_band_scales_with_density() {
        let density = Density::new(2.0).unwrap();
        let grid = SampleGrid::new(400, 300, density).unwrap();
        let band = &grid.points()[CORNER_POINT_COUNT..];
        assert_eq!(band.first(), Some(&SamplePoint { x: 100, y: 150 }));
        assert_eq!(band.last(), Some(&SamplePoint { x: 299, y: 150 }));
    }

    #[test]
    fn grid_is_deterministic() {
        let first = SampleGrid::new(333, 517, Density::default()).unwrap();
        let second = SampleGrid::new(333, 517, Density::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_pixel_image_is_rejected() {
        let result = SampleGrid::new(1, 1, Density::default());
        match result {
            Err(error @ Error::ImageTooSmallForSampleGrid { .. }) => {
                assert!(error.is_invalid_argument())
            }
            _ => panic!("1x1 image must not fit the sample grid"),
        }
    }

    #[test]
    fn too_narrow_for_face_band() {
        let result = SampleGrid::new(99, 200, Density::default());
        assert!(matches!(
            result,
            Err(Error::FaceBandDoesNotFit {
                width: 99,
                face_width: 100
            })
        ));
    }

    #[test]
    fn face_band_vanishes_for_tiny_density() {
        let density = Density::new(0.001).unwrap();
        let result = SampleGrid::new(200, 200, density);
        assert!(matches!(result, Err(Error::FaceBandDoesNotFit { .. })));
    }
}
