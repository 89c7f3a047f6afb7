use crate::{color::ArgbColor, error::Error, Result};

pub mod extractor;
pub mod grayscale;
pub mod reader;
pub mod writer;

pub trait ImageReader {
    fn read_image(&mut self) -> Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> Result<()>;
}

/// Row major ARGB image. Transformations never touch the source, they allocate a new image
/// of identical dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u16,
    height: u16,
    dots: Vec<ArgbColor>,
}

impl Image {
    pub fn new(width: u16, height: u16, dots: Vec<ArgbColor>) -> Result<Self> {
        let expected = number_of_dots(width, height);
        if dots.len() != expected {
            return Err(Error::MismatchOfSizeBetweenDimensionsAndDots {
                expected,
                actual: dots.len(),
            });
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    pub fn filled(width: u16, height: u16, color: ArgbColor) -> Result<Self> {
        let length = number_of_dots(width, height);
        let mut dots = allocate_dots(length)?;
        dots.resize(length, color);
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn dots(&self) -> &[ArgbColor] {
        &self.dots
    }

    pub fn dot(&self, column_index: u16, row_index: u16) -> ArgbColor {
        self.dots[self.index(column_index, row_index)]
    }

    pub fn set_dot(&mut self, column_index: u16, row_index: u16, color: ArgbColor) {
        let index = self.index(column_index, row_index);
        self.dots[index] = color;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[ArgbColor]> {
        // chunks panics on zero, an image without columns has no rows to yield anyway
        self.dots.chunks(self.width.max(1) as usize)
    }

    /// Applies `transform` to every dot, writing into one freshly allocated buffer.
    pub fn map_dots<F>(&self, transform: F) -> Result<Image>
    where
        F: Fn(&ArgbColor) -> ArgbColor,
    {
        let mut dots = allocate_dots(self.dots.len())?;
        dots.extend(self.dots.iter().map(transform));
        Ok(Image {
            width: self.width,
            height: self.height,
            dots,
        })
    }

    fn index(&self, column_index: u16, row_index: u16) -> usize {
        assert!(
            column_index < self.width && row_index < self.height,
            "Dot ({}, {}) is outside of a {}x{} image",
            column_index,
            row_index,
            self.width,
            self.height
        );
        column_index as usize + row_index as usize * self.width as usize
    }
}

fn number_of_dots(width: u16, height: u16) -> usize {
    width as usize * height as usize
}

fn allocate_dots(length: usize) -> Result<Vec<ArgbColor>> {
    let mut dots = Vec::new();
    dots.try_reserve_exact(length).map_err(|_| Error::AllocationFailure(length))?;
    Ok(dots)
}
