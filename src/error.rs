use std::fmt::Display;

use crate::color::PrimaryChannel;

#[derive(Debug)]
pub enum Error {
    InvalidChannelOrdinal(u8),
    ImageTooSmallForSampleGrid {
        width: u16,
        height: u16,
        minimum: u16,
    },
    FaceBandDoesNotFit {
        width: u16,
        face_width: u32,
    },
    InvalidDensity(f32),
    MismatchOfSizeBetweenDimensionsAndDots {
        expected: usize,
        actual: usize,
    },
    SampleGridDoesNotMatchImage,
    AllocationFailure(usize),
    ChannelScoringAborted(PrimaryChannel),
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ColorComponentExceedsMaxValue(u16, u16),
    InvalidMaxValue(u16),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadImage(std::io::Error),
    FailedToWriteImage(std::io::Error),
}

impl Error {
    /// Whether the error was caused by an argument outside of the accepted domain,
    /// as opposed to a failing resource or malformed input file.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidChannelOrdinal(_)
                | Self::ImageTooSmallForSampleGrid { .. }
                | Self::FaceBandDoesNotFit { .. }
                | Self::InvalidDensity(_)
                | Self::MismatchOfSizeBetweenDimensionsAndDots { .. }
                | Self::SampleGridDoesNotMatchImage
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChannelOrdinal(ordinal) => {
                write!(
                    f,
                    "Channel ordinal {} is invalid. Expected 1 (red), 2 (green) or 3 (blue).",
                    ordinal
                )
            }
            Self::ImageTooSmallForSampleGrid {
                width,
                height,
                minimum,
            } => {
                write!(
                    f,
                    "Image of {}x{} is too small for the sample grid, both sides must be at least {}",
                    width, height, minimum
                )
            }
            Self::FaceBandDoesNotFit { width, face_width } => {
                write!(
                    f,
                    "Face band of {} pixels does not fit into an image of width {}",
                    face_width, width
                )
            }
            Self::InvalidDensity(density) => {
                write!(
                    f,
                    "Density must be a positive finite number, but was {}",
                    density
                )
            }
            Self::MismatchOfSizeBetweenDimensionsAndDots { expected, actual } => {
                write!(
                    f,
                    "Image dimensions require {} dots, but {} were provided",
                    expected, actual
                )
            }
            Self::SampleGridDoesNotMatchImage => {
                write!(f, "Sample grid was built for different image dimensions")
            }
            Self::AllocationFailure(number_of_dots) => {
                write!(f, "Unable to allocate an image of {} dots", number_of_dots)
            }
            Self::ChannelScoringAborted(channel) => {
                write!(f, "Scoring of the {} channel was aborted", channel)
            }
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels do not match the size, provided in header"
                )
            }
            Self::ColorComponentExceedsMaxValue(component, max) => {
                write!(
                    f,
                    "Color component {} exceeds the max value of {}",
                    component, max
                )
            }
            Self::InvalidMaxValue(max) => {
                write!(f, "Max value {} in PPM header is invalid", max)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadImage(error) => write!(f, "Failed to read image: {}", error),
            Self::FailedToWriteImage(error) => write!(f, "Failed to write image: {}", error),
        }
    }
}

impl std::error::Error for Error {}
