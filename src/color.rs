use std::fmt::Display;

use clap::{builder::PossibleValue, ValueEnum};

use crate::{error::Error, Result};

const WEIGHT_SCALE: u32 = 1000;
const RED_WEIGHT: u32 = 299;
const GREEN_WEIGHT: u32 = 587;
const BLUE_WEIGHT: u32 = 114;

const LEGACY_RED_FACTOR: f64 = 0.299;
const LEGACY_BLUE_FACTOR: f64 = 0.587;
const LEGACY_GREEN_OFFSET: f64 = 0.114;

/// A single pixel with independent 8 bit alpha and color components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArgbColor {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ArgbColor {
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        ArgbColor {
            alpha,
            red,
            green,
            blue,
        }
    }

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(u8::MAX, red, green, blue)
    }

    pub const fn gray(alpha: u8, luma: u8) -> Self {
        Self::new(alpha, luma, luma, luma)
    }

    pub fn component(&self, channel: PrimaryChannel) -> u8 {
        match channel {
            PrimaryChannel::Red => self.red,
            PrimaryChannel::Green => self.green,
            PrimaryChannel::Blue => self.blue,
        }
    }

    /// Keeps alpha and the given channel, the other two channels become zero.
    pub fn only(&self, channel: PrimaryChannel) -> Self {
        let mut projected = Self::new(self.alpha, 0, 0, 0);
        match channel {
            PrimaryChannel::Red => projected.red = self.red,
            PrimaryChannel::Green => projected.green = self.green,
            PrimaryChannel::Blue => projected.blue = self.blue,
        }
        projected
    }

    pub fn is_gray(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }
}

/// Packed `0xAARRGGBB`.
impl From<u32> for ArgbColor {
    fn from(value: u32) -> Self {
        let [alpha, red, green, blue] = value.to_be_bytes();
        ArgbColor::new(alpha, red, green, blue)
    }
}

impl From<ArgbColor> for u32 {
    fn from(value: ArgbColor) -> Self {
        u32::from_be_bytes([value.alpha, value.red, value.green, value.blue])
    }
}

/// Primary color channels. The discriminants are the ordinals downstream consumers index by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrimaryChannel {
    Red = 1,
    Green = 2,
    Blue = 3,
}

impl PrimaryChannel {
    /// All channels in tie-break priority order.
    pub const ALL: [PrimaryChannel; 3] = [Self::Red, Self::Green, Self::Blue];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl TryFrom<u8> for PrimaryChannel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Red),
            2 => Ok(Self::Green),
            3 => Ok(Self::Blue),
            _ => Err(Error::InvalidChannelOrdinal(value)),
        }
    }
}

impl Display for PrimaryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Color with components in the range `0..=max`, as found in PPM files.
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

impl RangeColorFormat<u16> {
    pub fn new(max: u16, red: u16, green: u16, blue: u16) -> Result<Self> {
        if max == 0 {
            return Err(Error::InvalidMaxValue(max));
        }
        for component in [red, green, blue] {
            if component > max {
                return Err(Error::ColorComponentExceedsMaxValue(component, max));
            }
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }

    fn rescale(&self, component: u16) -> u8 {
        let max = self.max as u32;
        let scaled = (component as u32 * u8::MAX as u32 + max / 2) / max;
        scaled.min(u8::MAX as u32) as u8
    }
}

impl From<&RangeColorFormat<u16>> for ArgbColor {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        ArgbColor::opaque(
            value.rescale(value.red),
            value.rescale(value.green),
            value.rescale(value.blue),
        )
    }
}

impl From<RangeColorFormat<u16>> for ArgbColor {
    fn from(value: RangeColorFormat<u16>) -> Self {
        ArgbColor::from(&value)
    }
}

/// How a color is reduced to a single luminance value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LumaFormula {
    /// `0.299 * red + 0.587 * blue + 0.114 + green`. The 0.587 weight lands on blue and
    /// the 0.114 weight is added as a constant while green goes in unweighted. Kept for
    /// parity with consumers of the established scores, so it is evaluated in `f64`
    /// left to right and truncated, rounding artifacts included.
    #[default]
    Legacy,
    /// `0.299 * red + 0.587 * green + 0.114 * blue`, in integer thousandths so the
    /// truncation is exact.
    Standard,
}

impl LumaFormula {
    pub fn luma(&self, color: &ArgbColor) -> u8 {
        let red = color.red as u32;
        let green = color.green as u32;
        let blue = color.blue as u32;
        let luma = match self {
            Self::Legacy => {
                let luma = LEGACY_RED_FACTOR * red as f64
                    + LEGACY_BLUE_FACTOR * blue as f64
                    + LEGACY_GREEN_OFFSET
                    + green as f64;
                // float to int casts truncate toward zero and saturate
                luma as u32
            }
            Self::Standard => {
                (RED_WEIGHT * red + GREEN_WEIGHT * green + BLUE_WEIGHT * blue) / WEIGHT_SCALE
            }
        };
        luma.min(u8::MAX as u32) as u8
    }
}

impl ValueEnum for LumaFormula {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Legacy, Self::Standard]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Legacy => Some(PossibleValue::new("Legacy")),
            Self::Standard => Some(PossibleValue::new("Standard")),
        }
    }
}
