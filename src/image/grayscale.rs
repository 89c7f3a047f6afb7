use super::Image;
use crate::{
    color::{ArgbColor, LumaFormula},
    Result,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct GrayscaleConverter {
    formula: LumaFormula,
}

impl GrayscaleConverter {
    pub fn new(formula: LumaFormula) -> Self {
        GrayscaleConverter { formula }
    }

    /// Replaces red, green and blue of every dot with its luma. Alpha passes through.
    pub fn convert(&self, source: &Image) -> Result<Image> {
        log::debug!(
            "Converting {}x{} image to grayscale using {:?} luma",
            source.width(),
            source.height(),
            self.formula
        );
        source.map_dots(|dot| ArgbColor::gray(dot.alpha, self.formula.luma(dot)))
    }
}

pub fn to_grayscale(source: &Image) -> Result<Image> {
    GrayscaleConverter::default().convert(source)
}
