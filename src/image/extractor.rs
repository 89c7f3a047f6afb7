use super::Image;
use crate::{color::PrimaryChannel, Result};

/// Projects `source` onto `channel`. Alpha and the selected channel are copied, the other two
/// channels are zeroed.
pub fn extract_channel(source: &Image, channel: PrimaryChannel) -> Result<Image> {
    log::debug!(
        "Extracting {} channel of {}x{} image",
        channel,
        source.width(),
        source.height()
    );
    source.map_dots(|dot| dot.only(channel))
}

#[cfg(test)]
mod test {
    use super::extract_channel;
    use crate::{
        color::{ArgbColor, PrimaryChannel},
        image::Image,
    };

    fn create_gradient_image() -> Image {
        let width = 16;
        let height = 9;
        let dots = (0..width * height)
            .map(|index| {
                let value = (index * 7 % 256) as u8;
                ArgbColor::new(value / 2, value, 255 - value, value ^ 0x5A)
            })
            .collect();
        Image::new(width as u16, height as u16, dots).unwrap()
    }

    #[test]
    fn extraction_keeps_alpha_and_zeroes_other_channels() {
        let source = create_gradient_image();
        for channel in PrimaryChannel::ALL {
            let extracted = extract_channel(&source, channel).unwrap();
            assert_eq!(extracted.width(), source.width());
            assert_eq!(extracted.height(), source.height());
            for (actual, expected) in extracted.dots().iter().zip(source.dots()) {
                assert_eq!(actual.alpha, expected.alpha, "alpha changed");
                for other in PrimaryChannel::ALL {
                    if other == channel {
                        assert_eq!(actual.component(other), expected.component(other));
                    } else {
                        assert_eq!(actual.component(other), 0, "{} not zeroed", other);
                    }
                }
            }
        }
    }

    #[test]
    fn solid_red_image() {
        let red = ArgbColor::opaque(255, 0, 0);
        let source = Image::filled(200, 200, red).unwrap();

        let red_channel = extract_channel(&source, PrimaryChannel::Red).unwrap();
        assert_eq!(red_channel, source);

        let black = ArgbColor::opaque(0, 0, 0);
        for channel in [PrimaryChannel::Green, PrimaryChannel::Blue] {
            let extracted = extract_channel(&source, channel).unwrap();
            assert!(
                extracted.dots().iter().all(|&dot| dot == black),
                "{} extraction of solid red must be black",
                channel
            );
        }
    }

    #[test]
    fn extract_from_empty_image() {
        let source = Image::new(0, 0, Vec::new()).unwrap();
        let extracted = extract_channel(&source, PrimaryChannel::Blue).unwrap();
        assert!(extracted.is_empty());
    }
}
