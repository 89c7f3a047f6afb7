use std::io::Write;

use crate::{
    error::Error,
    image::{Image, ImageWriter},
};

const MAX_VALUE: u8 = u8::MAX;

/// Writes an image as plain (P3) PPM. PPM has no alpha, so alpha is dropped.
pub struct PPMImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Image,
}

impl<'a, T: Write> PPMImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Image) -> Self {
        Self { writer, image }
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "P3\n{} {}\n{}",
            self.image.width(),
            self.image.height(),
            MAX_VALUE
        )
    }

    fn write_dots(&mut self) -> std::io::Result<()> {
        for row in self.image.rows() {
            let line = row
                .iter()
                .map(|dot| format!("{} {} {}", dot.red, dot.green, dot.blue))
                .collect::<Vec<String>>()
                .join("  ");
            writeln!(self.writer, "{}", line)?;
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for PPMImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        self.write_header().map_err(Error::FailedToWriteImage)?;
        self.write_dots().map_err(Error::FailedToWriteImage)?;
        self.writer.flush().map_err(Error::FailedToWriteImage)
    }
}

#[cfg(test)]
mod test {
    use super::PPMImageWriter;
    use crate::{
        color::ArgbColor,
        image::{reader::ppm::PPMImageReader, Image, ImageReader, ImageWriter},
    };

    #[test]
    fn write_small_image() {
        let dots = vec![
            ArgbColor::new(0, 255, 0, 0),
            ArgbColor::opaque(0, 255, 0),
            ArgbColor::opaque(0, 0, 255),
            ArgbColor::opaque(1, 2, 3),
        ];
        let image = Image::new(2, 2, dots).unwrap();
        let mut buffer = Vec::new();
        PPMImageWriter::new(&mut buffer, &image)
            .write_image()
            .unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(written, "P3\n2 2\n255\n255 0 0  0 255 0\n0 0 255  1 2 3\n");
    }

    #[test]
    fn written_image_reads_back_opaque() {
        let image = Image::filled(5, 3, ArgbColor::new(12, 40, 80, 120)).unwrap();
        let mut buffer = Vec::new();
        PPMImageWriter::new(&mut buffer, &image)
            .write_image()
            .unwrap();
        let read_back = PPMImageReader::new(buffer.as_slice()).read_image().unwrap();
        assert_eq!(read_back.width(), 5);
        assert_eq!(read_back.height(), 3);
        assert!(read_back
            .dots()
            .iter()
            .all(|&dot| dot == ArgbColor::opaque(40, 80, 120)));
    }

    #[test]
    fn write_empty_image() {
        let image = Image::new(0, 0, Vec::new()).unwrap();
        let mut buffer = Vec::new();
        PPMImageWriter::new(&mut buffer, &image)
            .write_image()
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "P3\n0 0\n255\n");
    }
}
