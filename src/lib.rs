use std::{
    fs::{self, File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    sync::Arc,
};

pub use cli::CLIParser;
pub use color::{ArgbColor, LumaFormula, PrimaryChannel};
pub use density::Density;
pub use error::Error;
pub use image::{
    extractor::extract_channel,
    grayscale::{to_grayscale, GrayscaleConverter},
    reader::ppm::PPMImageReader,
    writer::ppm::PPMImageWriter,
    Image, ImageReader, ImageWriter,
};
pub use sample_grid::{SampleGrid, SamplePoint};
pub use selector::{
    select_best_channel, ChannelScores, ChannelSelection, ChannelSelector, DarkestChannel,
    LightestChannel, SelectionOptions, SelectionPolicy, SelectionPolicyPreset,
};

use threadpool::ThreadPool;

mod cli;
mod color;
mod density;
mod error;
mod image;
mod logger;
pub mod sample_grid;
mod selector;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    density: f32,
    luma_formula: LumaFormula,
    selection_policy: SelectionPolicyPreset,
    number_of_threads: usize,
    dump_directory: Option<PathBuf>,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

fn read_ppm_image(file_path: &Path) -> Result<Image> {
    let input_file = open_input_file(file_path)?;
    let mut reader = PPMImageReader::new(BufReader::new(input_file));
    reader.read_image()
}

fn write_ppm_image(file_path: &Path, image: &Image) -> Result<()> {
    let output_file = open_output_file(file_path)?;
    let mut writer = PPMImageWriter::new(BufWriter::new(output_file), image);
    writer.write_image()
}

fn dump_grayscale_channels(
    selector: &ChannelSelector,
    image: &Image,
    directory: &Path,
) -> Result<()> {
    fs::create_dir_all(directory).map_err(|e| {
        Error::UnableToOpenOutputFileForWriting(directory.display().to_string(), e)
    })?;
    for channel in PrimaryChannel::ALL {
        let gray = selector.grayscale_channel(image, channel)?;
        let file_path = directory.join(format!("{}_gray.ppm", channel.name()));
        write_ppm_image(&file_path, &gray)?;
        log::info!("Wrote {} grayscale to {}", channel, file_path.display());
    }
    Ok(())
}

pub fn select_channel_for_ppm(arguments: &Arguments) -> Result<ChannelSelection> {
    let options = SelectionOptions::try_from(arguments)?;
    let image = Arc::new(read_ppm_image(&arguments.input_file)?);
    log::info!(
        "Selecting channel of {} ({}x{}) with {} threads",
        arguments.input_file.display(),
        image.width(),
        image.height(),
        arguments.number_of_threads
    );
    let selector = ChannelSelector::new(&options);
    let threadpool = ThreadPool::new(arguments.number_of_threads.max(1));
    let selection = selector.select_best_channel_in_parallel(Arc::clone(&image), &threadpool)?;
    if let Some(directory) = &arguments.dump_directory {
        dump_grayscale_channels(&selector, &image, directory)?;
    }
    Ok(selection)
}
