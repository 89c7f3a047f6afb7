use std::{
    fmt::Display,
    sync::{mpsc, Arc},
};

use clap::{builder::PossibleValue, ValueEnum};
use threadpool::ThreadPool;

use crate::{
    color::{LumaFormula, PrimaryChannel},
    density::Density,
    error::Error,
    image::{extractor::extract_channel, grayscale::GrayscaleConverter, Image},
    logger::log_channel_scores,
    sample_grid::SampleGrid,
    Arguments, Result,
};

/// Decides which of two channel scores is the better background separator.
pub trait SelectionPolicy: Send + Sync {
    /// `true` if `candidate` beats `current`. Must be strict, ties keep the earlier channel.
    fn prefers(&self, candidate: u32, current: u32) -> bool;
}

/// The highest score wins: the channel that is lightest at the sampled points.
pub struct LightestChannel;

impl SelectionPolicy for LightestChannel {
    fn prefers(&self, candidate: u32, current: u32) -> bool {
        candidate > current
    }
}

/// The lowest score wins.
pub struct DarkestChannel;

impl SelectionPolicy for DarkestChannel {
    fn prefers(&self, candidate: u32, current: u32) -> bool {
        candidate < current
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPolicyPreset {
    #[default]
    Lightest,
    Darkest,
}

impl SelectionPolicyPreset {
    pub fn policy(&self) -> Box<dyn SelectionPolicy> {
        match self {
            Self::Lightest => Box::new(LightestChannel),
            Self::Darkest => Box::new(DarkestChannel),
        }
    }
}

impl ValueEnum for SelectionPolicyPreset {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Lightest, Self::Darkest]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Lightest => Some(PossibleValue::new("Lightest")),
            Self::Darkest => Some(PossibleValue::new("Darkest")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelScores {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl ChannelScores {
    pub fn get(&self, channel: PrimaryChannel) -> u32 {
        match channel {
            PrimaryChannel::Red => self.red,
            PrimaryChannel::Green => self.green,
            PrimaryChannel::Blue => self.blue,
        }
    }

    fn set(&mut self, channel: PrimaryChannel, score: u32) {
        match channel {
            PrimaryChannel::Red => self.red = score,
            PrimaryChannel::Green => self.green = score,
            PrimaryChannel::Blue => self.blue = score,
        }
    }

    /// Walks the channels in red, green, blue order and keeps the first one no later channel
    /// is strictly preferred over.
    pub fn best(&self, policy: &dyn SelectionPolicy) -> PrimaryChannel {
        let mut best = PrimaryChannel::Red;
        for channel in [PrimaryChannel::Green, PrimaryChannel::Blue] {
            if policy.prefers(self.get(channel), self.get(best)) {
                best = channel;
            }
        }
        best
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSelection {
    pub channel: PrimaryChannel,
    pub scores: ChannelScores,
}

impl Display for ChannelSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}), scores: red {}, green {}, blue {}",
            self.channel,
            self.channel.ordinal(),
            self.scores.red,
            self.scores.green,
            self.scores.blue
        )
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionOptions {
    pub luma_formula: LumaFormula,
    pub density: Density,
    pub selection_policy: SelectionPolicyPreset,
}

impl TryFrom<&Arguments> for SelectionOptions {
    type Error = Error;

    fn try_from(value: &Arguments) -> Result<Self> {
        Ok(Self {
            luma_formula: value.luma_formula,
            density: Density::new(value.density)?,
            selection_policy: value.selection_policy,
        })
    }
}

pub struct ChannelSelector {
    converter: GrayscaleConverter,
    density: Density,
    policy: Box<dyn SelectionPolicy>,
}

impl ChannelSelector {
    pub fn new(options: &SelectionOptions) -> Self {
        ChannelSelector {
            converter: GrayscaleConverter::new(options.luma_formula),
            density: options.density,
            policy: options.selection_policy.policy(),
        }
    }

    pub fn with_policy(mut self, policy: Box<dyn SelectionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Grayscale rendering of a single channel of `source`.
    pub fn grayscale_channel(&self, source: &Image, channel: PrimaryChannel) -> Result<Image> {
        let extracted = extract_channel(source, channel)?;
        self.converter.convert(&extracted)
    }

    pub fn score_channel(
        &self,
        source: &Image,
        channel: PrimaryChannel,
        grid: &SampleGrid,
    ) -> Result<u32> {
        score_channel(source, channel, &self.converter, grid)
    }

    /// Scores all three channels one after another.
    pub fn score_channels(&self, source: &Image) -> Result<ChannelScores> {
        let grid = SampleGrid::for_image(source, self.density)?;
        let mut scores = ChannelScores::default();
        for channel in PrimaryChannel::ALL {
            scores.set(channel, self.score_channel(source, channel, &grid)?);
        }
        Ok(scores)
    }

    /// Scores every channel on its own worker and combines the scores once all of them
    /// reported back.
    pub fn score_channels_in_parallel(
        &self,
        source: Arc<Image>,
        threadpool: &ThreadPool,
    ) -> Result<ChannelScores> {
        let grid = Arc::new(SampleGrid::for_image(&source, self.density)?);
        let (sender, receiver) = mpsc::channel();
        for channel in PrimaryChannel::ALL {
            let sender = sender.clone();
            let source = Arc::clone(&source);
            let grid = Arc::clone(&grid);
            let converter = self.converter;
            threadpool.execute(move || {
                let score = score_channel(&source, channel, &converter, &grid);
                // a gone receiver means the caller unwound, nobody is left to report to
                let _ = sender.send((channel, score));
            });
        }
        drop(sender);

        let mut results: [Option<Result<u32>>; 3] = [None, None, None];
        for (channel, score) in receiver.iter() {
            results[channel_slot(channel)] = Some(score);
        }
        let mut scores = ChannelScores::default();
        for (channel, result) in PrimaryChannel::ALL.into_iter().zip(results) {
            let score = result.ok_or(Error::ChannelScoringAborted(channel))??;
            scores.set(channel, score);
        }
        Ok(scores)
    }

    pub fn select(&self, scores: ChannelScores) -> ChannelSelection {
        let channel = scores.best(self.policy.as_ref());
        log_channel_scores(&scores, channel);
        ChannelSelection { channel, scores }
    }

    pub fn select_best_channel(&self, source: &Image) -> Result<ChannelSelection> {
        let scores = self.score_channels(source)?;
        Ok(self.select(scores))
    }

    pub fn select_best_channel_in_parallel(
        &self,
        source: Arc<Image>,
        threadpool: &ThreadPool,
    ) -> Result<ChannelSelection> {
        let scores = self.score_channels_in_parallel(source, threadpool)?;
        Ok(self.select(scores))
    }
}

impl Default for ChannelSelector {
    fn default() -> Self {
        Self::new(&SelectionOptions::default())
    }
}

/// Picks the channel of `source` best suited for background removal using the legacy luma
/// formula, a density of 1 and the lightest channel policy.
pub fn select_best_channel(source: &Image) -> Result<PrimaryChannel> {
    let selection = ChannelSelector::default().select_best_channel(source)?;
    Ok(selection.channel)
}

fn score_channel(
    source: &Image,
    channel: PrimaryChannel,
    converter: &GrayscaleConverter,
    grid: &SampleGrid,
) -> Result<u32> {
    let extracted = extract_channel(source, channel)?;
    let gray = converter.convert(&extracted)?;
    drop(extracted);
    let score = grid.sum_luma(&gray)?;
    log::debug!("Score of {} channel is {}", channel, score);
    Ok(score)
}

fn channel_slot(channel: PrimaryChannel) -> usize {
    channel.ordinal() as usize - 1
}
