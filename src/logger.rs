use crate::{color::PrimaryChannel, selector::ChannelScores};

const LOG_CONFIGURATION_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(error) = log4rs::init_file(LOG_CONFIGURATION_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIGURATION_FILE, error
        );
    }
}

pub fn log_channel_scores(scores: &ChannelScores, selected: PrimaryChannel) {
    fn describe(scores: &ChannelScores, channel: PrimaryChannel) -> String {
        format!("{}={}", channel, scores.get(channel))
    }
    log::info!(
        "Selected {} channel ({}) from scores {:?}",
        selected,
        selected.ordinal(),
        PrimaryChannel::ALL.map(|channel| describe(scores, channel))
    );
}
