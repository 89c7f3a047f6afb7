use crate::color::LumaFormula;
use crate::density::DEFAULT_DENSITY;
use crate::selector::SelectionPolicyPreset;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_density_argument(command);
        let command = Self::register_luma_formula_argument(command);
        let command = Self::register_selection_policy_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_dump_directory_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_density_argument(command: Command) -> Command {
        command.arg(Self::create_density_argument())
    }

    fn register_luma_formula_argument(command: Command) -> Command {
        command.arg(Self::create_luma_formula_argument())
    }

    fn register_selection_policy_argument(command: Command) -> Command {
        command.arg(Self::create_selection_policy_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_dump_directory_argument(command: Command) -> Command {
        command.arg(Self::create_dump_directory_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PPM portrait")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_density_argument() -> Arg {
        arg!(-d --density <DENSITY> "Display density, pixels per density-independent unit")
            .default_value(DEFAULT_DENSITY.to_string())
            .value_parser(value_parser!(f32))
    }

    fn create_luma_formula_argument() -> Arg {
        arg!(luma_formula: -f --luma_formula <FORMULA> "Luma formula of the grayscale conversion")
            .default_value("Legacy")
            .value_parser(value_parser!(LumaFormula))
    }

    fn create_selection_policy_argument() -> Arg {
        arg!(selection_policy: -p --selection_policy <POLICY> "Which channel score wins")
            .default_value("Lightest")
            .value_parser(value_parser!(SelectionPolicyPreset))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_dump_directory_argument() -> Arg {
        arg!(dump_directory: -o --dump_directory <DIR> "Directory to write the grayscale channels to")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            density: Self::extract_density_argument(matches),
            luma_formula: Self::extract_luma_formula_argument(matches),
            selection_policy: Self::extract_selection_policy_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            dump_directory: Self::extract_dump_directory_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_density_argument(matches: &ArgMatches) -> f32 {
        matches
            .get_one::<f32>("density")
            .expect("Density must be provided, but was unset.")
            .to_owned()
    }

    fn extract_luma_formula_argument(matches: &ArgMatches) -> LumaFormula {
        matches
            .get_one::<LumaFormula>("luma_formula")
            .expect("Luma formula must be provided, but was unset.")
            .to_owned()
    }

    fn extract_selection_policy_argument(matches: &ArgMatches) -> SelectionPolicyPreset {
        matches
            .get_one::<SelectionPolicyPreset>("selection_policy")
            .expect("Selection policy must be provided, but was unset.")
            .to_owned()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_dump_directory_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("dump_directory").cloned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::{CLIParser, LumaFormula, SelectionPolicyPreset};

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "portrait.ppm";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_density_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_density_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--density", "2.75"]);
        let density = CLIParser::extract_density_argument(&matches);
        assert_eq!(density, 2.75);
    }

    #[test]
    fn parse_density_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_density_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-d", "dense"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Illegal value for density not detected");
        }
    }

    #[test]
    fn parse_luma_formula_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_luma_formula_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--luma_formula", "Standard"]);
        let actual = CLIParser::extract_luma_formula_argument(&matches);
        assert_eq!(actual, LumaFormula::Standard);
    }

    #[test]
    fn parse_luma_formula_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_luma_formula_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-f", "Average"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::InvalidValue);
        } else {
            panic!("Illegal value for luma_formula not detected");
        }
    }

    #[test]
    fn parse_selection_policy_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_selection_policy_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-p", "Darkest"]);
        let actual = CLIParser::extract_selection_policy_argument(&matches);
        assert_eq!(actual, SelectionPolicyPreset::Darkest);
    }

    #[test]
    fn parse_number_of_threads_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_threads_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--threads", "5"]);
        let actual = CLIParser::extract_threads_argument(&matches);
        let expected = 5;
        assert_eq!(actual, expected);
    }

    #[test]
    fn parse_dump_directory_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_dump_directory_argument(command);
        let matches = command
            .clone()
            .get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-o", "/tmp/channels"]);
        let actual = CLIParser::extract_dump_directory_argument(&matches);
        assert_eq!(actual.unwrap().file_name().unwrap(), "channels");

        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(CLIParser::extract_dump_directory_argument(&matches).is_none());
    }

    #[test]
    fn parse_required_arguments_only() {
        let input_file_name = "portrait.ppm";
        let input_file_path = format!("/input_directory/{}", input_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, &input_file_path, "-t", "8"]);
        assert_eq!(
            arguments.input_file.file_name().unwrap(),
            input_file_name,
            "input file does not match"
        );
        assert_eq!(arguments.density, 1.0, "density does not match");
        assert_eq!(
            arguments.luma_formula,
            LumaFormula::Legacy,
            "luma_formula does not match"
        );
        assert_eq!(
            arguments.selection_policy,
            SelectionPolicyPreset::Lightest,
            "selection_policy does not match"
        );
        assert_eq!(
            arguments.number_of_threads, 8,
            "number_of_threads does not match"
        );
        assert!(
            arguments.dump_directory.is_none(),
            "dump_directory does not match"
        );
    }
}
