use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use std::{
    fmt::Display,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod encode_command;
pub(crate) use encode_command::EncodeCommand;

mod generate_command;
pub(crate) use generate_command::GenerateCommand;

mod stats_command;
pub(crate) use stats_command::StatsCommand;

pub(crate) const ARG_INPUT: &str = "ARG_INPUT";
pub(crate) const ARG_OUTPUT: &str = "ARG_OUTPUT";
const ARG_LOGGING_LEVEL: &str = "ARG_LOGGING_LEVEL";

/// A subcommand of the application.
pub(crate) trait Command<'a> {
    fn name(&self) -> &str;

    fn clap_subcommand(&self) -> App<'a, 'a>;

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOGGING_LEVEL)
        .long("logging-level")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
        .default_value("info")
        .help("the minimal level of the log messages")
}

/// Installs the global logger, writing to the standard error.
///
/// The `RUST_LOG` environment variable takes precedence over the level given on the command line.
pub(crate) fn init_logging(arg_matches: &ArgMatches<'_>) {
    let level = arg_matches.value_of(ARG_LOGGING_LEVEL).unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

pub(crate) fn input_file_arg<'a>(help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(ARG_INPUT)
        .short("i")
        .long("input")
        .empty_values(false)
        .multiple(false)
        .help(help)
        .required(true)
}

pub(crate) fn output_file_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_OUTPUT)
        .short("o")
        .long("output")
        .empty_values(false)
        .multiple(false)
        .help("outputs to a file instead of standard output")
}

pub(crate) fn create_input_file_reader(arg_matches: &ArgMatches<'_>) -> Result<BufReader<File>> {
    let input_file_canonicalized = realpath_from_arg(arg_matches, ARG_INPUT)?;
    info!("reading input file {:?}", input_file_canonicalized);
    Ok(BufReader::new(File::open(input_file_canonicalized)?))
}

/// Opens the output given on the command line, or the standard output if none.
///
/// Returns the writer and a description of the output for log messages.
pub(crate) fn create_output_writer(
    arg_matches: &ArgMatches<'_>,
) -> Result<(String, BufWriter<Box<dyn Write>>)> {
    let (str_out, unbuffered_out): (String, Box<dyn Write>) = match arg_matches.value_of(ARG_OUTPUT)
    {
        None => ("standard output".to_string(), Box::new(io::stdout())),
        Some(path) => {
            let file = File::create(path).context("while creating the output file")?;
            let str_path = fs::canonicalize(PathBuf::from(path))
                .with_context(|| format!(r#"while opening file "{}""#, path))?;
            (format!("{:?}", str_path), Box::new(file))
        }
    };
    Ok((str_out, BufWriter::new(unbuffered_out)))
}

pub(crate) fn parse_arg<T>(arg_matches: &ArgMatches<'_>, arg: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = arg_matches.value_of(arg).unwrap();
    str::parse::<T>(value)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!(r#"while parsing value "{}""#, value))
}

fn realpath_from_arg(arg_matches: &ArgMatches<'_>, arg: &str) -> Result<PathBuf> {
    let file_path = arg_matches.value_of(arg).unwrap();
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}
