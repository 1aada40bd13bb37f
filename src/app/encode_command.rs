use super::{
    create_input_file_reader, create_output_writer, input_file_arg, logging_level_cli_arg,
    output_file_arg, parse_arg, Command,
};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use crusti_dcop::{EncodingOptions, InstanceJsonReader, Modeling, XcspWriter, DEFAULT_FORMAT};
use std::io::Write;
use tracing::info;

const CMD_NAME: &str = "encode";

const ARG_MODELING: &str = "ARG_MODELING";
const ARG_MAX_CONSTRAINTS: &str = "ARG_MAX_CONSTRAINTS";
const ARG_FORMAT: &str = "ARG_FORMAT";

#[derive(Default)]
pub(crate) struct EncodeCommand;

impl<'a> Command<'a> for EncodeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Encodes an instance document into an XCSP DCOP")
            .setting(AppSettings::DisableVersion)
            .arg(input_file_arg("the JSON document of the instance"))
            .arg(output_file_arg())
            .arg(
                Arg::with_name(ARG_MODELING)
                    .short("m")
                    .long("modeling")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(&["1", "2", "assignment-indicator", "passenger-domain"])
                    .default_value("1")
                    .help("the modeling used to encode the instance"),
            )
            .arg(
                Arg::with_name(ARG_MAX_CONSTRAINTS)
                    .long("max-constraints")
                    .empty_values(false)
                    .multiple(false)
                    .help("fails instead of emitting more constraints than this value"),
            )
            .arg(
                Arg::with_name(ARG_FORMAT)
                    .long("format")
                    .empty_values(false)
                    .multiple(false)
                    .default_value(DEFAULT_FORMAT)
                    .help("the format tag written in the presentation"),
            )
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let instance = InstanceJsonReader.read(create_input_file_reader(arg_matches)?)?;
        let modeling = parse_arg::<Modeling>(arg_matches, ARG_MODELING)?;
        let constraint_budget = match arg_matches.value_of(ARG_MAX_CONSTRAINTS) {
            Some(_) => Some(parse_arg::<u128>(arg_matches, ARG_MAX_CONSTRAINTS)?),
            None => None,
        };
        let options = EncodingOptions {
            format: arg_matches.value_of(ARG_FORMAT).unwrap().to_string(),
            constraint_budget,
        };
        let problem = modeling
            .encode(&instance, &options)
            .with_context(|| format!("while encoding with modeling {}", modeling))?;
        info!(
            "modeling {} produced {} variables, {} relations and {} constraints",
            modeling,
            problem.variables().len(),
            problem.relations().len(),
            problem.constraints().len()
        );
        let (str_out, mut writer) = create_output_writer(arg_matches)?;
        info!("writing the encoded problem to {}", str_out);
        XcspWriter.write(&mut writer, &problem)?;
        writer.flush().context("while flushing the output")
    }
}
