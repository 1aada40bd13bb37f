use super::{create_input_file_reader, input_file_arg, logging_level_cli_arg, Command};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use crusti_dcop::{EncodingOptions, InstanceJsonReader, Modeling};
use tracing::{info, warn};

const CMD_NAME: &str = "stats";

#[derive(Default)]
pub(crate) struct StatsCommand;

impl<'a> Command<'a> for StatsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Prints the size of the encodings of an instance without building them")
            .setting(AppSettings::DisableVersion)
            .arg(input_file_arg("the JSON document of the instance"))
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let instance = InstanceJsonReader.read(create_input_file_reader(arg_matches)?)?;
        info!(
            "instance {:?} has {} vehicles and {} passengers",
            instance.name(),
            instance.vehicles().len(),
            instance.passengers().len()
        );
        let options = EncodingOptions::default();
        for modeling in Modeling::all() {
            match modeling.encoding(&instance, &options) {
                Ok(encoding) => {
                    let (n_variables, n_constraints) =
                        (encoding.n_variables(), encoding.n_constraints());
                    info!(
                        "modeling {}: {} variables, {} constraints",
                        modeling, n_variables, n_constraints
                    );
                    println!("modeling {}\t{}\t{}", modeling.index(), n_variables, n_constraints);
                }
                Err(e) => warn!("modeling {} cannot encode this instance: {}", modeling, e),
            }
        }
        Ok(())
    }
}
