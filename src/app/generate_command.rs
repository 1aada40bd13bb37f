use super::{create_output_writer, logging_level_cli_arg, output_file_arg, parse_arg, Command};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use crusti_dcop::{CostRounding, DestinationKind, InstanceJsonWriter, ScenarioGenerator, Weights};
use std::io::Write;
use tracing::info;

const CMD_NAME: &str = "generate";

const ARG_VEHICLES: &str = "ARG_VEHICLES";
const ARG_PASSENGERS: &str = "ARG_PASSENGERS";
const ARG_CAPACITY: &str = "ARG_CAPACITY";
const ARG_SEED: &str = "ARG_SEED";
const ARG_WIDTH: &str = "ARG_WIDTH";
const ARG_HEIGHT: &str = "ARG_HEIGHT";
const ARG_DESTINATION: &str = "ARG_DESTINATION";
const ARG_PICKUP_WEIGHT: &str = "ARG_PICKUP_WEIGHT";
const ARG_DROPOFF_WEIGHT: &str = "ARG_DROPOFF_WEIGHT";
const ARG_REAL_COSTS: &str = "ARG_REAL_COSTS";
const ARG_NAME: &str = "ARG_NAME";

#[derive(Default)]
pub(crate) struct GenerateCommand;

fn value_arg<'a>(name: &'a str, long: &'a str, default: &'a str, help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(name)
        .long(long)
        .empty_values(false)
        .multiple(false)
        .default_value(default)
        .help(help)
}

impl<'a> Command<'a> for GenerateCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Draws a random ride-sharing instance and writes its JSON document")
            .setting(AppSettings::DisableVersion)
            .arg(value_arg(ARG_VEHICLES, "vehicles", "4", "the number of vehicles"))
            .arg(value_arg(ARG_PASSENGERS, "passengers", "6", "the number of passengers"))
            .arg(value_arg(ARG_CAPACITY, "capacity", "3", "the capacity of each vehicle"))
            .arg(value_arg(ARG_SEED, "seed", "123", "the seed of the random generator"))
            .arg(value_arg(ARG_WIDTH, "width", "100", "the width of the area"))
            .arg(value_arg(ARG_HEIGHT, "height", "100", "the height of the area"))
            .arg(
                value_arg(ARG_DESTINATION, "destination", "none", "the kind of destinations")
                    .possible_values(&["none", "common", "per-passenger"]),
            )
            .arg(value_arg(
                ARG_PICKUP_WEIGHT,
                "pickup-weight",
                "1",
                "the coefficient of the pickup distance",
            ))
            .arg(value_arg(
                ARG_DROPOFF_WEIGHT,
                "dropoff-weight",
                "1",
                "the coefficient of the drop-off distance",
            ))
            .arg(
                Arg::with_name(ARG_REAL_COSTS)
                    .long("real-costs")
                    .takes_value(false)
                    .help("keeps the costs as reals instead of rounding them"),
            )
            .arg(value_arg(ARG_NAME, "name", "ride_sharing", "the name of the instance"))
            .arg(output_file_arg())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let destination = match arg_matches.value_of(ARG_DESTINATION).unwrap() {
            "common" => DestinationKind::Common,
            "per-passenger" => DestinationKind::PerPassenger,
            _ => DestinationKind::None,
        };
        let weights = Weights::new(
            parse_arg(arg_matches, ARG_PICKUP_WEIGHT)?,
            parse_arg(arg_matches, ARG_DROPOFF_WEIGHT)?,
        )
        .context("while reading the cost weights")?;
        let generator = ScenarioGenerator {
            n_vehicles: parse_arg(arg_matches, ARG_VEHICLES)?,
            capacity: parse_arg(arg_matches, ARG_CAPACITY)?,
            n_passengers: parse_arg(arg_matches, ARG_PASSENGERS)?,
            width: parse_arg(arg_matches, ARG_WIDTH)?,
            height: parse_arg(arg_matches, ARG_HEIGHT)?,
            seed: parse_arg(arg_matches, ARG_SEED)?,
            destination,
            weights,
            rounding: if arg_matches.is_present(ARG_REAL_COSTS) {
                CostRounding::Keep
            } else {
                CostRounding::NearestInteger
            },
        };
        info!(
            "generating {} vehicles of capacity {} and {} passengers with seed {}",
            generator.n_vehicles, generator.capacity, generator.n_passengers, generator.seed
        );
        let instance = generator
            .generate(arg_matches.value_of(ARG_NAME).unwrap())
            .context("while generating an instance")?;
        let (str_out, mut writer) = create_output_writer(arg_matches)?;
        info!("writing the instance document to {}", str_out);
        InstanceJsonWriter.write(&mut writer, &instance)?;
        writer.flush().context("while flushing the output")
    }
}
