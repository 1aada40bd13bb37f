use app::{Command, EncodeCommand, GenerateCommand, StatsCommand};
use clap::{App, AppSettings};
use tracing::error;

mod app;

fn main() {
    let commands: Vec<Box<dyn Command<'static>>> = vec![
        Box::<GenerateCommand>::default(),
        Box::<EncodeCommand>::default(),
        Box::<StatsCommand>::default(),
    ];
    let app = commands.iter().fold(
        App::new(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .author(env!("CARGO_PKG_AUTHORS"))
            .about("Encodes ride-sharing instances into DCOPs for the FRODO solver")
            .setting(AppSettings::SubcommandRequiredElseHelp),
        |app, c| app.subcommand(c.clap_subcommand()),
    );
    let arg_matches = app.get_matches();
    let (command_name, command_matches) = arg_matches.subcommand();
    let (command, command_matches) = match commands
        .iter()
        .find(|c| c.name() == command_name)
        .zip(command_matches)
    {
        Some(pair) => pair,
        None => unreachable!("clap requires a known subcommand"),
    };
    app::init_logging(command_matches);
    if let Err(e) = command.execute(command_matches) {
        error!("{:?}", e);
        std::process::exit(1);
    }
}
