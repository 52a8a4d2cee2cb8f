use crate::demo::{run_batch, run_demo, run_profiles, run_score, BatchArgs, DemoArgs, ScoreArgs};
use crate::server;
use aquascore::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "aquascore",
    about = "Score mineral and tap water analyses against consumer health profiles",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single water analysis
    Score(ScoreArgs),
    /// Re-score a CSV export of saved scans
    Batch(BatchArgs),
    /// List the supported consumer profiles
    Profiles,
    /// Score a few reference waters across every profile
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Batch(args) => run_batch(args),
        Command::Profiles => run_profiles(),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquascore::Profile;

    #[test]
    fn score_command_accepts_profile_aliases_and_analytes() {
        let cli = Cli::try_parse_from([
            "aquascore",
            "score",
            "--profile",
            "baby",
            "--ph",
            "7.2",
            "--sodium",
            "4",
        ])
        .expect("valid arguments");

        let Some(Command::Score(args)) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.profile, Some(Profile::Infant));
        let readings = args.readings.into_readings();
        assert_eq!(readings.ph, Some(7.2));
        assert_eq!(readings.sodium, Some(4.0));
        assert_eq!(readings.calcium, None);
    }

    #[test]
    fn unknown_profile_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["aquascore", "score", "--profile", "astronaut"]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["aquascore"]).expect("valid arguments");
        assert!(cli.command.is_none());
    }
}
