mod commands;
mod config;
mod logger;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use config::{CliConfig, ImportOverrides};
use xrr::import::XAxisUnit;

#[derive(Parser)]
#[command(name = "xrr", version)]
#[command(about = "X-ray reflectivity simulation for layered thin films")]
struct Cli {
    /// Path to a TOML configuration file (default: ./xrr.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a reflectivity curve from a JSON simulation request
    Simulate {
        request: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute the SLD depth profile of a request's layer stack
    Profile {
        request: PathBuf,
        #[arg(long, default_value_t = 500)]
        points: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read a measured curve and convert it to Q
    Import {
        file: PathBuf,
        #[command(flatten)]
        import: ImportArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate a request at the Q points of a measured curve and score it
    Compare {
        request: PathBuf,
        data: PathBuf,
        #[command(flatten)]
        import: ImportArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the built-in material presets
    Materials {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ImportArgs {
    /// x-axis unit: 2theta, theta, q_nm or q_a (guessed if omitted)
    #[arg(long)]
    unit: Option<XAxisUnit>,
    /// Zero-based x column
    #[arg(long)]
    x_col: Option<usize>,
    /// Zero-based intensity column
    #[arg(long)]
    y_col: Option<usize>,
    /// Wavelength in Å for angular data
    #[arg(long, conflicts_with = "energy")]
    wavelength: Option<f64>,
    /// Photon energy in eV for angular data
    #[arg(long)]
    energy: Option<f64>,
}

impl From<&ImportArgs> for ImportOverrides {
    fn from(args: &ImportArgs) -> Self {
        ImportOverrides {
            unit: args.unit,
            x_column: args.x_col,
            y_column: args.y_col,
            wavelength: args.wavelength,
            energy: args.energy,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    logger::init_logger(
        cli.verbose || config.logging.verbose,
        cli.json_logs || config.logging.json,
        config.logging.filter.as_deref(),
    );

    match &cli.command {
        Command::Simulate { request, output } => commands::run_simulate(request, output.as_ref()),
        Command::Profile {
            request,
            points,
            output,
        } => commands::run_profile(request, *points, output.as_ref()),
        Command::Import {
            file,
            import,
            output,
        } => {
            let options = config.import_options(&import.into())?;
            commands::run_import(file, &options, output.as_ref())
        }
        Command::Compare {
            request,
            data,
            import,
            output,
        } => {
            let options = config.import_options(&import.into())?;
            commands::run_compare(request, data, &options, output.as_ref())
        }
        Command::Materials { json } => commands::run_materials(*json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import_flags() {
        let cli = Cli::parse_from([
            "xrr", "-v", "import", "scan.dat", "--unit", "2theta", "--y-col", "2", "--energy", "8047.8",
        ]);
        assert!(cli.verbose);
        let Command::Import { import, .. } = cli.command else {
            panic!("expected import command");
        };
        let overrides = ImportOverrides::from(&import);
        assert_eq!(overrides.unit, Some(XAxisUnit::TwoTheta));
        assert_eq!(overrides.y_column, Some(2));
        assert_eq!(overrides.energy, Some(8047.8));
    }

    #[test]
    fn test_wavelength_and_energy_conflict() {
        let parsed = Cli::try_parse_from([
            "xrr", "import", "scan.dat", "--wavelength", "1.54", "--energy", "8000",
        ]);
        assert!(parsed.is_err());
    }
}
