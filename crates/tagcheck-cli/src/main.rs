use clap::{ArgAction, Parser, ValueEnum};
use std::process::ExitCode;
use tagcheck_checker::{CheckError, CheckOptions, Mode, RecoveryPolicy, RegionStrategy, Report};
use tagcheck_report::Format;

#[derive(Parser)]
#[command(name = "tagcheck")]
#[command(about = "Check that markup tags in a component are opened and closed correctly")]
#[command(version)]
struct Cli {
    /// Source file containing the component
    path: String,

    /// Component whose returned markup is checked
    #[arg(long, default_value = "App")]
    component: String,

    /// How to find the markup region
    #[arg(long, value_enum, default_value_t = StrategyArg::Anchored)]
    strategy: StrategyArg,

    /// Stop at the first unrecovered mismatch, or report all of them
    #[arg(long, value_enum, default_value_t = ModeArg::Lenient)]
    mode: ModeArg,

    /// Never assume a missing closing tag
    #[arg(long)]
    no_recovery: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// From the component's main `return (` to its closing `);`
    Anchored,
    /// From the component declaration to end of file
    Forward,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Strict,
    Lenient,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl Cli {
    fn options(&self) -> CheckOptions {
        CheckOptions {
            component: self.component.clone(),
            strategy: match self.strategy {
                StrategyArg::Anchored => RegionStrategy::Anchored,
                StrategyArg::Forward => RegionStrategy::Forward,
            },
            mode: match self.mode {
                ModeArg::Strict => Mode::Strict,
                ModeArg::Lenient => Mode::Lenient,
            },
            recovery: if self.no_recovery {
                RecoveryPolicy::Off
            } else {
                RecoveryPolicy::SecondFromTop
            },
        }
    }

    fn format(&self) -> Format {
        match self.format {
            FormatArg::Text => Format::Text,
            FormatArg::Json => Format::Json,
        }
    }
}

/// Tag defects found.
const EXIT_DEFECTS: u8 = 1;
/// Input unreadable or region not found; nothing was checked.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = tagcheck_checker::validate(&cli.path, &cli.options());
    match &result {
        Ok(report) => match tagcheck_report::render(report, cli.format()) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(EXIT_ERROR);
            }
        },
        Err(e @ CheckError::Io { .. }) => eprintln!("Error: {e}"),
        Err(e @ CheckError::RegionNotFound(_)) => eprintln!("Error: {}: {e}", cli.path),
    }

    ExitCode::from(exit_code(&result))
}

/// Process exit status for a scan result.
fn exit_code(result: &Result<Report, CheckError>) -> u8 {
    match result {
        Ok(report) if report.passed() => 0,
        Ok(_) => EXIT_DEFECTS,
        Err(_) => EXIT_ERROR,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
