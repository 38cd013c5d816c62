use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use otm::{Halt, Mode, OtmError, ProgramLoader, Reporter, TraceFormat, TuringMachine};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Simulates a one-tape Turing machine, printing its configuration after every step.
#[derive(Parser)]
#[clap(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine description file
    config_file: PathBuf,

    /// The input string fed to the machine, one symbol per step
    input: String,

    /// Output format of the trace
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Reject descriptions with more than one rule for the same state and symbols
    #[clap(short, long)]
    strict: bool,

    /// Log debug output to stderr (otherwise RUST_LOG applies)
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for TraceFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => TraceFormat::Text,
            Format::Json => TraceFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mode = if cli.strict { Mode::Strict } else { Mode::Normal };
    let program = match ProgramLoader::load_program(&cli.config_file, mode) {
        Ok(program) => program,
        Err(OtmError::FileError(e)) => {
            // An unreadable file is reported but is not a failure.
            println!("Could not open config file: {}", e);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut machine = match TuringMachine::new(&program, &cli.input) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), cli.format.into());
    let mut output: io::Result<()> = Ok(());

    let halt = machine.run(|snapshot| {
        if output.is_ok() {
            output = reporter.report(&snapshot);
        }
    });

    if let Err(e) = output.and_then(|_| reporter.flush()) {
        error!("Failed to write trace: {}", e);
        return ExitCode::FAILURE;
    }

    match halt {
        Halt::Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        halt => {
            let verdict = match machine.state() {
                Some(state) if state.accepting => "accepting",
                Some(_) => "not accepting",
                None => "halted",
            };
            info!(
                "Run ended ({:?}) after {} steps: {}",
                halt,
                machine.step_count(),
                verdict
            );
            ExitCode::SUCCESS
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}
