use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};

use hrm_vm::audit::{self, ActionCategory, AuditConfig, AuditEntry, AuditFormat, Severity};
use hrm_vm::{
    inbox_from_chars, inbox_from_tokens, Floor, HrmResult, Program, Run, RunConfig, Value,
};

#[derive(Parser, Debug)]
#[command(name = "hrm", version, about = "Run a worker-and-floor assembly program")]
struct Cli {
    /// Program source file.
    #[arg(value_name = "PROGRAM_FILE")]
    program: PathBuf,

    #[arg(
        long = "inbox",
        value_name = "CHARS",
        conflicts_with = "inbox_tokens",
        long_help = "Inbox as a string, one value per non-whitespace character: ABC12 is A, B, C, 1, 2."
    )]
    inbox: Option<String>,

    #[arg(
        long = "inbox-tokens",
        value_name = "T1,T2,...",
        value_delimiter = ',',
        allow_hyphen_values = true,
        long_help = "Inbox as comma-separated values, for multi-digit and negative numbers: 12,-4,A."
    )]
    inbox_tokens: Vec<String>,

    #[arg(
        long = "floor",
        value_name = "IDX=VAL",
        value_parser = parse_floor_seed,
        action = ArgAction::Append,
        long_help = "Seed a floor tile before the run. Repeat for several tiles: --floor 0=5 --floor 14=0."
    )]
    floor: Vec<(usize, Value)>,

    #[arg(long = "max-instructions", value_name = "N", long_help = "Fail the run after N executed instructions.")]
    max_instructions: Option<u64>,

    #[arg(long = "trace", action = ArgAction::SetTrue, long_help = "Log every executed instruction to stderr.")]
    trace: bool,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long = "audit", value_name = "FILE", long_help = "Append audit entries to FILE.")]
    audit: Option<PathBuf>,

    #[arg(
        long = "audit-json",
        action = ArgAction::SetTrue,
        requires = "audit",
        long_help = "Write audit entries to the --audit file as JSON Lines."
    )]
    audit_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_floor_seed(arg: &str) -> Result<(usize, Value), String> {
    let (index, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected IDX=VAL, got '{}'", arg))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a tile index", index))?;
    let value = Value::parse(value.trim()).map_err(|e| e.to_string())?;
    Ok((index, value))
}

fn init_audit(cli: &Cli) {
    let format = if cli.audit_json { AuditFormat::JsonLines } else { AuditFormat::Text };
    let min_severity = if cli.trace { Severity::Debug } else { Severity::Info };

    let result = match &cli.audit {
        Some(path) => audit::init_global_logger(AuditConfig {
            log_path: Some(path.clone()),
            min_severity,
            echo_stderr: cli.trace,
            format,
        }),
        None if cli.trace => {
            audit::init_stderr_logger(min_severity);
            Ok(())
        }
        None => Ok(()),
    };
    if let Err(e) = result {
        eprintln!("Warning: Could not initialize audit logger: {}", e);
    }
}

fn read_inbox(cli: &Cli) -> HrmResult<Vec<Value>> {
    match &cli.inbox {
        Some(chars) => inbox_from_chars(chars),
        None => inbox_from_tokens(&cli.inbox_tokens),
    }
}

fn print_state(run: &Run<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&run.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: could not serialize run state: {}", e),
        },
        OutputFormat::Text => {
            println!("outbox:   {}", join(run.outbox().iter()));
            println!("inbox:    {}", join(run.inbox().iter()));
            println!("hands:    {}", run.hands().map(Value::as_str).unwrap_or("-"));
            println!("floor:    {:?}", run.floor());
            println!("pc:       {}", run.program_counter());
            println!("executed: {}", run.executed());
        }
    }
}

fn join<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values.map(Value::as_str).collect::<Vec<_>>().join(" ")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_audit(&cli);

    audit::audit(
        AuditEntry::new("STARTUP", "System", "hrm", "CLI session started")
            .with_category(ActionCategory::System)
            .with_meta("file", cli.program.display().to_string()),
    );

    let source = match fs::read_to_string(&cli.program) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", cli.program.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let program = match Program::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let inputs = read_inbox(&cli).and_then(|inbox| Ok((inbox, Floor::from_sparse(cli.floor.clone())?)));
    let (inbox, floor) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = RunConfig { max_instructions: cli.max_instructions, trace: cli.trace };
    let mut run = program.bind_with_config(inbox, floor, config);
    let result = run.run();

    print_state(&run, cli.format);
    if let Some(logger) = audit::global_logger() {
        let _ = logger.flush();
    }

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Run error: {}", e);
            ExitCode::FAILURE
        }
    }
}
