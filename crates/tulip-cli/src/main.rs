use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::filter::{Directive, EnvFilter};
use tulip_vm::error::{CompileErrors, ErrorSite};
use tulip_vm::{InterpretResult, Value, Vm, VmConfig};

mod repl;
mod repl_helper;

/// Exit status when a script or input file cannot be read
const EXIT_IO_ERROR: u8 = 74;

/// TulipScript - a small embeddable scripting language
#[derive(Parser)]
#[command(name = "tulip")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run TulipScript programs or start an interactive session")]
#[command(author = "Tulip Team")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Script to run; starts the REPL when omitted
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Arguments exposed to the script through `args`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Evaluate source directly and print its last value
    #[arg(short, long, value_name = "SOURCE")]
    eval: Option<String>,

    /// Show disassembled bytecode of every compiled unit
    #[arg(long)]
    debug_bytecode: bool,

    /// Log every executed instruction
    #[arg(long)]
    trace: bool,

    /// Maximum call depth before a stack overflow is reported
    #[arg(long, value_name = "N")]
    max_call_depth: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a file without running it and report diagnostics
    Check {
        /// File to check
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the compiled bytecode of a file
    Disassemble {
        /// File to disassemble
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_IO_ERROR)
        }
    }
}

/// Logs go to stderr, filtered by `TULIP_LOG` (default `warn`)
fn init_logging(cli: &Cli) {
    let mut filter = EnvFilter::try_from_env("TULIP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let raised = if cli.trace {
        Some("tulip_vm=trace")
    } else if cli.debug_bytecode {
        Some("tulip_vm=debug")
    } else {
        None
    };
    if let Some(directive) = raised.and_then(|d| d.parse::<Directive>().ok()) {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    if let Some(command) = cli.command {
        return match command {
            Commands::Check { file, json } => check_command(&file, json),
            Commands::Disassemble { file } => disassemble_command(&file),
        };
    }

    let config = VmConfig {
        max_call_depth: cli.max_call_depth.unwrap_or(VmConfig::default().max_call_depth),
        trace_execution: cli.trace,
        print_code: cli.debug_bytecode,
    };

    if let Some(source) = cli.eval {
        let mut vm = new_vm(config, "<eval>", &cli.args);
        return Ok(run_eval(&mut vm, &source));
    }

    match cli.script {
        Some(script) => {
            let name = script.display().to_string();
            let source = read_source(&script)?;
            let mut vm = new_vm(config, &name, &cli.args);
            Ok(exit_code(vm.interpret(&source, &name)))
        }
        None => {
            let mut vm = new_vm(config, "tulip", &cli.args);
            repl::run(&mut vm)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn new_vm(config: VmConfig, program: &str, args: &[String]) -> Vm {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push(program.to_string());
    argv.extend(args.iter().cloned());

    let mut vm = Vm::with_config(config);
    vm.init(&argv);
    vm
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read '{}'", path.display()))
}

fn exit_code(result: InterpretResult) -> ExitCode {
    ExitCode::from(result.code() as u8)
}

fn run_eval(vm: &mut Vm, source: &str) -> ExitCode {
    match vm.run(source, "<eval>") {
        Ok(Value::Null) => ExitCode::SUCCESS,
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            exit_code(err.result_code())
        }
    }
}

// ============================================================================
// CHECK COMMAND
// ============================================================================

#[derive(Serialize)]
struct CheckReport {
    file: String,
    ok: bool,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct Diagnostic {
    line: usize,
    /// Offending lexeme, `"end"` at end of input, absent for scanner errors
    location: Option<String>,
    message: String,
}

impl CheckReport {
    fn new(file: &Path, errors: Option<&CompileErrors>) -> Self {
        let diagnostics = errors
            .map(|errors| {
                errors
                    .iter()
                    .map(|error| Diagnostic {
                        line: error.line,
                        location: match &error.site {
                            ErrorSite::Lexeme(lexeme) => Some(lexeme.clone()),
                            ErrorSite::End => Some("end".to_string()),
                            ErrorSite::Scanner => None,
                        },
                        message: error.message.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            file: file.display().to_string(),
            ok: errors.is_none(),
            diagnostics,
        }
    }
}

fn check_command(file: &Path, json: bool) -> Result<ExitCode> {
    let source = read_source(file)?;
    let errors = tulip_vm::compile(&source).err();
    let report = CheckReport::new(file, errors.as_ref());

    if json {
        let text = serde_json::to_string_pretty(&report).context("cannot serialize report")?;
        println!("{}", text);
    } else if let Some(errors) = &errors {
        eprintln!("✗ Compilation errors in '{}':", report.file);
        eprintln!("{}", errors);
    } else {
        println!("✓ '{}' compiles without errors", report.file);
    }

    Ok(if report.ok {
        ExitCode::SUCCESS
    } else {
        exit_code(InterpretResult::CompileError)
    })
}

// ============================================================================
// DISASSEMBLE COMMAND
// ============================================================================

fn disassemble_command(file: &Path) -> Result<ExitCode> {
    let source = read_source(file)?;
    let name = file.display().to_string();

    match tulip_vm::compile(&source) {
        Ok(function) => {
            println!("Disassembly of '{}':", name);
            println!();
            print!("{}", tulip_vm::disassemble_function(&function, &name));
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            eprintln!("{}", errors);
            Ok(exit_code(InterpretResult::CompileError))
        }
    }
}
