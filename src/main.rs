use codel::config::Config;
use codel::disassembler::Disassembler;
use codel::image_loader::load_image;
use codel::{ExitStatus, Interpreter, Program};
use log::{debug, info};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

fn print_usage(program: &str) {
    println!("codel - interpreter for programs written as colour images");
    println!();
    println!(
        "Usage: {} <image> [--config FILE] [--codel-size N] [--max-steps N] [--dump]",
        program
    );
    println!("Examples:");
    println!("  {} hello.png", program);
    println!("  {} hello_big.png --codel-size 10", program);
    println!();
    println!("  --config FILE     read settings from a TOML file");
    println!("  --codel-size N    pixels per codel edge (default 1)");
    println!("  --max-steps N     stop after N steps");
    println!("  --dump            print the block listing before running");
    println!();
    println!("Set RUST_LOG=trace to follow execution step by step.");
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {flag}: {value}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Display help information if no image file provided
    if args.len() < 2 || args[1] == "-h" || args[1] == "--help" {
        print_usage(&args[0]);
        return Ok(());
    }

    let mut image_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut codel_size: Option<u32> = None;
    let mut max_steps: Option<u64> = None;
    let mut dump = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config needs a value")?;
                config_path = Some(PathBuf::from(path));
            }
            "--codel-size" => {
                i += 1;
                codel_size = Some(parse_number("--codel-size", args.get(i))?);
            }
            "--max-steps" => {
                i += 1;
                max_steps = Some(parse_number("--max-steps", args.get(i))?);
            }
            "--dump" => dump = true,
            arg if !arg.starts_with('-') && image_path.is_none() => {
                image_path = Some(PathBuf::from(arg));
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Try '{} --help' for help", args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let image_path = match image_path {
        Some(path) => path,
        None => {
            eprintln!("Error: no image file given");
            std::process::exit(1);
        }
    };

    // Command line flags override the configuration file
    let mut config = match config_path {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    if let Some(size) = codel_size {
        config.codel_size = size;
    }
    if max_steps.is_some() {
        config.max_steps = max_steps;
    }
    config.dump_program |= dump;
    debug!("configuration: {:?}", config);

    let program = match load_program(&image_path, config.codel_size) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if config.dump_program {
        println!("{}", Disassembler::new(&program).listing());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(&program, stdin.lock(), stdout.lock());

    match interpreter.run_with_limit(config.max_steps) {
        Ok(ExitStatus::Terminated { steps }) => {
            debug!("program terminated after {} steps", steps);
            Ok(())
        }
        Ok(ExitStatus::StepLimitReached { steps }) => {
            info!("stopped after {} steps", steps);
            Ok(())
        }
        Err(e) => {
            eprintln!("\nError during execution: {e}");
            std::process::exit(2);
        }
    }
}

fn load_program(path: &Path, codel_size: u32) -> Result<Program, codel::CodelError> {
    debug!("loading image program: {}", path.display());
    let buffer = load_image(path)?;
    Ok(Program::from_rgb(&buffer, codel_size)?)
}
