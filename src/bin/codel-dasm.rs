use codel::disassembler::Disassembler;
use codel::image_loader::load_image;
use codel::Program;
use log::debug;
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    let mut codel_size: u32 = 1;
    let mut filename = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--codel-size" => {
                i += 1;
                let value = args.get(i).ok_or("--codel-size needs a value")?;
                codel_size = value
                    .parse()
                    .map_err(|_| format!("Invalid codel size: {value}"))?;
            }
            "-h" | "--help" => {
                eprintln!("Usage: {} [options] <image>", args[0]);
                eprintln!("\nOptions:");
                eprintln!("  --codel-size N  Pixels per codel edge (default 1)");
                eprintln!("  -h              Show this help message");
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                filename = Some(arg.to_string());
                break;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let filename = filename.unwrap_or_else(|| {
        eprintln!("Usage: {} [options] <image>", args[0]);
        eprintln!("Try '{} -h' for help", args[0]);
        std::process::exit(1);
    });

    let buffer = load_image(Path::new(&filename))?;
    let program = Program::from_rgb(&buffer, codel_size)?;
    debug!(
        "Built {} blocks from {}",
        program.block_count(),
        filename
    );

    println!("{}", Disassembler::new(&program).listing());
    Ok(())
}
