use log::debug;
use pixlang::disassembler::Disassembler;
use pixlang::loader::load_grid;
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    // Parse command line options
    let mut show_unknown = false;
    let mut filename = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-a" => show_unknown = true,
            "-h" | "--help" => {
                eprintln!("Usage: {} [options] <program.png>", args[0]);
                eprintln!("\nOptions:");
                eprintln!("  -a                   Also list pixels that are not instructions");
                eprintln!("  -h                   Show this help message");
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
        eprintln!("Usage: {} [options] <program.png>", args[0]);
        eprintln!("Try '{} -h' for help", args[0]);
        std::process::exit(1);
    });

    let grid = load_grid(Path::new(&filename))?;
    debug!("Loaded {}x{} grid from {}", grid.width(), grid.height(), filename);

    let mut disasm = Disassembler::new(&grid);
    disasm.show_unknown = show_unknown;
    print!("{}", disasm.listing());

    Ok(())
}
