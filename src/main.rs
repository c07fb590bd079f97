use log::{debug, info};
use pixlang::config::RunConfig;
use pixlang::interpreter::Interpreter;
use pixlang::loader::load_grid;
use std::env;
use std::path::Path;
use std::process;

fn print_usage(program: &str) {
    println!("pixlang - interpreter for image-encoded programs");
    println!();
    println!("Usage: {} <program.png> [options]", program);
    println!("Options:");
    println!("  --config <file>     Read run settings from a TOML file");
    println!("  --max-ticks <n>     Fail if the program runs for more than n ticks");
    println!("  --strict            Reject pixels that are not instructions");
    println!("  --trace             Log every tick");
}

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // No program given: show help and exit successfully
    if args.len() < 2 || args[1] == "-h" || args[1] == "--help" {
        print_usage(&args[0]);
        return;
    }

    let program_path = Path::new(&args[1]);

    let mut config_path = None;
    let mut max_ticks = None;
    let mut strict = false;
    let mut trace = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            "--max-ticks" if i + 1 < args.len() => match args[i + 1].parse::<u64>() {
                Ok(n) => {
                    max_ticks = Some(n);
                    i += 1;
                }
                Err(_) => {
                    eprintln!("Error: invalid tick count: {}", args[i + 1]);
                    process::exit(1);
                }
            },
            "--strict" => strict = true,
            "--trace" => trace = true,
            other => {
                eprintln!("Error: unknown option: {}", other);
                eprintln!("Try '{} --help' for help", args[0]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => RunConfig::load(Path::new(&path)),
        None => Ok(RunConfig::default()),
    }
    .and_then(RunConfig::apply_env);

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    config.strict |= strict;
    config.trace |= trace;
    if max_ticks.is_some() {
        config.max_ticks = max_ticks;
    }
    debug!("Run configuration: {:?}", config);

    let grid = match load_grid(program_path) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("  while loading {}", program_path.display());
            process::exit(1);
        }
    };
    info!("Loaded {}x{} program", grid.width(), grid.height());

    let mut interpreter = match Interpreter::new(grid, config) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    println!("running...");

    match interpreter.run() {
        Ok(outputs) => {
            println!("program exited with codes:");
            for value in outputs {
                println!("{}", value);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("  {}", interpreter.trace_line());
            process::exit(1);
        }
    }
}
