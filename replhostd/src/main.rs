//! # Runtime Host Daemon
//!
//! Entry point: parses the host configuration, wires a console (real or
//! scripted) to the demo runtime core, and runs the one-shot lifecycle.

use console_bridge::ConsoleInputBridge;
use host_hal::{ConsoleSink, ConsoleSource, NoOpGate};
use replhostd::{
    DemoReclaimer, EchoCore, HostConfig, HostConsole, HostLogger, LifecycleController,
    ScriptedConsole, StdoutSink,
};
use std::env;
use std::fs;
use std::process;

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Scripted console (deterministic)
    Sim,
    /// Real console in raw mode
    Console,
}

/// Parsed command line
struct CliConfig {
    mode: Mode,
    script: Option<String>,
    script_json: Option<String>,
    host: HostConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Console,
            script: None,
            script_json: None,
            host: HostConfig::default(),
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    if let Err(e) = run(config) {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}

fn run(config: CliConfig) -> Result<(), String> {
    let mut log = HostLogger::stderr();

    let (source, sink): (Box<dyn ConsoleSource>, Box<dyn ConsoleSink>) = match config.mode {
        Mode::Sim => {
            let script = load_script(&config)?;
            (Box::new(script), Box::new(StdoutSink))
        }
        Mode::Console => {
            let console = hal_os::OsConsole::new()
                .map_err(|e| format!("Failed to open console: {}", e))?;
            (Box::new(console), Box::new(hal_os::OsConsoleSink))
        }
    };

    let bridge = ConsoleInputBridge::new(source, Box::new(NoOpGate));
    let mut io = HostConsole::new(bridge, sink);
    let mut core = EchoCore::new();
    let mut reclaimer = DemoReclaimer::new();
    let mut controller = LifecycleController::new(config.host);

    // No storage backend is configured in this host; imports resolve to
    // "not found" inside the runtime.
    let modules = Box::new(runtime_api::NoStorage);

    match controller.run(&mut core, &mut reclaimer, modules, &mut io, &mut log) {
        Ok(_) => Ok(()),
        Err(fault) => {
            // A fault that escaped every recovery path: halt forward
            // progress in place. Nothing restarts this process.
            controller.fault(fault).spin()
        }
    }
}

fn load_script(config: &CliConfig) -> Result<ScriptedConsole, String> {
    if let Some(path) = &config.script_json {
        let text =
            fs::read_to_string(path).map_err(|e| format!("Failed to read script file: {}", e))?;
        return ScriptedConsole::from_json(&text).map_err(|e| e.to_string());
    }
    if let Some(path) = &config.script {
        let text =
            fs::read_to_string(path).map_err(|e| format!("Failed to read script file: {}", e))?;
        return ScriptedConsole::from_text(&text).map_err(|e| e.to_string());
    }
    Err("sim mode requires --script or --script-json".to_string())
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--mode" | "-m" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --mode".to_string());
                }
                config.mode = match args[i].as_str() {
                    "sim" => Mode::Sim,
                    "console" => Mode::Console,
                    other => return Err(format!("Invalid mode: {}", other)),
                };
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                config.script = Some(args[i].clone());
            }
            "--script-json" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script-json".to_string());
                }
                config.script_json = Some(args[i].clone());
            }
            "--heap-size" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --heap-size".to_string());
                }
                config.host.heap_size = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid heap-size value: {}", args[i]))?;
            }
            "--stack-size" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --stack-size".to_string());
                }
                config.host.stack_budget = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid stack-size value: {}", args[i]))?;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    if config.mode == Mode::Sim && config.script.is_none() && config.script_json.is_none() {
        return Err("sim mode requires --script or --script-json".to_string());
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -m, --mode <sim|console>   Input mode (default: console)");
    eprintln!("  -s, --script <file>        Text input script (sim mode)");
    eprintln!("      --script-json <file>   JSON event stream (sim mode)");
    eprintln!("      --heap-size <bytes>    Heap region size");
    eprintln!("      --stack-size <bytes>   Stack budget for the depth guard");
    eprintln!("  -h, --help                 Show this help");
}
