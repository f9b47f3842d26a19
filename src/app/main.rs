//! Command-line front end: loads a ROM (or CP/M-80 .COM image) and drives
//! the emulated hardware in real time through an SDL2 `HostCallbacks`.

mod sdl_host;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use xpire_core::rasterizer::Palette;
use xpire_core::scheduler::DISPLAY_FREQUENCY_HZ;
use xpire_core::{CpmMachine, EmulatorError, Machine};

use sdl_host::SdlHost;

#[derive(Parser)]
#[command(name = "xpire", about = "Taito 8080 arcade hardware emulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Runs a program against the emulated hardware.
    Run {
        /// Path to a raw ROM image, or a CP/M .COM image with --cpm.
        program_file: PathBuf,

        /// Loads `program_file` as a CP/M-80 .COM image and runs it as a
        /// text console (BDOS C=2/C=9 only) instead of the arcade machine.
        #[arg(long)]
        cpm: bool,

        /// Uses the 4-color "Xpire" palette instead of the stock
        /// monochrome look. Has no effect with --cpm.
        #[arg(long = "xpire-palette")]
        xpire_palette: bool,

        /// Rejects reads/writes to unregistered I/O ports instead of the
        /// permissive 0xFF/no-op default the stock ROM relies on.
        #[arg(long = "strict-ports")]
        strict_ports: bool,

        /// Window scale factor. Has no effect with --cpm.
        #[arg(long, default_value_t = 3)]
        scale: u32,

        /// Logs every fetched instruction's disassembly at trace level.
        /// Has no effect with --cpm.
        #[arg(long)]
        trace: bool,
    },
}

#[derive(Debug)]
enum AppError {
    Emulator(EmulatorError),
    Host(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Emulator(e) => write!(f, "{}", e),
            AppError::Host(e) => write!(f, "host error: {}", e),
        }
    }
}

impl From<EmulatorError> for AppError {
    fn from(e: EmulatorError) -> Self {
        AppError::Emulator(e)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let trace = matches!(&cli.command, Command::Run { trace, .. } if *trace);
    init_logger(trace);

    let result = match cli.command {
        Command::Run {
            program_file,
            cpm,
            xpire_palette,
            strict_ports,
            scale,
            trace,
        } => {
            if cpm {
                run_cpm(&program_file)
            } else {
                run_arcade(&program_file, xpire_palette, strict_ports, scale, trace)
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// `--trace` needs `log::trace!` calls to actually reach the terminal, which
/// the default `RUST_LOG`-driven filter (info and above) would swallow; bump
/// the floor to trace level when the flag is set, but still let an explicit
/// `RUST_LOG` override win.
fn init_logger(trace: bool) {
    if trace {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    } else {
        env_logger::init();
    }
}

fn load_rom(path: &Path) -> Result<Vec<u8>, EmulatorError> {
    std::fs::read(path).map_err(EmulatorError::RomNotFound)
}

fn run_cpm(path: &Path) -> Result<(), AppError> {
    let rom = load_rom(path)?;
    let mut machine = CpmMachine::new(&rom)?;
    machine.run(|c| print!("{}", c))?;
    println!();
    Ok(())
}

fn run_arcade(
    path: &Path,
    xpire_palette: bool,
    strict_ports: bool,
    scale: u32,
    trace: bool,
) -> Result<(), AppError> {
    let rom = load_rom(path)?;
    let palette = if xpire_palette { Palette::xpire() } else { Palette::monochrome() };
    let mut machine = Machine::new(&rom, strict_ports)?
        .with_palette(palette.clone())
        .with_trace(trace);

    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "xpire".to_string());
    let mut host = SdlHost::new(&title, scale, palette).map_err(AppError::Host)?;

    let frame_duration = Duration::from_secs(1) / DISPLAY_FREQUENCY_HZ;
    while !host.should_quit() {
        let frame_start = Instant::now();
        machine.run_frame(&mut host)?;
        if host.halted() {
            break;
        }
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
    Ok(())
}
