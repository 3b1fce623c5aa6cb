//! Scan a cube from still images
//!
//! Usage:
//!   cargo run --example scan_images -- [--config scanner.json] [--solve] <white> <face>...
//!
//! The first image calibrates on its center cell; each following image is
//! scanned as one face, in any order. Images should be framed so the cube
//! fills the grid overlay, i.e. at least the configured canvas size.

use cube_scan::image_loader::load_frame;
use cube_scan::{
    Calibrator, ColorConverter, FaceScanner, ScanError, ScanSession, ScannerConfig, Solver,
    SolverClient,
};
use std::path::{Path, PathBuf};

struct Args {
    config: Option<PathBuf>,
    solve: bool,
    white: PathBuf,
    faces: Vec<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut config = None;
    let mut solve = false;
    let mut paths = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(args.next()?)),
            "--solve" => solve = true,
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    if paths.len() < 2 {
        return None;
    }
    let white = paths.remove(0);
    Some(Args {
        config,
        solve,
        white,
        faces: paths,
    })
}

fn run(args: Args) -> Result<(), ScanError> {
    let config = match &args.config {
        Some(path) => ScannerConfig::from_json_file(path)?,
        None => ScannerConfig::default(),
    };
    let scanner = FaceScanner::from_config(&config);
    let mut session = ScanSession::new(Calibrator::from_config(&config.calibration));

    let white = scanner.white_sample(&load_frame(&args.white)?)?;
    let correction = session.calibrate(white);
    println!(
        "Calibrated from {}: hue shift {:.1}, saturation x{:.2}, lightness x{:.2}",
        args.white.display(),
        correction.hue_shift,
        correction.saturation_factor,
        correction.lightness_factor
    );
    let converter = ColorConverter::new();
    for entry in session.reference_table().iter() {
        println!(
            "  {} {:<7} {}",
            entry.label,
            entry.display_name,
            converter.rgb_to_hex(converter.hsl_to_rgb(entry.hsl))
        );
    }

    for path in &args.faces {
        let scan = scanner.scan(&load_frame(path)?, session.reference_table())?;
        println!("\n{}:\n{}", path.display(), scan.readout(session.reference_table()));
        match session.submit_scan(scan) {
            Ok(outcome) => println!(
                "Stored face {}{} ({} remaining)",
                outcome.face,
                if outcome.replaced { ", replacing earlier scan" } else { "" },
                outcome.remaining
            ),
            Err(e) if e.is_recoverable() => println!("Skipped: {}", e.user_message()),
            Err(e) => return Err(e),
        }
    }

    let state = session.assemble()?;
    println!("\nCube state: {state}");

    if args.solve {
        let client = SolverClient::new(&config.solver)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ScanError::config("cannot start async runtime", e))?;
        let solution = runtime.block_on(client.solve(&state))?;
        println!("Solution: {solution}");
    }

    Ok(())
}

fn print_usage(program: &Path) {
    eprintln!(
        "Usage: {} [--config scanner.json] [--solve] <white-image> <face-image>...",
        program.display()
    );
}

fn main() {
    env_logger::init();

    let Some(args) = parse_args() else {
        let program = std::env::args().next().unwrap_or_else(|| "scan_images".to_string());
        print_usage(Path::new(&program));
        std::process::exit(2);
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}
