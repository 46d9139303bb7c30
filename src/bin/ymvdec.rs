use std::path::Path;
use std::process;

use ymvdec::{extract_file, ContainerKind, FormatError};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // Use std::env for argument parsing
    let mut args = std::env::args().skip(1);
    let input_file = match args.next() {
        Some(val) => val,
        None => {
            eprintln!("Missing required argument: input_file");
            print_usage_and_exit();
        }
    };
    let output_dir = match args.next() {
        Some(val) => val,
        None => {
            eprintln!("Missing required argument: output_dir");
            print_usage_and_exit();
        }
    };
    if let Some(extra) = args.next() {
        eprintln!("Unexpected argument: {}", extra);
        print_usage_and_exit();
    }

    let report = match extract_file(Path::new(&input_file), Path::new(&output_dir)) {
        Ok(report) => report,
        Err(FormatError::NoSegments) => {
            tracing::error!("{}: no valid segment found", input_file);
            process::exit(1);
        }
        Err(FormatError::Io(e)) => {
            tracing::error!("failed to read {}: {}", input_file, e);
            process::exit(1);
        }
    };

    match report.kind {
        ContainerKind::Wmv => tracing::info!("detected WMV/ASF stream, copying through"),
        ContainerKind::JpegSegmented => {
            tracing::info!("detected segmented container, {} segment(s)", report.outputs.len())
        }
    }

    for entry in report.written() {
        println!("[OK] wrote {} ({} bytes)", entry.path.display(), entry.len);
    }
    let mut failed = 0;
    for entry in report.failed() {
        failed += 1;
        tracing::error!(
            "failed to write {}: {}",
            entry.path.display(),
            entry.error.as_ref().map(|e| e.to_string()).unwrap_or_default()
        );
    }

    // Partial success still writes what it can, but signal the loss
    if failed > 0 {
        process::exit(1);
    }
}

fn print_usage_and_exit() -> ! {
    eprintln!("Usage: ymvdec <input_file> <output_dir>");
    process::exit(1);
}
