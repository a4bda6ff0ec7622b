mod color;
mod config;
mod error;
mod icon;
mod logging;

use config::Config;
use error::IconError;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init(tracing::Level::INFO);

    let config = Config::load();
    match icon::generate_all(&config) {
        Ok(reports) => {
            for report in &reports {
                println!(
                    "✓ Created: {} ({}x{}, {})",
                    report.path.display(),
                    report.size,
                    report.size,
                    report.font
                );
                tracing::debug!(
                    path = %report.path.display(),
                    glyph_center = ?report.glyph_box.center(),
                    "glyph placement"
                );
            }
            println!("\n✓ All icons generated successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn report_error(e: &IconError) {
    eprintln!("Error: {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
    eprintln!("Try opening generate-icons.html in a browser instead.");
}
