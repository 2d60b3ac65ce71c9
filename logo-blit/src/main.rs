use anyhow::{Context, Result};
use rle565_loader::args::Args;
use rle565_loader::{status_code, DisplayRegistry, LogoConfig, LogoLoader};
use rle565_pixelbuffer::ManagedSurface;
use tracing::{info, warn};

mod dump;

fn init_logging(filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = LogoConfig::from_args(&args).context("Invalid configuration")?;

    init_logging(&config.logging.filter)?;

    info!("Starting logo-blit {}", env!("CARGO_PKG_VERSION"));

    let mut surface = ManagedSurface::new(config.surface.width, config.surface.height)?;
    let result = {
        let mut displays = DisplayRegistry::new();
        displays.register(&mut surface);
        LogoLoader::from_config(&config).decode_and_blit(&mut displays, &config.image.path)
    };

    let status = status_code(&result);
    match &result {
        Ok(Some(report)) if report.is_partial() => {
            info!(
                "Image not fully consumed: {} pixels written, stopped on {:?}",
                report.pixels_written, report.stop
            );
        }
        Ok(_) => {}
        Err(e) => warn!("Boot logo not shown ({}): {}", status, e),
    }

    if let Some(output) = &args.output {
        dump::write_to(&surface, args.format, output)?;
        info!("Wrote {:?} dump to {}", args.format, output.display());
    }

    // Exit with the positive errno on failure
    std::process::exit(-status);
}
