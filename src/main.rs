use birt::config::{Config, ConfigOverrides};
use birt::imaging::{BoundingBox, Quality, ResampleFilter};
use birt::logging::{self, LogLevel, LoggingConfig};
use birt::resize::{self, ResizeJob};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

const IDENT: &str = "BIRT (Bulk Image Resizing Tool)";

#[derive(Parser)]
#[command(name = "birt")]
#[command(version)]
#[command(about = "Resize images in PATH to fit within WIDTH x HEIGHT")]
#[command(long_about = "\
Resize images in PATH to a size that is limited to (WIDTH, HEIGHT).

Aspect ratio is preserved and EXIF orientation is applied, so portrait photos
stay upright. By default the resized image files are placed in a
sub-directory of PATH named \"resized\" with the same file names. Use
--subdir SUBDIR to change the name of this sub-directory.

If an image can't be saved in its original format, it is converted to RGB
and saved as <name>.jpg instead.

Config file (--config FILE, all keys optional):

  subdir = \"resized\"
  log_file = \"birt.log\"
  logging_level = \"INFO\"

  [resize]
  filter = \"lanczos3\"
  jpeg_quality = 90

Example:

  birt some/dir/with/images 1200 800   # writes some/dir/with/images/resized/")]
struct Cli {
    /// Directory holding the images to resize
    #[arg(value_parser = existing_dir)]
    path: PathBuf,

    /// Maximum width of resized images
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Maximum height of resized images
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Create resized images in SUBDIR with the same file names [default: resized]
    #[arg(long, value_name = "SUBDIR")]
    subdir: Option<PathBuf>,

    /// Enable verbose output (console level DEBUG)
    #[arg(short, long)]
    verbose: bool,

    /// Enable quiet output (console level ERROR)
    #[arg(short, long)]
    quiet: bool,

    /// Console logging level [default: INFO]
    #[arg(long, value_enum)]
    logging_level: Option<LogLevel>,

    /// Test mode: do not process images, just log what would be done
    #[arg(short, long)]
    test: bool,

    /// TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file, always written at DEBUG level [default: birt.log]
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Resampling filter [default: lanczos3]
    #[arg(long, value_enum)]
    filter: Option<ResampleFilter>,

    /// JPEG quality, 1-100 [default: 90]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            subdir: self.subdir.clone(),
            log_file: self.log_file.clone(),
            logging_level: self.logging_level,
            filter: self.filter,
            jpeg_quality: self.quality,
        }
    }
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("'{s}' is not an existing directory"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply(cli.overrides());
    config.validate()?;

    let dispatch = logging::build_dispatch(&LoggingConfig {
        console_level: logging::console_level(config.logging_level, cli.verbose, cli.quiet),
        log_file: Some(config.log_file.clone()),
    })?;

    tracing::dispatcher::with_default(&dispatch, || run(&cli, &config))
}

fn run(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("{} {}", IDENT, env!("CARGO_PKG_VERSION"));
    debug!("path: {}", cli.path.display());
    debug!("width: {}", cli.width);
    debug!("height: {}", cli.height);
    debug!("subdir: {}", config.subdir.display());
    debug!("test: {}", cli.test);
    debug!("logging_level: {:?}", config.logging_level);
    debug!("verbose: {}", cli.verbose);
    debug!("filter: {:?}", config.resize.filter);

    let bounds =
        BoundingBox::new(cli.width, cli.height).ok_or("WIDTH and HEIGHT must be positive")?;

    let job = ResizeJob {
        subdir: config.subdir.clone(),
        dry_run: cli.test,
        filter: config.resize.filter,
        quality: Quality::new(config.resize.jpeg_quality),
        ..ResizeJob::new(&cli.path, bounds)
    };

    resize::resize_directory(&job)?;
    Ok(())
}
