use clap::Parser;
use std::path::PathBuf;

use crate::files::DEFAULT_EXTENSIONS;
use crate::fit::FitPolicy;

pub const DEFAULT_INTERVAL_SECS: u64 = 10;

pub const HELP_KEYS: &str = "\
Key Bindings:
  Esc / q           : Quit
  Left / h          : Previous image (retraces viewing history)
  Right / l / Space : Next image
  c                 : Cycle fit mode (center-crop, padded-fit, stretch)

The button bar at the bottom offers the same back / quit / forward actions.
Any manual move skips the next automatic advance.
";

#[derive(Parser, Debug)]
#[command(name = "slideshow", about = "A simple slideshow viewer", after_help = HELP_KEYS)]
pub struct Cli {
    /// Root directory holding the image folder and the preferences file
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Image folder, relative to the root (scanned recursively)
    #[arg(short = 'd', long, default_value = "images")]
    pub image_dir: PathBuf,

    /// Seconds each image is shown before advancing [default: 10]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// How images are fitted to the window [default: center-crop]
    #[arg(short, long, value_enum)]
    pub fit: Option<FitPolicy>,

    /// Index of the first image shown; forward navigation wraps back to it
    #[arg(long, default_value = "0")]
    pub start: usize,

    /// Initial window width
    #[arg(long, default_value = "500")]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value = "500")]
    pub height: u32,

    /// File extensions to include (comma separated)
    #[arg(long = "ext", value_delimiter = ',', default_values = DEFAULT_EXTENSIONS)]
    pub extensions: Vec<String>,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_links: bool,

    /// Fill color for padded-fit bars, as hex RGB
    #[arg(long, default_value = "000000")]
    pub pad_color: String,

    /// Preferences file [default: <ROOT>/starting_variables.json]
    #[arg(long, value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    /// Log navigation and fit decisions
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(&self.image_dir)
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.prefs
            .clone()
            .unwrap_or_else(|| self.root.join(crate::prefs::DEFAULT_FILE_NAME))
    }
}
