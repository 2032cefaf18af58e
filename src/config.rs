use crate::contact::DEFAULT_ENDPOINT;
use crate::state::Section;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// `termfolio` - a developer portfolio for the terminal.
///
/// Shows a bio over an animated point field, a rotating sphere of skills,
/// the project list and a contact form. Move the mouse to play with the
/// animations.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Target frames per second for the animations.
    #[arg(long, env = "TERMFOLIO_FPS", default_value_t = 60,
          value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Width of one terminal cell in virtual pixels.
    ///
    /// Densities and link distances are expressed in pixels, so this decides
    /// how many points a terminal of a given width gets.
    #[arg(long, default_value_t = 8.0, value_parser = positive)]
    pub cell_width: f64,

    /// Height of one terminal cell in virtual pixels.
    #[arg(long, default_value_t = 16.0, value_parser = positive)]
    pub cell_height: f64,

    /// Where the light/dark preference is stored.
    #[arg(long, env = "TERMFOLIO_THEME_FILE")]
    pub theme_file: Option<PathBuf>,

    /// Form backend that receives contact messages.
    #[arg(long, env = "TERMFOLIO_FORM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub form_endpoint: String,

    /// Seconds to wait for the form backend.
    #[arg(long, default_value_t = 10)]
    pub form_timeout_secs: u64,

    /// Log output goes here; the terminal itself belongs to the UI.
    #[arg(long, env = "TERMFOLIO_LOG_FILE", default_value = "termfolio.log")]
    pub log_file: PathBuf,

    /// Section to open first.
    #[arg(long, value_enum, default_value_t = Section::Hero)]
    pub section: Section,

    /// Start with the debug overlay on.
    #[arg(long)]
    pub debug: bool,
}

fn positive(value: &str) -> Result<f64, String> {
    let parsed: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("{value} must be a positive number"))
    }
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    pub fn form_timeout(&self) -> Duration {
        Duration::from_secs(self.form_timeout_secs)
    }

    /// Explicit theme file, else `$XDG_CONFIG_HOME/termfolio/theme.json`,
    /// else `~/.config/termfolio/theme.json`
    pub fn theme_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.theme_file {
            return Some(path.clone());
        }
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("termfolio").join("theme.json"))
    }
}
