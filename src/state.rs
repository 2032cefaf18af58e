use crate::theme::Theme;
use clap::ValueEnum;

/// Page sections, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Section {
    #[default]
    Hero,
    Skills,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Hero,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        Section::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    pub fn prev(self) -> Section {
        Section::ALL[(self.index() + Section::ALL.len() - 1) % Section::ALL.len()]
    }
}

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current theme, refreshed from the theme store subscription every frame
    pub theme: Theme,
    /// Section currently on screen
    pub section: Section,
    /// Enable debug overlay
    pub debug: bool,
    /// Animations paused
    pub paused: bool,
    /// Measured frames per second
    pub fps: f64,
    /// Set when the user asked to leave
    pub quit: bool,
}

impl AppState {
    pub fn new(theme: Theme, section: Section, debug: bool) -> Self {
        AppState {
            theme,
            section,
            debug,
            paused: false,
            fps: 0.0,
            quit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps() {
        assert_eq!(Section::Contact.next(), Section::Hero);
        assert_eq!(Section::Hero.prev(), Section::Contact);
        assert_eq!(Section::Skills.next(), Section::Projects);
    }
}
