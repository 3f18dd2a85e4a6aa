use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon of the toggle button, which shows the current theme.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "fa-sun",
            Self::Dark => "fa-moon",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

/// Persistent storage for the user's theme choice.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync + 'static {
    fn load_theme(&self) -> Option<Theme>;
    fn save_theme(&self, theme: Theme);
}

#[derive(Debug)]
pub struct ThemeState<Store> {
    store: Store,
    theme: Theme,
}

impl<Store: PreferenceStore> ThemeState<Store> {
    /// A saved preference wins over the system preference.
    pub fn init(store: Store, system_prefers_dark: bool) -> Self {
        let theme = store.load_theme().unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.store.save_theme(self.theme);
        self.theme
    }
}
