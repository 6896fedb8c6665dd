//! Light/dark window theme.

/// Window theme. The UI collaborator decides how to paint it; the
/// stylesheet is provided for toolkits that take one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Window stylesheet. Light clears any custom style.
    pub fn stylesheet(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "background-color: #2E2E2E; color: #FFFFFF;",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
        assert!(!Theme::default().is_dark());
    }

    #[test]
    fn toggle_flips_and_restores() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn dark_stylesheet_sets_colors() {
        assert!(Theme::Dark.stylesheet().contains("#2E2E2E"));
        assert!(Theme::Light.stylesheet().is_empty());
    }
}
