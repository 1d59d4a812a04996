//! Registry configuration

use std::env;

/// Environment variable selecting the output mode
pub const MODE_ENV_VAR: &str = "JOTSTYLE_ENV";

/// Class name prefix used unless configured otherwise
pub const DEFAULT_CLASS_PREFIX: &str = "_j";

/// Output mode; only affects how generated CSS is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pretty-printed declarations
    #[default]
    Development,
    /// Compact declarations
    Production,
}

impl Mode {
    /// Read the mode from `JOTSTYLE_ENV`
    pub fn from_env() -> Self {
        match env::var(MODE_ENV_VAR) {
            Ok(value) => Self::parse(&value),
            Err(_) => Mode::Development,
        }
    }

    /// `production` selects production mode; anything else is development
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Mode::Production
        } else {
            Mode::Development
        }
    }

    pub fn is_pretty(&self) -> bool {
        *self == Mode::Development
    }
}

/// Settings for a class-name registry
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Output mode
    pub mode: Mode,
    /// Prefix for generated class names
    pub class_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with the mode taken from the environment
    pub fn from_env() -> Self {
        Self::default().with_mode(Mode::from_env())
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}
