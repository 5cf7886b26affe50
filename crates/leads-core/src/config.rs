//! Configuration types for leads-unifier.
//!
//! [`Config::load`] layers the built-in defaults, an optional
//! `leads-unifier.toml` in the working directory (or an explicit file), and
//! `LEADS__*` environment variables. [`Config::defaults`] returns the built-in
//! defaults without touching the filesystem (useful in tests).
//!
//! The pipeline itself never reads a `Config`; callers turn it into an
//! [`AliasTable`] and [`NormalizeRules`] with [`Config::alias_table`] and
//! [`Config::normalize_rules`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::normalizer::NormalizeRules;
use crate::resolver::AliasTable;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[input]
dir     = "input"
pattern = "*.csv"

[output]
file = "output/combined_contacts.csv"

[logging]
dir   = "logs"
level = "info"
file  = true

[normalize]
min_phone_digits = 7
max_phone_digits = 15

[aliases]
name  = ["name", "full name", "contact", "nome", "nombre"]
email = ["email", "e-mail", "mail", "e_mail", "correo", "correio"]
phone = ["phone", "telephone", "mobile", "cell", "telefone", "telefono", "celular", "fone"]
"#;

/// File looked up in the working directory when no explicit path is given.
pub const LOCAL_CONFIG_FILE: &str = "leads-unifier.toml";

/// Prefix for environment overrides, e.g. `LEADS__OUTPUT__FILE`.
pub const ENV_PREFIX: &str = "LEADS";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub normalize: NormalizeConfig,
    pub aliases: AliasesConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub dir: PathBuf,
    /// File-name glob (`*` and `?` only), matched case-insensitively.
    pub pattern: String,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub file: PathBuf,
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Write a per-run log file into `dir`.
    pub file: bool,
}

/// `[normalize]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    pub min_phone_digits: usize,
    pub max_phone_digits: usize,
}

/// `[aliases]` section: substrings that identify each canonical column.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasesConfig {
    pub name: Vec<String>,
    pub email: Vec<String>,
    pub phone: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// With `explicit = Some(path)` that file must exist. Otherwise
    /// `leads-unifier.toml` in the working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let file_source = match explicit {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(Path::new(LOCAL_CONFIG_FILE)).required(false),
        };

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Parse a TOML string layered on top of the defaults.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let n = &self.normalize;
        anyhow::ensure!(n.min_phone_digits > 0, "normalize.min_phone_digits must be at least 1");
        anyhow::ensure!(
            n.min_phone_digits <= n.max_phone_digits,
            "normalize.min_phone_digits ({}) exceeds max_phone_digits ({})",
            n.min_phone_digits,
            n.max_phone_digits
        );
        for (field, list) in [
            ("name", &self.aliases.name),
            ("email", &self.aliases.email),
            ("phone", &self.aliases.phone),
        ] {
            anyhow::ensure!(
                list.iter().any(|a| !a.trim().is_empty()),
                "aliases.{field} must contain at least one non-empty alias"
            );
        }
        anyhow::ensure!(!self.input.pattern.trim().is_empty(), "input.pattern must not be empty");
        Ok(())
    }

    pub fn alias_table(&self) -> AliasTable {
        AliasTable::new(
            self.aliases.name.clone(),
            self.aliases.email.clone(),
            self.aliases.phone.clone(),
        )
    }

    pub fn normalize_rules(&self) -> NormalizeRules {
        NormalizeRules {
            min_phone_digits: self.normalize.min_phone_digits,
            max_phone_digits: self.normalize.max_phone_digits,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
