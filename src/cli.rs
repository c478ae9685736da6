//! Command-line interface.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::SettingValue;
use crate::settings::Accessor;
use crate::storage::StoreHandle;

#[derive(Parser, Debug)]
#[command(name = "settings-store", version, about = "Read and write persisted settings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a setting, or the default if nothing usable is stored.
    Get {
        /// Setting name.
        key: String,

        #[arg(short, long, value_enum, default_value_t = ValueKind::Text)]
        kind: ValueKind,

        /// Value printed when the setting is absent or of another type.
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Write a setting.
    Set {
        /// Setting name.
        key: String,

        /// New value, parsed according to `--kind`.
        value: String,

        #[arg(short, long, value_enum, default_value_t = ValueKind::Text)]
        kind: ValueKind,
    },
}

/// Value type of a setting on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
}

impl Command {
    /// Run the command against a store, returning the text to print.
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not parse as `--kind` or the write
    /// cannot be persisted.
    pub fn execute(&self, store: &Arc<StoreHandle>) -> anyhow::Result<String> {
        match self {
            Self::Get { key, kind, default } => {
                let default = default.as_deref();
                match kind {
                    ValueKind::Bool => get_as::<bool>(store, key, default),
                    ValueKind::Int => get_as::<i64>(store, key, default),
                    ValueKind::Float => get_as::<f64>(store, key, default),
                    ValueKind::Text => get_as::<String>(store, key, default),
                }
            }
            Self::Set { key, value, kind } => match kind {
                ValueKind::Bool => set_as::<bool>(store, key, value),
                ValueKind::Int => set_as::<i64>(store, key, value),
                ValueKind::Float => set_as::<f64>(store, key, value),
                ValueKind::Text => set_as::<String>(store, key, value),
            },
        }
    }
}

fn parse<T>(raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("invalid value '{raw}'"))
}

fn get_as<T>(store: &Arc<StoreHandle>, key: &str, default: Option<&str>) -> anyhow::Result<String>
where
    T: SettingValue + FromStr + Default + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let default = default.map(parse::<T>).transpose()?.unwrap_or_default();
    let accessor = Accessor::new(Arc::clone(store), default);
    Ok(accessor.get(key).to_string())
}

fn set_as<T>(store: &Arc<StoreHandle>, key: &str, value: &str) -> anyhow::Result<String>
where
    T: SettingValue + FromStr + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = parse::<T>(value)?;
    Accessor::new(Arc::clone(store), T::default()).set(key, value)?;
    Ok(format!("{key} updated"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn run(store: &Arc<StoreHandle>, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("settings-store").chain(args.iter().copied()))?;
        cli.command.execute(store)
    }

    #[test]
    fn test_get_defaults() {
        let store = Arc::new(StoreHandle::new(StoreConfig::memory()));

        assert_eq!(run(&store, &["get", "Theme", "--default", "Light"]).unwrap(), "Light");
        assert_eq!(run(&store, &["get", "Volume", "--kind", "int"]).unwrap(), "0");
    }

    #[test]
    fn test_set_then_get() {
        let store = Arc::new(StoreHandle::new(StoreConfig::memory()));

        assert_eq!(
            run(&store, &["set", "Volume", "70", "--kind", "int"]).unwrap(),
            "Volume updated"
        );
        assert_eq!(run(&store, &["get", "Volume", "-k", "int"]).unwrap(), "70");

        // Reading with another kind falls back to the default
        assert_eq!(
            run(&store, &["get", "Volume", "--default", "loud"]).unwrap(),
            "loud"
        );
    }

    #[test]
    fn test_unparsable_value_is_an_error() {
        let store = Arc::new(StoreHandle::new(StoreConfig::memory()));

        assert!(run(&store, &["set", "Enabled", "maybe", "--kind", "bool"]).is_err());
        assert!(run(&store, &["get", "Ratio", "--kind", "float", "--default", "x"]).is_err());
    }
}
