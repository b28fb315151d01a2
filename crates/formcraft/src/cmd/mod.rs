use std::sync::Arc;

use form_store::{FormStore, FsFormStore, UserId};

use crate::config::FormcraftConfig;

pub mod design;
pub mod form;
pub mod i18n;
pub mod stats;
pub mod submit;

/// Everything a command needs: resolved settings, the store and the caller.
pub struct AppContext {
    pub config: FormcraftConfig,
    pub store: Arc<dyn FormStore>,
    pub owner: UserId,
}

impl AppContext {
    /// Opens the file-backed store under the configured data directory.
    pub fn from_config(config: FormcraftConfig) -> Self {
        let store = FsFormStore::with_page_size(&config.data_dir, config.page_size);
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: FormcraftConfig, store: Arc<dyn FormStore>) -> Self {
        let owner = UserId::new(config.user.clone());
        Self {
            config,
            store,
            owner,
        }
    }
}

/// Splits `key=value`; the value may itself contain `=`.
pub(crate) fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| i18n::trf("cli.error.expected_pair", &[raw]))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(i18n::trf("cli.error.expected_pair", &[raw]));
    }
    Ok((key.to_string(), value.to_string()))
}

pub(crate) fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_split_on_first_equals() {
        assert_eq!(
            parse_pair("options=a=b").unwrap(),
            ("options".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_pair(" label =").unwrap(), ("label".into(), String::new()));
        assert!(parse_pair("label").is_err());
        assert!(parse_pair("=x").is_err());
    }
}
