//! Message catalogs for command-line output and help text.
//!
//! Catalogs are flat `key -> message` JSON maps compiled into the binary.
//! English is complete; every other locale is layered over it, so a missing
//! translation falls back to the English text.

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::config::ENV_LOCALE;

const FALLBACK_LOCALE: &str = "en";

const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../i18n/en.json")),
    ("nl", include_str!("../../i18n/nl.json")),
];

type Messages = BTreeMap<String, String>;

#[derive(Debug, Error)]
#[error("message catalog '{locale}' is not a JSON object of strings")]
pub struct CatalogError {
    locale: &'static str,
    #[source]
    source: serde_json::Error,
}

struct Catalog {
    locale: &'static str,
    messages: Messages,
}

static ACTIVE: OnceLock<Catalog> = OnceLock::new();
static ENGLISH: OnceLock<Messages> = OnceLock::new();
static ENGLISH_LITERALS: OnceLock<Messages> = OnceLock::new();

fn parse(locale: &'static str, raw: &str) -> Result<Messages, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError { locale, source })
}

/// Lenient form of `parse` for lookups: a broken catalog logs and yields no
/// messages, so keys print as-is. `init` reports the same error up front.
fn parse_or_warn(locale: &'static str, raw: &str) -> Messages {
    parse(locale, raw).unwrap_or_else(|err| {
        warn!(error = %err, "ignoring message catalog");
        Messages::new()
    })
}

fn english() -> &'static Messages {
    ENGLISH.get_or_init(|| {
        CATALOGS
            .iter()
            .find(|(locale, _)| *locale == FALLBACK_LOCALE)
            .map(|(locale, raw)| parse_or_warn(*locale, raw))
            .unwrap_or_default()
    })
}

/// English message text back to its key, for translating clap literals.
fn english_literals() -> &'static Messages {
    ENGLISH_LITERALS.get_or_init(|| {
        english()
            .iter()
            .map(|(key, text)| (text.clone(), key.clone()))
            .collect()
    })
}

/// Full catalog for `locale`: its own messages over the English ones.
pub fn resolved_catalog(locale: &str) -> BTreeMap<String, String> {
    let mut messages = english().clone();
    if let Some((known, raw)) = CATALOGS.iter().find(|(known, _)| *known == locale) {
        messages.extend(parse_or_warn(*known, raw));
    }
    messages
}

/// Maps a requested locale onto a shipped catalog: `nl_BE.UTF-8` and `nl-BE`
/// both resolve to `nl`.
pub fn resolve_supported_locale(candidate: &str) -> Option<&'static str> {
    let without_codeset = candidate.trim().split(['.', '@']).next()?;
    if without_codeset.is_empty() {
        return None;
    }
    let langid: LanguageIdentifier = without_codeset.replace('_', "-").parse().ok()?;
    let full = langid.to_string();
    let language = langid.language.as_str().to_ascii_lowercase();
    CATALOGS
        .iter()
        .map(|(locale, _)| *locale)
        .find(|locale| *locale == full)
        .or_else(|| CATALOGS.iter().map(|(locale, _)| *locale).find(|locale| *locale == language))
}

/// Flag value first, then `FORMCRAFT_LOCALE` and the POSIX variables, then
/// the OS setting. Unsupported candidates are skipped.
fn select_locale(requested: Option<&str>) -> &'static str {
    let from_env = [ENV_LOCALE, "LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| env::var(key).ok());
    requested
        .map(str::to_string)
        .into_iter()
        .chain(from_env)
        .chain(sys_locale::get_locale())
        .find_map(|candidate| resolve_supported_locale(&candidate))
        .unwrap_or(FALLBACK_LOCALE)
}

/// Picks the locale for this process. Only the first call has an effect.
/// Fails when an embedded catalog does not parse.
pub fn init(requested: Option<String>) -> Result<(), CatalogError> {
    for (locale, raw) in CATALOGS {
        parse(*locale, raw)?;
    }
    ACTIVE.get_or_init(|| {
        let locale = select_locale(requested.as_deref());
        Catalog {
            locale,
            messages: resolved_catalog(locale),
        }
    });
    Ok(())
}

/// `--locale` as given on the command line, before clap has parsed anything.
pub fn cli_locale_from_argv(args: &[OsString]) -> Option<String> {
    let mut iter = args.iter().skip(1).map(|arg| arg.to_string_lossy());
    while let Some(arg) = iter.next() {
        if arg == "--locale" {
            return iter.next().map(|value| value.into_owned());
        }
        if let Some(value) = arg.strip_prefix("--locale=") {
            return Some(value.to_string());
        }
    }
    None
}

pub fn selected_locale() -> &'static str {
    ACTIVE.get().map_or(FALLBACK_LOCALE, |catalog| catalog.locale)
}

pub fn tr_key(key: &str) -> String {
    ACTIVE
        .get()
        .and_then(|catalog| catalog.messages.get(key))
        .or_else(|| english().get(key))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}

/// Translates an English literal (clap help text) through its catalog key.
pub fn tr_lit(english_text: &str) -> String {
    english_literals()
        .get(english_text)
        .map_or_else(|| english_text.to_string(), |key| tr_key(key))
}

/// `tr_key` with positional `{}` placeholders filled in order.
pub fn trf(key: &str, args: &[&str]) -> String {
    args.iter()
        .fold(tr_key(key), |message, arg| message.replacen("{}", arg, 1))
}
