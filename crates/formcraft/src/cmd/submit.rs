use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args};
use form_spec::{Values, render_text};
use form_store::ShareToken;
use serde_json::Value;

use super::i18n::{tr_key, trf};
use super::{AppContext, parse_pair, print_json};
use crate::submit::{SubmissionSession, SubmitError};

#[derive(Args, Debug, Clone)]
pub struct VisitArgs {
    /// Share token printed by `form publish`
    pub token: String,
    /// Emit the Adaptive Card instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("input").required(true).args(["values", "value"])))]
pub struct SubmitArgs {
    /// Share token printed by `form publish`
    pub token: String,
    /// JSON object mapping element ids to values
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,
    /// One element value, e.g. --value email=ada@example.com
    #[arg(long, value_name = "ID=VALUE", value_parser = parse_pair)]
    pub value: Vec<(String, String)>,
}

pub async fn visit(args: VisitArgs, ctx: &AppContext) -> Result<()> {
    let session = SubmissionSession::visit(ctx.store.clone(), ShareToken::new(args.token))
        .await
        .context(tr_key("cli.submit.open_failed"))?;
    if args.json {
        return print_json(&session.view());
    }
    println!("{}", render_text(session.document()));
    Ok(())
}

pub async fn submit(args: SubmitArgs, ctx: &AppContext) -> Result<()> {
    let mut values = match &args.values {
        Some(path) => read_values(path)?,
        None => Values::new(),
    };
    values.extend(args.value);

    let mut session = SubmissionSession::visit(ctx.store.clone(), ShareToken::new(args.token))
        .await
        .context(tr_key("cli.submit.open_failed"))?;
    session.extend_values(values);
    match session.submit().await {
        Ok(id) => {
            println!("{}", trf("cli.submit.accepted", &[&id.to_string()]));
            Ok(())
        }
        Err(SubmitError::Invalid(ids)) => {
            for id in &ids {
                let caption = session
                    .document()
                    .get(id)
                    .and_then(|element| element.caption())
                    .unwrap_or_default();
                eprintln!("{}", trf("cli.submit.invalid_field", &[id.as_str(), caption]));
            }
            bail!(trf("cli.submit.rejected", &[&ids.len().to_string()]))
        }
        Err(err) => Err(err.into()),
    }
}

/// Reads a JSON object of values. Non-string scalars are kept in their JSON
/// text form so `true` and `42` can be written unquoted.
fn read_values(path: &Path) -> Result<Values> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| trf("cli.submit.read_failed", &[&path.display().to_string()]))?;
    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| trf("cli.submit.read_failed", &[&path.display().to_string()]))?;
    let Value::Object(map) = parsed else {
        bail!(trf("cli.submit.not_an_object", &[&path.display().to_string()]));
    };
    Ok(map
        .into_iter()
        .filter_map(|(id, value)| match value {
            Value::String(text) => Some((id, text)),
            Value::Null => None,
            other => Some((id, other.to_string())),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_file_accepts_scalars() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("values.json");
        std::fs::write(
            &path,
            r#"{"name": "Ada", "consent": true, "age": 36, "skip": null}"#,
        )
        .unwrap();
        let values = read_values(&path).unwrap();
        assert_eq!(values.get("name").map(String::as_str), Some("Ada"));
        assert_eq!(values.get("consent").map(String::as_str), Some("true"));
        assert_eq!(values.get("age").map(String::as_str), Some("36"));
        assert!(!values.contains_key("skip"));
    }

    #[test]
    fn values_file_must_be_an_object() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("values.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(read_values(&path).is_err());
    }
}
