use anyhow::{Context, Result};
use clap::Args;
use form_spec::{Document, FormStats, SubmissionTable, SubmittedRow};
use form_store::FormId;
use serde_json::json;

use super::i18n::{tr_key, trf};
use super::{AppContext, print_json};

#[derive(Args, Debug, Clone)]
pub struct SubmissionsArgs {
    /// Form id
    pub id: FormId,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn submissions(args: SubmissionsArgs, ctx: &AppContext) -> Result<()> {
    let (record, stored) = ctx
        .store
        .form_with_submissions(&ctx.owner, args.id)
        .await
        .with_context(|| trf("cli.form.load_failed", &[&args.id.to_string()]))?;
    let document = Document::from_json(&record.content)?;
    let rows = stored
        .iter()
        .map(|submission| SubmittedRow::from_content(&submission.content, submission.created_at))
        .collect::<Result<Vec<_>, _>>()
        .context(tr_key("cli.submissions.corrupt"))?;
    let stats = FormStats::from_counts(record.visits, record.submissions);
    let table = SubmissionTable::build(&document, &rows);
    if args.json {
        return print_json(&json!({
            "form": record.summary(),
            "stats": stats,
            "table": table,
        }));
    }
    println!("{} (#{})", record.name, record.id);
    print_stats(&stats);
    println!();
    println!("{}", table.render_text());
    Ok(())
}

pub async fn stats(args: StatsArgs, ctx: &AppContext) -> Result<()> {
    let stats = ctx.store.stats(&ctx.owner).await?;
    if args.json {
        return print_json(&stats);
    }
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &FormStats) {
    println!("{}", trf("cli.stats.visits", &[&stats.visits.to_string()]));
    println!("{}", trf("cli.stats.submissions", &[&stats.submissions.to_string()]));
    println!(
        "{}",
        trf("cli.stats.submission_rate", &[&format!("{:.1}", stats.submission_rate)])
    );
    println!(
        "{}",
        trf("cli.stats.bounce_rate", &[&format!("{:.1}", stats.bounce_rate)])
    );
}
