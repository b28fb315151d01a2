use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use form_spec::{Document, render_text, submission_schema};
use form_store::{FormId, NewForm};
use serde_json::json;
use time::format_description::well_known::Rfc3339;

use super::i18n::{tr_key, trf};
use super::{AppContext, print_json};

#[derive(Subcommand, Debug, Clone)]
pub enum FormCommand {
    /// Create an empty, unpublished form
    Create(CreateArgs),
    /// List your forms, newest first
    List(ListArgs),
    /// Show a form and its design
    Show(ShowArgs),
    /// Publish a form and print its share token
    Publish(FormRef),
    /// Print the JSON Schema of accepted submissions
    Schema(FormRef),
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Form name (4 to 50 characters)
    #[arg(long)]
    pub name: String,
    /// Optional description (up to 200 characters)
    #[arg(long, default_value = "")]
    pub description: String,
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Form id
    pub id: FormId,
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FormRef {
    /// Form id
    pub id: FormId,
}

pub async fn run(command: FormCommand, ctx: &AppContext) -> Result<()> {
    match command {
        FormCommand::Create(args) => create(args, ctx).await,
        FormCommand::List(args) => list(args, ctx).await,
        FormCommand::Show(args) => show(args, ctx).await,
        FormCommand::Publish(args) => publish(args, ctx).await,
        FormCommand::Schema(args) => schema(args, ctx).await,
    }
}

async fn create(args: CreateArgs, ctx: &AppContext) -> Result<()> {
    let name = args.name.trim().to_string();
    let id = ctx
        .store
        .create_form(&ctx.owner, NewForm::new(args.name, args.description))
        .await
        .context(tr_key("cli.form.create_failed"))?;
    if args.json {
        return print_json(&json!({ "id": id, "name": name }));
    }
    println!("{}", trf("cli.form.created", &[&id.to_string(), &name]));
    Ok(())
}

async fn list(args: ListArgs, ctx: &AppContext) -> Result<()> {
    let forms = ctx.store.list_forms(&ctx.owner).await?;
    if args.json {
        return print_json(&forms);
    }
    if forms.is_empty() {
        println!("{}", tr_key("cli.form.none"));
        return Ok(());
    }
    for form in forms {
        let state = if form.published {
            tr_key("cli.form.state.published")
        } else {
            tr_key("cli.form.state.draft")
        };
        println!(
            "{:>4}  {:<30}  {:<10}  {}",
            form.id,
            form.name,
            state,
            trf(
                "cli.form.counts",
                &[&form.visits.to_string(), &form.submissions.to_string()]
            )
        );
    }
    Ok(())
}

async fn show(args: ShowArgs, ctx: &AppContext) -> Result<()> {
    let record = ctx
        .store
        .load_form(&ctx.owner, args.id)
        .await
        .with_context(|| trf("cli.form.load_failed", &[&args.id.to_string()]))?;
    let document = Document::from_json(&record.content)?;
    if args.json {
        return print_json(&json!({
            "form": record,
            "elements": document.elements(),
        }));
    }
    println!("{} (#{})", record.name, record.id);
    if !record.description.is_empty() {
        println!("{}", record.description);
    }
    let created = record.created_at.format(&Rfc3339)?;
    println!("{}", trf("cli.form.created_at", &[&created]));
    if record.published {
        println!("{}", trf("cli.form.share_token", &[record.share_token.as_str()]));
    } else {
        println!("{}", tr_key("cli.form.state.draft"));
    }
    println!("{}", render_text(&document));
    Ok(())
}

async fn publish(args: FormRef, ctx: &AppContext) -> Result<()> {
    let token = ctx
        .store
        .publish_form(&ctx.owner, args.id)
        .await
        .with_context(|| trf("cli.form.load_failed", &[&args.id.to_string()]))?;
    println!("{}", trf("cli.form.published", &[&args.id.to_string()]));
    println!("{token}");
    Ok(())
}

async fn schema(args: FormRef, ctx: &AppContext) -> Result<()> {
    let record = ctx
        .store
        .load_form(&ctx.owner, args.id)
        .await
        .with_context(|| trf("cli.form.load_failed", &[&args.id.to_string()]))?;
    let document = Document::from_json(&record.content)?;
    print_json(&submission_schema(&document))
}
