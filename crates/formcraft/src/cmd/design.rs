use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args, Subcommand};
use form_spec::{
    CommandOutcome, DragSource, DropTarget, FieldType, Values, palette, properties_view,
    render_text, runtime_view,
};
use form_store::FormId;

use super::i18n::{tr_key, trf};
use super::{AppContext, parse_pair, print_json};
use crate::editor::EditorSession;

#[derive(Args, Debug, Clone)]
pub struct DesignArgs {
    /// Form id
    pub id: FormId,
    #[command(subcommand)]
    pub action: DesignAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DesignAction {
    /// List the field types that can be dropped on a form
    Palette(PaletteArgs),
    /// Drop a new field or move an existing element
    Drop(DropArgs),
    /// Remove an element
    Remove(ElementRef),
    /// Change properties of an element
    Set(SetArgs),
    /// Select an element and show the design
    Select(ElementRef),
    /// Show the properties editor of an element
    Properties(ElementRef),
    /// Show the draft as visitors will see it, without counting a visit
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PaletteArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Emit the Adaptive Card instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["palette", "element"])))]
#[command(group(ArgGroup::new("target").args(["empty", "top", "bottom"])))]
pub struct DropArgs {
    /// Field type to add, e.g. text-field
    #[arg(long, value_name = "KIND")]
    pub palette: Option<FieldType>,
    /// Existing element to move
    #[arg(long, value_name = "ELEMENT")]
    pub element: Option<String>,
    /// Drop on the empty area after the last element
    #[arg(long)]
    pub empty: bool,
    /// Drop on the top half of an element
    #[arg(long, value_name = "ELEMENT")]
    pub top: Option<String>,
    /// Drop on the bottom half of an element
    #[arg(long, value_name = "ELEMENT")]
    pub bottom: Option<String>,
}

impl DropArgs {
    pub fn source(&self) -> Option<DragSource> {
        match (&self.palette, &self.element) {
            (Some(kind), _) => Some(DragSource::Palette(*kind)),
            (None, Some(id)) => Some(DragSource::Element(id.clone())),
            (None, None) => None,
        }
    }

    /// No target flag means the empty area.
    pub fn target(&self) -> DropTarget {
        match (&self.top, &self.bottom) {
            (Some(id), _) => DropTarget::TopHalf(id.clone()),
            (None, Some(id)) => DropTarget::BottomHalf(id.clone()),
            (None, None) => DropTarget::EmptyArea,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ElementRef {
    /// Element id
    pub element: String,
}

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Element id
    pub element: String,
    /// Property assignments, e.g. label=Email required=true
    #[arg(value_name = "KEY=VALUE", required = true, value_parser = parse_pair)]
    pub pairs: Vec<(String, String)>,
}

pub async fn run(args: DesignArgs, ctx: &AppContext) -> Result<()> {
    if let DesignAction::Palette(palette_args) = &args.action {
        return show_palette(palette_args);
    }
    let mut session = EditorSession::open(ctx.store.clone(), ctx.owner.clone(), args.id)
        .await
        .with_context(|| trf("cli.form.load_failed", &[&args.id.to_string()]))?;
    match args.action {
        DesignAction::Palette(_) => Ok(()),
        DesignAction::Drop(drop) => {
            let source = drop.source();
            let outcome = session.handle_drop(source.as_ref(), Some(&drop.target()))?;
            match outcome {
                Some(CommandOutcome::Inserted { id, index }) => {
                    println!("{}", trf("cli.design.inserted", &[&id, &(index + 1).to_string()]));
                }
                Some(CommandOutcome::Moved { id, index }) => {
                    println!("{}", trf("cli.design.moved", &[&id, &(index + 1).to_string()]));
                }
                _ => println!("{}", tr_key("cli.design.unchanged")),
            }
            save_and_show(&mut session).await
        }
        DesignAction::Remove(target) => {
            if session.remove(&target.element)?.is_none() {
                bail!(trf("cli.design.unknown_element", &[&target.element]));
            }
            println!("{}", trf("cli.design.removed", &[&target.element]));
            save_and_show(&mut session).await
        }
        DesignAction::Set(set) => {
            let patch = session.parse_patch(&set.element, &set.pairs)?;
            session.set_properties(&set.element, &patch)?;
            println!("{}", trf("cli.design.updated", &[&set.element]));
            save_and_show(&mut session).await
        }
        DesignAction::Select(target) => {
            session.select(Some(&target.element))?;
            println!("{}", render_text(session.document()));
            Ok(())
        }
        DesignAction::Properties(target) => {
            session.select(Some(&target.element))?;
            match properties_view(session.document()) {
                Some(view) => print_json(&view),
                None => bail!(trf("cli.design.unknown_element", &[&target.element])),
            }
        }
        DesignAction::Preview(preview) => {
            if preview.json {
                return print_json(&runtime_view(
                    session.document(),
                    &Values::new(),
                    &BTreeSet::new(),
                ));
            }
            println!("{}", render_text(session.document()));
            Ok(())
        }
    }
}

async fn save_and_show(session: &mut EditorSession) -> Result<()> {
    session
        .save()
        .await
        .context(tr_key("cli.design.save_failed"))?;
    println!("{}", render_text(session.document()));
    Ok(())
}

fn show_palette(args: &PaletteArgs) -> Result<()> {
    let palette = palette();
    if args.json {
        return print_json(&palette);
    }
    for (heading, entries) in [
        ("cli.design.palette.layout", &palette.layout),
        ("cli.design.palette.input", &palette.input),
    ] {
        println!("{}", tr_key(heading));
        for entry in entries {
            println!("  {:<16} {}", entry.kind.cli_name(), entry.label);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_args() -> DropArgs {
        DropArgs {
            palette: None,
            element: Some("a".into()),
            empty: false,
            top: None,
            bottom: None,
        }
    }

    #[test]
    fn drop_flags_map_to_drag_events() {
        let mut args = drop_args();
        assert_eq!(args.source(), Some(DragSource::Element("a".into())));
        assert_eq!(args.target(), DropTarget::EmptyArea);

        args.bottom = Some("b".into());
        assert_eq!(args.target(), DropTarget::BottomHalf("b".into()));

        args.palette = Some(FieldType::DateField);
        args.element = None;
        assert_eq!(args.source(), Some(DragSource::Palette(FieldType::DateField)));
    }
}
