//! Document mutations as values.
//!
//! Drag classification produces `Insert`/`Move`; the properties editor
//! produces `Update`; the canvas produces `Remove`/`Select`. All of them are
//! applied through [`Document::apply`].

use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentError};
use crate::field::FieldInstance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertCommand {
    pub instance: FieldInstance,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub id: String,
    /// Target position in the list after `id` has been taken out.
    pub to_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCommand {
    pub id: String,
    pub instance: FieldInstance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCommand {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectCommand {
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Insert(InsertCommand),
    Move(MoveCommand),
    Update(UpdateCommand),
    Remove(RemoveCommand),
    Select(SelectCommand),
}

impl Command {
    pub fn insert(instance: FieldInstance, index: usize) -> Self {
        Command::Insert(InsertCommand { instance, index })
    }

    pub fn move_to(id: impl Into<String>, to_index: usize) -> Self {
        Command::Move(MoveCommand {
            id: id.into(),
            to_index,
        })
    }

    pub fn update(instance: FieldInstance) -> Self {
        Command::Update(UpdateCommand {
            id: instance.id().to_string(),
            instance,
        })
    }

    pub fn remove(id: impl Into<String>) -> Self {
        Command::Remove(RemoveCommand { id: id.into() })
    }

    pub fn select(id: Option<String>) -> Self {
        Command::Select(SelectCommand { id })
    }
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Inserted { id: String, index: usize },
    Moved { id: String, index: usize },
    Updated { id: String },
    /// `None` when the id was not present.
    Removed(Option<FieldInstance>),
    Selected(Option<String>),
}

impl Document {
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, DocumentError> {
        match command {
            Command::Insert(InsertCommand { instance, index }) => {
                let id = instance.id().to_string();
                let index = self.insert(instance, index)?;
                Ok(CommandOutcome::Inserted { id, index })
            }
            Command::Move(MoveCommand { id, to_index }) => {
                let index = self.move_to(&id, to_index)?;
                Ok(CommandOutcome::Moved { id, index })
            }
            Command::Update(UpdateCommand { id, instance }) => {
                self.update(&id, instance)?;
                Ok(CommandOutcome::Updated { id })
            }
            Command::Remove(RemoveCommand { id }) => Ok(CommandOutcome::Removed(self.remove(&id))),
            Command::Select(SelectCommand { id }) => {
                self.select(id.as_deref())?;
                Ok(CommandOutcome::Selected(id))
            }
        }
    }
}
