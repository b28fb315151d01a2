#![allow(missing_docs)]

pub mod command;
pub mod document;
pub mod drag;
pub mod field;
pub mod render;
pub mod schema;
pub mod stats;
pub mod submissions;
pub mod validate;

pub use command::{
    Command, CommandOutcome, InsertCommand, MoveCommand, RemoveCommand, SelectCommand,
    UpdateCommand,
};
pub use document::{Document, DocumentError};
pub use drag::{DragError, DragSource, DropTarget, apply_drop, classify_drop};
pub use field::{
    Attributes, FieldCategory, FieldDescriptor, FieldInstance, FieldType, IdGenerator,
    Palette, PaletteEntry, PropertyError, PropertySpec, SequentialIds, UuidGenerator, lookup,
    palette,
};
pub use render::{designer_view, properties_view, render_text, runtime_view};
pub use schema::{content_schema, submission_schema};
pub use stats::FormStats;
pub use submissions::{Cell, Column, SubmissionTable, SubmittedRow, TableRow};
pub use validate::{SubmissionCheck, Values, validate_all};
