//! Form designer, publisher and submission collector.
//!
//! The library half drives [`editor::EditorSession`] and
//! [`submit::SubmissionSession`] against any [`form_store::FormStore`]; the
//! `cli` feature adds the `formcraft` command line on top.

pub mod config;
pub mod editor;
pub mod logging;
pub mod submit;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod cmd;

pub use config::{ConfigError, ConfigOverrides, FormcraftConfig};
pub use editor::{EditorError, EditorSession};
pub use submit::{SubmissionSession, SubmitError};
