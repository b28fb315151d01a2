pub mod descriptor;
pub mod input;
pub mod instance;
pub mod kind;
pub mod layout;
pub mod registry;

pub use descriptor::{FieldDescriptor, PaletteEntry, PropertyError, PropertyKind, PropertySpec};
pub use instance::{Attributes, FieldInstance, IdGenerator, SequentialIds, UuidGenerator};
pub use kind::{FieldCategory, FieldType, UnknownFieldType};
pub use registry::{Palette, descriptors, lookup, palette};
