use serde::Serialize;

use crate::field::descriptor::{FieldDescriptor, PaletteEntry};
use crate::field::input::{
    CheckboxFieldDescriptor, DateFieldDescriptor, NumberFieldDescriptor, SelectFieldDescriptor,
    TextFieldDescriptor, TextareaFieldDescriptor,
};
use crate::field::kind::{FieldCategory, FieldType};
use crate::field::layout::{
    DividerFieldDescriptor, ParagraphFieldDescriptor, SpacerFieldDescriptor,
    SubtitleFieldDescriptor, TitleFieldDescriptor,
};

/// Descriptor for `kind`. Total: every variant has exactly one descriptor.
pub fn lookup(kind: FieldType) -> &'static dyn FieldDescriptor {
    match kind {
        FieldType::TextField => &TextFieldDescriptor,
        FieldType::TextareaField => &TextareaFieldDescriptor,
        FieldType::NumberField => &NumberFieldDescriptor,
        FieldType::DateField => &DateFieldDescriptor,
        FieldType::SelectField => &SelectFieldDescriptor,
        FieldType::CheckboxField => &CheckboxFieldDescriptor,
        FieldType::TitleField => &TitleFieldDescriptor,
        FieldType::SubtitleField => &SubtitleFieldDescriptor,
        FieldType::ParagraphField => &ParagraphFieldDescriptor,
        FieldType::DividerField => &DividerFieldDescriptor,
        FieldType::SpacerField => &SpacerFieldDescriptor,
    }
}

pub fn descriptors() -> impl Iterator<Item = &'static dyn FieldDescriptor> {
    FieldType::ALL.into_iter().map(lookup)
}

/// Palette entries split into the layout group and the input group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub layout: Vec<PaletteEntry>,
    pub input: Vec<PaletteEntry>,
}

pub fn palette() -> Palette {
    let (layout, input): (Vec<_>, Vec<_>) = descriptors()
        .map(|descriptor| descriptor.palette())
        .partition(|entry| entry.category() == FieldCategory::Layout);
    Palette { layout, input }
}
