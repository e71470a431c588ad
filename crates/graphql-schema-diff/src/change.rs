use async_graphql_parser::Pos;
use serde::Serialize;
use std::fmt;

/// A single observable difference between two schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change<'a> {
    pub kind: ChangeKind,
    pub criticality: Criticality,
    /// Human readable description of the change.
    pub message: String,
    /// Dotted path to the changed construct, e.g. `TypeName.fieldName.argName`
    /// or `@directiveName.argName`.
    pub path: String,
    pub position: SourcePosition<'a>,
}

/// Location of a change in the schema sources. Points into the new schema
/// where the construct still exists, into the old schema otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourcePosition<'a> {
    pub file: &'a str,
    pub line: usize,
    pub column: usize,
}

impl<'a> SourcePosition<'a> {
    pub(crate) fn new(file: &'a str, pos: Pos) -> Self {
        SourcePosition {
            file,
            line: pos.line,
            column: pos.column,
        }
    }
}

/// How a change affects existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Criticality {
    /// Compatible with the previous version.
    NonBreaking,
    /// Compatible with the previous version, but can change behavior for
    /// defensively written consumers.
    Dangerous,
    /// Incompatible with the previous version.
    Breaking,
}

impl Criticality {
    /// The marker printed in front of report lines of this criticality.
    pub fn marker(self) -> &'static str {
        match self {
            Criticality::Breaking => "❌",
            Criticality::Dangerous => "✋️",
            Criticality::NonBreaking => "✅",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Criticality::Breaking => "Breaking",
            Criticality::Dangerous => "Dangerous",
            Criticality::NonBreaking => "NonBreaking",
        };
        f.write_str(name)
    }
}

/// Every kind of change the differ can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    TypeAdded,
    TypeRemoved,
    TypeKindChanged,
    TypeDescriptionChanged,
    FieldAdded,
    FieldRemoved,
    FieldTypeChanged,
    FieldDescriptionChanged,
    FieldDeprecationAdded,
    FieldDeprecationRemoved,
    FieldDeprecationReasonChanged,
    FieldArgumentAdded,
    FieldArgumentRemoved,
    FieldArgumentTypeChanged,
    FieldArgumentDefaultChanged,
    FieldArgumentDescriptionChanged,
    InputFieldAdded,
    InputFieldRemoved,
    InputFieldTypeChanged,
    InputFieldDefaultValueChanged,
    InputFieldDescriptionChanged,
    EnumValueAdded,
    EnumValueRemoved,
    EnumValueDescriptionChanged,
    EnumValueDeprecationAdded,
    EnumValueDeprecationReasonChanged,
    UnionMemberAdded,
    UnionMemberRemoved,
    ObjectTypeInterfaceAdded,
    ObjectTypeInterfaceRemoved,
    DirectiveAdded,
    DirectiveRemoved,
    DirectiveChanged,
    DirectiveDescriptionChanged,
    DirectiveLocationAdded,
    DirectiveLocationRemoved,
    DirectiveRepeatableAdded,
    DirectiveRepeatableRemoved,
    DirectiveArgumentAdded,
    DirectiveArgumentRemoved,
    DirectiveArgumentTypeChanged,
    DirectiveArgumentDefaultValueChanged,
    DirectiveArgumentDescriptionChanged,
    DirectiveArgumentValueChanged,
    SchemaQueryTypeChanged,
    SchemaMutationTypeChanged,
    SchemaSubscriptionTypeChanged,
}
