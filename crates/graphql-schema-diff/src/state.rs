use crate::{
    Change, ChangeKind, Criticality, SourcePosition,
    directives::push_directive_definition_changes,
    type_definitions::push_persisted_type_changes,
};
use async_graphql_parser::{
    Pos, Positioned,
    types::{DirectiveDefinition, InputValueDefinition, SchemaDefinition, TypeDefinition, TypeKind},
};
use async_graphql_value::{ConstValue, Name};
use std::collections::HashMap;

/// A map from construct name to the pair of nodes carrying that name, old
/// side at index 0, new side at index 1.
pub(crate) type DiffMap<K, V> = HashMap<K, [Option<V>; 2]>;

/// A node of the parsed schema together with the file it was read from.
#[derive(Debug)]
pub(crate) struct Sourced<'a, T: ?Sized> {
    pub(crate) file: &'a str,
    pub(crate) node: &'a T,
}

impl<T: ?Sized> Clone for Sourced<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Sourced<'_, T> {}

impl<'a, T: ?Sized> Sourced<'a, T> {
    pub(crate) fn position(&self, pos: Pos) -> SourcePosition<'a> {
        SourcePosition::new(self.file, pos)
    }

    /// Another node from the same file.
    pub(crate) fn with<U: ?Sized>(&self, node: &'a U) -> Sourced<'a, U> {
        Sourced { file: self.file, node }
    }
}

#[derive(Default)]
pub(crate) struct DiffState<'a> {
    pub(crate) schema_definitions: [Option<Sourced<'a, Positioned<SchemaDefinition>>>; 2],
    pub(crate) schema_extensions: [Option<Sourced<'a, Positioned<SchemaDefinition>>>; 2],
    pub(crate) types: DiffMap<&'a str, Sourced<'a, Positioned<TypeDefinition>>>,
    pub(crate) type_extensions: DiffMap<&'a str, Sourced<'a, Positioned<TypeDefinition>>>,
    pub(crate) directive_definitions: DiffMap<&'a str, Sourced<'a, Positioned<DirectiveDefinition>>>,
}

impl<'a> DiffState<'a> {
    pub(crate) fn into_changes(self) -> Vec<Change<'a>> {
        let DiffState {
            schema_definitions,
            schema_extensions,
            types,
            type_extensions,
            directive_definitions,
        } = self;

        let mut changes = Vec::new();

        push_schema_root_changes(schema_definitions, &mut changes);
        push_schema_root_changes(schema_extensions, &mut changes);

        push_type_set_changes(types, false, &mut changes);
        push_type_set_changes(type_extensions, true, &mut changes);

        push_directive_definition_changes(directive_definitions, &mut changes);

        // The maps do not iterate in a stable order, the consumers expect one.
        changes.sort_by(|a, b| {
            (a.position, a.path.as_str(), a.kind)
                .cmp(&(b.position, b.path.as_str(), b.kind))
                .then_with(|| a.message.cmp(&b.message))
        });

        changes
    }
}

/// The kind of a type definition, for kind-change detection and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefinitionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl DefinitionKind {
    pub(crate) fn new(kind: &TypeKind) -> Self {
        match kind {
            TypeKind::Scalar => DefinitionKind::Scalar,
            TypeKind::Object(_) => DefinitionKind::Object,
            TypeKind::Interface(_) => DefinitionKind::Interface,
            TypeKind::Union(_) => DefinitionKind::Union,
            TypeKind::Enum(_) => DefinitionKind::Enum,
            TypeKind::InputObject(_) => DefinitionKind::InputObject,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            DefinitionKind::Scalar => "SCALAR",
            DefinitionKind::Object => "OBJECT",
            DefinitionKind::Interface => "INTERFACE",
            DefinitionKind::Union => "UNION",
            DefinitionKind::Enum => "ENUM",
            DefinitionKind::InputObject => "INPUT_OBJECT",
        }
    }
}

/// Missing descriptions compare equal to empty ones.
pub(crate) fn description_text(description: &Option<Positioned<String>>) -> &str {
    description
        .as_ref()
        .map(|description| description.node.as_str())
        .unwrap_or_default()
}

pub(crate) fn default_value(argument: &Positioned<InputValueDefinition>) -> Option<&ConstValue> {
    argument.node.default_value.as_ref().map(|value| &value.node)
}

/// Default values as they appear in change messages, absent ones as ''.
pub(crate) fn render_default(argument: &Positioned<InputValueDefinition>) -> String {
    default_value(argument)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy)]
enum RootOperation {
    Query,
    Mutation,
    Subscription,
}

impl RootOperation {
    const ALL: [RootOperation; 3] = [
        RootOperation::Query,
        RootOperation::Mutation,
        RootOperation::Subscription,
    ];

    fn binding<'a>(self, definition: &'a SchemaDefinition) -> Option<&'a Positioned<Name>> {
        match self {
            RootOperation::Query => definition.query.as_ref(),
            RootOperation::Mutation => definition.mutation.as_ref(),
            RootOperation::Subscription => definition.subscription.as_ref(),
        }
    }

    fn change_kind(self) -> ChangeKind {
        match self {
            RootOperation::Query => ChangeKind::SchemaQueryTypeChanged,
            RootOperation::Mutation => ChangeKind::SchemaMutationTypeChanged,
            RootOperation::Subscription => ChangeKind::SchemaSubscriptionTypeChanged,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            RootOperation::Query => "query",
            RootOperation::Mutation => "mutation",
            RootOperation::Subscription => "subscription",
        }
    }
}

fn push_schema_root_changes<'a>(
    pair: [Option<Sourced<'a, Positioned<SchemaDefinition>>>; 2],
    changes: &mut Vec<Change<'a>>,
) {
    let [old_definition, new_definition] = pair;

    if old_definition.is_none() && new_definition.is_none() {
        return;
    }

    for operation in RootOperation::ALL {
        let old_binding =
            old_definition.and_then(|def| operation.binding(&def.node.node).map(|name| def.with(name)));
        let new_binding =
            new_definition.and_then(|def| operation.binding(&def.node.node).map(|name| def.with(name)));

        match (old_binding, new_binding) {
            (None, None) => (),
            (None, Some(new_name)) => changes.push(Change {
                kind: operation.change_kind(),
                criticality: Criticality::NonBreaking,
                message: format!(
                    "Schema {} root type '{}' was added",
                    operation.as_str(),
                    new_name.node.node
                ),
                path: "schema".to_owned(),
                position: new_name.position(new_name.node.pos),
            }),
            (Some(old_name), None) => changes.push(Change {
                kind: operation.change_kind(),
                criticality: Criticality::Breaking,
                message: format!(
                    "Schema {} root type '{}' was removed",
                    operation.as_str(),
                    old_name.node.node
                ),
                path: "schema".to_owned(),
                position: old_name.position(old_name.node.pos),
            }),
            (Some(old_name), Some(new_name)) => {
                if old_name.node.node != new_name.node.node {
                    changes.push(Change {
                        kind: operation.change_kind(),
                        criticality: Criticality::Breaking,
                        message: format!(
                            "Schema {} root type changed from '{}' to '{}'",
                            operation.as_str(),
                            old_name.node.node,
                            new_name.node.node
                        ),
                        path: "schema".to_owned(),
                        position: new_name.position(new_name.node.pos),
                    });
                }
            }
        }
    }
}

fn push_type_set_changes<'a>(
    types: DiffMap<&'a str, Sourced<'a, Positioned<TypeDefinition>>>,
    extended: bool,
    changes: &mut Vec<Change<'a>>,
) {
    let noun = if extended { "Extended type" } else { "Type" };

    for (name, pair) in types {
        match pair {
            [None, None] => unreachable!(),
            [Some(old), None] => changes.push(Change {
                kind: ChangeKind::TypeRemoved,
                criticality: Criticality::Breaking,
                message: format!("{noun} '{name}' was removed"),
                path: name.to_owned(),
                position: old.position(old.node.pos),
            }),
            [None, Some(new)] => changes.push(Change {
                kind: ChangeKind::TypeAdded,
                criticality: Criticality::NonBreaking,
                message: format!("{noun} '{name}' was added"),
                path: name.to_owned(),
                position: new.position(new.node.pos),
            }),
            [Some(old), Some(new)] => push_persisted_type_changes(name, old, new, changes),
        }
    }
}
