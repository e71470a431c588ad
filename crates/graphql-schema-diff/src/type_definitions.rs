//! Structural comparison of a type definition that exists on both sides of
//! the diff, dispatched on its kind.

use crate::{
    Change, ChangeKind, Criticality, SourcePosition,
    compat::{safe_change_for_input, safe_change_for_output},
    directives::{
        deprecation_reason, find_deprecated, push_directive_application_changes,
    },
    state::{DefinitionKind, Sourced, default_value, description_text, render_default},
};
use async_graphql_parser::{
    Positioned,
    types::{
        EnumType, FieldDefinition, InputObjectType, InputValueDefinition, TypeDefinition, TypeKind,
        UnionType,
    },
};
use async_graphql_value::Name;

pub(crate) fn push_persisted_type_changes<'a>(
    name: &'a str,
    old: Sourced<'a, Positioned<TypeDefinition>>,
    new: Sourced<'a, Positioned<TypeDefinition>>,
    changes: &mut Vec<Change<'a>>,
) {
    let old_kind = DefinitionKind::new(&old.node.node.kind);
    let new_kind = DefinitionKind::new(&new.node.node.kind);
    let new_type_position = new.position(new.node.pos);

    if old_kind != new_kind {
        // Turning, say, an object type into a scalar breaks every query with
        // a selection set on it. The structural comparison below is
        // meaningless across kinds, so this is the only change reported.
        changes.push(Change {
            kind: ChangeKind::TypeKindChanged,
            criticality: Criticality::Breaking,
            message: format!(
                "Type '{name}' kind changed from '{}' to '{}'",
                old_kind.as_str(),
                new_kind.as_str()
            ),
            path: name.to_owned(),
            position: new_type_position,
        });
    }

    if description_text(&old.node.node.description) != description_text(&new.node.node.description) {
        changes.push(Change {
            kind: ChangeKind::TypeDescriptionChanged,
            criticality: Criticality::NonBreaking,
            message: format!("Type '{name}' description changed"),
            path: name.to_owned(),
            position: new_type_position,
        });
    }

    match (&old.node.node.kind, &new.node.node.kind) {
        (TypeKind::Enum(old_enum), TypeKind::Enum(new_enum)) => {
            push_enum_changes(name, old.with(old_enum), new.with(new_enum), changes);
        }
        (TypeKind::InputObject(old_input), TypeKind::InputObject(new_input)) => {
            push_input_object_changes(
                name,
                old.with(old_input),
                new.with(new_input),
                new_type_position,
                changes,
            );
        }
        (TypeKind::Interface(old_interface), TypeKind::Interface(new_interface)) => {
            push_directive_application_changes(
                &old.node.node.directives,
                &new.node.node.directives,
                name,
                new_type_position,
                changes,
            );
            push_field_changes(
                name,
                DefinitionKind::Interface,
                old.with(old_interface.fields.as_slice()),
                new.with(new_interface.fields.as_slice()),
                new_type_position,
                changes,
            );
        }
        (TypeKind::Object(old_object), TypeKind::Object(new_object)) => {
            push_implemented_interface_changes(
                name,
                &old_object.implements,
                &new_object.implements,
                new_type_position,
                changes,
            );
            push_directive_application_changes(
                &old.node.node.directives,
                &new.node.node.directives,
                name,
                new_type_position,
                changes,
            );
            push_field_changes(
                name,
                DefinitionKind::Object,
                old.with(old_object.fields.as_slice()),
                new.with(new_object.fields.as_slice()),
                new_type_position,
                changes,
            );
        }
        (TypeKind::Union(old_union), TypeKind::Union(new_union)) => {
            push_union_member_changes(name, old_union, new_union, new_type_position, changes);
        }
        _ => (),
    }
}

fn push_enum_changes<'a>(
    enum_name: &'a str,
    old: Sourced<'a, EnumType>,
    new: Sourced<'a, EnumType>,
    changes: &mut Vec<Change<'a>>,
) {
    for old_value in &old.node.values {
        let value_name = old_value.node.value.node.as_str();
        let old_deprecation = find_deprecated(&old_value.node.directives);

        let Some(new_value) = new
            .node
            .values
            .iter()
            .find(|value| value.node.value.node == old_value.node.value.node)
        else {
            let message = if old_deprecation.is_some() {
                format!("Enum value '{value_name}' (deprecated) was removed from enum '{enum_name}'")
            } else {
                format!("Enum value '{value_name}' was removed from enum '{enum_name}'")
            };

            // Queries still sending or selecting the value now error.
            changes.push(Change {
                kind: ChangeKind::EnumValueRemoved,
                criticality: Criticality::Breaking,
                message,
                path: format!("{enum_name}.{value_name}"),
                position: old.position(old_value.pos),
            });
            continue;
        };

        let value_position = new.position(new_value.pos);

        if description_text(&old_value.node.description) != description_text(&new_value.node.description)
        {
            changes.push(Change {
                kind: ChangeKind::EnumValueDescriptionChanged,
                criticality: Criticality::NonBreaking,
                message: format!(
                    "Enum value '{value_name}' description changed in enum '{enum_name}'"
                ),
                path: format!("{enum_name}.{value_name}"),
                position: value_position,
            });
        }

        let new_deprecation = find_deprecated(&new_value.node.directives);

        match (old_deprecation, new_deprecation) {
            (None, Some(_)) => changes.push(Change {
                kind: ChangeKind::EnumValueDeprecationAdded,
                criticality: Criticality::Dangerous,
                message: format!("Enum value '{value_name}' was deprecated in enum '{enum_name}'"),
                path: format!("{enum_name}.{value_name}"),
                position: value_position,
            }),
            (Some(old_deprecation), Some(new_deprecation))
                if deprecation_reason(old_deprecation) != deprecation_reason(new_deprecation) =>
            {
                changes.push(Change {
                    kind: ChangeKind::EnumValueDeprecationReasonChanged,
                    criticality: Criticality::NonBreaking,
                    message: format!(
                        "Enum value '{value_name}' deprecation reason changed in enum '{enum_name}'"
                    ),
                    path: format!("{enum_name}.{value_name}"),
                    position: value_position,
                });
            }
            _ => (),
        }
    }

    for new_value in &new.node.values {
        if old
            .node
            .values
            .iter()
            .any(|value| value.node.value.node == new_value.node.value.node)
        {
            continue;
        }

        let value_name = new_value.node.value.node.as_str();

        // Clients matching exhaustively on the enum are not prepared for it.
        changes.push(Change {
            kind: ChangeKind::EnumValueAdded,
            criticality: Criticality::Dangerous,
            message: format!("Enum value '{value_name}' was added to enum '{enum_name}'"),
            path: format!("{enum_name}.{value_name}"),
            position: new.position(new_value.pos),
        });
    }
}

fn push_union_member_changes<'a>(
    union_name: &'a str,
    old_union: &'a UnionType,
    new_union: &'a UnionType,
    new_type_position: SourcePosition<'a>,
    changes: &mut Vec<Change<'a>>,
) {
    for old_member in &old_union.members {
        if !new_union
            .members
            .iter()
            .any(|member| member.node == old_member.node)
        {
            changes.push(Change {
                kind: ChangeKind::UnionMemberRemoved,
                criticality: Criticality::Breaking,
                message: format!(
                    "Member '{}' was removed from Union type '{union_name}'",
                    old_member.node
                ),
                path: union_name.to_owned(),
                position: new_type_position,
            });
        }
    }

    for new_member in &new_union.members {
        if !old_union
            .members
            .iter()
            .any(|member| member.node == new_member.node)
        {
            changes.push(Change {
                kind: ChangeKind::UnionMemberAdded,
                criticality: Criticality::Dangerous,
                message: format!(
                    "Member '{}' was added to Union type '{union_name}'",
                    new_member.node
                ),
                path: union_name.to_owned(),
                position: new_type_position,
            });
        }
    }
}

fn push_implemented_interface_changes<'a>(
    type_name: &'a str,
    old_interfaces: &'a [Positioned<Name>],
    new_interfaces: &'a [Positioned<Name>],
    new_type_position: SourcePosition<'a>,
    changes: &mut Vec<Change<'a>>,
) {
    for old_interface in old_interfaces {
        if !new_interfaces
            .iter()
            .any(|interface| interface.node == old_interface.node)
        {
            // Fragment spreads on the interface no longer apply to this type.
            changes.push(Change {
                kind: ChangeKind::ObjectTypeInterfaceRemoved,
                criticality: Criticality::Breaking,
                message: format!(
                    "'{type_name}' object type no longer implements '{}' interface",
                    old_interface.node
                ),
                path: type_name.to_owned(),
                position: new_type_position,
            });
        }
    }

    for new_interface in new_interfaces {
        if !old_interfaces
            .iter()
            .any(|interface| interface.node == new_interface.node)
        {
            changes.push(Change {
                kind: ChangeKind::ObjectTypeInterfaceAdded,
                criticality: Criticality::Dangerous,
                message: format!(
                    "'{type_name}' object type implements '{}' interface",
                    new_interface.node
                ),
                path: type_name.to_owned(),
                position: new_type_position,
            });
        }
    }
}

fn push_field_changes<'a>(
    type_name: &'a str,
    kind: DefinitionKind,
    old_fields: Sourced<'a, [Positioned<FieldDefinition>]>,
    new_fields: Sourced<'a, [Positioned<FieldDefinition>]>,
    new_type_position: SourcePosition<'a>,
    changes: &mut Vec<Change<'a>>,
) {
    let kind = kind.as_str();

    for old_field in old_fields.node {
        let field_name = old_field.node.name.node.as_str();
        let old_deprecation = find_deprecated(&old_field.node.directives);

        let Some(new_field) = new_fields
            .node
            .iter()
            .find(|field| field.node.name.node == old_field.node.name.node)
        else {
            let message = if old_deprecation.is_some() {
                format!("Field '{type_name}.{field_name}' (deprecated) was removed from {kind}")
            } else {
                format!("Field '{type_name}.{field_name}' was removed from {kind}")
            };

            changes.push(Change {
                kind: ChangeKind::FieldRemoved,
                criticality: Criticality::Breaking,
                message,
                path: format!("{type_name}.{field_name}"),
                position: new_type_position,
            });
            continue;
        };

        let field_position = new_fields.position(new_field.pos);

        if old_field.node.ty.node != new_field.node.ty.node {
            let criticality = if safe_change_for_output(&old_field.node.ty.node, &new_field.node.ty.node)
            {
                Criticality::NonBreaking
            } else {
                Criticality::Breaking
            };

            changes.push(Change {
                kind: ChangeKind::FieldTypeChanged,
                criticality,
                message: format!(
                    "Field '{type_name}.{field_name}' type changed from '{}' to '{}' in {kind}",
                    old_field.node.ty.node, new_field.node.ty.node
                ),
                path: format!("{type_name}.{field_name}"),
                position: field_position,
            });
        }

        if description_text(&old_field.node.description) != description_text(&new_field.node.description)
        {
            changes.push(Change {
                kind: ChangeKind::FieldDescriptionChanged,
                criticality: Criticality::NonBreaking,
                message: format!("Field '{type_name}.{field_name}' description changed in {kind}"),
                path: format!("{type_name}.{field_name}"),
                position: field_position,
            });
        }

        let new_deprecation = find_deprecated(&new_field.node.directives);

        match (old_deprecation, new_deprecation) {
            (None, Some(_)) => changes.push(Change {
                kind: ChangeKind::FieldDeprecationAdded,
                criticality: Criticality::Dangerous,
                message: format!("Field '{type_name}.{field_name}' was deprecated in {kind}"),
                path: format!("{type_name}.{field_name}"),
                position: field_position,
            }),
            (Some(_), None) => changes.push(Change {
                kind: ChangeKind::FieldDeprecationRemoved,
                criticality: Criticality::Dangerous,
                message: format!("Field '{type_name}.{field_name}' deprecation removed in {kind}"),
                path: format!("{type_name}.{field_name}"),
                position: field_position,
            }),
            (Some(old_deprecation), Some(new_deprecation))
                if deprecation_reason(old_deprecation) != deprecation_reason(new_deprecation) =>
            {
                changes.push(Change {
                    kind: ChangeKind::FieldDeprecationReasonChanged,
                    criticality: Criticality::NonBreaking,
                    message: format!(
                        "Field '{type_name}.{field_name}' deprecation reason changed in {kind}"
                    ),
                    path: format!("{type_name}.{field_name}"),
                    position: field_position,
                });
            }
            _ => (),
        }

        push_argument_changes(
            type_name,
            field_name,
            old_fields.with(&old_field.node),
            new_fields.with(&new_field.node),
            changes,
        );

        push_directive_application_changes(
            &old_field.node.directives,
            &new_field.node.directives,
            &format!("{type_name}.{field_name}"),
            field_position,
            changes,
        );
    }

    for new_field in new_fields.node {
        if old_fields
            .node
            .iter()
            .any(|field| field.node.name.node == new_field.node.name.node)
        {
            continue;
        }

        let field_name = new_field.node.name.node.as_str();

        changes.push(Change {
            kind: ChangeKind::FieldAdded,
            criticality: Criticality::NonBreaking,
            message: format!("Field '{type_name}.{field_name}' was added to {kind}"),
            path: format!("{type_name}.{field_name}"),
            position: new_fields.position(new_field.pos),
        });
    }
}

fn push_argument_changes<'a>(
    type_name: &'a str,
    field_name: &'a str,
    old_field: Sourced<'a, FieldDefinition>,
    new_field: Sourced<'a, FieldDefinition>,
    changes: &mut Vec<Change<'a>>,
) {
    for old_argument in &old_field.node.arguments {
        let argument_name = old_argument.node.name.node.as_str();

        let Some(new_argument) = new_field
            .node
            .arguments
            .iter()
            .find(|argument| argument.node.name.node == old_argument.node.name.node)
        else {
            // Queries passing the argument now error.
            changes.push(Change {
                kind: ChangeKind::FieldArgumentRemoved,
                criticality: Criticality::Breaking,
                message: format!(
                    "Argument '{argument_name}: {}' was removed from field '{type_name}.{field_name}'",
                    old_argument.node.ty.node
                ),
                path: format!("{type_name}.{field_name}.{argument_name}"),
                position: new_field.position(new_field.node.name.pos),
            });
            continue;
        };

        let argument_position = new_field.position(new_argument.pos);

        if old_argument.node.ty.node != new_argument.node.ty.node {
            let criticality =
                if safe_change_for_input(&old_argument.node.ty.node, &new_argument.node.ty.node) {
                    Criticality::NonBreaking
                } else {
                    Criticality::Breaking
                };

            changes.push(Change {
                kind: ChangeKind::FieldArgumentTypeChanged,
                criticality,
                message: format!(
                    "Argument '{argument_name}' type changed from '{}' to '{}' in '{type_name}.{field_name}'",
                    old_argument.node.ty.node, new_argument.node.ty.node
                ),
                path: format!("{type_name}.{field_name}.{argument_name}"),
                position: argument_position,
            });
        }

        if default_value(old_argument) != default_value(new_argument) {
            // The field behaves differently for callers that never passed
            // the argument.
            changes.push(Change {
                kind: ChangeKind::FieldArgumentDefaultChanged,
                criticality: Criticality::Dangerous,
                message: format!(
                    "Argument '{argument_name}' default value changed from '{}' to '{}' in '{type_name}.{field_name}'",
                    render_default(old_argument),
                    render_default(new_argument)
                ),
                path: format!("{type_name}.{field_name}.{argument_name}"),
                position: argument_position,
            });
        }

        if description_text(&old_argument.node.description)
            != description_text(&new_argument.node.description)
        {
            changes.push(Change {
                kind: ChangeKind::FieldArgumentDescriptionChanged,
                criticality: Criticality::NonBreaking,
                message: format!(
                    "Argument '{argument_name}' description changed in '{type_name}.{field_name}'"
                ),
                path: format!("{type_name}.{field_name}.{argument_name}"),
                position: argument_position,
            });
        }
    }

    for new_argument in &new_field.node.arguments {
        if old_field
            .node
            .arguments
            .iter()
            .any(|argument| argument.node.name.node == new_argument.node.name.node)
        {
            continue;
        }

        let argument_name = new_argument.node.name.node.as_str();
        let argument_type = &new_argument.node.ty.node;

        let (criticality, message) = if argument_type.nullable {
            (
                Criticality::Dangerous,
                format!(
                    "Argument '{argument_name}: {argument_type}' was added to field '{type_name}.{field_name}'"
                ),
            )
        } else {
            (
                Criticality::Breaking,
                format!(
                    "Required argument '{argument_name}: {argument_type}' was added to field '{type_name}.{field_name}'"
                ),
            )
        };

        changes.push(Change {
            kind: ChangeKind::FieldArgumentAdded,
            criticality,
            message,
            path: format!("{type_name}.{field_name}.{argument_name}"),
            position: new_field.position(new_argument.pos),
        });
    }
}

fn push_input_object_changes<'a>(
    type_name: &'a str,
    old: Sourced<'a, InputObjectType>,
    new: Sourced<'a, InputObjectType>,
    new_type_position: SourcePosition<'a>,
    changes: &mut Vec<Change<'a>>,
) {
    for old_field in &old.node.fields {
        let field_name = old_field.node.name.node.as_str();

        let Some(new_field) = new
            .node
            .fields
            .iter()
            .find(|field| field.node.name.node == old_field.node.name.node)
        else {
            let message = if find_deprecated(&old_field.node.directives).is_some() {
                format!(
                    "Input field '{type_name}.{field_name}' (deprecated) was removed from input object type"
                )
            } else {
                format!("Input field '{type_name}.{field_name}' was removed from input object type")
            };

            changes.push(Change {
                kind: ChangeKind::InputFieldRemoved,
                criticality: Criticality::Breaking,
                message,
                path: format!("{type_name}.{field_name}"),
                position: new_type_position,
            });
            continue;
        };

        push_persisted_input_field_changes(
            type_name,
            field_name,
            old.with(old_field),
            new.with(new_field),
            changes,
        );
    }

    for new_field in &new.node.fields {
        if old
            .node
            .fields
            .iter()
            .any(|field| field.node.name.node == new_field.node.name.node)
        {
            continue;
        }

        let field_name = new_field.node.name.node.as_str();

        let (criticality, message) = if new_field.node.ty.node.nullable {
            (
                Criticality::Dangerous,
                format!("Field '{field_name}' was added to input object type '{type_name}'"),
            )
        } else {
            // Existing uses of the input object do not provide the value.
            (
                Criticality::Breaking,
                format!("Required field '{field_name}' was added to input object type '{type_name}'"),
            )
        };

        changes.push(Change {
            kind: ChangeKind::InputFieldAdded,
            criticality,
            message,
            path: format!("{type_name}.{field_name}"),
            position: new.position(new_field.pos),
        });
    }
}

fn push_persisted_input_field_changes<'a>(
    type_name: &'a str,
    field_name: &'a str,
    old_field: Sourced<'a, Positioned<InputValueDefinition>>,
    new_field: Sourced<'a, Positioned<InputValueDefinition>>,
    changes: &mut Vec<Change<'a>>,
) {
    let field_position = new_field.position(new_field.node.pos);

    if old_field.node.node.ty.node != new_field.node.node.ty.node {
        let criticality =
            if safe_change_for_input(&old_field.node.node.ty.node, &new_field.node.node.ty.node) {
                Criticality::NonBreaking
            } else {
                Criticality::Breaking
            };

        changes.push(Change {
            kind: ChangeKind::InputFieldTypeChanged,
            criticality,
            message: format!(
                "Input field '{type_name}.{field_name}' type changed from '{}' to '{}' in input object type",
                old_field.node.node.ty.node, new_field.node.node.ty.node
            ),
            path: format!("{type_name}.{field_name}"),
            position: field_position,
        });
    }

    if default_value(old_field.node) != default_value(new_field.node) {
        changes.push(Change {
            kind: ChangeKind::InputFieldDefaultValueChanged,
            criticality: Criticality::Dangerous,
            message: format!(
                "Input field '{type_name}.{field_name}' default value changed from '{}' to '{}' in input object type",
                render_default(old_field.node),
                render_default(new_field.node)
            ),
            path: format!("{type_name}.{field_name}"),
            position: field_position,
        });
    }

    if description_text(&old_field.node.node.description)
        != description_text(&new_field.node.node.description)
    {
        changes.push(Change {
            kind: ChangeKind::InputFieldDescriptionChanged,
            criticality: Criticality::NonBreaking,
            message: format!(
                "Input field '{type_name}.{field_name}' description changed in input object type"
            ),
            path: format!("{type_name}.{field_name}"),
            position: field_position,
        });
    }

    push_directive_application_changes(
        &old_field.node.node.directives,
        &new_field.node.node.directives,
        &format!("{type_name}.{field_name}"),
        field_position,
        changes,
    );
}
