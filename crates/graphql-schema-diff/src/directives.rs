//! Diffing of directive definitions and of directive applications attached
//! to types and fields. Applications of `@deprecated` are excluded here,
//! they surface through the dedicated deprecation change kinds instead.

use crate::{
    Change, ChangeKind, Criticality, SourcePosition,
    compat::safe_change_for_input,
    state::{DiffMap, Sourced, default_value, description_text, render_default},
};
use async_graphql_parser::{
    Positioned,
    types::{ConstDirective, DirectiveDefinition, DirectiveLocation},
};
use async_graphql_value::ConstValue;
use std::collections::HashSet;

pub(crate) const DEPRECATED_DIRECTIVE: &str = "deprecated";

pub(crate) fn find_deprecated(
    directives: &[Positioned<ConstDirective>],
) -> Option<&Positioned<ConstDirective>> {
    directives
        .iter()
        .find(|directive| directive.node.name.node.as_str() == DEPRECATED_DIRECTIVE)
}

pub(crate) fn deprecation_reason(directive: &Positioned<ConstDirective>) -> Option<&ConstValue> {
    directive
        .node
        .get_argument("reason")
        .map(|value| &value.node)
}

pub(crate) fn push_directive_definition_changes<'a>(
    definitions: DiffMap<&'a str, Sourced<'a, Positioned<DirectiveDefinition>>>,
    changes: &mut Vec<Change<'a>>,
) {
    for (name, pair) in definitions {
        match pair {
            [None, None] => unreachable!(),
            [Some(old), None] => changes.push(Change {
                kind: ChangeKind::DirectiveRemoved,
                criticality: Criticality::Breaking,
                message: format!("Directive '@{name}' was removed"),
                path: format!("@{name}"),
                position: old.position(old.node.pos),
            }),
            [None, Some(new)] => changes.push(Change {
                kind: ChangeKind::DirectiveAdded,
                criticality: Criticality::NonBreaking,
                message: format!("Directive '@{name}' was added"),
                path: format!("@{name}"),
                position: new.position(new.node.pos),
            }),
            [Some(old), Some(new)] => push_persisted_definition_changes(name, old, new, changes),
        }
    }
}

fn push_persisted_definition_changes<'a>(
    name: &'a str,
    old: Sourced<'a, Positioned<DirectiveDefinition>>,
    new: Sourced<'a, Positioned<DirectiveDefinition>>,
    changes: &mut Vec<Change<'a>>,
) {
    let old_definition = &old.node.node;
    let new_definition = &new.node.node;
    let definition_position = new.position(new.node.pos);

    if description_text(&old_definition.description) != description_text(&new_definition.description) {
        changes.push(Change {
            kind: ChangeKind::DirectiveDescriptionChanged,
            criticality: Criticality::NonBreaking,
            message: format!("Directive '@{name}' description changed"),
            path: format!("@{name}"),
            position: definition_position,
        });
    }

    for old_location in &old_definition.locations {
        if !new_definition
            .locations
            .iter()
            .any(|location| location.node == old_location.node)
        {
            changes.push(Change {
                kind: ChangeKind::DirectiveLocationRemoved,
                criticality: Criticality::Breaking,
                message: format!(
                    "Location '{}' was removed from directive '@{name}'",
                    location_str(&old_location.node)
                ),
                path: format!("@{name}"),
                position: definition_position,
            });
        }
    }

    for new_location in &new_definition.locations {
        if !old_definition
            .locations
            .iter()
            .any(|location| location.node == new_location.node)
        {
            changes.push(Change {
                kind: ChangeKind::DirectiveLocationAdded,
                criticality: Criticality::NonBreaking,
                message: format!(
                    "Location '{}' was added to directive '@{name}'",
                    location_str(&new_location.node)
                ),
                path: format!("@{name}"),
                position: definition_position,
            });
        }
    }

    if old_definition.is_repeatable && !new_definition.is_repeatable {
        changes.push(Change {
            kind: ChangeKind::DirectiveRepeatableRemoved,
            criticality: Criticality::Breaking,
            message: format!("Repeatable flag was removed from directive '@{name}'"),
            path: format!("@{name}"),
            position: definition_position,
        });
    }

    if !old_definition.is_repeatable && new_definition.is_repeatable {
        changes.push(Change {
            kind: ChangeKind::DirectiveRepeatableAdded,
            criticality: Criticality::NonBreaking,
            message: format!("Repeatable flag was added to directive '@{name}'"),
            path: format!("@{name}"),
            position: definition_position,
        });
    }

    for old_argument in &old_definition.arguments {
        let argument_name = old_argument.node.name.node.as_str();

        let Some(new_argument) = new_definition
            .arguments
            .iter()
            .find(|argument| argument.node.name.node == old_argument.node.name.node)
        else {
            changes.push(Change {
                kind: ChangeKind::DirectiveArgumentRemoved,
                criticality: Criticality::Breaking,
                message: format!("Argument '{argument_name}' was removed from directive '@{name}'"),
                path: format!("@{name}.{argument_name}"),
                position: definition_position,
            });
            continue;
        };

        let argument_position = new.position(new_argument.pos);

        if old_argument.node.ty.node != new_argument.node.ty.node {
            let criticality =
                if safe_change_for_input(&old_argument.node.ty.node, &new_argument.node.ty.node) {
                    Criticality::NonBreaking
                } else {
                    Criticality::Breaking
                };

            changes.push(Change {
                kind: ChangeKind::DirectiveArgumentTypeChanged,
                criticality,
                message: format!(
                    "Argument '{argument_name}' type changed from '{}' to '{}' in directive '@{name}'",
                    old_argument.node.ty.node, new_argument.node.ty.node
                ),
                path: format!("@{name}.{argument_name}"),
                position: argument_position,
            });
        }

        if default_value(old_argument) != default_value(new_argument) {
            changes.push(Change {
                kind: ChangeKind::DirectiveArgumentDefaultValueChanged,
                criticality: Criticality::Dangerous,
                message: format!(
                    "Argument '{argument_name}' default value changed from '{}' to '{}' in directive '@{name}'",
                    render_default(old_argument),
                    render_default(new_argument)
                ),
                path: format!("@{name}.{argument_name}"),
                position: argument_position,
            });
        }

        if description_text(&old_argument.node.description)
            != description_text(&new_argument.node.description)
        {
            changes.push(Change {
                kind: ChangeKind::DirectiveArgumentDescriptionChanged,
                criticality: Criticality::NonBreaking,
                message: format!(
                    "Argument '{argument_name}' description changed in directive '@{name}'"
                ),
                path: format!("@{name}.{argument_name}"),
                position: argument_position,
            });
        }
    }

    for new_argument in &new_definition.arguments {
        if old_definition
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
                Criticality::NonBreaking,
                format!("Argument '{argument_name}: {argument_type}' was added to directive '@{name}'"),
            )
        } else {
            (
                Criticality::Breaking,
                format!(
                    "Non-nullable argument '{argument_name}: {argument_type}' was added to directive '@{name}'"
                ),
            )
        };

        changes.push(Change {
            kind: ChangeKind::DirectiveArgumentAdded,
            criticality,
            message,
            path: format!("@{name}.{argument_name}"),
            position: new.position(new_argument.pos),
        });
    }
}

/// Compare the directive applications attached to a type or field.
/// `location` is the dotted path of the owner, `anchor` its position in the
/// new schema.
pub(crate) fn push_directive_application_changes<'a>(
    old_directives: &'a [Positioned<ConstDirective>],
    new_directives: &'a [Positioned<ConstDirective>],
    location: &str,
    anchor: SourcePosition<'a>,
    changes: &mut Vec<Change<'a>>,
) {
    let mut seen_old = HashSet::new();

    for old_directive in old_directives {
        let name = old_directive.node.name.node.as_str();

        if name == DEPRECATED_DIRECTIVE || !seen_old.insert(name) {
            continue;
        }

        let old_applications: Vec<_> = old_directives
            .iter()
            .filter(|directive| directive.node.name.node.as_str() == name)
            .collect();
        let new_applications: Vec<_> = new_directives
            .iter()
            .filter(|directive| directive.node.name.node.as_str() == name)
            .collect();

        if new_applications.is_empty() {
            changes.push(Change {
                kind: ChangeKind::DirectiveRemoved,
                criticality: Criticality::Dangerous,
                message: format!("Directive '@{name}' was removed from '{location}'"),
                path: location.to_owned(),
                position: anchor,
            });
        } else if old_applications.len() == 1 && new_applications.len() == 1 {
            push_application_argument_changes(
                old_applications[0],
                new_applications[0],
                location,
                anchor,
                changes,
            );
        } else {
            // A repeatable directive. An old application without a new
            // application carrying the same argument values means the set
            // changed.
            let unmatched = old_applications.iter().any(|old_application| {
                !new_applications
                    .iter()
                    .any(|new_application| same_arguments(&old_application.node, &new_application.node))
            });

            if unmatched {
                changes.push(Change {
                    kind: ChangeKind::DirectiveChanged,
                    criticality: Criticality::Dangerous,
                    message: format!("Directive '@{name}' was changed on '{location}'"),
                    path: location.to_owned(),
                    position: anchor,
                });
            }
        }
    }

    let mut seen_new = HashSet::new();

    for new_directive in new_directives {
        let name = new_directive.node.name.node.as_str();

        if name == DEPRECATED_DIRECTIVE || !seen_new.insert(name) {
            continue;
        }

        if !old_directives
            .iter()
            .any(|directive| directive.node.name.node.as_str() == name)
        {
            changes.push(Change {
                kind: ChangeKind::DirectiveAdded,
                criticality: Criticality::NonBreaking,
                message: format!("Directive '@{name}' was added to '{location}'"),
                path: location.to_owned(),
                position: SourcePosition::new(anchor.file, new_directive.pos),
            });
        }
    }
}

fn push_application_argument_changes<'a>(
    old_application: &'a Positioned<ConstDirective>,
    new_application: &'a Positioned<ConstDirective>,
    location: &str,
    anchor: SourcePosition<'a>,
    changes: &mut Vec<Change<'a>>,
) {
    let directive_name = old_application.node.name.node.as_str();

    for (argument_name, old_value) in &old_application.node.arguments {
        let argument_name = argument_name.node.as_str();

        match new_application.node.get_argument(argument_name) {
            None => changes.push(Change {
                kind: ChangeKind::DirectiveArgumentRemoved,
                criticality: Criticality::Dangerous,
                message: format!(
                    "Directive '@{directive_name}' argument '{argument_name}' was removed from '{location}'"
                ),
                path: format!("@{directive_name}.{argument_name}"),
                position: anchor,
            }),
            Some(new_value) if new_value.node != old_value.node => changes.push(Change {
                kind: ChangeKind::DirectiveArgumentValueChanged,
                criticality: Criticality::Dangerous,
                message: format!(
                    "Directive '@{directive_name}' argument '{argument_name}' value changed from '{}' to '{}' in '{location}'",
                    old_value.node, new_value.node
                ),
                path: format!("@{directive_name}.{argument_name}"),
                position: SourcePosition::new(anchor.file, new_value.pos),
            }),
            Some(_) => (),
        }
    }

    for (argument_name, _) in &new_application.node.arguments {
        if old_application
            .node
            .get_argument(argument_name.node.as_str())
            .is_none()
        {
            changes.push(Change {
                kind: ChangeKind::DirectiveArgumentAdded,
                criticality: Criticality::NonBreaking,
                message: format!(
                    "Directive '@{directive_name}' argument '{}' was added to '{location}'",
                    argument_name.node
                ),
                path: format!("{location}.@{directive_name}"),
                position: SourcePosition::new(anchor.file, argument_name.pos),
            });
        }
    }
}

fn same_arguments(old: &ConstDirective, new: &ConstDirective) -> bool {
    old.arguments.len() == new.arguments.len()
        && old.arguments.iter().all(|(name, value)| {
            new.get_argument(name.node.as_str())
                .is_some_and(|new_value| new_value.node == value.node)
        })
}

fn location_str(location: &DirectiveLocation) -> &'static str {
    match location {
        DirectiveLocation::Query => "QUERY",
        DirectiveLocation::Mutation => "MUTATION",
        DirectiveLocation::Subscription => "SUBSCRIPTION",
        DirectiveLocation::Field => "FIELD",
        DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
        DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
        DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
        DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
        DirectiveLocation::Schema => "SCHEMA",
        DirectiveLocation::Scalar => "SCALAR",
        DirectiveLocation::Object => "OBJECT",
        DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
        DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
        DirectiveLocation::Interface => "INTERFACE",
        DirectiveLocation::Union => "UNION",
        DirectiveLocation::Enum => "ENUM",
        DirectiveLocation::EnumValue => "ENUM_VALUE",
        DirectiveLocation::InputObject => "INPUT_OBJECT",
        DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
    }
}
