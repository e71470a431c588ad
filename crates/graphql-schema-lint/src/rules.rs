//! The rule registry and the rule functions themselves. Every rule is a
//! pure function from a parsed schema to a list of findings; selection and
//! suppression happen in the engine.

use crate::Finding;
use async_graphql_parser::{
    Pos, Positioned,
    types::{
        BaseType, FieldDefinition, InputValueDefinition, ServiceDocument, Type, TypeDefinition,
        TypeKind, TypeSystemDefinition,
    },
};
use async_graphql_value::Name;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) const TYPE_DESC: &str = "type-desc";
pub(crate) const ARGS_DESC: &str = "args-desc";
pub(crate) const FIELD_DESC: &str = "field-desc";
pub(crate) const ENUM_CAPS: &str = "enum-caps";
pub(crate) const ENUM_DESC: &str = "enum-desc";
pub(crate) const FIELD_CAMEL: &str = "field-camel";
pub(crate) const TYPE_CAPS: &str = "type-caps";
pub(crate) const RELAY_CONN_TYPE: &str = "relay-conn-type";
pub(crate) const RELAY_CONN_ARGS: &str = "relay-conn-args";

/// A named lint rule.
pub struct Rule {
    pub name: &'static str,
    pub description: &'static str,
    run: fn(&ServiceDocument) -> Vec<Finding>,
}

impl Rule {
    pub fn run(&self, document: &ServiceDocument) -> Vec<Finding> {
        (self.run)(document)
    }
}

/// Every registered rule, in registry order. This is the default selection.
pub const ALL_RULES: &[Rule] = &[
    Rule {
        name: TYPE_DESC,
        description: "checks whether all the types defined have description",
        run: types_have_description,
    },
    Rule {
        name: ARGS_DESC,
        description: "checks whether arguments have description",
        run: arguments_have_description,
    },
    Rule {
        name: FIELD_DESC,
        description: "checks whether fields have description",
        run: fields_have_description,
    },
    Rule {
        name: ENUM_CAPS,
        description: "checks whether Enum values are all UPPER_CASE",
        run: enum_values_are_all_caps,
    },
    Rule {
        name: ENUM_DESC,
        description: "checks whether Enum values have description",
        run: enum_values_have_description,
    },
    Rule {
        name: FIELD_CAMEL,
        description: "checks whether fields defined are all camelCase",
        run: fields_are_camel_cased,
    },
    Rule {
        name: TYPE_CAPS,
        description: "checks whether types defined are Capitalized",
        run: types_are_capitalized,
    },
    Rule {
        name: RELAY_CONN_TYPE,
        description: "checks if Connection Types follow the Relay Cursor Connections Specification",
        run: relay_connection_types_spec,
    },
    Rule {
        name: RELAY_CONN_ARGS,
        description: "checks if Connection Args follow the Relay Cursor Connections Specification",
        run: relay_connection_arguments_spec,
    },
];

/// The registry rendered for help texts, one `name => description` per line.
pub fn available_rules_with_description() -> String {
    ALL_RULES
        .iter()
        .map(|rule| format!("\t{} => {}", rule.name, rule.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn finding(rule: &'static str, pos: Pos, message: String) -> Finding {
    Finding {
        rule,
        line: pos.line,
        column: pos.column,
        message,
    }
}

fn type_definitions(
    document: &ServiceDocument,
) -> impl Iterator<Item = &Positioned<TypeDefinition>> {
    document.definitions.iter().filter_map(|definition| match definition {
        TypeSystemDefinition::Type(type_definition) => Some(type_definition),
        _ => None,
    })
}

fn has_description(description: &Option<Positioned<String>>) -> bool {
    description
        .as_ref()
        .is_some_and(|description| !description.node.is_empty())
}

/// Output fields of a definition: object and interface types.
fn output_fields(kind: &TypeKind) -> &[Positioned<FieldDefinition>] {
    match kind {
        TypeKind::Object(object) => &object.fields,
        TypeKind::Interface(interface) => &interface.fields,
        _ => &[],
    }
}

fn input_fields(kind: &TypeKind) -> &[Positioned<InputValueDefinition>] {
    match kind {
        TypeKind::InputObject(input_object) => &input_object.fields,
        _ => &[],
    }
}

fn innermost_name(ty: &Type) -> &Name {
    match &ty.base {
        BaseType::Named(name) => name,
        BaseType::List(inner) => innermost_name(inner),
    }
}

fn is_list(ty: &Type) -> bool {
    matches!(ty.base, BaseType::List(_))
}

fn types_have_description(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    // Extensions are exempt, a description there would collide with the
    // description of the type being extended.
    for definition in type_definitions(document).filter(|definition| !definition.node.extend) {
        if !has_description(&definition.node.description) {
            findings.push(finding(
                TYPE_DESC,
                definition.pos,
                format!("type {} does not have description", definition.node.name.node),
            ));
        }
    }

    findings
}

fn arguments_have_description(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document) {
        let type_name = definition.node.name.node.as_str();

        for field in output_fields(&definition.node.kind) {
            for argument in &field.node.arguments {
                if !has_description(&argument.node.description) {
                    findings.push(finding(
                        ARGS_DESC,
                        argument.pos,
                        format!(
                            "argument {type_name}.{}.{} does not have description",
                            field.node.name.node, argument.node.name.node
                        ),
                    ));
                }
            }
        }
    }

    findings
}

fn fields_have_description(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document) {
        let type_name = definition.node.name.node.as_str();

        for field in output_fields(&definition.node.kind) {
            if !has_description(&field.node.description) {
                findings.push(finding(
                    FIELD_DESC,
                    field.node.ty.pos,
                    format!("field {type_name}.{} does not have description", field.node.name.node),
                ));
            }
        }

        for field in input_fields(&definition.node.kind) {
            if !has_description(&field.node.description) {
                findings.push(finding(
                    FIELD_DESC,
                    field.node.ty.pos,
                    format!("field {type_name}.{} does not have description", field.node.name.node),
                ));
            }
        }
    }

    findings
}

fn enum_values_are_all_caps(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document) {
        let TypeKind::Enum(enum_type) = &definition.node.kind else {
            continue;
        };

        let noun = if definition.node.extend {
            "extended enum value"
        } else {
            "enum value"
        };

        for value in &enum_type.values {
            let value_name = value.node.value.node.as_str();

            if value_name.to_uppercase() != value_name {
                findings.push(finding(
                    ENUM_CAPS,
                    value.pos,
                    format!(
                        "{noun} {}.{value_name} is not uppercase",
                        definition.node.name.node
                    ),
                ));
            }
        }
    }

    findings
}

fn enum_values_have_description(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document) {
        let TypeKind::Enum(enum_type) = &definition.node.kind else {
            continue;
        };

        let noun = if definition.node.extend {
            "extended enum value"
        } else {
            "enum value"
        };

        for value in &enum_type.values {
            if !has_description(&value.node.description) {
                findings.push(finding(
                    ENUM_DESC,
                    value.pos,
                    format!(
                        "{noun} {}.{} does not have description",
                        definition.node.name.node, value.node.value.node
                    ),
                ));
            }
        }
    }

    findings
}

static CAMEL_CASE: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[a-z][a-zA-Z0-9]*$").unwrap());

fn fields_are_camel_cased(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document) {
        let type_name = definition.node.name.node.as_str();

        for field in output_fields(&definition.node.kind) {
            if !CAMEL_CASE.is_match(field.node.name.node.as_str()) {
                findings.push(finding(
                    FIELD_CAMEL,
                    field.node.ty.pos,
                    format!("field {type_name}.{} is not camelcased", field.node.name.node),
                ));
            }
        }

        for field in input_fields(&definition.node.kind) {
            if !CAMEL_CASE.is_match(field.node.name.node.as_str()) {
                findings.push(finding(
                    FIELD_CAMEL,
                    field.node.ty.pos,
                    format!("field {type_name}.{} is not camelcased", field.node.name.node),
                ));
            }
        }
    }

    findings
}

fn types_are_capitalized(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document) {
        let type_name = definition.node.name.node.as_str();

        let noun = if definition.node.extend {
            "extended type"
        } else {
            "type"
        };

        if type_name
            .as_bytes()
            .first()
            .is_some_and(|first| first.is_ascii_lowercase())
        {
            findings.push(finding(
                TYPE_CAPS,
                definition.pos,
                format!("{noun} {type_name} is not capitalized"),
            ));
        }
    }

    findings
}

const CONNECTION_SUFFIX: &str = "Connection";

fn relay_connection_types_spec(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document).filter(|definition| !definition.node.extend) {
        let type_name = definition.node.name.node.as_str();

        if !type_name.ends_with(CONNECTION_SUFFIX) {
            continue;
        }

        let TypeKind::Object(object) = &definition.node.kind else {
            findings.push(finding(
                RELAY_CONN_TYPE,
                definition.pos,
                format!("type {type_name} cannot end with Connection as that is reserved for entities"),
            ));
            continue;
        };

        let mut found_edges = false;
        let mut found_page_info = false;

        for field in &object.fields {
            match field.node.name.node.as_str() {
                "edges" => {
                    found_edges = true;

                    if !is_list(&field.node.ty.node) {
                        findings.push(finding(
                            RELAY_CONN_TYPE,
                            field.node.ty.pos,
                            format!(
                                "edges field from Connection type {type_name} needs to return a list type"
                            ),
                        ));
                    }
                }
                "pageInfo" => {
                    found_page_info = true;

                    let ty = &field.node.ty.node;
                    let is_non_null_page_info = !ty.nullable
                        && matches!(&ty.base, BaseType::Named(name) if name.as_str() == "PageInfo");

                    if !is_non_null_page_info {
                        findings.push(finding(
                            RELAY_CONN_TYPE,
                            field.node.ty.pos,
                            format!(
                                "pageInfo field from Connection type {type_name} needs to return a non-null PageInfo object"
                            ),
                        ));
                    }
                }
                _ => (),
            }
        }

        if !found_edges {
            findings.push(finding(
                RELAY_CONN_TYPE,
                definition.pos,
                format!(
                    "type {type_name} is a Connection type and therefore needs to have a field named 'edges' that returns a list type"
                ),
            ));
        }

        if !found_page_info {
            findings.push(finding(
                RELAY_CONN_TYPE,
                definition.pos,
                format!(
                    "type {type_name} is a Connection type and therefore needs to have a field named 'pageInfo' that returns a non-null PageInfo object"
                ),
            ));
        }
    }

    findings
}

fn relay_connection_arguments_spec(document: &ServiceDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for definition in type_definitions(document).filter(|definition| !definition.node.extend) {
        for field in output_fields(&definition.node.kind) {
            if !innermost_name(&field.node.ty.node)
                .as_str()
                .ends_with(CONNECTION_SUFFIX)
            {
                continue;
            }

            let field_name = field.node.name.node.as_str();

            let mut first = None;
            let mut after = None;
            let mut last = None;
            let mut before = None;

            for argument in &field.node.arguments {
                match argument.node.name.node.as_str() {
                    "first" => first = Some(argument),
                    "after" => after = Some(argument),
                    "last" => last = Some(argument),
                    "before" => before = Some(argument),
                    _ => (),
                }
            }

            let has_forward = first.is_some() && after.is_some();
            let has_backward = last.is_some() && before.is_some();

            if !has_forward && !has_backward {
                findings.push(finding(
                    RELAY_CONN_ARGS,
                    field.node.ty.pos,
                    format!(
                        "field {field_name} returns a Connection type and therefore must include forward pagination arguments (`first` and `after`) and/or backward pagination arguments (`last` and `before`) as per the Relay spec"
                    ),
                ));
            }

            if let Some(first) = first {
                let ty = &first.node.ty.node;

                if has_backward {
                    if is_list(ty) || !ty.nullable || innermost_name(ty).as_str() != "Int" {
                        findings.push(finding(
                            RELAY_CONN_ARGS,
                            first.pos,
                            format!(
                                "field {field_name} returns a Connection type with both forward and backward pagination and therefore the `first` argument must take a nullable non-negative integer as per the Relay spec"
                            ),
                        ));
                    }
                } else if is_list(ty) || innermost_name(ty).as_str() != "Int" {
                    findings.push(finding(
                        RELAY_CONN_ARGS,
                        first.pos,
                        format!(
                            "field {field_name} returns a Connection type with forward pagination and therefore the `first` argument must take a non-negative integer as per the Relay spec"
                        ),
                    ));
                }
            }

            if let Some(last) = last {
                let ty = &last.node.ty.node;

                if has_forward {
                    if is_list(ty) || !ty.nullable || innermost_name(ty).as_str() != "Int" {
                        findings.push(finding(
                            RELAY_CONN_ARGS,
                            last.pos,
                            format!(
                                "field {field_name} returns a Connection type with both forward and backward pagination and therefore the `last` argument must take a nullable non-negative integer as per the Relay spec"
                            ),
                        ));
                    }
                } else if is_list(ty) || innermost_name(ty).as_str() != "Int" {
                    findings.push(finding(
                        RELAY_CONN_ARGS,
                        last.pos,
                        format!(
                            "field {field_name} returns a Connection type with backward pagination and therefore the `last` argument must take a non-negative integer as per the Relay spec"
                        ),
                    ));
                }
            }
        }
    }

    findings
}
