use crate::{
    SchemaDocument,
    state::{DiffState, Sourced},
};
use async_graphql_parser::types::TypeSystemDefinition;

/// Walk both schemas and fill the pair maps of the `DiffState`, old side
/// first.
pub(crate) fn traverse_documents<'a>(documents: [&'a SchemaDocument; 2], state: &mut DiffState<'a>) {
    let size_approx = documents
        .iter()
        .map(|document| document.definition_count())
        .max()
        .unwrap_or_default();
    state.types.reserve(size_approx);

    for (side, document) in documents.into_iter().enumerate() {
        traverse_side(document, side, state);
    }
}

fn traverse_side<'a>(document: &'a SchemaDocument, side: usize, state: &mut DiffState<'a>) {
    for (file, definition) in document.iter_definitions() {
        match definition {
            TypeSystemDefinition::Schema(schema_definition) => {
                let slot = if schema_definition.node.extend {
                    &mut state.schema_extensions
                } else {
                    &mut state.schema_definitions
                };

                // Only the first definition of each flavor binds root operations.
                if slot[side].is_none() {
                    slot[side] = Some(Sourced {
                        file,
                        node: schema_definition,
                    });
                }
            }
            TypeSystemDefinition::Type(type_definition) => {
                let map = if type_definition.node.extend {
                    &mut state.type_extensions
                } else {
                    &mut state.types
                };

                map.entry(type_definition.node.name.node.as_str()).or_default()[side] = Some(Sourced {
                    file,
                    node: type_definition,
                });
            }
            TypeSystemDefinition::Directive(directive_definition) => {
                state
                    .directive_definitions
                    .entry(directive_definition.node.name.node.as_str())
                    .or_default()[side] = Some(Sourced {
                    file,
                    node: directive_definition,
                });
            }
        }
    }
}
