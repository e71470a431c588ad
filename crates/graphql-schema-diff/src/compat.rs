//! The directional type compatibility predicates. A type change is judged
//! differently depending on whether clients read values of that type (field
//! return types) or supply them (arguments and input fields): output types
//! may become more required, input types may become less required.

use async_graphql_parser::types::{BaseType, Type};

/// Whether changing a field return type from `old` to `new` cannot break a
/// consumer reading the field.
pub(crate) fn safe_change_for_output(old: &Type, new: &Type) -> bool {
    if !is_wrapping(old) && !is_wrapping(new) {
        return old == new;
    }

    // A field that was promised non-null must stay non-null.
    if new.nullable && !old.nullable {
        return false;
    }

    if !new.nullable {
        return match (&old.base, &new.base) {
            (BaseType::List(old_elem), BaseType::List(new_elem)) => {
                safe_change_for_output(old_elem, new_elem)
            }
            (BaseType::Named(old_name), BaseType::Named(new_name)) => old_name == new_name,
            _ => false,
        };
    }

    match (&old.base, &new.base) {
        (BaseType::List(old_elem), BaseType::List(new_elem)) => {
            safe_change_for_output(old_elem, new_elem)
        }
        _ => false,
    }
}

/// Whether changing an argument or input field type from `old` to `new`
/// cannot break a caller supplying a value.
pub(crate) fn safe_change_for_input(old: &Type, new: &Type) -> bool {
    if !is_wrapping(old) && !is_wrapping(new) {
        return old == new;
    }

    // A caller that omitted the value before must still be allowed to.
    if old.nullable && !new.nullable {
        return false;
    }

    if !old.nullable {
        return match (&old.base, &new.base) {
            (BaseType::List(old_elem), BaseType::List(new_elem)) => {
                safe_change_for_input(old_elem, new_elem)
            }
            (BaseType::Named(old_name), BaseType::Named(new_name)) => old_name == new_name,
            _ => false,
        };
    }

    match (&old.base, &new.base) {
        (BaseType::List(old_elem), BaseType::List(new_elem)) => {
            safe_change_for_input(old_elem, new_elem)
        }
        _ => false,
    }
}

fn is_wrapping(ty: &Type) -> bool {
    !ty.nullable || matches!(ty.base, BaseType::List(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql_value::Name;

    fn named(name: &str) -> Type {
        Type {
            base: BaseType::Named(Name::new(name)),
            nullable: true,
        }
    }

    fn list(inner: Type) -> Type {
        Type {
            base: BaseType::List(Box::new(inner)),
            nullable: true,
        }
    }

    fn required(mut ty: Type) -> Type {
        ty.nullable = false;
        ty
    }

    #[test]
    fn identical_types_are_safe_in_both_directions() {
        let shapes = [
            named("String"),
            required(named("String")),
            list(named("Int")),
            required(list(required(named("Int")))),
            list(list(named("Int"))),
            required(list(required(list(named("Int"))))),
        ];

        for shape in shapes {
            assert!(safe_change_for_output(&shape, &shape), "{shape}");
            assert!(safe_change_for_input(&shape, &shape), "{shape}");
        }
    }

    #[test]
    fn renaming_is_unsafe() {
        assert!(!safe_change_for_output(&named("String"), &named("Int")));
        assert!(!safe_change_for_input(&named("String"), &named("Int")));
        assert!(!safe_change_for_output(
            &required(named("String")),
            &required(named("Int"))
        ));
    }

    #[test]
    fn output_may_become_non_null_but_not_nullable() {
        assert!(safe_change_for_output(
            &named("String"),
            &required(named("String"))
        ));
        assert!(!safe_change_for_output(
            &required(named("String")),
            &named("String")
        ));
    }

    #[test]
    fn input_may_become_nullable_but_not_non_null() {
        assert!(safe_change_for_input(
            &required(named("String")),
            &named("String")
        ));
        assert!(!safe_change_for_input(
            &named("String"),
            &required(named("String"))
        ));
    }

    #[test]
    fn list_elements_are_compared_recursively() {
        // [String] -> [String!] tightens the element, safe for readers only.
        assert!(safe_change_for_output(
            &list(named("String")),
            &list(required(named("String")))
        ));
        assert!(!safe_change_for_input(
            &list(named("String")),
            &list(required(named("String")))
        ));

        // [String!] -> [String] relaxes the element, safe for writers only.
        assert!(!safe_change_for_output(
            &list(required(named("String"))),
            &list(named("String"))
        ));
        assert!(safe_change_for_input(
            &list(required(named("String"))),
            &list(named("String"))
        ));
    }

    #[test]
    fn list_and_named_shapes_do_not_mix() {
        assert!(!safe_change_for_output(&named("String"), &list(named("String"))));
        assert!(!safe_change_for_output(&list(named("String")), &named("String")));
        assert!(!safe_change_for_input(&named("String"), &list(named("String"))));
        assert!(!safe_change_for_input(&list(named("String")), &named("String")));
    }

    #[test]
    fn nested_lists_follow_the_same_rules_at_every_level() {
        let nested = list(list(named("Int")));
        let inner_required = list(list(required(named("Int"))));

        assert!(safe_change_for_output(&nested, &inner_required));
        assert!(!safe_change_for_output(&inner_required, &nested));
        assert!(safe_change_for_input(&inner_required, &nested));
        assert!(!safe_change_for_input(&nested, &inner_required));

        // Different nesting depths never fit.
        assert!(!safe_change_for_output(&nested, &list(named("Int"))));
        assert!(!safe_change_for_input(&list(named("Int")), &nested));
    }

    #[test]
    fn required_list_of_required_elements() {
        let strict = required(list(required(named("String"))));
        let relaxed = list(named("String"));

        assert!(safe_change_for_output(&relaxed, &strict));
        assert!(!safe_change_for_output(&strict, &relaxed));
        assert!(safe_change_for_input(&strict, &relaxed));
        assert!(!safe_change_for_input(&relaxed, &strict));
    }
}
