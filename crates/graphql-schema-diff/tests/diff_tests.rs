use graphql_schema_diff::{Change, ChangeKind, Criticality, SchemaDocument, find_changes};

fn schema(sdl: &str) -> SchemaDocument {
    SchemaDocument::parse("schema.graphql", sdl).unwrap()
}

fn diff(old: &str, new: &str) -> Vec<(ChangeKind, Criticality, String)> {
    let old = SchemaDocument::parse("old.graphql", old).unwrap();
    let new = SchemaDocument::parse("new.graphql", new).unwrap();

    find_changes(&old, &new)
        .into_iter()
        .map(|change| (change.kind, change.criticality, change.path))
        .collect()
}

#[track_caller]
fn expect_single_change(old: &str, new: &str, kind: ChangeKind, criticality: Criticality) {
    let changes = diff(old, new);

    assert_eq!(
        changes.len(),
        1,
        "expected exactly one change, got: {changes:?}"
    );
    assert_eq!((changes[0].0, changes[0].1), (kind, criticality));
}

#[test]
fn identical_schemas_produce_no_changes() {
    let sdl = r#"
        schema {
          query: Query
          mutation: Mutation
        }

        directive @transform(from: String!) repeatable on FIELD | FIELD_DEFINITION

        interface Node {
          id: ID!
        }

        type Query {
          node(id: ID!): Node
          employees(first: Int = 10, after: String): EmployeeConnection @transform(from: "v1") @transform(from: "v2")
        }

        type Mutation {
          hire(input: HireInput!): Employee
        }

        type Employee implements Node {
          id: ID!
          "Full legal name"
          name: String!
          status: Status @deprecated(reason: "Use employment instead")
        }

        type EmployeeConnection {
          edges: [EmployeeEdge]
          pageInfo: PageInfo!
        }

        type EmployeeEdge {
          node: Employee
          cursor: String!
        }

        type PageInfo {
          hasNextPage: Boolean!
        }

        input HireInput {
          name: String!
          referrals: [[String!]]
        }

        enum Status {
          ACTIVE
          TERMINATED @deprecated
        }

        union SearchResult = Employee | Query

        extend type Employee {
          nickname: String
        }
    "#;

    let old = schema(sdl);
    let new = schema(sdl);

    assert_eq!(find_changes(&old, &new), Vec::<Change<'_>>::new());
}

#[test]
fn additions_and_removals_are_symmetric() {
    let old = r#"
        type Query {
          hello: String
        }

        enum Color {
          RED
        }

        union Media = Query
    "#;
    let new = r#"
        type Query {
          hello: String
          goodbye: String
        }

        enum Color {
          RED
          BLUE
        }

        union Media = Query | Extra

        type Extra {
          id: ID
        }
    "#;

    let mirrored: &[(ChangeKind, ChangeKind)] = &[
        (ChangeKind::TypeAdded, ChangeKind::TypeRemoved),
        (ChangeKind::FieldAdded, ChangeKind::FieldRemoved),
        (ChangeKind::EnumValueAdded, ChangeKind::EnumValueRemoved),
        (ChangeKind::UnionMemberAdded, ChangeKind::UnionMemberRemoved),
    ];

    let forward = diff(old, new);
    let backward = diff(new, old);

    for (additive, subtractive) in mirrored {
        let added: Vec<_> = forward
            .iter()
            .filter(|(kind, _, _)| kind == additive)
            .map(|(_, _, path)| path.clone())
            .collect();
        let removed: Vec<_> = backward
            .iter()
            .filter(|(kind, _, _)| kind == subtractive)
            .map(|(_, _, path)| path.clone())
            .collect();

        assert!(!added.is_empty(), "expected at least one {additive:?}");
        assert_eq!(added, removed, "{additive:?} vs {subtractive:?}");
    }
}

#[test]
fn field_type_change_to_another_type_is_breaking() {
    expect_single_change(
        "type Employee { name: String! }",
        "type Employee { name: Int! }",
        ChangeKind::FieldTypeChanged,
        Criticality::Breaking,
    );
}

#[test]
fn field_type_tightened_to_non_null_is_non_breaking() {
    expect_single_change(
        "type Employee { name: String }",
        "type Employee { name: String! }",
        ChangeKind::FieldTypeChanged,
        Criticality::NonBreaking,
    );
}

#[test]
fn field_type_relaxed_to_nullable_is_breaking() {
    expect_single_change(
        "type Employee { name: String! }",
        "type Employee { name: String }",
        ChangeKind::FieldTypeChanged,
        Criticality::Breaking,
    );
}

#[test]
fn required_argument_added_to_existing_field_is_breaking() {
    expect_single_change(
        "type Query { reviews(offset: Int): String! }",
        "type Query { reviews(offset: Int, limit: Int!): String! }",
        ChangeKind::FieldArgumentAdded,
        Criticality::Breaking,
    );
}

#[test]
fn optional_argument_added_to_existing_field_is_dangerous() {
    expect_single_change(
        "type Query { reviews(offset: Int): String! }",
        "type Query { reviews(offset: Int, limit: Int): String! }",
        ChangeKind::FieldArgumentAdded,
        Criticality::Dangerous,
    );
}

#[test]
fn input_field_relaxed_to_nullable_is_non_breaking() {
    expect_single_change(
        "input UserInput { addresses: [String]! }",
        "input UserInput { addresses: [String] }",
        ChangeKind::InputFieldTypeChanged,
        Criticality::NonBreaking,
    );
}

#[test]
fn input_field_tightened_to_non_null_is_breaking() {
    expect_single_change(
        "input UserInput { addresses: [String] }",
        "input UserInput { addresses: [String]! }",
        ChangeKind::InputFieldTypeChanged,
        Criticality::Breaking,
    );
}

#[test]
fn union_member_removal_is_breaking() {
    expect_single_change(
        "union Body = Image | Text",
        "union Body = Image",
        ChangeKind::UnionMemberRemoved,
        Criticality::Breaking,
    );
}

#[test]
fn directive_argument_relaxed_to_nullable_is_non_breaking() {
    expect_single_change(
        "directive @transform(from: String!) on FIELD",
        "directive @transform(from: String) on FIELD",
        ChangeKind::DirectiveArgumentTypeChanged,
        Criticality::NonBreaking,
    );
}

#[test]
fn dropped_repeatable_directive_application_is_dangerous() {
    let old = r#"
        directive @graph(type: String, key: String) repeatable on OBJECT

        type Book @graph(type: "book", key: "isbn") @graph(type: "library", key: "isbn") {
          isbn: String!
        }
    "#;
    let new = r#"
        directive @graph(type: String, key: String) repeatable on OBJECT

        type Book @graph(type: "book", key: "isbn") {
          isbn: String!
        }
    "#;

    expect_single_change(old, new, ChangeKind::DirectiveChanged, Criticality::Dangerous);
}

#[test]
fn type_removal_and_addition() {
    let changes = diff(
        "type Employee { id: ID } type Office { id: ID }",
        "type Employee { id: ID } type Warehouse { id: ID }",
    );

    assert_eq!(
        changes,
        vec![
            (
                ChangeKind::TypeRemoved,
                Criticality::Breaking,
                "Office".to_owned()
            ),
            (
                ChangeKind::TypeAdded,
                Criticality::NonBreaking,
                "Warehouse".to_owned()
            ),
        ]
    );
}

#[test]
fn type_kind_change_is_breaking_and_suppresses_structural_diff() {
    expect_single_change(
        "type Body { text: String }",
        "scalar Body",
        ChangeKind::TypeKindChanged,
        Criticality::Breaking,
    );
}

#[test]
fn extended_type_removal_mentions_the_extension() {
    let old = SchemaDocument::parse(
        "old.graphql",
        "type Query { hello: String } extend type Query { extra: String }",
    )
    .unwrap();
    let new = SchemaDocument::parse("new.graphql", "type Query { hello: String }").unwrap();

    let changes = find_changes(&old, &new);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::TypeRemoved);
    assert_eq!(changes[0].message, "Extended type 'Query' was removed");
    assert_eq!(changes[0].position.file, "old.graphql");
}

#[test]
fn schema_root_operation_changes() {
    expect_single_change(
        "schema { query: Query } type Query { a: Int } type RootQuery { a: Int }",
        "schema { query: RootQuery } type Query { a: Int } type RootQuery { a: Int }",
        ChangeKind::SchemaQueryTypeChanged,
        Criticality::Breaking,
    );

    expect_single_change(
        "schema { query: Query } type Query { a: Int } type Mutation { b: Int }",
        "schema { query: Query mutation: Mutation } type Query { a: Int } type Mutation { b: Int }",
        ChangeKind::SchemaMutationTypeChanged,
        Criticality::NonBreaking,
    );
}

#[test]
fn deprecation_changes_on_fields() {
    let base = "type Employee { name: String }";

    expect_single_change(
        base,
        r#"type Employee { name: String @deprecated(reason: "Use fullName") }"#,
        ChangeKind::FieldDeprecationAdded,
        Criticality::Dangerous,
    );

    expect_single_change(
        r#"type Employee { name: String @deprecated(reason: "Use fullName") }"#,
        base,
        ChangeKind::FieldDeprecationRemoved,
        Criticality::Dangerous,
    );

    expect_single_change(
        r#"type Employee { name: String @deprecated(reason: "Use fullName") }"#,
        r#"type Employee { name: String @deprecated(reason: "Use legalName") }"#,
        ChangeKind::FieldDeprecationReasonChanged,
        Criticality::NonBreaking,
    );
}

#[test]
fn removed_deprecated_field_is_flagged_in_the_message() {
    let old = SchemaDocument::parse(
        "old.graphql",
        "type Employee { name: String @deprecated status: Int }",
    )
    .unwrap();
    let new = SchemaDocument::parse("new.graphql", "type Employee { status: Int }").unwrap();

    let changes = find_changes(&old, &new);

    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes[0].message,
        "Field 'Employee.name' (deprecated) was removed from OBJECT"
    );
}

#[test]
fn enum_value_changes() {
    expect_single_change(
        "enum Status { ACTIVE }",
        "enum Status { ACTIVE TERMINATED }",
        ChangeKind::EnumValueAdded,
        Criticality::Dangerous,
    );

    expect_single_change(
        "enum Status { ACTIVE TERMINATED }",
        "enum Status { ACTIVE }",
        ChangeKind::EnumValueRemoved,
        Criticality::Breaking,
    );

    expect_single_change(
        "enum Status { ACTIVE }",
        "enum Status { ACTIVE @deprecated }",
        ChangeKind::EnumValueDeprecationAdded,
        Criticality::Dangerous,
    );
}

#[test]
fn argument_default_value_change_is_dangerous() {
    expect_single_change(
        "type Query { reviews(first: Int = 10): String }",
        "type Query { reviews(first: Int = 25): String }",
        ChangeKind::FieldArgumentDefaultChanged,
        Criticality::Dangerous,
    );
}

#[test]
fn input_field_default_value_change_is_dangerous() {
    expect_single_change(
        "input Pagination { first: Int = 10 }",
        "input Pagination { first: Int = 25 }",
        ChangeKind::InputFieldDefaultValueChanged,
        Criticality::Dangerous,
    );
}

#[test]
fn required_input_field_addition_is_breaking() {
    expect_single_change(
        "input HireInput { name: String! }",
        "input HireInput { name: String! startDate: String! }",
        ChangeKind::InputFieldAdded,
        Criticality::Breaking,
    );

    expect_single_change(
        "input HireInput { name: String! }",
        "input HireInput { name: String! startDate: String }",
        ChangeKind::InputFieldAdded,
        Criticality::Dangerous,
    );
}

#[test]
fn interface_implementation_changes() {
    expect_single_change(
        "interface Node { id: ID! } type Employee implements Node { id: ID! }",
        "interface Node { id: ID! } type Employee { id: ID! }",
        ChangeKind::ObjectTypeInterfaceRemoved,
        Criticality::Breaking,
    );

    expect_single_change(
        "interface Node { id: ID! } type Employee { id: ID! }",
        "interface Node { id: ID! } type Employee implements Node { id: ID! }",
        ChangeKind::ObjectTypeInterfaceAdded,
        Criticality::Dangerous,
    );
}

#[test]
fn directive_definition_changes() {
    expect_single_change(
        "directive @tag(name: String) on OBJECT",
        "directive @tag(name: String) on OBJECT | INTERFACE",
        ChangeKind::DirectiveLocationAdded,
        Criticality::NonBreaking,
    );

    expect_single_change(
        "directive @tag(name: String) on OBJECT | INTERFACE",
        "directive @tag(name: String) on OBJECT",
        ChangeKind::DirectiveLocationRemoved,
        Criticality::Breaking,
    );

    expect_single_change(
        "directive @tag(name: String) repeatable on OBJECT",
        "directive @tag(name: String) on OBJECT",
        ChangeKind::DirectiveRepeatableRemoved,
        Criticality::Breaking,
    );

    expect_single_change(
        "directive @tag(name: String) on OBJECT",
        "directive @tag(name: String, weight: Int!) on OBJECT",
        ChangeKind::DirectiveArgumentAdded,
        Criticality::Breaking,
    );

    expect_single_change(
        "directive @tag(name: String) on OBJECT",
        "directive @tag(name: String, weight: Int) on OBJECT",
        ChangeKind::DirectiveArgumentAdded,
        Criticality::NonBreaking,
    );

    expect_single_change(
        "directive @tag on OBJECT scalar Keep",
        "scalar Keep",
        ChangeKind::DirectiveRemoved,
        Criticality::Breaking,
    );
}

#[test]
fn directive_application_value_change_is_dangerous() {
    let old = r#"
        directive @cache(maxAge: Int) on FIELD_DEFINITION

        type Query {
          employees: String @cache(maxAge: 60)
        }
    "#;
    let new = r#"
        directive @cache(maxAge: Int) on FIELD_DEFINITION

        type Query {
          employees: String @cache(maxAge: 120)
        }
    "#;

    expect_single_change(
        old,
        new,
        ChangeKind::DirectiveArgumentValueChanged,
        Criticality::Dangerous,
    );
}

#[test]
fn directive_application_removal_from_field_is_dangerous() {
    let old = r#"
        directive @cache(maxAge: Int) on FIELD_DEFINITION

        type Query {
          employees: String @cache(maxAge: 60)
        }
    "#;
    let new = r#"
        directive @cache(maxAge: Int) on FIELD_DEFINITION

        type Query {
          employees: String
        }
    "#;

    expect_single_change(old, new, ChangeKind::DirectiveRemoved, Criticality::Dangerous);
}

#[test]
fn changes_point_into_the_new_schema_where_possible() {
    let old = SchemaDocument::parse("old.graphql", "type Employee {\n  name: String\n}").unwrap();
    let new = SchemaDocument::parse("new.graphql", "type Employee {\n  name: Int\n}").unwrap();

    let changes = find_changes(&old, &new);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].position.file, "new.graphql");
    assert_eq!(changes[0].position.line, 2);
}

#[test]
fn multi_file_schemas_keep_per_file_positions() {
    let old = SchemaDocument::parse_files([
        ("a.graphql".to_owned(), "type Query { hello: String }".to_owned()),
        ("b.graphql".to_owned(), "type Employee { id: ID! }".to_owned()),
    ])
    .unwrap();
    let new = SchemaDocument::parse_files([
        ("a.graphql".to_owned(), "type Query { hello: String }".to_owned()),
        ("b.graphql".to_owned(), "type Employee { id: ID! name: String }".to_owned()),
    ])
    .unwrap();

    let changes = find_changes(&old, &new);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, ChangeKind::FieldAdded);
    assert_eq!(changes[0].position.file, "b.graphql");
}

#[test]
fn parse_errors_name_the_offending_file() {
    let error = SchemaDocument::parse("broken.graphql", "type {").unwrap_err();

    assert_eq!(error.file(), "broken.graphql");
    assert!(error.to_string().contains("broken.graphql"));
}

#[test]
fn change_kinds_serialize_in_screaming_snake_case() {
    assert_eq!(
        serde_json::to_value(ChangeKind::FieldTypeChanged).unwrap(),
        serde_json::json!("FIELD_TYPE_CHANGED")
    );
    assert_eq!(
        serde_json::to_value(Criticality::NonBreaking).unwrap(),
        serde_json::json!("NonBreaking")
    );
}
