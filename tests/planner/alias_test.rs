// tests/planner/alias_test.rs

#[path = "../common/model.rs"]
mod model;

use model::*;
use xrmquery::planner::{assign_aliases, AliasMap, MAX_ALIASES};
use xrmquery::query::JoinOperator;
use xrmquery::typed::{LinkEntity, QueryExpression};
use xrmquery::QueryError;

#[test]
fn test_depth_first_assignment() {
    let schema = schema();
    let mut links = vec![
        LinkEntity::new(Test::TEST_CHILDS)
            .link(LinkEntity::new(TestChild::TEST_MANY))
            .into_spec(),
        LinkEntity::new(Test::TEST_MANYS).into_spec(),
    ];

    let aliases = assign_aliases(&mut links, &schema, JoinOperator::Inner).unwrap();

    assert_eq!(aliases.len(), 3);
    assert_eq!(aliases.get('A'), Some("ee_Test_TestChilds"));
    assert_eq!(
        aliases.get('B'),
        Some("ee_Test_TestChilds.ee_TestMany_TestChilds")
    );
    assert_eq!(aliases.get('C'), Some("ee_Test_TestManys"));

    assert_eq!(links[0].entity_alias.as_deref(), Some("A"));
    assert_eq!(links[0].link_entities[0].entity_alias.as_deref(), Some("B"));
    assert_eq!(links[1].entity_alias.as_deref(), Some("C"));
}

#[test]
fn test_role_is_part_of_path() {
    let schema = schema();
    let mut links = vec![
        LinkEntity::new(Test::PARENT_TEST).into_spec(),
        LinkEntity::new(Test::PARENT_TEST_TESTS).into_spec(),
    ];

    let aliases = assign_aliases(&mut links, &schema, JoinOperator::Inner).unwrap();
    assert_eq!(aliases.get('A'), Some("ee_Test_ParentTest:Referencing"));
    assert_eq!(aliases.get('B'), Some("ee_Test_ParentTest:Referenced"));
}

#[test]
fn test_caller_alias_is_replaced() {
    let schema = schema();
    let mut links = vec![LinkEntity::new(Test::TEST_CHILDS).alias("kids").into_spec()];

    let aliases = assign_aliases(&mut links, &schema, JoinOperator::Inner).unwrap();
    assert_eq!(links[0].entity_alias.as_deref(), Some("A"));
    assert_eq!(aliases.iter().collect::<Vec<_>>(), vec![('A', "ee_Test_TestChilds")]);
}

#[test]
fn test_default_join_fills_unset_operators() {
    let schema = schema();
    let mut links = vec![
        LinkEntity::new(Test::TEST_CHILDS).into_spec(),
        LinkEntity::new(Test::PARENT_TEST)
            .join_operator(JoinOperator::Natural)
            .into_spec(),
    ];

    assign_aliases(&mut links, &schema, JoinOperator::LeftOuter).unwrap();
    assert_eq!(links[0].join_operator, Some(JoinOperator::LeftOuter));
    assert_eq!(links[1].join_operator, Some(JoinOperator::Natural));
}

#[test]
fn test_lowercase_aliases_after_uppercase() {
    let schema = schema();
    let mut query = QueryExpression::<Test>::new();
    for _ in 0..30 {
        query.add_link(LinkEntity::new(Test::TEST_CHILDS));
    }

    let compiled = query.compile(&schema).unwrap();
    assert_eq!(compiled.aliases.len(), 30);
    assert_eq!(compiled.aliases.get('Z'), Some("ee_Test_TestChilds"));
    assert_eq!(compiled.aliases.get('d'), Some("ee_Test_TestChilds"));
    assert_eq!(compiled.query.link_entities[26].entity_alias.as_deref(), Some("a"));
}

#[test]
fn test_alias_limit() {
    let schema = schema();

    let mut full = QueryExpression::<Test>::new();
    for _ in 0..MAX_ALIASES {
        full.add_link(LinkEntity::new(Test::TEST_CHILDS));
    }
    assert_eq!(full.compile(&schema).unwrap().aliases.len(), MAX_ALIASES);

    full.add_link(LinkEntity::new(Test::TEST_CHILDS));
    let err = full.compile(&schema).unwrap_err();
    assert!(matches!(err, QueryError::AliasesExhausted(52)));
}

#[test]
fn test_undeclared_navigation_fails() {
    let schema = schema();
    let mut links = vec![LinkEntity::new(Test::UNDECLARED).into_spec()];

    let err = assign_aliases(&mut links, &schema, JoinOperator::Inner).unwrap_err();
    assert!(matches!(err, QueryError::MissingRelationship { .. }));
}

#[test]
fn test_alias_map_from_pairs() {
    let aliases: AliasMap = [('B', "b.path"), ('A', "a.path")].into_iter().collect();
    assert_eq!(aliases.iter().map(|(a, _)| a).collect::<String>(), "AB");
}
