// tests/planner/assembler_test.rs

#[path = "../common/model.rs"]
mod model;

use insta::assert_snapshot;
use model::*;
use xrmquery::config::Settings;
use xrmquery::metadata::Schema;
use xrmquery::planner::QueryAssembler;
use xrmquery::query::{JoinOperator, PagingInfo};
use xrmquery::typed::{
    ColumnSet, ConditionExpression, FilterExpression, LinkEntity, OrderExpression, QueryExpression,
};
use xrmquery::QueryError;

#[test]
fn test_assemble_nested_links() {
    let schema = schema();
    let query = QueryExpression::<Test>::new()
        .columns(ColumnSet::new().with(Test::NAME))
        .condition(ConditionExpression::equal(Test::NAME, "Alpha"))
        .order(OrderExpression::ascending(Test::NAME))
        .link(
            LinkEntity::new(Test::TEST_CHILDS)
                .columns(ColumnSet::new().with(TestChild::NAME))
                .link(LinkEntity::new(TestChild::TEST_MANY)),
        )
        .link(
            LinkEntity::new(Test::TEST_MANYS)
                .join_operator(JoinOperator::LeftOuter)
                .condition(ConditionExpression::equal(TestMany::NAME, "m")),
        )
        .top(5);

    let compiled = QueryAssembler::new(&schema).assemble(&query).unwrap();

    assert_snapshot!(compiled.query.to_string(), @r"
    ee_test [ee_name] top 5
      filter and
        ee_name equal 'Alpha'
      order ee_name ascending
      link A inner ee_test.ee_testid -> ee_testchild.ee_testid [ee_name]
        link B inner ee_testchild.ee_testmanyid -> ee_testmany.ee_testmanyid [*]
      link - left_outer ee_test.ee_testid -> ee_test_testmanys.ee_testid []
        link C left_outer ee_test_testmanys.ee_testmanyid -> ee_testmany.ee_testmanyid [*]
          filter and
            ee_name equal 'm'
    ");

    assert_eq!(compiled.aliases.get('A'), Some("ee_Test_TestChilds"));
    assert_eq!(
        compiled.aliases.get('B'),
        Some("ee_Test_TestChilds.ee_TestMany_TestChilds")
    );
    assert_eq!(compiled.aliases.get('C'), Some("ee_Test_TestManys"));
}

#[test]
fn test_assemble_paging_and_role_link() {
    let schema = schema();
    let query = QueryExpression::<Test>::new()
        .distinct()
        .page(PagingInfo::new(2, 50))
        .link(
            LinkEntity::new(Test::PARENT_TEST_TESTS)
                .columns(ColumnSet::new().with(Test::NAME))
                .order(OrderExpression::descending(Test::NAME)),
        );

    let compiled = query.compile(&schema).unwrap();

    assert_snapshot!(compiled.query.to_string(), @r"
    ee_test [*] distinct
      page 2 count 50
      link A inner ee_test.ee_testid -> ee_test.ee_parenttestid [ee_name]
        order ee_name descending
    ");
    assert_eq!(compiled.aliases.get('A'), Some("ee_Test_ParentTest:Referenced"));
}

#[test]
fn test_criteria_and_conditions_combine() {
    let schema = schema();
    let query = QueryExpression::<Test>::new()
        .criteria(
            FilterExpression::or()
                .condition(ConditionExpression::equal(Test::DAY_OF_WEEK, DayOfWeek::Monday))
                .condition(ConditionExpression::equal(Test::DAY_OF_WEEK, DayOfWeek::Sunday)),
        )
        .condition(ConditionExpression::not_null(Test::NAME));

    let compiled = query.compile(&schema).unwrap();

    assert_snapshot!(compiled.query.to_string(), @r"
    ee_test [*]
      filter or
        ee_dayofweek equal 1
        ee_dayofweek equal 0
        ee_name not_null
    ");
    assert!(compiled.aliases.is_empty());
}

#[test]
fn test_query_without_links() {
    let schema = schema();
    let compiled = QueryExpression::<TestChild>::new().compile(&schema).unwrap();

    assert_eq!(compiled.query.entity_name, "ee_testchild");
    assert!(compiled.query.column_set.all_columns);
    assert!(compiled.query.criteria.is_empty());
    assert!(compiled.query.link_entities.is_empty());
    assert!(compiled.aliases.is_empty());
}

#[test]
fn test_compile_is_repeatable() {
    let schema = schema();
    let query = QueryExpression::<Test>::new()
        .link(LinkEntity::new(Test::TEST_CHILDS).alias("mine"))
        .link(LinkEntity::new(Test::TEST_TAGS));

    let first = query.compile(&schema).unwrap();
    let second = query.compile(&schema).unwrap();

    assert_eq!(first, second);
    assert_eq!(query.link_entities[0].entity_alias.as_deref(), Some("mine"));
    assert_eq!(query.link_entities[0].join_operator, None);
}

#[test]
fn test_default_join_precedence() {
    let settings: Settings = toml::from_str(
        r#"
        [query]
        default_join_operator = "natural"
        "#,
    )
    .unwrap();
    let schema = schema().with_settings(&settings);

    let from_schema = QueryExpression::<Test>::new()
        .link(LinkEntity::new(Test::TEST_CHILDS))
        .compile(&schema)
        .unwrap();
    assert_eq!(
        from_schema.query.link_entities[0].join_operator,
        JoinOperator::Natural
    );

    let from_query = QueryExpression::<Test>::new()
        .default_join(JoinOperator::LeftOuter)
        .link(LinkEntity::new(Test::TEST_CHILDS))
        .link(LinkEntity::new(Test::PARENT_TEST).join_operator(JoinOperator::Inner))
        .compile(&schema)
        .unwrap();
    assert_eq!(
        from_query.query.link_entities[0].join_operator,
        JoinOperator::LeftOuter
    );
    assert_eq!(
        from_query.query.link_entities[1].join_operator,
        JoinOperator::Inner
    );
}

#[test]
fn test_bad_member_fails_assembly() {
    let schema = schema();
    let query = QueryExpression::<Test>::new().link(
        LinkEntity::new(Test::TEST_CHILDS).link(
            LinkEntity::new(TestChild::TEST).columns(ColumnSet::new().with(Test::NICKNAME)),
        ),
    );

    let err = query.compile(&schema).unwrap_err();
    assert!(matches!(err, QueryError::MissingAttribute { .. }));
}

#[test]
fn test_unregistered_root_fails() {
    let schema = Schema::builder().register::<TestChild>().build().unwrap();
    let err = QueryExpression::<Test>::new()
        .columns(ColumnSet::new().with(Test::NAME))
        .compile(&schema)
        .unwrap_err();

    assert!(matches!(err, QueryError::UnknownEntity(name) if name == "ee_test"));
}
