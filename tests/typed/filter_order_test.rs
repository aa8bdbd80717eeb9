// tests/typed/filter_order_test.rs

#[path = "../common/model.rs"]
mod model;

use model::*;
use xrmquery::model::Value;
use xrmquery::query::{LogicalOperator, OrderType};
use xrmquery::typed::{ConditionExpression, FilterExpression, OrderExpression};

#[test]
fn test_nested_filter_structure() {
    let schema = schema();
    let filter = FilterExpression::and()
        .condition(ConditionExpression::not_null(Test::NAME))
        .filter(
            FilterExpression::or()
                .condition(ConditionExpression::equal(Test::DAY_OF_WEEK, DayOfWeek::Monday))
                .condition(ConditionExpression::equal(Test::DAY_OF_WEEK, DayOfWeek::Tuesday)),
        );

    let untyped = filter.to_untyped(&schema).unwrap();
    assert_eq!(untyped.filter_operator, LogicalOperator::And);
    assert_eq!(untyped.conditions.len(), 1);
    assert_eq!(untyped.filters.len(), 1);

    let inner = &untyped.filters[0];
    assert_eq!(inner.filter_operator, LogicalOperator::Or);
    assert_eq!(inner.conditions[0].values, vec![Value::Int(1)]);
    assert_eq!(inner.conditions[1].values, vec![Value::Int(2)]);
}

#[test]
fn test_default_filter_is_empty_and() {
    let schema = schema();
    let filter = FilterExpression::<Test>::default();

    assert_eq!(filter.filter_operator(), LogicalOperator::And);
    assert!(filter.to_untyped(&schema).unwrap().is_empty());
}

#[test]
fn test_add_in_place() {
    let schema = schema();
    let mut filter = FilterExpression::<TestChild>::or();
    filter.add_condition(ConditionExpression::equal(TestChild::NAME, "a"));
    filter.add_filter(FilterExpression::and().condition(ConditionExpression::null(TestChild::TEST_ID)));

    let untyped = filter.to_untyped(&schema).unwrap();
    assert_eq!(untyped.conditions[0].attribute_name, "ee_name");
    assert_eq!(untyped.filters[0].conditions[0].attribute_name, "ee_testid");
}

#[test]
fn test_nested_error_propagates() {
    let schema = schema();
    let filter = FilterExpression::and()
        .filter(FilterExpression::or().condition(ConditionExpression::equal(Test::NICKNAME, "x")));

    assert!(filter.to_untyped(&schema).is_err());
}

#[test]
fn test_orders() {
    let schema = schema();
    let ascending = OrderExpression::ascending(Test::NAME).to_untyped(&schema).unwrap();
    let descending = OrderExpression::descending(Test::ID).to_untyped(&schema).unwrap();

    assert_eq!(ascending.attribute_name, "ee_name");
    assert_eq!(ascending.order_type, OrderType::Ascending);
    assert_eq!(descending.attribute_name, "ee_testid");
    assert_eq!(descending.to_string(), "order ee_testid descending");
}
