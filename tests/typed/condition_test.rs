// tests/typed/condition_test.rs

#[path = "../common/model.rs"]
mod model;

use model::*;
use uuid::Uuid;
use xrmquery::model::{EntityReference, Value};
use xrmquery::query::ConditionOperator;
use xrmquery::typed::ConditionExpression;

#[test]
fn test_equal_string() {
    let schema = schema();
    let condition = ConditionExpression::equal(Test::NAME, "Alpha")
        .to_untyped(&schema)
        .unwrap();

    assert_eq!(condition.attribute_name, "ee_name");
    assert_eq!(condition.operator, ConditionOperator::Equal);
    assert_eq!(condition.values, vec![Value::from("Alpha")]);
    assert_eq!(condition.to_string(), "ee_name equal 'Alpha'");
}

#[test]
fn test_entity_reference_becomes_identifier() {
    let schema = schema();
    let parent = Uuid::new_v4();
    let condition = ConditionExpression::equal(
        Test::PARENT_TEST_REF,
        EntityReference::new("ee_test", parent),
    )
    .to_untyped(&schema)
    .unwrap();

    assert_eq!(condition.attribute_name, "ee_parenttestid");
    assert_eq!(condition.values, vec![Value::Guid(parent)]);
}

#[test]
fn test_enum_member_becomes_integer() {
    let schema = schema();
    let condition = ConditionExpression::not_equal(Test::DAY_OF_WEEK, DayOfWeek::Tuesday)
        .to_untyped(&schema)
        .unwrap();

    assert_eq!(condition.operator, ConditionOperator::NotEqual);
    assert_eq!(condition.values, vec![Value::Int(2)]);
}

#[test]
fn test_converted_enum_member() {
    let schema = schema();
    let condition = ConditionExpression::equal(Test::DAY_OF_WEEK.converted(), DayOfWeek::Monday)
        .to_untyped(&schema)
        .unwrap();

    assert_eq!(condition.attribute_name, "ee_dayofweek");
    assert_eq!(condition.values, vec![Value::Int(1)]);
}

#[test]
fn test_in_values() {
    let schema = schema();
    let condition = ConditionExpression::in_values(
        Test::DAY_OF_WEEK,
        [DayOfWeek::Sunday, DayOfWeek::Wednesday],
    )
    .to_untyped(&schema)
    .unwrap();

    assert_eq!(condition.operator, ConditionOperator::In);
    assert_eq!(condition.values, vec![Value::Int(0), Value::Int(3)]);
    assert_eq!(condition.to_string(), "ee_dayofweek in 0, 3");
}

#[test]
fn test_null_checks_carry_no_values() {
    let schema = schema();
    let null = ConditionExpression::null(Test::PARENT_TEST_REF)
        .to_untyped(&schema)
        .unwrap();
    let not_null = ConditionExpression::not_null(Test::NAME)
        .to_untyped(&schema)
        .unwrap();

    assert!(null.values.is_empty());
    assert_eq!(null.to_string(), "ee_parenttestid null");
    assert_eq!(not_null.operator, ConditionOperator::NotNull);
}

#[test]
fn test_explicit_operator_on_identifier() {
    let schema = schema();
    let id = Uuid::new_v4();
    let condition = ConditionExpression::compare(TestChild::ID, ConditionOperator::NotEqual, id)
        .to_untyped(&schema)
        .unwrap();

    assert_eq!(condition.attribute_name, "ee_testchildid");
    assert_eq!(condition.values, vec![Value::Guid(id)]);
}

#[test]
fn test_unmapped_member_fails() {
    let schema = schema();
    assert!(ConditionExpression::equal(Test::NICKNAME, "x")
        .to_untyped(&schema)
        .is_err());
}
