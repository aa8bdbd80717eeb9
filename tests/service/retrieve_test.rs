// tests/service/retrieve_test.rs

#[path = "../common/model.rs"]
mod model;

use model::*;
use uuid::Uuid;
use xrmquery::model::{EarlyBound, Entity, Value};
use xrmquery::query::ConditionOperator;
use xrmquery::service::{retrieve, InMemoryService, ServiceError};
use xrmquery::typed::{ColumnSet, ConditionExpression, LinkEntity, QueryExpression};
use xrmquery::QueryError;

fn child_row(root: Uuid, child: Uuid, name: &str) -> Entity {
    test_row(root, "root")
        .attribute("A.ee_testchildid", aliased("ee_testchild", "ee_testchildid", child))
        .attribute("A.ee_name", aliased("ee_testchild", "ee_name", name))
}

#[test]
fn test_retrieve_multiple_sends_compiled_query() {
    let schema = schema();
    let root = Uuid::new_v4();
    let service = InMemoryService::with_rows(vec![
        child_row(root, Uuid::new_v4(), "c1"),
        child_row(root, Uuid::new_v4(), "c2"),
    ]);

    let query = QueryExpression::<Test>::new()
        .columns(ColumnSet::new().with(Test::NAME))
        .link(LinkEntity::new(Test::TEST_CHILDS));
    let tests = query.retrieve_multiple(&service, &schema).unwrap();

    assert_eq!(service.call_count(), 1);
    let sent = service.last_query().unwrap();
    assert_eq!(sent, query.compile(&schema).unwrap().query);
    assert_eq!(sent.link_entities[0].entity_alias.as_deref(), Some("A"));

    assert_eq!(tests.len(), 1);
    assert_eq!(tests.first().unwrap().test_childs().len(), 2);
}

#[test]
fn test_retrieve_restricts_to_id() {
    let schema = schema();
    let id = Uuid::new_v4();
    let service = InMemoryService::with_rows(vec![test_row(id, "found")]);

    let query = QueryExpression::<Test>::new()
        .condition(ConditionExpression::not_null(Test::NAME));
    let found = query.retrieve(&service, &schema, Some(id)).unwrap().unwrap();
    assert_eq!(found.id(), id);

    let criteria = service.last_query().unwrap().criteria;
    assert_eq!(criteria.conditions.len(), 2);
    assert_eq!(criteria.conditions[1].attribute_name, "ee_name");
    let restriction = &criteria.conditions[0];
    assert_eq!(restriction.attribute_name, "ee_testid");
    assert_eq!(restriction.operator, ConditionOperator::Equal);
    assert_eq!(restriction.values, vec![Value::Guid(id)]);

    // The caller's query is left as it was.
    assert!(query.criteria.node().conditions.is_empty());
}

#[test]
fn test_retrieve_without_id_takes_first() {
    let schema = schema();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let service = InMemoryService::with_rows(vec![test_row(a, "a"), test_row(b, "b")]);

    let query = QueryExpression::<Test>::new();
    let first = query.retrieve(&service, &schema, None).unwrap().unwrap();
    assert_eq!(first.id(), a);

    let nil = query.retrieve(&service, &schema, Some(Uuid::nil())).unwrap();
    assert!(nil.is_some());
    assert!(service.last_query().unwrap().criteria.is_empty());
}

#[test]
fn test_retrieve_by_id_with_columns() {
    let schema = schema();
    let id = Uuid::new_v4();
    let service = InMemoryService::with_rows(vec![test_row(id, "x")]);

    let found: Option<Test> = retrieve(
        &service,
        &schema,
        id,
        Some(ColumnSet::new().with(Test::NAME).with(Test::DAY_OF_WEEK)),
    )
    .unwrap();
    assert_eq!(found.unwrap().name(), Some("x"));

    let sent = service.last_query().unwrap();
    assert_eq!(sent.entity_name, "ee_test");
    assert_eq!(sent.column_set.columns, vec!["ee_name", "ee_dayofweek"]);
    assert_eq!(sent.criteria.conditions[0].values, vec![Value::Guid(id)]);
}

#[test]
fn test_retrieve_by_id_not_found() {
    let schema = schema();
    let service = InMemoryService::empty();

    let found = retrieve::<TestChild, _>(&service, &schema, Uuid::new_v4(), None).unwrap();
    assert!(found.is_none());
    assert!(service.last_query().unwrap().column_set.all_columns);
}

#[test]
fn test_service_fault_propagates() {
    let schema = schema();
    let service = InMemoryService::failing("0x80040217", "record does not exist");

    let err = QueryExpression::<Test>::new()
        .retrieve_multiple(&service, &schema)
        .unwrap_err();

    assert!(!err.is_configuration());
    match err {
        QueryError::Service(ServiceError::Remote { code, message }) => {
            assert_eq!(code, "0x80040217");
            assert_eq!(message, "record does not exist");
        }
        other => panic!("expected a service error, got {:?}", other),
    }
}

#[test]
fn test_configuration_error_skips_service() {
    let schema = schema();
    let service = InMemoryService::empty();

    let err = QueryExpression::<Test>::new()
        .link(LinkEntity::new(Test::UNDECLARED))
        .retrieve_multiple(&service, &schema)
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(service.call_count(), 0);
}

#[test]
fn test_service_by_reference() {
    let schema = schema();
    let service = InMemoryService::empty();
    let shared = &service;

    let records = QueryExpression::<TestMany>::new()
        .retrieve_multiple(&shared, &schema)
        .unwrap();
    assert!(records.is_empty());
    assert_eq!(service.received().len(), 1);
}
