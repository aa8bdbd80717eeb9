// tests/metadata/schema_loader_test.rs

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;
use xrmquery::config::Settings;
use xrmquery::metadata::{Schema, SchemaLoadError, SchemaLoader};
use xrmquery::model::EntityRole;
use xrmquery::query::JoinOperator;

const ACCOUNTS_TOML: &str = r#"
[[entity]]
logical_name = "account"
primary_key = "accountid"

[[entity.attribute]]
property = "Name"
logical_name = "name"

[[entity.relationship]]
property = "Contacts"
schema_name = "contact_customer_accounts"
target = "contact"

[[entity.relationship]]
property = "ParentAccount"
schema_name = "account_parent_account"
role = "Referencing"
target = "account"
attribute = "parentaccountid"

[junctions]
new_account_project = "new_AccountProject"
"#;

const CONTACTS_JSON: &str = r#"{
  "entity": [
    {
      "logical_name": "contact",
      "primary_key": "contactid",
      "attribute": [{ "property": "FullName", "logical_name": "fullname" }],
      "relationship": [
        {
          "property": "Account",
          "schema_name": "contact_customer_accounts",
          "target": "account",
          "attribute": "parentcustomerid"
        }
      ]
    }
  ]
}"#;

fn scratch_file(extension: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("xrmquery-{}.{}", Uuid::new_v4(), extension));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_toml_descriptors() {
    let schema = Schema::from_toml_str(ACCOUNTS_TOML).unwrap();

    let account = schema.descriptor("account").unwrap();
    assert_eq!(account.primary_key, "accountid");
    assert_eq!(account.attribute_name("Name"), Some("name"));

    let parent = account.relationship_for("ParentAccount").unwrap();
    assert_eq!(parent.role, Some(EntityRole::Referencing));
    assert_eq!(parent.attribute.as_deref(), Some("parentaccountid"));

    assert_eq!(schema.junctions().get("NEW_ACCOUNT_PROJECT"), Some("new_AccountProject"));
    assert_eq!(
        schema.junctions().resolve("new_account_project", None),
        "new_accountproject"
    );
}

#[test]
fn test_load_json_descriptors() {
    let schema = Schema::from_json_str(CONTACTS_JSON).unwrap();
    let contact = schema.descriptor("contact").unwrap();

    assert_eq!(contact.attribute_name("FullName"), Some("fullname"));
    assert_eq!(
        contact.relationship_for("Account").unwrap().attribute.as_deref(),
        Some("parentcustomerid")
    );
}

#[test]
fn test_loaded_entities_can_be_created() {
    let schema = SchemaLoader::new()
        .load_toml_str(ACCOUNTS_TOML)
        .unwrap()
        .load_json_str(CONTACTS_JSON)
        .unwrap()
        .finish()
        .unwrap();

    assert_eq!(schema.len(), 2);
    let contact = schema.create("contact").unwrap();
    assert_eq!(contact.logical_name, "contact");
    assert!(contact.attributes.is_empty());
}

#[test]
fn test_duplicate_across_sources() {
    let err = SchemaLoader::new()
        .load_toml_str(ACCOUNTS_TOML)
        .unwrap()
        .load_toml_str(ACCOUNTS_TOML)
        .unwrap()
        .finish()
        .unwrap_err();

    assert!(matches!(err, SchemaLoadError::DuplicateEntity(name) if name == "account"));
}

#[test]
fn test_malformed_documents() {
    assert!(matches!(
        Schema::from_toml_str("[[entity]]\nlogical_name = 1"),
        Err(SchemaLoadError::Toml(_))
    ));
    assert!(matches!(
        Schema::from_json_str("{ \"entity\": [ { } ] }"),
        Err(SchemaLoadError::Json(_))
    ));
}

#[test]
fn test_load_files_by_extension() {
    let toml_path = scratch_file("toml", ACCOUNTS_TOML);
    let json_path = scratch_file("json", CONTACTS_JSON);
    let yaml_path = scratch_file("yaml", "entity: []");

    let schema = SchemaLoader::new()
        .load_file(&toml_path)
        .unwrap()
        .load_file(&json_path)
        .unwrap()
        .finish()
        .unwrap();
    assert!(schema.contains("account"));
    assert!(schema.contains("contact"));

    let err = SchemaLoader::new().load_file(&yaml_path).unwrap_err();
    assert!(matches!(err, SchemaLoadError::UnsupportedFormat(_)));

    for path in [toml_path, json_path, yaml_path] {
        fs::remove_file(path).unwrap();
    }
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("xrmquery-does-not-exist.toml");
    let err = SchemaLoader::new().load_file(&path).unwrap_err();
    assert!(matches!(err, SchemaLoadError::FileNotFound(p) if p == path));
}

#[test]
fn test_schema_from_settings() {
    let toml_path = scratch_file("toml", ACCOUNTS_TOML);
    let settings: Settings = toml::from_str(&format!(
        r#"
        [query]
        default_join_operator = "left_outer"

        [junctions]
        account_contacts = "new_AccountContact"

        [schema]
        files = [{:?}]
        "#,
        toml_path.display().to_string()
    ))
    .unwrap();

    let schema = SchemaLoader::from_settings(&settings).unwrap();
    assert!(schema.contains("account"));
    assert_eq!(schema.default_join_operator(), Some(JoinOperator::LeftOuter));
    assert_eq!(
        schema.junctions().resolve("Account_Contacts", None),
        "new_accountcontact"
    );

    fs::remove_file(toml_path).unwrap();
}

#[test]
fn test_schema_files_relative_to_config_file() {
    let dir = std::env::temp_dir().join(format!("xrmquery-{}", Uuid::new_v4()));
    fs::create_dir_all(dir.join("schema")).unwrap();
    fs::write(dir.join("schema").join("accounts.toml"), ACCOUNTS_TOML).unwrap();
    let config = dir.join("xrmquery.toml");
    fs::write(&config, "[schema]\nfiles = [\"schema/accounts.toml\"]\n").unwrap();

    let settings = Settings::from_file(&config).unwrap();
    assert_eq!(settings.schema.base_dir.as_deref(), Some(dir.as_path()));

    let schema = SchemaLoader::from_settings(&settings).unwrap();
    assert!(schema.contains("account"));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_settings_with_missing_env_var() {
    let settings: Settings = toml::from_str(
        r#"
        [schema]
        files = ["${XRMQUERY_TEST_UNSET_DIR}/entities.toml"]
        "#,
    )
    .unwrap();

    let err = SchemaLoader::from_settings(&settings).unwrap_err();
    assert!(matches!(err, SchemaLoadError::Settings(_)));
}
