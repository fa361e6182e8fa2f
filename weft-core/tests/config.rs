use serial_test::serial;
use std::io::Write;
use weft_core::weft_openapi::{Compat, DocumentConfig};
use weft_core::{AppConfig, ConfigError, ConfigValue};

const OPENAPI_YAML: &str = r#"
openapi:
  info:
    title: "Users API"
    version: "1.2.0"
    description: "Manages users"
  servers:
    - "http://localhost:3000"
    - url: "https://api.example.com"
      description: "production"
  auth: true
  basepath: "/api"
  compat: strict
  docs: true
"#;

// ── Raw access ──────────────────────────────────────────────────────────────

#[test]
fn test_empty_config() {
    let config = AppConfig::empty();
    assert!(matches!(
        config.get::<String>("nonexistent"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_set_and_get() {
    let mut config = AppConfig::empty();
    config.set("app.name", ConfigValue::String("test".into()));
    assert_eq!(config.get::<String>("app.name").unwrap(), "test");
}

#[test]
fn test_get_or_default() {
    let config = AppConfig::empty();
    assert_eq!(config.get_or("missing", 42i64), 42);
}

#[test]
fn test_type_mismatch() {
    let mut config = AppConfig::empty();
    config.set("flag", ConfigValue::String("maybe".into()));
    assert_eq!(
        config.get::<bool>("flag"),
        Err(ConfigError::TypeMismatch {
            key: "flag".into(),
            expected: "bool"
        })
    );
}

#[test]
fn test_flatten_yaml() {
    let yaml = r#"
server:
  port: 8080
  host: "0.0.0.0"
"#;
    let config = AppConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(config.get::<u16>("server.port").unwrap(), 8080);
    assert_eq!(config.get::<String>("server.host").unwrap(), "0.0.0.0");
    assert!(config.contains_key("server"));
}

#[test]
fn test_string_list_from_comma_separated() {
    let mut config = AppConfig::empty();
    config.set("origins", ConfigValue::String("a, b,,c".into()));
    assert_eq!(
        config.get::<Vec<String>>("origins").unwrap(),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_invalid_yaml() {
    assert!(matches!(
        AppConfig::from_yaml_str("key: [unclosed", "test"),
        Err(ConfigError::Load(_))
    ));
}

// ── Document section ────────────────────────────────────────────────────────

#[test]
fn document_section_from_yaml() {
    let config = AppConfig::from_yaml_str(OPENAPI_YAML, "test").unwrap();
    let doc: DocumentConfig = config.section("openapi").unwrap();

    assert_eq!(doc.openapi, "3.0.3");
    assert_eq!(doc.info.title, "Users API");
    assert_eq!(doc.info.version, "1.2.0");
    assert_eq!(doc.info.description.as_deref(), Some("Manages users"));
    assert_eq!(doc.servers.len(), 2);
    assert_eq!(doc.servers[0].url, "http://localhost:3000");
    assert_eq!(doc.servers[1].description.as_deref(), Some("production"));
    assert!(doc.auth);
    assert_eq!(doc.base_path.as_deref(), Some("/api"));
    assert_eq!(doc.compat, Compat::Strict);
    assert!(doc.docs_ui);
}

#[test]
fn document_section_defaults() {
    let yaml = r#"
openapi:
  info:
    title: "Tiny"
    version: "0.1.0"
"#;
    let config = AppConfig::from_yaml_str(yaml, "test").unwrap();
    let doc: DocumentConfig = config.section("openapi").unwrap();

    assert_eq!(doc, DocumentConfig::new("Tiny", "0.1.0"));
}

#[test]
fn document_section_requires_title() {
    let yaml = r#"
openapi:
  info:
    version: "0.1.0"
"#;
    let config = AppConfig::from_yaml_str(yaml, "test").unwrap();
    let err = config.section::<DocumentConfig>("openapi").unwrap_err();
    assert_eq!(err, ConfigError::NotFound("openapi.info.title".into()));
}

#[test]
fn document_section_rejects_unknown_compat() {
    let yaml = r#"
openapi:
  info:
    title: "Tiny"
    version: "0.1.0"
  compat: lenient
"#;
    let config = AppConfig::from_yaml_str(yaml, "test").unwrap();
    assert!(matches!(
        config.section::<DocumentConfig>("openapi"),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn document_section_rejects_mistyped_flag() {
    let yaml = r#"
openapi:
  info:
    title: "Tiny"
    version: "0.1.0"
  auth: maybe
"#;
    let config = AppConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(
        config.section::<DocumentConfig>("openapi").unwrap_err(),
        ConfigError::TypeMismatch {
            key: "openapi.auth".into(),
            expected: "bool"
        }
    );
}

// ── File loading ────────────────────────────────────────────────────────────

#[test]
#[serial]
fn load_merges_profile_file_and_env() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application.yaml"), OPENAPI_YAML).unwrap();

    let mut profile = std::fs::File::create(dir.path().join("application-prod.yaml")).unwrap();
    writeln!(profile, "openapi:\n  docs: false").unwrap();

    std::env::remove_var("WEFT_PROFILE");
    std::env::set_var("OPENAPI_INFO_VERSION", "9.9.9");

    let config = AppConfig::load_from(dir.path(), "prod").unwrap();
    std::env::remove_var("OPENAPI_INFO_VERSION");

    assert_eq!(config.profile(), "prod");
    let doc: DocumentConfig = config.section("openapi").unwrap();
    assert_eq!(doc.info.title, "Users API");
    assert_eq!(doc.info.version, "9.9.9");
    assert!(!doc.docs_ui);
}

#[test]
#[serial]
fn profile_env_var_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application-staging.yaml"), "app:\n  name: staged\n").unwrap();

    std::env::set_var("WEFT_PROFILE", "staging");
    let config = AppConfig::load_from(dir.path(), "dev").unwrap();
    std::env::remove_var("WEFT_PROFILE");

    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<String>("app.name").unwrap(), "staged");
}

#[test]
#[serial]
fn dotenv_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "WEFT_TEST_DOTENV_FLAG=yes\n").unwrap();
    std::env::remove_var("WEFT_PROFILE");
    std::env::remove_var("WEFT_TEST_DOTENV_FLAG");

    let config = AppConfig::load_from(dir.path(), "dev").unwrap();
    std::env::remove_var("WEFT_TEST_DOTENV_FLAG");

    assert!(config.get::<bool>("weft.test.dotenv.flag").unwrap());
}

#[test]
#[serial]
fn missing_files_are_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    std::env::remove_var("WEFT_PROFILE");
    let config = AppConfig::load_from(dir.path(), "dev").unwrap();
    assert_eq!(config.profile(), "dev");
}
