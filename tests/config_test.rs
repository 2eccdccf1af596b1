// tests/config_test.rs
use cbs_publish::config::{load_config, Config};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.package, "ceph-ansible");
    assert!(config.behavior.scratch);

    let router = config.routes().expect("default table must validate");
    assert_eq!(router.series_names(), vec!["v2", "v3"]);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
package = "ceph-ansible"

[[mapping]]
series = "v2"
target = "storage7-ceph-jewel-el7"
candidates = ["storage7-ceph-jewel-candidate"]

[[mapping]]
series = "v3"
target = "storage7-ceph-luminous-el7"
candidates = ["storage7-ceph-luminous-candidate"]

[behavior]
scratch = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.mapping.len(), 2);
    assert_eq!(config.mapping[1].series, "v3");
    assert_eq!(config.mapping[1].target, "storage7-ceph-luminous-el7");
    assert!(!config.behavior.scratch);
}

#[test]
fn test_load_missing_file_fails() {
    assert!(load_config(Some("/nonexistent/cbspublish.toml")).is_err());
}

#[test]
fn test_load_malformed_file_fails() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"not valid toml [[[").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(result.is_err());
}

#[test]
fn test_duplicate_series_rejected_by_routes() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[[mapping]]
series = "v3"
target = "target-a"

[[mapping]]
series = "v3"
target = "target-b"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    let err = config.routes().unwrap_err();
    assert!(err.to_string().contains("Duplicate mapping"));
}

#[test]
fn test_candidates_default_to_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[[mapping]]
series = "v4"
target = "storage7-ceph-mimic-el7"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(config.mapping[0].candidates.is_empty());
}
