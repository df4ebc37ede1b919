use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use super::*;

fn write(root: &Path, rel: &str, source: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

fn request(base: &Path, module: &str, attribute: Option<&str>) -> JsonValue {
    json!({
        "command": "sideload",
        "parameters": {
            "base_path": base.display().to_string(),
            "module": module,
            "attribute": attribute,
        }
    })
}

#[test]
fn success_with_attribute() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "demo/module.side",
        "let VALUE = 42\nfn run() { return VALUE }\n",
    );
    let mut payload = request(dir.path(), "demo.module", Some("run"));
    payload["parameters"]["loader_options"] = json!({"strict": true});

    let response = main_json(&payload).to_json();
    let module_file = dir.path().join("demo").join("module.side");
    assert_eq!(
        response,
        json!({
            "status": "success",
            "schema_version": SCHEMA_VERSION,
            "module_file": module_file.display().to_string(),
            "attribute": "run",
            "object_kind": "attribute",
            "messages": ["Loaded demo.module", "Resolved attribute run"],
            "metadata": {
                "module_name": "demo.module",
                "loader_options": {"strict": true},
                "attribute_type": "function",
            },
        })
    );
}

#[test]
fn success_without_attribute() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "plain.side", "let X = 1\n");
    let response = main_json(&request(dir.path(), "plain", None));
    assert!(response.is_success());
    let json = response.to_json();
    assert_eq!(json["object_kind"], "module");
    assert_eq!(json["attribute"], JsonValue::Null);
    assert_eq!(json["messages"], json!(["Loaded plain"]));
    assert_eq!(json["metadata"], json!({"module_name": "plain"}));
}

#[test]
fn instance_attribute_type_is_its_type_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "provider.side", "type Thing { value = \"hello\" }\n");
    let json = main_json(&request(dir.path(), "provider", Some("Thing"))).to_json();
    assert_eq!(json["metadata"]["attribute_type"], "Thing");
}

#[test]
fn missing_attribute() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "demo/module.side", "type Tool { }\n");
    let json = main_json(&request(dir.path(), "demo.module", Some("missing"))).to_json();
    assert_eq!(json["status"], "failure");
    assert_eq!(json["message"], ATTRIBUTE_RESOLUTION_FAILED);
    assert_eq!(json["details"]["attribute"], "missing");
    assert_eq!(
        json["details"]["module_file"],
        dir.path().join("demo").join("module.side").display().to_string()
    );
}

#[test]
fn construction_failure_reports_as_attribute_failure() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "broken.side",
        "type Broken { fn init(self) { fail(\"no backend\") } }\n",
    );
    let json = main_json(&request(dir.path(), "broken", Some("Broken"))).to_json();
    assert_eq!(json["message"], ATTRIBUTE_RESOLUTION_FAILED);
    assert!(json["details"]["error"]
        .as_str()
        .unwrap()
        .contains("no backend"));
}

#[test]
fn module_resolution_failure() {
    let dir = TempDir::new().unwrap();
    let json = main_json(&request(dir.path(), "absent_module", None)).to_json();
    assert_eq!(json["status"], "failure");
    assert_eq!(json["message"], MODULE_RESOLUTION_FAILED);
    assert_eq!(json["details"]["module"], "absent_module");
    assert_eq!(
        json["details"]["base_path"],
        dir.path().display().to_string()
    );
}

#[test]
fn validation_failures() {
    let cases = [
        (json!({"command": "sideload", "parameters": {}}), json!([])),
        (
            json!({"command": "other", "parameters": {"base_path": "/", "module": "m"}}),
            json!(["command"]),
        ),
        (
            json!({"command": "sideload", "parameters": {"base_path": "", "module": "m"}}),
            json!(["parameters", "base_path"]),
        ),
        (
            json!({"command": "sideload", "parameters": {"base_path": "/", "module": "m", "attribute": ""}}),
            json!(["parameters", "attribute"]),
        ),
        (
            json!({"command": "sideload", "parameters": {"base_path": "/", "module": "m"}, "extra": 1}),
            json!([]),
        ),
        (json!(["not", "an", "object"]), json!([])),
    ];
    for (payload, path) in cases {
        let json = main_json(&payload).to_json();
        assert_eq!(json["status"], "failure", "{payload}");
        assert_eq!(json["message"], VALIDATION_FAILED, "{payload}");
        assert_eq!(json["details"]["path"], path, "{payload}");
    }
}
