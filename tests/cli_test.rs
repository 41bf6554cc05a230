//! CLI integration tests for hyper-schema binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("hyper-schema"))
}

// Helper to create a temp document file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

mod annotate_command {
    use super::*;

    const PERSON: &str = r#"{
        "id": 123,
        "collectionName": "people",
        "links": [
            { "rel": "custom", "href": "/people/custom" },
            { "rel": "item", "href": "/people/override/item" }
        ],
        "properties": {
            "spouse": { "$ref": "/json-schemas/123" },
            "homepage": { "type": "string", "href": "/home" }
        }
    }"#;

    #[test]
    fn annotate_with_base_url() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);

        let output = cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let body = stdout_json(&output);
        let links = body["links"].as_array().unwrap();
        assert_eq!(links.len(), 5);
        assert_eq!(links[1]["href"], "http://example.org/api/people/{id}");
        assert_eq!(links[4]["href"], "http://example.org/api/people/custom");
        assert_eq!(
            body["properties"]["spouse"]["$ref"],
            "http://example.org/api/json-schemas/123"
        );
        assert_eq!(body["properties"]["homepage"]["href"], "/home");
        assert_eq!(
            body["$schema"],
            "http://json-schema.org/draft-04/hyper-schema#"
        );
    }

    #[test]
    fn annotate_with_request_url() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "car.json", r#"{"id": 7}"#);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--request-url",
                "http://example.org/rest/cars/7",
                "--api-root",
                "/rest",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#""href":"http://example.org/rest/cars/{id}""#,
            ));
    }

    #[test]
    fn annotate_prints_headers() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
                "--headers",
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Content-Type: application/json; profile=http://example.org/api/json-schemas/123\n\
                 Link: <http://example.org/api/json-schemas/123>; rel=describedby\n\n",
            ));
    }

    #[test]
    fn annotate_collection_override() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
                "--collection",
                "humans",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://example.org/api/humans/{id}"));
    }

    #[test]
    fn annotate_document_collection_beats_request_url() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--request-url",
                "http://example.org/api/json-schemas",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://example.org/api/people/{id}"))
            .stdout(predicate::str::contains("json-schemas/{id}").not());
    }

    #[test]
    fn annotate_to_output_file() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);
        let output = dir.path().join("out.json");

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
                "--output",
                output.to_str().unwrap(),
                "--pretty",
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("{\n"));
        assert!(content.contains("\"rel\": \"delete\""));
    }

    #[test]
    fn annotate_requires_base() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);

        cmd()
            .args(["annotate", doc.to_str().unwrap()])
            .assert()
            .failure();
    }

    #[test]
    fn annotate_rejects_both_bases() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
                "--request-url",
                "http://example.org/api/people",
            ])
            .assert()
            .failure();
    }

    #[test]
    fn annotate_missing_collection() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "anon.json", r#"{"id": 1}"#);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no collection name"));
    }

    #[test]
    fn annotate_invalid_links() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "bad.json", r#"{"collectionName": "x", "links": {}}"#);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("links must be an array"));
    }

    #[test]
    fn annotate_request_url_outside_root() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "person.json", PERSON);

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--request-url",
                "http://example.org/people/1",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("outside the API root"));
    }

    #[test]
    fn annotate_file_not_found() {
        cmd()
            .args([
                "annotate",
                "/nonexistent/person.json",
                "--base-url",
                "http://example.org/api",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn annotate_invalid_json() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "broken.json", "{ not json");

        cmd()
            .args([
                "annotate",
                doc.to_str().unwrap(),
                "--base-url",
                "http://example.org/api",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }
}

mod links_command {
    use super::*;

    #[test]
    fn default_links_only() {
        let output = cmd()
            .args([
                "links",
                "--base-url",
                "http://example.org/api",
                "--collection",
                "people",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let links = stdout_json(&output);
        assert_eq!(
            links,
            serde_json::json!([
                { "rel": "self", "href": "http://example.org/api/people/{id}" },
                { "rel": "item", "href": "http://example.org/api/people/{id}" },
                { "rel": "update", "method": "PUT", "href": "http://example.org/api/people/{id}" },
                { "rel": "delete", "method": "DELETE", "href": "http://example.org/api/people/{id}" }
            ])
        );
    }

    #[test]
    fn existing_links_array() {
        let dir = TempDir::new().unwrap();
        let existing = write_temp_file(
            &dir,
            "links.json",
            r#"[{"rel": "self", "href": "/nope"}, {"rel": "search", "href": "/people{?q}"}]"#,
        );

        let output = cmd()
            .args([
                "links",
                "--base-url",
                "http://example.org/api",
                "--collection",
                "people",
                "--existing",
                existing.to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let links = stdout_json(&output);
        assert_eq!(links.as_array().unwrap().len(), 5);
        assert_eq!(links[0]["href"], "http://example.org/api/people/{id}");
        assert_eq!(links[4]["href"], "http://example.org/api/people{?q}");
    }

    #[test]
    fn existing_document_links() {
        let dir = TempDir::new().unwrap();
        let existing = write_temp_file(
            &dir,
            "doc.json",
            r#"{"links": [{"rel": "custom", "href": "http://other.org/c"}]}"#,
        );

        cmd()
            .args([
                "links",
                "--base-url",
                "http://example.org/api",
                "--collection",
                "people",
                "--existing",
                existing.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""href":"http://other.org/c""#));
    }

    #[test]
    fn relative_base_url_rejected() {
        cmd()
            .args(["links", "--base-url", "/api", "--collection", "people"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid request URL"));
    }

    #[test]
    fn base_url_trailing_slash_normalized() {
        cmd()
            .args([
                "links",
                "--base-url",
                "http://example.org/api/",
                "--collection",
                "people",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#""href":"http://example.org/api/people/{id}""#,
            ));
    }

    #[test]
    fn existing_scalar_rejected() {
        let dir = TempDir::new().unwrap();
        let existing = write_temp_file(&dir, "links.json", "42");

        cmd()
            .args([
                "links",
                "--base-url",
                "http://example.org/api",
                "--collection",
                "people",
                "--existing",
                existing.to_str().unwrap(),
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("got number"));
    }
}

mod absolutize_command {
    use super::*;

    const BODY: &str = r#"{
        "links": [{ "rel": "a", "href": "/a" }],
        "properties": { "p": { "href": "/p", "$ref": "/defs/p" } }
    }"#;

    #[test]
    fn body_scope_by_default() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "body.json", BODY);

        let output = cmd()
            .args(["absolutize", doc.to_str().unwrap(), "--base-url", "http://h/api"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let body = stdout_json(&output);
        assert_eq!(body["links"][0]["href"], "http://h/api/a");
        assert_eq!(body["properties"]["p"]["href"], "/p");
        assert_eq!(body["properties"]["p"]["$ref"], "http://h/api/defs/p");
    }

    #[test]
    fn links_scope_everywhere() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "body.json", BODY);

        let output = cmd()
            .args([
                "absolutize",
                doc.to_str().unwrap(),
                "--base-url",
                "http://h/api",
                "--scope",
                "links",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let body = stdout_json(&output);
        assert_eq!(body["properties"]["p"]["href"], "http://h/api/p");
    }

    #[test]
    fn body_scope_rejects_array() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "list.json", r#"[{"href": "/a"}]"#);

        cmd()
            .args(["absolutize", doc.to_str().unwrap(), "--base-url", "http://h/api"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not a traversable JSON object"));
    }

    #[test]
    fn array_with_properties_scope() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "list.json", r#"[{"href": "/a", "$ref": "/b"}]"#);

        cmd()
            .args([
                "absolutize",
                doc.to_str().unwrap(),
                "--base-url",
                "http://h/api",
                "--scope",
                "properties",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"[{"href":"/a","$ref":"http://h/api/b"}]"#,
            ));
    }
}

mod headers_command {
    use super::*;

    #[test]
    fn prints_both_headers() {
        cmd()
            .args(["headers", "--base-url", "http://example.org/api", "--id", "123"])
            .assert()
            .success()
            .stdout(
                "Content-Type: application/json; profile=http://example.org/api/json-schemas/123\n\
                 Link: <http://example.org/api/json-schemas/123>; rel=describedby\n",
            );
    }
}
