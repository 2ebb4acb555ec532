//! `manage` command

use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::stub_server::StubServer;
use crate::{UNREACHABLE, trello_cards};

#[test]
fn test_manage_requires_an_action() {
    let temp = TempDir::new().unwrap();
    trello_cards(UNREACHABLE, &temp)
        .args(["manage", "--card", "c1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Specify at least one action: --comment, --attachment, or --complete.",
        ));
}

#[test]
fn test_manage_runs_all_actions_in_order() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("report.txt");
    std::fs::write(&file, "all green").unwrap();
    let server = StubServer::start(vec![
        (200, r#"{"id":"action"}"#.to_string()),
        (200, r#"{"id":"attachment"}"#.to_string()),
        (200, r#"{"id":"c1","dueComplete":true}"#.to_string()),
    ]);

    trello_cards(&server.base_url, &temp)
        .args(["manage", "--card", "c1", "--comment", "Done & dusted", "--complete"])
        .arg("--attachment")
        .arg(&file)
        .assert()
        .success()
        .stdout("- Comment added.\n- Uploaded report.txt.\n- Card marked complete.\n");

    let requests = server.finish();
    assert_eq!(requests.len(), 3);

    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path(), "/1/cards/c1/actions/comments");
    assert_eq!(requests[0].body_text(), "text=Done+%26+dusted");

    assert_eq!(requests[1].method, "POST");
    assert_eq!(requests[1].path(), "/1/cards/c1/attachments");
    assert!(
        requests[1]
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data; boundary=")
    );
    let upload = requests[1].body_text();
    assert!(upload.contains("filename=\"report.txt\""));
    assert!(upload.contains("all green"));

    assert_eq!(requests[2].method, "PUT");
    assert_eq!(requests[2].path(), "/1/cards/c1");
    assert_eq!(requests[2].body_text(), "dueComplete=true");
}

#[test]
fn test_manage_stops_at_missing_attachment() {
    let temp = TempDir::new().unwrap();
    let server = StubServer::start(vec![(200, r#"{"id":"action"}"#.to_string())]);
    let missing = temp.path().join("missing.txt");

    trello_cards(&server.base_url, &temp)
        .args(["manage", "--card", "c1", "--comment", "hi", "--complete"])
        .arg("--attachment")
        .arg(&missing)
        .assert()
        .code(1)
        .stdout("- Comment added.\n")
        .stderr(predicate::str::contains("Attachment not found or not a file"));

    assert_eq!(server.finish().len(), 1);
}

#[test]
fn test_manage_complete_http_error() {
    let temp = TempDir::new().unwrap();
    let server = StubServer::start(vec![(403, "\"forbidden\"".to_string())]);

    trello_cards(&server.base_url, &temp)
        .args(["manage", "--card", "c1", "--complete"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("HTTP 403"))
        .stderr(predicate::str::contains("https://trello.com/1/authorize?key=cli-key"));
    server.finish();
}
