//! Tests for card operations against a mock transport

use serde_json::json;
use tempfile::TempDir;
use trello_cards::cards::{self, CardDraft, CardError, DEFAULT_ACTIONS_LIMIT};
use trello_cards::client::{Method, TrelloClient};

use crate::common::fixtures::{self, config, mock_client};
use crate::common::mocks::MockTransport;

fn form(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_string(), v.to_string())
}

// =============================================================================
// LISTS
// =============================================================================

#[test]
fn test_find_list_by_id() {
    let lists = fixtures::lists();
    let found = cards::find_list(&lists, "list-3").unwrap();
    assert_eq!(found["name"], "Done");
}

#[test]
fn test_find_list_by_name_case_insensitive_trimmed() {
    let lists = fixtures::lists();
    let found = cards::find_list(&lists, "in progress").unwrap();
    assert_eq!(found["id"], "list-2");
    let found = cards::find_list(&lists, "  BACKLOG ").unwrap();
    assert_eq!(found["id"], "list-1");
}

#[test]
fn test_find_list_missing_or_not_array() {
    assert!(cards::find_list(&fixtures::lists(), "Archive").is_none());
    assert!(cards::find_list(&json!({"id": "x"}), "x").is_none());
}

#[test]
fn test_resolve_list_requests_open_lists() {
    let client = mock_client(vec![(200, fixtures::lists())]);
    let list = cards::resolve_list(&client, "board-1", "Done").unwrap();
    assert_eq!(list["id"], "list-3");

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.contains("/boards/board-1/lists?fields=id%2Cname&filter=open&"));
}

#[test]
fn test_resolve_list_not_found() {
    let client = mock_client(vec![(200, fixtures::lists())]);
    let err = cards::resolve_list(&client, "board-1", "Archive").unwrap_err();
    assert!(matches!(err, CardError::ListNotFound { .. }));
    assert_eq!(err.to_string(), "Cannot find list 'Archive' on board board-1.");
}

#[test]
fn test_resolve_list_passes_api_error_through() {
    let client = mock_client(vec![(404, json!("not found"))]);
    let err = cards::resolve_list(&client, "board-1", "Done").unwrap_err();
    assert!(matches!(err, CardError::Api(_)));
    assert!(err.to_string().starts_with("HTTP 404"));
}

// =============================================================================
// CREATE
// =============================================================================

#[test]
fn test_draft_minimal_params() {
    let draft = CardDraft::new("  Write docs ", "list-2");
    assert_eq!(
        draft.to_params().to_urlencoded(),
        "name=Write+docs&idList=list-2&desc=&pos=bottom"
    );
}

#[test]
fn test_draft_full_params() {
    let draft = CardDraft {
        desc: "Details".to_string(),
        pos: "top".to_string(),
        due: Some("2024-05-01T09:00:00Z".to_string()),
        label_ids: vec!["l1".to_string(), "l2".to_string()],
        member_ids: vec!["m1".to_string()],
        url_source: Some("https://example.test/design".to_string()),
        ..CardDraft::new("Card", "list-1")
    };
    let params = draft.to_params();
    assert_eq!(params.get("due"), Some("2024-05-01T09:00:00Z"));
    assert_eq!(params.get("idLabels"), Some("l1,l2"));
    assert_eq!(params.get("idMembers"), Some("m1"));
    assert_eq!(params.get("urlSource"), Some("https://example.test/design"));
    assert_eq!(params.get("pos"), Some("top"));
}

#[test]
fn test_create_card_posts_form() {
    let client = mock_client(vec![(200, fixtures::created_card())]);
    let card = cards::create_card(&client, &CardDraft::new("Write docs", "list-2")).unwrap();
    assert_eq!(card["id"], "card-9");

    let request = &client.transport().requests()[0];
    assert_eq!(request.method, Method::Post);
    assert!(request.url.contains("/cards?key="));
    assert_eq!(
        form(&request.body),
        [
            pair("name", "Write docs"),
            pair("idList", "list-2"),
            pair("desc", ""),
            pair("pos", "bottom"),
        ]
    );
}

#[test]
fn test_fetch_board_fields() {
    let client = mock_client(vec![(200, fixtures::board())]);
    let board = cards::fetch_board(&client, "abc123").unwrap();
    assert_eq!(board["name"], "Roadmap");
    let url = &client.transport().requests()[0].url;
    assert!(url.contains("/boards/abc123?fields=id%2Cname%2CshortLink&key="));
}

// =============================================================================
// FETCH
// =============================================================================

#[test]
fn test_card_params() {
    let params = cards::card_params(DEFAULT_ACTIONS_LIMIT);
    assert_eq!(params.get("actions"), Some("commentCard"));
    assert_eq!(params.get("actions_limit"), Some("100"));
    assert_eq!(params.get("attachments"), Some("true"));
    assert_eq!(params.get("member_fields"), Some("fullName,username"));
    assert!(params.get("fields").unwrap().contains("dueComplete"));
    assert!(params.get("attachment_fields").unwrap().contains("mimeType"));
}

#[test]
fn test_load_card_uses_get_with_limit() {
    let client = mock_client(vec![(200, fixtures::full_card())]);
    let card = cards::load_card(&client, "abc", 5).unwrap();
    assert_eq!(card, fixtures::full_card());

    let request = &client.transport().requests()[0];
    assert_eq!(request.method, Method::Get);
    assert!(request.body.is_empty());
    assert!(request.url.contains("/cards/abc?"));
    assert!(request.url.contains("actions_limit=5"));
}

// =============================================================================
// MANAGE
// =============================================================================

#[test]
fn test_add_comment() {
    let client = mock_client(vec![(200, json!({"id": "action-1"}))]);
    cards::add_comment(&client, "c1", "Looks good!").unwrap();
    let request = &client.transport().requests()[0];
    assert!(request.url.contains("/cards/c1/actions/comments?"));
    assert_eq!(request.body, b"text=Looks+good%21");
}

#[test]
fn test_mark_complete_sends_string_true() {
    let client = mock_client(vec![(200, json!({"id": "c1", "dueComplete": true}))]);
    cards::mark_complete(&client, "c1").unwrap();
    let request = &client.transport().requests()[0];
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.body, b"dueComplete=true");
}

#[test]
fn test_validate_attachments_all_present() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.txt");
    let b = temp.path().join("b.png");
    std::fs::write(&a, "a").unwrap();
    std::fs::write(&b, "b").unwrap();

    let paths = cards::validate_attachments(&[
        a.to_string_lossy().into_owned(),
        b.to_string_lossy().into_owned(),
    ])
    .unwrap();
    assert_eq!(paths, [a, b]);
}

#[test]
fn test_validate_attachments_rejects_missing_and_directories() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_string_lossy().into_owned();
    let err = cards::validate_attachments(&[dir.clone()]).unwrap_err();
    assert_eq!(err.to_string(), format!("Attachment not found or not a file: {dir}"));

    let err = cards::validate_attachments(&["/definitely/not/here.txt"]).unwrap_err();
    assert!(matches!(err, CardError::AttachmentNotFound(_)));
}

#[test]
fn test_upload_attachment_multipart() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    std::fs::write(&path, "# Notes").unwrap();

    let client = mock_client(vec![(200, json!({"id": "att-1"}))]);
    let value = cards::upload_attachment(&client, "c1", &path).unwrap();
    assert_eq!(value["id"], "att-1");

    let request = &client.transport().requests()[0];
    assert!(request.url.contains("/cards/c1/attachments?key="));
    let content_type = request.content_type.as_deref().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    let body = String::from_utf8(request.body.clone()).unwrap();
    assert!(body.contains("name=\"name\"\r\n\r\nnotes.txt\r\n"));
    assert!(body.contains("name=\"file\"; filename=\"notes.txt\"\r\nContent-Type: text/plain"));
    assert!(body.contains("# Notes"));
}

#[test]
fn test_upload_attachment_missing_file() {
    let client = TrelloClient::with_transport(config(), MockTransport::new());
    let err = cards::upload_attachment(&client, "c1", std::path::Path::new("/nope/x.bin")).unwrap_err();
    assert!(matches!(err, CardError::AttachmentRead { .. }));
    assert!(client.transport().requests().is_empty());
}
