//! Card operations built on the client
//!
//! Each function is one or two sequential API calls. Responses are returned
//! as raw JSON so callers can print them verbatim or summarise them.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::client::{ApiError, FilePart, Params, TrelloClient, Transport};
use crate::paths;

/// Default number of comment actions fetched with a card
pub const DEFAULT_ACTIONS_LIMIT: u32 = 100;

const CARD_FIELDS: &[&str] = &[
    "name",
    "desc",
    "due",
    "dueComplete",
    "shortUrl",
    "shortLink",
    "dateLastActivity",
    "badges",
    "idBoard",
    "idList",
    "customFieldItems",
];

const ATTACHMENT_FIELDS: &[&str] = &[
    "name",
    "url",
    "downloadUrl",
    "bytes",
    "date",
    "edgeColor",
    "mimeType",
    "isUpload",
];

/// Errors from card operations
#[derive(Debug, Error)]
pub enum CardError {
    /// The client call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No open list on the board matched by id or name
    #[error("Cannot find list '{list}' on board {board}.")]
    ListNotFound {
        /// Requested list id or name
        list: String,
        /// Board id
        board: String,
    },

    /// A board response had no id
    #[error("Board {0} response did not include an id.")]
    MissingBoardId(String),

    /// An attachment path does not point at a regular file
    #[error("Attachment not found or not a file: {0}")]
    AttachmentNotFound(String),

    /// An attachment could not be read
    #[error("Cannot read attachment {path}: {source}")]
    AttachmentRead {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Fields for a new card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    /// Card title, trimmed before sending
    pub name: String,
    /// Target list id
    pub list_id: String,
    /// Description
    pub desc: String,
    /// Position: `top`, `bottom`, or a float
    pub pos: String,
    /// ISO 8601 due date
    pub due: Option<String>,
    /// Label ids to attach
    pub label_ids: Vec<String>,
    /// Member ids to assign
    pub member_ids: Vec<String>,
    /// URL attached at creation
    pub url_source: Option<String>,
}

impl CardDraft {
    /// Draft with default description and bottom position
    #[must_use]
    pub fn new(name: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            list_id: list_id.into(),
            desc: String::new(),
            pos: "bottom".to_string(),
            due: None,
            label_ids: Vec::new(),
            member_ids: Vec::new(),
            url_source: None,
        }
    }

    /// Form parameters for `POST /cards`
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("name", self.name.trim())
            .with("idList", &self.list_id)
            .with("desc", &self.desc)
            .with("pos", &self.pos);
        if let Some(due) = &self.due {
            params.insert("due", due);
        }
        if !self.label_ids.is_empty() {
            params.insert("idLabels", self.label_ids.join(","));
        }
        if !self.member_ids.is_empty() {
            params.insert("idMembers", self.member_ids.join(","));
        }
        if let Some(url) = &self.url_source {
            params.insert("urlSource", url);
        }
        params
    }
}

/// Fetch board metadata (`id`, `name`, `shortLink`)
pub fn fetch_board<T: Transport>(client: &TrelloClient<T>, board: &str) -> Result<Value, ApiError> {
    client.get(
        &format!("/boards/{board}"),
        &Params::new().with("fields", "id,name,shortLink"),
    )
}

/// Fetch the open lists on a board
pub fn fetch_lists<T: Transport>(client: &TrelloClient<T>, board_id: &str) -> Result<Value, ApiError> {
    client.get(
        &format!("/boards/{board_id}/lists"),
        &Params::new().with("fields", "id,name").with("filter", "open"),
    )
}

/// Find a list by exact id or case-insensitive name
#[must_use]
pub fn find_list<'a>(lists: &'a Value, list_ref: &str) -> Option<&'a Value> {
    let wanted = list_ref.trim().to_lowercase();
    lists.as_array()?.iter().find(|candidate| {
        candidate.get("id").and_then(Value::as_str) == Some(list_ref)
            || candidate
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.trim().to_lowercase() == wanted)
    })
}

/// Resolve a list reference on a board to its JSON object
pub fn resolve_list<T: Transport>(
    client: &TrelloClient<T>,
    board_id: &str,
    list_ref: &str,
) -> Result<Value, CardError> {
    let lists = fetch_lists(client, board_id)?;
    find_list(&lists, list_ref)
        .cloned()
        .ok_or_else(|| CardError::ListNotFound {
            list: list_ref.to_string(),
            board: board_id.to_string(),
        })
}

/// Create a card
pub fn create_card<T: Transport>(client: &TrelloClient<T>, draft: &CardDraft) -> Result<Value, ApiError> {
    client.post("/cards", &draft.to_params())
}

/// Query parameters for fetching a card with its context
#[must_use]
pub fn card_params(actions_limit: u32) -> Params {
    Params::new()
        .with("fields", CARD_FIELDS.join(","))
        .with("attachments", "true")
        .with("attachment_fields", ATTACHMENT_FIELDS.join(","))
        .with("labels", "true")
        .with("label_fields", "name,color")
        .with("members", "true")
        .with("member_fields", "fullName,username")
        .with("actions", "commentCard")
        .with("actions_limit", actions_limit)
        .with("actions_fields", "id,date,memberCreator,data")
}

/// Fetch a card with attachments, labels, members, and comments
pub fn load_card<T: Transport>(
    client: &TrelloClient<T>,
    card_id: &str,
    actions_limit: u32,
) -> Result<Value, ApiError> {
    client.get(&format!("/cards/{card_id}"), &card_params(actions_limit))
}

/// Post a comment on a card
pub fn add_comment<T: Transport>(client: &TrelloClient<T>, card_id: &str, text: &str) -> Result<Value, ApiError> {
    client.post(
        &format!("/cards/{card_id}/actions/comments"),
        &Params::new().with("text", text),
    )
}

/// Check that every attachment path is an existing regular file
///
/// A leading `~` is expanded. Nothing is uploaded unless all paths pass.
pub fn validate_attachments<S: AsRef<str>>(raw_paths: &[S]) -> Result<Vec<PathBuf>, CardError> {
    raw_paths
        .iter()
        .map(|raw| {
            let path = paths::expand_home(raw.as_ref());
            if path.is_file() {
                Ok(path)
            } else {
                Err(CardError::AttachmentNotFound(raw.as_ref().to_string()))
            }
        })
        .collect()
}

/// Upload a file as a card attachment
pub fn upload_attachment<T: Transport>(
    client: &TrelloClient<T>,
    card_id: &str,
    path: &Path,
) -> Result<Value, CardError> {
    let bytes = std::fs::read(path).map_err(|source| CardError::AttachmentRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = paths::file_name(path);
    let files = [FilePart::new("file", name.clone(), bytes)];
    let value = client.post_files(
        &format!("/cards/{card_id}/attachments"),
        &Params::new().with("name", name),
        &files,
    )?;
    Ok(value)
}

/// Mark a card complete
///
/// `dueComplete` is sent as the string `"true"`, which is what the API
/// accepts in form bodies.
pub fn mark_complete<T: Transport>(client: &TrelloClient<T>, card_id: &str) -> Result<Value, ApiError> {
    client.put(
        &format!("/cards/{card_id}"),
        &Params::new().with("dueComplete", "true"),
    )
}
