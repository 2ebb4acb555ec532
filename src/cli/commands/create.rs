//! Create a card on a board/list

use anyhow::Context;
use serde_json::Value;

use trello_cards::cards::{self, CardDraft, CardError};
use trello_cards::client::TrelloClient;
use trello_cards::config::Config;
use trello_cards::format;
use trello_cards::output::{self, OutputMode};

/// Arguments for `create`
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Board short link or id
    pub board: String,
    /// List name or id
    pub list_ref: String,
    /// Card title
    pub name: String,
    /// Description
    pub desc: String,
    /// Due date
    pub due: Option<String>,
    /// Position
    pub pos: String,
    /// Label ids
    pub label_ids: Vec<String>,
    /// Member ids
    pub member_ids: Vec<String>,
    /// URL to attach
    pub url_source: Option<String>,
}

/// Look up the board and list, create the card, print it
pub fn create(config: Config, request: &CreateRequest, mode: OutputMode) -> anyhow::Result<()> {
    let client = TrelloClient::new(config)?;

    let board = cards::fetch_board(&client, &request.board)?;
    let board_id = board
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| CardError::MissingBoardId(request.board.clone()))?;
    let list = cards::resolve_list(&client, board_id, &request.list_ref)?;
    let list_id = list
        .get("id")
        .and_then(Value::as_str)
        .context("list response did not include an id")?;

    let draft = CardDraft {
        desc: request.desc.clone(),
        pos: request.pos.clone(),
        due: request.due.clone(),
        label_ids: request.label_ids.clone(),
        member_ids: request.member_ids.clone(),
        url_source: request.url_source.clone(),
        ..CardDraft::new(&request.name, list_id)
    };
    log::debug!("creating card {:?} in list {list_id}", draft.name);
    let card = cards::create_card(&client, &draft)?;

    println!(
        "{}",
        output::render(&card, mode, |card| format::created_summary(card, &board, &list))
    );
    Ok(())
}
