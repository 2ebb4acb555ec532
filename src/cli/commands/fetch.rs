//! Fetch a card as prompt context

use trello_cards::cards;
use trello_cards::client::TrelloClient;
use trello_cards::config::Config;
use trello_cards::format;
use trello_cards::output::{self, OutputMode};

/// Fetch a card with its comments and attachments and print it
pub fn fetch(config: Config, card_id: &str, actions_limit: u32, mode: OutputMode) -> anyhow::Result<()> {
    let client = TrelloClient::new(config)?;
    let card = cards::load_card(&client, card_id, actions_limit)?;
    println!("{}", output::render(&card, mode, format::markdown_summary));
    Ok(())
}
