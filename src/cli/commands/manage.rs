//! Comment on, attach files to, or complete a card

use trello_cards::cards;
use trello_cards::client::TrelloClient;
use trello_cards::config::Config;
use trello_cards::output::ActionStatus;

/// Arguments for `manage`
#[derive(Debug, Clone, Default)]
pub struct ManageRequest {
    /// Card short link or id
    pub card: String,
    /// Comment text
    pub comment: Option<String>,
    /// Attachment paths
    pub attachments: Vec<String>,
    /// Mark the card complete
    pub complete: bool,
}

impl ManageRequest {
    /// Whether any action was requested
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.is_empty())
            || !self.attachments.is_empty()
            || self.complete
    }
}

/// Run the requested actions in order: comment, attachments, complete
///
/// Each success is printed as it happens; the first failure stops the run.
pub fn manage(config: Config, request: &ManageRequest) -> anyhow::Result<()> {
    if !request.has_action() {
        anyhow::bail!("Specify at least one action: --comment, --attachment, or --complete.");
    }

    let client = TrelloClient::new(config)?;

    if let Some(comment) = request.comment.as_deref().filter(|c| !c.is_empty()) {
        cards::add_comment(&client, &request.card, comment)?;
        ActionStatus("Comment added.".to_string()).print();
    }

    if !request.attachments.is_empty() {
        let paths = cards::validate_attachments(&request.attachments)?;
        for path in paths {
            cards::upload_attachment(&client, &request.card, &path)?;
            let name = trello_cards::paths::file_name(&path);
            ActionStatus(format!("Uploaded {name}.")).print();
        }
    }

    if request.complete {
        cards::mark_complete(&client, &request.card)?;
        ActionStatus("Card marked complete.".to_string()).print();
    }

    Ok(())
}
