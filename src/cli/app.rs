//! CLI definitions and entry point

use clap::{Parser, Subcommand, ValueEnum};

use super::commands;
use trello_cards::cards::DEFAULT_ACTIONS_LIMIT;
use trello_cards::config::Config;
use trello_cards::output::OutputMode;

/// trello-cards - Trello cards as working context
#[derive(Parser, Debug)]
#[command(
    name = "trello-cards",
    version,
    about = "Create, fetch, and update Trello cards",
    long_about = "Create, fetch, and update Trello cards for use as working context.\n\n\
                  Credentials come from TRELLO_API_KEY and TRELLO_TOKEN (or the config file).\n\
                  Run 'trello-cards auth-url' to get a link that grants a token."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a card on a board/list and print the card details
    Create {
        /// Board short link or full ID
        #[arg(long)]
        board: String,

        /// List name (case-insensitive) or list ID on the board
        #[arg(long = "list")]
        list_ref: String,

        /// Title for the new card
        #[arg(long)]
        name: String,

        /// Card description
        #[arg(long, default_value = "")]
        desc: String,

        /// ISO 8601 due date/time
        #[arg(long)]
        due: Option<String>,

        /// Card position (top, bottom, or fractional value)
        #[arg(long, default_value = "bottom")]
        pos: String,

        /// Label ID to attach (repeatable)
        #[arg(long = "label", value_name = "LABEL_ID")]
        label_ids: Vec<String>,

        /// Member ID to assign to the card (repeatable)
        #[arg(long = "member", value_name = "MEMBER_ID")]
        member_ids: Vec<String>,

        /// URL to attach to the card when creating it
        #[arg(long)]
        url_source: Option<String>,

        /// Output format for the created card
        #[arg(long, value_enum, default_value_t = CreateFormat::Summary)]
        format: CreateFormat,
    },

    /// Fetch a card with comments and attachments for use as prompt context
    Fetch {
        /// Card short link or full card ID
        card_id: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = FetchFormat::Markdown)]
        format: FetchFormat,

        /// Maximum number of comment actions to fetch
        #[arg(long, default_value_t = DEFAULT_ACTIONS_LIMIT)]
        actions_limit: u32,
    },

    /// Leave comments, upload attachments, or mark a card as complete
    Manage {
        /// Card short link or full ID
        #[arg(long)]
        card: String,

        /// Text to add as a comment on the card
        #[arg(long)]
        comment: Option<String>,

        /// Path to a file to upload (repeatable)
        #[arg(long = "attachment", value_name = "PATH")]
        attachments: Vec<String>,

        /// Mark the card as complete (sets dueComplete to true)
        #[arg(long)]
        complete: bool,
    },

    /// Print the link that grants an access token for the configured key
    AuthUrl,
}

/// Output formats for `create`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CreateFormat {
    /// Short confirmation
    Summary,
    /// Raw API response
    Json,
}

/// Output formats for `fetch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchFormat {
    /// Markdown digest
    Markdown,
    /// Raw API response
    Json,
}

impl From<CreateFormat> for OutputMode {
    fn from(format: CreateFormat) -> Self {
        match format {
            CreateFormat::Summary => Self::Human,
            CreateFormat::Json => Self::Json,
        }
    }
}

impl From<FetchFormat> for OutputMode {
    fn from(format: FetchFormat) -> Self {
        match format {
            FetchFormat::Markdown => Self::Human,
            FetchFormat::Json => Self::Json,
        }
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = Config::load()?;
    log::debug!("{config:?}");

    match cli.command {
        Command::Create {
            board,
            list_ref,
            name,
            desc,
            due,
            pos,
            label_ids,
            member_ids,
            url_source,
            format,
        } => {
            let request = commands::CreateRequest {
                board,
                list_ref,
                name,
                desc,
                due,
                pos,
                label_ids,
                member_ids,
                url_source,
            };
            commands::create(config, &request, format.into())
        },
        Command::Fetch {
            card_id,
            format,
            actions_limit,
        } => commands::fetch(config, &card_id, actions_limit, format.into()),
        Command::Manage {
            card,
            comment,
            attachments,
            complete,
        } => {
            let request = commands::ManageRequest {
                card,
                comment,
                attachments,
                complete,
            };
            commands::manage(config, &request)
        },
        Command::AuthUrl => commands::auth_url(&config),
    }
}
