//! Command-line adapter.
//!
//! A thin call-through to the core services: `serve` runs the REST
//! facade, `extract` prints PDF text, `simplify` prints a summary, and
//! `chat` simplifies a document then answers questions about it in a
//! line-oriented loop.

use std::io::{BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::core::chat::{ConversationService, ConversationTurn};
use crate::core::extract;
use crate::core::llm::OpenAiCompatClient;
use crate::core::prompts::SimplificationLevel;
use crate::core::session::Session;
use crate::core::simplify::SimplificationService;
use crate::server::{self, AppState};

const WELCOME_MESSAGE: &str = "Summary complete! Feel free to ask me any questions about it.";
const DISCLAIMER: &str =
    "Disclaimer: This tool is for informational purposes only and does not constitute legal advice.";

#[derive(Parser)]
#[command(name = "plainbrief", version, about = "Legal document simplifier with follow-up chat")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the REST service
    Serve {
        /// Socket address to bind, overriding the config file
        #[arg(long)]
        bind: Option<String>,
    },
    /// Extract the plain text of a PDF
    Extract {
        /// Path to the PDF file
        file: PathBuf,
    },
    /// Simplify a document and print the summary
    Simplify {
        /// PDF file to simplify
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Legal text to simplify (reads stdin if neither --file nor --text is given)
        #[arg(long)]
        text: Option<String>,
        /// Simplification level: eli5, standard, or detailed
        #[arg(long, default_value = "standard")]
        level: SimplificationLevel,
        /// Print rendered HTML instead of raw markdown
        #[arg(long)]
        html: bool,
    },
    /// Simplify a document, then answer questions about the summary
    Chat {
        /// PDF file to simplify
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Legal text to simplify (reads stdin if neither --file nor --text is given)
        #[arg(long)]
        text: Option<String>,
        /// Simplification level: eli5, standard, or detailed
        #[arg(long, default_value = "standard")]
        level: SimplificationLevel,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();
    let client = Arc::new(OpenAiCompatClient::from_config(&config.api));

    match cli.command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let addr: SocketAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address: {bind}"))?;
            let state = Arc::new(AppState::new(client, &config));
            server::serve(state, addr).await
        }
        Command::Extract { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let text = extract::extract(&bytes)?;
            println!("{text}");
            Ok(())
        }
        Command::Simplify {
            file,
            text,
            level,
            html,
        } => {
            let document = read_document(file, text)?;
            let simplifier =
                SimplificationService::new(client, config.limits.max_document_chars);
            let result = simplifier.simplify(&document, level).await?;
            if result.truncated {
                eprintln!("note: document was truncated before simplification");
            }
            println!("{}", if html { result.html } else { result.summary });
            Ok(())
        }
        Command::Chat { file, text, level } => {
            let document = read_document(file, text)?;
            let simplifier =
                SimplificationService::new(client.clone(), config.limits.max_document_chars);
            let conversation = ConversationService::new(client);

            let mut session = Session::new();
            session.begin_simplify();
            let result = simplifier.simplify(&document, level).await?;
            session.complete_simplify(document.trim().to_string(), result.summary.clone());

            println!("{}", result.summary);
            println!();
            println!("{WELCOME_MESSAGE}");
            println!("{DISCLAIMER}");

            chat_loop(&conversation, &session).await
        }
    }
}

/// Resolve the document text: a PDF file, inline text, or stdin.
fn read_document(file: Option<PathBuf>, text: Option<String>) -> anyhow::Result<String> {
    if let Some(path) = file {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(extract::extract(&bytes)?);
    }
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buffer = String::new();
    std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
        .context("failed to read document from stdin")?;
    Ok(buffer)
}

/// Question loop over the summary. A blank line or EOF ends it; the
/// history is threaded through each call, owned here.
async fn chat_loop(conversation: &ConversationService, session: &Session) -> anyhow::Result<()> {
    let mut history: Vec<ConversationTurn> = Vec::new();
    let stdin = std::io::stdin();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            break;
        }

        match conversation.ask(question, &history, &session.summary).await {
            Ok(answer) => {
                println!("{answer}");
                history.push(ConversationTurn::user(question));
                history.push(ConversationTurn::assistant(answer));
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    Ok(())
}
