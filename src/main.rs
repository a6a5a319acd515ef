use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use time::Date;

use vocabulator::config::{ClientConfig, ConfigError};
use vocabulator::net::types::{ApiError, Attachment, RelatedWord, WordInput, parse_calendar_date};
use vocabulator::net::{ApiClient, MailClient};
use vocabulator::services::{ActionError, Composer, Dashboard, FlashcardDeck};
use vocabulator::state::draft::blank_draft;
use vocabulator::state::notice::{Notice, NoticeKind};
use vocabulator::state::viewer::CardFace;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io failed: {0}")]
    Io(#[from] io::Error),
    #[error("no flashcard for today")]
    NoFlashcard,
}

#[derive(Parser, Debug)]
#[command(name = "vocab", about = "Vocabulary dashboard, flashcard and bulk-email CLI")]
struct Cli {
    #[arg(long, env = "VOCAB_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Words(WordsCommand),
    Flashcards(FlashcardsCommand),
    Mail(MailCommand),
}

#[derive(Args, Debug)]
struct WordsCommand {
    #[command(subcommand)]
    command: WordsSubcommand,
}

#[derive(Subcommand, Debug)]
enum WordsSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Quick-add a word by headword alone.
    Add {
        word: String,
    },
    Create(CreateWordArgs),
    /// Replace a word with the JSON record in `--data`.
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
    Enrich {
        id: String,
    },
    Flashcard(WordFlashcardCommand),
}

#[derive(Args, Debug)]
struct CreateWordArgs {
    #[arg(long)]
    word: String,
    #[arg(long, default_value = "")]
    meaning: String,
    #[arg(long, default_value = "")]
    actual_meaning: String,
    #[arg(long, value_parser = parse_pair, help = "word=meaning")]
    synonym: Vec<RelatedWord>,
    #[arg(long, value_parser = parse_pair, help = "word=meaning")]
    antonym: Vec<RelatedWord>,
    #[arg(long)]
    sentence: Vec<String>,
    #[arg(long)]
    substitute: Vec<String>,
}

#[derive(Args, Debug)]
struct WordFlashcardCommand {
    #[command(subcommand)]
    command: WordFlashcardSubcommand,
}

#[derive(Subcommand, Debug)]
enum WordFlashcardSubcommand {
    /// Add to a flashcard; today's when no date is given.
    Add {
        id: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    Remove {
        id: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
}

#[derive(Args, Debug)]
struct FlashcardsCommand {
    #[command(subcommand)]
    command: FlashcardsSubcommand,
}

#[derive(Subcommand, Debug)]
enum FlashcardsSubcommand {
    Today,
    List {
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    Create {
        #[arg(long, value_parser = parse_date)]
        date: Date,
        #[arg(long)]
        title: Option<String>,
    },
    Complete {
        id: String,
    },
    Delete {
        id: String,
    },
    RemoveWord {
        word_id: String,
        #[arg(long, value_parser = parse_date)]
        date: Date,
    },
    /// Review today's flashcard interactively.
    Review,
}

#[derive(Args, Debug)]
struct MailCommand {
    #[command(subcommand)]
    command: MailSubcommand,
}

#[derive(Subcommand, Debug)]
enum MailSubcommand {
    Send {
        #[arg(long)]
        sender: String,
        #[arg(long, help = "Comma-separated recipient addresses")]
        to: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        #[arg(long, help = "PDF file to attach")]
        attach: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("ignoring .env: {error}");
        }
    }
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env_with(cli.api_url.as_deref())?;

    match cli.command {
        Command::Words(words) => run_words(&config, words).await,
        Command::Flashcards(flashcards) => run_flashcards(&config, flashcards).await,
        Command::Mail(mail) => run_mail(&config, mail).await,
    }
}

async fn run_words(config: &ClientConfig, words: WordsCommand) -> Result<(), CliError> {
    let dash = Dashboard::new(Arc::new(ApiClient::new(config)?), config.page_limit);

    let result = match words.command {
        WordsSubcommand::List { page, search, date } => {
            {
                let mut state = dash.state().await;
                state.list.set_search(search.as_deref().unwrap_or_default());
                state.list.set_date(date);
                state.list.seek(page);
            }
            dash.sync().await?;
            // A page past the end comes back clamped and stale.
            dash.sync().await?;
            let state = dash.state().await;
            print_json(&serde_json::json!({
                "words": state.list.words(),
                "pagination": state.list.pagination(),
            }))?;
            return Ok(());
        }
        WordsSubcommand::Add { word } => dash.quick_add(&word).await,
        WordsSubcommand::Create(args) => {
            dash.open_create().await;
            dash.edit_draft(|draft| *draft = create_draft(args)).await;
            dash.submit_modal().await
        }
        WordsSubcommand::Update { id, data } => {
            let draft = serde_json::from_str::<WordInput>(&data)?;
            dash.open_edit_with(&id, draft).await;
            dash.submit_modal().await
        }
        WordsSubcommand::Delete { id } => dash.delete(&id).await,
        WordsSubcommand::Enrich { id } => dash.enrich(&id).await,
        WordsSubcommand::Flashcard(flashcard) => match flashcard.command {
            WordFlashcardSubcommand::Add { id, date: Some(date) } => dash.add_to_date(&id, Some(date)).await,
            WordFlashcardSubcommand::Add { id, date: None } => dash.add_to_today(&id).await,
            WordFlashcardSubcommand::Remove { id, date } => dash.remove_from_flashcard(&id, date).await,
        },
    };

    print_notices(dash.state().await.notices.drain());
    result?;
    Ok(())
}

fn create_draft(args: CreateWordArgs) -> WordInput {
    let mut draft = blank_draft();
    draft.word = args.word;
    draft.user_meaning = args.meaning;
    draft.details.actual_meaning = args.actual_meaning;
    if !args.synonym.is_empty() {
        draft.synonyms = args.synonym;
    }
    if !args.antonym.is_empty() {
        draft.antonyms = args.antonym;
    }
    if !args.sentence.is_empty() {
        draft.details.sentences = args.sentence;
    }
    if !args.substitute.is_empty() {
        draft.details.one_word_substitutes = args.substitute;
    }
    draft
}

async fn run_flashcards(config: &ClientConfig, flashcards: FlashcardsCommand) -> Result<(), CliError> {
    let deck = FlashcardDeck::new(Arc::new(ApiClient::new(config)?));

    match flashcards.command {
        FlashcardsSubcommand::Today => {
            deck.fetch_today().await?;
            print_json(&deck.state().await.viewer.active())?;
        }
        FlashcardsSubcommand::List { date } => {
            deck.filter_by(date).await?;
            print_json(&deck.state().await.history)?;
        }
        FlashcardsSubcommand::Create { date, title } => {
            deck.create(Some(date), title.as_deref()).await?;
            print_json(&deck.state().await.history)?;
        }
        FlashcardsSubcommand::Complete { id } => {
            deck.complete(&id).await?;
            print_json(&deck.state().await.history)?;
        }
        FlashcardsSubcommand::Delete { id } => {
            deck.delete(&id).await?;
            print_json(&deck.state().await.history)?;
        }
        FlashcardsSubcommand::RemoveWord { word_id, date } => {
            deck.remove_word(date, &word_id).await?;
            print_json(&deck.state().await.history)?;
        }
        FlashcardsSubcommand::Review => run_review(&deck).await?,
    }
    Ok(())
}

async fn run_review(deck: &FlashcardDeck<ApiClient>) -> Result<(), CliError> {
    deck.fetch_today().await?;
    if deck.state().await.viewer.is_empty() {
        return Err(CliError::NoFlashcard);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        render_card(deck).await?;
        let Some(line) = lines.next() else {
            break;
        };
        match line?.trim() {
            "" => deck.flip().await,
            "n" => deck.next().await,
            "p" => deck.previous().await,
            "c" => {
                deck.complete_active().await?;
                eprintln!("marked as completed");
            }
            "q" => break,
            other => eprintln!("unknown key {other:?}: n next, p previous, enter flip, c complete, q quit"),
        }
    }
    Ok(())
}

async fn render_card(deck: &FlashcardDeck<ApiClient>) -> Result<(), CliError> {
    let state = deck.state().await;
    let mut out = io::stdout().lock();
    if let Some(progress) = state.viewer.progress() {
        writeln!(out, "\n{progress}")?;
    }
    match state.viewer.face() {
        Some(CardFace::Front { headword }) => writeln!(out, "  {headword}")?,
        Some(CardFace::Back { headword, user_meaning, translated, actual }) => {
            writeln!(out, "  {headword}")?;
            writeln!(out, "  meaning: {user_meaning}")?;
            if let Some(translated) = translated {
                writeln!(out, "  translated: {translated}")?;
            }
            if let Some(actual) = actual {
                writeln!(out, "  actual: {actual}")?;
            }
        }
        None => writeln!(out, "  (word not loaded)")?,
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

async fn run_mail(config: &ClientConfig, mail: MailCommand) -> Result<(), CliError> {
    let MailSubcommand::Send { sender, to, subject, message, attach } = mail.command;
    let composer = Composer::new(Arc::new(MailClient::new(config)?));

    let attachment = match attach {
        Some(path) => {
            let bytes = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map_or_else(|| "attachment.pdf".to_owned(), |name| name.to_string_lossy().into_owned());
            Some(Attachment::pdf(&file_name, bytes))
        }
        None => None,
    };

    {
        let mut state = composer.state().await;
        state.edit_sender(sender);
        state.confirm_sender();
        state.recipients = to;
        state.subject = subject;
        state.message = message;
        state.attachment = attachment;
    }

    let result = composer.submit().await;
    if result.is_err() {
        if let Some(feedback) = composer.state().await.feedback() {
            eprintln!("error: {feedback}");
        }
    }
    let status = result?;
    print_json(&serde_json::json!({ "message": status }))?;
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => eprintln!("{}", notice.text),
            NoticeKind::Error => eprintln!("error: {}", notice.text),
        }
    }
}

fn parse_date(raw: &str) -> Result<Date, String> {
    parse_calendar_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got {raw:?}"))
}

fn parse_pair(raw: &str) -> Result<RelatedWord, String> {
    let (word, meaning) = raw.split_once('=').unwrap_or((raw, ""));
    if word.trim().is_empty() {
        return Err(format!("expected word=meaning, got {raw:?}"));
    }
    Ok(RelatedWord { word: word.trim().to_owned(), meaning: meaning.trim().to_owned() })
}
