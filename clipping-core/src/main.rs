use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clipping_core::filter::{category_options, platform_options};
use clipping_core::fixtures::mock_store;
use clipping_core::utils::time::{format_date_br, parse_iso_date};
use clipping_core::{
    ClassifierConfig, ClientId, ContentId, ContentKind, DocumentWriter, FilterCriteria,
    GeminiBackend, JsonDocumentWriter, MockSentimentBackend, PdfDocumentWriter, ReportRequest, Role,
    SentimentBackend, SentimentClassifier, Session, TextDocumentWriter,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "clipping", about = "Media monitoring over the built-in mock dataset")]
struct Cli {
    /// admin, assessor or client
    #[arg(long, default_value = "admin")]
    role: String,

    /// Client scope applied to every view (ignored for the client role)
    #[arg(long)]
    client: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List news articles
    News {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List social media posts
    Social {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        platform: Option<String>,
    },
    /// Show dashboard metrics and chart data
    Dashboard,
    /// List the values accepted by --category, --platform and --client
    Options,
    /// Compile a report and write it to disk
    Report {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        /// Last day (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        /// Repeat to select several clients; none means all
        #[arg(long = "for-client")]
        clients: Vec<String>,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Pdf)]
        format: Format,
    },
    /// Run sentiment analysis on one item or on every pending item
    Analyze {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long, required_unless_present = "all")]
        id: Option<String>,
        #[arg(long)]
        all: bool,
        /// Use the keyword-based mock backend instead of the API
        #[arg(long)]
        offline: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Article,
    Post,
}

impl From<Kind> for ContentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Article => ContentKind::Article,
            Kind::Post => ContentKind::Post,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let role: Role = cli.role.parse()?;

    let mut session = Session::login(role, mock_store()?);
    if let Some(client) = cli.client {
        if role == Role::Client {
            warn!("Client role is locked to its own account; ignoring --client");
        } else {
            session.set_client_scope(Some(ClientId::new(client))).await?;
        }
    }

    match cli.command {
        Command::News { search, category } => {
            let mut criteria = FilterCriteria::new();
            criteria.search = search;
            if let Some(category) = category {
                criteria = criteria.with_category(category.parse()?);
            }
            let feed = session.news_feed(criteria).await;
            if feed.is_empty_match() {
                println!("Nenhuma notícia encontrada com os filtros selecionados.");
            }
            for article in &feed.items {
                println!(
                    "[{}] {} | {} | {} | {} | {}",
                    article.id,
                    format_date_br(article.date),
                    article.category,
                    article.client,
                    article.sentiment,
                    article.title
                );
            }
        }
        Command::Social { search, platform } => {
            let mut criteria = FilterCriteria::new();
            criteria.search = search;
            if let Some(platform) = platform {
                criteria = criteria.with_platform(platform.parse()?);
            }
            let feed = session.social_feed(criteria).await;
            if feed.is_empty_match() {
                println!("Nenhum post encontrado com os filtros selecionados.");
            }
            for post in &feed.items {
                println!(
                    "[{}] {} | {} | {} | {} | {} curtidas | {}",
                    post.id,
                    format_date_br(post.date),
                    post.platform,
                    post.client,
                    post.sentiment,
                    post.likes,
                    post.content
                );
            }
        }
        Command::Dashboard => {
            let summary = session.dashboard().await;
            for metric in summary.metrics() {
                println!(
                    "{}: {} ({} vs mês passado, ilustrativo)",
                    metric.title, metric.value, metric.change.text
                );
            }
            println!("\nDistribuição de Sentimento:");
            for point in summary.sentiment_distribution() {
                println!("  {}: {}", point.name, point.value);
            }
            println!("\nNotícias por Categoria:");
            for point in summary.category_chart() {
                println!("  {}: {}", point.name, point.value);
            }
            println!("\nPosts por Plataforma:");
            for point in summary.platform_chart() {
                println!("  {}: {}", point.name, point.value);
            }
        }
        Command::Options => {
            println!("Categorias:");
            for category in category_options() {
                println!("  {}", category);
            }
            println!("\nPlataformas:");
            for platform in platform_options() {
                println!("  {}", platform);
            }
            println!("\nClientes:");
            let store = session.store();
            for client in store.read().await.roster().clients() {
                println!("  {}", client);
            }
        }
        Command::Report {
            start,
            end,
            clients,
            out,
            format,
        } => {
            let start = start
                .as_deref()
                .map(parse_iso_date)
                .transpose()
                .context("invalid --start")?;
            let end = end
                .as_deref()
                .map(parse_iso_date)
                .transpose()
                .context("invalid --end")?;
            let clients = clients.into_iter().map(ClientId::new).collect();
            let request = ReportRequest::new(start, end, clients);

            let document = session.compile_report(&request).await?;
            let path = match format {
                Format::Pdf => PdfDocumentWriter::new(session.layout()).write_to(&document, &out)?,
                Format::Text => TextDocumentWriter.write_to(&document, &out)?,
                Format::Json => JsonDocumentWriter.write_to(&document, &out)?,
            };
            println!("{}", path.display());
        }
        Command::Analyze {
            kind,
            id,
            all,
            offline,
        } => {
            if offline {
                let classifier =
                    SentimentClassifier::new(MockSentimentBackend::new("offline".to_string()));
                run_analysis(&session, &classifier, kind.into(), id, all).await?;
            } else {
                let backend = GeminiBackend::new(ClassifierConfig::from_env()?)?;
                let classifier = SentimentClassifier::new(backend);
                run_analysis(&session, &classifier, kind.into(), id, all).await?;
            }
        }
    }

    Ok(())
}

async fn run_analysis<B: SentimentBackend>(
    session: &Session,
    classifier: &SentimentClassifier<B>,
    kind: ContentKind,
    id: Option<String>,
    all: bool,
) -> anyhow::Result<()> {
    info!("Using {}", classifier.backend().backend_name());

    if all {
        for (id, result) in session.analyze_pending(kind, classifier).await? {
            match result {
                Ok(sentiment) => println!("{} {}: {}", kind, id, sentiment),
                Err(e) => error!("{} {}: {}", kind, id, e),
            }
        }
        return Ok(());
    }

    let id = ContentId::new(id.context("--id is required without --all")?);
    let sentiment = session.analyze(kind, &id, classifier).await?;
    println!("{} {}: {}", kind, id, sentiment);
    Ok(())
}
