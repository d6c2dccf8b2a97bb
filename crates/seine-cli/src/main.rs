//! Seine CLI: crawl, query, report, and serve a small web search engine.

use anyhow::{Context, Result};
use clap::Parser;
use seine_fetch::PageFetcher;
use seine_html::PageExtractor;
use seine_index::{report, Analyzer, IndexStore};
use seine_search::SearchEngine;
use seine_spider::Spider;
use std::fs::File;
use std::io::BufWriter;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

mod serve;

#[derive(Parser)]
#[command(name = "seine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Small web search engine: breadth-first crawler, persistent inverted index, ranked phrase-aware retrieval", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Crawl from a seed URL and index the pages reached.
    Crawl(CrawlArgs),

    /// Query the index from the command line.
    Search(SearchArgs),

    /// Write the crawl report file.
    Report(ReportArgs),

    /// Serve the query interface over HTTP.
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct IndexArgs {
    /// Index directory.
    #[arg(long, env = "SEINE_INDEX_DIR", default_value = "seine-data")]
    index_dir: PathBuf,

    /// Stop-word file, one word per line.
    #[arg(long, env = "SEINE_STOP_WORDS", default_value = "data/stopwords.txt")]
    stop_words: PathBuf,
}

#[derive(clap::Args)]
struct CrawlArgs {
    /// Seed URL to start from.
    seed: Url,

    /// Maximum number of pages to index this session.
    #[arg(long, default_value_t = 50)]
    max_pages: usize,

    #[command(flatten)]
    index: IndexArgs,
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Free-text query; quote spans for phrase search.
    query: String,

    /// Skip the live HEAD probes for last-modified dates and sizes.
    #[arg(long)]
    no_probe: bool,

    #[command(flatten)]
    index: IndexArgs,
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Output file.
    #[arg(long, default_value = "crawl-report.txt")]
    output: PathBuf,

    #[command(flatten)]
    index: IndexArgs,
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "SEINE_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    #[command(flatten)]
    index: IndexArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Commands::Crawl(args) => run_crawl(args).await,
        Commands::Search(args) => run_search(args).await,
        Commands::Report(args) => run_report(args).await,
        Commands::Serve(args) => run_serve(args).await,
    }
}

fn open_index(args: &IndexArgs) -> Result<(IndexStore, Analyzer)> {
    let store = IndexStore::open(&args.index_dir)
        .with_context(|| format!("failed to open index at {}", args.index_dir.display()))?;
    let analyzer = Analyzer::with_stop_words_file(&args.stop_words);
    Ok((store, analyzer))
}

async fn run_crawl(args: CrawlArgs) -> Result<()> {
    let (store, analyzer) = open_index(&args.index)?;
    let fetcher = Arc::new(PageFetcher::new()?);
    let spider = Spider::new(fetcher, Arc::new(PageExtractor), analyzer);

    let summary = spider.crawl(&store, args.seed, args.max_pages).await?;
    println!(
        "indexed {} pages, recorded {} links in {:.1}s",
        summary.pages_indexed,
        summary.edges_recorded,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let (store, analyzer) = open_index(&args.index)?;
    let mut engine = SearchEngine::new(store, analyzer);
    if !args.no_probe {
        engine = engine.with_fetcher(Arc::new(PageFetcher::new()?));
    }

    let hits = engine.search(&args.query).await?;
    if hits.is_empty() {
        println!("no results");
        return Ok(());
    }

    for (rank, hit) in hits.iter().enumerate() {
        println!("{}. {} [{}]", rank + 1, hit.title, hit.normalized_score);
        println!("   {}", hit.url);
        let last_modified = hit
            .last_modified
            .map(|date| date.to_rfc2822())
            .unwrap_or_else(|| "Unknown".to_owned());
        println!("   {last_modified}, {} bytes", hit.size);
        println!("   Keywords: {}", hit.keywords_display());
        if !hit.parent_links.is_empty() {
            println!("   Parents: {}", hit.parent_links.join(", "));
        }
        if !hit.child_links.is_empty() {
            println!("   Children: {}", hit.child_links.join(", "));
        }
    }
    Ok(())
}

async fn run_report(args: ReportArgs) -> Result<()> {
    let (store, _) = open_index(&args.index)?;
    let fetcher = PageFetcher::new()?;

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    report::write_report(&store, Some(&fetcher), &mut writer).await?;
    println!("report written to {}", args.output.display());
    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let (store, analyzer) = open_index(&args.index)?;
    let engine = SearchEngine::new(store, analyzer).with_fetcher(Arc::new(PageFetcher::new()?));
    serve::run(engine, args.addr).await
}
