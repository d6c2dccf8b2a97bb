//! Crawl report: a plain-text summary of every indexed document.
//!
//! Entries appear in URL iteration order. Last-modified dates and sizes are
//! resolved against the live origin when a fetcher is supplied; otherwise
//! (or when the probe fails) they fall back to `Unknown` and `0`.

use crate::error::Result;
use crate::store::IndexStore;
use seine_types::Fetcher;
use std::io::Write;
use tracing::info;
use url::Url;

const SEPARATOR: &str = "-----------------------------------------";
const MAX_REPORT_KEYWORDS: usize = 20;
const MAX_REPORT_LINKS: usize = 10;
const UNTITLED: &str = "Untitled";

struct ReportEntry {
    url: String,
    title: String,
    keywords: Vec<(String, u32)>,
    child_links: Vec<String>,
}

/// Write the crawl report for every indexed document to `out`.
pub async fn write_report<W: Write>(
    store: &IndexStore,
    fetcher: Option<&dyn Fetcher>,
    out: &mut W,
) -> Result<()> {
    // Collect everything from one snapshot before probing the network, so
    // no transaction is held across awaits.
    let mut entries = Vec::new();
    {
        let rtxn = store.read_txn()?;
        for pair in store.urls.iter(&rtxn)? {
            let (url, doc_id) = pair?;
            let title = store
                .titles
                .get(&rtxn, doc_id)?
                .unwrap_or_else(|| UNTITLED.to_owned());

            let mut keywords: Vec<(String, u32)> = store
                .doc_terms
                .get(&rtxn, doc_id)?
                .unwrap_or_default()
                .into_iter()
                .collect();
            keywords.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            keywords.truncate(MAX_REPORT_KEYWORDS);

            let child_links = store.links.children(&rtxn, doc_id, MAX_REPORT_LINKS)?;

            entries.push(ReportEntry {
                url: url.to_owned(),
                title,
                keywords,
                child_links,
            });
        }
    }

    let count = entries.len();
    for entry in entries {
        let probe = match (fetcher, Url::parse(&entry.url)) {
            (Some(fetcher), Ok(url)) => fetcher.probe(&url).await,
            _ => None,
        };
        let probe = probe.unwrap_or_default();
        let last_modified = probe
            .last_modified
            .map(|date| date.to_rfc2822())
            .unwrap_or_else(|| "Unknown".to_owned());
        let size = probe.content_length.unwrap_or(0);

        writeln!(out, "{}", entry.title)?;
        writeln!(out, "{}", entry.url)?;
        writeln!(out, "{last_modified}, {size} bytes")?;
        let keywords = entry
            .keywords
            .iter()
            .map(|(term, frequency)| format!("{term} {frequency}"))
            .collect::<Vec<_>>()
            .join("; ");
        writeln!(out, "Keywords: {keywords}")?;
        writeln!(out, "Child Links:")?;
        for child in &entry.child_links {
            writeln!(out, "{child}")?;
        }
        writeln!(out, "{SEPARATOR}")?;
    }

    info!(documents = count, "crawl report written");
    Ok(())
}
