use super::*;
use async_trait::async_trait;
use seine_html::PageExtractor;
use seine_types::{DocId, FetchError, FetchedPage};
use std::collections::HashMap;
use tempfile::TempDir;

/// In-memory site: URL → HTML. Unknown URLs answer 404.
struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    fn new(pages: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        })
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        match self.pages.get(url.as_str()) {
            Some(body) => Ok(FetchedPage {
                body: body.clone(),
                last_modified: None,
                content_length: body.len() as u64,
            }),
            None => Err(FetchError::Status { code: 404 }),
        }
    }
}

fn stop_words() -> std::collections::HashSet<String> {
    ["the", "a", "of"].iter().map(|w| w.to_string()).collect()
}

fn spider(pages: &[(&str, &str)]) -> Spider {
    Spider::new(
        StaticFetcher::new(pages),
        Arc::new(PageExtractor),
        Analyzer::new(stop_words()),
    )
}

fn open_store() -> (TempDir, IndexStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = IndexStore::open(dir.path()).expect("open store");
    (dir, store)
}

fn page(title: &str, body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{href}\"></a>"))
        .collect();
    format!("<html><head><title>{title}</title></head><body><p>{body}</p>{anchors}</body></html>")
}

fn positions(store: &IndexStore, term: &str, doc: DocId) -> Option<Vec<u32>> {
    let rtxn = store.read_txn().expect("read txn");
    store
        .postings
        .get(&rtxn, term)
        .expect("postings")
        .and_then(|map| map.get(&doc).map(|p| p.positions().to_vec()))
}

/// Store invariants that must hold after any crawl.
fn check_invariants(store: &IndexStore, stop_words: &std::collections::HashSet<String>) {
    let rtxn = store.read_txn().expect("read txn");
    let n = store.doc_count(&rtxn).expect("doc count");

    let mut ids: Vec<u32> = store
        .urls
        .iter(&rtxn)
        .expect("iter")
        .map(|pair| pair.expect("entry").1 .0)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..n as u32).collect::<Vec<_>>(), "doc ids must be dense");

    let known: std::collections::HashSet<u32> = ids.into_iter().collect();
    for pair in store.postings.iter(&rtxn).expect("iter") {
        let (term, map) = pair.expect("entry");
        assert!(!stop_words.contains(term), "stop word {term:?} must not be indexed");
        for (doc, posting) in map {
            assert!(known.contains(&doc.0), "posting for unknown doc {doc}");
            assert!(posting.frequency() > 0);
            let positions = posting.positions();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "positions must increase");
        }
    }
}

#[tokio::test]
async fn minimal_two_page_crawl() {
    let pages = [
        (
            "http://site.test/a",
            page("Page A", "apple apple orange", &["/b"]),
        ),
        ("http://site.test/b", page("Page B", "orange banana", &[])),
    ];
    let pages_ref: Vec<(&str, &str)> = pages.iter().map(|(u, h)| (*u, h.as_str())).collect();
    let (_dir, store) = open_store();

    let seed = Url::parse("http://site.test/a").unwrap();
    let summary = spider(&pages_ref).crawl(&store, seed, 10).await.expect("crawl");
    assert_eq!(summary.pages_indexed, 2);

    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(store.urls.get(&rtxn, "http://site.test/a").unwrap(), Some(DocId(0)));
    assert_eq!(store.urls.get(&rtxn, "http://site.test/b").unwrap(), Some(DocId(1)));
    assert_eq!(store.titles.get(&rtxn, DocId(0)).unwrap().as_deref(), Some("Page A"));
    assert_eq!(store.main.last_page_id(&rtxn).unwrap(), 2);
    assert_eq!(
        store.links.children(&rtxn, DocId(0), 10).unwrap(),
        vec!["http://site.test/b"]
    );
    assert!(store.links.children(&rtxn, DocId(1), 10).unwrap().is_empty());
    drop(rtxn);

    assert_eq!(positions(&store, "appl", DocId(0)), Some(vec![0, 1]));
    assert_eq!(positions(&store, "orang", DocId(0)), Some(vec![2]));
    assert_eq!(positions(&store, "orang", DocId(1)), Some(vec![0]));
    assert_eq!(positions(&store, "banana", DocId(1)), Some(vec![1]));
    assert_eq!(positions(&store, "appl", DocId(1)), None);

    check_invariants(&store, &stop_words());
}

#[tokio::test]
async fn max_pages_bounds_the_crawl_but_not_the_edges() {
    let seed_html = page(
        "Hub",
        "hub",
        &["/c1", "/c2", "/c3", "/c4", "/c5"],
    );
    let child = page("Leaf", "leaf", &[]);
    let pages = [
        ("http://site.test/", seed_html.as_str()),
        ("http://site.test/c1", child.as_str()),
        ("http://site.test/c2", child.as_str()),
        ("http://site.test/c3", child.as_str()),
        ("http://site.test/c4", child.as_str()),
        ("http://site.test/c5", child.as_str()),
    ];
    let (_dir, store) = open_store();

    let seed = Url::parse("http://site.test/").unwrap();
    let summary = spider(&pages).crawl(&store, seed, 3).await.expect("crawl");

    // Seed plus the first two dequeued children.
    assert_eq!(summary.pages_indexed, 3);
    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(store.doc_count(&rtxn).unwrap(), 3);
    assert!(store.urls.get(&rtxn, "http://site.test/c2").unwrap().is_some());
    assert!(store.urls.get(&rtxn, "http://site.test/c3").unwrap().is_none());
    // All five edges from the seed were recorded before the bound hit.
    assert_eq!(store.links.children(&rtxn, DocId(0), 10).unwrap().len(), 5);
}

#[tokio::test]
async fn failed_fetches_consume_no_doc_id() {
    let seed_html = page("Hub", "hub", &["/missing", "/ok"]);
    let ok = page("Ok", "fine", &[]);
    let pages = [
        ("http://site.test/", seed_html.as_str()),
        ("http://site.test/ok", ok.as_str()),
    ];
    let (_dir, store) = open_store();

    let seed = Url::parse("http://site.test/").unwrap();
    let summary = spider(&pages).crawl(&store, seed, 10).await.expect("crawl");

    assert_eq!(summary.pages_indexed, 2);
    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(store.urls.get(&rtxn, "http://site.test/").unwrap(), Some(DocId(0)));
    assert_eq!(store.urls.get(&rtxn, "http://site.test/ok").unwrap(), Some(DocId(1)));
    // The dead link is still an edge.
    assert_eq!(
        store.links.children(&rtxn, DocId(0), 10).unwrap(),
        vec!["http://site.test/missing", "http://site.test/ok"]
    );
}

#[tokio::test]
async fn empty_bodies_index_without_postings() {
    let html = "<html><head><title>Bare</title></head><body><a href=\"/next\"></a></body></html>";
    let pages = [("http://site.test/", html)];
    let (_dir, store) = open_store();

    let seed = Url::parse("http://site.test/").unwrap();
    spider(&pages).crawl(&store, seed, 10).await.expect("crawl");

    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(store.doc_count(&rtxn).unwrap(), 1);
    assert_eq!(store.titles.get(&rtxn, DocId(0)).unwrap().as_deref(), Some("Bare"));
    assert_eq!(store.doc_terms.get(&rtxn, DocId(0)).unwrap(), None);
    assert_eq!(store.links.children(&rtxn, DocId(0), 10).unwrap().len(), 1);
}

#[tokio::test]
async fn non_http_links_are_ignored() {
    let html = page(
        "Links",
        "text",
        &["mailto:someone@example.com", "ftp://files.test/x", "/child"],
    );
    let pages = [("http://site.test/", html.as_str())];
    let (_dir, store) = open_store();

    let seed = Url::parse("http://site.test/").unwrap();
    spider(&pages).crawl(&store, seed, 10).await.expect("crawl");

    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(
        store.links.children(&rtxn, DocId(0), 10).unwrap(),
        vec!["http://site.test/child"]
    );
}

#[tokio::test]
async fn recrawling_a_covered_seed_is_a_noop() {
    let pages = [
        ("http://site.test/a", page("A", "apple", &["/b"])),
        ("http://site.test/b", page("B", "banana", &[])),
    ];
    let pages_ref: Vec<(&str, &str)> = pages.iter().map(|(u, h)| (*u, h.as_str())).collect();
    let (_dir, store) = open_store();
    let spider = spider(&pages_ref);

    let seed = Url::parse("http://site.test/a").unwrap();
    spider.crawl(&store, seed.clone(), 10).await.expect("first crawl");

    let before: Option<Vec<u32>> = positions(&store, "appl", DocId(0));
    let summary = spider.crawl(&store, seed, 10).await.expect("second crawl");

    assert_eq!(summary.pages_indexed, 0);
    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(store.doc_count(&rtxn).unwrap(), 2);
    assert_eq!(store.main.last_page_id(&rtxn).unwrap(), 2);
    drop(rtxn);
    assert_eq!(positions(&store, "appl", DocId(0)), before);
}

#[tokio::test]
async fn doc_ids_continue_across_restarts() {
    let chain = |host: &str| -> Vec<(String, String)> {
        (1..=5)
            .map(|i| {
                let links = if i < 5 {
                    vec![format!("/p{}", i + 1)]
                } else {
                    Vec::new()
                };
                let links: Vec<&str> = links.iter().map(String::as_str).collect();
                (
                    format!("http://{host}/p{i}"),
                    page(&format!("{host} {i}"), &format!("page number{i}"), &links),
                )
            })
            .collect()
    };

    let dir = TempDir::new().expect("tempdir");

    let site_a = chain("a.test");
    let pages_a: Vec<(&str, &str)> = site_a.iter().map(|(u, h)| (u.as_str(), h.as_str())).collect();
    {
        let store = IndexStore::open(dir.path()).expect("open");
        let seed = Url::parse("http://a.test/p1").unwrap();
        let summary = spider(&pages_a).crawl(&store, seed, 5).await.expect("crawl a");
        assert_eq!(summary.pages_indexed, 5);
    }

    let site_b = chain("b.test");
    let pages_b: Vec<(&str, &str)> = site_b.iter().map(|(u, h)| (u.as_str(), h.as_str())).collect();
    let store = IndexStore::open(dir.path()).expect("reopen");
    let seed = Url::parse("http://b.test/p1").unwrap();
    let summary = spider(&pages_b).crawl(&store, seed, 5).await.expect("crawl b");
    assert_eq!(summary.pages_indexed, 5);

    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(store.doc_count(&rtxn).unwrap(), 10);
    assert_eq!(store.main.last_page_id(&rtxn).unwrap(), 10);
    assert_eq!(store.urls.get(&rtxn, "http://a.test/p1").unwrap(), Some(DocId(0)));
    assert_eq!(store.urls.get(&rtxn, "http://b.test/p1").unwrap(), Some(DocId(5)));
    drop(rtxn);

    // Postings written by the first process are untouched by the second.
    assert_eq!(positions(&store, "number1", DocId(0)), Some(vec![1]));
    check_invariants(&store, &stop_words());
}

#[tokio::test]
async fn unreachable_seed_commits_an_empty_session() {
    let (_dir, store) = open_store();
    let seed = Url::parse("http://nowhere.test/").unwrap();
    let summary = spider(&[]).crawl(&store, seed, 10).await.expect("crawl");
    assert_eq!(summary.pages_indexed, 0);
    let rtxn = store.read_txn().expect("read txn");
    assert_eq!(store.doc_count(&rtxn).unwrap(), 0);
}
