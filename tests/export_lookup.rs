// tests/export_lookup.rs
use news_radar::export::{export_titles, find_answer, read_rows, NO_MATCH};
use news_radar::ingest::providers::RssFeedProvider;

const TC: &str = include_str!("fixtures/techcrunch_rss.xml");

#[tokio::test]
async fn export_writes_title_summary_csv_and_lookup_reads_it() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tech_news.csv");
    let provider = RssFeedProvider::from_fixture("https://techcrunch.com/feed/", TC);

    let rows = export_titles(&provider, 10, &out).await.unwrap();
    // Untitled entries are skipped; duplicate titles are not.
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].title, "Google unveils Gemini 2 for developers");
    // Titles are short, so their "summary" is the title itself.
    assert_eq!(rows[0].summary, rows[0].title);

    let header = std::fs::read_to_string(&out).unwrap();
    assert!(header.starts_with("title,summary"));
    assert_eq!(read_rows(&out).unwrap(), rows);

    let answer = find_answer(&out, "what about Nvidia").unwrap();
    assert_eq!(answer, "Nvidia posts record quarter on AI chip demand");

    assert_eq!(find_answer(&out, "zzz qqq").unwrap(), NO_MATCH);
}

#[tokio::test]
async fn export_limit_bounds_rows() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("two.csv");
    let provider = RssFeedProvider::from_fixture("https://techcrunch.com/feed/", TC);
    let rows = export_titles(&provider, 2, &out).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn missing_csv_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(find_answer(&dir.path().join("nope.csv"), "anything").is_err());
}
