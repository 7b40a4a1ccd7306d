//! Integration tests for parsing fixture files through the async path API

use std::path::PathBuf;

use csv_rows::parser::Row;
use csv_rows::reader::parse_path;

/// Helper: absolute path to a fixture under tests/data
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Helper: build an owned document from string literals
fn doc(rows: &[&[&str]]) -> Vec<Row> {
    rows.iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[tokio::test]
async fn parse_path_yields_rows_of_fields() {
    let results = parse_path(fixture("people.csv")).await.unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0], vec!["name", "age"]);
    assert_eq!(results[1], vec!["Alice", "23"]);
    assert_eq!(results[2], vec!["Bob", "thirty"]);
    assert_eq!(results[3], vec!["Charlie", "25"]);
    assert_eq!(results[4], vec!["Nim", "22"]);
}

#[tokio::test]
async fn parse_path_yields_comma_containing_fields() {
    let expected = doc(&[
        &["quote", "speaker", "location", "date"],
        &[
            "I have a dream.,Martin Luther King Jr.",
            "Washington, D.C.",
            "1963-08-28",
        ],
        &[
            "That's one small step for man, one giant leap for mankind.",
            "Neil Armstrong",
            "Moon (Apollo 11)",
            "1969-07-20",
        ],
        &[
            "Mr. Gorbachev, tear down this wall!",
            "Ronald Reagan",
            "Berlin",
            "1987-06-12",
        ],
    ]);

    let results = parse_path(fixture("quotes_with_commas.csv")).await.unwrap();
    assert_eq!(results, expected);
}

#[tokio::test]
async fn parse_path_yields_ragged_rows() {
    // The second row of the commas fixture collapsed quote and speaker
    // into one field in the source data, so its width differs from the
    // header's. The parser must not reject that.
    let results = parse_path(fixture("quotes_with_commas.csv")).await.unwrap();

    assert_eq!(results[0].len(), 4);
    assert_eq!(results[1].len(), 3);
}

#[tokio::test]
async fn parse_path_yields_empty_fields() {
    let expected = doc(&[
        &["quote", "speaker", "location", "date"],
        &[
            "The pen is mightier than the sword.",
            "Edward Bulwer-Lytton",
            "",
            "",
        ],
        &["You can't judge a book by its cover", "", "", ""],
    ]);

    let results = parse_path(fixture("quotes_with_unknown.csv")).await.unwrap();
    assert_eq!(results, expected);
}

#[tokio::test]
async fn parse_path_yields_multiline_fields() {
    let results = parse_path(fixture("quotes_with_multiline.csv"))
        .await
        .unwrap();

    // 5 logical rows, even though the last quote spans two physical lines.
    assert_eq!(results.len(), 5);
    assert_eq!(
        results[4],
        vec![
            "Ask not what your country can do for you—\nask what you can do for your country.",
            "John F. Kennedy",
            "Washington, D.C.",
            "1961-01-20",
        ]
    );
}

#[tokio::test]
async fn parse_path_unescapes_doubled_quotes() {
    let results = parse_path(fixture("quotes_with_double_quotes.csv"))
        .await
        .unwrap();

    assert_eq!(results.len(), 7);
    assert_eq!(
        results[6],
        vec![
            "\"If I have seen further, it is by standing on the shoulders of giants.\"",
            "Isaac Newton",
            "",
            "",
        ]
    );
}

#[tokio::test]
async fn parse_path_every_row_is_a_plain_field_sequence() {
    // Rows come back as ordered field vectors even when the file has a
    // header; no keyed records at this layer.
    let results = parse_path(fixture("people.csv")).await.unwrap();
    for row in &results {
        assert_eq!(row.len(), 2);
    }
}

#[tokio::test]
async fn reparsing_a_file_is_idempotent() {
    let first = parse_path(fixture("quotes_with_multiline.csv"))
        .await
        .unwrap();
    let second = parse_path(fixture("quotes_with_multiline.csv"))
        .await
        .unwrap();
    assert_eq!(first, second);
}
