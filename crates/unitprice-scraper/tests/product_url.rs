//! Integration tests for `ProductUrlParser::parse_product_url`.
//!
//! Both relays are mounted on one local `wiremock` server under different
//! paths, so relay ordering and fallback are observable without real network
//! traffic.

use rust_decimal::Decimal;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unitprice_scraper::{ParseOutcome, ProductUrlParser, RelayEndpoint};

const TARGET: &str = "https://www.example-shop.com/p/cottonelle-12";

/// Builds a parser whose two relays point at `server`: `primary` under
/// `/raw?url=` and `backup` under `/proxy?`.
fn test_parser(server: &MockServer) -> ProductUrlParser {
    let relays = vec![
        RelayEndpoint::new("primary", format!("{}/raw?url=", server.uri())),
        RelayEndpoint::new("backup", format!("{}/proxy?", server.uri())),
    ];
    ProductUrlParser::with_relays(5, "unitprice-test/0.1", relays)
        .expect("failed to build test ProductUrlParser")
}

fn product_page() -> String {
    r#"<!doctype html>
<html>
  <head>
    <title>Cottonelle Ultra Clean</title>
    <script type="application/ld+json">
      {"@context": "https://schema.org", "@type": "Product",
       "name": "Cottonelle Ultra Clean Toilet Paper, 12 Family Mega Rolls",
       "offers": {"@type": "Offer", "price": "15.97", "priceCurrency": "USD"}}
    </script>
  </head>
  <body>
    <p>340 sheets per roll. Sheet size 4.0 x 3.7 in.</p>
  </body>
</html>"#
        .to_string()
}

fn pad(html: &str) -> String {
    format!("{html}<!-- {} -->", "x".repeat(120))
}

// ---------------------------------------------------------------------------
// Relay selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_relay_success_yields_full_product() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(query_param("url", TARGET))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = test_parser(&server).parse_product_url(TARGET).await;

    assert!(outcome.success, "expected success, got: {outcome:?}");
    assert_eq!(
        outcome.data.name.as_deref(),
        Some("Cottonelle Ultra Clean Toilet Paper, 12 Family Mega Rolls")
    );
    assert_eq!(outcome.data.price, Some(Decimal::new(1597, 2)));
    assert_eq!(outcome.data.roll_count, Some(12));
    assert_eq!(outcome.data.sheets_per_roll, Some(340));
    assert_eq!(outcome.data.sheet_width, Some(4.0));
    assert_eq!(outcome.data.sheet_height, Some(3.7));
    assert!(outcome.warnings.is_empty(), "unexpected warnings: {:?}", outcome.warnings);
    assert_eq!(outcome.error, None);
}

#[tokio::test]
async fn failing_first_relay_falls_back_to_second() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_parser(&server).parse_product_url(TARGET).await;

    assert!(outcome.success, "expected success via backup relay, got: {outcome:?}");
    assert_eq!(outcome.data.price, Some(Decimal::new(1597, 2)));
}

#[tokio::test]
async fn all_relays_failing_reports_each_reason_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .mount(&server)
        .await;

    let outcome = test_parser(&server).parse_product_url(TARGET).await;

    assert!(!outcome.success);
    assert!(outcome.data.is_empty());
    assert_eq!(
        outcome.error.as_deref(),
        Some(
            "Failed to fetch URL: primary returned HTTP 403, \
             backup returned an empty or too short response (4 bytes)"
        )
    );
}

/// Nothing listens on port 1, so requests to this prefix fail at connect.
const UNREACHABLE_PREFIX: &str = "http://127.0.0.1:1/raw?url=";

#[tokio::test]
async fn unreachable_first_relay_falls_back_to_second() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(1)
        .mount(&server)
        .await;

    let relays = vec![
        RelayEndpoint::new("dead", UNREACHABLE_PREFIX),
        RelayEndpoint::new("backup", format!("{}/proxy?", server.uri())),
    ];
    let parser = ProductUrlParser::with_relays(5, "unitprice-test/0.1", relays)
        .expect("failed to build test ProductUrlParser");

    let outcome = parser.parse_product_url(TARGET).await;

    assert!(outcome.success, "expected success via backup relay, got: {outcome:?}");
    assert_eq!(
        outcome.data.name.as_deref(),
        Some("Cottonelle Ultra Clean Toilet Paper, 12 Family Mega Rolls")
    );
}

#[tokio::test]
async fn unreachable_only_relay_reports_transport_failure() {
    let relays = vec![RelayEndpoint::new("dead", UNREACHABLE_PREFIX)];
    let parser = ProductUrlParser::with_relays(5, "unitprice-test/0.1", relays)
        .expect("failed to build test ProductUrlParser");

    let outcome = parser.parse_product_url(TARGET).await;

    assert!(!outcome.success);
    assert!(outcome.data.is_empty());
    let error = outcome.error.expect("failed outcome carries an error");
    assert!(
        error.starts_with("Failed to fetch URL: dead: "),
        "unexpected error: {error}"
    );
}

// ---------------------------------------------------------------------------
// Validation and classification of fetched pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_url_never_reaches_a_relay() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = test_parser(&server).parse_product_url("not a url").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Please enter a valid URL"));
}

#[tokio::test]
async fn bot_protection_page_reports_blocked() {
    let server = MockServer::start().await;

    let block_page = pad(
        "<html><head><title>Robot or human?</title></head>\
         <body><h1>We like real shoppers, not robots!</h1></body></html>",
    );
    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(block_page))
        .mount(&server)
        .await;

    let outcome = test_parser(&server)
        .parse_product_url("https://www.walmart.com/ip/Great-Value-Bath-Tissue/12345")
        .await;

    assert!(!outcome.success);
    assert!(outcome.data.is_empty());
    let error = outcome.error.expect("blocked outcome carries an error");
    assert!(error.contains("blocked automated access"), "got: {error}");
}

#[tokio::test]
async fn page_without_product_signals_reports_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(pad("<html><body><p>Store hours and directions.</p></body></html>")),
        )
        .mount(&server)
        .await;

    let outcome = test_parser(&server).parse_product_url(TARGET).await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Could not find product information on this page")
    );
}

#[tokio::test]
async fn partial_page_succeeds_with_single_warning() {
    let server = MockServer::start().await;

    let page = pad(
        r#"<html><head>
            <meta property="og:title" content="Charmin Ultra Soft 18 Mega Rolls">
            <meta property="product:price:amount" content="23.49">
        </head><body></body></html>"#,
    );
    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let outcome = test_parser(&server).parse_product_url(TARGET).await;

    assert!(outcome.success, "expected success, got: {outcome:?}");
    assert_eq!(outcome.data.roll_count, Some(18));
    assert_eq!(outcome.data.price, Some(Decimal::new(2349, 2)));
    assert_eq!(
        outcome.warnings,
        vec!["Could not find: sheets per roll, sheet width, sheet height".to_string()]
    );
}

#[tokio::test]
async fn repeated_parses_of_same_page_are_identical() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(2)
        .mount(&server)
        .await;

    let parser = test_parser(&server);
    let first: ParseOutcome = parser.parse_product_url(TARGET).await;
    let second: ParseOutcome = parser.parse_product_url(TARGET).await;

    assert_eq!(first, second);
}
