//! Handler for `unitprice-cli parse`.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use unitprice_core::{AppConfig, ParseOutcome};
use unitprice_scraper::{parse_html, ProductUrlParser};

/// Parses one product page and prints the outcome to stdout.
///
/// With `html_file` set, the file's contents stand in for the fetched page
/// and no network request is made. The returned exit code is non-zero when
/// the parse failed.
///
/// # Errors
///
/// Returns an error if the HTML file cannot be read, the HTTP client cannot
/// be built, or the outcome cannot be serialized.
pub(crate) async fn run_parse(
    config: &AppConfig,
    url: &str,
    html_file: Option<&Path>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let outcome = match html_file {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read HTML file {}", path.display()))?;
            tracing::debug!(path = %path.display(), bytes = html.len(), "parsing local HTML");
            parse_html(url, &html)
        }
        None => {
            let parser = ProductUrlParser::from_config(config)?;
            parser.parse_product_url(url).await
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_summary(&outcome));
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Human-readable rendering of an outcome, one field per line.
pub(crate) fn render_summary(outcome: &ParseOutcome) -> String {
    if let Some(error) = &outcome.error {
        return format!("error: {error}\n");
    }

    let data = &outcome.data;
    let sheet_size = match (data.sheet_width, data.sheet_height) {
        (Some(w), Some(h)) => Some(format!("{w} x {h} in")),
        (Some(w), None) => Some(format!("{w} x ? in")),
        (None, Some(h)) => Some(format!("? x {h} in")),
        (None, None) => None,
    };
    let fields = [
        ("name", data.name.clone()),
        ("price", data.price.map(|p| format!("${p}"))),
        ("rolls", data.roll_count.map(|n| n.to_string())),
        ("sheets/roll", data.sheets_per_roll.map(|n| n.to_string())),
        ("sheet size", sheet_size),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        let value = value.unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{label:<16}{value}\n"));
    }
    for warning in &outcome.warnings {
        out.push_str(&format!("warning: {warning}\n"));
    }
    out
}
