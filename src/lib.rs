pub mod block;
pub mod cli;
pub mod error;
pub mod template;
mod share_response;

use log::{debug, info};

use std::{sync::LazyLock, time::Duration};
use indicatif::{MultiProgress, ProgressBar};
use regex::Regex;
use serde_json::Value;
use share_response::ShareResponse;

use crate::cli::Cli;
use crate::error::{Result, UpdateError};

pub const TOTAL_PATH: &str = "data.grand_total.human_readable_total";

// callbackName(<json>); with an optional trailing semicolon
static JSONP_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^[^(]+\((.*)\);?$").expect("JSONP pattern is valid"));

pub async fn request_share_body(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    info!("Fetching {url}");
    let response = client.get(url).send().await?;
    debug!("Response status: {}", response.status());

    let response = response.error_for_status()?;
    let body = response.text().await?;
    debug!("Received {} bytes", body.len());
    Ok(body)
}

/// Parses a share body that is either plain JSON or JSON wrapped in a JSONP call.
pub fn parse_share_body(body: &str) -> Result<Value> {
    let body = body.trim();

    let json_err = match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            debug!("Parsed response as JSON");
            return Ok(value);
        }
        Err(err) => err,
    };

    let Some(inner) = JSONP_WRAPPER.captures(body).and_then(|caps| caps.get(1)) else {
        return Err(UpdateError::Parse {
            message: format!("not JSON ({json_err}) and no callback(...) wrapper"),
        });
    };

    let value = serde_json::from_str::<Value>(inner.as_str())
        .map_err(|err| UpdateError::Parse {
            message: format!("JSONP payload is not valid JSON: {err}"),
        })?;
    debug!("Parsed response as JSONP");
    Ok(value)
}

pub fn extract_total(value: Value) -> Result<String> {
    let response: ShareResponse =
        serde_json::from_value(value).map_err(|err| UpdateError::MissingField {
            path: TOTAL_PATH,
            message: err.to_string(),
        })?;

    Ok(response.data.grand_total.human_readable_total)
}

pub async fn fetch_total(url: &str, timeout: Duration) -> Result<String> {
    let body = request_share_body(url, timeout).await?;
    extract_total(parse_share_body(&body)?)
}

/// Fetches the total, renders it and splices it into the configured document.
///
/// The document is only written once every previous step has succeeded.
/// Returns the rendered line, and the updated document when `dry_run` is set.
pub async fn update_readme(multi: &MultiProgress, args: &Cli) -> Result<Update> {
    let spinner = match args.quiet {
        false => {
            let spinner = multi.add(ProgressBar::new_spinner());
            spinner.set_message(format!("Fetching {}", args.url));
            spinner.enable_steady_tick(Duration::from_millis(100));
            Some(spinner)
        }
        true => None,
    };

    let total = fetch_total(&args.url, args.timeout).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
        multi.remove(&spinner);
    }
    let total = total?;

    let line = template::render_line(&args.format, &total)?;

    let readme = tokio::fs::read_to_string(&args.readme)
        .await
        .map_err(|source| UpdateError::Io { path: args.readme.clone(), source })?;
    debug!("Read {} bytes from {}", readme.len(), args.readme.display());

    let updated = block::replace_block(&readme, &args.start_marker, &args.end_marker, &line)?;

    if args.dry_run {
        debug!("Dry run, leaving {} untouched", args.readme.display());
        return Ok(Update { line, document: Some(updated) });
    }

    tokio::fs::write(&args.readme, &updated)
        .await
        .map_err(|source| UpdateError::Io { path: args.readme.clone(), source })?;
    debug!("Wrote {} bytes to {}", updated.len(), args.readme.display());

    Ok(Update { line, document: None })
}

#[derive(Debug, PartialEq, Eq)]
pub struct Update {
    pub line: String,

    // Set only for dry runs
    pub document: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_json() {
        let body = r#"  {"data": {"grand_total": {"human_readable_total": "1 hr"}}}  "#;
        let value = parse_share_body(body).unwrap();
        assert_eq!(extract_total(value).unwrap(), "1 hr");
    }

    #[test]
    fn parses_jsonp() {
        let body = r#"foo({"data":{"grand_total":{"human_readable_total":"10 hrs 30 mins"}}});"#;
        let value = parse_share_body(body).unwrap();
        assert_eq!(extract_total(value).unwrap(), "10 hrs 30 mins");
    }

    #[test]
    fn parses_multi_line_jsonp_without_semicolon() {
        let body = concat!(
            "cb({\n",
            "  \"data\": {\n",
            "    \"grand_total\": {\"human_readable_total\": \"3 mins\"}\n",
            "  }\n",
            "})\n",
        );
        let value = parse_share_body(body).unwrap();
        assert_eq!(extract_total(value).unwrap(), "3 mins");
    }

    #[test]
    fn rejects_malformed_body() {
        for body in ["<html>nope</html>", "", "{\"data\":", "cb({not json});"] {
            let err = parse_share_body(body).unwrap_err();
            assert!(matches!(err, UpdateError::Parse { .. }), "{body:?}");
        }
    }

    #[test]
    fn missing_grand_total() {
        let err = extract_total(json!({"data": {}})).unwrap_err();
        assert!(matches!(err, UpdateError::MissingField { path: TOTAL_PATH, .. }));
    }

    #[test]
    fn wrong_shape_is_missing_field() {
        let value = json!({"data": {"grand_total": {"human_readable_total": 42}}});
        let err = extract_total(value).unwrap_err();
        assert!(matches!(err, UpdateError::MissingField { .. }));

        let err = extract_total(json!(["data"])).unwrap_err();
        assert!(matches!(err, UpdateError::MissingField { .. }));
    }

    #[test]
    fn ignores_other_fields() {
        let value = json!({
            "data": {
                "grand_total": {
                    "human_readable_total": "2 hrs",
                    "total_seconds": 7200.0,
                },
                "range": {"start": "2024-01-01"},
            },
        });
        assert_eq!(extract_total(value).unwrap(), "2 hrs");
    }
}
