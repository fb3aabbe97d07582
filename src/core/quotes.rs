use crate::domain::model::Quote;
use crate::utils::error::{AppError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('“', '”'), ('\'', '\''), ('‘', '’')];

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn strip_wrapping_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return text;
    };
    if QUOTE_PAIRS.contains(&(first, last)) {
        &text[first.len_utf8()..text.len() - last.len_utf8()]
    } else {
        text
    }
}

/// 收斂空白並去掉外層引號
pub fn normalize_text(text: &str) -> String {
    let collapsed = whitespace().replace_all(text.trim(), " ");
    strip_wrapping_quotes(&collapsed).trim().to_string()
}

/// Normalizes every quote, drops empty texts and exact duplicates
/// (first occurrence wins).
pub fn normalize_quotes(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut seen = HashSet::new();

    quotes
        .into_iter()
        .filter_map(|quote| {
            let text = normalize_text(&quote.text);
            if text.is_empty() || !seen.insert(text.clone()) {
                return None;
            }
            Some(Quote {
                text,
                source: normalize_text(&quote.source),
                category: quote
                    .category
                    .map(|c| normalize_text(&c))
                    .filter(|c| !c.is_empty()),
            })
        })
        .collect()
}

pub fn parse_quotes(data: &[u8]) -> Result<Vec<Quote>> {
    serde_json::from_slice(data).map_err(|e| AppError::ProcessingError {
        message: format!("quotes file must be a JSON array of {{text, source}}: {}", e),
    })
}

/// Reads `input`, normalizes it and writes pretty JSON to `output`.
/// Returns `(read, written)` counts.
pub async fn normalize_file(input: &Path, output: &Path) -> Result<(usize, usize)> {
    let data = tokio::fs::read(input).await?;
    let quotes = parse_quotes(&data)?;
    let read = quotes.len();

    let normalized = normalize_quotes(quotes);
    let mut json = serde_json::to_string_pretty(&normalized)?;
    json.push('\n');
    tokio::fs::write(output, json).await?;

    tracing::info!(
        "📝 Normalized {} quotes ({} dropped) -> {}",
        normalized.len(),
        read - normalized.len(),
        output.display()
    );
    Ok((read, normalized.len()))
}
