//! Ship-to site summary.
//!
//! The block between "Ship To" and "CIN:" mixes the buyer's name, PO header
//! labels and a free-form store address. The summary is rebuilt from
//! fragments: the store name (text ending in a retail-brand token), the
//! comma-separated address runs, and a trailing "City - PINCODE".

use regex::Regex;
use tracing::trace;

use super::patterns::{
    CITY_PIN, CITY_PIN_AHEAD, REPEATED_COMMA, SHIP_TO_BLOCK, SITE_DELIVERY, SITE_PO_DATE,
    SITE_PO_NUMBER, WHITESPACE,
};
use crate::error::ExtractionError;

/// Extracts the ship-to address summary.
#[derive(Debug, Clone)]
pub struct SiteExtractor {
    buyer_name: Option<Regex>,
    store_name: Option<Regex>,
}

impl SiteExtractor {
    /// Build the extractor for a buyer name and its retail-brand tokens.
    pub fn new(buyer_name: &str, brand_tokens: &[String]) -> Result<Self, ExtractionError> {
        let buyer_name = if buyer_name.trim().is_empty() {
            None
        } else {
            let pattern = format!(r"{}\.?", regex::escape(buyer_name.trim()));
            Some(compile("buyer_name", &pattern)?)
        };

        let tokens: Vec<String> = brand_tokens
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| regex::escape(t.trim()))
            .collect();
        let store_name = if tokens.is_empty() {
            None
        } else {
            let pattern = format!(r"([A-Za-z\s]+(?:{}))", tokens.join("|"));
            Some(compile("site_brand_tokens", &pattern)?)
        };

        Ok(Self {
            buyer_name,
            store_name,
        })
    }

    /// Summarize the ship-to block, or `""` when there is none.
    pub fn extract(&self, text: &str) -> String {
        let Some(caps) = SHIP_TO_BLOCK.captures(text) else {
            return String::new();
        };

        let mut block = caps[1].to_string();
        if let Some(buyer_name) = &self.buyer_name {
            block = buyer_name.replace_all(&block, "").into_owned();
        }
        block = SITE_PO_NUMBER.replace_all(&block, "").into_owned();
        block = SITE_PO_DATE.replace_all(&block, "").into_owned();
        block = SITE_DELIVERY.replace_all(&block, "").into_owned();
        block = WHITESPACE.replace_all(&block, " ").trim().to_string();
        trace!("Ship-to block: {:?}", block);

        let mut parts: Vec<String> = Vec::new();

        if let Some(store_name) = &self.store_name {
            if let Some(m) = store_name.captures(&block).and_then(|c| c.get(1)) {
                let name = m.as_str().to_string();
                parts.push(name.trim().to_string());
                block = block.replace(&name, "");
            }
        }

        for fragment in address_fragments(&block) {
            let cleaned = fragment.trim_matches(|c| c == ' ' || c == ',');
            if !cleaned.is_empty() && !parts.iter().any(|p| p == cleaned) {
                parts.push(cleaned.to_string());
            }
        }

        if let Some(caps) = CITY_PIN.captures(&block) {
            parts.push(format!("{} - {}", &caps[1], &caps[2]));
        }

        let site = parts.join(", ");
        let site = REPEATED_COMMA.replace_all(&site, ",");
        let site = WHITESPACE.replace_all(&site, " ");
        site.trim_matches(|c| c == ' ' || c == ',').to_string()
    }
}

impl Default for SiteExtractor {
    fn default() -> Self {
        let config = crate::models::config::ExtractionConfig::default();
        // Defaults are escaped literals and always compile.
        Self::new(&config.buyer_name, &config.site_brand_tokens).unwrap_or(Self {
            buyer_name: None,
            store_name: None,
        })
    }
}

fn compile(rule: &str, pattern: &str) -> Result<Regex, ExtractionError> {
    Regex::new(pattern).map_err(|e| ExtractionError::Pattern {
        rule: rule.to_string(),
        reason: e.to_string(),
    })
}

fn is_fragment_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || c == ','
}

/// A fragment may end where a "City 400064" tail or the end of the block follows.
fn fragment_ends_at(rest: &str) -> bool {
    rest.trim().is_empty() || CITY_PIN_AHEAD.is_match(rest)
}

/// Shortest letter-led runs of letters, spaces and commas that end right
/// before a "City PINCODE" tail or the end of the block. Runs interrupted
/// by digits or punctuation are dropped.
fn address_fragments(block: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = block.char_indices().collect();
    let mut fragments = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, first) = chars[i];
        if !first.is_ascii_alphabetic() {
            i += 1;
            continue;
        }

        let mut found = None;
        let mut j = i + 1;
        while j < chars.len() && is_fragment_char(chars[j].1) {
            let end = chars.get(j + 1).map(|(b, _)| *b).unwrap_or(block.len());
            if fragment_ends_at(&block[end..]) {
                found = Some((j + 1, end));
                break;
            }
            j += 1;
        }

        match found {
            Some((next, end)) => {
                fragments.push(&block[start..end]);
                i = next;
            }
            None => i += 1,
        }
    }

    fragments
}
