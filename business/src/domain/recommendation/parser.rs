use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::restaurant::filter::CandidateSet;
use crate::domain::restaurant::model::Restaurant;

use super::context::sanitize;
use super::errors::ParseError;
use super::model::RankedRecommendation;

static CODE_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").ok());
static NUMBERED_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[.)]\s+(.+)$").ok());
static NAME_SEPARATOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s+[-–—]\s+|:\s+").ok());

/// A name/reason pair as the model wrote it, before validation.
#[derive(Debug, Clone, PartialEq)]
struct RawEntry {
    name: String,
    reason: String,
}

/// Validated model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Ranked 1..N in the order the model listed them.
    pub recommendations: Vec<RankedRecommendation>,
    /// Names the model returned that are not candidates (or repeats).
    pub dropped: Vec<String>,
}

/// Lowercase candidate names, both as stored and as written in the context
/// lines sent to the model.
type NameIndex<'a> = HashMap<String, &'a Restaurant>;

/// Parses untrusted model text into ranked recommendations.
///
/// Strict JSON is tried first, then a numbered-list recovery. Every entry must
/// name a candidate (case-insensitive exact match); anything else is dropped.
/// Zero surviving entries is an error.
pub fn parse_response(
    raw: &str,
    candidates: &CandidateSet<'_>,
) -> Result<ParsedResponse, ParseError> {
    let text = strip_code_fences(raw);
    let index = index_names(candidates);

    let entries = match parse_structured(&text) {
        Some(entries) => entries,
        None => recover_numbered_list(&text, &index).ok_or(ParseError::Malformed)?,
    };

    validate(entries, &index)
}

fn index_names<'a>(candidates: &CandidateSet<'a>) -> NameIndex<'a> {
    let mut index = HashMap::with_capacity(candidates.len() * 2);
    for restaurant in candidates.iter() {
        index
            .entry(restaurant.name.trim().to_lowercase())
            .or_insert(restaurant);
        index
            .entry(sanitize(&restaurant.name).to_lowercase())
            .or_insert(restaurant);
    }
    index
}

fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    match CODE_FENCE.as_ref().and_then(|re| re.captures(trimmed)) {
        Some(captures) => captures
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        None => trimmed.to_string(),
    }
}

fn parse_structured(text: &str) -> Option<Vec<RawEntry>> {
    let value = serde_json::from_str::<Value>(text).ok().or_else(|| {
        // Prose around the payload: try the outermost array.
        let start = text.find('[')?;
        let end = text.rfind(']')?;
        if end <= start {
            return None;
        }
        serde_json::from_str::<Value>(&text[start..=end]).ok()
    })?;

    let items = match &value {
        Value::Array(items) => items,
        Value::Object(map) => map.get("recommendations")?.as_array()?,
        _ => return None,
    };

    let entries: Vec<RawEntry> = items
        .iter()
        .filter_map(|item| {
            let name = item.get("name")?.as_str()?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            let reason = item
                .get("reason")
                .and_then(|r| r.as_str())
                .unwrap_or("")
                .trim()
                .to_string();
            Some(RawEntry { name, reason })
        })
        .collect();

    if entries.is_empty() && !items.is_empty() {
        return None;
    }
    Some(entries)
}

/// Best-effort reading of "1. Name - reason" style answers.
fn recover_numbered_list(text: &str, index: &NameIndex<'_>) -> Option<Vec<RawEntry>> {
    let line_re = NUMBERED_LINE.as_ref()?;
    let separator_re = NAME_SEPARATOR.as_ref()?;

    let entries: Vec<RawEntry> = text
        .lines()
        .filter_map(|line| {
            let body = line_re.captures(line)?.get(1)?.as_str();
            let (name, reason) = split_name(body, separator_re, index);
            if name.is_empty() {
                return None;
            }
            Some(RawEntry {
                name,
                reason: clean(reason),
            })
        })
        .collect();

    if entries.is_empty() { None } else { Some(entries) }
}

/// Names may contain the separator themselves ("Cafe - Coffee Day"), so the
/// longest prefix naming a candidate wins; otherwise the first separator splits.
fn split_name<'b>(
    body: &'b str,
    separator_re: &Regex,
    index: &NameIndex<'_>,
) -> (String, &'b str) {
    let splits: Vec<(usize, usize)> = separator_re
        .find_iter(body)
        .map(|m| (m.start(), m.end()))
        .collect();

    if index.contains_key(&clean(body).to_lowercase()) {
        return (clean(body), "");
    }
    let known = splits
        .iter()
        .rev()
        .find(|(start, _)| index.contains_key(&clean(&body[..*start]).to_lowercase()));

    match known.or(splits.first()) {
        Some(&(start, end)) => (clean(&body[..start]), &body[end..]),
        None => (clean(body), ""),
    }
}

fn clean(value: &str) -> String {
    value.trim().trim_matches('*').trim().to_string()
}

fn validate(
    entries: Vec<RawEntry>,
    index: &NameIndex<'_>,
) -> Result<ParsedResponse, ParseError> {
    let mut used = HashSet::new();
    let mut recommendations = Vec::new();
    let mut dropped = Vec::new();

    for entry in entries {
        let restaurant = match index.get(&entry.name.to_lowercase()) {
            Some(restaurant) if used.insert(restaurant.id) => *restaurant,
            _ => {
                dropped.push(entry.name);
                continue;
            }
        };
        recommendations.push(RankedRecommendation {
            rank: recommendations.len() + 1,
            restaurant: restaurant.clone(),
            reason: entry.reason,
            score: None,
        });
    }

    if recommendations.is_empty() {
        return Err(ParseError::NoKnownRestaurants);
    }

    Ok(ParsedResponse {
        recommendations,
        dropped,
    })
}
