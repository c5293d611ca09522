//! Paint and badge normalization.
//!
//! 7TV has served cosmetics in several shapes over time. The functions here
//! turn any of the known shapes into strict [`Paint`] / [`Badge`] values and
//! reject (return `None`) anything that would render as nothing.


use serde::Serialize;
use serde_json::{Number, Value};

use crate::record::{field, first_field, id_string, is_present, str_field};

pub const DEFAULT_PAINT_FUNCTION: &str = "linear-gradient";
pub const DEFAULT_PAINT_ANGLE: u32 = 90;
pub const DEFAULT_BADGE_NAME: &str = "7TV Badge";
pub const DEFAULT_BADGE_SIZE: &str = "1x";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A name paint, ready for CSS gradient rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paint {
    pub function: String,
    pub angle: Number,
    /// Never empty.
    pub colors: Vec<Value>,
}

/// One `[size, url]` image pair of a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeUrl(pub String, pub String);

impl BadgeUrl {
    pub fn size(&self) -> &str {
        &self.0
    }

    pub fn url(&self) -> &str {
        &self.1
    }
}

/// A badge with at least one resolvable image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub name: String,
    pub urls: Vec<BadgeUrl>,
}

// ---------------------------------------------------------------------------
// Style block
// ---------------------------------------------------------------------------

/// Where a user's paint comes from.
#[derive(Debug, PartialEq)]
pub enum PaintSource<'a> {
    Inline(&'a Value),
    Reference(String),
    Missing,
}

/// Where a user's badges come from.
#[derive(Debug, PartialEq)]
pub enum BadgeSource<'a> {
    Inline(&'a [Value]),
    Reference(String),
    Missing,
}

/// Classify the paint of a `style` block. An inline paint wins over `paint_id`.
pub fn paint_source(style: Option<&Value>) -> PaintSource<'_> {
    let Some(style) = style else {
        return PaintSource::Missing;
    };
    if let Some(paint) = field(style, "paint") {
        return PaintSource::Inline(paint);
    }
    match field(style, "paint_id").and_then(id_string) {
        Some(id) => PaintSource::Reference(id),
        None => PaintSource::Missing,
    }
}

/// Classify the badges of a `style` block. A non-empty `badges` array wins
/// over `badge_id`.
pub fn badge_source(style: Option<&Value>) -> BadgeSource<'_> {
    let Some(style) = style else {
        return BadgeSource::Missing;
    };
    if let Some(badges) = style.get("badges").and_then(Value::as_array) {
        if !badges.is_empty() {
            return BadgeSource::Inline(badges);
        }
    }
    match field(style, "badge_id").and_then(id_string) {
        Some(id) => BadgeSource::Reference(id),
        None => BadgeSource::Missing,
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a paint object.
///
/// `function`/`fn` default to `linear-gradient`, a numeric `angle` defaults
/// to 90, and `colors`/`color` must be a non-empty array.
pub fn normalize_paint(raw: &Value) -> Option<Paint> {
    if !is_present(raw) {
        return None;
    }

    let function = ["function", "fn"]
        .iter()
        .find_map(|key| str_field(raw, key))
        .unwrap_or(DEFAULT_PAINT_FUNCTION)
        .to_string();
    let angle = match raw.get("angle") {
        Some(Value::Number(n)) => n.clone(),
        _ => Number::from(DEFAULT_PAINT_ANGLE),
    };
    let colors = first_field(raw, &["colors", "color"])?.as_array()?;
    if colors.is_empty() {
        return None;
    }

    Some(Paint {
        function,
        angle,
        colors: colors.clone(),
    })
}

/// Normalize a badge object.
///
/// URL pairs come from `urls`, then `data.urls`, then `images`; the first
/// of those that is an array is used even if empty. Entries without a URL
/// are dropped, and a badge left with none is rejected.
pub fn normalize_badge(raw: &Value) -> Option<Badge> {
    if !is_present(raw) {
        return None;
    }
    let data = field(raw, "data");

    let name = str_field(raw, "name")
        .or_else(|| data.and_then(|d| str_field(d, "name")))
        .unwrap_or(DEFAULT_BADGE_NAME)
        .to_string();

    let urls: Vec<BadgeUrl> = if let Some(urls) = raw.get("urls").and_then(Value::as_array) {
        urls.iter().filter_map(url_entry).collect()
    } else if let Some(urls) = data
        .and_then(|d| d.get("urls"))
        .and_then(Value::as_array)
    {
        urls.iter().filter_map(url_entry).collect()
    } else if let Some(images) = raw.get("images").and_then(Value::as_array) {
        images.iter().filter_map(image_entry).collect()
    } else {
        return None;
    };

    if urls.is_empty() {
        return None;
    }
    Some(Badge { name, urls })
}

/// Normalize every inline badge, dropping the ones that normalize to nothing.
pub fn normalize_badges(raw: &[Value]) -> Vec<Badge> {
    raw.iter().filter_map(normalize_badge).collect()
}

/// A `urls` entry: positional `[size, url]` or `{size, url}`.
fn url_entry(entry: &Value) -> Option<BadgeUrl> {
    match entry {
        Value::Array(items) => {
            let size = items.first().filter(|v| is_present(v)).and_then(Value::as_str);
            pair(size, items.get(1))
        }
        _ => object_entry(entry),
    }
}

/// An `images` entry: `{size, url}`, or a positional array whose URL sits at
/// index 1. Positional images carry no size label.
fn image_entry(entry: &Value) -> Option<BadgeUrl> {
    match entry {
        Value::Array(items) => pair(None, items.get(1)),
        _ => object_entry(entry),
    }
}

fn object_entry(entry: &Value) -> Option<BadgeUrl> {
    let url = field(entry, "url").or_else(|| entry.get(1));
    pair(str_field(entry, "size"), url)
}

fn pair(size: Option<&str>, url: Option<&Value>) -> Option<BadgeUrl> {
    let url = url.and_then(Value::as_str).filter(|u| !u.is_empty())?;
    Some(BadgeUrl(
        size.unwrap_or(DEFAULT_BADGE_SIZE).to_string(),
        url.to_string(),
    ))
}
