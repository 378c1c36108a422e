use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use svgvault_core::{AssetMeta, MetadataExtractor, Result};

/// Regex-based extraction over the raw markup.
///
/// Dimensions come from the first `width=`/`height=`/`viewBox=` occurrence
/// anywhere in the text. Only literal, double-quoted `fill=`/`stroke=`
/// attributes are seen; colors set through stylesheets are not.
pub struct PatternExtractor {
    width: Regex,
    height: Regex,
    view_box: Regex,
    path: Regex,
    fill: Regex,
    stroke: Regex,
}

impl PatternExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            width: Regex::new(r#"(?i)\bwidth\s*=\s*"([^"]+)""#)?,
            height: Regex::new(r#"(?i)\bheight\s*=\s*"([^"]+)""#)?,
            view_box: Regex::new(r#"(?i)\bviewBox\s*=\s*"([^"]+)""#)?,
            path: Regex::new(r"(?i)<path\b")?,
            fill: Regex::new(r#"\bfill\s*=\s*"(#?[a-zA-Z0-9(),.%\s-]+)""#)?,
            stroke: Regex::new(r#"\bstroke\s*=\s*"(#?[a-zA-Z0-9(),.%\s-]+)""#)?,
        })
    }
}

impl MetadataExtractor for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, markup: &str) -> AssetMeta {
        AssetMeta {
            width: first_capture(&self.width, markup),
            height: first_capture(&self.height, markup),
            view_box: first_capture(&self.view_box, markup),
            path_count: self.path.find_iter(markup).count(),
            fills: distinct_captures(&self.fill, markup),
            strokes: distinct_captures(&self.stroke, markup),
        }
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Trimmed, non-empty capture values in first-seen order.
fn distinct_captures(re: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// The richest strategy compiled into this build.
#[cfg(feature = "xml")]
pub fn default_extractor() -> Result<Box<dyn MetadataExtractor>> {
    let extractor = crate::xml::XmlExtractor::new()?;
    debug!(strategy = extractor.name(), "Selected metadata extractor");
    Ok(Box::new(extractor))
}

#[cfg(not(feature = "xml"))]
pub fn default_extractor() -> Result<Box<dyn MetadataExtractor>> {
    let extractor = PatternExtractor::new()?;
    debug!(strategy = extractor.name(), "Selected metadata extractor");
    Ok(Box::new(extractor))
}
