use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use svgvault_core::{AssetMeta, MetadataExtractor, Result};

use crate::extract::PatternExtractor;

/// Reads `width`, `height` and `viewBox` from the root `<svg>` element.
///
/// Attributes the root does not declare are filled from the pattern
/// strategy; markup that cannot be parsed up to its root element is handled
/// by the pattern strategy alone. Path and color data always come from the
/// pattern strategy.
pub struct XmlExtractor {
    fallback: PatternExtractor,
}

#[derive(Debug, Default, PartialEq)]
struct RootAttributes {
    width: Option<String>,
    height: Option<String>,
    view_box: Option<String>,
}

impl XmlExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self { fallback: PatternExtractor::new()? })
    }
}

impl MetadataExtractor for XmlExtractor {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn extract(&self, markup: &str) -> AssetMeta {
        let basics = self.fallback.extract(markup);
        match read_root_attributes(markup) {
            Ok(Some(root)) => AssetMeta {
                width: root.width.or(basics.width),
                height: root.height.or(basics.height),
                view_box: root.view_box.or(basics.view_box),
                ..basics
            },
            Ok(None) => basics,
            Err(e) => {
                debug!(error = %e, "Markup did not parse, using pattern extraction");
                basics
            }
        }
    }
}

/// `Ok(None)` when the document has no element at all.
fn read_root_attributes(markup: &str) -> std::result::Result<Option<RootAttributes>, quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => return root_attributes(&e).map(Some),
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn root_attributes(element: &BytesStart) -> std::result::Result<RootAttributes, quick_xml::Error> {
    let mut root = RootAttributes::default();
    if !element.local_name().as_ref().eq_ignore_ascii_case(b"svg") {
        return Ok(root);
    }
    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        if value.is_empty() {
            continue;
        }
        let slot = match attr.key.as_ref() {
            b"width" => &mut root.width,
            b"height" => &mut root.height,
            b"viewBox" => &mut root.view_box,
            _ => continue,
        };
        *slot = Some(value.into_owned());
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(markup: &str) -> AssetMeta {
        XmlExtractor::new().unwrap().extract(markup)
    }

    #[test]
    fn prefers_root_attributes_over_first_occurrence() {
        let meta = extract(
            r#"<?xml version="1.0"?>
            <!-- exported -->
            <svg xmlns="http://www.w3.org/2000/svg" viewBox='0 0 16 16' width="16" height="16">
                <rect width="4" height="4"/><path d="M0 0"/>
            </svg>"#,
        );
        assert_eq!(meta.width.as_deref(), Some("16"));
        assert_eq!(meta.height.as_deref(), Some("16"));
        assert_eq!(meta.view_box.as_deref(), Some("0 0 16 16"));
        assert_eq!(meta.path_count, 1);
    }

    #[test]
    fn missing_root_attributes_fall_back_to_patterns() {
        let meta = extract(r#"<svg viewBox="0 0 8 8"><rect width="3" height="5"/></svg>"#);
        assert_eq!(meta.view_box.as_deref(), Some("0 0 8 8"));
        assert_eq!(meta.width.as_deref(), Some("3"));
        assert_eq!(meta.height.as_deref(), Some("5"));
    }

    #[test]
    fn accepts_prefixed_and_uppercase_roots() {
        assert_eq!(
            read_root_attributes(r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" width="9"/>"#).unwrap(),
            Some(RootAttributes { width: Some("9".into()), ..Default::default() })
        );
        assert_eq!(
            read_root_attributes(r#"<SVG height="7"></SVG>"#).unwrap(),
            Some(RootAttributes { height: Some("7".into()), ..Default::default() })
        );
    }

    #[test]
    fn non_svg_root_contributes_nothing() {
        let root = read_root_attributes(r#"<html width="100"><svg width="5"/></html>"#).unwrap();
        assert_eq!(root, Some(RootAttributes::default()));
    }

    #[test]
    fn broken_markup_uses_pattern_strategy() {
        let markup = r#"<!-- unterminated <svg width="12" height="12"><path d="M0"/></svg>"#;
        assert!(read_root_attributes(markup).is_err());
        let meta = extract(markup);
        assert_eq!(meta.width.as_deref(), Some("12"));
        assert_eq!(meta.path_count, 1);
    }

    #[test]
    fn plain_text_has_no_root() {
        assert_eq!(read_root_attributes("just text").unwrap(), None);
    }
}
