use crate::types::AssetMeta;

/// Best-effort structural extraction from asset markup.
///
/// Implementations must not fail: when a richer strategy cannot make sense of
/// the input it degrades to whatever it can still read.
pub trait MetadataExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, markup: &str) -> AssetMeta;
}
