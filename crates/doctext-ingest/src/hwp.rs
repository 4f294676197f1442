use std::path::Path;

use doctext_core::{ExtractError, TextExtractor};

/// Text returned for every `.hwp` upload until binary HWP parsing exists.
pub const HWP_PLACEHOLDER: &str = "hwp 텍스트 추출은 별도 구현 필요";

/// Stand-in for legacy binary HWP files.
///
/// Succeeds with [`HWP_PLACEHOLDER`] without reading the file, keeping the
/// success path uniform across formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct HwpPlaceholder;

impl TextExtractor for HwpPlaceholder {
    fn extract_text(&self, _path: &Path) -> Result<String, ExtractError> {
        Ok(HWP_PLACEHOLDER.to_string())
    }

    fn name(&self) -> &str {
        "hwp-placeholder"
    }
}
