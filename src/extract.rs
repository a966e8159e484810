use crate::config::Selectors;
use crate::error::Result;
use crate::page::Tab;

/// Label preceding the OS name in a characteristics block.
const OS_LABEL: &str = "Operating System";

/// Outcome of reading one detail page. Absence is an expected, common
/// result (accessories have no OS, some phones list one without a
/// version), so it is a variant rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Found(String),
    NotFound,
}

/// Scan the rendered lines of a characteristics block for an OS version.
///
/// The block renders as alternating label/value lines. A hit requires the
/// full chain: an "Operating System" line, the OS name on the next line,
/// a "Version {os}" line, and the version string on the line after that.
/// Anything short of that chain is `NotFound`.
pub fn scan_characteristics(lines: &[&str]) -> ExtractionResult {
    fn scan(lines: &[&str]) -> Option<String> {
        let os_at = lines.iter().position(|l| *l == OS_LABEL)?;
        let os = lines.get(os_at + 1)?;
        let version_label = format!("Version {os}");
        let version_at = lines.iter().position(|l| *l == version_label)?;
        let version = lines.get(version_at + 1)?;
        Some((*version).to_string())
    }

    match scan(lines) {
        Some(version) => ExtractionResult::Found(version),
        None => ExtractionResult::NotFound,
    }
}

/// Read the characteristics section of an open detail page and extract
/// the OS version. A missing section or missing labels yield
/// `Ok(NotFound)`; only transport-level failures surface as errors.
pub async fn extract_os(tab: &Tab, selectors: &Selectors) -> Result<ExtractionResult> {
    let section = match tab.find_one(&selectors.characteristics).await {
        Ok(el) => el,
        Err(_) => return Ok(ExtractionResult::NotFound),
    };

    let text = match section.inner_text().await {
        Ok(text) => text,
        Err(_) => return Ok(ExtractionResult::NotFound),
    };

    let lines: Vec<&str> = text.lines().collect();
    Ok(scan_characteristics(&lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_chain_yields_version() {
        let lines = [
            "Screen Size",
            "6.1\"",
            "Operating System",
            "Android",
            "RAM",
            "8 GB",
            "Version Android",
            "12",
            "Battery",
            "4500 mAh",
        ];
        assert_eq!(
            scan_characteristics(&lines),
            ExtractionResult::Found("12".into())
        );
    }

    #[test]
    fn missing_os_label_yields_not_found() {
        let lines = ["Screen Size", "6.1\"", "Battery", "4500 mAh"];
        assert_eq!(scan_characteristics(&lines), ExtractionResult::NotFound);
    }

    #[test]
    fn os_without_version_label_yields_not_found() {
        let lines = ["Operating System", "Android", "Battery", "4500 mAh"];
        assert_eq!(scan_characteristics(&lines), ExtractionResult::NotFound);
    }

    #[test]
    fn version_label_for_wrong_os_yields_not_found() {
        let lines = ["Operating System", "Android", "Version iOS", "16"];
        assert_eq!(scan_characteristics(&lines), ExtractionResult::NotFound);
    }

    #[test]
    fn os_label_at_end_of_block_yields_not_found() {
        let lines = ["Screen Size", "6.1\"", "Operating System"];
        assert_eq!(scan_characteristics(&lines), ExtractionResult::NotFound);
    }

    #[test]
    fn version_label_at_end_of_block_yields_not_found() {
        let lines = ["Operating System", "Android", "Version Android"];
        assert_eq!(scan_characteristics(&lines), ExtractionResult::NotFound);
    }

    #[test]
    fn empty_block_yields_not_found() {
        assert_eq!(scan_characteristics(&[]), ExtractionResult::NotFound);
    }

    #[test]
    fn scan_is_pure() {
        let lines = ["Operating System", "iOS", "Version iOS", "16.2"];
        let first = scan_characteristics(&lines);
        let second = scan_characteristics(&lines);
        assert_eq!(first, second);
        assert_eq!(first, ExtractionResult::Found("16.2".into()));
    }
}
