use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::Report;

static SECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Ss]ector\s+([0-9]+)").expect("sector pattern is valid"));

/// First sector number mentioned in a free-text address.
pub fn extract_sector(address: &str) -> Option<&str> {
    SECTOR_RE
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Number of reports per sector token, keyed by the digits exactly as
/// written (`05` and `5` are distinct). Reports without a token are skipped.
pub fn sector_frequency(reports: &[Report]) -> BTreeMap<String, usize> {
    let mut freq = BTreeMap::new();
    for report in reports {
        if let Some(sector) = extract_sector(report.address_or_empty()) {
            *freq.entry(sector.to_string()).or_insert(0) += 1;
        }
    }
    freq
}

/// Display order for sector tokens: numeric by length, then lexically.
pub fn sorted_by_sector(freq: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut rows: Vec<_> = freq.into_iter().collect();
    rows.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    rows
}
