//! Pure derivations for remote-API naming constraints.
//!
//! Deterministic, total functions with no failure modes. They exist so that
//! nothing upstream (AP names, model strings) can violate NetBox's slug
//! charset or name-length rules.

/// NetBox's device/interface name ceiling.
const MAX_NAME_LEN: usize = 64;

/// Substitute when slugification strips a string down to nothing.
const EMPTY_SLUG_FALLBACK: &str = "unknown";

/// Derive a NetBox-safe slug: lowercase, spaces to hyphens, everything
/// outside `[a-z0-9_-]` stripped, edge hyphens trimmed.
///
/// Idempotent and never empty.
pub fn slugify(text: &str) -> String {
    let slug: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_')
        .collect();
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        EMPTY_SLUG_FALLBACK.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Trim a discovered name for use as a NetBox device name.
///
/// Drops any DNS-style suffix (everything from the first `.`), then hard
/// truncates to 64 characters.
pub fn truncate_name(name: &str) -> String {
    let base = name.split('.').next().unwrap_or(name);
    base.chars().take(MAX_NAME_LEN).collect()
}

/// Normalize a bare host address to single-host CIDR notation.
///
/// Addresses already carrying a mask pass through unchanged.
pub fn normalize_cidr(address: &str) -> String {
    if address.contains('/') {
        address.to_owned()
    } else {
        format!("{address}/32")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("AIR-AP1852I-B-K9"), "air-ap1852i-b-k9");
        assert_eq!(slugify("Wireless AP"), "wireless-ap");
        assert_eq!(slugify("Cisco Systems, Inc."), "cisco-systems-inc");
    }

    #[test]
    fn slugify_is_idempotent() {
        for input in ["Wireless AP", "--weird--", "A  B", "über café", ""] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn slugify_never_empty_and_no_edge_hyphens() {
        for input in ["", "!!!", "---", "   "] {
            let slug = slugify(input);
            assert!(!slug.is_empty(), "input: {input:?}");
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        }
    }

    #[test]
    fn truncate_cuts_at_first_period() {
        assert_eq!(truncate_name("ap.example.com"), "ap");
        assert_eq!(truncate_name("no-period-name"), "no-period-name");
    }

    #[test]
    fn truncate_enforces_length_ceiling() {
        let long = "x".repeat(70);
        assert_eq!(truncate_name(&long).len(), 64);
    }

    #[test]
    fn cidr_normalization() {
        assert_eq!(normalize_cidr("10.0.0.5"), "10.0.0.5/32");
        assert_eq!(normalize_cidr("10.0.0.5/24"), "10.0.0.5/24");
    }
}
