//! Variant calls and genotype normalization.

use serde::{Deserialize, Serialize};

/// Canonical pair reported when a genotype is absent or empty.
pub const UNKNOWN_PAIR: &str = "Unknown";

/// Alphabet accepted for a complete call: nucleotides plus 23andMe's indel codes.
const CALL_ALPHABET: &[u8] = b"ACGTDI";

/// A single (variant id, genotype) pair as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantCall {
    pub variant_id: String,
    pub genotype: Option<String>,
}

impl VariantCall {
    pub fn new(variant_id: &str, genotype: Option<&str>) -> Self {
        Self {
            variant_id: variant_id.to_string(),
            genotype: genotype.map(str::to_string),
        }
    }
}

/// Returns true if the id has the canonical rsID shape (`rs` followed by digits).
#[must_use]
pub fn is_rsid(id: &str) -> bool {
    match (id.get(..2), id.get(2..)) {
        (Some(prefix), Some(digits)) => {
            prefix.eq_ignore_ascii_case("rs")
                && !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Whether the order of the two reported alleles carries meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Allele order is arbitrary; pairs are sorted.
    Undirected,
    /// The caller supplies a reference/variant ordered convention; pairs are kept as given.
    Directed,
}

/// A genotype reduced to its canonical, comparable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedGenotype {
    pub variant_id: String,
    pub canonical_pair: String,
    pub is_complete: bool,
}

impl NormalizedGenotype {
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.canonical_pair == UNKNOWN_PAIR
    }
}

/// Canonicalize a raw genotype string.
///
/// Trims, uppercases and strips `/`, `-`, space and tab separators. Two-character payloads of an
/// undirected variant are sorted, so `"G/A"` and `"ag"` both become `"AG"`. Absent or empty input
/// (including AncestryDNA/23andMe no-calls such as `"--"`) and any spelling of "unknown" become
/// `"Unknown"`. Longer or irregular payloads pass through and are left for the caller to treat as
/// unresolved.
#[must_use]
pub fn normalize(variant_id: &str, raw: Option<&str>, orientation: Orientation) -> NormalizedGenotype {
    let canonical_pair = match raw {
        None => UNKNOWN_PAIR.to_string(),
        Some(raw) => canonicalize(raw, orientation),
    };
    let is_complete = canonical_pair.len() == 2
        && canonical_pair.bytes().all(|b| CALL_ALPHABET.contains(&b));

    tracing::trace!(variant_id, raw = ?raw, canonical = %canonical_pair, "normalized genotype");

    NormalizedGenotype {
        variant_id: variant_id.trim().to_string(),
        canonical_pair,
        is_complete,
    }
}

fn canonicalize(raw: &str, orientation: Orientation) -> String {
    let mut bytes: Vec<u8> = raw
        .trim()
        .bytes()
        .filter(|b| !matches!(b, b'/' | b'-' | b' ' | b'\t'))
        .map(|b| b.to_ascii_uppercase())
        .collect();

    if bytes.is_empty() || bytes.eq_ignore_ascii_case(UNKNOWN_PAIR.as_bytes()) {
        return UNKNOWN_PAIR.to_string();
    }
    if bytes.len() == 2 && orientation == Orientation::Undirected {
        bytes.sort_unstable();
    }

    // Sorting can split a multi-byte character; such input is unparseable anyway.
    String::from_utf8(bytes).unwrap_or_else(|_| UNKNOWN_PAIR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pair(raw: Option<&str>) -> String {
        normalize("rs1", raw, Orientation::Undirected).canonical_pair
    }

    #[test]
    fn separators_and_case() {
        assert_eq!(pair(Some("c/t")), "CT");
        assert_eq!(pair(Some(" T-C ")), "CT");
        assert_eq!(pair(Some("G A")), "AG");
        assert_eq!(pair(Some("AA")), "AA");
    }

    #[test]
    fn missing_data_is_unknown() {
        let inputs = [
            None,
            Some(""),
            Some("   "),
            Some("--"),
            Some("/"),
            Some("unknown/"),
            Some("un-known"),
        ];
        for raw in inputs {
            let g = normalize("rs1", raw, Orientation::Undirected);
            assert!(g.is_unknown(), "{raw:?}");
            assert!(!g.is_complete);
        }
    }

    #[test]
    fn spelled_unknown_is_stable() {
        let once = pair(Some("U nknown/"));
        assert_eq!(once, UNKNOWN_PAIR);
        assert_eq!(pair(Some(&once)), once);
    }

    #[test]
    fn irregular_payload_passes_through() {
        let g = normalize("rs1", Some("a/g/t"), Orientation::Undirected);
        assert_eq!(g.canonical_pair, "AGT");
        assert!(!g.is_complete);

        let g = normalize("rs1", Some("00"), Orientation::Undirected);
        assert_eq!(g.canonical_pair, "00");
        assert!(!g.is_complete);

        let g = normalize("rs1", Some("a"), Orientation::Undirected);
        assert_eq!(g.canonical_pair, "A");
        assert!(!g.is_complete);
    }

    #[test]
    fn directed_keeps_order() {
        let g = normalize("rs1", Some("g/a"), Orientation::Directed);
        assert_eq!(g.canonical_pair, "GA");
        assert!(g.is_complete);
    }

    #[test]
    fn indel_codes_are_complete() {
        let g = normalize("rs1", Some("DI"), Orientation::Undirected);
        assert_eq!(g.canonical_pair, "DI");
        assert!(g.is_complete);
    }

    #[test]
    fn rsid_shape() {
        assert!(is_rsid("rs4148323"));
        assert!(is_rsid("RS6025"));
        assert!(!is_rsid("rs"));
        assert!(!is_rsid("i6025"));
        assert!(!is_rsid("rs60a25"));
    }

    #[test]
    fn variant_call_from_json() {
        let call: VariantCall =
            serde_json::from_str(r#"{"variantId": "rs6025", "genotype": null}"#).unwrap();
        assert_eq!(call, VariantCall::new("rs6025", None));
    }

    proptest! {
        #[test]
        fn undirected_pairs_are_order_insensitive(x in "[ACGTacgt]", y in "[ACGTacgt]") {
            let xy = pair(Some(&format!("{x}{y}")));
            let yx = pair(Some(&format!("{y}{x}")));
            prop_assert_eq!(xy, yx);
        }

        #[test]
        fn normalization_is_idempotent(raw in "[ACGTKNOUWacgtknouw/ -]{0,8}") {
            let once = pair(Some(&raw));
            let twice = pair(Some(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn directed_normalization_is_idempotent(raw in "[ACGTacgt/ ]{0,4}") {
            let once = normalize("rs1", Some(&raw), Orientation::Directed).canonical_pair;
            let twice = normalize("rs1", Some(&once), Orientation::Directed).canonical_pair;
            prop_assert_eq!(once, twice);
        }
    }
}
