//! Extracts access-point records from `show ap config general` output.
//!
//! The output is free-form labeled text: blocks of
//! `Field Name.......................... value` lines, one block per AP,
//! each block opened by a `Cisco AP Name` line. Parsing is a single
//! left-to-right scan with one current-record accumulator and best-effort
//! semantics: lines that match no marker are ignored, and nothing here
//! ever fails on malformed input.

/// Line marker opening a new record block.
const RECORD_START: &str = "Cisco AP Name";

/// Field markers. Matching is "contains" with first-match-wins per field,
/// so ordering and exclusions matter: several markers are substrings of
/// longer labels that must not satisfy them.
const MODEL: &str = "AP Model";
const RADIO_MAC: &str = "Radio MAC Address";
const ETHERNET_MAC: &str = "MAC Address";
const IP_ADDRESS: &str = "IP Address";
const IP_ADDRESS_EXCLUDES: [&str; 2] = ["IP Address Configuration", "Fallback IP Address"];
const SERIAL: &str = "Serial Number";

/// The controller prints this when an AP has not acquired an address.
const NO_ADDRESS: &str = "0.0.0.0";

/// AP names carrying no encoded facility number. These map to the shared
/// head-end facility, id "00".
const HEAD_END_PREFIXES: [&str; 3] = ["HQ", "NOC", "LAB"];
const HEAD_END_FACILITY: &str = "00";

/// Standard AP names look like `APN-008-01`: prefix, zero-padded facility
/// number, unit suffix.
const NAME_PREFIX: &str = "APN-";

/// One access point as discovered on the controller.
///
/// Built by the extractor and immutable afterward. A record whose
/// `facility_id` is `None` is never reconciled — that is the engine's
/// skip signal, not an error.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AccessPointRecord {
    pub name: String,
    pub model: Option<String>,
    pub ethernet_mac: Option<String>,
    pub radio_mac: Option<String>,
    pub ip_address: Option<String>,
    pub serial: Option<String>,
    /// Derived from `name` at record creation; see [`facility_id`].
    pub facility_id: Option<String>,
}

impl AccessPointRecord {
    fn new(name: String) -> Self {
        let facility_id = facility_id(&name);
        Self {
            name,
            model: None,
            ethernet_mac: None,
            radio_mac: None,
            ip_address: None,
            serial: None,
            facility_id,
        }
    }
}

/// Derive the facility id encoded in an AP name.
///
/// Head-end names (`HQ*`, `NOC*`, `LAB*`) map to the fixed id `"00"`.
/// `APN-<digits>-...` names yield the digits with leading zeros stripped
/// by numeric round-trip (`"008"` → `"8"`). Anything else yields `None`.
pub fn facility_id(name: &str) -> Option<String> {
    if HEAD_END_PREFIXES.iter().any(|p| name.starts_with(p)) {
        return Some(HEAD_END_FACILITY.to_owned());
    }
    let digits = name.strip_prefix(NAME_PREFIX)?.split('-').next()?;
    let number: u32 = digits.parse().ok()?;
    Some(number.to_string())
}

/// Parse one command's raw output into the discovered records.
///
/// Stateless and restartable: call it as many times as you like. The final
/// accumulator (not followed by another start marker) is flushed at EOF.
pub fn parse_ap_inventory(raw: &str) -> Vec<AccessPointRecord> {
    let mut records = Vec::new();
    let mut current: Option<AccessPointRecord> = None;
    // The sentinel address stores nothing, so "field already filled" cannot
    // stand in for "marker already consumed" here. Without this flag a later
    // line like `Primary Cisco Switch IP Address` would claim the field.
    let mut ip_seen = false;

    for line in raw.lines() {
        if line.contains(RECORD_START) {
            if let Some(done) = current.take() {
                records.push(done);
            }
            if let Some(name) = field_value(line, RECORD_START) {
                current = Some(AccessPointRecord::new(name));
            }
            ip_seen = false;
            continue;
        }

        let Some(rec) = current.as_mut() else {
            // Field lines before the first start marker belong to no record.
            continue;
        };

        if rec.model.is_none() && line.contains(MODEL) {
            rec.model = field_value(line, MODEL);
        } else if rec.radio_mac.is_none() && line.contains(RADIO_MAC) {
            rec.radio_mac = field_value(line, RADIO_MAC);
        } else if rec.ethernet_mac.is_none()
            && line.contains(ETHERNET_MAC)
            && !line.contains(RADIO_MAC)
        {
            rec.ethernet_mac = field_value(line, ETHERNET_MAC);
        } else if !ip_seen
            && line.contains(IP_ADDRESS)
            && !IP_ADDRESS_EXCLUDES.iter().any(|ex| line.contains(ex))
        {
            ip_seen = true;
            rec.ip_address = field_value(line, IP_ADDRESS).filter(|v| v != NO_ADDRESS);
        } else if rec.serial.is_none() && line.contains(SERIAL) {
            rec.serial = field_value(line, SERIAL);
        }
    }

    if let Some(done) = current {
        records.push(done);
    }
    records
}

/// Pull the value out of a `Label.......... value` line.
///
/// Takes everything after the marker, trims the dot leader and surrounding
/// whitespace. Returns `None` for a label with nothing after it.
fn field_value(line: &str, marker: &str) -> Option<String> {
    let at = line.find(marker)?;
    let rest = &line[at + marker.len()..];
    let value = rest.trim_start_matches(['.', ' ']).trim_end();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // ── Facility-id derivation ──────────────────────────────────────

    #[test]
    fn head_end_prefixes_map_to_sentinel() {
        for name in ["HQ-AP-01", "NOC-AP-02", "LAB-AP-03"] {
            assert_eq!(facility_id(name).as_deref(), Some("00"), "{name}");
        }
    }

    #[test]
    fn numeric_facility_strips_leading_zeros() {
        assert_eq!(facility_id("APN-008-01").as_deref(), Some("8"));
        assert_eq!(facility_id("APN-081-03").as_deref(), Some("81"));
    }

    #[test]
    fn unrecognized_names_have_no_facility() {
        assert_eq!(facility_id("AP-no-pattern"), None);
        assert_eq!(facility_id("APN-abc-01"), None);
        assert_eq!(facility_id(""), None);
    }

    // ── Record extraction ───────────────────────────────────────────

    const TRANSCRIPT: &str = "\
Cisco AP Identifier.............................. 1
Cisco AP Name.................................... APN-008-01
Country Code..................................... US
AP Model......................................... AIR-AP1852I-B-K9
IP Address Configuration......................... DHCP
IP Address....................................... 10.1.1.5
Fallback IP Address.............................. 10.99.0.1
MAC Address...................................... aa:bb:cc:dd:ee:01
Radio MAC Address................................ aa:bb:cc:dd:ee:10
AP Serial Number................................. FGL1111A001
Primary Cisco Switch IP Address.................. 10.0.0.2
Cisco AP Identifier.............................. 2
Cisco AP Name.................................... HQ-AP-7
AP Model......................................... AIR-AP2802I-B-K9
IP Address Configuration......................... DHCP
IP Address....................................... 0.0.0.0
MAC Address...................................... aa:bb:cc:dd:ee:02
";

    #[test]
    fn extracts_both_records_with_correct_fields() {
        let records = parse_ap_inventory(TRANSCRIPT);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.name, "APN-008-01");
        assert_eq!(first.model.as_deref(), Some("AIR-AP1852I-B-K9"));
        assert_eq!(first.ethernet_mac.as_deref(), Some("aa:bb:cc:dd:ee:01"));
        assert_eq!(first.radio_mac.as_deref(), Some("aa:bb:cc:dd:ee:10"));
        assert_eq!(first.ip_address.as_deref(), Some("10.1.1.5"));
        assert_eq!(first.serial.as_deref(), Some("FGL1111A001"));
        assert_eq!(first.facility_id.as_deref(), Some("8"));
    }

    #[test]
    fn sentinel_address_is_normalized_to_absent() {
        let records = parse_ap_inventory(TRANSCRIPT);
        let second = &records[1];
        assert_eq!(second.name, "HQ-AP-7");
        assert_eq!(second.ip_address, None);
        assert_eq!(second.facility_id.as_deref(), Some("00"));
        // Fields without a marker line stay unset.
        assert_eq!(second.serial, None);
        assert_eq!(second.radio_mac, None);
    }

    #[test]
    fn sentinel_address_does_not_let_a_later_address_claim_the_field() {
        // A real block ends with the switch's address; once the AP's own
        // IP line was the sentinel, nothing else may fill the field.
        let raw = "\
Cisco AP Name.................................... APN-003-02
IP Address Configuration......................... DHCP
IP Address....................................... 0.0.0.0
Primary Cisco Switch IP Address.................. 10.0.0.2
";
        let records = parse_ap_inventory(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip_address, None);
    }

    #[test]
    fn round_trip_through_pager_with_split_marker() {
        // The pagination marker lands mid-line, split across two reads —
        // exactly what the channel delivers on a paged screen.
        let (a, b) = TRANSCRIPT.split_at(200);
        let mut pager = crate::PageBuffer::new();
        pager.feed(format!("{a}--Mo").as_bytes());
        pager.feed(format!("re--{b}").as_bytes());

        let output = pager.into_output();
        assert!(!output.contains("--More--"));

        let records = parse_ap_inventory(&output);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "APN-008-01");
        assert_eq!(records[1].name, "HQ-AP-7");
    }

    #[test]
    fn exclusion_rules_keep_longer_labels_out() {
        let records = parse_ap_inventory(TRANSCRIPT);
        // Neither "IP Address Configuration", "Fallback IP Address" nor the
        // switch address may claim the IP field.
        assert_eq!(records[0].ip_address.as_deref(), Some("10.1.1.5"));
        // "Radio MAC Address" must not claim the ethernet MAC field.
        assert_eq!(records[0].ethernet_mac.as_deref(), Some("aa:bb:cc:dd:ee:01"));
    }

    #[test]
    fn unmarked_noise_is_silently_ignored() {
        let records = parse_ap_inventory("garbage\nmore garbage\n");
        assert!(records.is_empty());

        let records = parse_ap_inventory("AP Model...... X\nCisco AP Name.... APN-001-01\n");
        // The model line before any start marker belongs to no record.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].model, None);
    }
}
