//! University-town listing loader.
//!
//! The listing is line oriented: a state header carrying an `[edit]` marker,
//! followed by one line per town, each optionally annotated with the
//! university name in parentheses and a citation.
//!
//! ```text
//! Alabama[edit]
//! Auburn (Auburn University)[1]
//! Florence (University of North Alabama)
//! ```

use housing_core::{states::normalize_state, Error, Result, Town};
use std::path::Path;
use tracing::{debug, info, warn};

/// Marker that identifies a state header line.
const STATE_MARKER: &str = "[edit]";

/// Load and parse the listing at `path`.
pub fn load_university_towns(path: &Path) -> Result<Vec<Town>> {
    let bytes = std::fs::read(path)?;
    let towns = parse_university_towns(&decode_text(bytes))?;
    info!("loaded {} university towns from {}", towns.len(), path.display());
    Ok(towns)
}

/// Parse the listing into (state, region) pairs in file order.
pub fn parse_university_towns(text: &str) -> Result<Vec<Town>> {
    let mut state: Option<String> = None;
    let mut towns = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        if line.contains(STATE_MARKER) {
            let name = clean_state(line);
            debug!("state header '{}' at line {}", name, i + 1);
            state = Some(normalize_state(&name));
            continue;
        }

        let state = state.as_deref().ok_or_else(|| {
            Error::parse(format!(
                "line {}: town '{}' appears before any state header",
                i + 1,
                line.trim()
            ))
        })?;

        let region = clean_region(line);
        if region.is_empty() {
            warn!("line {}: no town name in '{}'", i + 1, line.trim());
            continue;
        }
        towns.push(Town::new(state, region));
    }

    Ok(towns)
}

/// Drop the parenthetical aside and everything after it.
fn clean_region(line: &str) -> String {
    let region = match line.find(" (") {
        Some(pos) => &line[..pos],
        None => line,
    };
    region.trim().to_string()
}

/// Drop the bracketed editorial annotation and everything after it.
fn clean_state(line: &str) -> String {
    let state = match line.find('[') {
        Some(pos) => &line[..pos],
        None => line,
    };
    state.trim().to_string()
}

/// UTF-8 if valid, else Latin-1.
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("listing is not UTF-8 ({}), decoding as Latin-1", e.utf8_error());
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_listing() {
        let towns =
            parse_university_towns("Alabama[edit]\nAuburn (Auburn University)[1]\nFlorence\n")
                .unwrap();
        assert_eq!(
            towns,
            vec![Town::new("AL", "Auburn"), Town::new("AL", "Florence")]
        );
    }

    #[test]
    fn test_multiple_states() {
        let text = "Michigan[edit]\n\
                    Ann Arbor (University of Michigan)[1]\n\
                    Ypsilanti (Eastern Michigan University)[2]\n\
                    \n\
                    Ohio[edit]\n\
                    Athens (Ohio University)[3]\n";
        let towns = parse_university_towns(text).unwrap();
        assert_eq!(towns.len(), 3);
        assert_eq!(towns[0], Town::new("MI", "Ann Arbor"));
        assert_eq!(towns[1], Town::new("MI", "Ypsilanti"));
        assert_eq!(towns[2], Town::new("OH", "Athens"));
    }

    #[test]
    fn test_crlf_and_padding() {
        let towns = parse_university_towns("  Ohio[edit] \r\n  Oxford (Miami University)\r\n")
            .unwrap();
        assert_eq!(towns, vec![Town::new("OH", "Oxford")]);
    }

    #[test]
    fn test_unknown_state_left_as_is() {
        let towns = parse_university_towns("Atlantis[edit]\nPoseidonia\n").unwrap();
        assert_eq!(towns, vec![Town::new("Atlantis", "Poseidonia")]);
    }

    #[test]
    fn test_parenthesis_without_space_is_kept() {
        // Only " (" starts an aside.
        let towns = parse_university_towns("Ohio[edit]\nKent(Kent State)\n").unwrap();
        assert_eq!(towns[0].region, "Kent(Kent State)");
    }

    #[test]
    fn test_town_before_header_is_parse_error() {
        let err = parse_university_towns("Auburn (Auburn University)\nAlabama[edit]\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("line 1")));
    }

    #[test]
    fn test_latin1_fallback() {
        // "Ohio[edit]\nCañon\n" with ñ as the single Latin-1 byte 0xF1.
        let mut bytes = b"Ohio[edit]\nCa".to_vec();
        bytes.push(0xF1);
        bytes.extend_from_slice(b"on\n");
        let towns = parse_university_towns(&decode_text(bytes)).unwrap();
        assert_eq!(towns[0].region, "Cañon");
    }
}
