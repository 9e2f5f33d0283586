//! Minimal TOML parser for panel configuration
//!
//! Handles only the subset needed to describe a panel. It does NOT
//! support the full TOML spec and needs no allocator.
//!
//! Supported:
//! - `[panel]`, `[timing.h]` and `[timing.v]` section headers
//! - `key = value` pairs (string, integer, boolean)
//! - Comments (`# ...`), including trailing ones
//!
//! ```toml
//! [panel]
//! label = "disco"
//! preset = "stm32f746g_disco"
//! offset_rotation = 0
//! rotation = 1
//!
//! [timing.h]
//! active = 480
//! ```

use heapless::String;

use super::types::{PanelConfig, PanelTiming, TimingInfo};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Key is not valid in its section
    UnknownKey,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    TimingH,
    TimingV,
}

/// Parse TOML text into a panel configuration
///
/// Keys that are not given keep their [`PanelConfig::default`] values.
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_prefix('[')
                .and_then(|l| l.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    validate(&config)?;
    Ok(config)
}

/// Parse a section header like "panel" or "timing.h"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "panel" => Ok(Section::Panel),
        "timing.h" | "timing.horizontal" => Ok(Section::TimingH),
        "timing.v" | "timing.vertical" => Ok(Section::TimingV),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Drop trailing comments that are not inside a string
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a rotation value (0-7)
fn parse_rotation(value: &str) -> Result<u8, ParseError> {
    let r: u8 = parse_int(value)?;
    if r > 7 {
        return Err(ParseError::InvalidValue);
    }
    Ok(r)
}

/// Look up a named timing preset
fn parse_preset(value: &str) -> Result<PanelTiming, ParseError> {
    match parse_string(value) {
        "stm32f746g_disco" | "rk043fn48h" => Ok(PanelTiming::STM32F746G_DISCO),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PanelConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => Err(ParseError::InvalidSection),
        Section::Panel => {
            match key {
                "label" => {
                    config.label =
                        String::try_from(parse_string(value)).map_err(|_| ParseError::InvalidValue)?
                }
                "preset" => config.timing = parse_preset(value)?,
                "offset_rotation" => config.offset_rotation = parse_rotation(value)?,
                "rotation" => config.rotation = parse_rotation(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
            Ok(())
        }
        Section::TimingH => apply_timing(&mut config.timing.h, key, value),
        Section::TimingV => apply_timing(&mut config.timing.v, key, value),
    }
}

/// Apply a key to one axis of the timing
fn apply_timing(info: &mut TimingInfo, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "sync" => info.sync = parse_int(value)?,
        "back_porch" => info.back_porch = parse_int(value)?,
        "active" => info.active = parse_int(value)?,
        "front_porch" => info.front_porch = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Reject configurations the raster engine cannot drive
fn validate(config: &PanelConfig) -> Result<(), ParseError> {
    if config.timing.h.active == 0 || config.timing.v.active == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("active = 480"), Some(("active", "480")));
        assert_eq!(
            parse_key_value("rotation = 1 # landscape"),
            Some(("rotation", "1"))
        );
        assert_eq!(
            parse_key_value(r#"label = "a#b""#),
            Some(("label", r#""a#b""#))
        );
        assert_eq!(parse_key_value("active ="), None);
        assert_eq!(parse_key_value("no equals sign"), None);
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("panel"), Ok(Section::Panel));
        assert_eq!(parse_section_header(" timing.h "), Ok(Section::TimingH));
        assert_eq!(parse_section_header("timing.vertical"), Ok(Section::TimingV));
        assert_eq!(
            parse_section_header("stepper"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Board panel
[panel]
label = "disco"
offset_rotation = 0
rotation = 1

[timing.h]
sync = 41
back_porch = 13
active = 480
front_porch = 32

[timing.v]
sync = 10
back_porch = 10
active = 272
front_porch = 2
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.label.as_str(), "disco");
        assert_eq!(config.rotation, 1);
        assert_eq!(config.timing, PanelTiming::STM32F746G_DISCO);
    }

    #[test]
    fn test_preset_then_override() {
        let config_str = r#"
[panel]
preset = "stm32f746g_disco"

[timing.h]
active = 320
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.timing.h.active, 320);
        assert_eq!(config.timing.h.sync, 41);
        assert_eq!(config.timing.v.active, 272);
    }

    #[test]
    fn test_rejects_bad_rotation() {
        let result = parse_config("[panel]\nrotation = 8\n");
        assert_eq!(result, Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_rejects_unknown_key() {
        let result = parse_config("[timing.h]\nblanking = 3\n");
        assert_eq!(result, Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_rejects_key_outside_section() {
        let result = parse_config("rotation = 1\n");
        assert_eq!(result, Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_rejects_zero_active() {
        let result = parse_config("[timing.v]\nactive = 0\n");
        assert_eq!(result, Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_rejects_long_label() {
        let result = parse_config("[panel]\nlabel = \"this label is far too long\"\n");
        assert_eq!(result, Err(ParseError::InvalidValue));
    }
}
