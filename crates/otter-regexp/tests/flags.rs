//! Flag string parsing
//!
//! Alphabet validation, duplicate detection order, and the sticky rule.

use otter_regexp::{FlagError, FlagSet, JsString, parse_flags};

fn parse(flags: &str) -> Result<FlagSet, FlagError> {
    parse_flags(&JsString::new(flags))
}

#[test]
fn test_each_letter_sets_its_bit() {
    let cases = [
        ("d", FlagSet::HAS_INDICES),
        ("g", FlagSet::GLOBAL),
        ("i", FlagSet::IGNORE_CASE),
        ("m", FlagSet::MULTILINE),
        ("s", FlagSet::DOT_ALL),
        ("u", FlagSet::UNICODE),
        ("v", FlagSet::UNICODE_SETS),
        ("y", FlagSet::STICKY),
    ];
    for (letter, bit) in cases {
        let parsed = parse(letter).unwrap();
        assert_eq!(parsed.exposed(), bit, "flag {letter}");
    }
}

#[test]
fn test_exposed_bits_match_letters_in_any_order() {
    let parsed = parse("smig").unwrap();
    assert_eq!(
        parsed.exposed(),
        FlagSet::DOT_ALL | FlagSet::MULTILINE | FlagSet::IGNORE_CASE | FlagSet::GLOBAL
    );

    let all = parse("dgimsuy").unwrap();
    assert_eq!(all.exposed(), FlagSet::EXPOSED - FlagSet::UNICODE_SETS);
}

#[test]
fn test_empty_flags() {
    let parsed = parse("").unwrap();
    assert_eq!(parsed, FlagSet::DEFAULT);
    assert!(parsed.exposed().is_empty());
    assert!(parsed.contains(FlagSet::SCAN));
}

#[test]
fn test_global_is_stateful() {
    let parsed = parse("g").unwrap();
    assert!(parsed.contains(FlagSet::GLOBAL | FlagSet::STATEFUL | FlagSet::SCAN));
}

#[test]
fn test_sticky_clears_scan_but_not_global() {
    let sticky = parse("y").unwrap();
    assert!(sticky.contains(FlagSet::STICKY | FlagSet::STATEFUL));
    assert!(!sticky.contains(FlagSet::SCAN));
    assert!(!sticky.contains(FlagSet::GLOBAL));

    for flags in ["gy", "yg"] {
        let parsed = parse(flags).unwrap();
        assert!(parsed.contains(FlagSet::GLOBAL | FlagSet::STICKY), "{flags}");
        assert!(!parsed.contains(FlagSet::SCAN), "{flags}");
    }
}

#[test]
fn test_duplicate_flag_reports_letter() {
    assert_eq!(parse("gg"), Err(FlagError::Duplicate('g')));
    assert_eq!(parse("gimg"), Err(FlagError::Duplicate('g')));
    assert_eq!(parse("yy"), Err(FlagError::Duplicate('y')));
}

#[test]
fn test_first_repeat_wins() {
    // 'i' repeats before 'g' does
    assert_eq!(parse("giig"), Err(FlagError::Duplicate('i')));
    // a later unknown letter does not mask an earlier repeat
    assert_eq!(parse("mmx"), Err(FlagError::Duplicate('m')));
}

#[test]
fn test_unknown_flag_reports_letter() {
    assert_eq!(parse("x"), Err(FlagError::Unknown('x')));
    assert_eq!(parse("G"), Err(FlagError::Unknown('G')));
    assert_eq!(parse("g "), Err(FlagError::Unknown(' ')));
}

#[test]
fn test_unknown_before_duplicate_wins() {
    assert_eq!(parse("gxg"), Err(FlagError::Unknown('x')));
}

#[test]
fn test_non_bmp_and_lone_surrogate_flags() {
    assert_eq!(parse("g\u{1F600}"), Err(FlagError::Unknown('\u{1F600}')));
    let lone = JsString::from_utf16(vec![u16::from(b'g'), 0xD800]);
    assert_eq!(
        parse_flags(&lone),
        Err(FlagError::Unknown(char::REPLACEMENT_CHARACTER))
    );
}

#[test]
fn test_unicode_conflict_is_not_a_flag_error() {
    let parsed = parse("uv").unwrap();
    assert!(parsed.contains(FlagSet::UNICODE | FlagSet::UNICODE_SETS));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        FlagError::Duplicate('g').to_string(),
        "Repeated RegExp flag 'g'"
    );
    assert_eq!(FlagError::Unknown('x').to_string(), "Invalid RegExp flag 'x'");
}

#[test]
fn test_canonical_flag_string() {
    assert_eq!(parse("ygsmid").unwrap().to_flags_string(), "dgimsy");
    assert_eq!(parse("vg").unwrap().to_flags_string(), "gv");
    assert_eq!(FlagSet::DEFAULT.to_flags_string(), "");
}

#[test]
fn test_from_str() {
    let parsed: FlagSet = "gi".parse().unwrap();
    assert!(parsed.contains(FlagSet::GLOBAL | FlagSet::IGNORE_CASE));
    assert_eq!("q".parse::<FlagSet>(), Err(FlagError::Unknown('q')));
}
