//! Property-based tests for the scan/render guarantees
//!
//! Generated scripts stick to canonical token spellings, so rendering an
//! unedited document must give back the input byte-for-byte.

use proptest::prelude::*;
use pto_scan::{from_str, to_string, to_string_with_options, DataType, RenderOptions, Value};

fn qualifier() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]",
        "R[a-e]",
        "V[a-dxym]",
        "T[xyzrs][XYZ]{0,2}",
        "E[rb]",
        Just("Eev".to_string()),
    ]
}

fn float_text() -> impl Strategy<Value = String> {
    (-100_000i64..100_000, 1u32..1000).prop_map(|(whole, frac)| {
        let f = whole as f64 + f64::from(frac) / 1000.0;
        Value::Float(f).to_string()
    })
}

fn field_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i32>().prop_map(|n| n.to_string()),
        float_text(),
        (any::<i16>(), any::<i16>(), any::<i16>(), any::<i16>())
            .prop_map(|(l, r, t, b)| format!("{},{},{},{}", l, r, t, b)),
        (0u32..100).prop_map(|i| format!("={}", i)),
        "[a-zA-Z0-9_ .:,-]{0,12}".prop_map(|s| format!("\"{}\"", s)),
    ]
}

fn data_line() -> impl Strategy<Value = String> {
    (
        "[pvimozck]",
        prop::collection::vec((qualifier(), field_text()), 0..8),
    )
        .prop_map(|(header, fields)| {
            let mut line = header;
            for (q, text) in fields {
                line.push(' ');
                line.push_str(&q);
                line.push_str(&text);
            }
            line.push('\n');
            line
        })
}

fn script_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => data_line(),
        1 => "# [a-z ]{0,20}\n",
        1 => Just("\n".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_canonical_round_trip(lines in prop::collection::vec(script_line(), 0..20)) {
        let input = lines.concat();
        let doc = from_str(&input).unwrap();
        prop_assert_eq!(to_string(&doc).unwrap(), input);
    }

    #[test]
    fn prop_content_only_keeps_data_lines(lines in prop::collection::vec(script_line(), 0..20)) {
        let input = lines.concat();
        let doc = from_str(&input).unwrap();
        let expected: String = lines
            .iter()
            .filter(|l| !l.starts_with('#') && l.as_str() != "\n")
            .cloned()
            .collect();
        prop_assert_eq!(
            to_string_with_options(&doc, RenderOptions::content_only()).unwrap(),
            expected
        );
    }

    #[test]
    fn prop_header_lookup_in_file_order(lines in prop::collection::vec(data_line(), 0..30)) {
        let input = lines.concat();
        let doc = from_str(&input).unwrap();
        for header in ["p", "i", "c"] {
            let numbers: Vec<_> = doc
                .lines_with_header(header)
                .iter()
                .map(|l| l.number())
                .collect();
            let expected: Vec<_> = lines
                .iter()
                .enumerate()
                .filter(|(_, l)| l.starts_with(header))
                .map(|(n, _)| n)
                .collect();
            prop_assert_eq!(numbers, expected);
        }
    }

    #[test]
    fn prop_rebuilding_index_is_idempotent(lines in prop::collection::vec(script_line(), 0..20)) {
        let mut doc = from_str(&lines.concat()).unwrap();
        let before = doc.clone();
        doc.build_index();
        doc.register_slots();
        prop_assert_eq!(doc, before);
    }

    #[test]
    fn prop_echo_is_exact(input in "[ -~\n\r\t]{0,200}") {
        let doc = from_str(&input);
        prop_assert!(doc.is_ok(), "scan failed: {:?}", doc.as_ref().err());
        let mut out = Vec::new();
        doc.unwrap().echo(&mut out).unwrap();
        prop_assert_eq!(out, input.into_bytes());
    }

    #[test]
    fn prop_any_digit_run_scans(digits in "[0-9]{1,80}", sign in "[+-]?") {
        let input = format!("i w{}{} v={} y{}{}.5\n", sign, digits, digits, sign, digits);
        let doc = from_str(&input).unwrap();
        let line = &doc.lines()[0];
        prop_assert_eq!(line.member("w").unwrap().data_type(), DataType::Int);
        prop_assert_eq!(line.member("v").unwrap().data_type(), DataType::Backref);
        prop_assert_eq!(line.member("y").unwrap().data_type(), DataType::Float);

        let again = from_str(&to_string(&doc).unwrap()).unwrap();
        prop_assert_eq!(again.lines()[0].value("w"), line.value("w"));
        prop_assert_eq!(again.lines()[0].value("v"), line.value("v"));
    }

    #[test]
    fn prop_int_field(n in any::<i64>()) {
        let doc = from_str(&format!("i w{}\n", n)).unwrap();
        prop_assert_eq!(doc.lines()[0].value("w"), Some(&Value::Int(n)));
    }
}
