//! Property tests for header detection and conversion invariants.

use nbt::{decode_document, encode_document, Compound, Document, Tag};
use proptest::prelude::*;
use world::{
    convert_level_dat, detect_header, LevelDatHeader, NoProgress, EDUCATION_KEYS, HEADER_SIZE,
};

fn arb_scalar() -> impl Strategy<Value = Tag> {
    prop_oneof![
        any::<i8>().prop_map(Tag::Byte),
        any::<i32>().prop_map(Tag::Int),
        any::<i64>().prop_map(Tag::Long),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Tag::String),
    ]
}

/// A flat root with regular keys plus an arbitrary subset of the
/// Education keys.
fn arb_root() -> impl Strategy<Value = (Compound, Vec<&'static str>)> {
    (
        // Short lowercase keys cannot collide with the camel-case
        // Education key names.
        prop::collection::vec(("[a-z]{1,8}", arb_scalar()), 0..6),
        prop::collection::vec(any::<bool>(), EDUCATION_KEYS.len()),
        prop::collection::vec(arb_scalar(), EDUCATION_KEYS.len()),
    )
        .prop_map(|(base, edu_present, edu_values)| {
            let mut root = Compound::new();
            for (name, tag) in base {
                root.entry(name).or_insert(tag);
            }
            let mut expected = Vec::new();
            for ((key, present), value) in
                EDUCATION_KEYS.iter().zip(edu_present).zip(edu_values)
            {
                if present {
                    root.insert((*key).to_owned(), value);
                    expected.push(*key);
                }
            }
            (root, expected)
        })
}

proptest! {
    #[test]
    fn prop_header_detection_inverts_encoding(
        version in 1u32..100,
        body in prop::collection::vec(any::<u8>(), 1..256),
    ) {
        let header = LevelDatHeader::new(version, u32::try_from(body.len()).unwrap());
        let mut bytes = header.encode().to_vec();
        bytes.extend_from_slice(&body);

        let (detected, rest) = detect_header(&bytes);
        prop_assert_eq!(detected, Some(header));
        prop_assert_eq!(rest, body.as_slice());
    }

    #[test]
    fn prop_conversion_removes_exactly_the_education_keys(
        (root, expected) in arb_root(),
        version in 1u32..100,
        headered in any::<bool>(),
    ) {
        let document = Document { name: String::new(), root };
        let payload = encode_document(&document).unwrap();
        let input = if headered {
            let header = LevelDatHeader::new(version, u32::try_from(payload.len()).unwrap());
            let mut bytes = header.encode().to_vec();
            bytes.extend_from_slice(&payload);
            bytes
        } else {
            payload
        };

        let outcome = convert_level_dat(&input, &mut NoProgress).unwrap();
        prop_assert_eq!(&outcome.removed, &expected);
        prop_assert_eq!(outcome.header.is_some(), headered);

        // The output decodes cleanly and carries no Education keys, while
        // every regular key survives in its original position.
        let (_, body) = detect_header(&outcome.bytes);
        let (converted, consumed) = decode_document(body).unwrap();
        prop_assert_eq!(consumed, body.len());
        for key in EDUCATION_KEYS {
            prop_assert!(!converted.root.contains_key(key));
        }
        let survivors: Vec<&String> = document
            .root
            .keys()
            .filter(|key| !EDUCATION_KEYS.contains(&key.as_str()))
            .collect();
        let after: Vec<&String> = converted.root.keys().collect();
        prop_assert_eq!(survivors, after);
    }

    #[test]
    fn prop_conversion_is_idempotent(
        (root, _expected) in arb_root(),
        version in 1u32..100,
        headered in any::<bool>(),
    ) {
        let document = Document { name: String::new(), root };
        let payload = encode_document(&document).unwrap();
        let input = if headered {
            let header = LevelDatHeader::new(version, u32::try_from(payload.len()).unwrap());
            let mut bytes = header.encode().to_vec();
            bytes.extend_from_slice(&payload);
            bytes
        } else {
            payload
        };

        let first = convert_level_dat(&input, &mut NoProgress).unwrap();
        let second = convert_level_dat(&first.bytes, &mut NoProgress).unwrap();

        prop_assert!(second.removed.is_empty());
        prop_assert_eq!(&second.bytes, &first.bytes);
    }

    #[test]
    fn prop_headered_output_reconciles_the_length(
        (root, _expected) in arb_root(),
        version in 1u32..100,
    ) {
        let document = Document { name: String::new(), root };
        let payload = encode_document(&document).unwrap();
        let header = LevelDatHeader::new(version, u32::try_from(payload.len()).unwrap());
        let mut input = header.encode().to_vec();
        input.extend_from_slice(&payload);

        let outcome = convert_level_dat(&input, &mut NoProgress).unwrap();

        let (reconciled, body) = detect_header(&outcome.bytes);
        let reconciled = reconciled.expect("output must keep its header");
        prop_assert_eq!(reconciled.version, version);
        prop_assert_eq!(reconciled.payload_len as usize, body.len());
        prop_assert_eq!(outcome.bytes.len(), HEADER_SIZE + body.len());
    }
}
