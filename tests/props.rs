use dbus_wire::types::LITTLE_ENDIAN;
use dbus_wire::{validate_body_with_reason, validate_signature_with_reason, Validity};
use proptest::prelude::*;

const TYPE_ALPHABET: &[u8] = b"ybiuxtdsogva()";

proptest! {
    #[test]
    fn signature_validation_is_total_and_idempotent(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
        let first = validate_signature_with_reason(&bytes);
        prop_assert_eq!(first, validate_signature_with_reason(&bytes));
    }

    #[test]
    fn accepted_signatures_draw_from_the_alphabet(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
        if validate_signature_with_reason(&bytes) == Validity::Valid {
            prop_assert!(bytes.len() <= 255);
            prop_assert!(bytes.iter().all(|b| TYPE_ALPHABET.contains(b)));
        }
    }

    #[test]
    fn scalar_run_signatures_are_valid(codes in proptest::collection::vec(proptest::sample::select(b"ybiuxtdsogv".to_vec()), 0..255)) {
        prop_assert_eq!(validate_signature_with_reason(&codes), Validity::Valid);
    }

    #[test]
    fn byte_array_bodies_validate_with_full_consumption(payload in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut body = (payload.len() as u32).to_le_bytes().to_vec();
        body.extend_from_slice(&payload);
        let mut remaining = usize::MAX;
        prop_assert_eq!(
            validate_body_with_reason(b"ay", LITTLE_ENDIAN, Some(&mut remaining), &body),
            Validity::Valid
        );
        prop_assert_eq!(remaining, 0);
    }

    #[test]
    fn name_validation_is_total(s in "\\PC*") {
        let _ = dbus_wire::strings::validity::is_valid_bus_name(s.as_bytes());
        let _ = dbus_wire::strings::validity::is_valid_object_path(s.as_bytes());
    }
}
