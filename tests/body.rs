use dbus_wire::types::{BIG_ENDIAN, LITTLE_ENDIAN};
use dbus_wire::{validate_body_with_reason, Validity};

fn check_le(signature: &[u8], body: &[u8]) -> Validity {
    validate_body_with_reason(signature, LITTLE_ENDIAN, None, body)
}

fn check_be(signature: &[u8], body: &[u8]) -> Validity {
    validate_body_with_reason(signature, BIG_ENDIAN, None, body)
}

#[test]
fn empty_signature() {
    assert_eq!(check_le(b"", &[]), Validity::Valid);
    assert_eq!(check_le(b"", &[0]), Validity::TooMuchData);
}

#[test]
fn byte() {
    assert_eq!(check_le(b"y", &[0x2a]), Validity::Valid);
    assert_eq!(check_le(b"y", &[]), Validity::NotEnoughData);
    assert_eq!(check_le(b"y", &[1, 2]), Validity::TooMuchData);
}

#[test]
fn bytes_remaining_reports_leftovers() {
    let mut remaining = 0;
    assert_eq!(
        validate_body_with_reason(b"y", LITTLE_ENDIAN, Some(&mut remaining), &[1, 2, 3]),
        Validity::Valid
    );
    assert_eq!(remaining, 2);
}

#[test]
fn bad_byte_order() {
    assert_eq!(
        validate_body_with_reason(b"y", b'x', None, &[0x2a]),
        Validity::BadByteOrder
    );
}

#[test]
fn boolean() {
    assert_eq!(check_le(b"b", &[0, 0, 0, 0]), Validity::Valid);
    assert_eq!(check_le(b"b", &[1, 0, 0, 0]), Validity::Valid);
    assert_eq!(check_le(b"b", &[2, 0, 0, 0]), Validity::BooleanNotZeroOrOne);
    // 0x01000000 in the wrong byte order is not a valid boolean
    assert_eq!(check_le(b"b", &[0, 0, 0, 1]), Validity::BooleanNotZeroOrOne);
    assert_eq!(check_be(b"b", &[0, 0, 0, 1]), Validity::Valid);
    assert_eq!(check_be(b"b", &[0, 0, 0, 2]), Validity::BooleanNotZeroOrOne);
    assert_eq!(check_le(b"b", &[1, 0, 0]), Validity::NotEnoughData);
}

#[test]
fn fixed_scalars() {
    assert_eq!(check_le(b"u", &[1, 2, 3, 4]), Validity::Valid);
    assert_eq!(check_le(b"d", &[0; 8]), Validity::Valid);
    assert_eq!(check_le(b"x", &[0xff; 8]), Validity::Valid);
    assert_eq!(check_le(b"d", &[0; 7]), Validity::NotEnoughData);
}

#[test]
fn scalar_padding_must_be_nul() {
    assert_eq!(check_le(b"yi", &[0x2a, 0, 0, 0, 7, 0, 0, 0]), Validity::Valid);
    assert_eq!(
        check_le(b"yi", &[0x2a, 1, 0, 0, 7, 0, 0, 0]),
        Validity::AlignmentPaddingNotNul
    );
    let mut body = vec![1u8, 2];
    body.extend_from_slice(&[0; 6]);
    body.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(check_le(b"yyd", &body), Validity::Valid);
    body[5] = 0xff;
    assert_eq!(check_le(b"yyd", &body), Validity::AlignmentPaddingNotNul);
}

#[test]
fn string() {
    assert_eq!(check_le(b"s", b"\x05\x00\x00\x00hello\x00"), Validity::Valid);
    assert_eq!(check_le(b"s", b"\x05\x00\x00\x00hello"), Validity::NotEnoughData);
    assert_eq!(
        check_le(b"s", b"\x05\x00\x00\x00hello\x01"),
        Validity::StringMissingNul
    );
    // a miscounted length that lands the terminator check on a nul byte
    // passes, because an interior nul is still valid UTF-8
    assert_eq!(check_le(b"s", b"\x05\x00\x00\x00hell\x00\x00"), Validity::Valid);
    assert_eq!(
        check_le(b"s", b"\xff\x00\x00\x00a\x00"),
        Validity::StringLengthOutOfBounds
    );
    assert_eq!(
        check_le(b"s", b"\x01\x00\x00\x00\xff\x00"),
        Validity::BadUtf8InString
    );
}

#[test]
fn string_errors_are_byte_order_stable() {
    assert_eq!(check_be(b"s", b"\x00\x00\x00\x05hello\x00"), Validity::Valid);
    assert_eq!(
        check_be(b"s", b"\x00\x00\x00\x05hello\x01"),
        Validity::StringMissingNul
    );
    assert_eq!(
        check_be(b"s", b"\x00\x00\x00\x05hello"),
        Validity::NotEnoughData
    );
}

#[test]
fn object_path() {
    assert_eq!(check_le(b"o", b"\x01\x00\x00\x00/\x00"), Validity::Valid);
    assert_eq!(check_le(b"o", b"\x01\x00\x00\x00a\x00"), Validity::BadPath);
    assert_eq!(
        check_le(b"o", b"\x10\x00\x00\x00/com/example/Obj\x00"),
        Validity::Valid
    );
}

#[test]
fn signature_value() {
    assert_eq!(check_le(b"g", &[1, b'i', 0]), Validity::Valid);
    assert_eq!(check_le(b"g", &[0, 0]), Validity::Valid);
    assert_eq!(check_le(b"g", &[1, b'z', 0]), Validity::BadSignature);
    assert_eq!(check_le(b"g", &[2, b'i', b'i', 1]), Validity::SignatureMissingNul);
    assert_eq!(check_le(b"g", &[5, b'i']), Validity::SignatureLengthOutOfBounds);
}

#[test]
fn byte_array() {
    assert_eq!(check_le(b"ay", &[0, 0, 0, 0]), Validity::Valid);
    assert_eq!(check_le(b"ay", &[3, 0, 0, 0, 1, 2, 3]), Validity::Valid);
    assert_eq!(check_le(b"ay", &[3, 0, 0, 0, 1, 2]), Validity::StringLengthOutOfBounds);
}

#[test]
fn int_array() {
    assert_eq!(check_le(b"ai", &[0, 0, 0, 0]), Validity::Valid);
    assert_eq!(check_le(b"ai", &[4, 0, 0, 0, 0x2a, 0, 0, 0]), Validity::Valid);
    // length 0 followed by leftover bytes
    assert_eq!(check_le(b"ai", &[0, 0, 0, 0, 0, 0, 0, 0]), Validity::TooMuchData);
    let mut remaining = 0;
    assert_eq!(
        validate_body_with_reason(b"ai", LITTLE_ENDIAN, Some(&mut remaining), &[0, 0, 0, 0, 0, 0, 0, 0]),
        Validity::Valid
    );
    assert_eq!(remaining, 4);
    // a length that cuts an element in half
    assert_eq!(
        check_le(b"ai", &[6, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]),
        Validity::ArrayLengthIncorrect
    );
}

#[test]
fn array_element_padding() {
    let mut body = vec![8u8, 0, 0, 0];
    body.extend_from_slice(&[0; 4]);
    body.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(check_le(b"ax", &body), Validity::Valid);
    body[5] = 1;
    assert_eq!(check_le(b"ax", &body), Validity::AlignmentPaddingNotNul);

    // the padding is present even for an empty array
    assert_eq!(check_le(b"ax", &[0, 0, 0, 0, 0, 0, 0, 0]), Validity::Valid);
    assert_eq!(
        check_le(b"ax", &[0, 0, 0, 0, 1, 0, 0, 0]),
        Validity::AlignmentPaddingNotNul
    );
    assert_eq!(check_le(b"ax", &[0, 0, 0, 0]), Validity::NotEnoughData);
}

#[test]
fn nested_arrays() {
    assert_eq!(
        check_le(b"aay", &[6, 0, 0, 0, 2, 0, 0, 0, 0xaa, 0xbb]),
        Validity::Valid
    );
}

#[test]
fn struct_array() {
    let mut body = vec![8u8, 0, 0, 0];
    body.extend_from_slice(&[0; 4]);
    body.extend_from_slice(&[1, 0, 0, 0, 2, 0, 0, 0]);
    assert_eq!(check_le(b"a(ii)", &body), Validity::Valid);
    body[5] = 1;
    assert_eq!(check_le(b"a(ii)", &body), Validity::AlignmentPaddingNotNul);
}

#[test]
fn structs() {
    assert_eq!(check_le(b"(yi)", &[0x2a, 0, 0, 0, 7, 0, 0, 0]), Validity::Valid);
    assert_eq!(check_le(b"(yi)", &[0x2a, 0, 0, 0]), Validity::NotEnoughData);
    assert_eq!(check_le(b"((y))", &[0x2a]), Validity::Valid);
}

#[test]
fn variant() {
    assert_eq!(check_le(b"v", &[1, b'y', 0, 0x2a]), Validity::Valid);
    assert_eq!(
        check_le(b"v", &[2, b'y', b'y', 0, 0x2a, 0x2b]),
        Validity::VariantSignatureSpecifiesMultipleValues
    );
    assert_eq!(check_le(b"v", &[0, 0]), Validity::VariantSignatureEmpty);
    assert_eq!(check_le(b"v", &[1, b'z', 0]), Validity::VariantSignatureBad);
    assert_eq!(check_le(b"v", &[1, b'y', 1, 0x2a]), Validity::VariantSignatureMissingNul);
    assert_eq!(check_le(b"v", &[5]), Validity::VariantSignatureLengthOutOfBounds);
    assert_eq!(check_le(b"v", &[0]), Validity::VariantSignatureLengthOutOfBounds);
}

#[test]
fn variant_contained_alignment() {
    assert_eq!(check_le(b"v", &[1, b'i', 0, 0, 0x2a, 0, 0, 0]), Validity::Valid);
    assert_eq!(
        check_le(b"v", &[1, b'i', 0, 0xff, 0x2a, 0, 0, 0]),
        Validity::AlignmentPaddingNotNul
    );
    // struct inside a variant pads to 8
    assert_eq!(
        check_le(b"v", &[3, b'(', b'y', b')', 0, 0, 0, 0, 0x2a]),
        Validity::Valid
    );
}

#[test]
fn variant_inside_struct() {
    assert_eq!(check_le(b"(yv)", &[0x2a, 1, b'y', 0, 7]), Validity::Valid);
}

#[test]
fn ok_bridges_into_result() {
    assert!(check_le(b"y", &[0x2a]).ok().is_ok());
    let err = check_le(b"y", &[]).ok().unwrap_err();
    assert_eq!(err.0, Validity::NotEnoughData);
    assert_eq!(err.to_string(), "wire data failed validation: NotEnoughData");
}

#[test]
fn validation_does_not_mutate_outcomes() {
    let body = b"\x05\x00\x00\x00hello\x00";
    assert_eq!(check_le(b"s", body), check_le(b"s", body));
}
