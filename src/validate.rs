//! Signature and body validation with precise reason codes.
//!
//! The body validator walks a signature as a schema (through
//! [`TypeReader`]) while a byte cursor walks the body left to right. Offset 0
//! of the body slice is the alignment origin, so callers hand in the body
//! exactly as it sits after the 8-aligned end of the message header.

use log::trace;

use crate::reader::TypeReader;
use crate::types::{
    align_of, align_up, BIG_ENDIAN, LITTLE_ENDIAN, MAXIMUM_SIGNATURE_LENGTH,
    MAXIMUM_TYPE_RECURSION_DEPTH,
};
use crate::validity::Validity;
use dbus_wire_strings::validity as names;

/// Checks that `signature` is a well-formed type signature.
///
/// The slice should not include the terminating nul. On failure the code
/// names the first offending construct.
pub fn validate_signature_with_reason(signature: &[u8]) -> Validity {
    if signature.len() > MAXIMUM_SIGNATURE_LENGTH {
        return Validity::SignatureTooLong;
    }

    let mut struct_depth: u8 = 0;
    // array_depth counts consecutive array markers in front of an element
    // type, not a nesting stack
    let mut array_depth: u8 = 0;
    let mut last: u8 = 0;

    for &c in signature {
        match c {
            b'y' | b'b' | b'i' | b'u' | b'x' | b't' | b'd' | b's' | b'o' | b'g' | b'v' => (),
            b'a' => {
                array_depth += 1;
                if array_depth > MAXIMUM_TYPE_RECURSION_DEPTH {
                    return Validity::ExceededMaximumArrayRecursion;
                }
            }
            b'(' => {
                struct_depth += 1;
                if struct_depth > MAXIMUM_TYPE_RECURSION_DEPTH {
                    return Validity::ExceededMaximumStructRecursion;
                }
            }
            b')' => {
                if struct_depth == 0 {
                    return Validity::StructEndedButNotStarted;
                }
                if last == b'(' {
                    return Validity::StructHasNoFields;
                }
                if array_depth > 0 {
                    return Validity::MissingArrayElementType;
                }
                struct_depth -= 1;
            }
            // 'r', the readers' struct tag, never appears in signatures and
            // lands here together with every other unknown byte
            _ => return Validity::UnknownTypecode,
        }

        if c != b'a' {
            array_depth = 0;
        }
        last = c;
    }

    if array_depth > 0 {
        return Validity::MissingArrayElementType;
    }
    if struct_depth > 0 {
        return Validity::StructStartedButNotEnded;
    }
    Validity::Valid
}

/// True when `signature` is a well-formed type signature.
pub fn validate_signature(signature: &[u8]) -> bool {
    validate_signature_with_reason(signature) == Validity::Valid
}

fn read_u32(data: &[u8], pos: usize, is_big_endian: bool) -> Result<u32, Validity> {
    let x = data.get(pos..pos + 4).ok_or(Validity::NotEnoughData)?;
    let x: [u8; 4] = x.try_into().map_err(|_| Validity::NotEnoughData)?;
    Ok(if is_big_endian { u32::from_be_bytes(x) } else { u32::from_le_bytes(x) })
}

fn check_padding(data: &[u8], from: usize, to: usize) -> Result<(), Validity> {
    if data[from..to].iter().any(|&b| b != 0) {
        return Err(Validity::AlignmentPaddingNotNul);
    }
    Ok(())
}

fn validate_body_helper(
    reader: &mut TypeReader,
    is_big_endian: bool,
    walk_reader_to_end: bool,
    mut p: usize,
    end: usize,
    data: &[u8],
) -> Result<usize, Validity> {
    while let Some(current) = reader.current_type() {
        trace!(
            "validating value of type {} at offset {}, {} bytes remain",
            current as char,
            p,
            end - p
        );

        // guarantee at least one byte to look at
        if p == end {
            return Err(Validity::NotEnoughData);
        }

        match current {
            b'y' => p += 1,

            b'b' | b'i' | b'u' | b'x' | b't' | b'd' => {
                let alignment = align_of(current);
                let a = align_up(p, alignment);
                if a >= end {
                    return Err(Validity::NotEnoughData);
                }
                check_padding(data, p, a)?;
                if current == b'b' {
                    match read_u32(data, a, is_big_endian)? {
                        0 | 1 => (),
                        _ => return Err(Validity::BooleanNotZeroOrOne),
                    }
                }
                p = a + alignment;
            }

            b'a' | b's' | b'o' => {
                let a = align_up(p, 4);
                if a + 4 > end {
                    return Err(Validity::NotEnoughData);
                }
                check_padding(data, p, a)?;
                let claimed_len = read_u32(data, a, is_big_endian)? as usize;
                p = a + 4;

                if current == b'a' {
                    // padding to the element alignment is present even for an
                    // empty array
                    let alignment = align_of(reader.element_type());
                    let a = align_up(p, alignment);
                    if a > end {
                        return Err(Validity::NotEnoughData);
                    }
                    check_padding(data, p, a)?;
                    p = a;
                }

                if claimed_len > end - p {
                    // arrays share the string code here; callers match on it
                    return Err(Validity::StringLengthOutOfBounds);
                }

                match current {
                    b'o' => {
                        if names::is_valid_object_path(&data[p..p + claimed_len]).is_err() {
                            return Err(Validity::BadPath);
                        }
                        p += claimed_len;
                    }
                    b's' => {
                        if std::str::from_utf8(&data[p..p + claimed_len]).is_err() {
                            return Err(Validity::BadUtf8InString);
                        }
                        p += claimed_len;
                    }
                    _ if claimed_len > 0 => {
                        // The reader is types only, so it cannot iterate over
                        // elements; every element starts from a copy of it.
                        let sub = reader.recurse();
                        let array_end = p + claimed_len;
                        while p < array_end {
                            let mut element_reader = sub;
                            p = validate_body_helper(
                                &mut element_reader,
                                is_big_endian,
                                false,
                                p,
                                end,
                                data,
                            )?;
                        }
                        if p != array_end {
                            return Err(Validity::ArrayLengthIncorrect);
                        }
                    }
                    _ => (),
                }

                // arrays have no nul terminator
                if current != b'a' {
                    if p == end {
                        return Err(Validity::NotEnoughData);
                    }
                    if data[p] != 0 {
                        return Err(Validity::StringMissingNul);
                    }
                    p += 1;
                }
            }

            b'g' => {
                let claimed_len = data[p] as usize;
                p += 1;
                // + 1 for the nul
                if claimed_len + 1 > end - p {
                    return Err(Validity::SignatureLengthOutOfBounds);
                }
                if validate_signature_with_reason(&data[p..p + claimed_len]) != Validity::Valid {
                    return Err(Validity::BadSignature);
                }
                p += claimed_len;
                if data[p] != 0 {
                    return Err(Validity::SignatureMissingNul);
                }
                p += 1;
            }

            b'v' => {
                // 1 byte signature length, typecodes plus nul, padding to the
                // contained type's alignment, then exactly one value
                let claimed_len = data[p] as usize;
                p += 1;
                if claimed_len + 1 > end - p {
                    return Err(Validity::VariantSignatureLengthOutOfBounds);
                }
                let signature = &data[p..p + claimed_len];
                if validate_signature_with_reason(signature) != Validity::Valid {
                    return Err(Validity::VariantSignatureBad);
                }
                p += claimed_len;
                if data[p] != 0 {
                    return Err(Validity::VariantSignatureMissingNul);
                }
                p += 1;

                // the empty-signature check comes after the padding, so even
                // a doomed variant must pad with nul bytes
                let contained_alignment = signature.first().map_or(1, |&c| align_of(c));
                let a = align_up(p, contained_alignment);
                if a > end {
                    return Err(Validity::NotEnoughData);
                }
                check_padding(data, p, a)?;
                p = a;

                let mut sub = TypeReader::new(signature);
                if sub.current_type().is_none() {
                    return Err(Validity::VariantSignatureEmpty);
                }
                p = validate_body_helper(&mut sub, is_big_endian, false, p, end, data)?;
                sub.advance();
                if sub.current_type().is_some() {
                    return Err(Validity::VariantSignatureSpecifiesMultipleValues);
                }
            }

            b'(' => {
                // no length prefix; termination is by schema
                let a = align_up(p, 8);
                if a > end {
                    return Err(Validity::NotEnoughData);
                }
                check_padding(data, p, a)?;
                p = a;
                let mut sub = reader.recurse();
                p = validate_body_helper(&mut sub, is_big_endian, true, p, end, data)?;
            }

            c => panic!("typecode {} in a signature that should not have validated", c),
        }

        if p > end {
            return Err(Validity::NotEnoughData);
        }

        if walk_reader_to_end {
            reader.advance();
        } else {
            break;
        }
    }

    Ok(p)
}

/// Checks that `value` is a well-formed body for `expected_signature`.
///
/// The signature is assumed to have been accepted by
/// [`validate_signature_with_reason`] already; offset 0 of `value` is the
/// alignment origin. `byte_order` is the message's byte-order tag, `b'l'` or
/// `b'B'`.
///
/// With `bytes_remaining` present, leftover bytes after the last value are
/// allowed and their count is stored there on success. Without it, leftover
/// bytes are [`Validity::TooMuchData`].
pub fn validate_body_with_reason(
    expected_signature: &[u8],
    byte_order: u8,
    bytes_remaining: Option<&mut usize>,
    value: &[u8],
) -> Validity {
    let is_big_endian = match byte_order {
        LITTLE_ENDIAN => false,
        BIG_ENDIAN => true,
        _ => return Validity::BadByteOrder,
    };

    trace!(
        "validating {} byte body against signature \"{}\"",
        value.len(),
        expected_signature.escape_ascii()
    );

    let mut reader = TypeReader::new(expected_signature);
    let end = value.len();
    match validate_body_helper(&mut reader, is_big_endian, true, 0, end, value) {
        Err(reason) => reason,
        Ok(p) => {
            if let Some(remaining) = bytes_remaining {
                *remaining = end - p;
                Validity::Valid
            } else if p < end {
                Validity::TooMuchData
            } else {
                Validity::Valid
            }
        }
    }
}

#[test]
fn signature_grammar() {
    assert_eq!(validate_signature_with_reason(b""), Validity::Valid);
    assert_eq!(validate_signature_with_reason(b"ai"), Validity::Valid);
    assert_eq!(validate_signature_with_reason(b"yyuxa(yv)"), Validity::Valid);
    assert_eq!(validate_signature_with_reason(b"(i(su))"), Validity::Valid);
    assert_eq!(validate_signature_with_reason(b"a"), Validity::MissingArrayElementType);
    assert_eq!(validate_signature_with_reason(b"aa"), Validity::MissingArrayElementType);
    assert_eq!(validate_signature_with_reason(b"(a)"), Validity::MissingArrayElementType);
    assert_eq!(validate_signature_with_reason(b"()"), Validity::StructHasNoFields);
    assert_eq!(validate_signature_with_reason(b")"), Validity::StructEndedButNotStarted);
    assert_eq!(validate_signature_with_reason(b"(i"), Validity::StructStartedButNotEnded);
    assert_eq!(validate_signature_with_reason(b"z"), Validity::UnknownTypecode);
    assert_eq!(validate_signature_with_reason(b"r"), Validity::UnknownTypecode);
    assert_eq!(validate_signature_with_reason(b"a{ss}"), Validity::UnknownTypecode);
    assert_eq!(validate_signature_with_reason(b"nq"), Validity::UnknownTypecode);
}

#[test]
fn signature_recursion_limits() {
    assert_eq!(
        validate_signature_with_reason(&[b'a'; 33]),
        Validity::ExceededMaximumArrayRecursion
    );
    let mut arrays = vec![b'a'; 32];
    arrays.push(b'i');
    assert_eq!(validate_signature_with_reason(&arrays), Validity::Valid);

    assert_eq!(
        validate_signature_with_reason(&[b'('; 33]),
        Validity::ExceededMaximumStructRecursion
    );
    let mut structs = vec![b'('; 32];
    structs.push(b'i');
    structs.extend(std::iter::repeat(b')').take(32));
    assert_eq!(validate_signature_with_reason(&structs), Validity::Valid);
}

#[test]
fn signature_length_cap() {
    assert_eq!(validate_signature_with_reason(&[b'i'; 255]), Validity::Valid);
    assert_eq!(validate_signature_with_reason(&[b'i'; 256]), Validity::SignatureTooLong);
}

#[test]
fn signature_facade() {
    assert!(validate_signature(b"a(ii)"));
    assert!(validate_signature(b""));
    assert!(!validate_signature(b"a"));
}
