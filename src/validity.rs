use thiserror::Error;

/// Outcome of a validation pass.
///
/// `Valid` means the whole input conformed to the marshaling rules; every
/// other value names the first violation the walk encountered. The set is
/// closed and callers are expected to match on specific codes, e g to decide
/// between dropping a message and disconnecting the peer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Validity {
    /// The input conformed.
    Valid,
    /// A signature was longer than 255 bytes.
    SignatureTooLong,
    /// A byte in a signature is not a known typecode. Also reported for the
    /// reader-internal struct tag, which never appears in signatures.
    UnknownTypecode,
    /// An array marker was not followed by an element type.
    MissingArrayElementType,
    StructStartedButNotEnded,
    StructEndedButNotStarted,
    StructHasNoFields,
    /// More than 32 consecutive array markers in front of an element type.
    ExceededMaximumArrayRecursion,
    /// Structs nested deeper than 32 levels.
    ExceededMaximumStructRecursion,
    /// The body ended before the value its signature promises.
    NotEnoughData,
    /// Bytes were left over after the last value of the signature.
    TooMuchData,
    /// The byte-order tag was neither `b'l'` nor `b'B'`.
    BadByteOrder,
    /// A padding byte in front of an aligned value was not nul.
    AlignmentPaddingNotNul,
    BooleanNotZeroOrOne,
    /// A string length prefix points past the end of the body. Arrays share
    /// this code for their own length prefix.
    StringLengthOutOfBounds,
    BadPath,
    BadUtf8InString,
    StringMissingNul,
    SignatureLengthOutOfBounds,
    BadSignature,
    SignatureMissingNul,
    VariantSignatureLengthOutOfBounds,
    VariantSignatureBad,
    VariantSignatureMissingNul,
    VariantSignatureEmpty,
    /// A variant's embedded signature holds more than one complete type.
    VariantSignatureSpecifiesMultipleValues,
    /// Array element values did not end exactly at the claimed length.
    ArrayLengthIncorrect,
}

impl Validity {
    /// True when the input passed validation.
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }

    /// Converts the code into a `Result` for `?`-style propagation.
    pub fn ok(self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationError(self))
        }
    }
}

/// Wire data failed validation.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("wire data failed validation: {0:?}")]
pub struct ValidationError(pub Validity);
