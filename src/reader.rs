//! A cursor over the typecodes of a signature.
//!
//! The body validator walks a signature as a schema while its byte cursor
//! walks the body; this reader is the schema half of that walk. It never
//! touches body data ("types only").

/// Walks a signature one complete type at a time.
///
/// The reader is a plain value over borrowed bytes; recursing into a
/// container or copying the reader for another array element costs nothing.
/// It assumes the signature has been accepted by
/// `validate_signature_with_reason` and may panic on anything else.
#[derive(Clone, Copy, Debug)]
pub struct TypeReader<'a> {
    signature: &'a [u8],
    pos: usize,
}

impl<'a> TypeReader<'a> {
    /// Positions a reader at the first type of `signature`.
    pub fn new(signature: &'a [u8]) -> Self {
        TypeReader { signature, pos: 0 }
    }

    /// Typecode under the cursor, or `None` past the last type of the
    /// signature or of the containing struct.
    pub fn current_type(&self) -> Option<u8> {
        match self.signature.get(self.pos) {
            None | Some(&b')') => None,
            Some(&c) => Some(c),
        }
    }

    /// First typecode of the current array's element type.
    pub fn element_type(&self) -> u8 {
        debug_assert_eq!(self.current_type(), Some(b'a'));
        self.signature[self.pos + 1]
    }

    /// A reader positioned just inside the current container: at the first
    /// field of a struct, or at the element type of an array.
    pub fn recurse(&self) -> TypeReader<'a> {
        TypeReader { signature: self.signature, pos: self.pos + 1 }
    }

    /// Steps over one complete type. Does nothing at the end.
    pub fn advance(&mut self) {
        if self.current_type().is_some() {
            self.pos = skip_single(self.signature, self.pos);
        }
    }
}

// Index just past the complete type starting at `pos`.
fn skip_single(signature: &[u8], pos: usize) -> usize {
    match signature[pos] {
        b'a' => skip_single(signature, pos + 1),
        b'(' => {
            let mut depth = 1;
            let mut pos = pos + 1;
            while depth > 0 && pos < signature.len() {
                match signature[pos] {
                    b'(' => depth += 1,
                    b')' => depth -= 1,
                    _ => (),
                }
                pos += 1;
            }
            pos
        }
        _ => pos + 1,
    }
}

#[test]
fn walk() {
    let mut r = TypeReader::new(b"ya(ii)v");
    assert_eq!(r.current_type(), Some(b'y'));
    r.advance();
    assert_eq!(r.current_type(), Some(b'a'));
    assert_eq!(r.element_type(), b'(');

    let sub = r.recurse();
    assert_eq!(sub.current_type(), Some(b'('));
    let mut fields = sub.recurse();
    assert_eq!(fields.current_type(), Some(b'i'));
    fields.advance();
    assert_eq!(fields.current_type(), Some(b'i'));
    fields.advance();
    assert_eq!(fields.current_type(), None);

    r.advance();
    assert_eq!(r.current_type(), Some(b'v'));
    r.advance();
    assert_eq!(r.current_type(), None);
    r.advance();
    assert_eq!(r.current_type(), None);
}

#[test]
fn nested_arrays() {
    let mut r = TypeReader::new(b"aayu");
    assert_eq!(r.element_type(), b'a');
    let sub = r.recurse();
    assert_eq!(sub.current_type(), Some(b'a'));
    assert_eq!(sub.element_type(), b'y');
    r.advance();
    assert_eq!(r.current_type(), Some(b'u'));
}

#[test]
fn nested_structs() {
    let mut r = TypeReader::new(b"(i(su))y");
    assert_eq!(r.current_type(), Some(b'('));
    r.advance();
    assert_eq!(r.current_type(), Some(b'y'));
}
