//! Byte-level scanners for the D-Bus name grammars.
//!
//! These operate on raw byte slices so that wire validators can call them on
//! unterminated ranges of a message without copying. All of them reject
//! non-ASCII input, since every allowed character class is a subset of ASCII.

fn is_az_(b: u8) -> Result<(), ()> {
    match b {
        b'A'..=b'Z' | b'a'..=b'z' | b'_' => Ok(()),
        _ => Err(()),
    }
}

fn is_az09_(b: u8) -> Result<(), ()> {
    match b {
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' => Ok(()),
        _ => Err(()),
    }
}

/// Checks an object path, e g "/org/freedesktop/DBus".
///
/// "/" on its own is a valid path; every other path consists of non-empty
/// `[A-Za-z0-9_]` components with a leading and no trailing slash. Paths have
/// no length cap.
pub fn is_valid_object_path(s: &[u8]) -> Result<(), ()> {
    let (&first, rest) = s.split_first().ok_or(())?;
    if first != b'/' {
        return Err(());
    }
    if rest.is_empty() {
        return Ok(());
    }
    for component in rest.split(|&c| c == b'/') {
        // an empty component here means "//" somewhere, or a trailing slash
        if component.is_empty() {
            return Err(());
        }
        for &c in component {
            is_az09_(c)?;
        }
    }
    Ok(())
}

/// Checks an interface name, e g "org.freedesktop.DBus".
pub fn is_valid_interface_name(s: &[u8]) -> Result<(), ()> {
    if s.len() > 255 {
        return Err(());
    }
    let mut elements = 0;
    for component in s.split(|&c| c == b'.') {
        let (&first, rest) = component.split_first().ok_or(())?;
        is_az_(first)?;
        for &c in rest {
            is_az09_(c)?;
        }
        elements += 1;
    }
    if elements > 1 {
        Ok(())
    } else {
        Err(())
    }
}

/// Checks a member name, e g "Hello". Single identifier, no dots.
pub fn is_valid_member_name(s: &[u8]) -> Result<(), ()> {
    if s.len() > 255 {
        return Err(());
    }
    let (&first, rest) = s.split_first().ok_or(())?;
    is_az_(first)?;
    for &c in rest {
        is_az09_(c)?;
    }
    Ok(())
}

/// Checks an error name, e g "org.freedesktop.DBus.Error.Failed".
pub fn is_valid_error_name(s: &[u8]) -> Result<(), ()> {
    is_valid_interface_name(s)
}

// Everything after the ':' of a unique name. Tokens may start with digits and
// the first one may be empty of characters altogether (":.1" is fine), but
// every dot must be followed by a name byte.
fn is_valid_unique_rest(s: &[u8]) -> Result<(), ()> {
    if s.is_empty() {
        return Err(());
    }
    let mut x = s.iter();
    while let Some(&c) = x.next() {
        if c == b'.' {
            let c = *x.next().ok_or(())?;
            is_az09_(c)?;
        } else {
            is_az09_(c)?;
        }
    }
    Ok(())
}

/// Checks a bus name, either unique (":1.54") or well-known
/// ("com.example.MyService").
pub fn is_valid_bus_name(s: &[u8]) -> Result<(), ()> {
    if s.len() > 255 {
        return Err(());
    }
    let (&first, rest) = s.split_first().ok_or(())?;
    if first == b':' {
        is_valid_unique_rest(rest)
    } else {
        is_valid_interface_name(s)
    }
}

#[test]
fn member() {
    assert!(is_valid_member_name(b"").is_err());
    assert!(is_valid_member_name(b"He11o").is_ok());
    assert!(is_valid_member_name(b"He11o!").is_err());
    assert!(is_valid_member_name(b"1Hello").is_err());
    assert!(is_valid_member_name(b"Hello.World").is_err());
    assert!(is_valid_member_name(b":1.54").is_err());
}

#[test]
fn interface() {
    assert!(is_valid_interface_name(b"").is_err());
    assert!(is_valid_interface_name(b"He11o").is_err());
    assert!(is_valid_interface_name(b"Hello.").is_err());
    assert!(is_valid_interface_name(b".Hello").is_err());
    assert!(is_valid_interface_name(b"Hello..World").is_err());
    assert!(is_valid_interface_name(b"Hello!.World").is_err());
    assert!(is_valid_interface_name(b"ZZZ.1Hello").is_err());
    assert!(is_valid_interface_name(b"Hello.W0rld").is_ok());
    assert!(is_valid_interface_name(b"He-llo.World").is_err());
    assert!(is_valid_interface_name(b":1.54").is_err());
}

#[test]
fn interface_length_cap() {
    let mut name = b"a.".to_vec();
    name.extend(std::iter::repeat(b'b').take(253));
    assert_eq!(name.len(), 255);
    assert!(is_valid_interface_name(&name).is_ok());
    name.push(b'b');
    assert!(is_valid_interface_name(&name).is_err());
}

#[test]
fn bus() {
    assert!(is_valid_bus_name(b"").is_err());
    assert!(is_valid_bus_name(b"He11o").is_err());
    assert!(is_valid_bus_name(b"Hello.").is_err());
    assert!(is_valid_bus_name(b"Hello!.World").is_err());
    assert!(is_valid_bus_name(b"ZZZ.1Hello").is_err());
    assert!(is_valid_bus_name(b"Hello.W0rld").is_ok());
    assert!(is_valid_bus_name(b"Hello-World.Service").is_err());
    assert!(is_valid_bus_name(b"1.54").is_err());
}

#[test]
fn unique() {
    assert!(is_valid_bus_name(b":1.54").is_ok());
    assert!(is_valid_bus_name(b":").is_err());
    assert!(is_valid_bus_name(b":.").is_err());
    assert!(is_valid_bus_name(b":1.").is_err());
    assert!(is_valid_bus_name(b":.1").is_ok());
    assert!(is_valid_bus_name(b":a..b").is_err());
    assert!(is_valid_bus_name(b":1.0").is_ok());
    assert!(is_valid_bus_name(b":abc").is_ok());
    assert!(is_valid_bus_name(b":1-54").is_err());
}

#[test]
fn object_path() {
    assert!(is_valid_object_path(b"").is_err());
    assert!(is_valid_object_path(b"/").is_ok());
    assert!(is_valid_object_path(b"/1234").is_ok());
    assert!(is_valid_object_path(b"/abce/").is_err());
    assert!(is_valid_object_path(b"/ab//c/d").is_err());
    assert!(is_valid_object_path(b"/a/c/df1").is_ok());
    assert!(is_valid_object_path(b"/12.43/fasd").is_err());
    assert!(is_valid_object_path(b"/asdf/_123").is_ok());
    assert!(is_valid_object_path(b"a/b").is_err());
}
