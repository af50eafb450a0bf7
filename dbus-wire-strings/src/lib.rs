#![warn(missing_docs)]

//! Validated D-Bus name types: object paths and interface, member, error and
//! bus names, backed by the byte-level scanners in [`validity`].
//!
//! Each name kind comes as a borrowed, unsized wrapper over `str` together
//! with an owned counterpart, so a validated name can be passed around
//! without re-checking it.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

pub mod validity;

/// The supplied string does not follow the rules of the requested name kind.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[error("string is not a valid {0}")]
pub struct InvalidNameError(&'static str);

macro_rules! name_types {
    ($(#[$comment:meta])* $t:ident, $towned:ident, $validate:ident) => {
        $(#[$comment])*
        #[repr(transparent)]
        #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $t(str);

        impl $t {
            /// Checks `s` and borrows it as a validated name.
            pub fn new(s: &str) -> Result<&$t, InvalidNameError> {
                validity::$validate(s.as_bytes())
                    .map_err(|_| InvalidNameError(stringify!($t)))?;
                Ok($t::new_unchecked(s))
            }

            fn new_unchecked(s: &str) -> &$t {
                // There is no safe way to wrap an unsized type into a
                // newtype. Sound because of repr(transparent).
                unsafe { std::mem::transmute(s) }
            }
        }

        impl Deref for $t {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.0.fmt(f) }
        }

        impl ToOwned for $t {
            type Owned = $towned;
            fn to_owned(&self) -> $towned { $towned(self.0.into()) }
        }

        $(#[$comment])*
        #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone)]
        pub struct $towned(String);

        impl $towned {
            /// Checks `s` and takes ownership of it as a validated name.
            pub fn new<S: Into<String>>(s: S) -> Result<$towned, InvalidNameError> {
                let s = s.into();
                $t::new(&s)?;
                Ok($towned(s))
            }

            /// Unwraps the inner String.
            pub fn into_inner(self) -> String { self.0 }
        }

        impl Deref for $towned {
            type Target = $t;
            fn deref(&self) -> &$t { $t::new_unchecked(&self.0) }
        }

        impl Borrow<$t> for $towned {
            fn borrow(&self) -> &$t { self }
        }

        impl fmt::Display for $towned {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.0.fmt(f) }
        }
    }
}

name_types!(
    /// A D-Bus object path is usually something like "/org/freedesktop/DBus".
    ///
    /// For exact rules see [`validity::is_valid_object_path`].
    ObjectPath, ObjectPathBuf, is_valid_object_path
);

name_types!(
    /// A D-Bus interface name is usually something like "org.freedesktop.DBus".
    ///
    /// For exact rules see [`validity::is_valid_interface_name`].
    InterfaceName, InterfaceNameBuf, is_valid_interface_name
);

name_types!(
    /// A D-Bus member name is usually something like "Hello", a single
    /// identifier without special characters.
    MemberName, MemberNameBuf, is_valid_member_name
);

name_types!(
    /// A D-Bus error name is usually something like
    /// "org.freedesktop.DBus.Error.Failed".
    ErrorName, ErrorNameBuf, is_valid_error_name
);

name_types!(
    /// A D-Bus bus name is either something like "com.example.MyService"
    /// or ":1.54".
    BusName, BusNameBuf, is_valid_bus_name
);

#[test]
fn conversions() {
    let x: &ObjectPath = ObjectPath::new("/test").unwrap();
    let y: ObjectPathBuf = ObjectPathBuf::new("/test").unwrap();
    assert_eq!(x, &*y);
    assert_eq!(x.to_owned(), y);
    assert_eq!(y.to_string(), "/test");

    let b: &ObjectPath = y.borrow();
    assert_eq!(b.as_ref(), "/test");
    assert_eq!(y.clone().into_inner(), "/test".to_string());
}

#[test]
fn errors() {
    let q = MemberName::new("Hello.world").unwrap_err();
    assert_eq!(q.to_string(), "string is not a valid MemberName".to_string());
    assert!(BusName::new(":").is_err());
    assert!(BusNameBuf::new(":1.54").is_ok());
    assert!(InterfaceName::new("com.example.Frobnicator").is_ok());
    assert!(ErrorName::new("org.freedesktop.DBus.Error.Failed").is_ok());
}
