//! Identifiers for key types.
//!
//! These are, broadly speaking, simple newtype wrappers whose main purpose is to
//! future-proof the library and allow for the implementations of assorted Traits
//! that will not 'leak' into the underlying, wrapped type.
//!
//! Barring exceptional circumstances, all identifiers will be cheap and easy to
//! convert into at least a reference to their respective underlying types.

use std::borrow::Borrow;

#[cfg(feature = "package_loader")]
use serde::{Deserialize, Serialize};

macro_rules! string_identifier {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Clone, Debug, Hash, PartialEq, Eq)]
        #[cfg_attr(feature = "package_loader", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "package_loader", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn from_string(value: String) -> Self {
                Self(value)
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl<IS: Into<String>> From<IS> for $name {
            fn from(value: IS) -> Self {
                Self::from_string(value.into())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.0.borrow()
            }
        }

        impl Borrow<str> for &$name {
            fn borrow(&self) -> &str {
                self.0.borrow()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

string_identifier! {
    /// Key for a registered Consideration scoring function.
    ConsiderationId
}

string_identifier! {
    /// Key for a registered Requirement predicate.
    RequirementId
}

string_identifier! {
    /// Key for a Utility Curve, built-in or registered.
    CurveId
}

string_identifier! {
    /// Key for a registered ContextCollector function.
    CollectorId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_convert_from_str_and_string() {
        let a = ConsiderationId::from("my_health");
        let b = ConsiderationId::from(String::from("my_health"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "my_health");
        assert_eq!(format!("{}", a), "my_health");
    }

    #[test]
    fn identifiers_borrow_as_str_keys() {
        use std::collections::HashMap;

        let mut map: HashMap<CurveId, u8> = HashMap::new();
        map.insert(CurveId::from("Linear"), 1);
        assert_eq!(map.get("Linear"), Some(&1));
    }
}
