//! Macro for implementing Display and FromStr for OData keyword enums
//!
//! OData operators (`eq`, `contains`, `and`, ...) are lowercase keywords on the
//! wire. This macro provides a single mapping for both rendering and parsing
//! them, with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use riskview_domain::impl_keyword_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SortDirection {
//!     Asc,
//!     Desc,
//! }
//!
//! impl_keyword_conversions!(SortDirection {
//!     Asc => "asc",
//!     Desc => "desc",
//! });
//!
//! assert_eq!(SortDirection::Desc.to_string(), "desc");
//! assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
//! ```

/// Implements Display and FromStr traits for keyword enums
///
/// This macro generates:
/// - Display trait: writes the keyword exactly as mapped
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// Keywords must be given in lowercase for parsing to match.
#[macro_export]
macro_rules! impl_keyword_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
