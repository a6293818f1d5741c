//! Data models for the inventory dashboard.
//!
//! Documents serialize with the same camelCase field names the dashboard views consume.

/// Declares a closed enum whose variants serialize as fixed display strings.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err($crate::models::UnknownVariant {
                        type_name: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

mod activity;
mod personnel;
mod record;
mod revision;
mod validation;
mod vehicle;

pub use activity::*;
pub use personnel::*;
pub use record::*;
pub use revision::*;
pub use validation::*;
pub use vehicle::*;

/// A string that names no variant of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub type_name: &'static str,
    pub value: String,
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} value: {:?}", self.type_name, self.value)
    }
}

impl std::error::Error for UnknownVariant {}
