//! Macro for declaring port error enums with snake_case constructors.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum LookupError {
//!         Query { message: String } => "query failed: {message}",
//!     }
//! }
//! let err = LookupError::query("relation missing");
//! ```
//!
//! Every field parameter of a generated constructor accepts `impl Into<T>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for generated constructors.
    use rstest::rstest;

    define_port_error! {
        pub enum SampleLookupError {
            Unavailable => "store unavailable",
            Query { message: String } => "query failed: {message}",
            Slow { message: String, elapsed_ms: u64 } => "slow: {message} after {elapsed_ms}ms",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SampleLookupError::unavailable(), SampleLookupError::Unavailable);
        assert_eq!(SampleLookupError::unavailable().to_string(), "store unavailable");
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = SampleLookupError::query("relation users missing");
        assert_eq!(err.to_string(), "query failed: relation users missing");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = SampleLookupError::slow(String::from("users"), 1200_u64);
        assert_eq!(err.to_string(), "slow: users after 1200ms");
    }
}
