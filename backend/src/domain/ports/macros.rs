//! Helper macro for generating port error enums with snake_case constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for unit, single-field and multi-field variants.
    define_port_error! {
        pub enum SamplePortError {
            Unreachable => "backend unreachable",
            Query { message: String } => "query failed: {message}",
            Rejected { reason: String, attempts: u32 } => "rejected after {attempts}: {reason}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::unreachable(), SamplePortError::Unreachable);
        assert_eq!(SamplePortError::unreachable().to_string(), "backend unreachable");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::query("syntax error");
        assert_eq!(err.to_string(), "query failed: syntax error");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::rejected("quota", 3_u32);
        assert_eq!(err.to_string(), "rejected after 3: quota");
    }
}
