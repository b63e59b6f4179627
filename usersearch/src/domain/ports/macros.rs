//! Defines a helper macro for generating domain port error enums.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { message: String } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    /// Human-readable failure detail.
                    message: String,
                },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    /// Construct this variant from any string-like message.
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Foo { message: String } => "foo: {message}",
            Bar { message: String } => "bar failed: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::foo("hello");
        assert_eq!(err.to_string(), "foo: hello");
    }

    #[test]
    fn variants_compare_by_message() {
        assert_eq!(ExamplePortError::bar("x"), ExamplePortError::bar("x"));
        assert_ne!(ExamplePortError::foo("x"), ExamplePortError::bar("x"));
    }
}
