//! Macro for defining identifier schema wrappers.

/// Implements the shared surface of a schema type wrapping an [`Identity`].
///
/// The schema type must have an `identity: Identity` field and a `new()`
/// constructor building the empty schema. This generates:
/// - `decode()` / `decode_at()` constructors
/// - `encode()`, `len()`, `is_valid()`, `is_len_valid()`
/// - `raw()`, `format_raw()`, `identity()`
/// - `Default` and `Display` implementations
///
/// [`Identity`]: crate::Identity
#[macro_export]
macro_rules! identity_schema {
    ($name:ident) => {
        impl $name {
            /// Decodes `raw`, reading today's date once for century
            /// inference. Check [`Self::is_valid`] on the result.
            pub fn decode(raw: &str) -> Self {
                let mut id = Self::new();
                id.identity.decode(raw);
                id
            }

            /// Decodes `raw` with an explicit current date.
            pub fn decode_at(raw: &str, today: $crate::NaiveDate) -> Self {
                let mut id = Self::new();
                id.identity.decode_at(raw, today);
                id
            }

            /// Encodes the populated fields into the canonical digit
            /// string. Fails while any field is missing.
            pub fn encode(&mut self) -> Result<&str, $crate::CodecError> {
                self.identity.encode()
            }

            /// Canonical identifier length in digits.
            #[must_use]
            pub fn len(&self) -> usize {
                self.identity.len()
            }

            /// True when the schema has no sequences; always false here.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.identity.is_empty()
            }

            /// True once every field decoded or was set.
            #[must_use]
            pub fn is_valid(&self) -> bool {
                self.identity.is_valid()
            }

            /// True when the stored raw string has the canonical length.
            #[must_use]
            pub fn is_len_valid(&self) -> bool {
                self.identity.is_len_valid()
            }

            /// The last decoded input or encoded output.
            pub fn raw(&self) -> Option<&str> {
                self.identity.raw()
            }

            /// Separator-grouped rendering of the raw slices.
            pub fn format_raw(&self, separator: &str) -> String {
                self.identity.format_raw(separator)
            }

            /// The underlying generic identity.
            pub fn identity(&self) -> &$crate::Identity {
                &self.identity
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.identity, f)
            }
        }
    };
}
