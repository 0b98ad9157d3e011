//! Miscellaneous utility functionality.
//!
//! Specifically, nothing in here is Lox-related, even though
//! it might be useful outside of this crate.
use macro_pub::macro_pub;

/// Creates a `HashMap` from the given key-value expressions.
///
/// Duplicate keys keep the last value, just like repeated inserts would.
#[macro_pub]
macro_rules! map {
    ($($key:expr => $value:expr),* $(,)?) => {
        ::std::collections::HashMap::from([$(($key, $value)),*])
    };
}
