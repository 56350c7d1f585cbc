// Path: crates/types/src/prelude.rs

//! A curated set of commonly used traits and types.

pub use crate::chain::{ChainConfigFragment, ConfigMapping, ConfigOption, EvmAddress};
pub use crate::error::{EngineError, ErrorCode};

/// An extension trait for `Option` that provides a convenient `required` method
/// to convert an `Option` to a `Result` with a specific error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, E>`, returning the provided
    /// error if the option is `None`.
    fn required<E>(self, err: E) -> Result<T, E>;

    /// Like [`OptionExt::required`], but only builds the error when needed.
    fn required_with<E>(self, err: impl FnOnce() -> E) -> Result<T, E>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required<E>(self, err: E) -> Result<T, E> {
        self.ok_or(err)
    }

    fn required_with<E>(self, err: impl FnOnce() -> E) -> Result<T, E> {
        self.ok_or_else(err)
    }
}
