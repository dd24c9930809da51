//! Transliteration engine.
//!
//! All stored text is Devanagari. The engine converts it to a target script
//! through a [`Backend`], then runs the target's orthographic fix-ups.
//! Conversion never fails from the caller's point of view: a backend error is
//! logged and the original text is returned.
//!
//! # Example
//!
//! ```
//! use lipi::{Script, Transliterator};
//!
//! let engine = Transliterator::new();
//! assert_eq!(engine.transliterate("नमस्ते", Script::Iast), "namaste");
//! assert_eq!(engine.transliterate("नमस्ते", Script::Devanagari), "नमस्ते");
//! ```

mod brahmic;
pub mod devanagari;
pub mod orthography;
mod roman;

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::script::Script;

/// A conversion library.
pub trait Backend {
    /// Convert `text` from one script to another.
    fn convert(&self, text: &str, from: Script, to: Script) -> Result<String>;
}

/// The built-in table-driven backend. Only converts from Devanagari.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinBackend;

impl Backend for BuiltinBackend {
    fn convert(&self, text: &str, from: Script, to: Script) -> Result<String> {
        if from != Script::SOURCE {
            return Err(Error::UnsupportedSource(from));
        }
        if to == from {
            return Ok(text.to_string());
        }
        Ok(if to.is_roman() {
            roman::convert(text, to)
        } else {
            brahmic::convert(text, to)
        })
    }
}

/// Converts Devanagari text into any registered script.
pub struct Transliterator {
    backend: Box<dyn Backend>,
}

impl Transliterator {
    /// Create an engine backed by [`BuiltinBackend`].
    pub fn new() -> Self {
        Self::with_backend(BuiltinBackend)
    }

    pub fn with_backend(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Transliterate Devanagari `text` into `target`.
    ///
    /// Returns the input unchanged when the target is Devanagari or when the
    /// backend fails.
    pub fn transliterate<'a>(&self, text: &'a str, target: Script) -> Cow<'a, str> {
        if target == Script::SOURCE || text.is_empty() {
            return Cow::Borrowed(text);
        }

        match self.backend.convert(text, Script::SOURCE, target) {
            Ok(converted) => Cow::Owned(orthography::apply(target, converted)),
            Err(e) => {
                tracing::error!(%target, error = %e, "transliteration failed; keeping original text");
                Cow::Borrowed(text)
            }
        }
    }

    /// Transliterate into the script named by `id`.
    ///
    /// Unknown identifiers fall back to Devanagari, which leaves the text
    /// unchanged.
    pub fn transliterate_by_id<'a>(&self, text: &'a str, id: &str) -> Cow<'a, str> {
        let target = Script::from_id(id).unwrap_or_else(|| {
            tracing::debug!(id, "unknown script id; defaulting to Devanagari");
            Script::SOURCE
        });
        self.transliterate(text, target)
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Transliterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transliterator").finish_non_exhaustive()
    }
}

/// Transliterate with the built-in backend.
pub fn transliterate(text: &str, target: Script) -> String {
    Transliterator::new().transliterate(text, target).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct FailingBackend;

    impl Backend for FailingBackend {
        fn convert(&self, _text: &str, _from: Script, _to: Script) -> Result<String> {
            Err(Error::Backend("scheme table missing".to_string()))
        }
    }

    #[test]
    fn test_identity_for_devanagari() {
        let engine = Transliterator::with_backend(FailingBackend);
        // Backend is never consulted for the source script.
        assert!(matches!(
            engine.transliterate("धर्म", Script::Devanagari),
            Cow::Borrowed("धर्म")
        ));
    }

    #[test]
    fn test_backend_failure_returns_original() {
        let engine = Transliterator::with_backend(FailingBackend);
        assert_eq!(engine.transliterate("धर्म", Script::Iast), "धर्म");
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let engine = Transliterator::new();
        assert_eq!(engine.transliterate_by_id("नमस्ते", "KLINGON"), "नमस्ते");
        assert_eq!(engine.transliterate_by_id("नमस्ते", "IAST"), "namaste");
    }

    #[test]
    fn test_builtin_rejects_other_sources() {
        let result = BuiltinBackend.convert("namaste", Script::Iast, Script::Devanagari);
        assert!(matches!(result, Err(Error::UnsupportedSource(Script::Iast))));
    }

    #[test]
    fn test_fixups_run_after_conversion() {
        assert_eq!(transliterate("शङ्कर", Script::Kannada), "ಶಂಕರ");
    }

    proptest! {
        #[test]
        fn prop_transliteration_is_deterministic(
            chars in prop::collection::vec(prop::char::range('\u{0900}', '\u{097F}'), 0..24),
            index in 0usize..12,
        ) {
            let text: String = chars.into_iter().collect();
            let target = Script::ALL[index];
            prop_assert_eq!(transliterate(&text, target), transliterate(&text, target));
        }

        #[test]
        fn prop_ascii_passes_through(text in "[ -~]{0,40}", index in 0usize..12) {
            prop_assert_eq!(transliterate(&text, Script::ALL[index]), text);
        }

        #[test]
        fn prop_devanagari_is_identity(
            chars in prop::collection::vec(prop::char::range('\u{0900}', '\u{097F}'), 0..24),
        ) {
            let text: String = chars.into_iter().collect();
            prop_assert_eq!(transliterate(&text, Script::Devanagari), text);
        }
    }
}
