//! Language detection capability.

/// ISO 639-3 code the accumulator keeps.
pub const ENGLISH: &str = "eng";

/// Code returned when no language can be determined.
pub const UNDETERMINED: &str = "und";

/// Classifies text into an ISO 639-3 language code.
pub trait LanguageDetector {
    fn detect(&self, text: &str) -> String;
}

impl<F> LanguageDetector for F
where
    F: Fn(&str) -> String,
{
    fn detect(&self, text: &str) -> String {
        self(text)
    }
}

/// Trigram-based detection via `whatlang`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> String {
        whatlang::detect_lang(text)
            .map_or_else(|| UNDETERMINED.to_owned(), |lang| lang.code().to_owned())
    }
}
