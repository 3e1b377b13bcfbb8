//! Locale identifier resolution and the fallback chain.

/// Best-match dialect for each supported language.
const LANG_BASES: &[(&str, &str)] = &[
    ("af", "af-ZA"),
    ("ar", "ar"),
    ("bg", "bg-BG"),
    ("ca", "ca-AD"),
    ("cs", "cs-CZ"),
    ("da", "da-DK"),
    ("de", "de-DE"),
    ("el", "el-GR"),
    ("en", "en-US"),
    ("es", "es-ES"),
    ("et", "et-EE"),
    ("eu", "eu"),
    ("fa", "fa-IR"),
    ("fi", "fi-FI"),
    ("fr", "fr-FR"),
    ("he", "he-IL"),
    ("hr", "hr-HR"),
    ("hu", "hu-HU"),
    ("is", "is-IS"),
    ("it", "it-IT"),
    ("ja", "ja-JP"),
    ("km", "km-KH"),
    ("ko", "ko-KR"),
    ("lt", "lt-LT"),
    ("lv", "lv-LV"),
    ("mn", "mn-MN"),
    ("nb", "nb-NO"),
    ("nl", "nl-NL"),
    ("nn", "nn-NO"),
    ("pl", "pl-PL"),
    ("pt", "pt-PT"),
    ("ro", "ro-RO"),
    ("ru", "ru-RU"),
    ("sk", "sk-SK"),
    ("sl", "sl-SI"),
    ("sr", "sr-RS"),
    ("sv", "sv-SE"),
    ("th", "th-TH"),
    ("tr", "tr-TR"),
    ("uk", "uk-UA"),
    ("vi", "vi-VN"),
    ("zh", "zh-CN"),
];

fn lang_base(language: &str) -> Option<&'static str> {
    LANG_BASES
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, base)| *base)
}

/// The identifiers a requested locale resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    /// Default dialect for the language, or the default locale for unknown languages.
    pub base: String,
    /// Most specific identifier worth fetching.
    pub best: String,
    /// The bare language code.
    pub bare: String,
    /// Whether the request named only a language.
    pub generic: bool,
}

/// Resolve a locale identifier such as `en`, `de_AT` or `fr-CA-x-custom`.
///
/// ```
/// use cite_bridge::locale::resolve_locale;
///
/// let resolved = resolve_locale("de_AT", "en-US");
/// assert_eq!(resolved.best, "de-AT");
/// assert_eq!(resolved.base, "de-DE");
/// assert_eq!(resolved.bare, "de");
/// ```
pub fn resolve_locale(requested: &str, default_locale: &str) -> ResolvedLocale {
    let segments: Vec<&str> = requested.split(['-', '_']).collect();
    let bare = segments[0].to_string();

    let Some(base) = lang_base(segments[0]) else {
        return ResolvedLocale {
            base: default_locale.to_string(),
            best: requested.to_string(),
            bare,
            generic: false,
        };
    };

    let generic = segments.len() == 1 || segments[1] == "x";
    let best = if generic {
        base.to_string()
    } else {
        segments[..2].join("-")
    };

    ResolvedLocale {
        base: base.to_string(),
        best,
        bare,
        generic,
    }
}

/// One step of the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSegment {
    /// Identifier the loaded data is registered under.
    pub canonical: String,
    /// Identifiers handed to the locale source, in order.
    pub candidates: Vec<String>,
}

/// Ordered locale identifiers to try for a request, ending with the default locale.
///
/// Exhausting a segment other than the last is recoverable. Exhausting the
/// last one means no locale data is available at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    segments: Vec<FallbackSegment>,
}

impl FallbackChain {
    pub fn new(requested: &str, default_locale: &str) -> Self {
        let default = resolve_locale(default_locale, default_locale);
        let resolved = resolve_locale(requested, default_locale);

        let mut segments = Vec::with_capacity(2);
        if resolved.best != default.best {
            let mut candidates = vec![resolved.best.clone()];
            if resolved.bare != resolved.best {
                candidates.push(resolved.bare);
            }
            segments.push(FallbackSegment {
                canonical: resolved.best,
                candidates,
            });
        }
        segments.push(FallbackSegment {
            canonical: default.best.clone(),
            candidates: vec![default.best],
        });

        Self { segments }
    }

    pub fn segments(&self) -> &[FallbackSegment] {
        &self.segments
    }

    /// The segment for the default locale.
    pub fn default_segment(&self) -> &FallbackSegment {
        &self.segments[self.segments.len() - 1]
    }
}
