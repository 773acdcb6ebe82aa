/// Pseudo-language asking the remote service to detect the source language
pub const AUTO_DETECT: &str = "auto";

/// Target selected on startup unless the config says otherwise
pub const DEFAULT_TARGET: &str = "es";

/// Target used when a swap would otherwise turn `auto` into a target
pub const SWAP_FALLBACK: &str = "en";

/// A selectable language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub display_name: &'static str,
}

const LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry {
        code: AUTO_DETECT,
        display_name: "Auto Detect",
    },
    LanguageEntry {
        code: "en",
        display_name: "English",
    },
    LanguageEntry {
        code: "es",
        display_name: "Spanish",
    },
    LanguageEntry {
        code: "fr",
        display_name: "French",
    },
    LanguageEntry {
        code: "de",
        display_name: "German",
    },
    LanguageEntry {
        code: "pt",
        display_name: "Portuguese",
    },
    LanguageEntry {
        code: "it",
        display_name: "Italian",
    },
    LanguageEntry {
        code: "ja",
        display_name: "Japanese",
    },
    LanguageEntry {
        code: "ko",
        display_name: "Korean",
    },
    LanguageEntry {
        code: "zh-CN",
        display_name: "Chinese (Simplified)",
    },
    LanguageEntry {
        code: "ru",
        display_name: "Russian",
    },
    LanguageEntry {
        code: "ar",
        display_name: "Arabic",
    },
    LanguageEntry {
        code: "hi",
        display_name: "Hindi",
    },
];

/// Every catalog entry, in display order
pub fn list() -> &'static [LanguageEntry] {
    LANGUAGES
}

/// Options for the source selector (includes auto-detect)
pub fn source_languages() -> &'static [LanguageEntry] {
    list()
}

/// Options for the target selector (everything except auto-detect)
pub fn target_languages() -> &'static [LanguageEntry] {
    // `auto` is always the first entry
    &LANGUAGES[1..]
}

/// Display name for a language code, falling back to the raw code
pub fn display_name_of(code: &str) -> &str {
    list()
        .iter()
        .find(|lang| lang.code == code)
        .map(|lang| lang.display_name)
        .unwrap_or(code)
}

pub fn is_known(code: &str) -> bool {
    list().iter().any(|lang| lang.code == code)
}

/// Step through a selector's options, wrapping at both ends.
///
/// A code that is not among `options` (e.g. `auto` restored into the target
/// selector from a history record) starts from the first option.
pub fn cycle(options: &'static [LanguageEntry], current: &str, step: isize) -> &'static str {
    if options.is_empty() {
        return AUTO_DETECT;
    }

    let len = options.len() as isize;
    match options.iter().position(|lang| lang.code == current) {
        Some(index) => {
            let next = (index as isize + step).rem_euclid(len);
            options[next as usize].code
        }
        None => options[0].code,
    }
}
