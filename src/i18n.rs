//! User-facing strings.
//!
//! Tables are static; the one matching `LC_ALL`/`LC_MESSAGES`/`LANG` is
//! picked once at startup and passed around by reference.

#[derive(Debug, PartialEq, Eq)]
pub struct Strings {
    pub languages: &'static str,
    pub voice_speed: &'static str,
    pub read_clipboard: &'static str,
    pub read_selected: &'static str,
    pub play: &'static str,
    pub pause: &'static str,
    pub stop: &'static str,
    pub save: &'static str,
    pub tooltip: &'static str,
    pub show_window: &'static str,
    pub about: &'static str,
    pub quit: &'static str,
    pub save_title: &'static str,
    pub saved: &'static str,
    pub nothing_to_save: &'static str,
    pub error_title: &'static str,
}

pub static ENGLISH: Strings = Strings {
    languages: "Language:",
    voice_speed: "Voice speed:",
    read_clipboard: "Read clipboard",
    read_selected: "Read selected text",
    play: "Play",
    pause: "Pause",
    stop: "Stop",
    save: "Save",
    tooltip: "Read clipboard or selected text aloud",
    show_window: "Show window",
    about: "About",
    quit: "Quit",
    save_title: "Save speech as",
    saved: "Speech saved to",
    nothing_to_save: "Nothing to save yet, read some text first.",
    error_title: "Speech error",
};

pub static FRENCH: Strings = Strings {
    languages: "Langue :",
    voice_speed: "Vitesse de la voix :",
    read_clipboard: "Lire le presse-papier",
    read_selected: "Lire la sélection",
    play: "Lecture",
    pause: "Pause",
    stop: "Arrêt",
    save: "Enregistrer",
    tooltip: "Lire à voix haute le presse-papier ou la sélection",
    show_window: "Afficher la fenêtre",
    about: "À propos",
    quit: "Quitter",
    save_title: "Enregistrer la lecture sous",
    saved: "Lecture enregistrée dans",
    nothing_to_save: "Rien à enregistrer, lisez d'abord un texte.",
    error_title: "Erreur de lecture",
};

/// Table for a POSIX locale string such as `fr_FR.UTF-8`.
pub fn for_locale(locale: &str) -> &'static Strings {
    let language = locale
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match language.as_str() {
        "fr" => &FRENCH,
        _ => &ENGLISH,
    }
}

pub fn current() -> &'static Strings {
    for_locale(&system_locale())
}

/// The POSIX locale in effect, empty when none is set.
pub fn system_locale() -> String {
    locale_from(|var| std::env::var(var).ok())
}

/// First non-empty of `LC_ALL`, `LC_MESSAGES`, `LANG`.
pub fn locale_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| lookup(var))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}
