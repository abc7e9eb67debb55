use serial_test::serial;
use wpm_overlay::gui::{app_title, toggle_label};
use wpm_overlay::i18n::{current_language, set_language, Language};

#[test]
#[serial]
fn labels_follow_the_selected_language() {
    set_language(Language::French);
    assert_eq!(current_language(), Language::French);
    assert_eq!(toggle_label(true), "Désactiver l'overlay");
    assert_eq!(toggle_label(false), "Activer l'overlay");
    assert_eq!(app_title(), "Moniteur de vitesse de frappe");

    set_language(Language::English);
    assert_eq!(current_language(), Language::English);
    assert_eq!(toggle_label(true), "Disable overlay");
    assert_eq!(toggle_label(false), "Enable overlay");
}

#[test]
fn language_codes_round_trip() {
    for lang in [Language::English, Language::French] {
        assert_eq!(Language::from_code(lang.code()), Some(lang));
    }
    assert_eq!(Language::from_code("FR"), Some(Language::French));
    assert_eq!(Language::from_code("zh-CN"), None);
}
