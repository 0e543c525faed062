use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cwsend::content::{
    contact_exchange, make_callsign, random_char_groups, random_words, ContentConfig,
};

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn seeded_drills_are_reproducible() {
    let a = random_words(25, ContentConfig::default(), &mut rng(7));
    let b = random_words(25, ContentConfig::default(), &mut rng(7));
    assert_eq!(a, b);

    let c = random_words(25, ContentConfig::default(), &mut rng(8));
    assert_ne!(a, c, "different seeds should produce different drills");
}

#[test]
fn word_drill_has_the_requested_word_count() {
    let text = random_words(40, ContentConfig::default(), &mut rng(1));
    assert_eq!(text.split(' ').count(), 40);
    assert_eq!(text, text.to_lowercase());
}

#[test]
fn word_drill_without_callsigns_or_prosigns_uses_only_plain_words() {
    let config = ContentConfig {
        callsigns: false,
        prosigns: false,
        ..ContentConfig::default()
    };
    let text = random_words(200, config, &mut rng(3));
    assert!(!text.contains('@'), "prosigns are disabled");
}

#[test]
fn char_groups_have_the_requested_shape() {
    let text = random_char_groups(10, 5, ContentConfig::default(), &mut rng(2));
    let groups: Vec<&str> = text.split(' ').collect();
    assert_eq!(groups.len(), 10);
    for group in groups {
        assert_eq!(group.chars().count(), 5);
    }
}

#[test]
fn char_groups_respect_disabled_classes() {
    let config = ContentConfig {
        letters: true,
        numbers: false,
        symbols: false,
        ..ContentConfig::default()
    };
    let text = random_char_groups(20, 8, config, &mut rng(5));
    assert!(
        text.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
        "letters-only groups contain a non-letter: {text:?}"
    );
}

#[test]
fn char_groups_with_every_class_disabled_are_empty() {
    let config = ContentConfig {
        letters: false,
        numbers: false,
        symbols: false,
        ..ContentConfig::default()
    };
    assert_eq!(random_char_groups(10, 5, config, &mut rng(4)), "");
}

#[test]
fn callsigns_look_like_callsigns() {
    for seed in 0..50 {
        let call = make_callsign(&mut rng(seed));
        assert!(call.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(
            call.chars().any(|c| c.is_ascii_digit()),
            "callsign {call} has no digit"
        );
        assert!(call.len() >= 3 && call.len() <= 6, "bad length: {call}");
    }
}

#[test]
fn contact_exchange_is_a_complete_qso() {
    let messages = contact_exchange(&mut rng(11));
    assert_eq!(messages.len(), 6);
    assert!(messages[0].starts_with("CQ CQ CQ DE "));
    assert!(
        messages.iter().any(|m| m.contains("@SK")),
        "a QSO ends with SK"
    );
    assert!(messages.iter().any(|m| m.contains("RST")));
}
