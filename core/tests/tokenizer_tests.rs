use search_core::tokenizer::{is_valid_word, split_into_words};
use search_core::StopWords;

#[test]
fn it_splits_on_spaces_only() {
    let words: Vec<&str> = split_into_words("  white cat,  and fancy-collar ").collect();
    assert_eq!(words, vec!["white", "cat,", "and", "fancy-collar"]);
}

#[test]
fn it_yields_nothing_for_blank_input() {
    assert_eq!(split_into_words("").count(), 0);
    assert_eq!(split_into_words("    ").count(), 0);
}

#[test]
fn it_can_be_replayed() {
    let words = split_into_words("a b c");
    let mut first = words.clone();
    assert_eq!(first.next(), Some("a"));
    assert_eq!(words.collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(first.collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn it_borrows_from_the_source() {
    let text = String::from("fat cat");
    let first = split_into_words(&text).next().unwrap();
    assert_eq!(first.as_ptr(), text.as_ptr());
}

#[test]
fn it_flags_control_characters() {
    assert!(is_valid_word("ordinary"));
    assert!(is_valid_word("ünïcödé"));
    assert!(!is_valid_word("bro\u{0}ken"));
    assert!(!is_valid_word("new\nline"));
}

#[test]
fn it_filters_stopwords() {
    let stop = StopWords::parse("the and").unwrap();
    let words: Vec<&str> = split_into_words("the quick brown fox and the lazy dog")
        .filter(|w| !stop.is_stop_word(w))
        .collect();
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}
