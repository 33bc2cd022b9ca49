use lecturelens::infrastructure::text_processing::{
    sanitize_segment, strip_noise, tidy_extracted_text,
};

#[test]
fn given_sentence_with_url_when_stripping_then_removes_url_and_keeps_surrounding_words() {
    let result = strip_noise("See https://example.com/info for more.");

    assert_eq!(result, "See /info for more.");
}

#[test]
fn given_url_free_text_when_stripping_then_returns_input_unchanged() {
    let inputs = [
        "Virtual memory maps pages to frames.",
        "a.b is too short to match",
        "운영체제 강의 3주차",
        "",
    ];

    for input in inputs {
        assert_eq!(strip_noise(input), input);
    }
}

#[test]
fn given_bare_dotted_word_when_stripping_then_removes_it_too() {
    assert_eq!(strip_noise("call obj.method now"), "call  now");
    assert_eq!(strip_noise("version 10.15.7 shipped"), "version .7 shipped");
}

#[test]
fn given_removal_that_joins_a_new_match_when_stripping_then_result_is_stable() {
    let input = "abhttp://cd.ef.gh.ij";

    let once = strip_noise(input);
    let twice = strip_noise(&once);

    assert_eq!(once, twice);
    assert!(!once.contains('.'));
}

#[test]
fn given_various_inputs_when_stripping_twice_then_equals_stripping_once() {
    let inputs = [
        "Visit http://www.khu.ac.kr and https://docs.rs/regex today",
        "x.yy.zz.ww.vv",
        "http://http://aa.bb",
        "www.example.co.kr/path?q=1",
        "plain words only",
    ];

    for input in inputs {
        let once = strip_noise(input);
        assert_eq!(strip_noise(&once), once, "not idempotent for {input:?}");
    }
}

#[test]
fn given_text_with_ligatures_when_tidying_then_decomposes_them() {
    assert_eq!(tidy_extracted_text("ﬁnding the ﬁle"), "finding the file");
    assert_eq!(tidy_extracted_text("a ﬂood of data"), "a flood of data");
}

#[test]
fn given_text_with_excess_whitespace_when_tidying_then_collapses_and_keeps_paragraphs() {
    assert_eq!(
        tidy_extracted_text("The first   floor\n\n\n\nSecond    floor"),
        "The first floor\n\nSecond floor"
    );
    assert_eq!(tidy_extracted_text("   \n\n  "), "");
}

#[test]
fn given_hyphenated_line_break_when_tidying_then_merges_word() {
    assert_eq!(tidy_extracted_text("a process-\ning step"), "a processing step");
}

#[test]
fn given_compound_split_at_its_hyphen_when_tidying_then_hyphen_is_dropped_too() {
    assert_eq!(
        tidy_extracted_text("a self-\ncontained module"),
        "a selfcontained module"
    );
    assert_eq!(
        tidy_extracted_text("a self-contained module"),
        "a self-contained module"
    );
}

#[test]
fn given_raw_segment_when_sanitizing_then_tidies_before_stripping_noise() {
    let result = sanitize_segment("Slides at\nhttps://www.example.org   and   notes");

    assert_eq!(result, "Slides at\n and notes");
}
