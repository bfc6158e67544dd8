use super::*;

fn mono() -> FixedAdvance {
    FixedAdvance { advance: 10.0 }
}

#[test]
fn short_text_stays_on_one_line() {
    let lines = wrap_words("Happy Birthday", 900.0, &mut mono());
    assert_eq!(lines, vec!["Happy Birthday".to_string()]);
}

#[test]
fn breaks_when_candidate_with_separator_overflows() {
    // "aaaa bbbb " is 10 chars = 100px, fits exactly; adding "cccc " overflows.
    let lines = wrap_words("aaaa bbbb cccc", 100.0, &mut mono());
    assert_eq!(lines, vec!["aaaa bbbb".to_string(), "cccc".to_string()]);
}

#[test]
fn oversized_first_word_gets_its_own_line_without_empty_leader() {
    let lines = wrap_words("abcdefghijkl xy", 50.0, &mut mono());
    assert_eq!(lines, vec!["abcdefghijkl".to_string(), "xy".to_string()]);
}

#[test]
fn wrapping_is_idempotent() {
    let text = "the quick brown fox jumps over the lazy dog and keeps on running far away";
    for max in [60.0, 95.0, 150.0, 320.0, 900.0] {
        let once = wrap_words(text, max, &mut mono());
        let again: Vec<String> = once
            .iter()
            .flat_map(|l| wrap_words(l, max, &mut mono()))
            .collect();
        assert_eq!(once, again, "max {max}");
    }
}

#[test]
fn rejoining_reconstructs_content_and_only_long_words_overflow() {
    let text = "a bb ccc dddd eeeeeeeeeeeeeee ff g hhhhhh";
    for max in [30.0, 50.0, 80.0, 200.0] {
        let mut m = mono();
        let lines = wrap_words(text, max, &mut m);
        assert_eq!(lines.join(" "), text, "max {max}");
        for l in &lines {
            if m.measure(l) > max {
                assert!(!l.contains(' '), "{l:?} overflows {max}");
            }
        }
    }
}

#[test]
fn approximate_scales_with_font_size() {
    let mut m = FixedAdvance::approximate(50.0);
    assert_eq!(m.measure("ab"), 60.0);
}
