use crate::font::Font;
use crate::units::Pt;
use crate::ExamError;

/// Break `text` into lines no wider than `max_width`, packing as many
/// whitespace-separated words onto each line as fit (greedy line fill, no
/// lookahead).
///
/// `measure` returns the width of a candidate line set at `size`; a line is
/// extended with the next word only while its measured width stays strictly
/// below `max_width`. Any error from `measure` is returned as-is.
///
/// Words are never split: a word that is wider than `max_width` on its own
/// gets a line to itself and overflows it. Joining the returned lines with
/// single spaces gives back the input's words in their original order.
/// Text with no words (empty or whitespace only) yields no lines.
pub fn wrap_text<F, E>(text: &str, size: Pt, max_width: Pt, mut measure: F) -> Result<Vec<String>, E>
where
    F: FnMut(&str, Pt) -> Result<Pt, E>,
{
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(Vec::new());
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current = first.to_string();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure(&candidate, size)? < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);

    Ok(lines)
}

/// Calculate the width of a given string of text given the font and font size.
/// Characters the font doesn't cover are measured as the glyph that will be
/// printed in their place.
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Result<Pt, ExamError> {
    text.chars()
        .map(|ch| font.glyph_for(ch).map(|gid| font.advance(gid, size)))
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::convert::Infallible;

    /// every character is 6pt wide at 12pt
    fn monospace(text: &str, size: Pt) -> Result<Pt, Infallible> {
        Ok(Pt(text.chars().count() as f32 * *size / 2.0))
    }

    fn wrap(text: &str, max_width: f32) -> Vec<String> {
        wrap_text(text, Pt(12.0), Pt(max_width), monospace).expect("monospace never fails")
    }

    #[test]
    fn short_text_fits_on_one_line() {
        let text = "What is the capital city of Australia???";
        assert_eq!(text.len(), 40);
        assert_eq!(wrap(text, 500.0), vec![text.to_string()]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        // 10 characters fit below 66pt
        assert_eq!(
            wrap("aaa bbb ccc ddd eee", 66.0),
            vec!["aaa bbb", "ccc ddd", "eee"]
        );
    }

    #[test]
    fn a_line_exactly_at_the_limit_is_wrapped() {
        // "aaa bbb" measures 42pt, which is not strictly below 42pt
        assert_eq!(wrap("aaa bbb", 42.0), vec!["aaa", "bbb"]);
        assert_eq!(wrap("aaa bbb", 42.5), vec!["aaa bbb"]);
    }

    #[test]
    fn oversized_words_are_not_split() {
        let lines = wrap("tiny supercalifragilisticexpialidocious end", 60.0);
        assert_eq!(
            lines,
            vec!["tiny", "supercalifragilisticexpialidocious", "end"]
        );
        let single = wrap("supercalifragilisticexpialidocious", 60.0);
        assert_eq!(single.len(), 1);
        assert!(monospace(&single[0], Pt(12.0)).unwrap() > Pt(60.0));
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        assert_eq!(wrap("  one\ttwo \n three  ", 500.0), vec!["one two three"]);
    }

    #[test]
    fn no_words_means_no_lines() {
        assert!(wrap("", 100.0).is_empty());
        assert!(wrap(" \t\n", 100.0).is_empty());
    }

    #[test]
    fn measurement_errors_propagate() {
        let result: Result<Vec<String>, &str> =
            wrap_text("one two", Pt(12.0), Pt(100.0), |_, _| Err("bad font"));
        assert_eq!(result, Err("bad font"));
    }

    #[test]
    fn single_words_are_never_measured() {
        let mut calls = 0;
        let lines = wrap_text("lonely", Pt(12.0), Pt(1.0), |_, _| {
            calls += 1;
            Ok::<_, Infallible>(Pt(100.0))
        })
        .unwrap();
        assert_eq!(lines, vec!["lonely"]);
        assert_eq!(calls, 0);
    }

    #[test]
    fn long_paragraphs_keep_every_word() {
        let text = lipsum::lipsum(200);
        let lines = wrap(&text, 300.0);
        assert!(lines.len() > 1);
        assert_eq!(
            lines.join(" "),
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        );
        for line in lines.iter().filter(|line| line.contains(' ')) {
            assert!(monospace(line, Pt(12.0)).unwrap() < Pt(300.0));
        }
    }
}
