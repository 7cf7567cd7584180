use exam_gen::layout::wrap_text;
use exam_gen::shuffle::{shuffle_questions, SeededRng};
use exam_gen::{AnswerOption, Points, Pt, Question};
use proptest::prelude::*;
use std::convert::Infallible;

fn monospace(text: &str, size: Pt) -> Result<Pt, Infallible> {
    Ok(Pt(text.chars().count() as f32 * *size / 2.0))
}

fn numbered(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            text: format!("Question {i}"),
            points: Points(1.0),
            options: (0..3)
                .map(|o| AnswerOption {
                    text: format!("{i}.{o}"),
                    is_correct: o == i % 3,
                })
                .collect(),
        })
        .collect()
}

proptest! {
    #[test]
    fn wrapped_lines_give_back_the_words(
        words in prop::collection::vec("[a-zA-Z0-9,.?]{1,12}", 1..60),
        max_width in 30.0f32..600.0,
    ) {
        let text = words.join(" ");
        let lines = wrap_text(&text, Pt(12.0), Pt(max_width), monospace).unwrap();

        prop_assert!(!lines.is_empty());
        prop_assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn only_single_words_overflow(
        words in prop::collection::vec("[a-z]{1,20}", 1..60),
        max_width in 30.0f32..600.0,
    ) {
        let text = words.join(" ");
        let lines = wrap_text(&text, Pt(12.0), Pt(max_width), monospace).unwrap();

        for line in lines.iter() {
            let width = monospace(line, Pt(12.0)).unwrap();
            prop_assert!(width < Pt(max_width) || !line.contains(' '), "{line:?} overflows");
        }
    }

    #[test]
    fn lines_are_filled_greedily(
        words in prop::collection::vec("[a-z]{1,10}", 2..40),
        max_width in 60.0f32..400.0,
    ) {
        let text = words.join(" ");
        let lines = wrap_text(&text, Pt(12.0), Pt(max_width), monospace).unwrap();

        // the first word of each line would not have fit on the line before
        for pair in lines.windows(2) {
            let next_word = pair[1].split(' ').next().unwrap();
            let extended = format!("{} {}", pair[0], next_word);
            prop_assert!(monospace(&extended, Pt(12.0)).unwrap() >= Pt(max_width));
        }
    }

    #[test]
    fn shuffling_is_a_deterministic_permutation(seed in ".{0,24}", n in 0usize..40) {
        let mut a = numbered(n);
        let mut b = numbered(n);
        shuffle_questions(&mut a, &seed);
        shuffle_questions(&mut b, &seed);
        prop_assert_eq!(&a, &b);

        let mut sorted = a.clone();
        sorted.sort_by_key(|q| q.text.trim_start_matches("Question ").parse::<usize>().unwrap());
        prop_assert_eq!(sorted, numbered(n));
    }

    #[test]
    fn shuffling_never_touches_options(seed in "[A-Z]{1,3}", n in 1usize..30) {
        let original = numbered(n);
        let mut shuffled = original.clone();
        shuffle_questions(&mut shuffled, &seed);

        for question in shuffled.iter() {
            let source = original
                .iter()
                .find(|q| q.text == question.text)
                .unwrap();
            prop_assert_eq!(&question.options, &source.options);
        }
    }

    #[test]
    fn below_is_in_range(seed in any::<u64>(), n in 1usize..1000) {
        let mut rng = SeededRng::new(seed);
        for _ in 0..16 {
            prop_assert!(rng.below(n) < n);
        }
    }
}
