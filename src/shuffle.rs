//! Deterministic question shuffling.
//!
//! The question order of a printed exam is a pure function of a seed string:
//! the same seed always yields the same order, different seeds (almost
//! always) yield different orders. Options inside a question are never
//! reordered, since their order defines the a, b, c, ... labelling.

use crate::model::{Exam, Question};
use sha2::{Digest, Sha256};

/// xorshift64* generator seeded from a string
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Seed from the first 8 bytes of the SHA-256 digest of `seed`
    pub fn from_seed_str(seed: &str) -> SeededRng {
        let digest = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        SeededRng::new(u64::from_le_bytes(bytes))
    }

    pub fn new(seed: u64) -> SeededRng {
        // xorshift never leaves the all-zero state
        let state = if seed == 0 { 1 } else { seed };
        SeededRng { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// A value in `[0, n)`. Panics if `n` is zero.
    pub fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "range must not be empty");
        (self.next_u64() % n as u64) as usize
    }
}

/// Permute `questions` in place, using an order determined entirely by `seed`
pub fn shuffle_questions(questions: &mut [Question], seed: &str) {
    let mut rng = SeededRng::from_seed_str(seed);
    // Fisher-Yates, from the back
    for i in (1..questions.len()).rev() {
        let j = rng.below(i + 1);
        questions.swap(i, j);
    }
}

/// A copy of `exam` with its questions shuffled by `seed`
pub fn shuffled(exam: &Exam, seed: &str) -> Exam {
    let mut exam = exam.clone();
    shuffle_questions(&mut exam.questions, seed);
    exam
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{AnswerOption, Points};

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                text: format!("Question {i}"),
                points: Points(1.0),
                options: vec![
                    AnswerOption {
                        text: format!("first {i}"),
                        is_correct: true,
                    },
                    AnswerOption {
                        text: format!("second {i}"),
                        is_correct: false,
                    },
                ],
            })
            .collect()
    }

    #[test]
    fn zero_seed_converted_to_nonzero() {
        let mut rng = SeededRng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn string_seeds_are_deterministic() {
        let mut a = SeededRng::from_seed_str("exam_version_A.pdf");
        let mut b = SeededRng::from_seed_str("exam_version_A.pdf");
        let mut c = SeededRng::from_seed_str("exam_version_B.pdf");
        let a: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let b: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        let c: Vec<u64> = (0..8).map(|_| c.next_u64()).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = SeededRng::new(12345);
        for n in 1..50 {
            assert!(rng.below(n) < n);
        }
    }

    #[test]
    #[should_panic(expected = "range must not be empty")]
    fn below_zero_panics() {
        SeededRng::new(1).below(0);
    }

    #[test]
    fn shuffle_keeps_option_order() {
        let mut qs = questions(10);
        shuffle_questions(&mut qs, "out1");
        for q in qs.iter() {
            let i = q.text.trim_start_matches("Question ");
            assert_eq!(q.options[0].text, format!("first {i}"));
            assert_eq!(q.options[1].text, format!("second {i}"));
        }
    }

    #[test]
    fn different_seeds_give_different_orders() {
        let a = {
            let mut qs = questions(20);
            shuffle_questions(&mut qs, "A");
            qs
        };
        let b = {
            let mut qs = questions(20);
            shuffle_questions(&mut qs, "B");
            qs
        };
        assert_ne!(a, b);
    }

    #[test]
    fn empty_and_single_question_banks_are_untouched() {
        let mut none: Vec<Question> = Vec::new();
        shuffle_questions(&mut none, "seed");
        assert!(none.is_empty());

        let mut one = questions(1);
        shuffle_questions(&mut one, "seed");
        assert_eq!(one, questions(1));
    }

    #[test]
    fn shuffled_leaves_the_source_exam_alone() {
        let exam = Exam {
            title: "Test Exam".into(),
            questions: questions(5),
        };
        let copy = shuffled(&exam, "A");
        assert_eq!(exam.questions, questions(5));
        assert_eq!(copy.title, exam.title);
        assert_eq!(copy.questions.len(), 5);
    }
}
