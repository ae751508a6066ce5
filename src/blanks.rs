//! Fill-in-the-blank exercise synthesis.
//!
//! One question is picked at random, two of its inner words (never the
//! first or last word) are swapped for [`BLANK`], and those words are mixed
//! with the question's own options to form the pool the player picks from.

use crate::models::{FillInBlankExercise, QuizQuestion, StudyCard};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

pub const BLANK: &str = "___";
pub const MAX_OPTIONS: usize = 6;
const KEY_WORD_COUNT: usize = 2;
const MIN_KEY_WORD_CHARS: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("no questions to build an exercise from")]
    EmptyPool,
    #[error("no question has two distinct inner words longer than three characters")]
    NoQualifyingQuestion,
}

/// Anything that can be turned into a fill-in-the-blank exercise.
pub trait BlankSource {
    fn text(&self) -> &str;
    fn options(&self) -> &[String];
}

impl BlankSource for QuizQuestion {
    fn text(&self) -> &str {
        &self.question
    }

    fn options(&self) -> &[String] {
        &self.options
    }
}

impl BlankSource for StudyCard {
    fn text(&self) -> &str {
        &self.question
    }

    fn options(&self) -> &[String] {
        &self.options
    }
}

/// Collect up to two distinct key words, skipping the first and last word.
/// Returns `(index, word)` pairs in sentence order.
pub fn find_key_words<'a>(words: &[&'a str]) -> Vec<(usize, &'a str)> {
    let mut keys: Vec<(usize, &'a str)> = Vec::with_capacity(KEY_WORD_COUNT);

    for (i, word) in words
        .iter()
        .enumerate()
        .take(words.len().saturating_sub(1))
        .skip(1)
    {
        if word.chars().count() >= MIN_KEY_WORD_CHARS && !keys.iter().any(|(_, k)| k == word) {
            keys.push((i, *word));
            if keys.len() == KEY_WORD_COUNT {
                break;
            }
        }
    }

    keys
}

/// Byte ranges of the whitespace-separated words in `text`.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

/// Build an exercise from a single question, or `None` when it does not
/// have two key words.
pub fn blank_question<Q, R>(source: &Q, rng: &mut R) -> Option<FillInBlankExercise>
where
    Q: BlankSource + ?Sized,
    R: Rng + ?Sized,
{
    let text = source.text();
    let spans = word_spans(text);
    let words: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
    let keys = find_key_words(&words);
    if keys.len() < KEY_WORD_COUNT {
        return None;
    }

    // Only the blanked words are replaced; every separator stays as written.
    let mut question = String::with_capacity(text.len());
    let mut cursor = 0;
    for &(i, _) in &keys {
        let (start, end) = spans[i];
        question.push_str(&text[cursor..start]);
        question.push_str(BLANK);
        cursor = end;
    }
    question.push_str(&text[cursor..]);

    let key_words: Vec<&str> = keys.iter().map(|(_, w)| *w).collect();
    let answer = key_words.join(" ");

    let mut options: Vec<String> = Vec::with_capacity(MAX_OPTIONS);
    for candidate in key_words
        .iter()
        .copied()
        .chain(source.options().iter().map(String::as_str))
    {
        if options.len() == MAX_OPTIONS {
            break;
        }
        if !options.iter().any(|o| o == candidate) {
            options.push(candidate.to_string());
        }
    }
    options.shuffle(rng);

    Some(FillInBlankExercise {
        question,
        answer,
        options,
    })
}

/// Synthesize one exercise from a randomly chosen question.
///
/// If the chosen question cannot yield two key words, the remaining
/// questions are tried in random order before giving up.
pub fn synthesize<Q, R>(questions: &[Q], rng: &mut R) -> Result<FillInBlankExercise, SynthesisError>
where
    Q: BlankSource,
    R: Rng + ?Sized,
{
    if questions.is_empty() {
        return Err(SynthesisError::EmptyPool);
    }

    let first = rng.gen_range(0..questions.len());
    if let Some(exercise) = blank_question(&questions[first], rng) {
        return Ok(exercise);
    }

    crate::logger::log(&format!(
        "Question {} has no usable key words, trying the others",
        first
    ));

    let mut rest: Vec<usize> = (0..questions.len()).filter(|&i| i != first).collect();
    rest.shuffle(rng);
    rest.into_iter()
        .find_map(|i| blank_question(&questions[i], rng))
        .ok_or(SynthesisError::NoQualifyingQuestion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerLetter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(text: &str, options: &[&str]) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: AnswerLetter::A,
        }
    }

    fn mitochondria() -> QuizQuestion {
        question(
            "The mitochondria is the powerhouse of the cell",
            &["mitochondria", "nucleus", "ribosome", "ATP"],
        )
    }

    fn blank_positions(text: &str) -> Vec<usize> {
        text.split(' ')
            .enumerate()
            .filter(|(_, w)| *w == BLANK)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_find_key_words_skips_first_and_last() {
        let words = vec!["Photosynthesis", "is", "how", "plants", "make", "glucose"];
        let keys = find_key_words(&words);
        assert_eq!(keys, vec![(3, "plants"), (4, "make")]);
    }

    #[test]
    fn test_find_key_words_requires_distinct_words() {
        let words = vec!["An", "apple", "and", "apple", "juice", "today"];
        let keys = find_key_words(&words);
        assert_eq!(keys, vec![(1, "apple"), (4, "juice")]);
    }

    #[test]
    fn test_find_key_words_short_sentences() {
        assert!(find_key_words(&[]).is_empty());
        assert!(find_key_words(&["Mitochondria"]).is_empty());
        assert!(find_key_words(&["Mitochondria", "powerhouse"]).is_empty());
    }

    #[test]
    fn test_mitochondria_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let exercise = synthesize(&[mitochondria()], &mut rng).unwrap();

        assert_eq!(exercise.question, "The ___ is the ___ of the cell");
        assert_eq!(exercise.answer, "mitochondria powerhouse");

        let positions = blank_positions(&exercise.question);
        assert_eq!(positions, vec![1, 4]);

        let source = mitochondria();
        let original: Vec<&str> = source.question.split(' ').collect();
        let expected: Vec<&str> = positions.iter().map(|&i| original[i]).collect();
        assert_eq!(exercise.answer, expected.join(" "));

        assert!(exercise.options.contains(&"mitochondria".to_string()));
        assert!(exercise.options.contains(&"powerhouse".to_string()));
    }

    #[test]
    fn test_distractor_equal_to_key_word_is_not_repeated() {
        let mut rng = StdRng::seed_from_u64(1);
        let exercise = synthesize(&[mitochondria()], &mut rng).unwrap();

        let mut sorted = exercise.options.clone();
        sorted.sort();
        assert_eq!(
            sorted,
            vec!["ATP", "mitochondria", "nucleus", "powerhouse", "ribosome"]
        );
    }

    #[test]
    fn test_options_truncated_to_six() {
        let q = question(
            "Rust guarantees memory safety without garbage collection",
            &["one", "two", "three", "four", "five", "six", "seven"],
        );
        let mut rng = StdRng::seed_from_u64(3);
        let exercise = synthesize(&[q], &mut rng).unwrap();

        assert_eq!(exercise.answer, "guarantees memory");
        assert_eq!(exercise.options.len(), MAX_OPTIONS);
        assert!(exercise.options.contains(&"guarantees".to_string()));
        assert!(exercise.options.contains(&"memory".to_string()));
    }

    #[test]
    fn test_duplicate_distractors_are_removed() {
        let q = question(
            "The mitochondria is the powerhouse of the cell",
            &["nucleus", "nucleus", "ribosome", "ribosome"],
        );
        let mut rng = StdRng::seed_from_u64(11);
        let exercise = synthesize(&[q], &mut rng).unwrap();

        let mut sorted = exercise.options.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), exercise.options.len());
        assert_eq!(exercise.options.len(), 4);
    }

    #[test]
    fn test_doubled_spaces_are_preserved() {
        let q = question("The  mitochondria is the powerhouse of the cell", &[]);
        let mut rng = StdRng::seed_from_u64(5);
        let exercise = synthesize(&[q], &mut rng).unwrap();
        assert_eq!(exercise.question, "The  ___ is the ___ of the cell");
    }

    #[test]
    fn test_leading_space_does_not_expose_first_word() {
        let q = question(" Photosynthesis converts light energy", &[]);
        let mut rng = StdRng::seed_from_u64(2);
        let exercise = synthesize(&[q], &mut rng).unwrap();
        assert_eq!(exercise.answer, "converts light");
        assert_eq!(exercise.question, " Photosynthesis ___ ___ energy");
    }

    #[test]
    fn test_trailing_space_does_not_expose_last_word() {
        let q = question("A cat likes tuna ", &[]);
        let mut rng = StdRng::seed_from_u64(2);
        assert!(blank_question(&q, &mut rng).is_none());
        assert_eq!(
            synthesize(&[q], &mut rng),
            Err(SynthesisError::NoQualifyingQuestion)
        );
    }

    #[test]
    fn test_tabs_and_newlines_separate_words() {
        let q = question("Cells\tstore genetic\ninformation inside nuclei", &[]);
        let mut rng = StdRng::seed_from_u64(4);
        let exercise = synthesize(&[q], &mut rng).unwrap();
        assert_eq!(exercise.answer, "store genetic");
        assert_eq!(exercise.question, "Cells\t___ ___\ninformation inside nuclei");
    }

    #[test]
    fn test_word_spans() {
        let text = "  ab\tcd  e ";
        let words: Vec<&str> = word_spans(text).iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(words, vec!["ab", "cd", "e"]);
        assert!(word_spans("   ").is_empty());
    }

    #[test]
    fn test_properties_hold_across_seeds() {
        let pool = vec![
            mitochondria(),
            question(
                "Which process converts light energy into chemical energy?",
                &["Photosynthesis", "Respiration", "Fermentation", "Glycolysis"],
            ),
            question(
                "What does the Golgi apparatus mainly do?",
                &["Packages proteins", "Stores DNA", "Makes ATP", "Digests waste"],
            ),
            question(
                "In which year did the French Revolution begin?",
                &["1789", "1776", "1815", "1848"],
            ),
        ];

        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let exercise = synthesize(&pool, &mut rng).unwrap();

            let source = pool
                .iter()
                .find(|q| {
                    q.question.split(' ').count() == exercise.question.split(' ').count()
                        && q.question
                            .split(' ')
                            .zip(exercise.question.split(' '))
                            .all(|(a, b)| a == b || b == BLANK)
                })
                .expect("exercise should come from one of the questions");
            let words: Vec<&str> = source.question.split(' ').collect();

            let answer_words = exercise.answer_words();
            assert_eq!(answer_words.len(), 2);
            assert_ne!(answer_words[0], answer_words[1]);

            let positions = blank_positions(&exercise.question);
            assert_eq!(positions.len(), 2);
            for (pos, word) in positions.iter().zip(&answer_words) {
                assert!(*pos >= 1 && *pos <= words.len() - 2);
                assert_eq!(words[*pos], *word);
                assert!(word.chars().count() > 3);
            }

            assert!(exercise.options.len() <= MAX_OPTIONS);
            let mut unique = exercise.options.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), exercise.options.len());
            for word in answer_words {
                assert!(exercise.options.iter().any(|o| o == word));
            }
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let pool = vec![mitochondria(); 4];
        let a = synthesize(&pool, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = synthesize(&pool, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_pool() {
        let pool: Vec<QuizQuestion> = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(synthesize(&pool, &mut rng), Err(SynthesisError::EmptyPool));
    }

    #[test]
    fn test_no_question_has_two_key_words() {
        let pool = vec![
            question("A cat sat on a mat", &["dog"]),
            question("A big elephant sat here", &["mouse"]),
        ];
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                synthesize(&pool, &mut rng),
                Err(SynthesisError::NoQualifyingQuestion)
            );
        }
    }

    #[test]
    fn test_falls_back_to_qualifying_question() {
        let pool = vec![
            question("A cat sat on a mat", &["dog"]),
            question("A big elephant sat here", &["mouse"]),
            mitochondria(),
        ];
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let exercise = synthesize(&pool, &mut rng).unwrap();
            assert_eq!(exercise.answer, "mitochondria powerhouse");
        }
    }

    #[test]
    fn test_blank_question_single_key_word() {
        let mut rng = StdRng::seed_from_u64(0);
        let q = question("A big elephant sat here", &[]);
        assert!(blank_question(&q, &mut rng).is_none());
    }

    #[test]
    fn test_study_cards_as_source() {
        let mut card = StudyCard::new("The mitochondria is the powerhouse of the cell", "ATP");
        card.options = vec!["ribosome".to_string()];
        let mut rng = StdRng::seed_from_u64(9);
        let exercise = synthesize(&[card], &mut rng).unwrap();
        assert_eq!(exercise.options.len(), 3);
    }
}
