//! # Evaluators
//!
//! An [`Evaluator`] turns a submission into a written evaluation. The handler owns one and
//! calls it synchronously for every request.
//!
//! [`RubricEvaluator`] is a deterministic lexical check over the four IELTS writing criteria:
//! grammar, vocabulary, coherence and task response. Each criterion gets one line in the report.
use crate::pb::EvaluationRequest;
use tonic::Code;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("The student response is empty")]
    EmptyResponse,
    #[error("Evaluation failed: '{0}'")]
    Evaluator(String),
}

impl EvaluationError {
    /// The gRPC status code reported for this error.
    pub fn code(&self) -> Code {
        match self {
            EvaluationError::EmptyResponse => Code::InvalidArgument,
            EvaluationError::Evaluator(_) => Code::Internal,
        }
    }
}

/// Runs inline on a Tokio worker thread for every call, so implementations must not block.
/// Slow work such as a call to a remote model belongs on `tokio::task::spawn_blocking` or a
/// dedicated runtime behind the evaluator.
pub trait Evaluator: Send + Sync + 'static {
    /// Produces the evaluation text for a validated submission.
    fn evaluate(&self, submission: &EvaluationRequest) -> Result<String, EvaluationError>;
}

/// Scores a submission by checking the response against the material supplied with it.
///
/// # Report
///
/// ```text
/// Grammar: 1 sentence(s); 0 of 1 listed complex structures used.
/// Vocabulary: 6 word(s), 6 distinct; 0 of 1 listed advanced terms used.
/// Coherence: 0 of 1 listed cohesive devices used.
/// Task response: 2 of 3 question keywords and 2 of 3 passage keywords addressed.
/// ```
///
/// Listed items come from splitting a field on `,`, `;` or newlines. An item counts as used when
/// the response contains it, ignoring case. Keywords are the distinct words of at least
/// [`KEYWORD_MIN_LEN`](Self::KEYWORD_MIN_LEN) characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RubricEvaluator;

impl RubricEvaluator {
    pub const KEYWORD_MIN_LEN: usize = 4;
}

impl Evaluator for RubricEvaluator {
    fn evaluate(&self, submission: &EvaluationRequest) -> Result<String, EvaluationError> {
        let response = submission.student_response.as_str();
        let response_lower = response.to_lowercase();
        let response_words = distinct_words(response);

        let complex = listed_items(&submission.complex_sentences);
        let complex_used = used_items(&response_lower, &complex);

        let vocabulary = listed_items(&submission.advanced_vocabulary);
        let vocabulary_used = used_items(&response_lower, &vocabulary);

        let devices = listed_items(&submission.cohesive_devices);
        let devices_used = used_items(&response_lower, &devices);

        let question = keywords(&submission.question);
        let question_hits = addressed(&question, &response_words);
        let passage = keywords(&submission.passage);
        let passage_hits = addressed(&passage, &response_words);

        let report = [
            format!(
                "Grammar: {} sentence(s); {} of {} listed complex structures used{}.",
                sentence_count(response),
                complex_used.len(),
                complex.len(),
                used_suffix(&complex_used),
            ),
            format!(
                "Vocabulary: {} word(s), {} distinct; {} of {} listed advanced terms used{}.",
                response.split_whitespace().count(),
                response_words.len(),
                vocabulary_used.len(),
                vocabulary.len(),
                used_suffix(&vocabulary_used),
            ),
            format!(
                "Coherence: {} of {} listed cohesive devices used{}.",
                devices_used.len(),
                devices.len(),
                used_suffix(&devices_used),
            ),
            format!(
                "Task response: {} of {} question keywords and {} of {} passage keywords addressed.",
                question_hits,
                question.len(),
                passage_hits,
                passage.len(),
            ),
        ];

        Ok(report.join("\n"))
    }
}

fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Lowercased words in order of first appearance, without duplicates.
fn distinct_words(text: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in text.split_whitespace().map(normalize) {
        if !word.is_empty() && !words.contains(&word) {
            words.push(word);
        }
    }
    words
}

fn keywords(text: &str) -> Vec<String> {
    distinct_words(text)
        .into_iter()
        .filter(|word| word.chars().count() >= RubricEvaluator::KEYWORD_MIN_LEN)
        .collect()
}

fn addressed(keywords: &[String], response_words: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| response_words.contains(*keyword))
        .count()
}

fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|sentence| !sentence.trim().is_empty())
        .count()
}

fn listed_items(field: &str) -> Vec<&str> {
    field
        .split([',', ';', '\n'])
        .map(|item| {
            item.trim()
                .trim_matches(|c: char| c.is_ascii_punctuation())
                .trim()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

fn used_items<'a>(response_lower: &str, items: &[&'a str]) -> Vec<&'a str> {
    items
        .iter()
        .copied()
        .filter(|item| response_lower.contains(&item.to_lowercase()))
        .collect()
}

fn used_suffix(used: &[&str]) -> String {
    if used.is_empty() {
        String::new()
    } else {
        format!(" (used: {})", used.join(", "))
    }
}
