//! # Startup self-test
//!
//! Runs the handler once on [`sample_request`] outside of any gRPC call and prints the result.
//! It is a diagnostic: nothing keeps the response, and the binary can skip it with
//! `--skip-self-test`.
//!
//! A failing evaluation is returned to the caller, which aborts startup.
use crate::context::NoopContext;
use crate::evaluator::{EvaluationError, Evaluator};
use crate::pb::{EvaluationRequest, EvaluationResponse};
use crate::service::IeltsEvaluation;
use std::io::{self, Write};

#[derive(thiserror::Error, Debug)]
pub enum SelfTestError {
    #[error("Self-test evaluation failed: '{0}'")]
    Evaluation(#[from] EvaluationError),
    #[error("Failed to write self-test output: '{0}'")]
    Output(#[from] io::Error),
}

pub fn sample_request() -> EvaluationRequest {
    EvaluationRequest {
        student_response: "This is a sample student response.".to_string(),
        passage: "This is a sample passage.".to_string(),
        question: "This is a sample question.".to_string(),
        complex_sentences: "These are sample complex sentences.".to_string(),
        advanced_vocabulary: "This is sample advanced vocabulary.".to_string(),
        cohesive_devices: "These are sample cohesive devices.".to_string(),
    }
}

/// Evaluates [`sample_request`] against a [`NoopContext`] and writes the outcome to `out`.
pub fn run<E: Evaluator>(
    service: &IeltsEvaluation<E>,
    out: &mut impl Write,
) -> Result<EvaluationResponse, SelfTestError> {
    run_with(service, sample_request(), out)
}

/// Same as [`run`] with a caller-provided request.
pub fn run_with<E: Evaluator>(
    service: &IeltsEvaluation<E>,
    request: EvaluationRequest,
    out: &mut impl Write,
) -> Result<EvaluationResponse, SelfTestError> {
    writeln!(out, "Executing EvaluateIELTS...")?;
    let response = service.evaluate(request, &mut NoopContext)?;

    writeln!(out, "EvaluateIELTS Response:")?;
    write_response(&response, out)?;
    out.flush()?;

    Ok(response)
}

fn write_response(response: &EvaluationResponse, out: &mut impl Write) -> io::Result<()> {
    let fields = [
        ("student_response", &response.student_response),
        ("passage", &response.passage),
        ("question", &response.question),
        ("complex_sentences", &response.complex_sentences),
        ("advanced_vocabulary", &response.advanced_vocabulary),
        ("cohesive_devices", &response.cohesive_devices),
        ("evaluation_from_claude", &response.evaluation_from_claude),
    ];

    for (name, value) in fields {
        writeln!(out, "{name}: {value:?}")?;
    }

    Ok(())
}
