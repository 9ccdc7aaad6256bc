//! The `IeltsService` handler.
use crate::context::{CallContext, StatusContext};
use crate::evaluator::{EvaluationError, Evaluator, RubricEvaluator};
use crate::pb::ielts_service_server::IeltsService;
use crate::pb::{EvaluationRequest, EvaluationResponse};
use tonic::{Request, Response, Status};

/// Validates submissions and hands them to an [`Evaluator`].
#[derive(Debug, Default, Clone)]
pub struct IeltsEvaluation<E = RubricEvaluator> {
    evaluator: E,
}

impl<E: Evaluator> IeltsEvaluation<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Evaluates one submission.
    ///
    /// On failure the error's status code and message are reported on `ctx` before the error
    /// is returned. The response echoes every submitted field next to the evaluation.
    pub fn evaluate(
        &self,
        request: EvaluationRequest,
        ctx: &mut dyn CallContext,
    ) -> Result<EvaluationResponse, EvaluationError> {
        match self.run_evaluator(&request) {
            Ok(evaluation) => {
                let EvaluationRequest {
                    student_response,
                    passage,
                    question,
                    complex_sentences,
                    advanced_vocabulary,
                    cohesive_devices,
                } = request;

                Ok(EvaluationResponse {
                    student_response,
                    passage,
                    question,
                    complex_sentences,
                    advanced_vocabulary,
                    cohesive_devices,
                    evaluation_from_claude: evaluation,
                })
            }
            Err(err) => {
                ctx.set_code(err.code());
                ctx.set_details(err.to_string());
                Err(err)
            }
        }
    }

    fn run_evaluator(&self, request: &EvaluationRequest) -> Result<String, EvaluationError> {
        if request.student_response.trim().is_empty() {
            return Err(EvaluationError::EmptyResponse);
        }

        self.evaluator.evaluate(request)
    }
}

#[tonic::async_trait]
impl<E: Evaluator> IeltsService for IeltsEvaluation<E> {
    async fn evaluate_ielts(
        &self,
        request: Request<EvaluationRequest>,
    ) -> Result<Response<EvaluationResponse>, Status> {
        let request = request.into_inner();
        tracing::debug!(
            response_len = request.student_response.len(),
            "EvaluateIELTS"
        );

        let mut ctx = StatusContext::default();
        self.evaluate(request, &mut ctx)
            .map(Response::new)
            .map_err(|err| {
                tracing::warn!(%err, "EvaluateIELTS failed");
                ctx.into_status()
            })
    }
}
