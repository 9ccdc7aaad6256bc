//! # IELTS Evaluation Service
//!
//! gRPC service scoring IELTS writing submissions: `ielts.IELTSService/EvaluateIELTS`.
//!
//! ## Key Components
//!
//! * **[`Evaluator`]:** The seam where the scoring logic plugs in. [`RubricEvaluator`] is the
//!   deterministic implementation shipped with the crate.
//! * **[`IeltsEvaluation`]:** The handler. It validates the submission, runs the evaluator and
//!   reports failures through a [`CallContext`].
//! * **[`self_test`]:** A one-shot diagnostic that runs the handler on a fixed sample request.
pub mod context;
pub mod evaluator;
pub mod self_test;
pub mod service;

pub mod pb {
    include!(concat!(env!("OUT_DIR"), "/ielts.rs"));
}

pub use context::{CallContext, NoopContext, StatusContext};
pub use evaluator::{EvaluationError, Evaluator, RubricEvaluator};
pub use pb::ielts_service_client::IeltsServiceClient;
pub use pb::ielts_service_server::{IeltsService, IeltsServiceServer};
pub use service::IeltsEvaluation;

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("descriptors");
