//! # Echo Service
//!
//! A single-method gRPC service: `echo.EchoService/ProcessData` answers every
//! [`DataRequest`](pb::DataRequest) with its `input_data` prefixed by [`PREFIX`].
//!
//! The handler never fails and keeps no state between calls, so it can be shared
//! freely across the server's workers.

pub mod pb {
    include!(concat!(env!("OUT_DIR"), "/echo.rs"));
}

use pb::{DataRequest, DataResponse};
use tonic::{Request, Response, Status};

pub use pb::echo_service_client::EchoServiceClient;
pub use pb::echo_service_server::{EchoService, EchoServiceServer};
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("descriptors");

/// Literal prepended to every processed input.
pub const PREFIX: &str = "Processed: ";

/// Processes a single input. The result is always `PREFIX` followed by the input, untouched.
pub fn process_data(input: &str) -> String {
    format!("{PREFIX}{input}")
}

/// The `EchoService` implementation served by `english-ai echo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[tonic::async_trait]
impl EchoService for EchoHandler {
    async fn process_data(
        &self,
        request: Request<DataRequest>,
    ) -> Result<Response<DataResponse>, Status> {
        let DataRequest { input_data } = request.into_inner();
        tracing::debug!(len = input_data.len(), "ProcessData");

        Ok(Response::new(DataResponse {
            processed_data: process_data(&input_data),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_input() {
        assert_eq!(process_data("hello"), "Processed: hello");
    }

    #[test]
    fn empty_input_yields_bare_prefix() {
        assert_eq!(process_data(""), "Processed: ");
    }

    #[test]
    fn input_is_not_escaped_or_trimmed() {
        let input = "  line one\nline \"two\"\t{}  ";
        assert_eq!(process_data(input), format!("Processed: {input}"));
    }
}
