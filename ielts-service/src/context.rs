//! Per-call status reporting.
//!
//! The handler reports a failed call by setting a status code and a detail message on a
//! [`CallContext`]. Over the wire the context is a [`StatusContext`] that becomes the
//! `tonic::Status` of the call; outside of a call (the startup self-test) it is a
//! [`NoopContext`].
use tonic::{Code, Status};

pub trait CallContext {
    fn set_code(&mut self, code: Code);
    fn set_details(&mut self, details: String);
}

/// Accepts any code or details and discards them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopContext;

impl CallContext for NoopContext {
    fn set_code(&mut self, _code: Code) {}

    fn set_details(&mut self, _details: String) {}
}

/// Records what the handler reported so it can be returned to the caller.
#[derive(Debug, Default, Clone)]
pub struct StatusContext {
    code: Option<Code>,
    details: Option<String>,
}

impl StatusContext {
    pub fn code(&self) -> Option<Code> {
        self.code
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Falls back to `Unknown` when no code was reported.
    pub fn into_status(self) -> Status {
        Status::new(
            self.code.unwrap_or(Code::Unknown),
            self.details.unwrap_or_default(),
        )
    }
}

impl CallContext for StatusContext {
    fn set_code(&mut self, code: Code) {
        self.code = Some(code);
    }

    fn set_details(&mut self, details: String) {
        self.details = Some(details);
    }
}
