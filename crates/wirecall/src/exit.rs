use std::fmt;

use wirecall_message::DecodeError;
use wirecall_rpc::{Code, Status};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const UNAVAILABLE: i32 = 3;
pub const UNIMPLEMENTED: i32 = 4;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Process exit code for a call outcome.
pub fn code_exit(code: Code) -> i32 {
    match code {
        Code::Ok => SUCCESS,
        Code::InvalidArgument | Code::OutOfRange | Code::DataLoss | Code::ResourceExhausted => {
            DATA_INVALID
        }
        Code::PermissionDenied | Code::Unauthenticated => PERMISSION_DENIED,
        Code::DeadlineExceeded => TIMEOUT,
        Code::Unavailable => UNAVAILABLE,
        Code::Unimplemented => UNIMPLEMENTED,
        Code::Internal | Code::Unknown => INTERNAL,
        Code::Cancelled
        | Code::NotFound
        | Code::AlreadyExists
        | Code::FailedPrecondition
        | Code::Aborted => FAILURE,
    }
}

pub fn status_error(context: &str, status: Status) -> CliError {
    CliError::new(code_exit(status.code()), format!("{context}: {status}"))
}

pub fn decode_error(context: &str, err: DecodeError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}
