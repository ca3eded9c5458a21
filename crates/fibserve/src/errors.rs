//! Error handling and exit codes.

use fibserve_core::constants::exit_codes;
use fibserve_core::FibError;

/// Map the outcome of [`crate::app::run`] to a process exit code.
pub fn exit_code(result: &anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => match err.downcast_ref::<FibError>() {
            Some(FibError::Config(_)) => exit_codes::ERROR_CONFIG,
            Some(FibError::InvalidInput(_)) | None => exit_codes::ERROR_GENERIC,
        },
    }
}
