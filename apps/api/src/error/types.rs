use mentor_core::ReasonCode;
use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    code: String,
    message: String,
}

impl ErrorResponse {
    pub(super) fn new(reason: ReasonCode, message: String) -> Self {
        Self {
            code: reason.as_str().to_owned(),
            message,
        }
    }
}
