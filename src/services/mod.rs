pub mod auth;
pub mod class_members;
pub mod classes;

pub use auth::AuthService;
pub use class_members::ClassMemberService;
pub use classes::ClassService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::ClassPassError;
use crate::models::{ApiResponse, ErrorCode};

/// 将存储层的类型化错误映射为统一的 HTTP 响应
///
/// fallback 是存储故障（数据库错误等）时使用的业务错误码。
pub(crate) fn error_response(e: &ClassPassError, fallback: ErrorCode) -> HttpResponse {
    let message = e.message().to_string();
    match e {
        ClassPassError::Validation(_) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, message)),
        ClassPassError::AlreadyMember(_) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AlreadyMember, message)),
        ClassPassError::PinResetRequired(_) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::PinResetRequired, message),
        ),
        ClassPassError::InvalidPin(_) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::InvalidPin, message)),
        ClassPassError::Authentication(_) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::AuthFailed, message)),
        ClassPassError::NotOwner(_) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::NotOwner, message)),
        ClassPassError::NotAMember(_) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::NotAMember, message)),
        ClassPassError::OwnerCannotLeave(_) => HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::OwnerCannotLeave, message),
        ),
        ClassPassError::Authorization(_) => HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::PermissionDenied, message),
        ),
        ClassPassError::ClassNotFound(_) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ClassNotFound, message)),
        ClassPassError::InvalidPassphrase(_) => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::InvalidPassphrase, message),
        ),
        ClassPassError::IdentityNotFound(_) => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::IdentityNotFound, message),
        ),
        _ => {
            error!("Storage operation failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(fallback, message))
        }
    }
}
