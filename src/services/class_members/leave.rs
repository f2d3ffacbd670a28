use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassMemberService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

/// 成员主动退出班级，班主任不可退出自己的班级
pub async fn leave_class(
    service: &ClassMemberService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let storage = service.get_storage(request);

    match storage.leave_class(&class_id, &user_id).await {
        Ok(()) => {
            info!("User {} left class {}", user_id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Left class successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
