use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassMemberService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    class_members::{requests::JoinClassRequest, responses::JoinClassResponse},
};
use crate::services::error_response;
use crate::utils::validate::validate_passphrase_input;

pub async fn join_class(
    service: &ClassMemberService,
    request: &HttpRequest,
    join_data: JoinClassRequest,
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

    if let Err(msg) = validate_passphrase_input(&join_data.passphrase) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    // 通行码是加入班级的唯一凭证
    let class = match storage.get_class_by_passphrase(&join_data.passphrase).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::InvalidPassphrase,
                "Passphrase does not match any class",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::ClassJoinFailed)),
    };

    match storage.join_class(&class.id, &user_id).await {
        Ok(member) => {
            info!("User {} joined class {}", user_id, class.id);
            let response = JoinClassResponse {
                class_id: class.id,
                class_name: class.name,
                subject: class.subject,
                joined_at: member.joined_at,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Class joined successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::ClassJoinFailed)),
    }
}
