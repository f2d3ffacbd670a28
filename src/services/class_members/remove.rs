use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassMemberService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

/// 班主任移出成员，学生身份与其它班级的成员关系不受影响
pub async fn remove_member(
    service: &ClassMemberService,
    request: &HttpRequest,
    class_id: String,
    user_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = ClassMemberService::ensure_owner(&storage, request, &class_id).await {
        return Ok(response);
    }

    match storage.remove_member(&class_id, &user_id).await {
        Ok(()) => {
            info!("User {} removed from class {}", user_id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Member removed successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
