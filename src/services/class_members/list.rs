use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassMemberService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

/// 班主任查看成员名单，按加入时间升序
pub async fn list_members(
    service: &ClassMemberService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = ClassMemberService::ensure_owner(&storage, request, &class_id).await {
        return Ok(response);
    }

    match storage.list_class_members(&class_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            members,
            "Class members retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
