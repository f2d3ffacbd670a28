use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 只有班主任本人可以删除班级
    match storage.get_class_by_id(&class_id).await {
        Ok(Some(class)) => {
            if class.owner_id != uid {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::NotOwner,
                    "Only the class owner can delete the class",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::ClassDeleteFailed)),
    }

    // 删除班级及其全部成员关系
    match storage.delete_class(&class_id).await {
        Ok(true) => {
            info!("Class {} deleted by {}", class_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Class deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::ClassDeleteFailed)),
    }
}
