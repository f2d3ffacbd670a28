use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassMemberService;
use crate::models::{ApiResponse, ErrorCode, class_members::requests::SetPinRequest};
use crate::services::error_response;
use crate::utils::validate::validate_pin_code;

/// 学生在 PIN 被班主任重置后设置自己的新 PIN
pub async fn set_pin(
    service: &ClassMemberService,
    request: &HttpRequest,
    set_data: SetPinRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_pin_code(&set_data.pin_code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage
        .set_student_pin(&set_data.student_id, &set_data.pin_code)
        .await
    {
        Ok(student) => {
            info!("Student {} set a new PIN", student.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "PIN updated successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
