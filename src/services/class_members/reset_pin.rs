use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassMemberService;
use crate::models::{
    ApiResponse, ErrorCode, class_members::responses::ResetPinResponse,
};
use crate::services::error_response;

/// 班主任重置某成员的 PIN
///
/// 新 PIN 由班主任转告学生，学生下次加入前必须先设置自己的新 PIN。
pub async fn reset_pin(
    service: &ClassMemberService,
    request: &HttpRequest,
    class_id: String,
    student_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = ClassMemberService::ensure_owner(&storage, request, &class_id).await {
        return Ok(response);
    }

    match storage.reset_student_pin(&class_id, &student_id).await {
        Ok(student) => {
            info!("PIN reset for student {} in class {}", student_id, class_id);
            let response = ResetPinResponse {
                student_id: student.user_id,
                first_name: student.first_name,
                pin_code: student.pin_code.unwrap_or_default(),
                pin_reset_required: student.pin_reset_required,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "PIN reset successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
