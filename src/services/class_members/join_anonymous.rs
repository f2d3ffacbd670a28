use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassMemberService;
use crate::models::{
    ApiResponse, ErrorCode,
    class_members::{requests::AnonymousJoinRequest, responses::AnonymousJoinResponse},
};
use crate::services::error_response;
use crate::utils::validate::{
    validate_first_name, validate_passphrase_input, validate_pin_code,
};

/// 匿名加入：无账号学生凭 通行码 + 名字 + PIN 入班
///
/// 身份解析与创建全部发生在存储层的单个事务内。
pub async fn join_class_anonymous(
    service: &ClassMemberService,
    request: &HttpRequest,
    join_data: AnonymousJoinRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_passphrase_input(&join_data.passphrase) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Err(msg) = validate_first_name(&join_data.first_name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Err(msg) = validate_pin_code(&join_data.pin_code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage
        .join_class_anonymous(&join_data.passphrase, &join_data.first_name, &join_data.pin_code)
        .await
    {
        Ok(outcome) => {
            info!(
                "Student {} joined class {} anonymously (provisioned: {})",
                outcome.student.user_id, outcome.class.id, outcome.provisioned
            );
            let response = AnonymousJoinResponse {
                class_id: outcome.class.id,
                class_name: outcome.class.name,
                subject: outcome.class.subject,
                student_id: outcome.student.user_id,
                first_name: outcome.student.first_name,
                joined_at: outcome.member.joined_at,
            };
            // 新建身份返回 201，复用已有身份返回 200
            let mut builder = if outcome.provisioned {
                HttpResponse::Created()
            } else {
                HttpResponse::Ok()
            };
            Ok(builder.json(ApiResponse::success(response, "Class joined successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::ClassJoinFailed)),
    }
}
