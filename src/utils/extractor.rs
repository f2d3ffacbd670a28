use crate::models::{ApiResponse, ErrorCode};
use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse};

/// 定义一个安全的字符串路径参数提取器
///
/// 提取失败时直接返回 400,避免在每个 handler 里重复校验。
#[macro_export]
macro_rules! define_safe_string_extractor {
    ($name:ident, $param:expr) => {
        pub struct $name(pub String);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready($crate::utils::extractor::extract_string_param(
                    req, $param,
                )
                .map($name))
            }
        }

        impl std::ops::Deref for $name {
            type Target = String;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

/// 从路径中提取并校验字符串参数
pub fn extract_string_param(req: &HttpRequest, name: &str) -> Result<String, actix_web::Error> {
    match req.match_info().get(name) {
        Some(value) if !value.is_empty() && value.len() <= 128 => Ok(value.to_string()),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("无效的路径参数: {name}"),
            ));
            Err(InternalError::from_response(
                format!("invalid path parameter: {name}"),
                response,
            )
            .into())
        }
    }
}

define_safe_string_extractor!(SafeClassId, "class_id");
define_safe_string_extractor!(SafeMemberUserId, "user_id");
