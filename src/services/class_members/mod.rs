pub mod join;
pub mod join_anonymous;
pub mod leave;
pub mod list;
pub mod remove;
pub mod reset_pin;
pub mod set_pin;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::class_members::requests::{
    AnonymousJoinRequest, JoinClassRequest, SetPinRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ClassMemberService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassMemberService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 登录用户通过通行码加入班级
    pub async fn join_class(
        &self,
        request: &HttpRequest,
        join_data: JoinClassRequest,
    ) -> ActixResult<HttpResponse> {
        join::join_class(self, request, join_data).await
    }

    // 匿名学生通过通行码加入班级
    pub async fn join_class_anonymous(
        &self,
        request: &HttpRequest,
        join_data: AnonymousJoinRequest,
    ) -> ActixResult<HttpResponse> {
        join_anonymous::join_class_anonymous(self, request, join_data).await
    }

    // 学生在 PIN 被重置后设置新 PIN
    pub async fn set_pin(
        &self,
        request: &HttpRequest,
        set_data: SetPinRequest,
    ) -> ActixResult<HttpResponse> {
        set_pin::set_pin(self, request, set_data).await
    }

    // 班主任查看成员名单
    pub async fn list_members(
        &self,
        request: &HttpRequest,
        class_id: String,
    ) -> ActixResult<HttpResponse> {
        list::list_members(self, request, class_id).await
    }

    // 班主任重置某成员的 PIN
    pub async fn reset_pin(
        &self,
        request: &HttpRequest,
        class_id: String,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        reset_pin::reset_pin(self, request, class_id, student_id).await
    }

    // 班主任移出成员
    pub async fn remove_member(
        &self,
        request: &HttpRequest,
        class_id: String,
        user_id: String,
    ) -> ActixResult<HttpResponse> {
        remove::remove_member(self, request, class_id, user_id).await
    }

    // 成员主动退出班级
    pub async fn leave_class(
        &self,
        request: &HttpRequest,
        class_id: String,
    ) -> ActixResult<HttpResponse> {
        leave::leave_class(self, request, class_id).await
    }

    /// 校验当前用户是班级的班主任
    ///
    /// 成功返回当前用户 ID，失败返回已构建好的 HTTP 响应。
    pub(crate) async fn ensure_owner(
        storage: &Arc<dyn Storage>,
        request: &HttpRequest,
        class_id: &str,
    ) -> Result<String, HttpResponse> {
        use crate::middlewares::RequireJWT;

        let uid = match RequireJWT::extract_user_id(request) {
            Some(id) => id,
            None => {
                return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Unauthorized: missing user id",
                )));
            }
        };

        match storage.get_class_by_id(class_id).await {
            Ok(Some(class)) if class.owner_id == uid => Ok(uid),
            Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotOwner,
                "Only the class owner can manage members",
            ))),
            Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            ))),
            Err(e) => Err(crate::services::error_response(
                &e,
                ErrorCode::InternalServerError,
            )),
        }
    }
}
