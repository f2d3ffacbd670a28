use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::class_members::requests::{
    AnonymousJoinRequest, JoinClassRequest, SetPinRequest,
};
use crate::services::ClassMemberService;
use crate::utils::{SafeClassId, SafeMemberUserId};

// 懒加载的全局 MEMBER_SERVICE 实例
static MEMBER_SERVICE: Lazy<ClassMemberService> = Lazy::new(ClassMemberService::new_lazy);

// HTTP处理程序
pub async fn join_class(
    req: HttpRequest,
    join_data: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.join_class(&req, join_data.into_inner()).await
}

pub async fn join_class_anonymous(
    req: HttpRequest,
    join_data: web::Json<AnonymousJoinRequest>,
) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE
        .join_class_anonymous(&req, join_data.into_inner())
        .await
}

pub async fn set_pin(
    req: HttpRequest,
    set_data: web::Json<SetPinRequest>,
) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.set_pin(&req, set_data.into_inner()).await
}

pub async fn list_members(req: HttpRequest, class_id: SafeClassId) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.list_members(&req, class_id.0).await
}

pub async fn remove_member(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    MEMBER_SERVICE.remove_member(&req, class_id, user_id).await
}

pub async fn reset_pin(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (class_id, student_id) = path.into_inner();
    MEMBER_SERVICE.reset_pin(&req, class_id, student_id).await
}

pub async fn leave_class(req: HttpRequest, class_id: SafeClassId) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.leave_class(&req, class_id.0).await
}

// 配置路由：成员名单管理全部是班主任操作
pub fn configure_class_members_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/members")
            .wrap(middlewares::RequireJWT)
            .service(
                // 班主任查看成员名单（含各学生 PIN 状态）
                web::resource("").route(web::get().to(list_members)),
            )
            .service(
                // 班主任移出成员，身份保留
                web::resource("/{user_id}").route(web::delete().to(remove_member)),
            )
            .service(
                // 班主任重置成员 PIN
                web::resource("/{user_id}/reset-pin").route(web::post().to(reset_pin)),
            ),
    );
}
