use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserType;
use crate::routes::class_members;
use crate::services::ClassService;
use crate::utils::SafeClassId;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn list_owned_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_owned_classes(&req).await
}

pub async fn list_enrolled_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_enrolled_classes(&req).await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassId) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            // 匿名学生入口，无须认证
            .route(
                "/join-anonymous",
                web::post().to(class_members::join_class_anonymous),
            )
            .route("/set-pin", web::post().to(class_members::set_pin))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("").route(
                            web::post()
                                .to(create_class)
                                // 仅教师可以创建班级
                                .wrap(middlewares::RequireRole::new(&UserType::Teacher)),
                        ),
                    )
                    .service(
                        web::resource("/owned").route(
                            web::get()
                                .to(list_owned_classes)
                                // 班主任视角列表携带通行码
                                .wrap(middlewares::RequireRole::new(&UserType::Teacher)),
                        ),
                    )
                    .route("/enrolled", web::get().to(list_enrolled_classes))
                    .route("/join", web::post().to(class_members::join_class))
                    .service(
                        web::resource("/{class_id}").route(
                            web::delete()
                                .to(delete_class)
                                // 仅班主任可以删除自己的班级
                                .wrap(middlewares::RequireRole::new(&UserType::Teacher)),
                        ),
                    )
                    // 成员主动退出
                    .route(
                        "/{class_id}/membership",
                        web::delete().to(class_members::leave_class),
                    ),
            ),
    );
}
