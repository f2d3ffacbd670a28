pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::requests::CreateClassRequest;
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    // 创建班级
    pub async fn create_class(
        &self,
        req: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, req, class_data).await
    }

    // 列出自己创建的班级
    pub async fn list_owned_classes(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_owned_classes(self, req).await
    }

    // 列出自己加入的班级
    pub async fn list_enrolled_classes(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_enrolled_classes(self, req).await
    }

    // 删除自己创建的班级
    pub async fn delete_class(
        &self,
        req: &HttpRequest,
        class_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, req, class_id).await
    }
}
