pub mod attachment;
pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list_by_class;
pub mod list_by_student;
pub mod status;
pub mod submissions;
pub mod submit;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    CreateAssignmentRequest, GradeRequest, UpdateStatusRequest,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 创建作业
    pub async fn create_assignment(
        &self,
        req: &HttpRequest,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, req, assignment_data).await
    }

    // 班级作业列表
    pub async fn list_by_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list_by_class::list_by_class(self, req, class_id).await
    }

    // 学生已提交的作业列表
    pub async fn list_by_student(
        &self,
        req: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list_by_student::list_by_student(self, req, student_id).await
    }

    // 单个作业
    pub async fn get_assignment(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, req, assignment_id).await
    }

    // 提交作业（multipart）
    pub async fn submit(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, req, assignment_id, payload).await
    }

    // 作业提交列表
    pub async fn list_submissions(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, req, assignment_id).await
    }

    // 评分
    pub async fn grade(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        student_id: i64,
        grade_data: GradeRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade(self, req, assignment_id, student_id, grade_data).await
    }

    // 更新状态
    pub async fn update_status(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        status_data: UpdateStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, req, assignment_id, status_data).await
    }

    // 删除作业
    pub async fn delete_assignment(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, req, assignment_id).await
    }

    // 下载提交附件
    pub async fn download_attachment(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        student_id: i64,
        filename: String,
    ) -> ActixResult<HttpResponse> {
        attachment::download_attachment(self, req, assignment_id, student_id, filename).await
    }
}
