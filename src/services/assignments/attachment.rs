use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::error;

use super::AssignmentService;
use crate::errors::SmartClassError;
use crate::models::{ApiResponse, ErrorCode};

/// 下载提交附件
///
/// 按 (作业, 学生, 存储文件名) 三元组检索：文件名必须出现在
/// 该提交记录的附件清单里，否则 404。响应用原始文件名作
/// Content-Disposition。
pub async fn download_attachment(
    service: &AssignmentService,
    req: &HttpRequest,
    assignment_id: i64,
    student_id: i64,
    filename: String,
) -> ActixResult<HttpResponse> {
    let attachment = match service
        .get_storage(req)
        .get_attachment(assignment_id, student_id, &filename)
        .await
    {
        Ok(Some(attachment)) => attachment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Attachment not found",
            )));
        }
        Err(e) => {
            error!("Failed to query attachment {}: {}", filename, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Attachment query failed",
                )),
            );
        }
    };

    if !Path::new(&attachment.path).exists() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "文件不存在",
        )));
    }

    let mut file = match File::open(&attachment.path) {
        Ok(f) => f,
        Err(e) => {
            error!("{:?}", SmartClassError::file_operation(format!("{e:?}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File open failed",
                )),
            );
        }
    };

    let mut buf = Vec::new();
    if file.read_to_end(&mut buf).is_err() {
        error!("{:?}", SmartClassError::file_operation("File read failed"));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "File read failed",
            )),
        );
    }

    // 使用数据库中的原始文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment.original_name),
        ))
        .body(buf))
}
