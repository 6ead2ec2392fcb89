use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::AssignmentService;
use crate::config::AppConfig;
use crate::errors::SmartClassError;
use crate::middlewares::RequireJWT;
use crate::models::submissions::entities::Attachment;
use crate::models::{ApiResponse, ErrorCode};

/// 表单读取结果：完整表单，或带响应的拒绝
enum UploadOutcome {
    Form {
        content: String,
        attachments: Vec<Attachment>,
    },
    Rejected(HttpResponse),
}

/// 提交作业
///
/// multipart 表单：`content` 文本字段 + 至多 upload.max_files 个
/// `attachments` 文件，单个不超过 upload.max_size 字节。
///
/// 文件先落盘暂存，数据库写入成功后才算数；表单读取中断、
/// 校验拒绝或数据库失败时删掉暂存文件补偿，绝不落半份提交。
/// 重复提交由唯一索引拒绝。
pub async fn submit(
    service: &AssignmentService,
    req: &HttpRequest,
    assignment_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let uid = match RequireJWT::extract_user_id(req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let storage = service.get_storage(req);

    // 作业必须存在
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            error!("Failed to query assignment {}: {}", assignment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error",
                )),
            );
        }
    }

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let max_files = config.upload.max_files;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        error!("{}", SmartClassError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    let (content, attachments) =
        match read_multipart_form(&mut payload, upload_dir, max_size, max_files).await? {
            UploadOutcome::Form {
                content,
                attachments,
            } => (content, attachments),
            UploadOutcome::Rejected(resp) => return Ok(resp),
        };

    match storage
        .create_submission(assignment_id, uid, content, attachments.clone())
        .await
    {
        Ok(submission) => {
            info!(
                "Submission {} created for assignment {} by student {}",
                submission.id, assignment_id, uid
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Submitted successfully",
            )))
        }
        Err(e) if matches!(e, SmartClassError::Conflict(_)) => {
            cleanup_staged(&attachments);
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AlreadySubmitted,
                "Already submitted this assignment",
            )))
        }
        Err(e) => {
            error!("Submission persistence failed: {}", e);
            cleanup_staged(&attachments);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionFailed,
                    "Submission failed",
                )),
            )
        }
    }
}

/// 读取 multipart 表单并把附件暂存到上传目录
///
/// 所有失败出口（流中断、写盘失败、超限拒绝）先清掉已暂存的
/// 文件再返回，调用方拿到的要么是完整表单，要么什么都没留下。
async fn read_multipart_form(
    payload: &mut Multipart,
    upload_dir: &str,
    max_size: usize,
    max_files: usize,
) -> ActixResult<UploadOutcome> {
    let mut content = String::new();
    let mut attachments: Vec<Attachment> = Vec::new();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                // 流中断时不能让半份提交落库
                warn!("Multipart stream aborted: {}", e);
                cleanup_staged(&attachments);
                return Err(e.into());
            }
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "content" => {
                let mut buf = Vec::new();
                while let Some(chunk) = field.next().await {
                    match chunk {
                        Ok(data) => buf.extend_from_slice(&data),
                        Err(e) => {
                            cleanup_staged(&attachments);
                            return Err(e.into());
                        }
                    }
                }
                content = String::from_utf8_lossy(&buf).into_owned();
            }
            "attachments" => {
                if attachments.len() >= max_files {
                    cleanup_staged(&attachments);
                    return Ok(UploadOutcome::Rejected(HttpResponse::BadRequest().json(
                        ApiResponse::error_empty(
                            ErrorCode::FileCountExceeded,
                            format!("At most {max_files} attachments per submission"),
                        ),
                    )));
                }

                let original_name = content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                let extension = Path::new(&original_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext.to_lowercase()))
                    .unwrap_or_default();

                let stored_name = format!(
                    "attachments-{}-{}{extension}",
                    chrono::Utc::now().timestamp_millis(),
                    Uuid::new_v4()
                );
                let file_path = format!("{upload_dir}/{stored_name}");

                let mut f = match File::create(&file_path) {
                    Ok(file) => file,
                    Err(e) => {
                        error!("{}", SmartClassError::file_operation(format!("{e}")));
                        cleanup_staged(&attachments);
                        return Ok(UploadOutcome::Rejected(
                            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                                ErrorCode::FileUploadFailed,
                                "文件创建失败",
                            )),
                        ));
                    }
                };

                let mut total_size: usize = 0;
                while let Some(chunk) = field.next().await {
                    let data = match chunk {
                        Ok(data) => data,
                        Err(e) => {
                            let _ = fs::remove_file(&file_path);
                            cleanup_staged(&attachments);
                            return Err(e.into());
                        }
                    };
                    total_size += data.len();
                    if total_size > max_size {
                        let _ = fs::remove_file(&file_path);
                        cleanup_staged(&attachments);
                        return Ok(UploadOutcome::Rejected(HttpResponse::BadRequest().json(
                            ApiResponse::error_empty(
                                ErrorCode::FileSizeExceeded,
                                "File size exceeds the limit",
                            ),
                        )));
                    }
                    if let Err(e) = f.write_all(&data) {
                        let _ = fs::remove_file(&file_path);
                        cleanup_staged(&attachments);
                        return Err(e.into());
                    }
                }

                attachments.push(Attachment {
                    filename: stored_name,
                    original_name,
                    path: file_path,
                    size: total_size as i64,
                });
            }
            _ => {
                // 其余字段忽略，但要排空流
                while let Some(chunk) = field.next().await {
                    if let Err(e) = chunk {
                        cleanup_staged(&attachments);
                        return Err(e.into());
                    }
                }
            }
        }
    }

    Ok(UploadOutcome::Form {
        content,
        attachments,
    })
}

/// 补偿动作：提交未成的情况下删掉已暂存的文件
fn cleanup_staged(attachments: &[Attachment]) {
    for attachment in attachments {
        if let Err(e) = fs::remove_file(&attachment.path) {
            warn!("Failed to remove staged file {}: {}", attachment.path, e);
        }
    }
}
