//! File Handlers

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::io::ReaderStream;

use crate::application::dto::{FileDataQuery, FileResponse, ListFilesQuery, UploadFileRequest};
use crate::presentation::http::extractors::{AuthUser, JsonBody, MaybeUser};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Upload a file or image, or create a folder
pub async fn upload(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody<UploadFileRequest>,
) -> Result<(StatusCode, Json<FileResponse>), AppError> {
    let entry = state.files.create(&user, body.into()).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Get one entry's metadata
pub async fn show(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, AppError> {
    let entry = state.files.get(&id, &caller).await?;
    Ok(Json(entry.into()))
}

/// List the caller's entries under a folder, 20 per page
pub async fn index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, AppError> {
    let entries = state
        .files
        .list(&user, query.parent_id.as_deref(), query.page.as_deref())
        .await?;

    Ok(Json(entries.into_iter().map(FileResponse::from).collect()))
}

/// Make an entry public
pub async fn publish(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, AppError> {
    let entry = state.files.set_visibility(&id, &user, true).await?;
    Ok(Json(entry.into()))
}

/// Make an entry private
pub async fn unpublish(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, AppError> {
    let entry = state.files.set_visibility(&id, &user, false).await?;
    Ok(Json(entry.into()))
}

/// Stream an entry's bytes, or a size variant with `?size=`
pub async fn data(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    Path(id): Path<String>,
    Query(query): Query<FileDataQuery>,
) -> Result<Response, AppError> {
    let (entry, file) = state
        .files
        .read_content(&id, &caller, query.size.as_deref())
        .await?;

    let mime = mime_guess::from_path(&entry.name).first_or_octet_stream();
    let body = Body::from_stream(ReaderStream::new(file));

    Ok(([(header::CONTENT_TYPE, mime.to_string())], body).into_response())
}
