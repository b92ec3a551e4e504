use std::convert::Infallible;

use bytes::Bytes;
use log::{debug, error};
use serde::Serialize;
use warp::http::{header, StatusCode};
use warp::{reply, Filter, Rejection, Reply};

use super::handlers::AppState;
use super::types::{ApiFailure, GalleryQuery, ImportResponse, UploadBody};
use crate::photo_management::photo::PhotoPatch;

/// Largest accepted upload or import body. Base64 inflates images by a third.
pub const MAX_BODY_BYTES: u64 = 32 * 1024 * 1024;

/// First path segments owned by the API. The object bucket may not use one.
pub const RESERVED_SEGMENTS: &[&str] = &["photos", "years", "export", "import", "notifications"];

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn failure_reply(failure: &ApiFailure) -> reply::Response {
    reply::with_status(reply::json(&failure.body()), failure.status).into_response()
}

fn json_reply<T: Serialize>(result: Result<T, ApiFailure>, status: StatusCode) -> reply::Response {
    match result {
        Ok(value) => reply::with_status(reply::json(&value), status).into_response(),
        Err(failure) => failure_reply(&failure),
    }
}

/// GET /
pub fn dashboard_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(|| async move {
        let html = r#"<html><head><meta charset="utf-8"><title>Our Memories</title></head>
                <body><h1>Our Memories</h1>
                <p>See <a href="/photos">/photos</a>, <a href="/years">/years</a> and
                <a href="/photos/special">/photos/special</a> for JSON.</p>
                <p><a href="/export">Download a backup</a></p></body></html>"#;
        Ok::<_, Rejection>(reply::html(html))
    })
}

/// GET /photos?year=
pub fn list_photos_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("photos")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<GalleryQuery>())
        .and(with_state(state))
        .and_then(|query: GalleryQuery, state: AppState| async move {
            Ok::<_, Rejection>(json_reply(
                state.list_photos(query.year).await,
                StatusCode::OK,
            ))
        })
}

/// GET /photos/special
pub fn special_photos_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("photos" / "special")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|state: AppState| async move {
            Ok::<_, Rejection>(json_reply(state.special_photos().await, StatusCode::OK))
        })
}

/// GET /photos/:id
pub fn get_photo_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("photos" / String)
        .and(warp::get())
        .and(with_state(state))
        .and_then(|id: String, state: AppState| async move {
            Ok::<_, Rejection>(json_reply(state.get_photo(&id).await, StatusCode::OK))
        })
}

/// GET /years
pub fn years_route(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("years")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|state: AppState| async move {
            Ok::<_, Rejection>(json_reply(state.years().await, StatusCode::OK))
        })
}

/// POST /photos
pub fn upload_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("photos")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<UploadBody>())
        .and(with_state(state))
        .and_then(|body: UploadBody, state: AppState| async move {
            Ok::<_, Rejection>(json_reply(state.upload(body).await, StatusCode::CREATED))
        })
}

/// PATCH /photos/:id
pub fn update_photo_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("photos" / String)
        .and(warp::patch())
        .and(warp::body::content_length_limit(64 * 1024))
        .and(warp::body::json::<PhotoPatch>())
        .and(with_state(state))
        .and_then(|id: String, patch: PhotoPatch, state: AppState| async move {
            Ok::<_, Rejection>(json_reply(
                state.update_photo(&id, patch).await,
                StatusCode::OK,
            ))
        })
}

/// POST /photos/:id/toggle-special
pub fn toggle_special_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("photos" / String / "toggle-special")
        .and(warp::post())
        .and(with_state(state))
        .and_then(|id: String, state: AppState| async move {
            Ok::<_, Rejection>(json_reply(state.toggle_special(&id).await, StatusCode::OK))
        })
}

/// DELETE /photos/:id
pub fn delete_photo_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("photos" / String)
        .and(warp::delete())
        .and(with_state(state))
        .and_then(|id: String, state: AppState| async move {
            let res = match state.delete_photo(&id).await {
                Ok(()) => reply::with_status(reply::reply(), StatusCode::NO_CONTENT).into_response(),
                Err(failure) => failure_reply(&failure),
            };
            Ok::<_, Rejection>(res)
        })
}

/// GET /export -> downloadable backup
pub fn export_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("export")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|state: AppState| async move {
            let res = match state.export().await {
                Ok(doc) => {
                    let disposition = doc.content_disposition();
                    reply::with_header(
                        reply::with_header(doc.contents, header::CONTENT_TYPE, "application/json"),
                        header::CONTENT_DISPOSITION,
                        disposition,
                    )
                    .into_response()
                }
                Err(failure) => failure_reply(&failure),
            };
            Ok::<_, Rejection>(res)
        })
}

/// POST /import, body is an exported document
pub fn import_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("import")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_state(state))
        .and_then(|body: Bytes, state: AppState| async move {
            let result = state
                .import(body.to_vec())
                .await
                .map(|imported| ImportResponse { imported });
            Ok::<_, Rejection>(json_reply(result, StatusCode::OK))
        })
}

/// GET /notifications
pub fn notifications_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("notifications")
        .and(warp::get())
        .and(with_state(state))
        .and_then(|state: AppState| async move {
            Ok::<_, Rejection>(reply::json(&state.notifications()))
        })
}

/// GET /<bucket>/<key> -> uploaded image bytes
pub fn object_route(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path(state.bucket.clone())
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state))
        .and_then(|key: String, state: AppState| async move {
            let res = match state.fetch_object(&key).await {
                Ok((bytes, content_type)) => {
                    reply::with_header(bytes, header::CONTENT_TYPE, content_type).into_response()
                }
                Err(failure) => failure_reply(&failure),
            };
            Ok::<_, Rejection>(res)
        })
}

/// Turns filter rejections into the JSON error payload.
pub async fn handle_rejection(err: Rejection) -> Result<reply::Response, Infallible> {
    let failure = if err.is_not_found() {
        ApiFailure::not_found("Not found")
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        ApiFailure::bad_request(format!("Invalid request body: {}", e))
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        ApiFailure::bad_request("Invalid query string")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiFailure::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiFailure::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error!("Unhandled rejection: {:?}", err);
        ApiFailure::internal("Internal error")
    };
    debug!("Request rejected with {}", failure.status);
    Ok(failure_reply(&failure))
}

/// Every route, most specific paths first.
pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    dashboard_route()
        .or(special_photos_route(state.clone()))
        .or(toggle_special_route(state.clone()))
        .or(list_photos_route(state.clone()))
        .or(upload_route(state.clone()))
        .or(get_photo_route(state.clone()))
        .or(update_photo_route(state.clone()))
        .or(delete_photo_route(state.clone()))
        .or(years_route(state.clone()))
        .or(export_route(state.clone()))
        .or(import_route(state.clone()))
        .or(notifications_route(state.clone()))
        .or(object_route(state))
        .recover(handle_rejection)
}
