use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Request, State},
    response::{Html, IntoResponse, Response},
};
use http::{Method, StatusCode};

use crate::{html, server::Server, types::TranscriptionResult};

/// Serve the upload form
pub(crate) async fn upload_form() -> Html<&'static str> {
    Html(html::UPLOAD_FORM)
}

/// Handle `/transcribe/upload`
///
/// Problems with the upload itself answer 4xx/5xx; anything that goes wrong
/// once the file is in hand is reported on a 200 page.
pub(crate) async fn upload(State(server): State<Arc<Server>>, request: Request) -> Response {
    if request.method() != Method::POST {
        return failure(StatusCode::METHOD_NOT_ALLOWED, "Only POST supported");
    }

    let (parts, body) = request.into_parts();
    let limit = usize::try_from(server.max_audio_size()).unwrap_or(usize::MAX);

    let Ok(bytes) = axum::body::to_bytes(body, limit).await else {
        tracing::debug!(limit, "upload body over limit");
        return failure(StatusCode::BAD_REQUEST, "File too large");
    };

    let mut multipart = match Multipart::from_request(Request::from_parts(parts, Body::from(bytes)), &()).await {
        Ok(multipart) => multipart,
        Err(e) => return failure(StatusCode::BAD_REQUEST, &format!("Malformed upload: {}", e.body_text())),
    };

    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return failure(StatusCode::BAD_REQUEST, &format!("Malformed upload: {}", e.body_text())),
        };

        // a `file` part without a filename is a plain form value
        let Some(filename) = field.file_name().filter(|_| field.name() == Some("file")).map(str::to_owned) else {
            continue;
        };

        match field.bytes().await {
            Ok(audio) => {
                upload = Some((filename, audio));
                break;
            }
            Err(e) => {
                tracing::error!("failed to read uploaded file: {e}");
                return failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file");
            }
        }
    }

    let Some((filename, audio)) = upload else {
        return failure(StatusCode::BAD_REQUEST, "Missing file");
    };

    tracing::debug!(%filename, bytes = audio.len(), "new upload");

    let reply = match server.backend.forward(server.model(), &filename, audio).await {
        Ok(reply) => reply,
        Err(e) => return failure(StatusCode::OK, &format!("Error: {e}")),
    };

    match serde_json::from_slice::<TranscriptionResult>(&reply.body) {
        Ok(result) => Html(html::result_page(&result.text)).into_response(),
        Err(e) => failure(StatusCode::OK, &format!("Failed to parse response: {e}")),
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    tracing::info!(%status, "upload failed: {message}");
    (status, Html(html::error_page(message))).into_response()
}
