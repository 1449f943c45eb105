use crate::core::form::FormHandler;
use crate::domain::model::Submission;
use crate::utils::error::{FormError, Result};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// `GET /` renders the empty form, `POST /` handles a submission.
pub fn router(handler: FormHandler) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

pub async fn serve<F>(listener: TcpListener, handler: FormHandler, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn show_form(State(handler): State<FormHandler>) -> Response {
    match handler.render_form() {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(&handler, e),
    }
}

async fn submit(
    State(handler): State<FormHandler>,
    form: std::result::Result<Form<Submission>, FormRejection>,
) -> Response {
    // A body that cannot be read as the form is treated like one with both fields missing.
    let submission = match form {
        Ok(Form(submission)) => submission,
        Err(rejection) => {
            tracing::debug!("Unreadable form body: {}", rejection);
            Submission::default()
        }
    };

    match handler.handle_submit(submission).await {
        Ok((html, _)) => Html(html).into_response(),
        Err(e) => error_response(&handler, e),
    }
}

fn error_response(handler: &FormHandler, error: FormError) -> Response {
    tracing::error!("❌ Request failed: {}", error);
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match handler.render_failure(&error) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(render_error) => {
            tracing::error!("Failed to render error page: {}", render_error);
            (status, error.user_friendly_message()).into_response()
        }
    }
}
