//! Chat surfaces backed by the canned keyword responder.

use axum::{
    extract::rejection::FormRejection,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::domain::{ChatReply, ChatRequest, ChatResponse, InboundMessage};
use crate::error::{ApiError, ApiResult};
use crate::routes::get_request_id;

const WEBHOOK_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again later.";

/// Reply to a message typed into the local chat UI.
///
/// POST /api/chat
pub async fn chat(Json(req): Json<ChatRequest>) -> ApiResult<Json<ChatResponse>> {
    if req.message.trim().is_empty() {
        return Err(ApiError::bad_request("No message provided"));
    }

    let reply = ChatReply::for_message(&req.message);
    tracing::debug!(reply = ?reply, "Chat message answered");

    Ok(Json(ChatResponse {
        response: reply.text().to_string(),
    }))
}

/// Inbound message webhook for the messaging provider.
///
/// POST /webhook/whatsapp (form-encoded `From`, `Body`); answers with TwiML.
pub async fn whatsapp_webhook(
    headers: HeaderMap,
    form: Result<Form<InboundMessage>, FormRejection>,
) -> Response {
    let request_id = get_request_id(&headers);

    let text = match form {
        Ok(Form(message)) => {
            let reply = ChatReply::for_message(&message.body);
            tracing::info!(
                request_id = ?request_id,
                from = %message.from,
                reply = ?reply,
                "Messaging webhook received"
            );
            reply.text()
        }
        Err(e) => {
            tracing::warn!(request_id = ?request_id, error = %e, "Malformed webhook payload");
            WEBHOOK_ERROR_TEXT
        }
    };

    twiml_message(text)
}

/// A TwiML document that sends `text` back as a single message.
fn twiml_message(text: &str) -> Response {
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape_xml(text)
    );
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
