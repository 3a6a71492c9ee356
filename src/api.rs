use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::config::ApiConfig;
use crate::error::{extract_detail, status_message, ClientError};
use crate::models::{Quiz, QuizHistoryEntry};

/// Anything the upload tab can hold. The browser build uses `web_sys::File`.
pub trait UploadFile: Clone + PartialEq {
    fn file_name(&self) -> String;
}

impl UploadFile for File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// Source material for one generation request; exactly one form field is sent.
#[derive(Clone, PartialEq, Debug)]
pub enum GenerationPayload<F> {
    Url(String),
    File(F),
    Topic(String),
}

impl<F> GenerationPayload<F> {
    pub fn field_name(&self) -> &'static str {
        match self {
            GenerationPayload::Url(_) => "url",
            GenerationPayload::File(_) => "file",
            GenerationPayload::Topic(_) => "topic",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Endpoint {
    Generate,
    ListQuizzes,
    GetQuiz(i64),
}

impl Endpoint {
    pub fn path(self) -> String {
        match self {
            Endpoint::Generate => "generate".into(),
            Endpoint::ListQuizzes => "quizzes".into(),
            Endpoint::GetQuiz(id) => format!("quizzes/{id}"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        self.config.endpoint(&endpoint.path())
    }

    pub async fn submit_generation(
        &self,
        payload: &GenerationPayload<File>,
    ) -> Result<Quiz, ClientError> {
        let url = self.url(Endpoint::Generate);
        tracing::debug!("POST {url} ({})", payload.field_name());

        // No explicit Content-Type: the browser adds the multipart boundary.
        let body = encode_form(payload)?;
        let request = Request::post(&url).body(body).map_err(transport)?;
        let response = request.send().await.map_err(transport)?;
        let quiz: Quiz = read_body(Endpoint::Generate, response).await?;
        quiz.validate().inspect_err(|e| tracing::error!("rejected generated quiz: {e}"))
    }

    pub async fn list_quizzes(&self) -> Result<Vec<QuizHistoryEntry>, ClientError> {
        let url = self.url(Endpoint::ListQuizzes);
        tracing::debug!("GET {url}");
        let response = Request::get(&url).send().await.map_err(transport)?;
        read_body(Endpoint::ListQuizzes, response).await
    }

    pub async fn get_quiz(&self, id: i64) -> Result<Quiz, ClientError> {
        let endpoint = Endpoint::GetQuiz(id);
        let url = self.url(endpoint);
        tracing::debug!("GET {url}");
        let response = Request::get(&url).send().await.map_err(transport)?;
        read_body(endpoint, response).await
    }
}

fn encode_form(payload: &GenerationPayload<File>) -> Result<FormData, ClientError> {
    let form = FormData::new().map_err(js_error)?;
    match payload {
        GenerationPayload::Url(url) => form.append_with_str("url", url),
        GenerationPayload::Topic(topic) => form.append_with_str("topic", topic),
        GenerationPayload::File(file) => {
            form.append_with_blob_and_filename("file", file, &file.name())
        }
    }
    .map_err(js_error)?;
    Ok(form)
}

async fn read_body<T: DeserializeOwned>(
    endpoint: Endpoint,
    response: Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    decode_response(endpoint, status, &body)
        .inspect_err(|e| tracing::warn!("{} failed: {e:?}", endpoint.path()))
}

fn transport(err: gloo_net::Error) -> ClientError {
    ClientError::Network(format!("Could not reach the quiz service. ({err})"))
}

fn js_error(err: JsValue) -> ClientError {
    encode_failure(format!("{err:?}"))
}

/// FormData failed to build; nothing has been sent yet.
fn encode_failure(reason: String) -> ClientError {
    ClientError::Validation(format!("Could not prepare the request. ({reason})"))
}

// --- Response decoding ---------------------------------------------------------

/// Turns a status code and body text into a value or a classified error.
pub fn decode_response<T: DeserializeOwned>(
    endpoint: Endpoint,
    status: u16,
    body: &str,
) -> Result<T, ClientError> {
    if (200..300).contains(&status) {
        serde_json::from_str(body).map_err(|e| ClientError::Malformed(e.to_string()))
    } else {
        Err(classify_failure(endpoint, status, body))
    }
}

pub fn classify_failure(endpoint: Endpoint, status: u16, body: &str) -> ClientError {
    let detail = extract_detail(body);
    match (endpoint, status) {
        (Endpoint::GetQuiz(_), 404) => ClientError::NotFound { detail },
        (Endpoint::Generate, 400..=499) => {
            ClientError::Generation(detail.unwrap_or_else(|| status_message(status)))
        }
        _ => ClientError::Server { status, detail },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_4xx_passes_detail_through() {
        let err = decode_response::<Quiz>(
            Endpoint::Generate,
            400,
            r#"{"detail":"Unsupported URL"}"#,
        )
        .unwrap_err();
        assert_eq!(err, ClientError::Generation("Unsupported URL".into()));
        assert_eq!(err.user_message(), "Unsupported URL");
    }

    #[test]
    fn generate_4xx_without_detail_uses_status() {
        let err = decode_response::<Quiz>(Endpoint::Generate, 422, "{}").unwrap_err();
        assert_eq!(
            err,
            ClientError::Generation("Request failed with status code 422".into())
        );
    }

    #[test]
    fn generate_5xx_is_server_error() {
        let err = decode_response::<Quiz>(
            Endpoint::Generate,
            500,
            r#"{"detail":"Failed to scrape"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ClientError::Server {
                status: 500,
                detail: Some("Failed to scrape".into())
            }
        );
    }

    #[test]
    fn missing_quiz_is_not_found() {
        let err = decode_response::<Quiz>(
            Endpoint::GetQuiz(9),
            404,
            r#"{"detail":"Quiz not found"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ClientError::NotFound {
                detail: Some("Quiz not found".into())
            }
        );
    }

    #[test]
    fn list_404_is_not_a_missing_record() {
        let err = decode_response::<Vec<QuizHistoryEntry>>(Endpoint::ListQuizzes, 404, "")
            .unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 404, .. }));
    }

    #[test]
    fn empty_history_is_ok() {
        let entries =
            decode_response::<Vec<QuizHistoryEntry>>(Endpoint::ListQuizzes, 200, "[]").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn success_with_wrong_shape_is_malformed() {
        let err = decode_response::<Quiz>(Endpoint::Generate, 200, r#"{"summary":"x"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Malformed(_)));
    }

    #[test]
    fn paths() {
        assert_eq!(Endpoint::GetQuiz(12).path(), "quizzes/12");
        let client = ApiClient::new(ApiConfig::with_base_url("http://api.test/api/"));
        assert_eq!(client.url(Endpoint::Generate), "http://api.test/api/generate");
    }

    #[test]
    fn form_encoding_failure_is_a_validation_error() {
        let err = encode_failure("InvalidStateError".into());
        assert_eq!(
            err,
            ClientError::Validation("Could not prepare the request. (InvalidStateError)".into())
        );
        assert!(!matches!(err, ClientError::Network(_)));
        assert_eq!(
            err.user_message(),
            "Could not prepare the request. (InvalidStateError)"
        );
    }

    #[test]
    fn payload_field_names() {
        assert_eq!(GenerationPayload::<()>::Url("u".into()).field_name(), "url");
        assert_eq!(GenerationPayload::File(()).field_name(), "file");
        assert_eq!(GenerationPayload::<()>::Topic("t".into()).field_name(), "topic");
    }
}
