use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use tracing::info;
use tracker_store::Store;

use crate::error::RunError;
use crate::record::Record;
use crate::runs::Runs;

const RUN_PATH: &str = "/api/run";
const RUN_LIST_PREFIX: &str = "/api/run/";

/// Request handler for the run resource.
///
/// - `POST /api/run` with a JSON array of records
/// - `GET /api/run?id=..&user=..&lat=lo,hi` returning matching records
/// - `DELETE /api/run/{id,id,...}`
pub struct RunHttp<S> {
    runs: Runs<S>,
}

impl<S: Store> RunHttp<S> {
    pub fn new(runs: Runs<S>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &Runs<S> {
        &self.runs
    }

    pub fn handle(&self, req: Request<Vec<u8>>) -> Response<Vec<u8>> {
        let method = req.method().clone();
        let path = req.uri().path().trim_end_matches('/');

        let resp = match (&method, path) {
            (&Method::GET, "/healthz") => json_response(StatusCode::OK, r#"{"status":"ok"}"#),
            (&Method::POST, RUN_PATH) => self.bulk_add(&req),
            (&Method::GET, RUN_PATH) => self.search(&req),
            (_, RUN_PATH) => method_not_allowed(),
            (&Method::DELETE, p) if p.starts_with(RUN_LIST_PREFIX) => {
                self.bulk_delete(&p[RUN_LIST_PREFIX.len()..])
            }
            (_, p) if p.starts_with(RUN_LIST_PREFIX) => method_not_allowed(),
            _ => json_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#),
        };

        info!(%method, path = req.uri().path(), status = resp.status().as_u16(), "request");
        resp
    }

    fn bulk_add(&self, req: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let records: Vec<Record> = match serde_json::from_slice(req.body()) {
            Ok(r) => r,
            Err(e) => return run_error_response(&RunError::BadRequest(e.to_string())),
        };
        match self.runs.bulk_add(&records) {
            Ok(_) => json_response(StatusCode::OK, "[]"),
            Err(e) => run_error_response(&e),
        }
    }

    fn search(&self, req: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let query = req.uri().query().unwrap_or("");
        let params = url::form_urlencoded::parse(query.as_bytes());

        match self.runs.search(params) {
            Ok(records) => match serde_json::to_vec(&records) {
                Ok(body) => json_response(StatusCode::OK, body),
                Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
            },
            Err(e) => run_error_response(&e),
        }
    }

    /// `segment` is the raw path segment; `%2C` decodes to the separator.
    fn bulk_delete(&self, segment: &str) -> Response<Vec<u8>> {
        let list = match percent_decode_str(segment).decode_utf8() {
            Ok(list) => list,
            Err(e) => {
                return run_error_response(&RunError::BadRequest(format!(
                    "run id list is not valid UTF-8: {e}"
                )));
            }
        };
        match self.runs.bulk_delete(&list) {
            Ok(_) => json_response(StatusCode::OK, "[]"),
            Err(e) => run_error_response(&e),
        }
    }
}

fn json_response(status: StatusCode, body: impl Into<Vec<u8>>) -> Response<Vec<u8>> {
    let mut resp = Response::new(body.into());
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}

fn error_response(status: StatusCode, message: &str) -> Response<Vec<u8>> {
    let body = serde_json::json!({ "error": message });
    json_response(status, body.to_string().into_bytes())
}

fn run_error_response(e: &RunError) -> Response<Vec<u8>> {
    error_response(e.status_code(), &e.to_string())
}

fn method_not_allowed() -> Response<Vec<u8>> {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}
