// src/core/predictor.rs

use reqwest::multipart::{Form, Part};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};
use url::Url;

use crate::config::Settings;
use crate::core::models::{FormData, FormField, PredictionResult};
use crate::error::PredictError;

/// One part of the multipart payload, before it is handed to `reqwest`.
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

/// Maps the form onto the parts the prediction service expects.
///
/// Parts follow the field order of `FormField`. Gender is sent as
/// `"Male"`/`"Female"`, flags as `"true"`/`"false"`, and the recording as raw
/// bytes. No part is produced when no recording is attached.
pub fn build_payload(data: &FormData) -> Vec<(FormField, PartValue)> {
    let mut parts = Vec::with_capacity(11);
    for field in FormField::iter() {
        let value = match field {
            FormField::CandidateId => PartValue::Text(data.candidate_id.clone()),
            FormField::Age => PartValue::Text(data.age.to_string()),
            FormField::Gender => PartValue::Text(data.gender_label().to_string()),
            FormField::PackYears => PartValue::Text(data.pack_years.to_string()),
            FormField::CoughFile => match &data.cough_file {
                Some(file) => PartValue::File {
                    name: file.name.clone(),
                    mime_type: file.mime_type.clone(),
                    bytes: file.bytes.clone(),
                },
                None => continue,
            },
            flag => PartValue::Text(data.flag(flag).unwrap_or_default().to_string()),
        };
        parts.push((field, value));
    }
    parts
}

fn to_multipart(parts: Vec<(FormField, PartValue)>) -> Result<Form, PredictError> {
    let mut form = Form::new();
    for (field, value) in parts {
        form = match value {
            PartValue::Text(text) => form.text(field.to_string(), text),
            PartValue::File { name, mime_type, bytes } => {
                let part = Part::bytes(bytes)
                    .file_name(name)
                    .mime_str(&mime_type)
                    .map_err(|e| PredictError::Attachment(e.to_string()))?;
                form.part(field.to_string(), part)
            }
        };
    }
    Ok(form)
}

/// HTTP client for the prediction endpoint.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    url: Url,
}

impl PredictionClient {
    pub fn new(settings: &Settings) -> Result<Self, PredictError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self::with_http(http, settings.predict_url.clone()))
    }

    pub fn with_http(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends the form and parses the risk scores.
    ///
    /// There is no timeout: the call resolves only when the service answers
    /// or the connection fails.
    pub async fn predict(&self, data: &FormData) -> Result<PredictionResult, PredictError> {
        info!(url = %self.url, candidate_id = %data.candidate_id, "Submitting prediction request.");
        let form = to_multipart(build_payload(data))?;

        let response = self.http.post(self.url.clone()).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body = %body, "Prediction service answered.");

        if !status.is_success() {
            error!(status = status.as_u16(), "Prediction request rejected.");
            return Err(PredictError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_prediction(&body)
    }
}

/// Parses the service's JSON answer. Anything but a JSON object is an error;
/// odd values inside the object are tolerated.
pub fn parse_prediction(body: &str) -> Result<PredictionResult, PredictError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| PredictError::Decode(e.to_string()))?;
    if !value.is_object() {
        return Err(PredictError::Decode(format!("expected a JSON object, got {value}")));
    }
    let result: PredictionResult =
        serde_json::from_value(value).map_err(|e| PredictError::Decode(e.to_string()))?;
    info!(
        asthma_prob = result.asthma_prob,
        tb_prob = result.tb_prob,
        severity = %result.severity,
        "Prediction received."
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CoughFile;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sample_form() -> FormData {
        FormData {
            candidate_id: "136bac9a3e08".to_string(),
            age: 41,
            gender: true,
            wheezing_history: true,
            pack_years: 15,
            ..Default::default()
        }
    }

    fn text(s: &str) -> PartValue {
        PartValue::Text(s.to_string())
    }

    mod payload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_text_parts_in_wire_order() {
            let parts = build_payload(&sample_form());
            assert_eq!(
                parts,
                vec![
                    (FormField::CandidateId, text("136bac9a3e08")),
                    (FormField::Age, text("41")),
                    (FormField::Gender, text("Male")),
                    (FormField::TbContactHistory, text("false")),
                    (FormField::WheezingHistory, text("true")),
                    (FormField::PhlegmCough, text("false")),
                    (FormField::FamilyAsthmaHistory, text("false")),
                    (FormField::FeverHistory, text("false")),
                    (FormField::ColdPresent, text("false")),
                    (FormField::PackYears, text("15")),
                ]
            );
        }

        #[test]
        fn test_female_and_recording() {
            let form = FormData {
                gender: false,
                cough_file: Some(CoughFile {
                    name: "c.mp3".to_string(),
                    mime_type: "audio/mpeg".to_string(),
                    bytes: vec![1, 2],
                }),
                ..sample_form()
            };
            let parts = build_payload(&form);
            assert_eq!(parts[2], (FormField::Gender, text("Female")));
            assert_eq!(
                parts.last(),
                Some(&(
                    FormField::CoughFile,
                    PartValue::File {
                        name: "c.mp3".to_string(),
                        mime_type: "audio/mpeg".to_string(),
                        bytes: vec![1, 2],
                    }
                ))
            );
            assert_eq!(parts.len(), 11);
        }

        #[test]
        fn test_bad_mime_type_is_an_attachment_error() {
            let parts = vec![(
                FormField::CoughFile,
                PartValue::File {
                    name: "x".to_string(),
                    mime_type: "not a mime".to_string(),
                    bytes: vec![],
                },
            )];
            assert!(matches!(to_multipart(parts), Err(PredictError::Attachment(_))));
        }
    }

    mod response {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parses_object() {
            let result =
                parse_prediction(r#"{"asthmaProb": 0, "tbProb": 0, "severity": "Healthy"}"#).unwrap();
            assert_eq!(result.severity, "Healthy");
        }

        #[test]
        fn test_rejects_non_object() {
            assert!(matches!(parse_prediction("[1,2]"), Err(PredictError::Decode(_))));
            assert!(matches!(parse_prediction("<html>"), Err(PredictError::Decode(_))));
        }
    }

    mod http {
        use super::*;
        use pretty_assertions::assert_eq;

        /// Accepts one connection, captures the raw request and answers with
        /// `status_line` and `body`.
        async fn one_shot_server(
            status_line: &'static str,
            body: &'static str,
        ) -> (Url, tokio::task::JoinHandle<String>) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let handle = tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if request_complete(&buf) {
                        break;
                    }
                }
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
                String::from_utf8_lossy(&buf).into_owned()
            });
            let url = Url::parse(&format!("http://{addr}/predict")).unwrap();
            (url, handle)
        }

        fn request_complete(buf: &[u8]) -> bool {
            let text = String::from_utf8_lossy(buf);
            let Some(header_end) = text.find("\r\n\r\n") else {
                return false;
            };
            let content_length = text[..header_end].lines().find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            });
            match content_length {
                Some(len) => buf.len() >= header_end + 4 + len,
                None => text.ends_with("--\r\n"),
            }
        }

        fn client(url: Url) -> PredictionClient {
            let http = reqwest::Client::builder().no_proxy().build().unwrap();
            PredictionClient::with_http(http, url)
        }

        #[tokio::test]
        async fn test_posts_multipart_and_parses_result() {
            let (url, server) = one_shot_server(
                "200 OK",
                r#"{"asthmaProb": 150, "tbProb": -5, "severity": "high"}"#,
            )
            .await;

            let result = client(url).predict(&sample_form()).await.unwrap();
            assert_eq!(result.asthma_prob, 150.0);
            assert_eq!(result.tb_prob, -5.0);
            assert_eq!(result.severity, "high");

            let request = server.await.unwrap();
            assert!(request.starts_with("POST /predict"));
            assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data"));
            assert!(request.contains("name=\"gender\"\r\n\r\nMale"));
            assert!(request.contains("name=\"wheezingHistory\"\r\n\r\ntrue"));
            assert!(!request.contains("name=\"coughFile\""));
        }

        #[tokio::test]
        async fn test_server_error_is_reported() {
            let (url, server) =
                one_shot_server("500 Internal Server Error", r#"{"error": "boom"}"#).await;

            let err = client(url).predict(&sample_form()).await.unwrap_err();
            assert!(matches!(err, PredictError::Status { status: 500, .. }));
            server.await.unwrap();
        }

        #[tokio::test]
        async fn test_unreachable_service_is_a_request_error() {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let url = Url::parse(&format!("http://{addr}/predict")).unwrap();
            let err = client(url).predict(&sample_form()).await.unwrap_err();
            assert!(matches!(err, PredictError::Request(_)));
        }
    }
}
