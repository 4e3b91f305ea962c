//! End-to-end submission flow against a one-shot loopback HTTP server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use sentiscope::sentiment::api::{self, PredictOutcome, SentimentLabel, SentimentModel};
use sentiscope::sentiment::session::{
    AnalyzerSession, REJECTED_MESSAGE, TRANSPORT_ERROR_MESSAGE,
};
use time::OffsetDateTime;
use url::Url;

/// Serve exactly one HTTP exchange: read the full request, write `response`,
/// close the connection.
fn serve_once(response: String) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while find_header_end(&buf).is_none() {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        if let Some(header_end) = find_header_end(&buf) {
            let expected = content_length(&buf[..header_end]);
            let mut body_read = buf.len() - header_end;
            while body_read < expected {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => body_read += n,
                }
            }
        }
        let _ = stream.write_all(response.as_bytes());
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn content_length(headers: &[u8]) -> usize {
    let text = String::from_utf8_lossy(headers);
    text.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

fn fixed_time() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

#[test]
fn successful_submission_fills_result_and_history() {
    let body = r#"{"success":true,"data":{"label":"Positive","confidence":0.92,"meta":{"model":"lstm","time_ms":15}}}"#;
    let base = serve_once(json_response(body));

    let mut session = AnalyzerSession::new(SentimentModel::Lstm);
    session.set_input("Great film!");
    let pending = session.begin_submit().expect("submission accepted");
    assert!(session.is_submitting());

    let outcome = api::predict(&base, &pending.request);
    assert!(session.finish_submit(pending.ticket, outcome, fixed_time()));

    let result = session.current_result().expect("result set");
    assert_eq!(result.label, SentimentLabel::Positive);
    assert_eq!(result.confidence, 0.92);
    assert_eq!(result.model, "lstm");
    assert!(!session.is_submitting());

    let entry = &session.history()[0];
    assert_eq!(entry.text_preview, "Great film!");
    assert_eq!(entry.time_ms, 15);
}

#[test]
fn service_rejection_surfaces_a_message_and_keeps_history_empty() {
    let body = r#"{"success":false,"error":"unsupported model"}"#;
    let base = serve_once(json_response(body));

    let mut session = AnalyzerSession::new(SentimentModel::Rnn);
    session.set_input("anything");
    let pending = session.begin_submit().expect("submission accepted");

    let outcome = api::predict(&base, &pending.request);
    assert_eq!(
        outcome.as_ref().ok(),
        Some(&PredictOutcome::Rejected {
            message: Some("unsupported model".to_string())
        })
    );
    assert!(session.finish_submit(pending.ticket, outcome, fixed_time()));
    assert_eq!(session.error_message(), Some(REJECTED_MESSAGE));
    assert!(session.current_result().is_none());
    assert!(session.history().is_empty());
}

#[test]
fn unreachable_backend_maps_to_the_generic_transport_message() {
    // Bind then drop to get an address nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base = Url::parse(&format!("http://{addr}")).unwrap();

    let mut session = AnalyzerSession::new(SentimentModel::Lstm);
    session.set_input("no backend today");
    let pending = session.begin_submit().expect("submission accepted");

    let outcome = api::predict(&base, &pending.request);
    assert!(outcome.is_err());
    assert!(session.finish_submit(pending.ticket, outcome, fixed_time()));
    assert_eq!(session.error_message(), Some(TRANSPORT_ERROR_MESSAGE));
    assert!(session.current_result().is_none());
    assert!(!session.is_submitting());
}

#[test]
fn error_status_with_envelope_is_still_a_rejection() {
    let body = r#"{"success":false,"error":"text too long"}"#;
    let response = format!(
        "HTTP/1.1 422 Unprocessable Entity\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let base = serve_once(response);

    let request = sentiscope::sentiment::api::PredictRequest {
        text: "x".repeat(1200),
        model: SentimentModel::Lstm,
    };
    let outcome = api::predict(&base, &request).expect("structurally valid response");
    assert_eq!(
        outcome,
        PredictOutcome::Rejected {
            message: Some("text too long".to_string())
        }
    );
}
