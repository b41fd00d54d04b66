// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{Context, Policy, RawResponse, Request, send_next};
use crate::headers::CLIENT_REQUEST_ID;
use crate::options::ClientInfo;
use azcore::Result;
use std::sync::Arc;
use tracing::Instrument;

/// Opens a span for each request.
///
/// The span records the operation, the HTTP method, the URL without the query
/// (it may contain a SAS token), the status code, and the client request id.
#[derive(Debug)]
pub struct TracingPolicy {
    service_name: &'static str,
}

impl TracingPolicy {
    pub fn new(info: &'static ClientInfo) -> Self {
        Self {
            service_name: info.service_name,
        }
    }
}

#[async_trait::async_trait]
impl Policy for TracingPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        let mut url = request.url.clone();
        url.set_query(None);
        let span = tracing::info_span!(
            "azure.request",
            service = self.service_name,
            operation = ctx.operation,
            method = %request.method,
            url = %url,
            status = tracing::field::Empty,
            client_request_id = tracing::field::Empty,
        );
        let result = send_next(ctx, request, next)
            .instrument(span.clone())
            .await;
        if let Some(id) = crate::headers::get_str(&request.headers, CLIENT_REQUEST_ID) {
            span.record("client_request_id", id);
        }
        match &result {
            Ok(response) => {
                span.record("status", response.status.as_u16());
            }
            Err(e) => {
                if let Some(code) = e.http_status_code() {
                    span.record("status", code);
                }
                tracing::debug!(parent: &span, "request failed: {e}");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;
        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    #[derive(Debug)]
    struct Fixed(u16);

    #[async_trait::async_trait]
    impl Policy for Fixed {
        async fn send(
            &self,
            _ctx: &Context,
            request: &mut Request,
            _next: &[Arc<dyn Policy>],
        ) -> Result<RawResponse> {
            tracing::info!("inside the request span");
            request.headers.insert(
                CLIENT_REQUEST_ID,
                http::HeaderValue::from_static("test-request-id"),
            );
            response(self.0)
        }
    }

    #[tokio::test]
    async fn records_span_fields() -> anyhow::Result<()> {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let policy = TracingPolicy::new(&TEST_INFO);
        let next: Vec<Arc<dyn Policy>> = vec![Arc::new(Fixed(204))];
        let response = policy
            .send(&test_context(), &mut test_request(), &next)
            .await?;
        assert_eq!(response.status.as_u16(), 204);

        let output = capture.contents();
        assert!(output.contains("azure.request"), "{output}");
        assert!(output.contains("Test::op"), "{output}");
        assert!(output.contains("inside the request span"), "{output}");
        assert!(output.contains("status=204"), "{output}");
        assert!(output.contains("test-request-id"), "{output}");
        assert!(!output.contains("comp=metadata"), "{output}");
        Ok(())
    }
}
