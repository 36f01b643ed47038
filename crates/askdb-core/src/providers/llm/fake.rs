use super::LlmClient;
use crate::model::{ChatRequest, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted client for tests: pops one canned completion per call and
/// records every request it sees, so tests can assert call counts,
/// ordering, and prompt contents.
#[derive(Default)]
pub struct FakeLlmClient {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeLlmClient {
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn complete(&self, request: &ChatRequest) -> anyhow::Result<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let text = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("fake client has no scripted response left"))?;
        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: "fake".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChatRequest;

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let client = FakeLlmClient::scripted(["one", "two"]);

        let first = client
            .complete(&ChatRequest::system_only("a"))
            .await
            .unwrap();
        let second = client
            .complete(&ChatRequest::system_only("b"))
            .await
            .unwrap();

        assert_eq!(first.text, "one");
        assert_eq!(second.text, "two");
        assert_eq!(client.call_count(), 2);
        assert_eq!(client.requests()[1].system, "b");
    }

    #[tokio::test]
    async fn test_exhausted_script_is_an_error() {
        let client = FakeLlmClient::default();
        let err = client
            .complete(&ChatRequest::system_only("a"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no scripted response"));
    }
}
