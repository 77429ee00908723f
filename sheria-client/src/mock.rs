//! In-memory stand-in for the server, for tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::{Args, CallError, Method, Payload, RpcClient};

/// Mock RPC client returning canned responses per method.
///
/// Responses queued for a method are handed out in order; the last one keeps
/// being returned once the queue is down to it. Every call is recorded.
///
/// # Examples
///
/// ```
/// use sheria_client::{mock::MockRpcClient, Method};
/// use serde_json::json;
///
/// let rpc = MockRpcClient::new()
///     .with_response(Method::GetClientTrustBalance, json!({ "balance": 100.0 }));
/// assert_eq!(rpc.call_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockRpcClient {
    responses: Arc<RwLock<HashMap<Method, VecDeque<Result<Payload, CallError>>>>>,
    calls: Arc<RwLock<Vec<(Method, Args)>>>,
}

impl MockRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a payload for the given method.
    pub fn with_response(self, method: Method, payload: Payload) -> Self {
        self.push(method, Ok(payload));
        self
    }

    /// Queue a failure for the given method.
    pub fn with_failure(self, method: Method, error: CallError) -> Self {
        self.push(method, Err(error));
        self
    }

    fn push(&self, method: Method, response: Result<Payload, CallError>) {
        self.responses
            .write()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(response);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<(Method, Args)> {
        self.calls.read().unwrap().clone()
    }

    /// Arguments of every call made to one method.
    pub fn calls_to(&self, method: Method) -> Vec<Args> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|(m, _)| *m == method)
            .map(|(_, args)| args.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl RpcClient for MockRpcClient {
    async fn call(&self, method: Method, args: Args) -> Result<Payload, CallError> {
        self.calls.write().unwrap().push((method, args));

        let mut responses = self.responses.write().unwrap();
        let queue = responses.get_mut(&method).ok_or_else(|| {
            CallError::ResponseError(format!("no mock response for {}", method))
        })?;

        match queue.len() {
            0 => Err(CallError::ResponseError(format!(
                "no mock response for {}",
                method
            ))),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap_or(Err(CallError::ApplicationError(None))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn responses_are_returned_in_order_then_repeat() {
        let rpc = MockRpcClient::new()
            .with_response(Method::GetCaseStatistics, json!({ "total_cases": 1 }))
            .with_response(Method::GetCaseStatistics, json!({ "total_cases": 2 }));

        let first = rpc.call(Method::GetCaseStatistics, Args::new()).await.unwrap();
        let second = rpc.call(Method::GetCaseStatistics, Args::new()).await.unwrap();
        let third = rpc.call(Method::GetCaseStatistics, Args::new()).await.unwrap();

        assert_eq!(first, json!({ "total_cases": 1 }));
        assert_eq!(second, json!({ "total_cases": 2 }));
        assert_eq!(third, json!({ "total_cases": 2 }));
        assert_eq!(rpc.call_count(), 3);
    }

    #[tokio::test]
    async fn unknown_method_fails_but_is_recorded() {
        let rpc = MockRpcClient::new();

        let result = rpc.call(Method::SubmitContact, Args::new()).await;

        assert!(result.is_err());
        assert_eq!(rpc.calls_to(Method::SubmitContact).len(), 1);
    }
}
