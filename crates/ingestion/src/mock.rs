//! Mock temperature source
//!
//! For tests without a one-wire network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use contracts::{ContractError, TemperatureSource};
use tracing::trace;

/// Scripted answer for one read
#[derive(Debug, Clone)]
enum MockAnswer {
    Value(String),
    Failure(String),
}

#[derive(Debug, Default)]
struct MockState {
    /// Answers consumed in order before falling back to `steady`
    scripted: HashMap<String, VecDeque<MockAnswer>>,
    /// Answer repeated forever
    steady: HashMap<String, MockAnswer>,
    /// Addresses in read order
    reads: Vec<String>,
}

/// Mock temperature source
///
/// Unknown addresses fail like a missing sensor would.
#[derive(Debug, Default)]
pub struct MockTemperatureSource {
    state: Mutex<MockState>,
}

impl MockTemperatureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `raw` for `address`
    pub fn with_value(self, address: &str, raw: &str) -> Self {
        self.set_steady(address, MockAnswer::Value(raw.to_string()));
        self
    }

    /// Always fail for `address`
    pub fn with_failure(self, address: &str, message: &str) -> Self {
        self.set_steady(address, MockAnswer::Failure(message.to_string()));
        self
    }

    /// Answer the given values (or failures) once each, in order
    pub fn with_sequence(self, address: &str, answers: Vec<Result<&str, &str>>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            let queue = state.scripted.entry(address.to_string()).or_default();
            for answer in answers {
                queue.push_back(match answer {
                    Ok(raw) => MockAnswer::Value(raw.to_string()),
                    Err(msg) => MockAnswer::Failure(msg.to_string()),
                });
            }
        }
        self
    }

    /// Addresses read so far, in order
    pub fn reads(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.reads.clone())
            .unwrap_or_default()
    }

    fn set_steady(&self, address: &str, answer: MockAnswer) {
        if let Ok(mut state) = self.state.lock() {
            state.steady.insert(address.to_string(), answer);
        }
    }

    fn next_answer(&self, address: &str) -> Result<MockAnswer, ContractError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ContractError::Other("mock source poisoned".into()))?;
        state.reads.push(address.to_string());

        if let Some(answer) = state.scripted.get_mut(address).and_then(VecDeque::pop_front) {
            return Ok(answer);
        }
        Ok(state
            .steady
            .get(address)
            .cloned()
            .unwrap_or_else(|| MockAnswer::Failure("no such sensor".to_string())))
    }
}

impl TemperatureSource for MockTemperatureSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn read(&self, address: &str) -> Result<String, ContractError> {
        let answer = self.next_answer(address)?;
        trace!(address, ?answer, "Mock read");
        match answer {
            MockAnswer::Value(raw) => Ok(raw),
            MockAnswer::Failure(msg) => Err(ContractError::sensor_read(address, msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_steady_value() {
        let source = MockTemperatureSource::new().with_value("28.AA", "21.5");
        assert_eq!(source.read("28.AA").await.unwrap(), "21.5");
        assert_eq!(source.read("28.AA").await.unwrap(), "21.5");
    }

    #[tokio::test]
    async fn test_sequence_then_steady() {
        let source = MockTemperatureSource::new()
            .with_value("28.AA", "20.0")
            .with_sequence("28.AA", vec![Err("bus error"), Ok("19.0")]);

        assert!(source.read("28.AA").await.is_err());
        assert_eq!(source.read("28.AA").await.unwrap(), "19.0");
        assert_eq!(source.read("28.AA").await.unwrap(), "20.0");
    }

    #[tokio::test]
    async fn test_unknown_address_fails() {
        let source = MockTemperatureSource::new();
        let err = source.read("28.ZZ").await.unwrap_err();
        assert!(err.to_string().contains("no such sensor"));
        assert_eq!(source.reads(), vec!["28.ZZ"]);
    }
}
