use std::io::{BufReader, Read};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use ureq::OrAnyStatus;
use url::Url;

/// One element of the fetched array. Only `value` is inspected, other fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub value: f64,
}

#[cfg(test)]
impl Record {
    pub fn new(value: f64) -> Record {
        Record { value }
    }
}

pub type Dataset = Vec<Record>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected status code {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Transport),
    #[error("unable to read response body: {0}")]
    Read(#[from] std::io::Error),
    #[error("response is not a JSON array: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("record {index} has no numeric `value` field: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct Fetcher {
    url: Url,
    agent: ureq::Agent,
}

impl Fetcher {
    pub fn new(url: Url) -> Fetcher {
        Fetcher {
            url,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn fetch(&self) -> Result<Dataset, FetchError> {
        debug!(url = %self.url, "sending request");
        let resp = self.agent.request_url("GET", &self.url).call().or_any_status()?;
        info!(status = resp.status(), "received response");

        if resp.status() != 200 {
            warn!(status = resp.status(), "endpoint did not answer with 200");
            return Err(FetchError::Status(resp.status()));
        }

        let dataset = parse_dataset(BufReader::new(resp.into_reader()))?;
        info!(records = dataset.len(), "decoded dataset");
        Ok(dataset)
    }
}

/// Decodes a response body into records, rejecting the first element that is not an
/// object with a numeric `value`.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset, FetchError> {
    let elements: Vec<Value> = serde_json::from_reader(reader).map_err(|err| match err.is_io() {
        true => FetchError::Read(err.into()),
        false => FetchError::Decode(err),
    })?;
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(_) => serde_json::from_value(element)
                .map_err(|source| FetchError::MalformedRecord { index, source }),
            other => Err(FetchError::MalformedRecord {
                index,
                source: serde::de::Error::custom(format!(
                    "expected an object, found {}",
                    kind(&other)
                )),
            }),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
