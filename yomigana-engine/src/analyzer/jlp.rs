//! Yahoo! JLP morphological analysis (V2) JSON-RPC shapes
//!
//! Only the message bodies live here; transport and credentials belong to
//! the host.

use super::AnalyzerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use yomigana_core::Token;

/// Service endpoint
pub const ENDPOINT: &str = "https://jlp.yahooapis.jp/MAService/V2/parse";

/// JSON-RPC method name
pub const METHOD: &str = "jlp.maservice.parse";

const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request body
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Request<'a> {
    /// Caller-chosen request id
    pub id: String,
    /// Always "2.0"
    pub jsonrpc: &'static str,
    /// Always [`METHOD`]
    pub method: &'static str,
    /// Parameters
    pub params: Params<'a>,
}

/// Request parameters
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Params<'a> {
    /// Text to analyze
    pub q: &'a str,
}

impl<'a> Request<'a> {
    /// Build a parse request for `text`
    pub fn new(id: impl Into<String>, text: &'a str) -> Self {
        Self {
            id: id.into(),
            jsonrpc: JSONRPC_VERSION,
            method: METHOD,
            params: Params { q: text },
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, AnalyzerError> {
        serde_json::to_string(self).map_err(|e| AnalyzerError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<ResultBody>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    #[serde(default)]
    tokens: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Parse a JSON-RPC response body into tokens
///
/// Each token is an array whose first element is the surface form and
/// whose second is the reading; further elements are ignored. A response
/// without a result carries no tokens.
pub fn parse_response(body: &str) -> Result<Vec<Token>, AnalyzerError> {
    let response: Response =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Malformed(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(AnalyzerError::Unavailable(match error.code {
            Some(code) => format!("{} (code {code})", error.message),
            None => error.message,
        }));
    }

    let Some(result) = response.result else {
        return Ok(Vec::new());
    };

    result
        .tokens
        .iter()
        .enumerate()
        .map(|(idx, fields)| {
            match (
                fields.first().and_then(Value::as_str),
                fields.get(1).and_then(Value::as_str),
            ) {
                (Some(surface), Some(reading)) if !surface.is_empty() && !reading.is_empty() => {
                    Ok(Token::new(surface, reading))
                }
                _ => Err(AnalyzerError::Malformed(format!(
                    "token {idx} lacks a surface or reading"
                ))),
            }
        })
        .collect()
}
