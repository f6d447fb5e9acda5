//! Request descriptions and the execution seam shared by both clients.
//!
//! A resource facade never performs I/O itself. It describes one API call as
//! a [`Call`] (method, URL, query, JSON body, and how to decode the payload)
//! and hands it to an [`Execute`] implementation. The async client answers
//! with a boxed future, the blocking client with a plain `Result`, so the
//! same facade code serves both calling modes.

use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::response::Payload;

type Decoder<T> = Box<dyn FnOnce(Payload) -> Result<T> + Send>;

/// One authenticated API call, ready to be executed.
pub struct Call<T> {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    /// Serialized JSON body. Serialization failures are kept here and
    /// reported by the executor before any network I/O.
    pub(crate) body: Option<Result<String>>,
    pub(crate) decode: Decoder<T>,
}

impl Call<Payload> {
    /// A call whose decoder returns the classified [`Payload`] untouched.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Call {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            decode: Box::new(Ok),
        }
    }

    /// Decodes the payload as `R`.
    pub fn json<R: DeserializeOwned + 'static>(self) -> Call<R> {
        self.and_then(Payload::json)
    }

    /// Ignores whatever the API returned on success.
    pub fn discard(self) -> Call<()> {
        self.map(|_| ())
    }
}

impl<T: 'static> Call<T> {
    /// Attaches a JSON body. Unset `Option` fields of typed bodies are
    /// skipped by their serde attributes.
    pub fn body<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_string(body).map_err(Into::into));
        self
    }

    /// Appends a query parameter. Pairs are sent in insertion order and a
    /// repeated key is sent once per value.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds a query parameter only when a value is present and non-empty.
    ///
    /// `Some("")` is skipped like `None`, so an empty filter never reaches
    /// the service as `Key=`.
    pub fn query_opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value.map(|v| v.to_string()).filter(|v| !v.is_empty()) {
            self.query.push((key.to_string(), value));
        }
        self
    }

    /// Post-processes the decoded value, e.g. to unwrap a response envelope.
    pub fn map<U: 'static, F>(self, f: F) -> Call<U>
    where
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.and_then(move |value| Ok(f(value)))
    }

    /// Like [`map`](Self::map), for conversions that can fail. The error is
    /// returned from the executor as if decoding had failed.
    pub fn and_then<U: 'static, F>(self, f: F) -> Call<U>
    where
        F: FnOnce(T) -> Result<U> + Send + 'static,
    {
        let decode = self.decode;
        Call {
            method: self.method,
            url: self.url,
            query: self.query,
            body: self.body,
            decode: Box::new(move |payload| decode(payload).and_then(f)),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute URL without the query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// The serialized body, if one was attached and serialized cleanly.
    pub fn body_text(&self) -> Option<&str> {
        match &self.body {
            Some(Ok(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Splits the call into request parts and its decoder, surfacing a body
    /// serialization failure first.
    pub(crate) fn into_parts(self) -> Result<(RequestParts, Decoder<T>)> {
        let body = self.body.transpose()?;
        Ok((
            RequestParts {
                method: self.method,
                url: self.url,
                query: self.query,
                body,
            },
            self.decode,
        ))
    }
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

pub(crate) struct RequestParts {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Something that can run a [`Call`]: the async or the blocking client.
pub trait Execute {
    /// What a facade method hands back: a future for the async client, the
    /// finished `Result` for the blocking one.
    type Output<'a, T: 'static>
    where
        Self: 'a;

    fn config(&self) -> &ClientConfig;

    fn execute<T: Send + 'static>(&self, call: Call<T>) -> Self::Output<'_, T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_opt_skips_empty_strings() {
        let call = Call::new(Method::GET, "http://x/v1/devices/0011/payloads")
            .query_opt("StartTime", Some(""))
            .query_opt("EndTime", Some("2024-02-01T00:00:00Z"))
            .query_opt("Days", Some(0));
        assert_eq!(
            call.query_pairs(),
            &[
                ("EndTime".to_string(), "2024-02-01T00:00:00Z".to_string()),
                ("Days".to_string(), "0".to_string())
            ]
        );
    }

    #[test]
    fn query_opt_skips_missing_values() {
        let call = Call::new(Method::GET, "http://x/v1/logs")
            .query_opt("DevEUI", Some("0011"))
            .query_opt::<&str>("GatewayID", None)
            .query_opt("Page", Some(2));
        assert_eq!(
            call.query_pairs(),
            &[
                ("DevEUI".to_string(), "0011".to_string()),
                ("Page".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn body_is_compact_json() {
        let call = Call::new(Method::POST, "http://x").body(&json!({"Name": "a b", "Tags": [1, 2]}));
        assert_eq!(call.body_text(), Some(r#"{"Name":"a b","Tags":[1,2]}"#));
    }

    #[test]
    fn decoders_compose() {
        #[derive(serde::Deserialize)]
        struct Created {
            #[serde(rename = "Id")]
            id: String,
        }
        let call = Call::new(Method::POST, "http://x").json::<Created>().map(|c| c.id);
        let (_, decode) = call.into_parts().unwrap();
        let id = decode(Payload::Json(json!({"Id": "abc"}))).unwrap();
        assert_eq!(id, "abc");
    }

    #[test]
    fn discard_accepts_empty_payload() {
        let (_, decode) = Call::new(Method::DELETE, "http://x").discard().into_parts().unwrap();
        decode(Payload::Empty).unwrap();
    }

    #[test]
    fn unserializable_body_fails_before_execution() {
        use std::collections::BTreeMap;
        // Non-string map keys cannot be represented in JSON.
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], "x");
        let call = Call::new(Method::POST, "http://x").body(&bad);
        assert!(call.body_text().is_none());
        assert!(call.into_parts().is_err());
    }
}
