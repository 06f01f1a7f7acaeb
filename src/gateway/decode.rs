//! Shape decoding.
//!
//! The second half of a forward: interpret a buffered 2xx body according to
//! the route's declared shape. Records are never inspected; JSON values are
//! kept as `RawValue` so their bytes come back out exactly as they went in.

use bytes::Bytes;
use serde::de::IgnoredAny;
use serde_json::value::RawValue;

use crate::routing::ResponseShape;

/// A decoded upstream body, tagged by shape.
#[derive(Debug)]
pub enum Payload {
    /// Opaque text; `json` records whether it also parses as one JSON value.
    Single { text: String, json: bool },
    Collection(Vec<Box<RawValue>>),
    Text(String),
}

/// The body did not match the declared shape.
#[derive(Debug, thiserror::Error)]
#[error("upstream body is not a valid {shape}: {reason}")]
pub struct DecodeError {
    pub shape: ResponseShape,
    pub reason: String,
}

impl Payload {
    pub fn shape(&self) -> ResponseShape {
        match self {
            Payload::Single { .. } => ResponseShape::SingleValue,
            Payload::Collection(_) => ResponseShape::Collection,
            Payload::Text(_) => ResponseShape::RawText,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Payload::Single { json: true, .. } | Payload::Collection(_) => "application/json",
            Payload::Single { json: false, .. } | Payload::Text(_) => "text/plain; charset=utf-8",
        }
    }

    /// Serialize back to bytes for relaying.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Payload::Single { text, .. } => Bytes::from(text),
            Payload::Collection(records) => {
                let size = records.iter().map(|r| r.get().len() + 1).sum::<usize>() + 2;
                let mut out = String::with_capacity(size);
                out.push('[');
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(record.get());
                }
                out.push(']');
                Bytes::from(out)
            }
            Payload::Text(text) => Bytes::from(text),
        }
    }
}

/// Decode `body` as `shape`.
///
/// A `Collection` body that holds one non-array JSON value is treated as a
/// collection of that single record.
pub fn decode(shape: ResponseShape, body: &[u8]) -> Result<Payload, DecodeError> {
    let fail = |reason: String| DecodeError { shape, reason };

    match shape {
        ResponseShape::SingleValue => {
            let text = String::from_utf8(body.to_vec()).map_err(|e| fail(e.to_string()))?;
            let json = serde_json::from_str::<IgnoredAny>(&text).is_ok();
            Ok(Payload::Single { text, json })
        }
        ResponseShape::Collection => match serde_json::from_slice::<Vec<Box<RawValue>>>(body) {
            Ok(records) => Ok(Payload::Collection(records)),
            Err(e) => match serde_json::from_slice::<Box<RawValue>>(body) {
                Ok(record) => Ok(Payload::Collection(vec![record])),
                Err(_) => Err(fail(e.to_string())),
            },
        },
        ResponseShape::RawText => String::from_utf8(body.to_vec())
            .map(Payload::Text)
            .map_err(|e| fail(e.to_string())),
    }
}
