//! Post record and create payload.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned post identifier.
pub type PostId = i64;

/// A stored post.
///
/// Field names on the wire are `ID` and `Body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "ID")]
    pub id: PostId,

    #[serde(rename = "Body")]
    pub body: String,
}

/// Payload accepted by the create endpoint.
///
/// Only the body is read, and its key matches `Body` in any letter case. A
/// client-supplied `ID` and any unknown fields are ignored. A missing or
/// `null` body, or a bare `null` payload, becomes the empty string. When the
/// body key repeats, the last non-null value wins.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    body: Option<String>,
}

impl NewPost {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    pub fn into_body(self) -> String {
        self.body.unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for NewPost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NewPostVisitor)
    }
}

struct NewPostVisitor;

impl<'de> Visitor<'de> for NewPostVisitor {
    type Value = NewPost;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a post object or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<NewPost, E> {
        Ok(NewPost::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<NewPost, E> {
        Ok(NewPost::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NewPost, A::Error> {
        let mut body = None;
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("body") {
                if let Some(value) = map.next_value::<Option<String>>()? {
                    body = Some(value);
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(NewPost { body })
    }
}
