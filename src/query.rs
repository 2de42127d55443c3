//! Bookmarkable query strings of inputs.
//!
//! The last used inputs are kept in the query part of a URL such as
//! `?green=270&sud=100&lift=50&bpm=120`, so that a calculation can be shared or bookmarked. The
//! place the query lives in is abstracted as [`QueryStore`].

use itertools::Itertools;

use crate::input::{self, Field, Inputs, RawInputs};

/// Key-value storage of query parameters.
pub trait QueryStore {
    /// Value of the parameter, if present.
    fn get(&self, key: &str) -> Option<String>;
    /// Sets the parameter, replacing the existing value.
    fn set(&mut self, key: &str, value: &str);
}

/// [`QueryStore`] in memory, preserving the order of parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MemoryQueryStore {
    params: Vec<(String, String)>,
}

impl MemoryQueryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Parses a query string, with or without the leading `?`.
    ///
    /// `+` and percent-encoded bytes are decoded. A later duplicate of a key is ignored.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut store = Self::new();
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            if store.get(&key).is_none() {
                store.params.push((key, decode_component(value)));
            }
        }
        store
    }

    /// Parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Formats the parameters as a query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .join("&")
    }
}

impl QueryStore for MemoryQueryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => value.clone_into(v),
            None => self.params.push((key.to_owned(), value.to_owned())),
        }
    }
}

impl RawInputs {
    /// Reads the fields from the store. Absent parameters are left empty.
    pub fn load(store: &impl QueryStore) -> Self {
        let mut raw = Self::default();
        for field in Field::ALL {
            *raw.slot_mut(field) = store.get(field.query_key());
        }
        raw
    }
}

impl Inputs {
    /// Reads and validates inputs from the store.
    ///
    /// # Errors
    ///
    /// Returns [`input::InvalidInput`] when a parameter is missing or invalid.
    pub fn load(store: &impl QueryStore) -> input::Result<Self> {
        RawInputs::load(store).validate()
    }

    /// Writes the inputs into the store, keeping other parameters.
    pub fn store(&self, store: &mut impl QueryStore) {
        for field in Field::ALL {
            store.set(field.query_key(), &self.get(field).to_string());
        }
    }

    /// Reads and validates inputs from a query string.
    ///
    /// # Errors
    ///
    /// Returns [`input::InvalidInput`] when a parameter is missing or invalid.
    pub fn from_query(query: &str) -> input::Result<Self> {
        Self::load(&MemoryQueryStore::parse(query))
    }

    /// Query string of the inputs, such as `green=270&sud=100&lift=50&bpm=120`.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut store = MemoryQueryStore::new();
        self.store(&mut store);
        store.to_query_string()
    }
}

fn decode_component(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = hex {
                    decoded.push(byte);
                    i += 3;
                    continue;
                }
                decoded.push(b'%');
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn encode_component(text: &str) -> String {
    text.bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (byte as char).to_string()
            }
            _ => format!("%{byte:02X}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InvalidInput;

    #[test]
    fn test_round_trip_query() {
        let inputs = Inputs::new(270, 100, 50, 120).unwrap();
        assert_eq!(inputs.to_query(), "green=270&sud=100&lift=50&bpm=120");
        assert_eq!(Inputs::from_query("?green=270&sud=100&lift=50&bpm=120"), Ok(inputs));
    }

    #[test]
    fn test_keeps_foreign_params() {
        let mut store = MemoryQueryStore::parse("lang=ja&sud=1");
        Inputs::new(300, 0, 10, 150).unwrap().store(&mut store);
        assert_eq!(
            store.to_query_string(),
            "lang=ja&sud=0&green=300&lift=10&bpm=150"
        );
    }

    #[test]
    fn test_missing_param() {
        assert_eq!(
            Inputs::from_query("green=270&sud=100&bpm=120"),
            Err(InvalidInput::Missing { field: Field::Lift })
        );
        assert_eq!(
            Inputs::from_query("green=270&sud=100&lift=&bpm=120"),
            Err(InvalidInput::Missing { field: Field::Lift })
        );
    }

    #[test]
    fn test_decoding() {
        let store = MemoryQueryStore::parse("green=%32%370&note=a+b%zz&green=1&flag");
        assert_eq!(store.get("green").as_deref(), Some("270"));
        assert_eq!(store.get("note").as_deref(), Some("a b%zz"));
        assert_eq!(store.get("flag").as_deref(), Some(""));
        assert_eq!(store.to_query_string(), "green=270&note=a%20b%25zz&flag=");

        // Only two hex digits form an escape, so a signed `%+4` is not one.
        let store = MemoryQueryStore::parse("note=%+41&sign=%-1&tail=%4");
        assert_eq!(store.get("note").as_deref(), Some("% 41"));
        assert_eq!(store.get("sign").as_deref(), Some("%-1"));
        assert_eq!(store.get("tail").as_deref(), Some("%4"));
    }
}
