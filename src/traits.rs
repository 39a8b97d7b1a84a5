use std::error::Error;

/// A flat key-value storage, such as the local storage of a browser.
///
/// Values are opaque strings. It is up to the caller to (de)serialize them.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if nothing has been stored yet
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
}
