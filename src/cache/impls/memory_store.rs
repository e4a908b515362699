use crate::cache::errors::CacheError;
use crate::cache::structs::memory_store::{MemoryEntry, MemoryStore};
use regex::Regex;
use std::time::{Duration, Instant};

impl MemoryEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl MemoryStore {
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(Instant::now()) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    pub fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) {
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .map(|ttl| Instant::now() + ttl);
        self.entries.lock().insert(key.to_string(), MemoryEntry { value, expires_at });
    }

    pub fn set_if_not_exists(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(|entry| !entry.is_expired(now)) {
            return false;
        }
        let expires_at = ttl.filter(|ttl| !ttl.is_zero()).map(|ttl| now + ttl);
        entries.insert(key.to_string(), MemoryEntry { value, expires_at });
        true
    }

    pub fn set_many(&self, items: Vec<(String, Vec<u8>)>, ttl: Option<Duration>) {
        let expires_at = ttl.filter(|ttl| !ttl.is_zero()).map(|ttl| Instant::now() + ttl);
        let mut entries = self.entries.lock();
        for (key, value) in items {
            entries.insert(key, MemoryEntry { value, expires_at });
        }
    }

    /// Integer arithmetic on a stored decimal string, as Redis `INCRBY` does.
    pub fn increment_by(&self, key: &str, delta: i64) -> Result<i64, CacheError> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let (current, expires_at) = match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let current = std::str::from_utf8(&entry.value)
                    .ok()
                    .and_then(|text| text.parse::<i64>().ok())
                    .ok_or_else(|| CacheError::Rejected(format!("value of '{}' is not an integer", key)))?;
                (current, entry.expires_at)
            }
            _ => (0, None),
        };
        let updated = current
            .checked_add(delta)
            .ok_or_else(|| CacheError::Rejected(format!("increment of '{}' would overflow", key)))?;
        entries.insert(key.to_string(), MemoryEntry { value: updated.to_string().into_bytes(), expires_at });
        Ok(updated)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .lock()
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    pub fn remove_all(&self, keys: &[String]) -> u64 {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        keys.iter()
            .filter_map(|key| entries.remove(key))
            .filter(|entry| !entry.is_expired(now))
            .count() as u64
    }

    pub fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let matcher = glob_to_regex(pattern)?;
        let now = Instant::now();
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| !entry.is_expired(now));
        let mut keys: Vec<String> = entries.keys().filter(|key| matcher.is_match(key)).cloned().collect();
        keys.sort();
        Ok(keys)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Translates a Redis-style glob (`*`, `?`, `[...]`, `[^...]`, `\x`) into an anchored regex.
/// A `[` without a closing `]` matches itself.
pub(crate) fn glob_to_regex(pattern: &str) -> Result<Regex, CacheError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut expression = String::from("(?s)^");
    let mut index = 0;
    while index < chars.len() {
        let c = chars[index];
        index += 1;
        match c {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            '\\' if index < chars.len() => {
                expression.push_str(&escape_char(chars[index]));
                index += 1;
            }
            '[' => match bracket_class(&chars[index..]) {
                Some((class, consumed)) => {
                    expression.push_str(&class);
                    index += consumed;
                }
                None => expression.push_str(r"\["),
            },
            _ => expression.push_str(&escape_char(c)),
        }
    }
    expression.push('$');
    Regex::new(&expression)
        .map_err(|e| CacheError::ConfigurationError(format!("invalid key pattern '{}': {}", pattern, e)))
}

/// Regex class for the body following a `[`, and how many chars it spans
/// including the closing `]`. Reversed ranges are swapped like Redis does.
fn bracket_class(rest: &[char]) -> Option<(String, usize)> {
    let negated = rest.first() == Some(&'^');
    let mut index = usize::from(negated);
    let mut members = String::new();
    while index < rest.len() {
        let mut c = rest[index];
        index += 1;
        if c == ']' {
            let class = match (members.is_empty(), negated) {
                (true, false) => String::from(r"[^\s\S]"),
                (true, true) => String::from("."),
                (false, false) => format!("[{}]", members),
                (false, true) => format!("[^{}]", members),
            };
            return Some((class, index));
        }
        if c == '\\' && index < rest.len() {
            c = rest[index];
            index += 1;
        }
        if rest.get(index) == Some(&'-') && rest.get(index + 1).is_some_and(|end| *end != ']') {
            let end = rest[index + 1];
            index += 2;
            let (low, high) = if c <= end { (c, end) } else { (end, c) };
            members.push_str(&format!("{}-{}", escape_char(low), escape_char(high)));
        } else {
            members.push_str(&escape_char(c));
        }
    }
    None
}

fn escape_char(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0; 4]))
}

/// Escapes glob metacharacters so `value` only ever matches itself.
pub(crate) fn escape_glob(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
