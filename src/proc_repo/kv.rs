// "Key:   value [unit]" line reader shared by the meminfo-style sources.

use std::collections::HashMap;

/// Numeric values keyed by the text before the first `:` on each line.
/// Lines without a colon or without a parseable first value are skipped; lookups of
/// absent keys read as 0.
#[derive(Debug, Default)]
pub(crate) struct KeyValues {
    values: HashMap<String, u64>,
}

impl KeyValues {
    pub(crate) fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .filter_map(|line| {
                let (key, rest) = line.split_once(':')?;
                let value = rest.split_whitespace().next()?.parse().ok()?;
                Some((key.trim().to_string(), value))
            })
            .collect();
        Self { values }
    }

    pub(crate) fn get(&self, key: &str) -> u64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
