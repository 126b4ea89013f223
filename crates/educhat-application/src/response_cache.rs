use educhat_core::ChatMode;
use std::collections::{HashMap, VecDeque};

/// Default number of cached answers.
pub const DEFAULT_CACHE_CAPACITY: usize = 20;

/// Bounded cache of raw model answers keyed by mode and prompt.
///
/// Keys are the structural string `"<mode tag>:<prompt>"`, so two entries
/// collide only when both mode and prompt are equal. When an insert pushes
/// the size past capacity the oldest inserted key is dropped. Reads do not
/// refresh an entry's position.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    capacity: usize,
    entries: HashMap<String, String>,
    insertion_order: VecDeque<String>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
        }
    }

    fn key(prompt: &str, mode: ChatMode) -> String {
        format!("{}:{}", mode.tag(), prompt)
    }

    pub fn get(&self, prompt: &str, mode: ChatMode) -> Option<&str> {
        self.entries
            .get(&Self::key(prompt, mode))
            .map(String::as_str)
    }

    /// Stores `text`. Re-putting an existing key replaces the value and
    /// keeps its eviction position.
    pub fn put(&mut self, prompt: &str, mode: ChatMode, text: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        let key = Self::key(prompt, mode);
        if self.entries.insert(key.clone(), text.into()).is_some() {
            return;
        }
        self.insertion_order.push_back(key);

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!("[ResponseCache] Evicted '{}'", oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
