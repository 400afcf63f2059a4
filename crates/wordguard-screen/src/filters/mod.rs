// Heuristic false-positive filters for fuzzy findings

pub mod boundary;
pub mod context;
pub mod length;

pub use boundary::BoundaryFilter;
pub use context::ContextFilter;
pub use length::LengthFilter;

/// A heuristic that can veto a fuzzy finding.
pub trait FilterStrategy {
    /// Whether `word`, found in `content`, is likely a false positive.
    fn should_reject(&self, word: &str, content: &str) -> bool;

    /// Unique name used to replace or remove the filter in a chain.
    fn name(&self) -> &str;
}

/// Ordered, named collection of filters. A finding is rejected if any
/// filter rejects it.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn FilterStrategy>>,
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FilterChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain with the boundary, length and context filters, in that order.
    pub fn with_default_filters() -> Self {
        let mut chain = Self::new();
        chain.add(Box::new(BoundaryFilter));
        chain.add(Box::new(LengthFilter));
        chain.add(Box::new(ContextFilter));
        chain
    }

    /// Register a filter. A filter with the same name is replaced in place.
    pub fn add(&mut self, filter: Box<dyn FilterStrategy>) {
        match self.filters.iter().position(|f| f.name() == filter.name()) {
            Some(i) => self.filters[i] = filter,
            None => self.filters.push(filter),
        }
    }

    /// Remove the filter named `name`. Returns `true` if one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.name() != name);
        self.filters.len() != before
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Names of the registered filters, in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn should_reject(&self, word: &str, content: &str) -> bool {
        self.filters.iter().any(|f| f.should_reject(word, content))
    }
}

/// Codepoint index of the first occurrence of `needle` in `haystack`.
pub(crate) fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
