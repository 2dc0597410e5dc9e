/// Hands out document-unique element ids for one chart.
///
/// Each chart owns its own context; two charts on a page get distinct
/// prefixes so their clip paths never collide.
#[derive(Debug, Clone)]
pub struct IdContext {
    prefix: String,
    counter: usize,
}

impl IdContext {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    pub fn next(&mut self, name: &str) -> String {
        self.counter += 1;
        format!("{}-{}-{}", self.prefix, name, self.counter)
    }
}

impl Default for IdContext {
    fn default() -> Self {
        Self::new("pantry")
    }
}
