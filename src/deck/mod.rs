use std::collections::HashSet;

use rand::{thread_rng, Rng};

/// The word pool of a single round. Words are drawn uniformly at random and
/// without replacement; once every index is in `drawn` the deck is exhausted
/// and `draw_next` reports it with `None`.
#[derive(Debug, Default)]
pub struct WordDeck {
    pool: Vec<String>,
    drawn: HashSet<usize>,
}

impl WordDeck {
    pub fn new() -> Self {
        WordDeck::default()
    }

    /// Replaces the pool with the given words and forgets all draws. An empty
    /// pool is allowed, the deck just starts exhausted.
    pub fn load(&mut self, words: Vec<String>) {
        self.pool = words;
        self.drawn.clear();
    }

    /// Draws a not-yet-drawn word, or `None` when the deck is exhausted.
    /// Rejection sampling is fine here, pools are at most a few dozen words.
    pub fn draw_next(&mut self) -> Option<String> {
        if self.is_exhausted() {
            return None;
        }
        let mut rng = thread_rng();
        loop {
            let index = rng.gen_range(0..self.pool.len());
            if self.drawn.insert(index) {
                return Some(self.pool[index].clone());
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.drawn.len() == self.pool.len()
    }

    /// Clears the drawn set but keeps the pool.
    pub fn reset(&mut self) {
        self.drawn.clear();
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }
}
