/// Characters of the current answer revealed so far.
///
/// Each reveal cycle gets a number; writes tagged with an older cycle are
/// dropped, and within a cycle the content only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    revealed: String,
    cycle: u64,
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the buffer and returns the number of the cycle that now owns it.
    pub fn start_cycle(&mut self) -> u64 {
        self.revealed.clear();
        self.cycle += 1;
        self.cycle
    }

    pub fn advance_to(&mut self, cycle: u64, prefix: &str) -> bool {
        if cycle != self.cycle
            || prefix.len() <= self.revealed.len()
            || !prefix.starts_with(self.revealed.as_str())
        {
            return false;
        }
        self.revealed.clear();
        self.revealed.push_str(prefix);
        true
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn as_str(&self) -> &str {
        &self.revealed
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.revealed.chars().count()
    }
}
