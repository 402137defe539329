/// The sentences every session walks through, in order.
pub const SENTENCES: [&str; 3] = [
    "Max Joykner sneakily drove his car around every corner looking for his dog.",
    "The two boys collected twigs outside, for over an hour, in the freezing cold.",
    "Trixie and Veronica, our two cats, just love to play with their pink ball of yarn.",
];

/// Ordered, read-only list of target sentences
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSet {
    sentences: Vec<String>,
}

impl PracticeSet {
    pub fn new<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sentences: sentences.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.sentences.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl Default for PracticeSet {
    fn default() -> Self {
        Self::new(SENTENCES)
    }
}
