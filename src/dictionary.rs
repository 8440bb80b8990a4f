use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/words.txt");

/// Shortest word length the index keeps.
pub const MIN_WORD_LENGTH: usize = 4;

/// Membership oracle for words found on the board.
pub trait Dictionary {
    fn is_word(&self, word: &str) -> bool;
}

/// Word list bucketed by the first two lowercase characters of each word.
#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
    buckets: HashMap<String, HashSet<String>>,
    len: usize,
}

impl DictionaryIndex {
    /// Index the given words, keeping only those of at least
    /// [`MIN_WORD_LENGTH`] characters. Words are stored lowercase.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for word in words {
            index.insert(word.as_ref());
        }
        index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn insert(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if word.chars().count() < MIN_WORD_LENGTH {
            return;
        }
        if self.buckets.entry(prefix(&word)).or_default().insert(word) {
            self.len += 1;
        }
    }
}

impl Dictionary for DictionaryIndex {
    fn is_word(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.buckets
            .get(&prefix(&word))
            .is_some_and(|bucket| bucket.contains(&word))
    }
}

impl Dictionary for HashSet<String> {
    fn is_word(&self, word: &str) -> bool {
        self.contains(&word.to_lowercase())
    }
}

fn prefix(word: &str) -> String {
    word.chars().take(2).collect()
}

pub fn load_dictionary_from_str(data: &str) -> DictionaryIndex {
    DictionaryIndex::from_words(data.lines())
}

/// Read a newline-delimited word list.
///
/// # Errors
///
/// Returns any I/O error from opening or reading the file.
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> io::Result<DictionaryIndex> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut index = DictionaryIndex::default();
    for line in reader.lines() {
        index.insert(&line?);
    }
    Ok(index)
}
