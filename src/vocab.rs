
use std::collections::HashMap;

/// Token reserved for index 0, the padding slot of windows that cross the corpus edge.
pub const SENTINEL: &str = " ";
pub const SENTINEL_INDEX: usize = 0;

/// Bijection between words and row indices, index 0 being the sentinel.
#[derive(Clone, Debug)]
pub struct Vocab {
    t2i: HashMap<String, usize>,
    i2t: Vec<String>,
}

impl Vocab {

    /// Assigns indices `1..` in order of first occurrence.
    pub fn from_words(words: &[String]) -> Vocab {

        let mut t2i: HashMap<String, usize> = HashMap::new();
        let mut i2t: Vec<String> = vec![SENTINEL.to_string()];
        t2i.insert(SENTINEL.to_string(), SENTINEL_INDEX);

        for word in words {
            if !t2i.contains_key(word) {
                t2i.insert(word.to_owned(), i2t.len());
                i2t.push(word.to_owned());
            }
        }

        Vocab { t2i, i2t }
    }

    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    pub fn index(&self, word: &str) -> Option<usize> {
        self.t2i.get(word).copied()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.i2t.get(index).map(String::as_str)
    }

    /// Maps a word sequence to indices, words outside the vocabulary are dropped.
    pub fn encode(&self, words: &[String]) -> Vec<usize> {
        words.iter().filter_map(|w| self.index(w)).collect()
    }

    /// Unigram table for negative sampling: each word index repeated `floor(count^0.75)` times.
    ///
    /// Training uses the full softmax, so the table is only built and reported.
    pub fn sampling_table(&self, token2count: &HashMap<String, usize>) -> Vec<usize> {

        let mut table: Vec<usize> = Vec::new();
        for (tok, count) in token2count {
            if let Some(i) = self.index(tok) {
                let f = (*count as f64).powf(0.75) as usize;
                table.extend(std::iter::repeat(i).take(f));
            }
        }
        table
    }
}


#[cfg(test)]
mod tests {

    use std::collections::HashMap;
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split(' ').map(|x| x.to_string()).collect()
    }

    #[test]
    fn sentinel_first_then_first_occurrence() {
        let vocab = Vocab::from_words(&words("b a b c a"));
        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.index(" "), Some(0));
        assert_eq!(vocab.index("b"), Some(1));
        assert_eq!(vocab.index("a"), Some(2));
        assert_eq!(vocab.index("c"), Some(3));
        assert_eq!(vocab.word(3), Some("c"));
        assert_eq!(vocab.index("z"), None);
        assert_eq!(vocab.encode(&words("c a b")), vec![3, 2, 1]);
    }

    #[test]
    fn sampling_table_counts() {
        let vocab = Vocab::from_words(&words("a b"));
        let mut token2count = HashMap::new();
        token2count.insert("a".to_string(), 10); // 10^0.75 = 5.62
        token2count.insert("b".to_string(), 1);
        token2count.insert("rare".to_string(), 3); // filtered, not in vocab

        let table = vocab.sampling_table(&token2count);
        assert_eq!(table.len(), 6);
        assert_eq!(table.iter().filter(|&&i| i == 1).count(), 5);
        assert_eq!(table.iter().filter(|&&i| i == 2).count(), 1);
    }
}
