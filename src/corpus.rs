
// imports
use crate::config::Partition;
use crate::error::{Result, Word2VecError};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use flate2::read::GzDecoder;
use log::info;


pub struct Corpus {
    /// The filtered word sequence used to build training pairs.
    pub words: Vec<String>,
    /// Occurrences of every raw token, before filtering.
    pub token2count: HashMap<String, usize>,
}

impl Corpus {

    fn open(file_path: &Path) -> Result<Box<dyn BufRead>> {

        // ".gz" corpora are decompressed on the fly, anything else is read as plain text
        let f = File::open(file_path)?;
        let reader: Box<dyn Read> = match file_path.extension() {
            Some(ext) if ext == "gz" => Box::new(GzDecoder::new(f)),
            _ => Box::new(f),
        };
        Ok(Box::new(BufReader::new(reader)))
    }

    /// Reads the first line of the corpus, cut to the partition's character limit.
    pub fn read_text(file_path: &Path, partition: Partition) -> Result<String> {

        let mut line = String::new();
        Corpus::open(file_path)?.read_line(&mut line)?;
        Ok(Corpus::truncate(line, partition))
    }

    fn truncate(mut line: String, partition: Partition) -> String {
        if let Some(limit) = partition.char_limit() {
            if let Some((byte_idx, _)) = line.char_indices().nth(limit) {
                line.truncate(byte_idx);
            }
        }
        line
    }

    fn count(tokens: &[String]) -> HashMap<String, usize> {
        let mut token2count: HashMap<String, usize> = HashMap::new();
        for tok in tokens {
            *token2count.entry(tok.to_owned()).or_insert(0) += 1;
        }
        token2count
    }

    /// Tokenizes `text` and keeps only the tokens seen at least `min_count` times.
    pub fn from_text(text: &str, min_count: usize) -> Result<Corpus> {

        let tokens = Corpus::tokenize(text);
        let token2count = Corpus::count(&tokens);

        let words: Vec<String> = tokens
        .into_iter()
        .filter(|tok| token2count[tok] >= min_count)
        .collect();

        if words.is_empty() {
            return Err(Word2VecError::EmptyCorpus(format!("no token appears at least {} times", min_count)));
        }

        info!("kept {} words out of {} distinct tokens", words.len(), token2count.len());
        Ok(Corpus { words, token2count })
    }

    pub fn load(file_path: &Path, partition: Partition, min_count: usize) -> Result<Corpus> {
        let text = Corpus::read_text(file_path, partition)?;
        Corpus::from_text(&text, min_count)
    }
}


// defines the behavior needed for tokenizing a corpus
pub trait Tokenizer {
    fn tokenize(sequence: &str) -> Vec<String>;
}

impl Tokenizer for Corpus {
    // split on any whitespace, empty tokens never appear
    fn tokenize(sequence: &str) -> Vec<String> {
        sequence.split_whitespace().map(|x| x.to_string()).collect()
    }
}


#[cfg(test)]
mod tests {

    use std::io::Write;
    use flate2::{write::GzEncoder, Compression};
    use super::*;

    #[test]
    fn rare_words_are_dropped() {
        let text = "a b a c a b a a d";
        let corpus = Corpus::from_text(text, 2).unwrap();
        assert_eq!(corpus.words, vec!["a", "b", "a", "a", "b", "a", "a"]);
        assert_eq!(corpus.token2count["a"], 5);
        assert_eq!(corpus.token2count["d"], 1);
    }

    #[test]
    fn everything_filtered_is_an_error() {
        assert!(matches!(Corpus::from_text("x y z", 5), Err(Word2VecError::EmptyCorpus(_))));
    }

    #[test]
    fn partition_keeps_first_chars_of_first_line() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        let first_line = "ab ".repeat(400_001);
        writeln!(f, "{}", first_line).unwrap();
        writeln!(f, "second line").unwrap();

        let part = Corpus::read_text(f.path(), Partition::Part).unwrap();
        assert_eq!(part.chars().count(), 1_000_000);

        let full = Corpus::read_text(f.path(), Partition::Full).unwrap();
        assert!(full.starts_with(&first_line));
        assert!(!full.contains("second"));
    }

    #[test]
    fn gzip_corpus_is_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.gz");
        let mut writer = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        writer.write_all(b"the cat the dog the").unwrap();
        writer.finish().unwrap();

        let corpus = Corpus::load(&path, Partition::Full, 3).unwrap();
        assert_eq!(corpus.words, vec!["the", "the", "the"]);
    }
}
