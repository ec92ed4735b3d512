
use std::fmt::Display;
use ndarray::prelude::*;
use crate::embeddings::row_norms;
use crate::error::{Result, Word2VecError};
use crate::vocab::Vocab;

const RULE: &str = "===============================================";

/// Cosine similarity queries over a trained input table.
pub struct Similarity<'a> {
    w: ArrayView2<'a, f32>,
    norms: Array1<f32>,
    vocab: &'a Vocab,
}

/// The ranked neighbours of one query word, printed as a framed block.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbours {
    pub query: String,
    pub similar: Vec<(String, f32)>,
}

impl Display for Neighbours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "The most similar words to \"{}\"", self.query)?;
        for (token, score) in &self.similar {
            writeln!(f, "{}:{:.3}", token, score)?;
        }
        writeln!(f, "{}", RULE)?;
        writeln!(f)
    }
}

impl<'a> Similarity<'a> {

    pub fn new(w: &'a Array2<f32>, vocab: &'a Vocab) -> Result<Similarity<'a>> {

        if w.nrows() != vocab.len() {
            return Err(Word2VecError::Shape(format!("{} rows for {} tokens", w.nrows(), vocab.len())));
        }

        Ok(Self {
            w: w.view(),
            norms: row_norms(w),
            vocab,
        })
    }

    fn index_of(&self, token: &str) -> Result<usize> {
        self.vocab.index(token).ok_or_else(|| Word2VecError::WordNotFound(token.to_owned()))
    }

    pub fn extract_vec_from_word(&self, token: &str) -> Result<ArrayView1<'_, f32>> {
        let i = self.index_of(token)?;
        Ok(self.w.row(i))
    }

    /// Cosine similarity of `token` against every row, the sentinel row included.
    pub fn cosine_scores(&self, token: &str) -> Result<Array1<f32>> {
        let i = self.index_of(token)?;
        let query = &self.w.row(i) / self.norms[i];
        Ok(self.w.dot(&query) / &self.norms)
    }

    /// The `k` rows most similar to `token`, in descending order of cosine similarity.
    pub fn find_k_most_similar(&self, token: &str, k: usize) -> Result<Neighbours> {

        let scores = self.cosine_scores(token)?;
        let mut indexed_scores: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();

        // sort by most similar in descending order
        indexed_scores.sort_by(|(_i, s), (_j, t)| t.total_cmp(s));

        let similar = indexed_scores
        .into_iter()
        .take(k)
        .map(|(index, score)| {
            let sim_tok = self.vocab.word(index).unwrap_or_default();
            (sim_tok.to_string(), score)
        })
        .collect();

        Ok(Neighbours { query: token.to_owned(), similar })
    }
}
