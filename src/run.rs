

use crate::config::{Config, Mode, TrainingConfig};
use crate::corpus::Corpus;
use crate::embeddings::Embeddings;
use crate::error::{Result, Word2VecError};
use crate::objective::{Cbow, Objective, SkipGram};
use crate::pairs;
use crate::similarity::{Neighbours, Similarity};
use crate::train::Train;
use crate::vocab::Vocab;
use log::{info, warn};
use rayon::prelude::*;
use std::time::Instant;


pub struct Run {}

impl Run {

    // runs the main procedure:
    // -> corpus loading and vocabulary
    // -> training pairs for the selected mode
    // -> training
    // -> nearest neighbours of the test words

    pub fn run(config: &Config) -> Result<()> {

        info!("{}", config);
        let params = &config.training;

        println!("loading...");
        let text = Corpus::read_text(&config.corpus, config.partition)?;

        println!("preprocessing...");
        let corpus = Corpus::from_text(&text, params.min_count)?;
        let vocab = Vocab::from_words(&corpus.words);
        let indices = vocab.encode(&corpus.words);

        // built for negative sampling, which the full softmax training does not use
        let sampling_table = vocab.sampling_table(&corpus.token2count);
        info!("negative sampling table has {} entries (unused)", sampling_table.len());

        println!("build training set...");
        let my_time = Instant::now();
        let embeddings = match config.mode {
            Mode::Cbow => {
                let mut examples = pairs::cbow_examples(&indices, params.window_size);
                Run::train(Cbow, &mut examples, &vocab, params)?
            }
            Mode::SkipGram => {
                let mut examples = pairs::skipgram_examples(&indices, params.window_size);
                Run::train(SkipGram, &mut examples, &vocab, params)?
            }
        };
        info!("finished training, took {} seconds ...", my_time.elapsed().as_secs());

        for neighbours in Run::report(embeddings.w_in(), &vocab, &params.test_words, params.top_k)? {
            print!("{}", neighbours);
        }

        Ok(())
    }

    fn train<O: Objective>(objective: O, examples: &mut [O::Example], vocab: &Vocab, params: &TrainingConfig) -> Result<Embeddings> {

        println!("Vocabulary size");
        println!("{}", vocab.len());
        println!();

        println!("# of training samples");
        println!("{}", examples.len());
        println!();

        let trainer = Train::run(objective, examples, vocab.len(), params)?;
        Ok(trainer.into_embeddings())
    }

    /// Nearest neighbours of every test word, in the order given. Words missing from the
    /// vocabulary are skipped with a warning.
    pub fn report(w_in: &ndarray::Array2<f32>, vocab: &Vocab, test_words: &[String], k: usize) -> Result<Vec<Neighbours>> {

        let sim_obj = Similarity::new(w_in, vocab)?;

        // the queries only read w_in, each one runs on its own rayon task
        let results: Vec<Result<Neighbours>> = test_words
        .par_iter()
        .map(|token| sim_obj.find_k_most_similar(token, k))
        .collect();

        let mut reports = Vec::new();
        for result in results {
            match result {
                Ok(neighbours) => reports.push(neighbours),
                Err(Word2VecError::WordNotFound(token)) => warn!("skipping \"{}\", it is not in the vocabulary", token),
                Err(e) => return Err(e),
            }
        }
        Ok(reports)
    }
}


#[cfg(test)]
mod tests {

    use std::io::Write;
    use std::path::PathBuf;
    use crate::config::Partition;
    use super::*;

    fn config(mode: Mode, corpus: PathBuf) -> Config {
        Config {
            mode,
            partition: Partition::Full,
            corpus,
            training: TrainingConfig {
                window_size: 2,
                min_count: 2,
                embedding_dim: 8,
                epochs: 2,
                report_every: 50,
                seed: Some(1),
                test_words: vec!["cat".to_string(), "unicorn".to_string()],
                ..TrainingConfig::default()
            },
        }
    }

    fn corpus_file() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{}", "the cat sat on the mat the dog sat on the log ".repeat(20)).unwrap();
        f
    }

    #[test]
    fn pipeline_runs_for_both_modes() {
        let f = corpus_file();
        Run::run(&config(Mode::Cbow, f.path().to_path_buf())).unwrap();
        Run::run(&config(Mode::SkipGram, f.path().to_path_buf())).unwrap();
    }

    #[test]
    fn missing_corpus_is_an_io_error() {
        let res = Run::run(&config(Mode::Cbow, PathBuf::from("/does/not/exist/text8")));
        assert!(matches!(res, Err(Word2VecError::Io(_))));
    }

    #[test]
    fn report_skips_unknown_words() {
        let words: Vec<String> = "a b c".split(' ').map(|x| x.to_string()).collect();
        let vocab = Vocab::from_words(&words);
        let w_in = ndarray::Array2::from_shape_fn((4, 2), |(i, j)| (i * 2 + j) as f32 + 1.0);
        let test_words = vec!["b".to_string(), "zzz".to_string(), "a".to_string()];

        let reports = Run::report(&w_in, &vocab, &test_words, 3).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].query, "b");
        assert_eq!(reports[1].query, "a");
        assert!(reports.iter().all(|r| r.similar.len() == 3));
    }
}
