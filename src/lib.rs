
mod run;
mod config;
mod corpus;
mod embeddings;
mod error;
mod objective;
mod pairs;
mod similarity;
mod train;
mod vocab;

pub use run::Run;
pub use config::{Cli, Config, Mode, Partition, TrainingConfig};
pub use corpus::Corpus;
pub use embeddings::Embeddings;
pub use error::{Result, Word2VecError};
pub use objective::{Cbow, CbowExample, Gradients, Objective, SkipGram, SkipGramExample};
pub use pairs::{cbow_examples, skipgram_examples};
pub use similarity::{Neighbours, Similarity};
pub use train::Train;
pub use vocab::Vocab;
