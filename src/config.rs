
use clap::Parser;
use serde::Deserialize;
use std::{fmt::Display, fs::File, io::BufReader, path::{Path, PathBuf}, str::FromStr};
use crate::error::{Result, Word2VecError};

/// Number of characters kept from the corpus line when training on a partition.
pub const PARTITION_CHARS: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "word2vec_trainer")]
#[command(about = "Train CBOW or Skip-gram word vectors with full softmax", long_about = None)]
pub struct Cli {
    /// "SG" for skipgram, "CBOW" for CBOW
    pub mode: String,

    /// "part" to train on the first part of the corpus, "full" for the full corpus
    pub part: String,

    /// Plain text corpus, read as a single line (".gz" files are decompressed)
    #[arg(long, default_value = "text8")]
    pub corpus: PathBuf,

    /// Json file overriding the training hyper-parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for initialization and shuffling, overrides the json value
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Cbow,
    SkipGram,
}

impl FromStr for Mode {
    type Err = Word2VecError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CBOW" => Ok(Mode::Cbow),
            "SG" => Ok(Mode::SkipGram),
            other => Err(Word2VecError::UnknownMode(other.to_owned())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Cbow => write!(f, "CBOW"),
            Mode::SkipGram => write!(f, "SG"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Partition {
    Part,
    Full,
}

impl Partition {
    /// Upper bound on the number of characters read from the corpus line.
    pub fn char_limit(&self) -> Option<usize> {
        match self {
            Partition::Part => Some(PARTITION_CHARS),
            Partition::Full => None,
        }
    }
}

impl FromStr for Partition {
    type Err = Word2VecError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "part" => Ok(Partition::Part),
            "full" => Ok(Partition::Full),
            other => Err(Word2VecError::UnknownPartition(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    pub window_size: usize,
    /// Words occurring fewer times than this are discarded.
    pub min_count: usize,
    pub embedding_dim: usize,
    pub learning_rate: f32,
    pub epochs: usize,
    /// Examples between two loss checkpoints.
    pub report_every: usize,
    pub top_k: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub test_words: Vec<String>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            min_count: 5,
            embedding_dim: 64,
            learning_rate: 0.01,
            epochs: 1,
            report_every: 10_000,
            top_k: 5,
            shuffle: true,
            seed: None,
            test_words: ["one", "are", "he", "have", "many", "first", "all", "world", "people", "after"]
                .map(|w| w.to_string())
                .to_vec(),
        }
    }
}

impl Display for TrainingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "training hyper parameters:
        window_size: {},
        min_count: {},
        embedding_dim: {},
        learning_rate: {},
        epochs: {},
        report_every: {},
        top_k: {},
        shuffle: {},
        seed: {:?}",
        self.window_size, self.min_count, self.embedding_dim, self.learning_rate, self.epochs,
        self.report_every, self.top_k, self.shuffle, self.seed
        )
    }
}

impl TrainingConfig {

    pub fn from_json_file(path: &Path) -> Result<TrainingConfig> {
        let f = BufReader::new(File::open(path)?);
        let config: TrainingConfig = serde_json::from_reader(f)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Word2VecError::InvalidConfig("window_size must be positive".into()));
        }
        if self.embedding_dim == 0 {
            return Err(Word2VecError::InvalidConfig("embedding_dim must be positive".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Word2VecError::InvalidConfig(format!("learning_rate {} is not valid", self.learning_rate)));
        }
        if self.report_every == 0 {
            return Err(Word2VecError::InvalidConfig("report_every must be positive".into()));
        }
        if self.top_k == 0 {
            return Err(Word2VecError::InvalidConfig("top_k must be positive".into()));
        }
        Ok(())
    }
}

/// Everything one run needs, resolved from the command line and the optional json file.
#[derive(Clone, Debug)]
pub struct Config {
    pub mode: Mode,
    pub partition: Partition,
    pub corpus: PathBuf,
    pub training: TrainingConfig,
}

impl Config {

    pub fn new(cli: &Cli) -> Result<Config> {

        // mode and partition are checked first, a bad value stops the run before any loading
        let mode: Mode = cli.mode.parse()?;
        let partition: Partition = cli.part.parse()?;

        let mut training = match &cli.config {
            Some(path) => TrainingConfig::from_json_file(path)?,
            None => TrainingConfig::default(),
        };
        if cli.seed.is_some() {
            training.seed = cli.seed;
        }

        Ok(Config {
            mode,
            partition,
            corpus: cli.corpus.clone(),
            training,
        })
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using hyper-params:
        mode: {}
        partition: {:?}
        corpus: {}
        Using {}",
        self.mode, self.partition, self.corpus.display(), self.training)
    }
}
