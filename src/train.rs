

use ndarray::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use log::{debug, info};
use crate::config::TrainingConfig;
use crate::embeddings::Embeddings;
use crate::error::{Result, Word2VecError};
use crate::objective::Objective;
use std::time::Instant;


/// SGD trainer (batch size 1), owns the embedding tables for the whole run.
pub struct Train<O: Objective> {
    objective: O,
    embeddings: Embeddings,
    rng: StdRng,
    checkpoints: Vec<f32>,
}

struct DisplayProgress {
    running_loss: f64, // sum of the losses since the last checkpoint
    n_losses: usize,   // number of losses in running_loss
    seen: usize,       // examples processed over all epochs
    report_every: usize,
}

impl DisplayProgress {

    fn new(report_every: usize) -> Self {
        Self {
            running_loss: 0.0,
            n_losses: 0,
            seen: 0,
            report_every,
        }
    }

    // returns the mean loss when a checkpoint is reached, and resets the accumulator
    fn record(&mut self, loss: f32) -> Option<f32> {
        self.seen += 1;
        self.running_loss += loss as f64;
        self.n_losses += 1;

        if self.seen % self.report_every != 0 {
            return None;
        }
        let avg = (self.running_loss / self.n_losses as f64) as f32;
        self.running_loss = 0.0;
        self.n_losses = 0;
        Some(avg)
    }
}

// console line for a loss checkpoint
fn loss_line(avg_loss: f32) -> String {
    format!("Loss : {:.6}", avg_loss)
}

impl<O: Objective> Train<O> {

    fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Fresh Xavier initialized tables; the same rng then drives the shuffling.
    pub fn new(objective: O, vocab_size: usize, embedding_dim: usize, seed: Option<u64>) -> Train<O> {
        let mut rng = Train::<O>::rng(seed);
        let embeddings = Embeddings::xavier(vocab_size, embedding_dim, &mut rng);
        Self {
            objective,
            embeddings,
            rng,
            checkpoints: Vec::new(),
        }
    }

    /// Starts from given tables instead of a random init.
    pub fn with_embeddings(objective: O, embeddings: Embeddings, seed: Option<u64>) -> Train<O> {
        Self {
            objective,
            embeddings,
            rng: Train::<O>::rng(seed),
            checkpoints: Vec::new(),
        }
    }

    pub fn get_w_in(&self) -> Array2<f32> {
        self.embeddings.w_in().clone()
    }

    pub fn get_w_out(&self) -> Array2<f32> {
        self.embeddings.w_out().clone()
    }

    pub fn embeddings(&self) -> &Embeddings {
        &self.embeddings
    }

    pub fn into_embeddings(self) -> Embeddings {
        self.embeddings
    }

    /// Mean losses reported at every checkpoint, in order.
    pub fn checkpoints(&self) -> &[f32] {
        &self.checkpoints
    }

    fn check_indices(&self, examples: &[O::Example]) -> Result<()> {
        let max = self.embeddings.vocab_size();
        for example in examples {
            let target = self.objective.target(example);
            let rows = self.objective.input_rows(example);
            if let Some(&index) = rows.iter().chain(std::iter::once(&target)).find(|&&i| i >= max) {
                return Err(Word2VecError::IndexOutOfBounds { index, max });
            }
        }
        Ok(())
    }

    /// Forward, backward and in-place update for one example. Returns the loss
    /// computed on the tables as they were before the update.
    pub fn step(&mut self, example: &O::Example, learning_rate: f32) -> f32 {
        let grads = self.objective.loss_and_gradients(example, &self.embeddings);
        let rows = self.objective.input_rows(example);
        self.embeddings.apply(rows, &grads.grad_in, &grads.grad_out, learning_rate);
        grads.loss
    }

    pub fn train(&mut self, examples: &mut [O::Example], train_params: &TrainingConfig) -> Result<()> {

        train_params.validate()?;
        self.check_indices(examples)?;

        let learning_rate = train_params.learning_rate;
        let mut progress = DisplayProgress::new(train_params.report_every);

        for epoch in 0..train_params.epochs {

            let my_time = Instant::now();

            // a new permutation every epoch, shuffled in place
            if train_params.shuffle {
                examples.shuffle(&mut self.rng);
            }

            for example in examples.iter() {
                let loss = self.step(example, learning_rate);
                if let Some(avg_loss) = progress.record(loss) {
                    println!("{}", loss_line(avg_loss));
                    debug!("checkpoint after {} examples", progress.seen);
                    self.checkpoints.push(avg_loss);
                }
            }

            debug!("{} examples seen so far", progress.seen);
            info!("finished epoch {}, took: {} seconds...", epoch, my_time.elapsed().as_secs());
        }

        Ok(())
    }

    pub fn run(objective: O, examples: &mut [O::Example], vocab_size: usize, train_params: &TrainingConfig) -> Result<Train<O>> {

        if vocab_size == 0 {
            return Err(Word2VecError::InvalidConfig("vocabulary is empty".into()));
        }

        let mut trainer = Train::new(objective, vocab_size, train_params.embedding_dim, train_params.seed);
        trainer.train(examples, train_params)?;
        Ok(trainer)
    }
}
