
// Full-softmax word2vec objectives.
//
// Both objectives score one input vector against every row of `w_out`, normalize the
// scores with a softmax over the whole vocabulary and return the cross-entropy loss of
// the true target together with the gradients for `w_in` and `w_out`.
//
// The softmax is computed without subtracting the maximum score first, so large scores
// overflow `exp` and produce `inf`/`NaN` that are not caught here.

use ndarray::prelude::*;
use crate::embeddings::Embeddings;

/// Loss and gradients of a single training example.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub loss: f32,
    /// Gradient of the (single) input vector, shape (embedding_dim,).
    pub grad_in: Array1<f32>,
    /// Gradient of the whole output table, shape (vocab_size, embedding_dim).
    pub grad_out: Array2<f32>,
}

/// CBOW example: the context window of a center word, padded with index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CbowExample {
    pub context: Vec<usize>,
    pub center: usize,
}

/// Skip-gram example: one (center, context) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkipGramExample {
    pub center: usize,
    pub context: usize,
}

pub trait Objective {
    type Example;

    /// Rows of `w_in` read by the example and updated with `grad_in`.
    fn input_rows<'a>(&self, example: &'a Self::Example) -> &'a [usize];

    /// Row of `w_out` the softmax should put its mass on.
    fn target(&self, example: &Self::Example) -> usize;

    fn loss_and_gradients(&self, example: &Self::Example, embeddings: &Embeddings) -> Gradients {
        let input_vector = embeddings.input_vector(self.input_rows(example));
        forward_backward(input_vector, self.target(example), embeddings.w_out())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SkipGram;

impl Objective for SkipGram {
    type Example = SkipGramExample;

    fn input_rows<'a>(&self, example: &'a SkipGramExample) -> &'a [usize] {
        std::slice::from_ref(&example.center)
    }

    fn target(&self, example: &SkipGramExample) -> usize {
        example.context
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Cbow;

impl Objective for Cbow {
    type Example = CbowExample;

    fn input_rows<'a>(&self, example: &'a CbowExample) -> &'a [usize] {
        &example.context
    }

    fn target(&self, example: &CbowExample) -> usize {
        example.center
    }
}

/// Softmax over all scores, no max-subtraction.
pub fn softmax(scores: &Array1<f32>) -> Array1<f32> {
    let exp = scores.mapv(f32::exp);
    let total = exp.sum();
    exp / total
}

/// Shared forward/backward pass for an already aggregated input vector.
pub fn forward_backward(input_vector: Array1<f32>, target: usize, w_out: &Array2<f32>) -> Gradients {

    let scores: Array1<f32> = w_out.dot(&input_vector);

    // the softmax buffer becomes the gradient w.r.t. the scores: p - onehot(target)
    let mut grad = softmax(&scores);
    let loss = -grad[target].ln();
    grad[target] -= 1.0;

    let grad_in: Array1<f32> = grad.dot(w_out);
    let grad_out: Array2<f32> = grad
        .insert_axis(Axis(1))
        .dot(&input_vector.insert_axis(Axis(0)));

    Gradients { loss, grad_in, grad_out }
}
