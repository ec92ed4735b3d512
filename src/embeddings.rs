
use ndarray::prelude::*;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::Rng;
use std::ops::SubAssign;
use crate::error::{Result, Word2VecError};

/// The input (`w_in`) and output (`w_out`) embedding tables, both of shape (vocab_size, embedding_dim).
#[derive(Clone, Debug, PartialEq)]
pub struct Embeddings {
    w_in: Array2<f32>,
    w_out: Array2<f32>,
}

impl Embeddings {

    /// Xavier style init: i.i.d. standard normal entries scaled by 1/sqrt(embedding_dim).
    pub fn xavier<R: Rng + ?Sized>(vocab_size: usize, embedding_dim: usize, rng: &mut R) -> Embeddings {
        let scale = (embedding_dim as f32).sqrt();
        Self {
            w_in: Array::random_using((vocab_size, embedding_dim), StandardNormal, rng) / scale,
            w_out: Array::random_using((vocab_size, embedding_dim), StandardNormal, rng) / scale,
        }
    }

    pub fn from_matrices(w_in: Array2<f32>, w_out: Array2<f32>) -> Result<Embeddings> {
        if w_in.dim() != w_out.dim() {
            return Err(Word2VecError::Shape(format!("w_in is {:?} but w_out is {:?}", w_in.dim(), w_out.dim())));
        }
        Ok(Self { w_in, w_out })
    }

    pub fn vocab_size(&self) -> usize {
        self.w_in.nrows()
    }

    pub fn embedding_dim(&self) -> usize {
        self.w_in.ncols()
    }

    pub fn w_in(&self) -> &Array2<f32> {
        &self.w_in
    }

    pub fn w_out(&self) -> &Array2<f32> {
        &self.w_out
    }

    pub fn into_parts(self) -> (Array2<f32>, Array2<f32>) {
        (self.w_in, self.w_out)
    }

    /// Sum (not mean) of the `w_in` rows at `rows`, repeated rows count every time.
    pub fn input_vector(&self, rows: &[usize]) -> Array1<f32> {
        let mut v: Array1<f32> = Array1::zeros(self.embedding_dim());
        for &r in rows {
            v += &self.w_in.row(r);
        }
        v
    }

    /// One SGD step: `grad_in` is subtracted once from every distinct row in `rows`,
    /// `grad_out` from the whole output table.
    pub fn apply(&mut self, rows: &[usize], grad_in: &Array1<f32>, grad_out: &Array2<f32>, learning_rate: f32) {

        let update_in = grad_in * learning_rate;
        let mut distinct = rows.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        for r in distinct {
            self.w_in.row_mut(r).sub_assign(&update_in);
        }

        self.w_out.scaled_add(-learning_rate, grad_out);
    }
}

/// L2 norm of every row.
pub fn row_norms(w: &Array2<f32>) -> Array1<f32> {
    w.map_axis(Axis(1), |row| row.dot(&row).sqrt())
}


#[cfg(test)]
mod tests {

    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::{rngs::StdRng, SeedableRng};
    use super::*;

    #[test]
    fn xavier_shape_and_scale() {
        let mut rng = StdRng::seed_from_u64(0);
        let emb = Embeddings::xavier(2000, 16, &mut rng);
        assert_eq!(emb.w_in().dim(), (2000, 16));
        assert_eq!(emb.w_out().dim(), (2000, 16));
        assert_ne!(emb.w_in(), emb.w_out());

        // variance of N(0,1)/4 is 1/16
        let n = (2000 * 16) as f32;
        let mean = emb.w_in().sum() / n;
        let var = emb.w_in().mapv(|x| (x - mean).powi(2)).sum() / n;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(var, 1.0 / 16.0, epsilon = 0.005);
    }

    #[test]
    fn input_vector_is_row_sum() {
        let w_in = array![[0.0, 0.0], [1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let emb = Embeddings::from_matrices(w_in, Array2::zeros((4, 2))).unwrap();
        assert_eq!(emb.input_vector(&[1, 2, 3]), array![9.0, 12.0]);
        assert_eq!(emb.input_vector(&[1, 1]), array![2.0, 4.0]);
    }

    #[test]
    fn repeated_rows_are_updated_once() {
        let mut emb = Embeddings::from_matrices(Array2::zeros((3, 2)), Array2::zeros((3, 2))).unwrap();
        let grad_in = array![1.0, -1.0];
        let grad_out = Array2::from_elem((3, 2), 2.0);
        emb.apply(&[0, 0, 2], &grad_in, &grad_out, 0.5);

        assert_eq!(emb.w_in().row(0), array![-0.5, 0.5]);
        assert_eq!(emb.w_in().row(1), array![0.0, 0.0]);
        assert_eq!(emb.w_in().row(2), array![-0.5, 0.5]);
        assert_eq!(emb.w_out(), &Array2::from_elem((3, 2), -1.0));
    }

    #[test]
    fn mismatched_shapes() {
        let res = Embeddings::from_matrices(Array2::zeros((3, 2)), Array2::zeros((3, 4)));
        assert!(matches!(res, Err(Word2VecError::Shape(_))));
    }

    #[test]
    fn norms() {
        let w = array![[3.0, 4.0], [0.0, 0.0]];
        assert_eq!(row_norms(&w), array![5.0, 0.0]);
    }
}
