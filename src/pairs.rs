
// training examples from an encoded word sequence.
// positions outside the sequence are padded with the sentinel index 0, so every center
// word gets exactly `2 * window_size` context slots.

use crate::objective::{CbowExample, SkipGramExample};
use crate::vocab::SENTINEL_INDEX;


fn window(indices: &[usize], j: usize, window_size: usize) -> Vec<usize> {

    // left side nearest first, then the right side nearest first
    let n = indices.len();
    let left = (1..=window_size).map(|k| if k <= j { indices[j - k] } else { SENTINEL_INDEX });
    let right = (1..=window_size).map(|k| if j + k < n { indices[j + k] } else { SENTINEL_INDEX });
    left.chain(right).collect()
}

/// One example per position: the padded window predicts the center word.
pub fn cbow_examples(indices: &[usize], window_size: usize) -> Vec<CbowExample> {
    (0..indices.len())
    .map(|j| CbowExample { context: window(indices, j, window_size), center: indices[j] })
    .collect()
}

/// `2 * window_size` examples per position, one for each (padded) context slot.
pub fn skipgram_examples(indices: &[usize], window_size: usize) -> Vec<SkipGramExample> {
    (0..indices.len())
    .flat_map(|j| {
        let center = indices[j];
        window(indices, j, window_size)
        .into_iter()
        .map(move |context| SkipGramExample { center, context })
    })
    .collect()
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cbow_windows_are_padded() {
        let indices = [1, 2, 3, 4, 5];
        let examples = cbow_examples(&indices, 2);
        assert_eq!(examples.len(), 5);

        assert_eq!(examples[0], CbowExample { context: vec![0, 0, 2, 3], center: 1 });
        assert_eq!(examples[2], CbowExample { context: vec![2, 1, 4, 5], center: 3 });
        assert_eq!(examples[4], CbowExample { context: vec![4, 3, 0, 0], center: 5 });
        assert!(examples.iter().all(|e| e.context.len() == 4));
    }

    #[test]
    fn short_sequences_pad_both_sides() {
        let examples = cbow_examples(&[7, 8], 3);
        assert_eq!(examples[0].context, vec![0, 0, 0, 8, 0, 0]);
        assert_eq!(examples[1].context, vec![7, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn skipgram_pairs_per_slot() {
        let indices = [1, 2, 3];
        let examples = skipgram_examples(&indices, 1);
        assert_eq!(examples.len(), 6);
        assert_eq!(
            examples,
            vec![
                SkipGramExample { center: 1, context: 0 },
                SkipGramExample { center: 1, context: 2 },
                SkipGramExample { center: 2, context: 1 },
                SkipGramExample { center: 2, context: 3 },
                SkipGramExample { center: 3, context: 2 },
                SkipGramExample { center: 3, context: 0 },
            ]
        );
    }
}
