//! Seeded train/test partitioning.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::table::Table;

/// Randomly partitions rows into (train, test) with a fixed seed.
///
/// The shuffle is a seeded Fisher-Yates over row indices, so the same
/// input, fraction and seed always produce the same partitions. The test
/// partition receives `ceil(n * test_size)` rows; the split is row-disjoint
/// and the union of both partitions is the input. No stratification.
pub fn split(table: &Table, test_size: f64, seed: u64) -> (Table, Table) {
    let n = table.n_rows();

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64) * test_size).ceil() as usize;
    let n_test = n_test.min(n);

    let test = table.select_rows(&indices[..n_test]);
    let train = table.select_rows(&indices[n_test..]);

    debug!(
        "Dataset split: {} training rows, {} test rows (test_size={test_size}, seed={seed})",
        train.n_rows(),
        test.n_rows()
    );

    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_table(n: usize) -> Table {
        let rows = (0..n).map(|i| vec![i.to_string(), format!("row {i}")]).collect();
        Table::new(vec!["target".into(), "text".into()], rows).unwrap()
    }

    #[test]
    fn test_split_sizes_round_up_for_test() {
        let table = numbered_table(10);
        let (train, test) = split(&table, 0.3, 2);
        assert_eq!(test.n_rows(), 3);
        assert_eq!(train.n_rows(), 7);
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let table = numbered_table(50);
        let (train, test) = split(&table, 0.2, 42);

        let mut ids: Vec<&str> = train
            .rows()
            .iter()
            .chain(test.rows().iter())
            .map(|row| row[0].as_str())
            .collect();
        ids.sort_unstable_by_key(|s| s.parse::<usize>().unwrap());
        ids.dedup();
        assert_eq!(ids.len(), 50, "no row may be lost or duplicated");
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let table = numbered_table(20);
        let (train_a, test_a) = split(&table, 0.25, 2);
        let (train_b, test_b) = split(&table, 0.25, 2);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
    }

    #[test]
    fn test_different_seeds_shuffle_differently() {
        let table = numbered_table(100);
        let (train_a, _) = split(&table, 0.2, 1);
        let (train_b, _) = split(&table, 0.2, 2);
        assert_ne!(train_a, train_b);
    }

    #[test]
    fn test_empty_input() {
        let table = numbered_table(0);
        let (train, test) = split(&table, 0.3, 2);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
