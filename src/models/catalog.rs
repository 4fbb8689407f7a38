// file: src/models/catalog.rs
// description: ordered collection of named datasets
// reference: internal data structures

use super::dataset::{Dataset, Row};
use serde::{Deserialize, Serialize};

/// Datasets keyed by name, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    datasets: Vec<Dataset>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dataset; a dataset with the same name is replaced in place.
    pub fn insert(&mut self, dataset: Dataset) {
        match self.datasets.iter_mut().find(|d| d.name == dataset.name) {
            Some(existing) => *existing = dataset,
            None => self.datasets.push(dataset),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    /// Every row paired with its dataset name and index, datasets first.
    pub fn rows(&self) -> impl Iterator<Item = (&str, usize, &Row)> {
        self.datasets.iter().flat_map(|dataset| {
            dataset
                .rows
                .iter()
                .enumerate()
                .map(move |(index, row)| (dataset.name.as_str(), index, row))
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn total_rows(&self) -> usize {
        self.datasets.iter().map(Dataset::len).sum()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl FromIterator<Dataset> for Catalog {
    fn from_iter<I: IntoIterator<Item = Dataset>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for dataset in iter {
            catalog.insert(dataset);
        }
        catalog
    }
}

impl IntoIterator for Catalog {
    type Item = Dataset;
    type IntoIter = std::vec::IntoIter<Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.datasets.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(name: &str, rows: usize) -> Dataset {
        Dataset::from_records(
            name,
            vec!["A".to_string()],
            (0..rows).map(|i| vec![i.to_string()]).collect(),
        )
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let catalog: Catalog = vec![dataset("b", 1), dataset("a", 2)].into_iter().collect();
        assert_eq!(catalog.names(), vec!["b", "a"]);
        assert_eq!(catalog.total_rows(), 3);
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut catalog = Catalog::new();
        catalog.insert(dataset("a", 1));
        catalog.insert(dataset("b", 1));
        catalog.insert(dataset("a", 5));

        assert_eq!(catalog.names(), vec!["a", "b"]);
        assert_eq!(catalog.get("a").map(Dataset::len), Some(5));
    }

    #[test]
    fn test_rows_walk_datasets_in_order() {
        let catalog: Catalog = vec![dataset("x", 2), dataset("y", 1)].into_iter().collect();
        let seen: Vec<(&str, usize)> = catalog.rows().map(|(name, i, _)| (name, i)).collect();
        assert_eq!(seen, vec![("x", 0), ("x", 1), ("y", 0)]);
    }
}
