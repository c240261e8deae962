use std::sync::Arc;

use crate::file_system::DirectoryListing;

/// Ordered image paths of one listing. Indices here are the viewer's index space.
///
/// Cheap to clone; the viewer and the scheduler share one copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    paths: Arc<[String]>,
}

impl ImageSet {
    /// Takes the image entries of a listing, in listing order.
    pub fn from_listing(listing: &DirectoryListing) -> Self {
        listing
            .entries
            .iter()
            .filter(|e| !e.is_directory() && e.is_image)
            .map(|e| e.relative_path.clone())
            .collect::<Vec<_>>()
            .into()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }

    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.paths.iter().position(|p| p == path)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

impl From<Vec<String>> for ImageSet {
    fn from(paths: Vec<String>) -> Self {
        Self { paths: paths.into() }
    }
}
