use crate::areas::repository::Repository;
use std::sync::Arc;

/// What a change model compares: a repository and the two history endpoints
///
/// The model lists the commits reachable from `destination` (default `HEAD`)
/// that are not reachable from `source` (default: none excluded).
#[derive(Debug, Clone)]
pub struct SyncData {
    repository: Arc<Repository>,
    source: Option<String>,
    destination: Option<String>,
}

impl SyncData {
    pub fn new(repository: Arc<Repository>) -> Self {
        SyncData {
            repository,
            source: None,
            destination: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn repository(&self) -> &Arc<Repository> {
        &self.repository
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}
