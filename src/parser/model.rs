//! Parsing model handle.
//!
//! The statistical parser itself is supplied by a [`ParsingEngine`]. The
//! [`ModelHandle`] loads the engine's model from the configured path on first
//! use and keeps it for its own lifetime.

use crate::error::Result;
use crate::parser::graph::DependencyGraph;
use crate::parser::record::ColumnarRecord;
use once_cell::sync::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loaded parsing model.
///
/// Implementations must tolerate concurrent `parse` calls.
pub trait ParsingModel: Send + Sync {
    /// Parses one sentence.
    fn parse(&self, record: &ColumnarRecord) -> Result<DependencyGraph>;
}

impl<F> ParsingModel for F
where
    F: Fn(&ColumnarRecord) -> Result<DependencyGraph> + Send + Sync,
{
    fn parse(&self, record: &ColumnarRecord) -> Result<DependencyGraph> {
        self(record)
    }
}

/// Builds parsing models from serialized model files.
pub trait ParsingEngine: Send + Sync {
    /// Loads the model stored at `path`.
    ///
    /// A missing or unreadable file is reported as
    /// [`SarvError::ResourceLoad`](crate::SarvError::ResourceLoad); a file the
    /// engine cannot interpret as [`SarvError::ModelLoad`](crate::SarvError::ModelLoad).
    fn load(&self, path: &Path) -> Result<Box<dyn ParsingModel>>;
}

impl<F> ParsingEngine for F
where
    F: Fn(&Path) -> Result<Box<dyn ParsingModel>> + Send + Sync,
{
    fn load(&self, path: &Path) -> Result<Box<dyn ParsingModel>> {
        self(path)
    }
}

/// Lazily loaded parsing model.
///
/// The first call to [`ModelHandle::get`] loads the model; concurrent first
/// calls block until that single load finishes. A failed load leaves the
/// handle empty, so the next call tries again.
pub struct ModelHandle {
    engine: Arc<dyn ParsingEngine>,
    path: PathBuf,
    model: OnceCell<Box<dyn ParsingModel>>,
}

impl ModelHandle {
    /// Creates an unloaded handle for the model at `path`.
    pub fn new(engine: Arc<dyn ParsingEngine>, path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            path: path.into(),
            model: OnceCell::new(),
        }
    }

    /// Returns the model path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once the model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Returns the model, loading it if necessary.
    pub fn get(&self) -> Result<&dyn ParsingModel> {
        let model = self.model.get_or_try_init(|| {
            log::info!("Loading parsing model from {}", self.path.display());
            let model = self.engine.load(&self.path)?;
            log::info!("Parsing model ready");
            Ok::<_, crate::SarvError>(model)
        })?;
        Ok(model.as_ref())
    }

    /// Parses `record`, loading the model first if necessary.
    pub fn parse(&self, record: &ColumnarRecord) -> Result<DependencyGraph> {
        self.get()?.parse(record)
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SarvError;
    use crate::parser::graph::DependencyEdge;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn chain_model(record: &ColumnarRecord) -> Result<DependencyGraph> {
        let edges = (1..=record.len())
            .map(|i| DependencyEdge::new(i - 1, i, if i == 1 { "ROOT" } else { "DEP" }))
            .collect();
        Ok(DependencyGraph::from_record(record, edges))
    }

    fn counting_engine(loads: Arc<AtomicUsize>) -> Arc<dyn ParsingEngine> {
        Arc::new(move |_path: &Path| -> Result<Box<dyn ParsingModel>> {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(chain_model))
        })
    }

    fn record() -> ColumnarRecord {
        ColumnarRecord::parse_lines(&["1\ta\t_\tN", "2\tb\t_\tV"]).unwrap()
    }

    #[test]
    fn test_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let handle = ModelHandle::new(counting_engine(loads.clone()), "model.mco");

        assert!(!handle.is_loaded());
        for _ in 0..3 {
            let graph = handle.parse(&record()).unwrap();
            assert!(graph.is_tree());
        }
        assert!(handle.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let handle = ModelHandle::new(counting_engine(loads.clone()), "model.mco");

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| handle.parse(&record()).unwrap());
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_stays_unloaded() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let engine: Arc<dyn ParsingEngine> =
            Arc::new(move |path: &Path| -> Result<Box<dyn ParsingModel>> {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(SarvError::resource(path, "No such file"))
            });
        let handle = ModelHandle::new(engine, "missing.mco");

        assert!(matches!(handle.get(), Err(SarvError::ResourceLoad { .. })));
        assert!(!handle.is_loaded());
        assert!(handle.parse(&record()).is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_corrupt_model_reported_and_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let engine: Arc<dyn ParsingEngine> =
            Arc::new(move |_path: &Path| -> Result<Box<dyn ParsingModel>> {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(SarvError::ModelLoad("corrupt model header".into()));
                }
                Ok(Box::new(chain_model))
            });
        let handle = ModelHandle::new(engine, "langModel.mco");

        match handle.parse(&record()) {
            Err(SarvError::ModelLoad(reason)) => assert!(reason.contains("corrupt")),
            other => panic!("expected a model load failure, got {:?}", other.map(|g| g.len())),
        }
        assert!(!handle.is_loaded());

        assert_eq!(handle.parse(&record()).unwrap().len(), record().len());
        assert!(handle.is_loaded());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_output() {
        let handle = ModelHandle::new(counting_engine(Arc::new(AtomicUsize::new(0))), "m.mco");
        assert!(format!("{:?}", handle).contains("loaded: false"));
    }
}
