use std::sync::Arc;

use pyo3::exceptions::PyIOError;
use pyo3::prelude::*;
use tracing::error;

use toponym_core::error::GazetteerUnavailable;
use toponym_core::gazetteer::{Gazetteer, GazetteerSource};
use toponym_core::suggest::{suggest, suggest_from_source};

#[pyclass(name = "Gazetteer")]
struct GazetteerProxy {
    _gaz: Arc<Gazetteer>,
}

#[pymethods]
impl GazetteerProxy {
    fn suggest(&self, py: Python, location_name: Option<String>) -> PyResult<Vec<String>> {
        let gaz = Arc::clone(&self._gaz);
        let suggestions = py.allow_threads(move || suggest(location_name.as_deref(), &gaz));
        Ok(suggestions)
    }

    #[getter]
    fn size(&self) -> usize {
        self._gaz.len()
    }
}

fn unavailable(err: GazetteerUnavailable) -> PyErr {
    error!("{err}");
    PyIOError::new_err(err.to_string())
}

/// Loads the reference sheet once per process and wraps it for querying.
#[pyfunction]
fn load(path: String, column: Option<String>) -> PyResult<GazetteerProxy> {
    let source = match column {
        Some(column) => GazetteerSource::new(path).with_column(column),
        None => GazetteerSource::new(path),
    };
    let db = Gazetteer::load(&source).map_err(unavailable)?;
    Ok(GazetteerProxy { _gaz: db })
}

/// Suggests up to 25 canonical names for an OCR'd location name.
///
/// Placeholder and non-alphabetic input never touches the file.
#[pyfunction]
fn suggest_location(
    py: Python,
    location_name: Option<String>,
    path: String,
) -> PyResult<Vec<String>> {
    let source = GazetteerSource::new(path);
    py.allow_threads(move || suggest_from_source(location_name.as_deref(), &source))
        .map_err(unavailable)
}

/// A Python module implemented in Rust.
#[pymodule]
fn toponym(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<GazetteerProxy>()?;
    m.add_function(wrap_pyfunction!(load, m)?)?;
    m.add_function(wrap_pyfunction!(suggest_location, m)?)?;
    Ok(())
}
