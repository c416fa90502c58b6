#[cfg(feature = "dataset-conll")]
pub mod conll;
