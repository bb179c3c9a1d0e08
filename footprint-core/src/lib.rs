pub mod aggregation;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod form;
pub mod insight;
pub mod validation;
