pub mod catalogue;
pub mod error;
pub mod filter;
pub mod matrix;
pub mod persistence;
pub mod protocol;
pub mod ranking;
pub mod recommender;
pub mod scoring;
pub mod server;
pub mod transport;
pub mod types;

pub use catalogue::CatalogueStore;
pub use error::RecommenderError;
pub use filter::SectorFilter;
pub use matrix::SimilarityMatrix;
pub use recommender::RecommenderEngine;
pub use types::{Property, Recommendation, WeightTriple};
