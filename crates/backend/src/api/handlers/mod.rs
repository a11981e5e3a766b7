// Aggregate handlers
pub mod a001_jewellery;

// UseCase handlers
pub mod usecases;
