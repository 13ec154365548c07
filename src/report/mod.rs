// Aspect-sentiment aggregation: the report handed to presentation.

pub mod aggregator;
