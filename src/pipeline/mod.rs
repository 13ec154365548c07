// Pipeline orchestration: one review in, one analysis out.
//
// The analysis module runs a single review end to end. The batch module fans
// many reviews out across blocking threads and collects them back in order.

pub mod analysis;
pub mod batch;
