mod unicity_tracker;
mod validation_engine;


pub use unicity_tracker::UniquenessTracker;
pub use validation_engine::ValidationEngine;
