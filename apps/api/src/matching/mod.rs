// Match scoring and the catalog query engine.
// Scoring and querying are pure; handlers load preferences and hand them in.

pub mod handlers;
pub mod query;
pub mod salary;
pub mod scorer;
