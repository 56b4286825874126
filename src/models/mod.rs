pub mod journey;
pub mod place;
pub mod trip;
