/// Render request data model.
pub mod model;
