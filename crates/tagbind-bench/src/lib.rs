mod fixtures;

pub use fixtures::collection_fixtures;
pub use fixtures::synthetic_descriptor;
pub use fixtures::CollectionFixture;
pub use fixtures::ElementQuery;
