mod collections;
mod span;

pub use collections::FxDashMap;
pub use span::Span;
