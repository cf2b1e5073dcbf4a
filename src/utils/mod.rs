//! Utility helpers: JSON serializers and small file helpers.
pub mod serialization;

pub use serialization::FileUtils;
pub use serialization::JsonSerializer;
pub use serialization::PrettyJsonSerializer;
pub use serialization::Serializer;
