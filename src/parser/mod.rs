pub mod blocks;
pub mod fields;
pub mod record;

pub use blocks::segment;
pub use fields::parse_block;
pub use record::Record;
