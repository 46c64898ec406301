pub mod subconverter;

pub use subconverter::{convert_content, convert_source, fetch_source, subconverter, ConvertResult};
