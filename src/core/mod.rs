pub mod cache;
pub mod dates;
pub mod lookup;
pub mod normalize;
pub mod resolver;
pub mod studies;

pub use crate::domain::model::{DevotionBlock, DevotionContent, Mode, Study, VerseEntry};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
