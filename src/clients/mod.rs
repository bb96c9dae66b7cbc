pub mod ai;
pub mod news;

pub use ai::{AiClient, TogetherClient};
pub use news::NewsClient;
