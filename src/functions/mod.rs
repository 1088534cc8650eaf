//! The serverless functions, one per external service

pub mod ocr;
pub mod resizer;
pub mod sentiment;
pub mod sports;
pub mod weather;

use crate::clients::ObjectStore;
use crate::clients::storage::{bare_filename, list_all};
use crate::errors::FunctionError;

/// Resource id that lists the bucket images instead of fetching one.
pub const IMAGE_LIST: &str = "image-list";

/// Resource id that returns today's schedule instead of one game.
pub const GAME_LIST: &str = "game-list";

pub use ocr::OcrFunction;
pub use resizer::ImageFunction;
pub use sentiment::OcrSentimentFunction;
pub use sports::SportsFunction;
pub use weather::WeatherFunction;

/// Bare filenames of every object under `prefix`.
pub(crate) async fn list_image_names<S>(
    store: &S,
    prefix: &str,
) -> Result<Vec<String>, FunctionError>
where
    S: ObjectStore + ?Sized,
{
    let keys = list_all(store, prefix).await?;
    Ok(keys
        .iter()
        .filter_map(|key| bare_filename(key))
        .map(str::to_string)
        .collect())
}
