// random_cat.rs - Random Image Command
// "random car" has always answered with a cat picture; the URL is sent as is.
//
// Supports:
//   - random car

use crate::error::BotError;
use crate::image::ImageSource;
use crate::messenger::{ChannelRef, Messenger};

/// Fetch failures propagate; nothing is sent for this message
pub async fn run(
    images: &dyn ImageSource,
    messenger: &dyn Messenger,
    channel: ChannelRef,
) -> Result<(), BotError> {
    let url = images.random_image_url().await?;
    log::debug!("[RANDOM_CAT] {}", url);
    messenger.send(channel, &url).await?;
    Ok(())
}
