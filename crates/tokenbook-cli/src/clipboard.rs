/// Copy text to the system clipboard. Failures are logged, not returned.
pub fn copy(text: &str) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => tracing::debug!(chars = text.chars().count(), "copied to clipboard"),
        Err(e) => tracing::warn!("Failed to copy to clipboard: {e}"),
    }
}
