/// Id of a live resize subscription on a [`TextHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(pub u64);

/// The element that displays rendered ASCII art.
pub trait TextHost {
    /// Width available to the art, in pixels.
    fn container_width(&self) -> f64;

    /// Rendered width of `probe` in the element's own font, in pixels.
    fn char_width(&mut self, probe: &str) -> f64;

    /// Replace the displayed text.
    fn set_text(&mut self, text: &str);

    /// Start delivering resize notifications.
    fn subscribe_resize(&mut self) -> ResizeSubscription;

    /// Stop delivering resize notifications. Unknown ids are ignored.
    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription);
}

/// A [`TextHost`] with fixed metrics that keeps what was written to it.
///
/// Resizing is simulated by assigning [`width_px`](Self::width_px) and then
/// notifying the renderer.
#[derive(Clone, Debug, Default)]
pub struct StaticTextHost {
    /// Container width reported to the renderer.
    pub width_px: f64,
    /// Width reported for any probe string.
    pub char_width_px: f64,
    text: Option<String>,
    writes: usize,
    next_id: u64,
    subscribed: Vec<ResizeSubscription>,
}

impl StaticTextHost {
    /// Host `width_px` wide whose characters are `char_width_px` wide.
    pub fn new(width_px: f64, char_width_px: f64) -> Self {
        Self {
            width_px,
            char_width_px,
            ..Self::default()
        }
    }

    /// The most recent text, if any was written.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Number of `set_text` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Number of live resize subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribed.len()
    }
}

impl TextHost for StaticTextHost {
    fn container_width(&self) -> f64 {
        self.width_px
    }

    fn char_width(&mut self, _probe: &str) -> f64 {
        self.char_width_px
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.writes += 1;
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        self.next_id += 1;
        let sub = ResizeSubscription(self.next_id);
        self.subscribed.push(sub);
        sub
    }

    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription) {
        self.subscribed.retain(|s| *s != subscription);
    }
}
