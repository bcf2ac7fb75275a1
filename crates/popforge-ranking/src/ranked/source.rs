//! Ranked sources: anything that yields items most probable first.

/// A lazily pulled sequence of items in non-increasing probability order.
///
/// Exhaustion is terminal: once `pull` returns `None` it keeps returning
/// `None`.
pub trait RankedSource {
    /// The item yielded with each probability.
    type Item;

    /// Pulls the next most probable item.
    fn pull(&mut self) -> Option<(Self::Item, f64)>;
}

impl<S: RankedSource + ?Sized> RankedSource for Box<S> {
    type Item = S::Item;

    fn pull(&mut self) -> Option<(Self::Item, f64)> {
        (**self).pull()
    }
}
