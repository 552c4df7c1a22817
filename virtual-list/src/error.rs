/// Rejected [`crate::VirtualListOptions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// Buffer sizing divides the viewport by the minimum row height.
    #[error("min_row_height must be greater than zero")]
    ZeroMinRowHeight,

    /// A zero threshold can never be undercut, so the bottom would never be reached.
    #[error("bottom_threshold must be greater than zero")]
    ZeroBottomThreshold,
}
