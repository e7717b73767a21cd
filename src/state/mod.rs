/// State management module
///
/// Form state for the dashboard screens: the size-row editor, the staged
/// image with its preview lifecycle, the composed product form, and the
/// per-screen submission state.

pub mod data;
pub mod form;
pub mod image;
pub mod sizes;
pub mod submit;
