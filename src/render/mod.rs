//! Rendering: column descriptors, the paginated list, view models,
//! templates and the region-diffing surface

pub mod column;
pub mod list;
pub mod surface;
pub mod templates;
pub mod view;

pub use column::{Cell, Column, Tone};
pub use list::{EMPTY_MESSAGE, ListView, PaginatedList};
pub use surface::{Patch, Surface};
pub use templates::Templates;
pub use view::{ButtonView, DetailView, FilterFormView, Notice, ScreenView};
