pub mod editor;
pub mod generate;
pub mod list;
pub mod shared;
pub mod viewer;

pub use editor::EditorView;
pub use generate::GenerateView;
pub use list::DocsListView;
pub use viewer::ViewerView;
