mod composite_file_loader;
mod pdf_adapter;
mod plain_text_adapter;

pub use composite_file_loader::CompositeFileLoader;
pub use pdf_adapter::{PageText, PdfAdapter, join_page_texts};
pub use plain_text_adapter::PlainTextAdapter;
