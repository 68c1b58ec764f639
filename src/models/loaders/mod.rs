pub mod list_loader;
pub mod table_loader;

pub use list_loader::{load_correction_index, load_recognized_names, read_lines};
pub use table_loader::{load_comic_table, write_comic_table, TableLayout};
