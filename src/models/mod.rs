pub mod comic;
pub mod literal;
pub mod loaders;
pub mod speaker;
pub mod vocabulary;

pub use comic::{Comic, ComicTable};
pub use loaders::{load_comic_table, load_correction_index, load_recognized_names, write_comic_table, TableLayout};
pub use speaker::{ComicResult, CorpusResult, CorpusStats, PanelClass, PanelResolution, SpeakerAssignment};
pub use vocabulary::{CorrectionIndex, RecognizedNameSet};
