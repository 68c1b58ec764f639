pub mod comic_ctx;
pub mod comic_flow;

pub use comic_ctx::ComicCtx;
pub use comic_flow::ComicFlow;
