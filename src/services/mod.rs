pub mod name_disambiguator;
pub mod panel_resolver;
pub mod quote_locator;

pub use name_disambiguator::NameDisambiguator;
pub use panel_resolver::PanelResolver;
pub use quote_locator::{locate_quotes, QuoteSpan};
