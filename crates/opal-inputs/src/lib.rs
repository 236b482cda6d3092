//! Source files as salsa inputs.
//!
//! A [`File`] is the mutation boundary of a session: editors overwrite its
//! text through a setter, and everything derived from it is recomputed on
//! demand.

pub use line_index::{LineCol, LineIndex};
use text_size::TextSize;

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

impl File {
    /// Zero-based line and column of `offset`, resolved through the
    /// memoized line index.
    pub fn line_col(self, db: &dyn salsa::Database, offset: TextSize) -> LineCol {
        self.line_index(db).line_col(offset)
    }
}
