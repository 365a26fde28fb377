// Content assembly: fixed tables, slot-filling, stylistic jitter and the
// injectable synthesis seam.

mod assembler;
mod slots;
mod style;
mod synthesis;
mod tables;

pub use assembler::{ContentAssembler, NO_CTA_NOTE, enforce_length};
pub use slots::{SlotFiller, SlotValues};
pub(crate) use style::replace_words;
pub use style::StyleJitter;
pub use synthesis::{TemplateSynthesizer, TextSynthesizer};
pub use tables::{ContentTables, LongformSection};
