use crate::document::{LiturgicalColor, LiturgyDocument};
use crate::normalize::{self, field, MalformedDocument};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four reading sections, in liturgical order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    FirstReading,
    Psalm,
    SecondReading,
    Gospel,
}

impl SectionKind {
    /// All sections in the order they are read.
    pub const ORDER: [SectionKind; 4] = [
        SectionKind::FirstReading,
        SectionKind::Psalm,
        SectionKind::SecondReading,
        SectionKind::Gospel,
    ];

    /// Key of the section inside `leituras` on the wire.
    pub fn wire_key(self) -> &'static str {
        match self {
            SectionKind::FirstReading => "primeiraLeitura",
            SectionKind::Psalm => "salmo",
            SectionKind::SecondReading => "segundaLeitura",
            SectionKind::Gospel => "evangelho",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::FirstReading => "Primeira Leitura",
            SectionKind::Psalm => "Salmo Responsorial",
            SectionKind::SecondReading => "Segunda Leitura",
            SectionKind::Gospel => "Evangelho",
        }
    }

    /// Psalm items are headed by their refrain instead of their title.
    pub fn uses_refrain(self) -> bool {
        matches!(self, SectionKind::Psalm)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized unit of display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingBlock {
    pub section: SectionKind,
    pub reference: String,
    /// Refrain for the psalm, title for every other section.
    pub heading: String,
    pub body: String,
}

/// Header fields plus the normalized block sequence for one day.
///
/// This is what a render cycle consumes; it holds no reference to the
/// document it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiturgyPage {
    pub date: String,
    pub liturgical_day: String,
    pub liturgical_color: LiturgicalColor,
    pub blocks: Vec<ReadingBlock>,
}

impl LiturgyPage {
    /// Validate the header and normalize the readings of a document.
    pub fn from_document(doc: &LiturgyDocument) -> Result<Self, MalformedDocument> {
        let date = field(&doc.date, "", "data")?;
        let liturgical_day = field(&doc.liturgical_day, "", "liturgia")?;
        let color = field(&doc.liturgical_color, "", "cor")?;
        let blocks = normalize::normalize(doc)?;

        Ok(Self {
            date,
            liturgical_day,
            liturgical_color: LiturgicalColor::from_label(&color),
            blocks,
        })
    }

    /// Blocks that came from the given section, in order.
    pub fn section_blocks(&self, kind: SectionKind) -> impl Iterator<Item = &ReadingBlock> {
        self.blocks.iter().filter(move |b| b.section == kind)
    }
}
