use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The daily liturgy document as served by the liturgy endpoint.
///
/// Field names follow the wire format (Portuguese keys). Every field is
/// optional at this level; presence is checked once, during normalization,
/// so that a missing field surfaces as a precise path instead of a serde
/// error somewhere in the middle of the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiturgyDocument {
    /// Date of the liturgy, `dd/mm/yyyy`.
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Name of the liturgical day (e.g., "Sexta-feira da 28ª Semana do Tempo Comum").
    #[serde(rename = "liturgia", default, skip_serializing_if = "Option::is_none")]
    pub liturgical_day: Option<String>,
    /// Liturgical color label (e.g., "Verde").
    #[serde(rename = "cor", default, skip_serializing_if = "Option::is_none")]
    pub liturgical_color: Option<String>,
    #[serde(rename = "leituras", default)]
    pub readings: Readings,
}

/// The four reading sections of a day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Readings {
    #[serde(rename = "primeiraLeitura", default, skip_serializing_if = "Option::is_none")]
    pub first_reading: Option<SectionValue>,
    #[serde(rename = "salmo", default, skip_serializing_if = "Option::is_none")]
    pub psalm: Option<SectionValue>,
    /// Absent on weekdays and most memorials.
    #[serde(rename = "segundaLeitura", default, skip_serializing_if = "Option::is_none")]
    pub second_reading: Option<SectionValue>,
    #[serde(rename = "evangelho", default, skip_serializing_if = "Option::is_none")]
    pub gospel: Option<SectionValue>,
}

/// A reading section: either one item or a list of items.
///
/// The psalm is usually a list; older payloads send the other sections as
/// single objects while newer ones send every section as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SectionValue {
    Many(Vec<ReadingItem>),
    Single(ReadingItem),
}

/// One reading as it appears on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReadingItem {
    /// Biblical reference (e.g., "Is 1,1-4").
    #[serde(rename = "referencia", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Response line; only meaningful for the psalm.
    #[serde(rename = "refrao", default, skip_serializing_if = "Option::is_none")]
    pub refrain: Option<String>,
    #[serde(rename = "texto", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SectionValue {
    /// Items of the section in source order. A single item is a list of one.
    pub fn items(&self) -> &[ReadingItem] {
        match self {
            SectionValue::Many(items) => items,
            SectionValue::Single(item) => std::slice::from_ref(item),
        }
    }
}

impl ReadingItem {
    /// True when the item carries no content at all (`{}` or all-blank fields).
    pub fn is_empty(&self) -> bool {
        [&self.reference, &self.title, &self.refrain, &self.text]
            .iter()
            .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

impl LiturgyDocument {
    /// Parse the `dd/mm/yyyy` date, if present and well formed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%d/%m/%Y").ok())
    }

    /// Typed liturgical color, if present.
    pub fn color(&self) -> Option<LiturgicalColor> {
        self.liturgical_color.as_deref().map(LiturgicalColor::from_label)
    }
}

/// Liturgical color of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiturgicalColor {
    Verde,
    Vermelho,
    Roxo,
    Branco,
    Rosa,
    Preto,
    /// Catch-all for labels not in the enum, kept verbatim.
    Other(String),
}

impl LiturgicalColor {
    /// Classify a color label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "verde" => Self::Verde,
            "vermelho" => Self::Vermelho,
            "roxo" => Self::Roxo,
            "branco" => Self::Branco,
            "rosa" => Self::Rosa,
            "preto" => Self::Preto,
            _ => Self::Other(label.trim().to_string()),
        }
    }
}

impl fmt::Display for LiturgicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Verde => "Verde",
            Self::Vermelho => "Vermelho",
            Self::Roxo => "Roxo",
            Self::Branco => "Branco",
            Self::Rosa => "Rosa",
            Self::Preto => "Preto",
            Self::Other(s) => s,
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": "16/10/2026",
        "liturgia": "Sexta-feira da 28ª Semana do Tempo Comum",
        "cor": "Verde",
        "oracoes": { "coleta": "ignored" },
        "leituras": {
            "primeiraLeitura": [{ "referencia": "Ef 1,11-14", "titulo": "Leitura da Carta aos Efésios", "texto": "Irmãos..." }],
            "salmo": [{ "referencia": "Sl 32", "refrao": "Feliz o povo", "texto": "Ó justos..." }],
            "segundaLeitura": [],
            "evangelho": [{ "referencia": "Lc 12,1-7", "titulo": "Proclamação do Evangelho", "texto": "Naquele tempo..." }]
        }
    }"#;

    #[test]
    fn test_parse_live_shape() {
        let doc: LiturgyDocument = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(doc.date.as_deref(), Some("16/10/2026"));
        assert_eq!(doc.color(), Some(LiturgicalColor::Verde));
        let psalm = doc.readings.psalm.as_ref().unwrap();
        assert_eq!(psalm.items().len(), 1);
        assert_eq!(psalm.items()[0].refrain.as_deref(), Some("Feliz o povo"));
        assert_eq!(doc.readings.second_reading, Some(SectionValue::Many(vec![])));
    }

    #[test]
    fn test_single_object_section() {
        let json = r#"{ "leituras": { "primeiraLeitura": { "referencia": "Is 1,1", "titulo": "T1", "texto": "x" } } }"#;
        let doc: LiturgyDocument = serde_json::from_str(json).unwrap();
        match doc.readings.first_reading.as_ref().unwrap() {
            SectionValue::Single(item) => assert_eq!(item.title.as_deref(), Some("T1")),
            other => panic!("expected single item, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_object_and_null() {
        let json = r#"{ "leituras": { "segundaLeitura": {}, "evangelho": null } }"#;
        let doc: LiturgyDocument = serde_json::from_str(json).unwrap();
        let second = doc.readings.second_reading.as_ref().unwrap();
        assert!(second.items()[0].is_empty());
        assert!(doc.readings.gospel.is_none());
    }

    #[test]
    fn test_blank_fields_are_empty() {
        let item = ReadingItem {
            reference: Some("  ".into()),
            text: Some(String::new()),
            ..Default::default()
        };
        assert!(item.is_empty());
    }

    #[test]
    fn test_parsed_date() {
        let doc = LiturgyDocument {
            date: Some("16/10/2026".into()),
            ..Default::default()
        };
        assert_eq!(doc.parsed_date(), NaiveDate::from_ymd_opt(2026, 10, 16));

        let bad = LiturgyDocument {
            date: Some("2026-10-16".into()),
            ..Default::default()
        };
        assert!(bad.parsed_date().is_none());
    }

    #[test]
    fn test_color_labels() {
        assert_eq!(LiturgicalColor::from_label(" ROXO "), LiturgicalColor::Roxo);
        let other = LiturgicalColor::from_label("Dourado");
        assert_eq!(other, LiturgicalColor::Other("Dourado".into()));
        assert_eq!(other.to_string(), "Dourado");
    }
}
