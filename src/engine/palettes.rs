use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::engine::color::{rgb_to_lab, LabColor, RgbColor};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("palette has no valid colours ({rejected} entries rejected)")]
    NoValidEntries { rejected: usize },
}

/// One palette record as supplied by the host, before validation.
///
/// Keys follow the paint-range JSON the matcher was written for (`Id`, `Name`,
/// `Value`, ...). Unknown keys are kept in `extra` and passed through untouched.
///
/// A known key whose value is not a string never fails the record: it is kept
/// in `extra` under its own key instead. Two normalizations apply:
/// a numeric `Id` becomes its decimal string, and a built entry writes its
/// colour back as `#RRGGBB` whatever form `Value` was given in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", from = "BTreeMap<String, Value>")]
pub struct RawEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hex colour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Removes `key` and returns its text. Values of any other type go to `leftovers`.
fn take_text(
    fields: &mut BTreeMap<String, Value>,
    leftovers: &mut Vec<(String, Value)>,
    key: &str,
) -> Option<String> {
    match fields.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            leftovers.push((key.to_string(), other));
            None
        }
    }
}

impl From<BTreeMap<String, Value>> for RawEntry {
    fn from(mut fields: BTreeMap<String, Value>) -> Self {
        let id = match fields.remove("Id") {
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => {
                fields.insert("Id".to_string(), other);
                None
            }
            None => None,
        };
        let mut leftovers = Vec::new();
        let id = id.or_else(|| take_text(&mut fields, &mut leftovers, "Id"));
        let name = take_text(&mut fields, &mut leftovers, "Name");
        let value = take_text(&mut fields, &mut leftovers, "Value");
        let kind = take_text(&mut fields, &mut leftovers, "Type");
        let layer = take_text(&mut fields, &mut leftovers, "Layer");
        let shade = take_text(&mut fields, &mut leftovers, "Shade");
        let highlight = take_text(&mut fields, &mut leftovers, "Highlight");
        let url = take_text(&mut fields, &mut leftovers, "Url");
        fields.extend(leftovers);
        Self {
            id,
            name,
            value,
            kind,
            layer,
            shade,
            highlight,
            url,
            extra: fields,
        }
    }
}

/// Descriptive fields carried alongside a palette colour. Never read by the matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntryDetails {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaletteEntry {
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(rename = "Value")]
    color: RgbColor,
    #[serde(flatten)]
    details: EntryDetails,
    #[serde(skip)]
    lab: LabColor,
}

impl PaletteEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: RgbColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            details: EntryDetails::default(),
            lab: rgb_to_lab(color),
        }
    }

    pub fn with_details(mut self, details: EntryDetails) -> Self {
        self.details = details;
        self
    }

    /// Same entry with another colour; the cached Lab value follows.
    pub fn with_color(mut self, color: RgbColor) -> Self {
        self.color = color;
        self.lab = rgb_to_lab(color);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> RgbColor {
        self.color
    }

    /// Normalized `#RRGGBB`.
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn details(&self) -> &EntryDetails {
        &self.details
    }

    pub fn lab(&self) -> LabColor {
        self.lab
    }

    fn from_raw(raw: RawEntry) -> Result<Self, (Option<String>, String)> {
        let RawEntry {
            id,
            name,
            value,
            kind,
            layer,
            shade,
            highlight,
            url,
            extra,
        } = raw;
        let color = match value.as_deref().map(RgbColor::from_hex) {
            Some(Ok(color)) => color,
            Some(Err(e)) => return Err((id, e.to_string())),
            None => return Err((id, "missing colour value".to_string())),
        };
        let details = EntryDetails {
            kind,
            layer,
            shade,
            highlight,
            url,
            extra,
        };
        Ok(Self::new(id.unwrap_or_default(), name.unwrap_or_default(), color).with_details(details))
    }
}

/// Validated reference colours, in the order they were supplied.
///
/// `Palette::default()` is the empty, not-yet-loaded palette.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Builds a palette, dropping records whose colour is missing or malformed.
    /// Fails only when nothing usable is left.
    pub fn build<I>(raw_entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = RawEntry>,
    {
        let mut entries = Vec::new();
        let mut rejected = 0usize;
        for raw in raw_entries {
            match PaletteEntry::from_raw(raw) {
                Ok(entry) => entries.push(entry),
                Err((id, reason)) => {
                    rejected += 1;
                    log::trace!("skipping palette entry {:?}: {}", id.unwrap_or_default(), reason);
                }
            }
        }
        log::debug!("palette built: {} accepted, {} rejected", entries.len(), rejected);
        if entries.is_empty() {
            return Err(ValidationError::NoValidEntries { rejected });
        }
        Ok(Self { entries })
    }

    /// Palette from bare hex strings; each entry's id and name are its normalized hex.
    pub fn from_hexes(hexes: &[&str]) -> Result<Self, ValidationError> {
        Self::build(hexes.iter().map(|h| {
            let label = RgbColor::from_hex(h)
                .map(RgbColor::to_hex)
                .unwrap_or_else(|_| h.to_string());
            RawEntry {
                id: Some(label.clone()),
                name: Some(label),
                value: Some(h.to_string()),
                ..RawEntry::default()
            }
        }))
    }

    pub fn from_entries(entries: Vec<PaletteEntry>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::NoValidEntries { rejected: 0 });
        }
        Ok(Self { entries })
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    pub fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&PaletteEntry> {
        self.entries.choose(rng)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
