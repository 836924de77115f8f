//! CSV catalog loader.
//!
//! # Rules CSV
//!
//! One row per rule, in catalog order.
//!
//! ```csv
//! rule_id,category,inputs,output_kind,output_count,output_data
//! 0,1,10+11,20,1,
//! 1,1,#3+11,21,2,
//! 2,2,=20+12,20,1,long=1
//! ```
//!
//! **`inputs`** is a `+`-separated list, one entry per unit consumed:
//!
//! | Entry    | Meaning                                   |
//! |----------|-------------------------------------------|
//! | *u32*    | `Ingredient::Kind(ItemKind(n))`           |
//! | `=`*u32* | `Ingredient::Plain(ItemKind(n))`          |
//! | `#`*u16* | `Ingredient::Tag(TagId(n))`               |
//! | `a|b|c`  | `Ingredient::AnyOf([a, b, c])`            |
//!
//! **`output_data`** is optional (the column may be left out entirely):
//! `key=value` pairs separated by `;`, attached to the output stack as
//! `ItemData`.  A modifier rule such as rule 2 above needs it, or its output
//! would be indistinguishable from the plain state it consumed.
//!
//! # Tags CSV
//!
//! ```csv
//! tag_id,kind
//! 3,10
//! 3,13
//! ```

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cl_core::{CategoryId, ItemKind, RuleId, TagId};
use cl_inventory::{ItemData, ItemStack};

use crate::{Catalog, CraftError, CraftResult, Ingredient, TagTable, TransformationRule};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RuleRecord {
    rule_id:      u32,
    category:     u16,
    inputs:       String,
    output_kind:  u32,
    output_count: u32,
    #[serde(default)]
    output_data:  String,
}

#[derive(Deserialize)]
struct TagRecord {
    tag_id: u16,
    kind:   u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a catalog from a rules file and an optional tags file.
pub fn load_catalog_csv(rules: &Path, tags: Option<&Path>) -> CraftResult<Catalog> {
    let rules = load_rules_reader(std::fs::File::open(rules)?)?;
    let tags = match tags {
        Some(path) => load_tags_reader(std::fs::File::open(path)?)?,
        None => TagTable::new(),
    };
    Ok(Catalog::new(rules, tags))
}

/// Like [`load_catalog_csv`] for the rules half, from any `Read` source.
pub fn load_rules_reader<R: Read>(reader: R) -> CraftResult<Vec<TransformationRule>> {
    // Flexible so rows may leave off a trailing empty `output_data`.
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut seen: BTreeSet<u32> = BTreeSet::new();
    let mut rules = Vec::new();

    for (line, result) in csv_reader.deserialize::<RuleRecord>().enumerate() {
        let row = result.map_err(|e| CraftError::Parse(e.to_string()))?;
        if !seen.insert(row.rule_id) {
            return Err(CraftError::Parse(format!("row {}: duplicate rule_id {}", line + 1, row.rule_id)));
        }
        if row.output_count == 0 {
            return Err(CraftError::Parse(format!("row {}: output_count must be at least 1", line + 1)));
        }
        let inputs = row
            .inputs
            .split('+')
            .map(parse_ingredient)
            .collect::<CraftResult<Vec<_>>>()
            .map_err(|e| CraftError::Parse(format!("row {}: {e}", line + 1)))?;

        let mut output = ItemStack::new(ItemKind(row.output_kind), row.output_count);
        if let Some(data) = parse_data(&row.output_data)
            .map_err(|e| CraftError::Parse(format!("row {}: {e}", line + 1)))?
        {
            output = output.with_data(data);
        }

        rules.push(TransformationRule::new(
            RuleId(row.rule_id),
            CategoryId(row.category),
            inputs,
            output,
        ));
    }
    Ok(rules)
}

/// Load tag membership rows from any `Read` source.
pub fn load_tags_reader<R: Read>(reader: R) -> CraftResult<TagTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut tags = TagTable::new();
    for result in csv_reader.deserialize::<TagRecord>() {
        let row = result.map_err(|e| CraftError::Parse(e.to_string()))?;
        tags.insert(TagId(row.tag_id), ItemKind(row.kind));
    }
    Ok(tags)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_ingredient(s: &str) -> CraftResult<Ingredient> {
    let s = s.trim();
    if let Some(tag) = s.strip_prefix('#') {
        return Ok(Ingredient::Tag(TagId(parse_num(tag)?)));
    }
    if let Some(kind) = s.strip_prefix('=') {
        return Ok(Ingredient::Plain(ItemKind(parse_num(kind)?)));
    }
    if s.contains('|') {
        let kinds = s
            .split('|')
            .map(|k| parse_num(k).map(ItemKind))
            .collect::<CraftResult<Vec<_>>>()?;
        return Ok(Ingredient::AnyOf(kinds));
    }
    Ok(Ingredient::Kind(ItemKind(parse_num(s)?)))
}

/// `key=value;key=value`.  Empty means no data.
fn parse_data(s: &str) -> CraftResult<Option<ItemData>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let mut data = ItemData::default();
    for pair in s.split(';').filter(|p| !p.trim().is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CraftError::Parse(format!("invalid output data '{pair}'")))?;
        let value: i32 = value
            .trim()
            .parse()
            .map_err(|_| CraftError::Parse(format!("invalid output data value '{pair}'")))?;
        data = data.with(key.trim(), value);
    }
    Ok(Some(data))
}

fn parse_num<T: std::str::FromStr>(s: &str) -> CraftResult<T> {
    s.trim()
        .parse()
        .map_err(|_| CraftError::Parse(format!("invalid ingredient '{s}'")))
}
