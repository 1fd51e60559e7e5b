//! Terpene annotation
//!
//! Attaches static descriptive metadata to the strongest terpenes of a
//! profile for display.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

/// How many of the strongest compounds are considered
pub const ANNOTATION_TOP_K: usize = 5;

/// Static description of one terpene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerpeneInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effects: &'static [&'static str],
    pub aroma: &'static str,
}

pub static TERPENE_TABLE: &[TerpeneInfo] = &[
    TerpeneInfo {
        id: "myrcene",
        name: "Myrcene",
        description: "The most common terpene in cannabis, known for its sedative and relaxing effects. Found in hops, mango, and lemongrass.",
        effects: &["relaxation", "sedation", "muscle relaxation", "pain relief"],
        aroma: "Earthy, musky, clove-like",
    },
    TerpeneInfo {
        id: "caryophyllene",
        name: "Caryophyllene",
        description: "A terpene that also binds to CB2 receptors, acting like a cannabinoid. Known for anti-inflammatory properties.",
        effects: &["anti-inflammatory", "pain relief", "stress relief", "anxiety reduction"],
        aroma: "Spicy, peppery, woody",
    },
    TerpeneInfo {
        id: "limonene",
        name: "Limonene",
        description: "A citrus terpene associated with mood elevation and stress relief. Also found in citrus peel and peppermint.",
        effects: &["mood elevation", "stress relief", "anxiety reduction", "antidepressant"],
        aroma: "Citrus, lemon, orange",
    },
    TerpeneInfo {
        id: "pinene",
        name: "Pinene",
        description: "A pine-scented terpene associated with alertness and memory retention. Found in pine needles and rosemary.",
        effects: &["alertness", "memory retention", "bronchodilator", "anti-inflammatory"],
        aroma: "Pine, fresh, woody",
    },
    TerpeneInfo {
        id: "linalool",
        name: "Linalool",
        description: "A floral terpene with calming and sedative properties. Found in lavender and jasmine.",
        effects: &["calming", "sedation", "anxiety relief", "antidepressant"],
        aroma: "Floral, lavender, sweet",
    },
    TerpeneInfo {
        id: "humulene",
        name: "Humulene",
        description: "An earthy terpene with appetite-suppressing and anti-inflammatory properties. Found in hops and sage.",
        effects: &["appetite suppression", "anti-inflammatory", "antibacterial", "pain relief"],
        aroma: "Earthy, woody, hoppy",
    },
    TerpeneInfo {
        id: "terpinolene",
        name: "Terpinolene",
        description: "A complex terpene with uplifting and energizing effects. Found in nutmeg, tea tree, and apples.",
        effects: &["uplifting", "energizing", "antioxidant", "sedative in high doses"],
        aroma: "Floral, herbal, citrus",
    },
    TerpeneInfo {
        id: "ocimene",
        name: "Ocimene",
        description: "A sweet, herbal terpene with uplifting and energizing properties. Found in mint, parsley, and orchids.",
        effects: &["uplifting", "energizing", "antiviral", "decongestant"],
        aroma: "Sweet, herbal, woody",
    },
    TerpeneInfo {
        id: "terpineol",
        name: "Terpineol",
        description: "A floral terpene with relaxing and sedative effects. Found in lilacs and pine trees.",
        effects: &["relaxation", "sedation", "antioxidant", "antimicrobial"],
        aroma: "Floral, lilac, pine",
    },
];

/// Look up a table entry (case-insensitive)
pub fn terpene_info(id: &str) -> Option<&'static TerpeneInfo> {
    let id = id.trim();
    TERPENE_TABLE.iter().find(|info| info.id.eq_ignore_ascii_case(id))
}

/// A top compound with its description attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedCompound {
    pub compound_id: String,
    pub name: &'static str,
    /// Concentration as a percentage (value * 100)
    pub level_percent: f64,
    pub description: &'static str,
    pub effects: &'static [&'static str],
    pub aroma: &'static str,
}

/// Annotate the top [`ANNOTATION_TOP_K`] compounds of a compound -> value map.
///
/// Ids differing only in case are merged, keeping the larger value. Entries
/// are ranked by value descending (ties by id). Top compounds without a table
/// entry are dropped, so the output may hold fewer than five entries.
pub fn annotate<I, K>(compounds: I) -> Vec<AnnotatedCompound>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut merged: AHashMap<String, f64> = AHashMap::new();
    for (id, value) in compounds {
        let slot = merged
            .entry(id.as_ref().trim().to_lowercase())
            .or_insert(value);
        if value > *slot {
            *slot = value;
        }
    }

    let mut entries: Vec<(String, f64)> = merged.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.sort_by_key(|(_, value)| Reverse(OrderedFloat(*value)));

    entries
        .into_iter()
        .take(ANNOTATION_TOP_K)
        .filter_map(|(id, value)| {
            terpene_info(&id).map(|info| AnnotatedCompound {
                compound_id: id,
                name: info.name,
                level_percent: value * 100.0,
                description: info.description,
                effects: info.effects,
                aroma: info.aroma,
            })
        })
        .collect()
}
