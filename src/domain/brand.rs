// src/domain/brand.rs

/// Ordered mapping from a dealership-name substring to a brand label.
///
/// Order matters: the first needle contained in a name wins. Names matching
/// no needle get the catch-all label.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandMap {
    entries: Vec<(String, String)>,
    catch_all: String,
}

impl BrandMap {
    pub fn new(entries: Vec<(String, String)>, catch_all: impl Into<String>) -> Self {
        Self {
            entries,
            catch_all: catch_all.into(),
        }
    }

    /// Every label a row can end up with: configured labels in order
    /// (deduplicated), then the catch-all.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for (_, label) in &self.entries {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        if !labels.iter().any(|l| l == &self.catch_all) {
            labels.push(self.catch_all.clone());
        }
        labels
    }

    pub fn contains_label(&self, label: &str) -> bool {
        label == self.catch_all || self.entries.iter().any(|(_, l)| l == label)
    }
}

impl Default for BrandMap {
    fn default() -> Self {
        Self::new(
            vec![
                ("Audi".to_string(), "Audi".to_string()),
                ("BMW".to_string(), "BMW".to_string()),
            ],
            "M-Benz",
        )
    }
}

/// Classify a dealership name. Pure and total.
pub fn classify_brand<'a>(name: &str, brands: &'a BrandMap) -> &'a str {
    brands
        .entries
        .iter()
        .find(|(needle, _)| name.contains(needle.as_str()))
        .map(|(_, label)| label.as_str())
        .unwrap_or(&brands.catch_all)
}

/// Parse a `needle=Label` pair as given on the command line.
/// A bare `Label` uses the label as its own needle.
pub fn parse_brand_entry(raw: &str) -> Result<(String, String), String> {
    let (needle, label) = match raw.split_once('=') {
        Some((needle, label)) => (needle.trim(), label.trim()),
        None => (raw.trim(), raw.trim()),
    };

    if needle.is_empty() || label.is_empty() {
        return Err(format!("invalid brand entry '{raw}', expected needle=Label"));
    }

    Ok((needle.to_string(), label.to_string()))
}
