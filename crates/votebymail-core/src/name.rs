use serde::{Deserialize, Serialize};

/// A voter's name as entered in separate boxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParts {
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    pub last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl NameParts {
    /// "First Middle Last Suffix", skipping absent parts.
    pub fn full_name(&self) -> String {
        let mut out = self.first.clone();
        if let Some(middle) = &self.middle {
            out.push(' ');
            out.push_str(middle);
        }
        out.push(' ');
        out.push_str(&self.last);
        if let Some(suffix) = &self.suffix {
            out.push(' ');
            out.push_str(suffix);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_missing_parts() {
        let name = NameParts {
            first: "George".into(),
            middle: None,
            last: "Washington".into(),
            suffix: None,
        };
        assert_eq!(name.full_name(), "George Washington");
    }

    #[test]
    fn full_name_with_all_parts() {
        let name = NameParts {
            first: "Martin".into(),
            middle: Some("Luther".into()),
            last: "King".into(),
            suffix: Some("Jr.".into()),
        };
        assert_eq!(name.full_name(), "Martin Luther King Jr.");
    }
}
