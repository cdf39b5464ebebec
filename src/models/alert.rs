use serde::{Deserialize, Serialize};

/// Severity of an alert banner; maps onto the toolkit's `alert-*` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            // the toolkit spells the error banner "danger"
            "error" | "danger" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// CSS class suffix used when rendering the banner.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Error => "danger",
            other => other.to_str(),
        }
    }
}

/// An alert as the client sees it in a rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: String,
    pub kind: Option<AlertKind>,
    pub title: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::AlertKind;

    #[test]
    fn danger_class_reads_back_as_error() {
        let kind = AlertKind::Error;
        assert_eq!(AlertKind::from_str(kind.css_class()), Some(AlertKind::Error));
    }

    #[test]
    fn unknown_kind_is_none() {
        assert_eq!(AlertKind::from_str("dismissible"), None);
    }
}
