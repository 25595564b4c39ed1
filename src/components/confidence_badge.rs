use leptos::prelude::*;

/// Confidence band of a pre-formatted percentage such as `"87%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl ConfidenceLevel {
    pub fn from_display(confidence: &str) -> Self {
        let digits = confidence.trim().trim_end_matches('%').trim();
        match digits.parse::<f32>() {
            Ok(pct) if pct >= 70.0 => Self::High,
            Ok(pct) if pct >= 40.0 => Self::Medium,
            Ok(_) => Self::Low,
            Err(_) => Self::Unknown,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::High => "confidence-badge confidence-high",
            Self::Medium => "confidence-badge confidence-medium",
            Self::Low => "confidence-badge confidence-low",
            Self::Unknown => "confidence-badge confidence-unknown",
        }
    }
}

#[component]
pub fn ConfidenceBadge(
    /// Pre-formatted percentage, e.g. "91%"
    #[prop(into)]
    confidence: String,
) -> impl IntoView {
    let class = ConfidenceLevel::from_display(&confidence).class();
    let label = format!("{} Confidence", confidence);

    view! { <span class=class>{label}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_display("91%"), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_display("70%"), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_display("45%"), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_display("0%"), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_display("--%"), ConfidenceLevel::Unknown);
    }
}
