//! Order status and its display mapping.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Written as `pending` at checkout and advanced externally by the
/// fulfillment flow. Values this client does not recognize deserialize to
/// [`OrderStatus::Unknown`] rather than failing the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
    /// Fallback for unrecognized wire values.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Display color for this status.
    #[must_use]
    pub const fn color(self) -> StatusColor {
        match self {
            Self::Pending => StatusColor::Amber,
            Self::Processing => StatusColor::Blue,
            Self::Completed => StatusColor::Green,
            Self::Cancelled => StatusColor::Red,
            Self::Unknown => StatusColor::Gray,
        }
    }

    /// Capitalized label for display, e.g. `Pending`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Display colors for order statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusColor {
    Amber,
    Blue,
    Green,
    Red,
    Gray,
}

impl StatusColor {
    /// Hex value used by the client theme.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Amber => "#FFA000",
            Self::Blue => "#1976D2",
            Self::Green => "#2E7D32",
            Self::Red => "#D32F2F",
            Self::Gray => "#666",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(OrderStatus::Pending.color(), StatusColor::Amber);
        assert_eq!(OrderStatus::Processing.color(), StatusColor::Blue);
        assert_eq!(OrderStatus::Completed.color(), StatusColor::Green);
        assert_eq!(OrderStatus::Cancelled.color(), StatusColor::Red);
        assert_eq!(OrderStatus::Unknown.color(), StatusColor::Gray);
    }

    #[test]
    fn test_status_color_hex() {
        assert_eq!(StatusColor::Amber.hex(), "#FFA000");
        assert_eq!(StatusColor::Gray.hex(), "#666");
    }

    #[test]
    fn test_status_wire_values() {
        let json = serde_json::to_string(&OrderStatus::Pending).expect("serialize");
        assert_eq!(json, "\"pending\"");

        let status: OrderStatus = serde_json::from_str("\"processing\"").expect("deserialize");
        assert_eq!(status, OrderStatus::Processing);
    }

    #[test]
    fn test_unrecognized_status_falls_back_to_unknown() {
        let status: OrderStatus = serde_json::from_str("\"refunded\"").expect("deserialize");
        assert_eq!(status, OrderStatus::Unknown);
        assert_eq!(status.color(), StatusColor::Gray);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(OrderStatus::Pending.label(), "Pending");
        assert_eq!(OrderStatus::Cancelled.label(), "Cancelled");
    }
}
