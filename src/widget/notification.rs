// Notification items shown in the widget's panel

use crate::data::daily::DailySummary;
use crate::data::{timeline, Insight};

/// One entry in the notification panel
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationItem {
    /// Points at an insight; clicking opens the detail overlay
    Insight(Insight),
    /// The daily briefing is ready; clicking jumps to Daily Picks
    DailySummary { title: String, preview: String },
}

impl NotificationItem {
    pub fn daily_summary(summary: &DailySummary) -> Self {
        Self::DailySummary {
            title: format!("{} ready", summary.title),
            preview: summary.content.clone(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Insight(insight) => insight.kind.label(),
            Self::DailySummary { .. } => "Daily",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Insight(insight) => &insight.title,
            Self::DailySummary { title, .. } => title,
        }
    }

    pub fn preview(&self) -> &str {
        match self {
            Self::Insight(insight) => &insight.content,
            Self::DailySummary { preview, .. } => preview,
        }
    }
}

/// What clicking a notification asks the app to do
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOutcome {
    OpenInsight(Insight),
    OpenDailyPicks,
}

impl From<NotificationItem> for NotificationOutcome {
    fn from(item: NotificationItem) -> Self {
        match item {
            NotificationItem::Insight(insight) => Self::OpenInsight(insight),
            NotificationItem::DailySummary { .. } => Self::OpenDailyPicks,
        }
    }
}

/// Test trigger: the two most urgent timeline insights
pub fn sample_insight_notifications() -> Vec<NotificationItem> {
    let entries = timeline::dashboard_entries();
    ["i3", "i2"]
        .iter()
        .filter_map(|id| crate::data::find_insight(&entries, id).cloned())
        .map(NotificationItem::Insight)
        .collect()
}

/// Test trigger: a single daily-summary notification
pub fn sample_summary_notification() -> Vec<NotificationItem> {
    vec![NotificationItem::daily_summary(
        &crate::data::daily::daily_summary(),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InsightKind;

    #[test]
    fn insight_samples_resolve() {
        let items = sample_insight_notifications();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label(), InsightKind::Critical.label());
    }

    #[test]
    fn summary_click_goes_to_daily_picks() {
        let item = sample_summary_notification().remove(0);
        assert_eq!(item.label(), "Daily");
        assert_eq!(
            NotificationOutcome::from(item),
            NotificationOutcome::OpenDailyPicks
        );
    }
}
