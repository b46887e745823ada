// Data module - the records every view renders
//
// All content is compiled in. Views receive owned copies at startup and
// never mutate the records themselves; toggles (todo done, source active,
// category open) live in view state keyed by record id.

pub mod daily;
pub mod knowledge;
pub mod timeline;

// ─────────────────────────────────────────────────────────────────────────────
// Insight
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed set of insight categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Analysis,
    Suggestion,
    Warning,
    Critical,
    Action,
}

impl InsightKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "Analysis",
            Self::Suggestion => "Suggestion",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::Action => "Action",
        }
    }
}

/// A short categorized observation with an optional long-form markdown body
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub id: String,
    pub kind: InsightKind,
    pub title: String,
    pub content: String,
    pub tag: String,
    pub markdown: Option<String>,
}

impl Insight {
    pub fn new(
        id: &str,
        kind: InsightKind,
        title: &str,
        content: &str,
        tag: &str,
        markdown: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            content: content.to_string(),
            tag: tag.to_string(),
            markdown: markdown.map(|m| m.trim().to_string()),
        }
    }

    /// Markdown for the detail overlay: the long body, or a heading plus the short text
    pub fn detail_markdown(&self) -> String {
        match &self.markdown {
            Some(md) => md.clone(),
            None => format!("# {}\n\n{}", self.title, self.content),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timeline
// ─────────────────────────────────────────────────────────────────────────────

/// A reference the user was looking at when an entry was captured
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSource {
    pub icon: SourceIcon,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceIcon {
    Video,
    Book,
    Code,
    Web,
}

impl SourceIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Video => "▶",
            Self::Book => "📖",
            Self::Code => "⌥",
            Self::Web => "🌐",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryContext {
    pub title: String,
    pub sources: Vec<ContextSource>,
}

/// One timeline row: when, what the user was doing, what was noticed
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardEntry {
    pub id: u32,
    pub time: String,
    pub context: EntryContext,
    pub insights: Vec<Insight>,
}

/// Look an insight up by id across all entries
pub fn find_insight<'a>(entries: &'a [DashboardEntry], id: &str) -> Option<&'a Insight> {
    entries
        .iter()
        .flat_map(|e| e.insights.iter())
        .find(|i| i.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_ids_are_unique() {
        let entries = timeline::dashboard_entries();
        let mut ids: Vec<_> = entries
            .iter()
            .flat_map(|e| e.insights.iter().map(|i| i.id.clone()))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn find_insight_by_id() {
        let entries = timeline::dashboard_entries();
        let insight = find_insight(&entries, "i3").expect("i3 exists");
        assert_eq!(insight.kind, InsightKind::Critical);
        assert!(find_insight(&entries, "missing").is_none());
    }

    #[test]
    fn detail_markdown_falls_back_to_content() {
        let insight = Insight::new("x", InsightKind::Action, "Title", "Body", "Tag", None);
        assert_eq!(insight.detail_markdown(), "# Title\n\nBody");
    }
}
