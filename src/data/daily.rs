//! Daily Picks content: briefing, todos, news feed, feed sources

use super::{Insight, InsightKind};

/// Id of the briefing when it is shown as an insight
pub const DAILY_SUMMARY_ID: &str = "daily-summary";

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub title: String,
    pub date: String,
    pub content: String,
    pub stats: Vec<(String, String)>,
}

impl DailySummary {
    /// The briefing as an insight, for the detail overlay and notifications
    pub fn to_insight(&self) -> Insight {
        let metrics = self
            .stats
            .iter()
            .map(|(label, value)| format!("- **{}:** {}", label, value))
            .collect::<Vec<_>>()
            .join("\n");

        let markdown = format!(
            "# {title}\n\n**Date:** {date}\n\n{content}\n\n## Key Metrics\n\n{metrics}\n\n{analysis}",
            title = self.title,
            date = self.date,
            content = self.content,
            metrics = metrics,
            analysis = DETAILED_ANALYSIS.trim(),
        );

        Insight {
            id: DAILY_SUMMARY_ID.to_string(),
            kind: InsightKind::Analysis,
            title: self.title.clone(),
            content: self.content.clone(),
            tag: self.date.clone(),
            markdown: Some(markdown),
        }
    }
}

pub fn daily_summary() -> DailySummary {
    DailySummary {
        title: "Daily Briefing".to_string(),
        date: "Oct 24, 2025".to_string(),
        content: "Today's digital footprint suggests a strong focus on frontend architecture and \
                  AI integration. Your reading patterns align with the release of Gemini 1.5, \
                  indicating a shift towards multimodal model research. Productivity peaked \
                  between 10 AM and 2 PM."
            .to_string(),
        stats: vec![
            ("Focus Score".to_string(), "88%".to_string()),
            ("Reading Time".to_string(), "2h 15m".to_string()),
            ("New Topics".to_string(), "3".to_string()),
        ],
    }
}

const DETAILED_ANALYSIS: &str = r#"
## Detailed Analysis

Today's digital footprint reveals a comprehensive engagement with cutting-edge technologies. The focus on frontend architecture suggests a deep dive into modern web development practices, while the alignment with Gemini 1.5 release indicates active research into multimodal AI capabilities.

### Productivity Insights

Productivity peaked between 10 AM and 2 PM, indicating optimal cognitive performance during these hours. This pattern aligns with research on circadian rhythms and peak mental acuity.

### Learning Patterns

The shift towards multimodal model research reflects an understanding of the evolving AI landscape, where text, image, and audio processing converge to create more sophisticated AI systems.

### Recommendations

1. **Maintain Focus Windows**: Leverage the 10 AM - 2 PM window for complex problem-solving tasks.
2. **Deep Dive Sessions**: Schedule dedicated time for exploring multimodal AI capabilities.
3. **Knowledge Integration**: Connect frontend architecture learnings with AI integration patterns.
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Todos
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: u32,
    pub text: String,
    pub completed: bool,
    pub tag: String,
}

pub fn todos() -> Vec<TodoItem> {
    [
        (1, "Review PR #42: Virtualization Fix", false, "Critical"),
        (2, "Research Gemini 2.5 Flash limits", false, "Research"),
        (3, "Update Tailwind config for dark mode", true, "Dev"),
        (4, "Schedule team sync", false, "Meeting"),
    ]
    .into_iter()
    .map(|(id, text, completed, tag)| TodoItem {
        id,
        text: text.to_string(),
        completed,
        tag: tag.to_string(),
    })
    .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// News feed
// ─────────────────────────────────────────────────────────────────────────────

/// Image cards get a taller placeholder block in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsKind {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub source: String,
    pub time: String,
    pub kind: NewsKind,
    pub category: String,
    pub summary: Option<String>,
}

pub fn news_items() -> Vec<NewsItem> {
    use NewsKind::{Image, Text};

    let raw: [(&str, &str, NewsKind, &str, Option<&str>); 20] = [
        ("The Future of Generative AI in Healthcare", "TechCrunch", Image, "Health",
         Some("How LLMs are revolutionizing diagnostic processes and personalized treatment plans across major hospital networks.")),
        ("Rust vs Go: Performance Benchmarks 2025", "Dev.to", Text, "Dev",
         Some("A comprehensive look at memory management, concurrency models, and compilation speeds in the latest versions.")),
        ("Sustainable Architecture: The Vertical Forest", "ArchDaily", Image, "Design", None),
        ("Market Watch: Crypto Volatility Spikes", "Bloomberg", Text, "Finance",
         Some("Bitcoin and Ethereum see double-digit fluctuations as regulatory news impacts investor sentiment globally.")),
        ("CSS Container Queries are finally here", "Smashing Mag", Image, "Dev", None),
        ("The Psychology of Dark Mode UX", "UX Collective", Text, "Design",
         Some("Why dark interfaces reduce strain but require careful contrast calibration for accessibility compliance.")),
        ("SpaceX Starship Launch Successful", "BBC Science", Image, "Science",
         Some("The massive rocket achieved orbit for the first time, marking a new era in interplanetary travel capabilities.")),
        ("Global Supply Chain Recovery Report", "Reuters", Text, "Business",
         Some("Shipping costs normalize as port congestion eases across Asia and the West Coast.")),
        ("Cybersecurity Trends: Zero Trust Architecture", "Wired", Image, "Security", None),
        ("Minimalism in 2025", "Awwwards", Text, "Design", Some("Less is more.")),
        ("Quantum Computing Breakthrough", "Nature", Image, "Science",
         Some("Researchers stabilize qubits for record durations at room temperature.")),
        ("Next.js 15 Released: What's New?", "Vercel Blog", Text, "Dev",
         Some("Partial Prerendering, stable Server Actions, and Turbopack improvements lead the changelog.")),
        ("The Rise of Biophilic Office Design", "Architectural Digest", Image, "Architecture", None),
        ("Remote Work Policies in 2025", "Forbes", Text, "Business",
         Some("Hybrid models stabilize as major tech firms enforce 3-day office mandates.")),
        ("Electric Vehicle Battery Innovations", "Electrek", Image, "Tech",
         Some("Solid-state batteries promise 2x range and 10-minute charging times by 2026.")),
        ("Mental Health in the Digital Age", "Psychology Today", Text, "Health",
         Some("Studies show correlation between notification frequency and anxiety levels in teens.")),
        ("AI Art Ethics Debate Continues", "The Verge", Image, "Tech", None),
        ("Understanding TypeScript 6.0", "TS Blog", Text, "Dev",
         Some("New type inference rules make generic constraints even more powerful.")),
        ("Deep Sea Exploration", "NatGeo", Image, "Science", None),
        ("Coffee Culture: The Fourth Wave", "Sprudge", Text, "Lifestyle",
         Some("It's no longer just about the bean origin, but the precise molecular chemistry of the brew water.")),
    ];

    raw.into_iter()
        .enumerate()
        .map(|(i, (title, source, kind, category, summary))| NewsItem {
            id: i as u32 + 1,
            title: title.to_string(),
            source: source.to_string(),
            time: format!("{}h ago", i + 1),
            kind,
            category: category.to_string(),
            summary: summary.map(str::to_string),
        })
        .collect()
}

/// Deal items round-robin into `columns` columns (item i goes to column i % columns)
pub fn masonry_columns<T>(items: &[T], columns: usize) -> Vec<Vec<&T>> {
    let columns = columns.max(1);
    let mut out: Vec<Vec<&T>> = (0..columns).map(|_| Vec::new()).collect();
    for (i, item) in items.iter().enumerate() {
        out[i % columns].push(item);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Feed sources
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub id: String,
    pub name: String,
    pub active: bool,
}

pub fn feed_sources() -> Vec<FeedSource> {
    [
        ("tech", "Technology", true),
        ("design", "Design", true),
        ("finance", "Finance", false),
        ("science", "Science", true),
        ("health", "Health", true),
        ("security", "Security", true),
    ]
    .into_iter()
    .map(|(id, name, active)| FeedSource {
        id: id.to_string(),
        name: name.to_string(),
        active,
    })
    .collect()
}
