//! Timeline entries shown by the Insights view

use super::{ContextSource, DashboardEntry, EntryContext, Insight, InsightKind, SourceIcon};

fn source(icon: SourceIcon, title: &str, url: &str) -> ContextSource {
    ContextSource {
        icon,
        title: title.to_string(),
        url: url.to_string(),
    }
}

/// Entries newest first
pub fn dashboard_entries() -> Vec<DashboardEntry> {
    vec![
        DashboardEntry {
            id: 1,
            time: "11:00".to_string(),
            context: EntryContext {
                title: "Gemini Architecture Research".to_string(),
                sources: vec![
                    source(SourceIcon::Video, "Tech Talk 2024", "youtube.com"),
                    source(SourceIcon::Book, "Google DeepMind Papers", "deepmind.google"),
                ],
            },
            insights: vec![
                Insight::new(
                    "i1",
                    InsightKind::Analysis,
                    "MoE Architecture Advantages",
                    "Mixture-of-Experts allows scaling parameters without linear cost increases. \
                     This architecture enables the model to activate only a fraction of its \
                     parameters per token.",
                    "Technical",
                    Some(MOE_DEEP_DIVE),
                ),
                Insight::new(
                    "i2",
                    InsightKind::Action,
                    "Implementation Strategy",
                    "Consider using the 1.5 Pro API for the context window, but cache common \
                     queries to optimize latency.",
                    "DevOps",
                    Some(DEPLOYMENT_PLAN),
                ),
            ],
        },
        DashboardEntry {
            id: 2,
            time: "10:45".to_string(),
            context: EntryContext {
                title: "React Performance Debugging".to_string(),
                sources: vec![source(SourceIcon::Code, "LifeContext/Repo", "github.com")],
            },
            insights: vec![Insight::new(
                "i3",
                InsightKind::Critical,
                "Reduce Re-renders",
                "The Timeline component is re-rendering on scroll. Implement React.memo() and \
                 virtualization.",
                "Performance",
                Some(RERENDER_ISSUE),
            )],
        },
        DashboardEntry {
            id: 3,
            time: "09:30".to_string(),
            context: EntryContext {
                title: "Design System Audit".to_string(),
                sources: vec![
                    source(SourceIcon::Web, "Dribbble Inspiration", "dribbble.com"),
                    source(SourceIcon::Web, "Tailwind UI", "tailwindui.com"),
                ],
            },
            insights: vec![
                Insight::new(
                    "i4",
                    InsightKind::Suggestion,
                    "Contrast Accessibility",
                    "Current glassmorphism borders are too subtle (10% opacity). Increase to \
                     15-20% for better definition.",
                    "UI/UX",
                    Some(CONTRAST_NOTE),
                ),
                Insight::new(
                    "i5",
                    InsightKind::Warning,
                    "Animation Overhead",
                    "Multiple background blur animations are consuming excessive GPU resources.",
                    "Performance",
                    Some(GPU_BOTTLENECK),
                ),
            ],
        },
    ]
}

const MOE_DEEP_DIVE: &str = r#"
# Deep Dive: Mixture of Experts

> **Core Concept:** MoE models use a "router" network to select a subset of "expert" networks to process each token.

### Why it matters?
Traditional dense models activate **all** parameters for every input. MoE models only activate a fraction (e.g., 10-15%), significantly reducing FLOPs per inference.

### Pseudocode Logic
```python
def forward(x):
  # Router decides which expert gets the token
  weights, indices = router(x)

  # Only run selected experts
  output = 0
  for i, expert in enumerate(experts):
      if i in indices:
          output += weights[i] * expert(x)
  return output
```

### Key Benefits
*   **Scalability:** Train trillion-parameter models cheaply.
*   **Latency:** Faster inference than dense equivalents.
*   **Specialization:** Experts can specialize in code, math, or creative writing.
"#;

const DEPLOYMENT_PLAN: &str = r#"
## Deployment Plan

To optimize for both **cost** and **performance**, we recommend a hybrid approach involving caching and model tiering.

### 1. Tiered Caching Strategy
Use **Context Caching** for large, static assets to reduce token usage:
*   API Documentation
*   Codebase Snapshots
*   Brand Style Guides

### 2. Model Selection
*   **Complex Reasoning:** Use *Gemini 1.5 Pro*
*   **High Volume / Chat:** Use *Gemini 1.5 Flash*
*   **Offline / Privacy:** Use *Gemma 2* (Self-hosted)

> **Note:** Flash is approx. 10x cheaper for simple RAG tasks than Pro.

### Action Items
*   Refactor API client to support caching headers.
*   Benchmark latency between Pro and Flash for your specific use case.
"#;

const RERENDER_ISSUE: &str = r#"
# Critical Performance Issue

We detected a **main-thread blocking** issue during rapid scrolling on mobile devices.

### Diagnosis
The `TimelineCard` component is receiving a new function reference for `onInsightClick` on every render of the parent.

```javascript
// Bad pattern causing re-renders
<TimelineCard
  onClick={() => handleInsight(id)} // New function every time
/>

// Fixed pattern
const handleInsight = useCallback((id) => { ... }, []);
<TimelineCard onClick={handleInsight} />
```

### Impact Analysis
*   **FPS Drop:** Scrolled at ~45fps on high-end devices.
*   **Battery:** Excessive CPU usage draining battery.

> **Recommendation:** Please apply the fix immediately to `components/TimelineCard.tsx`.
"#;

const CONTRAST_NOTE: &str = r#"
### Visual Hierarchy Adjustment

The current glassmorphism implementation is too subtle in light mode or high-glare environments.

*   **Current:** `border-white/10`
*   **Proposed:** `border-white/20` + `shadow-sm`

**Reasoning:**
1.  Improves edge detection for visually impaired users.
2.  Creates better separation from the background mesh.

> "Good design is invisible, but usable design is visible."
"#;

const GPU_BOTTLENECK: &str = r#"
## GPU Bottleneck Detected

CSS filters like `backdrop-filter: blur()` are expensive when animating, especially on large areas.

### Optimization Tips
1.  Use **opacity** animations instead of blur radius animations where possible.
2.  Promote layers using `will-change: transform`.
3.  Reduce the number of simultaneous glowing orbs.

```css
/* Expensive */
animation: blurPulse 2s infinite;

/* Cheap & Performant */
animation: opacityPulse 2s infinite;
```
"#;
