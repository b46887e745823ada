//! Daylight - light background for bright rooms

pub const THEME: &str = r##"# Daylight theme for lifecontext
# Light slate background, saturated badges

[meta]
name = "Daylight"
version = 1
author = "lifecontext"

[ui]
background = "#f8fafc"
foreground = "#0f172a"
border = "#cbd5e1"
border_focused = "#2563eb"
title = "#1e3a8a"
status_bar = "#475569"
selection_bg = "#dbeafe"
selection_fg = "#0f172a"
accent = "#2563eb"
muted = "#64748b"
border_type = "rounded"

[insights]
analysis = "#2563eb"
suggestion = "#4f46e5"
warning = "#b45309"
critical = "#dc2626"
action = "#059669"

[code]
inline = "#1d4ed8"
block = "#334155"
"##;
