//! Nebula - deep indigo night sky, the default look

pub const THEME: &str = r##"# Nebula theme for lifecontext
# Deep indigo background with blue glass accents

[meta]
name = "Nebula"
version = 1
author = "lifecontext"

[ui]
background = "#0f0c29"
foreground = "#e2e8f0"
border = "#334155"
border_focused = "#60a5fa"
title = "#bfdbfe"
status_bar = "#94a3b8"
selection_bg = "#1e3a8a"
selection_fg = "#ffffff"
accent = "#60a5fa"
muted = "#64748b"
border_type = "rounded"

[insights]
analysis = "#60a5fa"
suggestion = "#818cf8"
warning = "#fbbf24"
critical = "#f87171"
action = "#34d399"

[code]
inline = "#93c5fd"
block = "#cbd5e1"
"##;
