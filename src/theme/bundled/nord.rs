//! Nord - Arctic, bluish color palette

pub const THEME: &str = r##"# Nord theme for lifecontext
# Arctic, bluish color palette

[meta]
name = "Nord"
version = 1
author = "iTerm2-Color-Schemes"

[ui]
background = "#2e3440"
foreground = "#d8dee9"
border = "#4c566a"
border_focused = "#88c0d0"
title = "#88c0d0"
status_bar = "#d8dee9"
selection_bg = "#434c5e"
selection_fg = "#eceff4"
accent = "#81a1c1"
muted = "#616e88"

[insights]
analysis = "#81a1c1"
suggestion = "#5e81ac"
warning = "#ebcb8b"
critical = "#bf616a"
action = "#a3be8c"
"##;
